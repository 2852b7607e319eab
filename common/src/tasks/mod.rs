pub mod executor;
pub mod rpc_request;

pub use executor::RpcTransport;
pub use rpc_request::executor::RpcRequestExecutor;
pub use rpc_request::{CallRpcError, RpcErrorObject, RpcOutcome, RpcRequest, RpcResponse};
