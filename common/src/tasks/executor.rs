use crate::component::Endpoint;
use crate::tasks::rpc_request::{CallRpcError, RpcRequest, RpcResponse};
use async_trait::async_trait;

/*
 * One bounded JSON-RPC call against one endpoint. Every probe goes through this seam, so the
 * probing logic does not know whether it talks to a real node or to a scripted one.
 */
#[async_trait]
pub trait RpcTransport: Sync + Send {
    async fn call(
        &self,
        endpoint: &Endpoint,
        request: &RpcRequest,
    ) -> Result<RpcResponse, CallRpcError>;
}
