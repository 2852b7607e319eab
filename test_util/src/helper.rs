use async_trait::async_trait;
use common::logger::init_logger;
use common::tasks::{CallRpcError, RpcRequest, RpcResponse, RpcTransport};
use common::{BlockHeight, Endpoint, NetworkClass};
use httpmock::prelude::POST;
use httpmock::MockServer;
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

pub const METHOD_NOT_FOUND: i64 = -32601;
pub const INVALID_PARAMS: i64 = -32602;

pub fn init_logging() {
    let _res = init_logger(&String::from("Testing"));
}

pub fn mock_endpoint(name: &str, server: &MockServer, network_class: NetworkClass) -> Endpoint {
    Endpoint::new(name, &server.base_url(), network_class)
}

/*
 * A well behaved node: answers the height query after `delay` and rejects both invalid calls of
 * the error handling probe with a JSON-RPC error envelope.
 */
pub async fn mock_rpc_node(height: BlockHeight, delay: Duration) -> MockServer {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/")
                .json_body_partial(r#"{"method": "getblockcount"}"#);
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({"jsonrpc": "2.0", "id": 1, "result": height}))
                .delay(delay);
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/")
                .json_body_partial(r#"{"method": "invalidmethod"}"#);
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({
                    "jsonrpc": "2.0",
                    "id": 1,
                    "error": {"code": METHOD_NOT_FOUND, "message": "Method not found"}
                }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/")
                .json_body_partial(r#"{"method": "getblock"}"#);
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({
                    "jsonrpc": "2.0",
                    "id": 2,
                    "error": {"code": INVALID_PARAMS, "message": "Invalid params"}
                }));
        })
        .await;
    server
}

/// Answers the height query but fails invalid calls at the HTTP level, without an envelope.
pub async fn mock_http_failing_node(height: BlockHeight) -> MockServer {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/")
                .json_body_partial(r#"{"method": "getblockcount"}"#);
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({"jsonrpc": "2.0", "id": 1, "result": height}));
        })
        .await;
    for method in ["invalidmethod", "getblock"] {
        server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/")
                    .json_body_partial(json!({ "method": method }).to_string());
                then.status(500).body("Internal Server Error");
            })
            .await;
    }
    server
}

type Handler =
    dyn Fn(&Endpoint, &RpcRequest, usize) -> Result<RpcResponse, CallRpcError> + Send + Sync;

/*
 * In-memory transport driven by a closure. The closure gets the endpoint, the request and the
 * zero based index of the call across the whole transport, which is enough to script bursts
 * ("first n calls succeed"), per endpoint behaviour or a crash.
 */
pub struct ScriptedTransport {
    handler: Box<Handler>,
    calls: AtomicUsize,
}

impl ScriptedTransport {
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(&Endpoint, &RpcRequest, usize) -> Result<RpcResponse, CallRpcError>
            + Send
            + Sync
            + 'static,
    {
        ScriptedTransport {
            handler: Box::new(handler),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RpcTransport for ScriptedTransport {
    async fn call(
        &self,
        endpoint: &Endpoint,
        request: &RpcRequest,
    ) -> Result<RpcResponse, CallRpcError> {
        let index = self.calls.fetch_add(1, Ordering::SeqCst);
        (self.handler)(endpoint, request, index)
    }
}
