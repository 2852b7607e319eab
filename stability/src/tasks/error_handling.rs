use crate::server_config::RpcMethods;
use common::tasks::{RpcOutcome, RpcRequest, RpcTransport};
use common::Endpoint;
use log::{debug, info, warn};
use std::sync::Arc;

/*
 * Graceful degradation check: an unknown method and a known method with bad params must both
 * come back as JSON-RPC error envelopes. Sent one after the other so the burst of the rate-limit
 * probe cannot be mistaken for a failure here.
 */
#[derive(Clone)]
pub struct ErrorHandlingExecutor {
    transport: Arc<dyn RpcTransport>,
    methods: RpcMethods,
}

impl ErrorHandlingExecutor {
    pub fn new(transport: Arc<dyn RpcTransport>, methods: &RpcMethods) -> Self {
        ErrorHandlingExecutor {
            transport,
            methods: methods.clone(),
        }
    }

    pub fn invalid_requests(&self) -> Vec<RpcRequest> {
        vec![
            RpcRequest::new(&self.methods.unknown_method, vec![], 1),
            RpcRequest::new(
                &self.methods.invalid_params_method,
                self.methods.invalid_params.clone(),
                2,
            ),
        ]
    }

    pub async fn test_error_handling(&self, endpoint: &Endpoint) -> bool {
        info!("  Testing error handling on {}...", endpoint.name);
        for request in self.invalid_requests() {
            let outcome = self
                .transport
                .call(endpoint, &request)
                .await
                .and_then(|response| response.into_outcome());
            match outcome {
                Ok(RpcOutcome::Error(error)) => {
                    debug!(
                        "{} rejected {} with code {}: {}",
                        endpoint.name, request.method, error.code, error.message
                    );
                }
                Ok(RpcOutcome::Result(result)) => {
                    warn!(
                        "  {} accepted invalid call {} with result {}",
                        endpoint.name, request.method, result
                    );
                    return false;
                }
                Err(err) => {
                    warn!(
                        "  {} did not answer invalid call {} with an error response: {}",
                        endpoint.name, request.method, err
                    );
                    return false;
                }
            }
        }
        info!("  Error handling on {}: proper error responses received", endpoint.name);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::tasks::{CallRpcError, RpcRequestExecutor, RpcResponse};
    use common::NetworkClass;
    use serde_json::json;
    use std::time::Duration;
    use test_util::helper::{mock_endpoint, mock_http_failing_node, mock_rpc_node, ScriptedTransport};

    fn endpoint() -> Endpoint {
        Endpoint::new("Scripted", "http://scripted", NetworkClass::Test)
    }

    fn http_executor() -> ErrorHandlingExecutor {
        let transport = Arc::new(RpcRequestExecutor::new(Duration::from_secs(5)).unwrap());
        ErrorHandlingExecutor::new(transport, &RpcMethods::default())
    }

    #[test]
    fn test_invalid_requests() {
        let transport = Arc::new(ScriptedTransport::new(|_, request, _| {
            Ok(RpcResponse::new_error(request.id, -32601, "Method not found"))
        }));
        let requests = ErrorHandlingExecutor::new(transport, &RpcMethods::default()).invalid_requests();
        assert_eq!(requests[0], RpcRequest::new("invalidmethod", vec![], 1));
        assert_eq!(
            requests[1],
            RpcRequest::new("getblock", vec![json!("invalid_hash")], 2)
        );
    }

    #[tokio::test]
    async fn test_both_errors_pass() {
        let transport = Arc::new(ScriptedTransport::new(|_, request, _| {
            Ok(RpcResponse::new_error(request.id, -32602, "Invalid params"))
        }));
        let executor = ErrorHandlingExecutor::new(transport.clone(), &RpcMethods::default());
        assert!(executor.test_error_handling(&endpoint()).await);
        assert_eq!(transport.calls(), 2);
    }

    #[tokio::test]
    async fn test_result_for_invalid_params_fails() {
        let transport = Arc::new(ScriptedTransport::new(|_, request, _| {
            if request.method == "getblock" {
                Ok(RpcResponse::new_result(request.id, json!({"hash": "0x00"})))
            } else {
                Ok(RpcResponse::new_error(request.id, -32601, "Method not found"))
            }
        }));
        let executor = ErrorHandlingExecutor::new(transport, &RpcMethods::default());
        assert!(!executor.test_error_handling(&endpoint()).await);
    }

    #[tokio::test]
    async fn test_transport_failure_fails_and_stops() {
        let transport = Arc::new(ScriptedTransport::new(|_, _, _| {
            Err(CallRpcError::SendError("connection reset".to_string()))
        }));
        let executor = ErrorHandlingExecutor::new(transport.clone(), &RpcMethods::default());
        assert!(!executor.test_error_handling(&endpoint()).await);
        assert_eq!(transport.calls(), 1);
    }

    #[tokio::test]
    async fn test_http_node_with_error_envelopes() {
        let server = mock_rpc_node(100, Duration::ZERO).await;
        let endpoint = mock_endpoint("Mock", &server, NetworkClass::Test);
        assert!(http_executor().test_error_handling(&endpoint).await);
    }

    #[tokio::test]
    async fn test_http_failure_without_envelope() {
        let server = mock_http_failing_node(100).await;
        let endpoint = mock_endpoint("Broken", &server, NetworkClass::Test);
        assert!(!http_executor().test_error_handling(&endpoint).await);
    }
}
