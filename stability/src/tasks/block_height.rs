use common::tasks::{CallRpcError, RpcOutcome, RpcRequest, RpcTransport};
use common::{BlockHeight, Endpoint, Value};
use log::debug;
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;

const BLOCK_HEIGHT_REQUEST_ID: i64 = 1;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockHeightResponse {
    pub response_time: Duration,
    pub block_height: BlockHeight,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CallBlockHeightError {
    #[error(transparent)]
    Call(#[from] CallRpcError),
    #[error("RPC error: {0}")]
    RpcError(String),
    #[error("invalid response format: {0}")]
    InvalidResult(String),
}

/*
 * Liveness and latency: one chain height query, timed around the whole call.
 */
#[derive(Clone)]
pub struct BlockHeightExecutor {
    transport: Arc<dyn RpcTransport>,
    method: String,
}

impl BlockHeightExecutor {
    pub fn new(transport: Arc<dyn RpcTransport>, method: &str) -> Self {
        BlockHeightExecutor {
            transport,
            method: method.to_string(),
        }
    }

    pub fn request(&self) -> RpcRequest {
        RpcRequest::new(&self.method, vec![], BLOCK_HEIGHT_REQUEST_ID)
    }

    pub async fn call_block_height(
        &self,
        endpoint: &Endpoint,
    ) -> Result<BlockHeightResponse, CallBlockHeightError> {
        let request = self.request();
        let now = Instant::now();
        let response = self.transport.call(endpoint, &request).await?;
        let outcome = response.into_outcome()?;
        let response_time = now.elapsed();
        match outcome {
            RpcOutcome::Error(error) => Err(CallBlockHeightError::RpcError(error.message)),
            RpcOutcome::Result(value) => {
                let block_height = parse_block_height(&value)?;
                debug!(
                    "{} block height {} in {}ms",
                    endpoint.name,
                    block_height,
                    response_time.as_millis()
                );
                Ok(BlockHeightResponse {
                    response_time,
                    block_height,
                })
            }
        }
    }
}

fn parse_block_height(value: &Value) -> Result<BlockHeight, CallBlockHeightError> {
    if let Some(height) = value.as_u64() {
        return Ok(height);
    }
    match value.as_f64() {
        Some(height) if height >= 0.0 && height.fract() == 0.0 && height < u64::MAX as f64 => {
            Ok(height as BlockHeight)
        }
        _ => Err(CallBlockHeightError::InvalidResult(value.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::tasks::RpcResponse;
    use common::NetworkClass;
    use serde_json::json;
    use test_util::helper::ScriptedTransport;

    fn endpoint() -> Endpoint {
        Endpoint::new("Scripted", "http://scripted", NetworkClass::Test)
    }

    fn executor_answering(response: RpcResponse) -> BlockHeightExecutor {
        let transport = ScriptedTransport::new(move |_, request, _| {
            assert_eq!(request.method, "getblockcount");
            assert!(request.params.is_empty());
            Ok(response.clone())
        });
        BlockHeightExecutor::new(Arc::new(transport), "getblockcount")
    }

    #[test]
    fn test_parse_block_height() {
        assert_eq!(parse_block_height(&json!(100)), Ok(100));
        assert_eq!(parse_block_height(&json!(100.0)), Ok(100));
        assert!(parse_block_height(&json!(-1)).is_err());
        assert!(parse_block_height(&json!(1.5)).is_err());
        assert!(parse_block_height(&json!("100")).is_err());
        assert!(parse_block_height(&json!({"height": 100})).is_err());
        // 2^64 does not fit and must not saturate to u64::MAX.
        assert!(parse_block_height(&json!(18_446_744_073_709_551_616.0)).is_err());
        assert_eq!(parse_block_height(&json!(u64::MAX)), Ok(u64::MAX));
    }

    #[tokio::test]
    async fn test_block_height_success() {
        let executor = executor_answering(RpcResponse::new_result(1, json!(4_321_000)));
        let response = executor.call_block_height(&endpoint()).await.unwrap();
        assert_eq!(response.block_height, 4_321_000);
    }

    #[tokio::test]
    async fn test_block_height_rpc_error_is_liveness_failure() {
        let executor = executor_answering(RpcResponse::new_error(1, -32601, "Method not found"));
        let err = executor.call_block_height(&endpoint()).await.unwrap_err();
        assert_eq!(err.to_string(), "RPC error: Method not found");
    }

    #[tokio::test]
    async fn test_block_height_non_numeric_result() {
        let executor = executor_answering(RpcResponse::new_result(1, json!("0x10")));
        let err = executor.call_block_height(&endpoint()).await.unwrap_err();
        assert!(matches!(err, CallBlockHeightError::InvalidResult(_)));
    }

    #[tokio::test]
    async fn test_block_height_transport_failure() {
        let transport = ScriptedTransport::new(|_, _, _| {
            Err(CallRpcError::SendError("connection refused".to_string()))
        });
        let executor = BlockHeightExecutor::new(Arc::new(transport), "getblockcount");
        let err = executor.call_block_height(&endpoint()).await.unwrap_err();
        assert_eq!(
            err,
            CallBlockHeightError::Call(CallRpcError::SendError("connection refused".to_string()))
        );
        assert_eq!(err.to_string(), "send error: connection refused");
    }
}
