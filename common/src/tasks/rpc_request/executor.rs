use crate::component::Endpoint;
use crate::tasks::executor::RpcTransport;
use crate::tasks::rpc_request::{CallRpcError, RpcRequest, RpcResponse};
use async_trait::async_trait;
use log::{debug, trace};
use reqwest::Client;
use std::time::Duration;

/*
 * JSON-RPC over HTTP POST. The HTTP status is logged but not interpreted: whatever body comes
 * back is decoded, and a body that is not a JSON-RPC envelope is a decode error.
 */
#[derive(Clone, Debug)]
pub struct RpcRequestExecutor {
    client: Client,
    timeout: Duration,
}

impl RpcRequestExecutor {
    pub fn new(timeout: Duration) -> Result<Self, CallRpcError> {
        let client = reqwest::Client::builder()
            .danger_accept_invalid_certs(true)
            .build()
            .map_err(|err| CallRpcError::BuildError(format!("{}", err)))?;
        Ok(RpcRequestExecutor { client, timeout })
    }
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
    fn transport_error(&self, err: reqwest::Error) -> String {
        if err.is_timeout() {
            format!("request timed out after {}ms: {}", self.timeout.as_millis(), err)
        } else {
            format!("{}", err)
        }
    }
}

#[async_trait]
impl RpcTransport for RpcRequestExecutor {
    async fn call(
        &self,
        endpoint: &Endpoint,
        request: &RpcRequest,
    ) -> Result<RpcResponse, CallRpcError> {
        let body = serde_json::to_string(request)
            .map_err(|err| CallRpcError::BuildError(format!("{}", err)))?;
        trace!("Call {} on {} with body {}", request.method, endpoint.name, &body);
        let resp = self
            .client
            .post(endpoint.address.as_str())
            .timeout(self.timeout)
            .header("content-type", "application/json")
            .body(body)
            .send()
            .await
            .map_err(|err| CallRpcError::SendError(self.transport_error(err)))?;
        let http_code = resp.status().as_u16();
        let response_body = resp
            .text()
            .await
            .map_err(|err| CallRpcError::GetBodyError(self.transport_error(err)))?;
        debug!(
            "{} answered {} with http code {}",
            endpoint.name, request.method, http_code
        );
        serde_json::from_str::<RpcResponse>(&response_body).map_err(|err| {
            CallRpcError::DecodeError(format!(
                "Err {} when parsing response with http code {}",
                err, http_code
            ))
        })
    }
}
