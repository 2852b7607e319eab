use crate::Value;
use serde::{Deserialize, Serialize};
use thiserror::Error;
pub mod executor;

pub const JSONRPC_VERSION: &str = "2.0";

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub method: String,
    pub params: Vec<Value>,
    pub id: i64,
}

impl RpcRequest {
    pub fn new(method: &str, params: Vec<Value>, id: i64) -> Self {
        RpcRequest {
            jsonrpc: JSONRPC_VERSION.to_string(),
            method: method.to_string(),
            params,
            id,
        }
    }
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct RpcErrorObject {
    pub code: i64,
    pub message: String,
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct RpcResponse {
    #[serde(default)]
    pub jsonrpc: String,
    // A JSON `null` result deserializes to `None`, same as an absent one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcErrorObject>,
    #[serde(default)]
    pub id: Option<i64>,
}

/// The two legal shapes of a response: exactly one of `result` or `error`.
#[derive(Clone, Debug, PartialEq)]
pub enum RpcOutcome {
    Result(Value),
    Error(RpcErrorObject),
}

impl RpcResponse {
    pub fn new_result(id: i64, result: Value) -> Self {
        RpcResponse {
            jsonrpc: JSONRPC_VERSION.to_string(),
            result: Some(result),
            error: None,
            id: Some(id),
        }
    }
    pub fn new_error(id: i64, code: i64, message: &str) -> Self {
        RpcResponse {
            jsonrpc: JSONRPC_VERSION.to_string(),
            result: None,
            error: Some(RpcErrorObject {
                code,
                message: message.to_string(),
            }),
            id: Some(id),
        }
    }
    pub fn into_outcome(self) -> Result<RpcOutcome, CallRpcError> {
        match (self.result, self.error) {
            (Some(result), None) => Ok(RpcOutcome::Result(result)),
            (None, Some(error)) => Ok(RpcOutcome::Error(error)),
            (Some(_), Some(_)) => Err(CallRpcError::DecodeError(
                "response carries both result and error".to_string(),
            )),
            (None, None) => Err(CallRpcError::DecodeError(
                "response carries neither result nor error".to_string(),
            )),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CallRpcError {
    #[error("build error: {0}")]
    BuildError(String),
    #[error("send error: {0}")]
    SendError(String),
    #[error("get body error: {0}")]
    GetBodyError(String),
    #[error("decode error: {0}")]
    DecodeError(String),
}

impl CallRpcError {
    pub fn get_message(&self) -> String {
        match self {
            CallRpcError::BuildError(message)
            | CallRpcError::SendError(message)
            | CallRpcError::GetBodyError(message)
            | CallRpcError::DecodeError(message) => message.to_string(),
        }
    }
    pub fn get_code(&self) -> u32 {
        match self {
            CallRpcError::BuildError(_) => 1u32,
            CallRpcError::SendError(_) => 2u32,
            CallRpcError::GetBodyError(_) => 3u32,
            CallRpcError::DecodeError(_) => 4u32,
        }
    }
    /// Connection, timeout or body read failure, as opposed to a body of the wrong shape.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            CallRpcError::SendError(_) | CallRpcError::GetBodyError(_)
        )
    }
}
