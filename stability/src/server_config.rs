use crate::DEFAULT_RPC_TIMEOUT_MS;
use anyhow::Error;
use common::config::LoadConfig;
use common::{Endpoint, Value};
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Method names used by the probes. The engine treats them as opaque strings.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
#[serde(default)]
pub struct RpcMethods {
    pub block_height: String,
    pub unknown_method: String,
    pub invalid_params_method: String,
    pub invalid_params: Vec<Value>,
}

impl Default for RpcMethods {
    fn default() -> Self {
        RpcMethods {
            block_height: "getblockcount".to_string(),
            unknown_method: "invalidmethod".to_string(),
            invalid_params_method: "getblock".to_string(),
            invalid_params: vec![json!("invalid_hash")],
        }
    }
}

/*
 * Stability run configuration. An empty endpoint list means the built-in registry.
 */
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
#[serde(default)]
pub struct StabilityConfig {
    pub endpoints: Vec<Endpoint>,
    pub timeout_ms: u64,
    pub methods: RpcMethods,
}

impl Default for StabilityConfig {
    fn default() -> Self {
        StabilityConfig {
            endpoints: vec![],
            timeout_ms: DEFAULT_RPC_TIMEOUT_MS,
            methods: RpcMethods::default(),
        }
    }
}

impl LoadConfig<StabilityConfig> for StabilityConfig {}

impl StabilityConfig {
    /// File settings first, then the explicit timeout override.
    pub fn resolve(path: Option<&str>, timeout_ms: Option<u64>) -> Result<Self, Error> {
        let mut config = match path {
            Some(path) => StabilityConfig::load_config(path)?,
            None => StabilityConfig::default(),
        };
        if let Some(timeout_ms) = timeout_ms {
            config.timeout_ms = timeout_ms;
        }
        Ok(config)
    }
}
