pub mod models;
pub mod registry;
pub mod server_config;
pub mod services;
pub mod tasks;

use lazy_static::lazy_static;
use std::env;

pub const DEFAULT_RPC_TIMEOUT_MS: u64 = 10_000;
// Burst shape of the rate-limit probe. Fixed policy, not configuration.
pub const BURST_SIZE: usize = 20;
pub const BURST_SUCCESS_THRESHOLD: usize = 15;

lazy_static! {
    pub static ref STABILITY_CONFIG: Option<String> = env::var("STABILITY_CONFIG").ok();
    pub static ref RPC_TIMEOUT_MS: Option<u64> = env::var("RPC_TIMEOUT_MS")
        .ok()
        .and_then(|timeout| timeout.parse::<u64>().ok());
}
