pub mod component;
pub mod config;
pub mod logger;
pub mod task_spawn;
pub mod tasks;
pub mod util;

pub use crate::component::{Endpoint, NetworkClass};

pub type EndpointName = String;
pub type UrlType = String;
pub type WalletAddress = String;
pub type BlockHeight = u64;

pub use serde::{Deserialize, Serialize};
pub use serde_json::Value;
