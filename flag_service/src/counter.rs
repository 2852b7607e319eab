use async_trait::async_trait;
use log::{debug, info};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;

const COUNTER_KEY_PREFIX: &str = "flag:";
const COUNTER_WIDTH: usize = 8;

#[async_trait]
pub trait KeyValueStore: Sync + Send {
    async fn get(&self, key: &str) -> Option<Vec<u8>>;
    async fn put(&self, key: &str, value: Vec<u8>);
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, Vec<u8>>>,
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.entries.lock().await.get(key).cloned()
    }
    async fn put(&self, key: &str, value: Vec<u8>) {
        self.entries.lock().await.insert(key.to_string(), value);
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CounterError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("report count of wallet {0} is already at its maximum")]
    Overflow(String),
    #[error("stored report count of wallet {wallet} has {len} bytes, expected {expected}")]
    CorruptValue {
        wallet: String,
        len: usize,
        expected: usize,
    },
}

/*
 * Per-wallet report counter. Counts are stored as 8-byte big-endian u64 values under
 * `flag:<wallet>`. Incrementing past u64::MAX is refused with `Overflow` and nothing is written.
 */
pub struct FlagCounter {
    store: Arc<dyn KeyValueStore>,
    // Serializes read-modify-write of counts.
    write_lock: Mutex<()>,
}

impl FlagCounter {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        FlagCounter {
            store,
            write_lock: Mutex::new(()),
        }
    }

    pub async fn flag(&self, wallet: &str, reporter: &str) -> Result<u64, CounterError> {
        if wallet.is_empty() {
            return Err(CounterError::MissingField("wallet"));
        }
        if reporter.is_empty() {
            return Err(CounterError::MissingField("reporter"));
        }
        let _guard = self.write_lock.lock().await;
        let current = self.read_count(wallet).await?;
        let next = current
            .checked_add(1)
            .ok_or_else(|| CounterError::Overflow(wallet.to_string()))?;
        self.store
            .put(&counter_key(wallet), encode_count(next))
            .await;
        info!("Wallet {} flagged by {}, report count {}", wallet, reporter, next);
        Ok(next)
    }

    pub async fn count(&self, wallet: &str) -> Result<u64, CounterError> {
        if wallet.is_empty() {
            return Err(CounterError::MissingField("wallet"));
        }
        self.read_count(wallet).await
    }

    async fn read_count(&self, wallet: &str) -> Result<u64, CounterError> {
        match self.store.get(&counter_key(wallet)).await {
            Some(bytes) => decode_count(wallet, &bytes),
            None => {
                debug!("No report for wallet {}", wallet);
                Ok(0)
            }
        }
    }
}

fn counter_key(wallet: &str) -> String {
    format!("{}{}", COUNTER_KEY_PREFIX, wallet)
}

fn encode_count(count: u64) -> Vec<u8> {
    count.to_be_bytes().to_vec()
}

fn decode_count(wallet: &str, bytes: &[u8]) -> Result<u64, CounterError> {
    let bytes: [u8; COUNTER_WIDTH] =
        bytes
            .try_into()
            .map_err(|_| CounterError::CorruptValue {
                wallet: wallet.to_string(),
                len: bytes.len(),
                expected: COUNTER_WIDTH,
            })?;
    Ok(u64::from_be_bytes(bytes))
}
