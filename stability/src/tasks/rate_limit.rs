use crate::models::BurstOutcome;
use crate::tasks::BlockHeightExecutor;
use crate::BURST_SIZE;
use common::task_spawn::{join_error_message, spawn_allow_panic};
use common::Endpoint;
use futures::future::join_all;
use log::{debug, info, warn};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/*
 * Fires BURST_SIZE height queries at once against a single endpoint. The calls must overlap in
 * time to look like a burst to the remote rate limiter, so they are spawned, not looped.
 */
#[derive(Clone)]
pub struct RateLimitExecutor {
    block_height: BlockHeightExecutor,
}

impl RateLimitExecutor {
    pub fn new(block_height: BlockHeightExecutor) -> Self {
        RateLimitExecutor { block_height }
    }

    pub async fn test_rate_limit(&self, endpoint: &Endpoint) -> BurstOutcome {
        info!("  Testing rate limits on {}...", endpoint.name);
        // Local to this burst, never shared across endpoints.
        let successes = Arc::new(AtomicUsize::new(0));
        let handles = (0..BURST_SIZE)
            .map(|_| {
                let executor = self.block_height.clone();
                let endpoint = endpoint.clone();
                let successes = successes.clone();
                spawn_allow_panic(async move {
                    match executor.call_block_height(&endpoint).await {
                        Ok(_) => {
                            successes.fetch_add(1, Ordering::SeqCst);
                        }
                        Err(err) => debug!("Burst call to {} failed: {}", endpoint.name, err),
                    }
                })
            })
            .collect::<Vec<_>>();
        for res in join_all(handles).await {
            if let Err(err) = res {
                warn!(
                    "Burst call to {} did not finish: {}",
                    endpoint.name,
                    join_error_message(err)
                );
            }
        }
        let outcome = BurstOutcome::new(successes.load(Ordering::SeqCst));
        info!(
            "  Rate limit test on {}: {}/{} requests succeeded",
            endpoint.name, outcome.successes, outcome.size
        );
        outcome
    }
}
