use crate::models::ProbeResult;
use crate::registry::EndpointRegistry;
use crate::server_config::RpcMethods;
use crate::tasks::{BlockHeightExecutor, ErrorHandlingExecutor, RateLimitExecutor};
use common::task_spawn::{join_error_message, spawn_allow_panic};
use common::tasks::RpcTransport;
use common::Endpoint;
use futures::future::join_all;
use log::{info, warn};
use std::sync::Arc;

/*
 * Runs the probe sequence (block height -> rate limit -> error handling) for every endpoint of
 * the registry, one task per endpoint. Each task owns the result it builds; the only join point
 * is the final wait for all of them.
 */
#[derive(Clone)]
pub struct ProbeExecution {
    block_height: BlockHeightExecutor,
    rate_limit: RateLimitExecutor,
    error_handling: ErrorHandlingExecutor,
}

impl ProbeExecution {
    pub fn new(transport: Arc<dyn RpcTransport>, methods: &RpcMethods) -> Self {
        let block_height = BlockHeightExecutor::new(transport.clone(), &methods.block_height);
        ProbeExecution {
            rate_limit: RateLimitExecutor::new(block_height.clone()),
            block_height,
            error_handling: ErrorHandlingExecutor::new(transport, methods),
        }
    }

    /// Probe sequence of a single endpoint. Stops at the first vital failure.
    pub async fn test_endpoint(&self, endpoint: &Endpoint) -> ProbeResult {
        info!("Testing {} ({})...", endpoint.name, endpoint.address);
        let height = match self.block_height.call_block_height(endpoint).await {
            Ok(height) => height,
            Err(err) => {
                warn!("{} - Offline: {}", endpoint.name, err);
                return ProbeResult::offline(endpoint, err.to_string());
            }
        };
        info!(
            "{} - Online ({}ms, Block: {})",
            endpoint.name,
            height.response_time.as_millis(),
            height.block_height
        );
        let rate_limit = self.rate_limit.test_rate_limit(endpoint).await;
        let error_handling_ok = self.error_handling.test_error_handling(endpoint).await;
        ProbeResult::online(
            endpoint,
            height.response_time,
            height.block_height,
            rate_limit,
            error_handling_ok,
        )
    }

    /// One result per endpoint, in registry order whatever the completion order was.
    pub async fn run(&self, registry: &EndpointRegistry) -> Vec<ProbeResult> {
        let handles = registry
            .endpoints()
            .iter()
            .map(|endpoint| {
                let execution = self.clone();
                let endpoint = endpoint.clone();
                spawn_allow_panic(async move { execution.test_endpoint(&endpoint).await })
            })
            .collect::<Vec<_>>();
        let joined = join_all(handles).await;
        registry
            .endpoints()
            .iter()
            .zip(joined)
            .map(|(endpoint, res)| match res {
                Ok(result) => result,
                Err(err) => {
                    let message = join_error_message(err);
                    warn!("Probe of {} aborted: {}", endpoint.name, message);
                    ProbeResult::offline(endpoint, message)
                }
            })
            .collect()
    }
}
