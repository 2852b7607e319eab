use crate::{BURST_SIZE, BURST_SUCCESS_THRESHOLD};
use common::util::{duration_millis, serialize_millis};
use common::{BlockHeight, Endpoint, EndpointName, NetworkClass, UrlType};
use serde::Serialize;
use std::time::Duration;

/// Successful calls out of one rate-limit burst.
#[derive(Clone, Copy, Serialize, Debug, PartialEq, Eq, Default)]
pub struct BurstOutcome {
    pub successes: usize,
    pub size: usize,
}

impl BurstOutcome {
    pub fn new(successes: usize) -> Self {
        BurstOutcome {
            successes: successes.min(BURST_SIZE),
            size: BURST_SIZE,
        }
    }
    pub fn is_ok(&self) -> bool {
        self.successes >= BURST_SUCCESS_THRESHOLD
    }
}

/*
 * Outcome of one endpoint in one run. Built once by the task that probed the endpoint and only
 * read afterwards. The constructors are the only way the offline/online invariants are set up:
 * an offline endpoint has no height, no latency, failed secondary probes and a recorded error.
 */
#[derive(Clone, Serialize, Debug, PartialEq)]
pub struct ProbeResult {
    pub endpoint_name: EndpointName,
    pub address: UrlType,
    pub network_class: NetworkClass,
    pub online: bool,
    #[serde(rename = "response_time_ms", serialize_with = "serialize_millis")]
    pub response_time: Duration,
    pub block_height: BlockHeight,
    pub rate_limit_ok: bool,
    pub rate_limit: BurstOutcome,
    pub error_handling_ok: bool,
    pub last_error: Option<String>,
}

impl ProbeResult {
    pub fn offline(endpoint: &Endpoint, error: String) -> Self {
        let last_error = if error.is_empty() {
            "unknown error".to_string()
        } else {
            error
        };
        ProbeResult {
            endpoint_name: endpoint.name.clone(),
            address: endpoint.address.clone(),
            network_class: endpoint.network_class,
            online: false,
            response_time: Duration::ZERO,
            block_height: 0,
            rate_limit_ok: false,
            rate_limit: BurstOutcome::default(),
            error_handling_ok: false,
            last_error: Some(last_error),
        }
    }

    pub fn online(
        endpoint: &Endpoint,
        response_time: Duration,
        block_height: BlockHeight,
        rate_limit: BurstOutcome,
        error_handling_ok: bool,
    ) -> Self {
        ProbeResult {
            endpoint_name: endpoint.name.clone(),
            address: endpoint.address.clone(),
            network_class: endpoint.network_class,
            online: true,
            response_time,
            block_height,
            rate_limit_ok: rate_limit.is_ok(),
            rate_limit,
            error_handling_ok,
            last_error: None,
        }
    }

    pub fn response_time_ms(&self) -> u64 {
        duration_millis(&self.response_time)
    }
}
