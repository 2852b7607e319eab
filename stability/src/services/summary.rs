use crate::models::ProbeResult;
use common::util::{duration_millis, serialize_millis};
use common::{EndpointName, NetworkClass, UrlType};
use serde::Serialize;
use std::collections::BTreeMap;
use std::time::Duration;

#[derive(Clone, Serialize, Debug, PartialEq)]
pub struct RankedEndpoint {
    pub endpoint_name: EndpointName,
    pub address: UrlType,
    pub network_class: NetworkClass,
    #[serde(rename = "response_time_ms", serialize_with = "serialize_millis")]
    pub response_time: Duration,
}

impl From<&ProbeResult> for RankedEndpoint {
    fn from(result: &ProbeResult) -> Self {
        RankedEndpoint {
            endpoint_name: result.endpoint_name.clone(),
            address: result.address.clone(),
            network_class: result.network_class,
            response_time: result.response_time,
        }
    }
}

impl RankedEndpoint {
    pub fn response_time_ms(&self) -> u64 {
        duration_millis(&self.response_time)
    }
}

/// Aggregate view of a run. Every ranking only looks at online endpoints.
#[derive(Clone, Serialize, Debug, PartialEq, Default)]
pub struct Summary {
    pub total: usize,
    pub online_count: usize,
    pub fastest_online: Option<RankedEndpoint>,
    pub slowest_online: Option<RankedEndpoint>,
    pub best_per_network_class: BTreeMap<NetworkClass, RankedEndpoint>,
}

impl Summary {
    pub fn online_percent(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.online_count as f64 / self.total as f64 * 100.0
        }
    }
}

/*
 * Ties keep the earliest entry in registry order, so rankings are stable between renders.
 */
pub fn summarize(results: &[ProbeResult]) -> Summary {
    let mut summary = Summary {
        total: results.len(),
        ..Default::default()
    };
    let mut fastest: Option<&ProbeResult> = None;
    let mut slowest: Option<&ProbeResult> = None;
    let mut best: BTreeMap<NetworkClass, &ProbeResult> = BTreeMap::new();

    for result in results.iter().filter(|result| result.online) {
        summary.online_count += 1;
        if fastest.map_or(true, |current| result.response_time < current.response_time) {
            fastest = Some(result);
        }
        if slowest.map_or(true, |current| result.response_time > current.response_time) {
            slowest = Some(result);
        }
        let class_best = best.entry(result.network_class).or_insert(result);
        if result.response_time < class_best.response_time {
            *class_best = result;
        }
    }

    summary.fastest_online = fastest.map(RankedEndpoint::from);
    summary.slowest_online = slowest.map(RankedEndpoint::from);
    summary.best_per_network_class = best
        .into_iter()
        .map(|(network_class, result)| (network_class, RankedEndpoint::from(result)))
        .collect();
    summary
}
