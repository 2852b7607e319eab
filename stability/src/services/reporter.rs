use crate::models::ProbeResult;
use crate::services::summary::Summary;
use chrono::{DateTime, Local};
use serde::Serialize;
use std::fmt;

const IMPLEMENTATION_TIPS: [&str; 5] = [
    "Use the fastest endpoint for your primary RPC",
    "Implement fallback to secondary endpoints",
    "Add retry logic with exponential backoff",
    "Monitor endpoint health in production",
    "Cache responses when possible to reduce RPC calls",
];

/*
 * Read-only projection of a finished run. Rendering never probes or changes anything.
 */
#[derive(Serialize, Debug)]
pub struct StabilityReport<'a> {
    pub generated_at: DateTime<Local>,
    pub results: &'a [ProbeResult],
    pub summary: &'a Summary,
}

impl<'a> StabilityReport<'a> {
    pub fn new(results: &'a [ProbeResult], summary: &'a Summary) -> Self {
        StabilityReport::with_generated_at(results, summary, Local::now())
    }

    pub fn with_generated_at(
        results: &'a [ProbeResult],
        summary: &'a Summary,
        generated_at: DateTime<Local>,
    ) -> Self {
        StabilityReport {
            generated_at,
            results,
            summary,
        }
    }

    pub fn render_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn render_text(&self) -> String {
        self.to_string()
    }

    pub fn status_line(result: &ProbeResult) -> String {
        format!(
            "{:<12} | {:<7} | {:>5}ms | Rate: {} ({}/{}) | Errors: {} | Block: {}",
            result.endpoint_name,
            if result.online { "Online" } else { "Offline" },
            result.response_time_ms(),
            pass_fail(result.rate_limit_ok),
            result.rate_limit.successes,
            result.rate_limit.size,
            pass_fail(result.error_handling_ok),
            result.block_height
        )
    }

    fn fmt_results(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "RPC Stability Test Results ({})",
            self.generated_at.format("%Y-%m-%d %H:%M:%S")
        )?;
        writeln!(f, "==============================")?;
        for result in self.results.iter() {
            writeln!(f, "{}", Self::status_line(result))?;
            if let (false, Some(last_error)) = (result.online, result.last_error.as_ref()) {
                writeln!(f, "             Error: {}", last_error)?;
            }
        }
        Ok(())
    }

    fn fmt_summary(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let summary = self.summary;
        writeln!(
            f,
            "\nSummary: {}/{} endpoints online ({:.1}%)",
            summary.online_count,
            summary.total,
            summary.online_percent()
        )?;
        match (&summary.fastest_online, &summary.slowest_online) {
            (Some(fastest), Some(slowest)) => {
                writeln!(
                    f,
                    "Fastest: {} ({}ms)",
                    fastest.endpoint_name,
                    fastest.response_time_ms()
                )?;
                writeln!(
                    f,
                    "Slowest: {} ({}ms)",
                    slowest.endpoint_name,
                    slowest.response_time_ms()
                )
            }
            _ => writeln!(f, "No endpoint online"),
        }
    }

    fn fmt_recommendations(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\nRecommendations")?;
        writeln!(f, "==================")?;
        for (network_class, best) in self.summary.best_per_network_class.iter() {
            writeln!(
                f,
                "Best {} RPC: {} ({}ms response time)",
                network_class,
                best.endpoint_name,
                best.response_time_ms()
            )?;
            writeln!(f, "   URL: {}", best.address)?;
        }
        writeln!(f, "\nImplementation Tips:")?;
        for tip in IMPLEMENTATION_TIPS.iter() {
            writeln!(f, "- {}", tip)?;
        }
        Ok(())
    }
}

impl fmt::Display for StabilityReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_results(f)?;
        self.fmt_summary(f)?;
        self.fmt_recommendations(f)
    }
}

fn pass_fail(ok: bool) -> &'static str {
    if ok {
        "PASS"
    } else {
        "FAIL"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BurstOutcome;
    use crate::services::summary::summarize;
    use chrono::TimeZone;
    use common::{Endpoint, NetworkClass};
    use std::time::Duration;

    fn results() -> Vec<ProbeResult> {
        vec![
            ProbeResult::online(
                &Endpoint::new("TestNet-1", "https://testnet1.neo.coz.io:443", NetworkClass::Test),
                Duration::from_millis(42),
                100,
                BurstOutcome::new(18),
                true,
            ),
            ProbeResult::offline(
                &Endpoint::new("MainNet-1", "https://mainnet1.neo.coz.io:443", NetworkClass::Main),
                "send error: request timed out after 10000ms".to_string(),
            ),
        ]
    }

    #[test]
    fn test_render_text() {
        let results = results();
        let summary = summarize(&results);
        let generated_at = Local.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap();
        let report = StabilityReport::with_generated_at(&results, &summary, generated_at);
        let text = report.render_text();
        assert_eq!(format!("{}", report), text);
        assert!(text.ends_with("- Cache responses when possible to reduce RPC calls\n"));

        assert!(text.starts_with("RPC Stability Test Results (2024-05-01 12:30:00)\n"));
        assert!(text.contains(
            "TestNet-1    | Online  |    42ms | Rate: PASS (18/20) | Errors: PASS | Block: 100\n"
        ));
        assert!(text.contains(
            "MainNet-1    | Offline |     0ms | Rate: FAIL (0/20) | Errors: FAIL | Block: 0\n"
        ));
        assert!(text.contains("             Error: send error: request timed out after 10000ms\n"));
        assert!(text.contains("Summary: 1/2 endpoints online (50.0%)"));
        assert!(text.contains("Fastest: TestNet-1 (42ms)"));
        assert!(text.contains("Slowest: TestNet-1 (42ms)"));
        assert!(text.contains("Best TestNet RPC: TestNet-1 (42ms response time)\n   URL: https://testnet1.neo.coz.io:443"));
        assert!(!text.contains("Best MainNet RPC"));
    }

    #[test]
    fn test_render_text_without_online_endpoint() {
        let results = vec![results().remove(1)];
        let summary = summarize(&results);
        let text = StabilityReport::new(&results, &summary).render_text();
        assert!(text.contains("Summary: 0/1 endpoints online (0.0%)"));
        assert!(text.contains("No endpoint online"));
        assert!(!text.contains("Best "));
    }

    #[test]
    fn test_render_json() {
        let results = results();
        let summary = summarize(&results);
        let json = StabilityReport::new(&results, &summary).render_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["results"].as_array().map(|r| r.len()), Some(2));
        assert_eq!(value["summary"]["online_count"], 1);
        assert_eq!(
            value["summary"]["best_per_network_class"]["test"]["endpoint_name"],
            "TestNet-1"
        );
        assert!(value["summary"]["best_per_network_class"].get("main").is_none());
    }
}
