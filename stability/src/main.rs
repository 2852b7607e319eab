use anyhow::Error;
use clap::Parser;
use common::logger::init_logger;
use common::tasks::RpcRequestExecutor;
use log::{debug, info};
use stability::registry::EndpointRegistry;
use stability::server_config::StabilityConfig;
use stability::services::{summarize, ProbeExecution, StabilityReport};
use stability::{RPC_TIMEOUT_MS, STABILITY_CONFIG};
use std::sync::Arc;
use std::time::Duration;

#[derive(Parser, Debug)]
#[clap(name = "stability", version = env!("BUILD_VERSION"), about = "JSON-RPC endpoint stability test suite")]
struct Cli {
    /// JSON file with the endpoint registry, timeout and method names
    #[clap(short, long)]
    config: Option<String>,

    /// Per-call timeout in milliseconds
    #[clap(short, long)]
    timeout_ms: Option<u64>,

    /// Print the report as JSON
    #[clap(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Load env file
    dotenv::dotenv().ok();
    // Init logger
    let res = init_logger(&String::from("Stability-test"));
    let cli = Cli::parse();
    info!("Start stability test suite, build {}", env!("BUILD_VERSION"));
    debug!("{}, cli: {:?}", res, cli);

    let config_path = cli.config.clone().or_else(|| STABILITY_CONFIG.clone());
    let timeout_ms = cli.timeout_ms.or(*RPC_TIMEOUT_MS);
    let config = StabilityConfig::resolve(config_path.as_deref(), timeout_ms)?;
    let registry = EndpointRegistry::from_config(&config)?;
    let transport = Arc::new(RpcRequestExecutor::new(Duration::from_millis(
        config.timeout_ms,
    ))?);
    info!(
        "Testing {} endpoints with {}ms timeout",
        registry.endpoints().len(),
        transport.timeout().as_millis()
    );
    let execution = ProbeExecution::new(transport, &config.methods);
    let results = execution.run(&registry).await;
    let summary = summarize(&results);
    let report = StabilityReport::new(&results, &summary);
    if cli.json {
        println!("{}", report.render_json()?);
    } else {
        println!("{}", report.render_text());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cli() {
        let cli = Cli::parse_from(&["stability", "--config", "nodes.json", "-t", "2500", "--json"]);
        assert_eq!(cli.config.as_deref(), Some("nodes.json"));
        assert_eq!(cli.timeout_ms, Some(2500));
        assert!(cli.json);

        let cli = Cli::parse_from(&["stability"]);
        assert!(cli.config.is_none() && cli.timeout_ms.is_none() && !cli.json);
    }
}
