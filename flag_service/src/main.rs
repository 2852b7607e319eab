use anyhow::Error;
use common::logger::init_logger;
use flag_service::counter::{FlagCounter, MemoryStore};
use flag_service::server_builder::FlagServer;
use flag_service::server_config::AccessControl;
use flag_service::webservice::FlagWebService;
use flag_service::FLAG_SERVICE_ENDPOINT;
use log::info;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Load config file
    dotenv::dotenv().ok();
    let res = init_logger(&String::from("Flag-service"));
    println!("{}", res);
    info!("Build version: {}", env!("BUILD_VERSION"));

    let counter = FlagCounter::new(Arc::new(MemoryStore::default()));
    let server = FlagServer::builder()
        .with_entry_point(FLAG_SERVICE_ENDPOINT.as_str())
        .with_access_control(AccessControl::default())
        .build(FlagWebService::new(counter));
    info!("Mock flag service starting on {}", server.entry_point());
    server.serve().await
}
