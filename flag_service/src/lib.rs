pub mod counter;
pub mod server_builder;
pub mod server_config;
pub mod webservice;
use lazy_static::lazy_static;
use std::env;

lazy_static! {
    pub static ref FLAG_SERVICE_ENDPOINT: String =
        env::var("FLAG_SERVICE_ENDPOINT").unwrap_or(String::from("0.0.0.0:8080"));
}
