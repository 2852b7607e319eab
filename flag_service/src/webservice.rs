use crate::counter::{CounterError, FlagCounter};
use common::WalletAddress;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use warp::http::StatusCode;
use warp::reply::Response;
use warp::{Rejection, Reply};

#[derive(Debug, Default, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct FlagParam {
    pub wallet: WalletAddress,
    pub reporter: WalletAddress,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct CountResponse {
    pub wallet: WalletAddress,
    pub report_count: u64,
}

pub struct FlagWebService {
    counter: FlagCounter,
}

impl FlagWebService {
    pub fn new(counter: FlagCounter) -> Self {
        FlagWebService { counter }
    }

    pub async fn flag_wallet(&self, param: FlagParam) -> Result<Response, Rejection> {
        if param.wallet.is_empty() || param.reporter.is_empty() {
            return Ok(text_reply(
                "Wallet and Reporter are required",
                StatusCode::BAD_REQUEST,
            ));
        }
        match self.counter.flag(&param.wallet, &param.reporter).await {
            Ok(count) => {
                info!("Wallet {} now has {} reports", &param.wallet, count);
                Ok(text_reply("Wallet flagged successfully", StatusCode::OK))
            }
            Err(err) => {
                warn!("Cannot flag wallet {}: {}", &param.wallet, err);
                Ok(text_reply(&err.to_string(), error_status(&err)))
            }
        }
    }

    pub async fn get_count(&self, params: HashMap<String, String>) -> Result<Response, Rejection> {
        let wallet = match params.get("wallet") {
            Some(wallet) if !wallet.is_empty() => wallet.clone(),
            _ => {
                return Ok(text_reply(
                    "Wallet address required",
                    StatusCode::BAD_REQUEST,
                ))
            }
        };
        match self.counter.count(&wallet).await {
            Ok(report_count) => Ok(warp::reply::json(&CountResponse {
                wallet,
                report_count,
            })
            .into_response()),
            Err(err) => {
                warn!("Cannot read report count of wallet {}: {}", &wallet, err);
                Ok(text_reply(&err.to_string(), error_status(&err)))
            }
        }
    }
}

fn error_status(err: &CounterError) -> StatusCode {
    match err {
        CounterError::MissingField(_) => StatusCode::BAD_REQUEST,
        CounterError::Overflow(_) => StatusCode::CONFLICT,
        CounterError::CorruptValue { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn text_reply(message: &str, status: StatusCode) -> Response {
    warp::reply::with_status(message.to_string(), status).into_response()
}
