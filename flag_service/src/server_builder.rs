use crate::server_config::AccessControl;
use crate::webservice::{FlagParam, FlagWebService};
use anyhow::{anyhow, Error};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use warp::http::HeaderMap;
use warp::{http::StatusCode, Filter, Rejection, Reply};

pub const MAX_JSON_BODY_SIZE: u64 = 1024 * 1024;

#[derive(Default)]
pub struct FlagServerBuilder {
    entry_point: String,
    access_control: AccessControl,
}

pub struct FlagServer {
    entry_point: String,
    access_control: AccessControl,
    pub web_service: Arc<FlagWebService>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SimpleResponse {
    success: bool,
}

impl FlagServer {
    pub fn builder() -> FlagServerBuilder {
        FlagServerBuilder::default()
    }

    pub fn entry_point(&self) -> &str {
        &self.entry_point
    }

    pub fn routes(&self) -> impl Filter<Extract = impl Reply, Error = Infallible> + Clone {
        let allow_headers = self.access_control.get_access_control_allow_headers();
        let allow_methods = self.access_control.get_access_control_allow_methods();
        debug!(
            "allow_headers: {:?}, allow_methods: {:?}",
            allow_headers, allow_methods
        );
        let cors = warp::cors()
            .allow_any_origin()
            .allow_headers(allow_headers.iter().map(String::as_str))
            .allow_methods(allow_methods.iter().map(String::as_str))
            .build();
        Self::create_ping()
            .with(cors.clone())
            .or(Self::create_route_flag(self.web_service.clone()).with(cors.clone()))
            .or(Self::create_route_count(self.web_service.clone()).with(cors))
            .recover(handle_rejection)
    }

    /// Binds the entry point and serves until the process stops. Bad addresses and bind
    /// failures come back as errors.
    pub async fn serve(&self) -> Result<(), Error> {
        let socket_addr: SocketAddr = self.entry_point.parse().map_err(|err| {
            anyhow!("invalid flag service address `{}`: {}", self.entry_point, err)
        })?;
        let (bound_addr, server) = warp::serve(self.routes())
            .try_bind_ephemeral(socket_addr)
            .map_err(|err| anyhow!("cannot bind flag service on {}: {}", socket_addr, err))?;
        info!("Flag service listening on {}", bound_addr);
        server.await;
        Ok(())
    }

    /// Ping API
    fn create_ping() -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
        warp::path!("ping")
            .and(warp::get())
            .and_then(move || async move {
                debug!("Receive ping request");
                Self::simple_response(true).await
            })
    }

    pub(crate) async fn simple_response(success: bool) -> Result<impl Reply, Rejection> {
        let res = SimpleResponse { success };
        Ok(warp::reply::json(&res))
    }

    /// Record one report against a wallet
    fn create_route_flag(
        service: Arc<FlagWebService>,
    ) -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
        warp::path!("flag")
            .and(FlagServer::log_headers())
            .and(warp::post())
            .and(warp::body::content_length_limit(MAX_JSON_BODY_SIZE).and(warp::body::json()))
            .and_then(move |param: FlagParam| {
                info!("#### Received flag request {:?} ####", &param);
                let clone_service = service.clone();
                async move { clone_service.flag_wallet(param).await }
            })
    }

    /// Read the report count of a wallet
    fn create_route_count(
        service: Arc<FlagWebService>,
    ) -> impl Filter<Extract = impl Reply, Error = Rejection> + Clone {
        warp::path!("count")
            .and(FlagServer::log_headers())
            .and(warp::get())
            .and(warp::query::<HashMap<String, String>>())
            .and_then(move |params: HashMap<String, String>| {
                debug!("#### Received count request {:?} ####", &params);
                let clone_service = service.clone();
                async move { clone_service.get_count(params).await }
            })
    }

    fn log_headers() -> impl Filter<Extract = (), Error = Infallible> + Copy {
        warp::header::headers_cloned()
            .map(|headers: HeaderMap| {
                for (k, v) in headers.iter() {
                    debug!("{}: {}", k, v.to_str().unwrap_or("<non visible>"));
                }
            })
            .untuple_one()
    }
}

impl FlagServerBuilder {
    pub fn with_entry_point(mut self, entry_point: &str) -> Self {
        self.entry_point = String::from(entry_point);
        self
    }
    pub fn with_access_control(mut self, access_control: AccessControl) -> Self {
        self.access_control = access_control;
        self
    }
    pub fn build(&self, service: FlagWebService) -> FlagServer {
        FlagServer {
            entry_point: self.entry_point.clone(),
            access_control: self.access_control.clone(),
            web_service: Arc::new(service),
        }
    }
}

async fn handle_rejection(err: Rejection) -> std::result::Result<impl Reply, Infallible> {
    let (code, message) = if err.is_not_found() {
        (StatusCode::NOT_FOUND, "Not Found".to_string())
    } else if err.find::<warp::body::BodyDeserializeError>().is_some()
        || err.find::<warp::reject::InvalidQuery>().is_some()
    {
        (StatusCode::BAD_REQUEST, "Invalid request".to_string())
    } else if err.find::<warp::reject::PayloadTooLarge>().is_some() {
        (StatusCode::BAD_REQUEST, "Payload too large".to_string())
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        (
            StatusCode::METHOD_NOT_ALLOWED,
            "Method Not Allowed".to_string(),
        )
    } else {
        log::error!("unhandled rejection: {:?}", err);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal Server Error".to_string(),
        )
    };

    Ok(warp::reply::with_status(message, code))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::counter::{FlagCounter, MemoryStore};
    use serde_json::{json, Value};

    fn server_on(entry_point: &str) -> FlagServer {
        let counter = FlagCounter::new(Arc::new(MemoryStore::default()));
        FlagServer::builder()
            .with_entry_point(entry_point)
            .build(FlagWebService::new(counter))
    }

    fn test_server() -> FlagServer {
        server_on("127.0.0.1:0")
    }

    #[tokio::test]
    async fn test_serve_returns_startup_errors() {
        let err = server_on("not-an-addr").serve().await.unwrap_err();
        assert!(err
            .to_string()
            .starts_with("invalid flag service address `not-an-addr`"));

        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let taken = listener.local_addr().unwrap().to_string();
        let err = server_on(&taken).serve().await.unwrap_err();
        assert!(err
            .to_string()
            .starts_with(&format!("cannot bind flag service on {}", taken)));
    }

    #[tokio::test]
    async fn test_ping() {
        let routes = test_server().routes();
        let res = warp::test::request()
            .method("GET")
            .path("/ping")
            .reply(&routes)
            .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = serde_json::from_slice(res.body()).unwrap();
        assert_eq!(body, json!({"success": true}));
    }

    #[tokio::test]
    async fn test_flag_then_count() {
        let routes = test_server().routes();
        for reporter in ["reporter1", "reporter2", "reporter3"] {
            let res = warp::test::request()
                .method("POST")
                .path("/flag")
                .json(&json!({"wallet": "0xabc123", "reporter": reporter}))
                .reply(&routes)
                .await;
            assert_eq!(res.status(), StatusCode::OK);
            assert_eq!(res.body(), "Wallet flagged successfully");
        }
        let res = warp::test::request()
            .method("GET")
            .path("/count?wallet=0xabc123")
            .reply(&routes)
            .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = serde_json::from_slice(res.body()).unwrap();
        assert_eq!(body, json!({"wallet": "0xabc123", "report_count": 3}));

        let res = warp::test::request()
            .method("GET")
            .path("/count?wallet=0xunknown")
            .reply(&routes)
            .await;
        let body: Value = serde_json::from_slice(res.body()).unwrap();
        assert_eq!(body, json!({"wallet": "0xunknown", "report_count": 0}));
    }

    #[tokio::test]
    async fn test_flag_rejects_bad_bodies() {
        let routes = test_server().routes();
        let res = warp::test::request()
            .method("POST")
            .path("/flag")
            .header("content-type", "application/json")
            .body("not json")
            .reply(&routes)
            .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(res.body(), "Invalid request");

        let res = warp::test::request()
            .method("POST")
            .path("/flag")
            .json(&json!({"wallet": "0xabc123"}))
            .reply(&routes)
            .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(res.body(), "Wallet and Reporter are required");

        let res = warp::test::request()
            .method("POST")
            .path("/flag")
            .json(&json!({"wallet": "", "reporter": "reporter1"}))
            .reply(&routes)
            .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_count_requires_wallet_and_get() {
        let routes = test_server().routes();
        let res = warp::test::request()
            .method("GET")
            .path("/count?wallet=")
            .reply(&routes)
            .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(res.body(), "Wallet address required");

        let res = warp::test::request()
            .method("POST")
            .path("/count?wallet=0xabc123")
            .reply(&routes)
            .await;
        assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);

        let res = warp::test::request()
            .method("GET")
            .path("/unknown")
            .reply(&routes)
            .await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }
}
