//! HTTP API handlers.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, rejection::QueryRejection, Query, State},
    Json,
};
use serde::Serialize;
use tracing::debug;

use super::echo_body::EchoBody;
use crate::config::{Config, DEFAULT_SERVICE_NAME};
use crate::error::ApiError;

/// Name used by the greeting when the caller supplies none.
pub const DEFAULT_GREETING_NAME: &str = "world";

/// Plain-text body of the health endpoint.
pub const HEALTH_BODY: &str = "OK";

/// Application state shared with handlers. Immutable after startup.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Name reported by the root endpoint.
    pub service_name: Arc<str>,
    /// Maximum accepted request body in bytes.
    pub body_limit: usize,
}

impl AppState {
    /// Create new app state with the default body limit.
    pub fn new(service_name: impl Into<Arc<str>>) -> Self {
        Self {
            service_name: service_name.into(),
            body_limit: Config::default().body_limit_bytes,
        }
    }

    /// Create app state from loaded configuration.
    pub fn from_config(config: &Config) -> Self {
        Self {
            service_name: Arc::from(config.service_name.as_str()),
            body_limit: config.body_limit_bytes,
        }
    }

    /// Override the body limit.
    pub fn with_body_limit(mut self, body_limit: usize) -> Self {
        self.body_limit = body_limit;
        self
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(DEFAULT_SERVICE_NAME)
    }
}

/// Root endpoint response.
#[derive(Debug, Serialize)]
pub struct ServiceResponse {
    /// Always `true`.
    pub ok: bool,
    /// Service name.
    pub service: Arc<str>,
}

/// Greeting response.
#[derive(Debug, Serialize)]
pub struct HelloResponse {
    /// `Hello, <name>!`
    pub message: String,
}

/// Echo response.
#[derive(Debug, Serialize)]
pub struct EchoResponse {
    /// The request body as JSON, or `null`.
    pub echo: EchoBody,
}

/// Root handler - reports the service name.
pub async fn index(State(state): State<AppState>) -> Json<ServiceResponse> {
    Json(ServiceResponse {
        ok: true,
        service: state.service_name,
    })
}

/// Health check handler - always returns 200 with a plain-text body.
pub async fn health() -> &'static str {
    HEALTH_BODY
}

/// Greeting handler.
///
/// Query decoding never fails the request: an undecodable query is treated
/// as absent. Repeated `name` parameters are joined with `,`.
pub async fn hello(
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Json<HelloResponse> {
    let params = match query {
        Ok(Query(params)) => params,
        Err(rejection) => {
            debug!("ignoring undecodable query: {}", rejection);
            Vec::new()
        }
    };

    let name = greeting_name(&params);
    Json(HelloResponse {
        message: format!("Hello, {name}!"),
    })
}

/// Echo handler - returns the body as parsed JSON.
///
/// Missing or unparseable bodies echo `null`; failing to read the body at
/// all is a fault.
pub async fn echo(body: Result<Bytes, BytesRejection>) -> Result<Json<EchoResponse>, ApiError> {
    let body = body?;
    Ok(Json(EchoResponse {
        echo: parse_echo_body(&body),
    }))
}

/// Name to greet from decoded query pairs.
pub fn greeting_name(params: &[(String, String)]) -> String {
    let names: Vec<&str> = params
        .iter()
        .filter(|(key, _)| key == "name")
        .map(|(_, value)| value.as_str())
        .collect();

    if names.is_empty() {
        DEFAULT_GREETING_NAME.to_string()
    } else {
        names.join(",")
    }
}

/// Interpret a raw request body as a JSON value of any depth.
pub fn parse_echo_body(body: &[u8]) -> EchoBody {
    if body.iter().all(u8::is_ascii_whitespace) {
        return EchoBody::null();
    }

    match EchoBody::parse(body) {
        Ok(parsed) => parsed,
        Err(e) => {
            debug!("echo body is not JSON: {}", e);
            EchoBody::null()
        }
    }
}
