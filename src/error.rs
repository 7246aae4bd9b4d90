//! Unified error types for the demo service.

use axum::{
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::metrics;

/// Error code returned to clients for every server-side fault.
pub const INTERNAL_ERROR_CODE: &str = "internal_error";

/// Process-level error type.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Configuration loaded but failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Prometheus exporter could not be installed.
    #[error("metrics exporter error: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Faults raised while handling a request.
///
/// Every variant renders the same fixed 500 response; the detail only
/// reaches the logs.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The request body could not be read (too large, connection error).
    #[error("failed to read request body: {0}")]
    Body(#[from] BytesRejection),

    /// A handler panicked.
    #[error("handler panicked: {0}")]
    Panic(String),
}

/// Body of the fixed error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Always `false`.
    pub ok: bool,
    /// Always [`INTERNAL_ERROR_CODE`].
    pub error: &'static str,
}

impl ErrorResponse {
    /// The one error payload clients ever see.
    pub const fn internal() -> Self {
        Self {
            ok: false,
            error: INTERNAL_ERROR_CODE,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!(error = %self, "request failed");
        metrics::inc_http_faults();

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::internal()),
        )
            .into_response()
    }
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, ServiceError>;
