//! HTTP API route definitions.

use std::any::Any;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

use super::handlers::{echo, health, hello, index, AppState};
use crate::error::ApiError;
use crate::metrics::track_requests;

/// Create the API router.
///
/// The router owns no socket; bind it with [`crate::server::serve`] or
/// drive it directly with `tower::ServiceExt::oneshot`.
pub fn create_router(state: AppState) -> Router {
    let body_limit = state.body_limit;
    with_fault_boundary(api_routes(), body_limit).with_state(state)
}

/// Route table without middleware or state.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/api/hello", get(hello))
        .route("/api/echo", post(echo))
}

/// Wrap `router` with metrics, body limit, tracing and the panic boundary.
///
/// A panic anywhere below the boundary becomes the fixed 500 response.
pub fn with_fault_boundary<S>(router: Router<S>, body_limit: usize) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router
        .route_layer(middleware::from_fn(track_requests))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(handle_panic))
}

fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown panic payload".to_string()
    };

    ApiError::Panic(detail).into_response()
}
