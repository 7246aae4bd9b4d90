//! HTTP API module: root, health, greeting and echo endpoints.

pub mod echo_body;
pub mod handlers;
pub mod routes;

pub use handlers::AppState;
pub use routes::create_router;
