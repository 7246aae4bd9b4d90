//! Minimal demo HTTP service for exercising a DevSecOps CI pipeline.
//!
//! The service answers four routes and one fixed error shape:
//!
//! ```text
//! GET  /            {"ok":true,"service":"devsecops-node-demo"}
//! GET  /health      OK
//! GET  /api/hello   {"message":"Hello, <name>!"}
//! POST /api/echo    {"echo":<body-or-null>}
//! any fault         500 {"ok":false,"error":"internal_error"}
//! ```
//!
//! The router is built separately from the listener so tests can drive it
//! in-process.
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Process errors and the fixed request-fault response
//! - [`api`]: Route table and handlers
//! - [`metrics`]: Request counters and latency histograms
//! - [`server`]: Binding and serving
//! - [`utils`]: Shutdown signal handling

pub mod api;
pub mod config;
pub mod error;
pub mod metrics;
pub mod server;
pub mod utils;

pub use config::Config;
pub use error::{ApiError, Result, ServiceError};
