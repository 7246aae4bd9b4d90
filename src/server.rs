//! Binding and serving the router.

use axum::Router;
use tokio::net::TcpListener;
use tracing::info;

use crate::api::{create_router, AppState};
use crate::config::Config;
use crate::error::Result;
use crate::metrics;
use crate::utils::shutdown_signal;

/// Serve `router` on an already bound listener until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, router: Router, shutdown: F) -> Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}

/// Bind the configured address and serve until Ctrl-C / SIGTERM.
pub async fn run(config: &Config) -> Result<()> {
    if let Some(addr) = config.metrics_addr() {
        metrics::install_exporter(addr)?;
    }

    let router = create_router(AppState::from_config(config));

    let addr = config.bind_addr();
    let listener = TcpListener::bind(addr).await?;
    info!("HTTP server listening on {}", listener.local_addr()?);

    serve(listener, router, shutdown_signal()).await?;

    info!("HTTP server stopped");
    Ok(())
}
