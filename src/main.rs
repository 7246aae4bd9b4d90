//! Demo HTTP service entry point.

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use devsecops_demo::config::{Config, LogFormat};
use devsecops_demo::{metrics, server, ServiceError};

/// Minimal demo HTTP service.
#[derive(Parser, Debug)]
#[command(name = "devsecops-demo")]
#[command(about = "Demo HTTP service with health, greeting and echo endpoints")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON.
    #[arg(long, global = true)]
    json: bool,

    /// HTTP port (overrides PORT).
    #[arg(short, long)]
    port: Option<u16>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve HTTP requests (default).
    Serve,

    /// Print the effective configuration and exit.
    CheckConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Load configuration
    let mut config = Config::load()?;
    if let Some(port) = args.port {
        config.port = port;
    }
    if args.json {
        config.log_format = LogFormat::Json;
    }

    init_logging(&config, args.verbose);

    config.validate().map_err(ServiceError::InvalidConfig)?;

    // Initialize metrics
    metrics::init_metrics();

    match args.command {
        Some(Command::CheckConfig) => cmd_check_config(&config),
        Some(Command::Serve) | None => cmd_serve(&config).await,
    }
}

fn init_logging(config: &Config, verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("devsecops_demo=debug,tower_http=debug,info")
    } else {
        EnvFilter::try_new(&config.rust_log).unwrap_or_else(|_| EnvFilter::new("info"))
    };

    let registry = tracing_subscriber::registry().with(filter);
    match config.log_format {
        LogFormat::Json => registry.with(fmt::layer().json()).init(),
        LogFormat::Text => registry.with(fmt::layer()).init(),
    }
}

/// Print the effective configuration.
fn cmd_check_config(config: &Config) -> anyhow::Result<()> {
    println!("======================================================================");
    println!("DEVSECOPS DEMO - CONFIGURATION CHECK");
    println!("======================================================================");
    println!("  Bind Address: {}", config.bind_addr());
    println!("  Service Name: {}", config.service_name);
    println!("  Body Limit:   {} bytes", config.body_limit_bytes);
    match config.metrics_addr() {
        Some(addr) => println!("  Metrics:      {}", addr),
        None => println!("  Metrics:      Disabled"),
    }
    println!("  Log Filter:   {}", config.rust_log);
    println!("  Log Format:   {:?}", config.log_format);
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");
    Ok(())
}

/// Serve until shutdown.
async fn cmd_serve(config: &Config) -> anyhow::Result<()> {
    info!("Starting {}", config.service_name);
    server::run(config).await?;
    Ok(())
}
