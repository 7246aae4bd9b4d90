//! Application configuration loaded from environment variables.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use serde::{Deserialize, Deserializer};

/// Port used when `PORT` is unset or cannot be parsed.
pub const DEFAULT_PORT: u16 = 3000;

/// Service name reported by `GET /`.
pub const DEFAULT_SERVICE_NAME: &str = "devsecops-node-demo";

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human readable lines.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === Server Configuration ===
    /// HTTP listening port. Invalid values fall back to [`DEFAULT_PORT`].
    #[serde(default = "default_port", deserialize_with = "lenient_port")]
    pub port: u16,

    /// Bind address.
    #[serde(default = "default_host")]
    pub bind_host: IpAddr,

    /// Name reported by the root endpoint.
    #[serde(default = "default_service_name")]
    pub service_name: String,

    /// Maximum accepted request body in bytes.
    #[serde(default = "default_body_limit")]
    pub body_limit_bytes: usize,

    // === Observability ===
    /// Prometheus exporter port. Disabled when unset.
    #[serde(default)]
    pub metrics_port: Option<u16>,

    /// Log filter (trace, debug, info, warn, error or a full directive).
    #[serde(default = "default_log_level")]
    pub rust_log: String,

    /// Log output format.
    #[serde(default)]
    pub log_format: LogFormat,
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::UNSPECIFIED)
}

fn default_service_name() -> String {
    DEFAULT_SERVICE_NAME.to_string()
}

fn default_body_limit() -> usize {
    100 * 1024 // 100 KiB
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Accepts any string for `PORT`; anything that is not a valid `u16`
/// resolves to [`DEFAULT_PORT`] instead of failing startup.
fn lenient_port<'de, D>(deserializer: D) -> Result<u16, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(parse_port(&raw))
}

/// Parse a port value, falling back to [`DEFAULT_PORT`].
pub fn parse_port(raw: &str) -> u16 {
    raw.trim().parse().unwrap_or(DEFAULT_PORT)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: default_port(),
            bind_host: default_host(),
            service_name: default_service_name(),
            body_limit_bytes: default_body_limit(),
            metrics_port: None,
            rust_log: default_log_level(),
            log_format: LogFormat::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env()
    }

    /// Load configuration from an explicit set of variables.
    pub fn from_vars<I>(vars: I) -> Result<Self, envy::Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter(vars)
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> Result<(), String> {
        if self.service_name.trim().is_empty() {
            return Err("SERVICE_NAME must not be empty".to_string());
        }

        if self.body_limit_bytes == 0 {
            return Err("BODY_LIMIT_BYTES must be greater than 0".to_string());
        }

        if self.metrics_port == Some(self.port) {
            return Err("METRICS_PORT must differ from PORT".to_string());
        }

        Ok(())
    }

    /// Socket address the HTTP server binds to.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_host, self.port)
    }

    /// Socket address of the Prometheus exporter, if enabled.
    pub fn metrics_addr(&self) -> Option<SocketAddr> {
        self.metrics_port.map(|port| SocketAddr::new(self.bind_host, port))
    }
}
