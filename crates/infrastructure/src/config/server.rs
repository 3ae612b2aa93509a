//! HTTP server configuration.

use serde::{Deserialize, Serialize};

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to
    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory served under `/assets`
    #[serde(default = "default_assets_dir")]
    pub assets_dir: String,

    /// Maximum request body size in bytes (default: 1MB)
    #[serde(default = "default_max_body")]
    pub max_body_bytes: usize,

    /// Graceful shutdown timeout in seconds
    #[serde(default)]
    pub shutdown_timeout_secs: Option<u64>,

    /// Log format: "json" for structured JSON logs, "text" for human-readable
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

const fn default_port() -> u16 {
    3000
}

fn default_assets_dir() -> String {
    "public".to_string()
}

const fn default_max_body() -> usize {
    1024 * 1024 // 1MB
}

fn default_log_format() -> String {
    "text".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            assets_dir: default_assets_dir(),
            max_body_bytes: default_max_body(),
            shutdown_timeout_secs: Some(30),
            log_format: default_log_format(),
        }
    }
}
