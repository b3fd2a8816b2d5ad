//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure that can be
//! populated from environment variables (optionally via a `.env` file) or
//! defaults.

use super::transport::TransportConfig;
use crate::domains::sim::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_MS};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// External API credentials configuration.
    pub credentials: CredentialsConfig,

    /// Sim API connection settings.
    pub sim: SimConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,

    /// Whether to include timestamps in log output.
    pub with_timestamps: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            with_timestamps: true,
        }
    }
}

impl LoggingConfig {
    /// Read `MCP_LOG_LEVEL` and `MCP_LOG_TIMESTAMPS`.
    ///
    /// Loaded on its own so logging can be set up before the rest of the
    /// configuration reports anything.
    pub fn from_env() -> Self {
        let mut logging = Self::default();

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            logging.level = level;
        }

        if let Ok(timestamps) = std::env::var("MCP_LOG_TIMESTAMPS") {
            logging.with_timestamps = timestamps.to_lowercase() != "false" && timestamps != "0";
        }

        logging
    }
}

/// Configuration for external API credentials.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct CredentialsConfig {
    /// Sim API key, sent as `X-Sim-Api-Key`.
    /// Get a key at: https://sim.dune.com
    pub sim_api_key: Option<String>,
}

/// Custom Debug implementation to redact secrets from logs.
impl std::fmt::Debug for CredentialsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsConfig")
            .field(
                "sim_api_key",
                &self.sim_api_key.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

/// Sim API connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    /// API origin, without a trailing path.
    pub base_url: String,

    /// Time budget for each remote call, in milliseconds.
    pub timeout_ms: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "sim-api-mcp-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig::default(),
            transport: TransportConfig::default(),
            credentials: CredentialsConfig::default(),
            sim: SimConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Server settings use the `MCP_` prefix (`MCP_SERVER_NAME`,
    /// `MCP_LOG_LEVEL`, ...). The API key is read from `SIM_API_KEY`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        config.logging = LoggingConfig::from_env();

        // Load transport configuration from environment
        config.transport = TransportConfig::from_env();

        match std::env::var("SIM_API_KEY") {
            Ok(api_key) if !api_key.trim().is_empty() => {
                config.credentials.sim_api_key = Some(api_key.trim().to_string());
                info!("Sim API key loaded from environment");
            }
            _ => {
                warn!(
                    "SIM_API_KEY not set - every tool call will return a configuration error \
                     until a key is provided"
                );
            }
        }

        if let Ok(base_url) = std::env::var("MCP_SIM_BASE_URL") {
            config.sim.base_url = base_url;
            info!("Sim API base URL overridden: {}", config.sim.base_url);
        }

        if let Ok(timeout) = std::env::var("MCP_SIM_TIMEOUT_MS") {
            match timeout.parse() {
                Ok(ms) => config.sim.timeout_ms = ms,
                Err(_) => warn!(
                    "Ignoring invalid MCP_SIM_TIMEOUT_MS={:?}, using {}ms",
                    timeout, config.sim.timeout_ms
                ),
            }
        }

        config
    }
}
