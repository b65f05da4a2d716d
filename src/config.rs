//! Configuration Module
//!
//! This module defines all configuration structures for the inquiry service.
//! Configuration is loaded from TOML files and parsed using serde.

use serde::Deserialize;
use std::fs;
use std::str::FromStr;

/// Environment variable naming an alternative configuration file
pub const CONFIG_PATH_ENV: &str = "INQUIRY_CONFIG";
/// Configuration file used when `INQUIRY_CONFIG` is unset
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Main configuration structure
///
/// Contains all configuration sections for the service.
/// Loaded from a TOML file (e.g., config/default.toml).
///
/// # Example TOML
/// ```toml
/// [api]
/// host = "0.0.0.0"
/// port = 3000
///
/// [database]
/// url = "sqlite://txn_log.db"
/// max_connections = 10
///
/// [logging]
/// level = "info"
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration
///
/// # Fields
/// - `host`: IP address to bind to (e.g., "127.0.0.1" or "0.0.0.0")
/// - `port`: TCP port to listen on (e.g., 3000)
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
}

/// Transaction log connection pool configuration
///
/// # Fields
/// - `url`: Database connection URL (e.g., "sqlite://txn_log.db")
/// - `max_connections`: Upper bound on concurrently borrowed connections
/// - `min_connections`: Connections kept open while idle
/// - `acquire_timeout_ms`: How long a lookup waits for a free connection
/// - `idle_timeout_secs`: How long an unused connection stays open
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_acquire_timeout_ms")]
    pub acquire_timeout_ms: u64,
    #[serde(default = "default_idle_timeout_secs")]
    pub idle_timeout_secs: u64,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    2
}

fn default_acquire_timeout_ms() -> u64 {
    60_000
}

fn default_idle_timeout_secs() -> u64 {
    60
}

/// Log output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// One of "trace", "debug", "info", "warn", "error"
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl LoggingConfig {
    pub fn max_level(&self) -> anyhow::Result<tracing::Level> {
        tracing::Level::from_str(&self.level)
            .map_err(|_| anyhow::anyhow!("unknown log level {:?}", self.level))
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Arguments
    /// * `path` - Path to the TOML configuration file
    ///
    /// # Returns
    /// * `Ok(Config)` if the file was successfully loaded and parsed
    /// * `Err` if the file couldn't be read or the TOML is invalid
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> anyhow::Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.logging.max_level()?;
        Ok(config)
    }

    /// Load from `INQUIRY_CONFIG` (or the default path), then let `PORT` override the listen port
    pub fn from_env() -> anyhow::Result<Self> {
        let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        let mut config = Self::load(&path)?;

        if let Ok(port) = std::env::var("PORT") {
            config.api.port = port
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a port number, got {:?}", port))?;
        }

        Ok(config)
    }
}
