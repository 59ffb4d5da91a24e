//! Configuration management for the graph actor service
//!
//! Sources are applied in order: defaults, a TOML file, `GA_*` environment
//! variables, then command line flags (see `main.rs`).

use crate::core::error::{Error, Result};
use crate::core::types::DEFAULT_BATCH_SIZE;
use crate::storage::StorageType;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;

/// Config file looked up in the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "graph-actor.toml";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,

    /// Graph and batching configuration
    pub graph: GraphConfig,

    /// Actor thread configuration
    pub actor: ActorConfig,

    /// Metrics and monitoring
    pub metrics: MetricsConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// HTTP server bind address
    pub http_addr: SocketAddr,

    /// Attach a permissive CORS layer to every route
    pub enable_cors: bool,
}

/// Graph configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Storage backend
    pub storage: StorageType,

    /// Page size used when a batch read does not specify one
    pub default_batch_size: usize,

    /// Upper bound applied to requested page sizes
    pub max_batch_size: usize,
}

/// Actor thread configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ActorConfig {
    /// Name given to the dedicated OS thread
    pub thread_name: String,
}

/// Metrics configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    /// Serve Prometheus metrics on `/metrics`
    pub enable_prometheus: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (json, pretty)
    pub format: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_addr: SocketAddr::from(([0, 0, 0, 0], 3200)),
            enable_cors: true,
        }
    }
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            storage: StorageType::Memory,
            default_batch_size: DEFAULT_BATCH_SIZE,
            max_batch_size: 10_000,
        }
    }
}

impl Default for ActorConfig {
    fn default() -> Self {
        Self {
            thread_name: "graph-actor".to_string(),
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enable_prometheus: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from the default config file and environment variables
    pub fn load() -> Result<Self> {
        let mut config = if Path::new(DEFAULT_CONFIG_FILE).exists() {
            Self::from_file(DEFAULT_CONFIG_FILE)?
        } else {
            Config::default()
        };

        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| Error::config(format!("Failed to read config file: {}", e)))?;

        Self::from_toml(&contents)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents)
            .map_err(|e| Error::config(format!("Failed to parse config file: {}", e)))
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any `GA_*` key lookup
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(addr) = lookup("GA_HTTP_ADDR") {
            self.server.http_addr = addr
                .parse()
                .map_err(|e| Error::config(format!("Invalid HTTP address: {}", e)))?;
        }

        if let Some(size) = lookup("GA_BATCH_SIZE") {
            self.graph.default_batch_size = size
                .parse()
                .map_err(|e| Error::config(format!("Invalid batch size: {}", e)))?;
        }

        if let Some(size) = lookup("GA_MAX_BATCH_SIZE") {
            self.graph.max_batch_size = size
                .parse()
                .map_err(|e| Error::config(format!("Invalid max batch size: {}", e)))?;
        }

        if let Some(storage) = lookup("GA_STORAGE") {
            self.graph.storage = storage.parse()?;
        }

        if let Some(level) = lookup("GA_LOG_LEVEL") {
            self.logging.level = level;
        }

        if let Some(format) = lookup("GA_LOG_FORMAT") {
            self.logging.format = format;
        }

        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.graph.default_batch_size == 0 {
            return Err(Error::config("Default batch size must be positive"));
        }

        if self.graph.default_batch_size > self.graph.max_batch_size {
            return Err(Error::config(
                "Default batch size exceeds the maximum batch size",
            ));
        }

        if self.actor.thread_name.is_empty() {
            return Err(Error::config("Actor thread name must not be empty"));
        }

        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => return Err(Error::config("Invalid log level")),
        }

        match self.logging.format.as_str() {
            "json" | "pretty" => {}
            _ => return Err(Error::config("Invalid log format")),
        }

        Ok(())
    }

    /// Clamp a requested page size into `1..=max_batch_size`
    pub fn clamp_batch_size(&self, requested: Option<usize>) -> usize {
        requested
            .unwrap_or(self.graph.default_batch_size)
            .clamp(1, self.graph.max_batch_size)
    }
}
