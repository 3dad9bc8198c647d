//! Configuration management for Ironroll.
//!
//! Configuration is layered: built-in defaults, an optional YAML file,
//! `IRONROLL__`-prefixed environment variables, then the bare `PORT`
//! variable many hosting platforms inject. Variables may also come from a
//! `.env` file, which never overrides the real environment.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;
use std::time::{Duration, Instant};

use crate::error::{IronrollError, Result};
use crate::ratelimit::LimitConfig;

/// Prefix for environment variable overrides, e.g. `IRONROLL__SERVER__HTTP_ADDR`.
const ENV_PREFIX: &str = "IRONROLL";
/// Separator between prefix and nested keys.
const ENV_SEPARATOR: &str = "__";

/// Main configuration for the Ironroll service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IronrollConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Rate limiting configuration
    #[serde(default)]
    pub rate_limiting: RateLimitingConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Server configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP API address
    #[serde(default = "default_http_addr")]
    pub http_addr: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_addr: default_http_addr(),
        }
    }
}

fn default_http_addr() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 8080))
}

/// Rate limiting configuration for the HTTP API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateLimitingConfig {
    /// Requests allowed per window
    #[serde(default = "default_limit")]
    pub limit: u64,

    /// Counting window in seconds
    #[serde(default = "default_window_secs")]
    pub window_secs: u64,

    /// Temporary block in seconds once the limit is exceeded
    #[serde(default = "default_block_secs")]
    pub block_secs: u64,
}

impl Default for RateLimitingConfig {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            window_secs: default_window_secs(),
            block_secs: default_block_secs(),
        }
    }
}

fn default_limit() -> u64 {
    30
}

fn default_window_secs() -> u64 {
    60
}

fn default_block_secs() -> u64 {
    300
}

impl RateLimitingConfig {
    /// Reject windows too long to be added to the clock.
    pub fn validate(&self) -> Result<()> {
        if Instant::now()
            .checked_add(Duration::from_secs(self.window_secs))
            .is_none()
        {
            return Err(IronrollError::Config(format!(
                "rate_limiting.window_secs {} is out of range",
                self.window_secs
            )));
        }
        Ok(())
    }

    /// Convert into the limiter's configuration.
    pub fn limit_config(&self) -> LimitConfig {
        LimitConfig {
            limit: self.limit,
            window: Duration::from_secs(self.window_secs),
            block_duration: Duration::from_secs(self.block_secs),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable, colorized text
    #[default]
    Pretty,
    /// One JSON object per line
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Output format
    #[serde(default)]
    pub format: LogFormat,

    /// Default level filter, overridden by `RUST_LOG`
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            level: default_level(),
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

impl IronrollConfig {
    /// Load configuration from an optional file plus the environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        }

        let mut config: IronrollConfig = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator(ENV_SEPARATOR)
                    .separator(ENV_SEPARATOR)
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        if let Ok(port) = std::env::var("PORT") {
            let port = port
                .trim()
                .parse::<u16>()
                .map_err(|e| IronrollError::Config(format!("invalid PORT {:?}: {}", port, e)))?;
            config.set_port(port);
        }

        config.rate_limiting.validate()?;
        Ok(config)
    }

    /// Export the variables in a dotenv file into the process environment.
    ///
    /// Variables already set are left alone. A missing file is not an error;
    /// returns whether a file was read.
    pub fn load_env_file<P: AsRef<Path>>(path: P) -> Result<bool> {
        match dotenvy::from_path(path.as_ref()) {
            Ok(()) => Ok(true),
            Err(e) if e.not_found() => Ok(false),
            Err(e) => Err(IronrollError::Config(format!(
                "Failed to read {}: {}",
                path.as_ref().display(),
                e
            ))),
        }
    }

    /// Load configuration from a YAML file path.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Parse configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: IronrollConfig = serde_yaml::from_str(yaml)
            .map_err(|e| IronrollError::Config(format!("Failed to parse config: {}", e)))?;
        config.rate_limiting.validate()?;
        Ok(config)
    }

    /// Replace the port of the HTTP address, keeping its host.
    pub fn set_port(&mut self, port: u16) {
        self.server.http_addr.set_port(port);
    }
}
