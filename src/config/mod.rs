//! # Robot Telemetry Configuration
//!
//! YAML-based configuration with environment-specific sections and environment
//! variable overrides.
//!
//! ## Architecture
//!
//! - **Single file**: `robot-telemetry.yaml` in the configuration directory
//! - **Environment Awareness**: a top-level `development`/`test`/`production` section is
//!   deep-merged over the base document
//! - **Overrides**: `ROBOT_TELEMETRY_*` variables win over file values
//! - **Explicit Validation**: invalid values fail loading instead of falling back
//!
//! ## Usage
//!
//! ```rust,no_run
//! use robot_telemetry::config::ConfigManager;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let manager = ConfigManager::load()?;
//!
//! let bind = &manager.config().web.bind_address;
//! let data_file = &manager.config().store.data_file;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod loader;

use axum::http::HeaderValue;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

pub use error::{ConfigResult, ConfigurationError};
pub use loader::ConfigManager;

/// Root configuration structure mirroring robot-telemetry.yaml
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TelemetryConfig {
    /// HTTP server settings
    pub web: WebConfig,

    /// Snapshot location
    pub store: StoreConfig,

    /// Log level and outputs
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct WebConfig {
    pub bind_address: String,
    pub request_timeout_ms: u64,
    pub cors: CorsConfig,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8000".to_string(),
            request_timeout_ms: 30000,
            cors: CorsConfig::default(),
        }
    }
}

impl WebConfig {
    pub fn socket_addr(&self) -> ConfigResult<SocketAddr> {
        self.bind_address.parse().map_err(|e| {
            ConfigurationError::invalid_value(
                "web.bind_address",
                self.bind_address.clone(),
                format!("not a socket address: {e}"),
            )
        })
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

/// Cross-origin policy
///
/// An `"*"` entry selects open mode: every origin, method and header is accepted.
/// With credentials allowed, open mode echoes the caller's origin instead of sending a
/// literal wildcard, since browsers reject `*` on credentialed requests.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
    pub allow_credentials: bool,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["*".to_string()],
            allow_credentials: true,
        }
    }
}

impl CorsConfig {
    pub fn is_open(&self) -> bool {
        self.allowed_origins.iter().any(|origin| origin == "*")
    }

    /// Explicit origins as header values; empty in open mode
    pub fn origin_header_values(&self) -> ConfigResult<Vec<HeaderValue>> {
        if self.is_open() {
            return Ok(Vec::new());
        }

        self.allowed_origins
            .iter()
            .map(|origin| {
                HeaderValue::from_str(origin).map_err(|e| {
                    ConfigurationError::invalid_value(
                        "web.cors.allowed_origins",
                        origin.clone(),
                        e.to_string(),
                    )
                })
            })
            .collect()
    }
}

/// Location of the persisted snapshot
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct StoreConfig {
    pub data_file: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("data/robot_status.json"),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `info` or `info,robot_telemetry=debug`
    pub level: String,
    /// Emit console logs as JSON lines
    pub json: bool,
    /// When set, JSON logs are also written to a file in this directory
    pub log_directory: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            log_directory: None,
        }
    }
}

impl TelemetryConfig {
    /// Validate cross-field constraints after loading
    pub fn validate(&self) -> ConfigResult<()> {
        self.web.socket_addr()?;

        if self.web.request_timeout_ms == 0 {
            return Err(ConfigurationError::invalid_value(
                "web.request_timeout_ms",
                "0",
                "request timeout must be greater than zero",
            ));
        }

        if self.web.cors.allowed_origins.is_empty() {
            return Err(ConfigurationError::invalid_value(
                "web.cors.allowed_origins",
                "[]",
                "list at least one origin, or \"*\" to allow all",
            ));
        }
        self.web.cors.origin_header_values()?;

        if self.store.data_file.as_os_str().is_empty() {
            return Err(ConfigurationError::invalid_value(
                "store.data_file",
                "",
                "data file path must not be empty",
            ));
        }

        if self.logging.level.trim().is_empty() {
            return Err(ConfigurationError::invalid_value(
                "logging.level",
                "",
                "log level must not be empty",
            ));
        }

        Ok(())
    }
}
