//! # Crate-level Error Type
//!
//! Errors that escape the request path: configuration loading, logging setup and
//! server bootstrap. Snapshot and request-scoped failures are mapped to HTTP
//! responses in [`crate::web::errors`].

use thiserror::Error;

use crate::config::ConfigurationError;

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error("Logging initialization failed: {0}")]
    Logging(String),

    #[error("Server error: {0}")]
    Server(String),
}

impl TelemetryError {
    pub fn server(message: impl Into<String>) -> Self {
        Self::Server(message.into())
    }
}

impl From<std::io::Error> for TelemetryError {
    fn from(error: std::io::Error) -> Self {
        Self::Server(error.to_string())
    }
}

pub type Result<T> = std::result::Result<T, TelemetryError>;
