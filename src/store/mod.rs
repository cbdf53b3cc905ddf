//! # Status Store
//!
//! Retrieves the latest raw telemetry snapshot as an untyped JSON object.
//!
//! The snapshot is written by an external producer; the store never caches or mutates
//! it. Every call to [`StatusStore::read`] loads the current on-disk value fresh, so a
//! read racing a concurrent write may observe a truncated file and surface
//! [`StoreError::Parse`]. Callers are expected to retry.

use async_trait::async_trait;
use serde_json::{Map, Value};
use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, warn};

use crate::logging::log_snapshot_operation;
use crate::validation::json_type;

/// Errors raised while loading the persisted snapshot
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Robot data not found at {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Robot data at {} is not a well-formed record: {reason}", path.display())]
    Parse { path: PathBuf, reason: String },

    #[error("Failed to read robot data at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Source of the most recent raw snapshot
#[async_trait]
pub trait StatusStore: Send + Sync + fmt::Debug {
    async fn read(&self) -> Result<Map<String, Value>, StoreError>;
}

/// Snapshot stored as a single JSON document on the local filesystem
#[derive(Debug, Clone)]
pub struct FileStatusStore {
    path: PathBuf,
}

impl FileStatusStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl StatusStore for FileStatusStore {
    async fn read(&self) -> Result<Map<String, Value>, StoreError> {
        let started = Instant::now();

        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "Robot data file does not exist");
                return Err(StoreError::NotFound {
                    path: self.path.clone(),
                });
            }
            Err(source) => {
                warn!(
                    path = %self.path.display(),
                    error = %source,
                    "Failed to read robot data file"
                );
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        let record = parse_snapshot(&bytes).map_err(|reason| {
            warn!(
                path = %self.path.display(),
                %reason,
                "Robot data file is not a well-formed record"
            );
            StoreError::Parse {
                path: self.path.clone(),
                reason,
            }
        })?;

        log_snapshot_operation(
            "read",
            &self.path,
            "ok",
            Some(started.elapsed().as_micros() as u64),
            Some(bytes.len()),
        );

        Ok(record)
    }
}

/// Parse raw bytes into a JSON object
///
/// Empty input is a parse failure, which is what a reader sees mid-write.
fn parse_snapshot(bytes: &[u8]) -> Result<Map<String, Value>, String> {
    match serde_json::from_slice::<Value>(bytes) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(format!(
            "top-level value must be an object, got {}",
            json_type(&other)
        )),
        Err(e) => Err(e.to_string()),
    }
}
