//! # Structured Logging Module
//!
//! Console logging (plain or JSON) with an optional JSON log file, configured from
//! [`LoggingConfig`]. `RUST_LOG`, when set, takes precedence over the configured level.

use chrono::Utc;
use std::fs;
use std::path::Path;
use std::process;
use std::sync::OnceLock;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config::LoggingConfig;
use crate::error::{Result, TelemetryError};

static LOGGER_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Initialize structured logging once per process
///
/// Later calls are no-ops. If another global subscriber is already installed the
/// existing one is kept.
pub fn init_structured_logging(config: &LoggingConfig) -> Result<()> {
    if LOGGER_INITIALIZED.get().is_some() {
        return Ok(());
    }

    let filter = build_filter(&config.level)?;

    let console_plain = (!config.json).then(|| {
        fmt::layer()
            .with_target(true)
            .with_thread_ids(true)
            .with_level(true)
            .with_ansi(true)
    });
    let console_json = config.json.then(|| {
        fmt::layer()
            .with_target(true)
            .with_thread_ids(true)
            .with_level(true)
            .json()
    });

    let mut log_file = None;
    let file_layer = match &config.log_directory {
        Some(log_dir) => {
            fs::create_dir_all(log_dir).map_err(|e| {
                TelemetryError::Logging(format!(
                    "failed to create log directory {}: {e}",
                    log_dir.display()
                ))
            })?;

            // robot-telemetry.<pid>.<timestamp>.log
            let log_filename = format!(
                "robot-telemetry.{}.{}.log",
                process::id(),
                Utc::now().format("%Y%m%d_%H%M%S")
            );
            let file_appender = tracing_appender::rolling::never(log_dir, &log_filename);
            let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

            // The guard flushes on drop; logging lives for the whole process.
            std::mem::forget(guard);
            log_file = Some(log_dir.join(log_filename));

            Some(
                fmt::layer()
                    .with_writer(file_writer)
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_level(true)
                    .with_ansi(false)
                    .json()
                    .boxed(),
            )
        }
        None => None,
    };

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(console_plain)
        .with(console_json)
        .with(file_layer);

    if subscriber.try_init().is_err() {
        tracing::debug!(
            "Global tracing subscriber already initialized - continuing with existing subscriber"
        );
    }

    let _ = LOGGER_INITIALIZED.set(());

    tracing::info!(
        pid = process::id(),
        level = %config.level,
        json = config.json,
        log_file = ?log_file,
        "Structured logging initialized"
    );

    Ok(())
}

fn build_filter(level: &str) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }

    EnvFilter::try_new(level)
        .map_err(|e| TelemetryError::Logging(format!("invalid log level '{level}': {e}")))
}

/// Log structured data for snapshot reads
pub fn log_snapshot_operation(
    operation: &str,
    path: &Path,
    status: &str,
    duration_us: Option<u64>,
    size_bytes: Option<usize>,
) {
    tracing::debug!(
        operation = %operation,
        path = %path.display(),
        status = %status,
        duration_us = duration_us,
        size_bytes = size_bytes,
        "SNAPSHOT_OPERATION"
    );
}
