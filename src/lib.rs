#![allow(clippy::doc_markdown)] // Allow technical terms like JSON, CORS in docs
#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Robot Telemetry API
//!
//! Read-only HTTP API exposing a single robot's most recent telemetry snapshot.
//!
//! ## Overview
//!
//! An external writer persists one JSON status record (position, battery, temperature,
//! rotation). This crate reads that record fresh on every request and serves it over
//! HTTP, either as a fully validated [`RobotStatus`] or as single-field projections.
//!
//! ## Architecture
//!
//! - [`store`] - Status Store: loads the raw snapshot as an untyped JSON object
//! - [`validation`] - strict schema decoder for the full status record
//! - [`services`] - Status Service: full-status validation and tolerant projections
//! - [`web`] - axum routes, handlers, middleware and HTTP error mapping
//! - [`config`] - YAML configuration with environment overrides
//! - [`logging`] - structured `tracing` setup
//! - [`bootstrap`] - wires config, store, service and router into a running server
//!
//! ## Endpoints
//!
//! | Path | Response |
//! |---|---|
//! | `/` | redirect to `/status` |
//! | `/status` | full status record |
//! | `/position` | `{x, y}` |
//! | `/battery` | `{battery_percentage}` |
//! | `/temperature` | `{temperature}` |
//! | `/rotation` | `{rotation}` |
//! | `/health` | liveness probe |
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use robot_telemetry::bootstrap::TelemetryServer;
//! use robot_telemetry::config::TelemetryConfig;
//!
//! # async fn example() -> robot_telemetry::Result<()> {
//! let config = TelemetryConfig::default();
//! let server = TelemetryServer::bind(&config).await?;
//! server.run_until(async { let _ = tokio::signal::ctrl_c().await; }).await?;
//! # Ok(())
//! # }
//! ```

pub mod bootstrap;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod services;
pub mod store;
pub mod validation;
pub mod web;

pub use config::{
    ConfigManager, ConfigurationError, CorsConfig, LoggingConfig, StoreConfig, TelemetryConfig,
    WebConfig,
};
pub use error::{Result, TelemetryError};
pub use models::{
    BatteryReading, Position, PositionReading, RobotStatus, RotationReading, TemperatureReading,
    Timestamp,
};
pub use services::{StatusError, StatusService};
pub use store::{FileStatusStore, StatusStore, StoreError};
pub use validation::FieldError;
