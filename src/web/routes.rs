//! Web API Routes
//!
//! Route definitions grouped by functionality. All routes are public and read-only.

use axum::{routing::get, Router};
use std::sync::Arc;

use crate::web::{handlers, state::TelemetryWebState};

/// Telemetry routes: the full record, the four projections and the root redirect
pub fn status_routes() -> Router<Arc<TelemetryWebState>> {
    Router::new()
        .route("/", get(handlers::status::root))
        .route("/status", get(handlers::status::get_full_status))
        .route("/position", get(handlers::status::get_position))
        .route("/battery", get(handlers::status::get_battery))
        .route("/temperature", get(handlers::status::get_temperature))
        .route("/rotation", get(handlers::status::get_rotation))
}

/// Health check routes for monitoring and liveness probes
pub fn health_routes() -> Router<Arc<TelemetryWebState>> {
    Router::new().route("/health", get(handlers::health::health_check))
}
