//! Telemetry Web API Module
//!
//! Read-only JSON endpoints over the robot status snapshot, plus a liveness probe.

use axum::Router;
use std::sync::Arc;
use tracing::info;

pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use errors::ApiError;
pub use state::TelemetryWebState;

use crate::config::ConfigResult;

/// Create the telemetry web application with all routes and middleware
pub fn create_app(state: Arc<TelemetryWebState>) -> ConfigResult<Router> {
    let router = Router::new()
        .merge(routes::status_routes())
        .merge(routes::health_routes());

    let app = middleware::apply_middleware_stack(router, &state.config)?.with_state(state);

    info!("Telemetry web application created with all routes and middleware");
    Ok(app)
}
