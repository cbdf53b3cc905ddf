//! # Robot Status Handlers
//!
//! Thin adapters from HTTP to [`StatusService`](crate::services::StatusService).
//! Each request reads the snapshot once; nothing is cached between requests.

use axum::extract::State;
use axum::response::Redirect;
use axum::Json;
use std::sync::Arc;

use crate::models::{
    BatteryReading, PositionReading, RobotStatus, RotationReading, TemperatureReading,
};
use crate::web::errors::ApiError;
use crate::web::state::TelemetryWebState;

/// Root: GET /
///
/// Redirects to the full status record.
pub async fn root() -> Redirect {
    Redirect::temporary("/status")
}

/// Full status: GET /status
///
/// Schema-validated record. 404 when no snapshot exists, 422 when it does not match
/// the schema, 503 when it cannot be parsed.
pub async fn get_full_status(
    State(state): State<Arc<TelemetryWebState>>,
) -> Result<Json<RobotStatus>, ApiError> {
    Ok(Json(state.status_service().full_status().await?))
}

/// Position: GET /position
pub async fn get_position(
    State(state): State<Arc<TelemetryWebState>>,
) -> Result<Json<PositionReading>, ApiError> {
    Ok(Json(state.status_service().position().await?))
}

/// Battery: GET /battery
pub async fn get_battery(
    State(state): State<Arc<TelemetryWebState>>,
) -> Result<Json<BatteryReading>, ApiError> {
    Ok(Json(state.status_service().battery().await?))
}

/// Temperature: GET /temperature
pub async fn get_temperature(
    State(state): State<Arc<TelemetryWebState>>,
) -> Result<Json<TemperatureReading>, ApiError> {
    Ok(Json(state.status_service().temperature().await?))
}

/// Rotation: GET /rotation
///
/// The unit is whatever the producer wrote; no conversion is applied.
pub async fn get_rotation(
    State(state): State<Arc<TelemetryWebState>>,
) -> Result<Json<RotationReading>, ApiError> {
    Ok(Json(state.status_service().rotation().await?))
}
