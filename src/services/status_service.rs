use serde_json::{Map, Value};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::{
    BatteryReading, PositionReading, RobotStatus, RotationReading, TemperatureReading,
};
use crate::store::{StatusStore, StoreError};
use crate::validation::{validate_robot_status, FieldError};

/// Failures of a single status request
#[derive(Debug, Error)]
pub enum StatusError {
    #[error("Robot data not found")]
    NotFound,

    #[error("Robot data is missing field '{field}'")]
    KeyMissing { field: String },

    #[error("Robot data failed validation on {} field(s)", .details.len())]
    Validation { details: Vec<FieldError> },

    #[error("Robot data is not readable right now: {reason}")]
    Parse { reason: String },

    #[error("Failed to read robot data: {reason}")]
    Io { reason: String },
}

impl StatusError {
    fn key_missing(field: impl Into<String>) -> Self {
        Self::KeyMissing {
            field: field.into(),
        }
    }
}

impl From<StoreError> for StatusError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::NotFound { .. } => Self::NotFound,
            StoreError::Parse { reason, .. } => Self::Parse { reason },
            io @ StoreError::Io { .. } => Self::Io {
                reason: io.to_string(),
            },
        }
    }
}

/// Validation and projection over the current robot snapshot
///
/// Two deliberately different read paths:
/// - [`StatusService::full_status`] decodes the record against the full schema.
/// - The projections pull their field(s) out of the raw record and echo the values
///   as-is, failing only when a key is absent.
///
/// Every call reads the store anew; nothing is retained between calls.
#[derive(Debug, Clone)]
pub struct StatusService {
    store: Arc<dyn StatusStore>,
}

impl StatusService {
    pub fn new(store: Arc<dyn StatusStore>) -> Self {
        Self { store }
    }

    /// Complete, schema-validated status record
    pub async fn full_status(&self) -> Result<RobotStatus, StatusError> {
        let record = self.load().await?;

        validate_robot_status(&record)
            .map(|status| {
                debug!(
                    robot_id = %status.robot_id,
                    timestamp = %status.timestamp,
                    "Robot status validated"
                );
                status
            })
            .map_err(|details| {
                warn!(
                    error_count = details.len(),
                    fields = ?details.iter().map(|d| d.field.as_str()).collect::<Vec<_>>(),
                    "Robot status failed schema validation"
                );
                StatusError::Validation { details }
            })
    }

    pub async fn position(&self) -> Result<PositionReading, StatusError> {
        let record = self.load().await?;
        let position = field(&record, "position")?;

        let x = position
            .get("x")
            .ok_or_else(|| StatusError::key_missing("position.x"))?;
        let y = position
            .get("y")
            .ok_or_else(|| StatusError::key_missing("position.y"))?;

        Ok(PositionReading {
            x: x.clone(),
            y: y.clone(),
        })
    }

    pub async fn battery(&self) -> Result<BatteryReading, StatusError> {
        let record = self.load().await?;
        Ok(BatteryReading {
            battery_percentage: field(&record, "battery_percentage")?.clone(),
        })
    }

    pub async fn temperature(&self) -> Result<TemperatureReading, StatusError> {
        let record = self.load().await?;
        Ok(TemperatureReading {
            temperature: field(&record, "temperature")?.clone(),
        })
    }

    pub async fn rotation(&self) -> Result<RotationReading, StatusError> {
        let record = self.load().await?;
        Ok(RotationReading {
            rotation: field(&record, "rotation")?.clone(),
        })
    }

    async fn load(&self) -> Result<Map<String, Value>, StatusError> {
        Ok(self.store.read().await?)
    }
}

fn field<'a>(record: &'a Map<String, Value>, key: &str) -> Result<&'a Value, StatusError> {
    record.get(key).ok_or_else(|| {
        debug!(field = key, "Projected field is absent from robot data");
        StatusError::key_missing(key)
    })
}
