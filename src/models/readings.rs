//! Single-field projections of the raw snapshot.
//!
//! Values are carried as raw JSON and echoed verbatim; only the full status path
//! applies the schema.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionReading {
    pub x: Value,
    pub y: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatteryReading {
    pub battery_percentage: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemperatureReading {
    pub temperature: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RotationReading {
    pub rotation: Value,
}
