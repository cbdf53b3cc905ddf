//! Snapshot fixtures shared by the integration tests

use serde_json::{json, Value};

/// The canonical well-formed record
pub fn scenario_a_record() -> Value {
    json!({
        "robot_id": "r1",
        "timestamp": "2024-01-01T00:00:00Z",
        "position": {"x": 1.5, "y": -2.0},
        "temperature": 36.6,
        "battery_percentage": 87,
        "rotation": 90.0
    })
}

/// Scenario A with one top-level key removed
pub fn record_without(key: &str) -> Value {
    let mut record = scenario_a_record();
    if let Some(map) = record.as_object_mut() {
        map.remove(key);
    }
    record
}

/// Every endpoint that serves snapshot data
pub const DATA_ENDPOINTS: [&str; 5] = [
    "/status",
    "/position",
    "/battery",
    "/temperature",
    "/rotation",
];
