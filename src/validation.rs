//! Schema validation for the full robot status record
//!
//! Decodes an untyped snapshot into a [`RobotStatus`], collecting every field that is
//! missing or has the wrong type rather than stopping at the first problem.
//! Keys outside the schema are ignored.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::models::{Position, RobotStatus, Timestamp};

/// A single schema violation, addressed by dotted field path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a raw snapshot against the robot status schema
pub fn validate_robot_status(record: &Map<String, Value>) -> Result<RobotStatus, Vec<FieldError>> {
    let mut fields = FieldCollector::default();

    let robot_id = fields.non_empty_string(record, "robot_id", "robot_id");
    let timestamp = fields.timestamp(record, "timestamp", "timestamp");
    let position = fields.position(record);
    let temperature = fields.float(record, "temperature", "temperature");
    let battery_percentage = fields.integer(record, "battery_percentage", "battery_percentage");
    let rotation = fields.float(record, "rotation", "rotation");

    match (
        robot_id,
        timestamp,
        position,
        temperature,
        battery_percentage,
        rotation,
    ) {
        (
            Some(robot_id),
            Some(timestamp),
            Some(position),
            Some(temperature),
            Some(battery_percentage),
            Some(rotation),
        ) if fields.errors.is_empty() => Ok(RobotStatus {
            robot_id,
            timestamp,
            position,
            temperature,
            battery_percentage,
            rotation,
        }),
        _ => Err(fields.errors),
    }
}

#[derive(Default)]
struct FieldCollector {
    errors: Vec<FieldError>,
}

impl FieldCollector {
    fn fail(&mut self, path: &str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field: path.to_string(),
            message: message.into(),
        });
    }

    fn required<'a>(
        &mut self,
        map: &'a Map<String, Value>,
        key: &str,
        path: &str,
    ) -> Option<&'a Value> {
        let value = map.get(key);
        if value.is_none() {
            self.fail(path, "field required");
        }
        value
    }

    fn non_empty_string(
        &mut self,
        map: &Map<String, Value>,
        key: &str,
        path: &str,
    ) -> Option<String> {
        match self.required(map, key, path)? {
            Value::String(s) if s.is_empty() => {
                self.fail(path, "must not be empty");
                None
            }
            Value::String(s) => Some(s.clone()),
            other => {
                self.fail(path, format!("expected a string, got {}", json_type(other)));
                None
            }
        }
    }

    fn timestamp(&mut self, map: &Map<String, Value>, key: &str, path: &str) -> Option<Timestamp> {
        match self.required(map, key, path)? {
            Value::String(raw) => match Timestamp::parse(raw) {
                Ok(ts) => Some(ts),
                Err(e) => {
                    self.fail(path, format!("invalid ISO-8601 datetime '{raw}': {e}"));
                    None
                }
            },
            other => {
                self.fail(
                    path,
                    format!("expected an ISO-8601 datetime string, got {}", json_type(other)),
                );
                None
            }
        }
    }

    fn float(&mut self, map: &Map<String, Value>, key: &str, path: &str) -> Option<f64> {
        match self.required(map, key, path)? {
            Value::Number(n) => match n.as_f64() {
                Some(f) if f.is_finite() => Some(f),
                _ => {
                    self.fail(path, "must be a finite number");
                    None
                }
            },
            other => {
                self.fail(path, format!("expected a number, got {}", json_type(other)));
                None
            }
        }
    }

    /// Integral floats such as `87.0` are accepted; fractional values are not.
    fn integer(&mut self, map: &Map<String, Value>, key: &str, path: &str) -> Option<i64> {
        match self.required(map, key, path)? {
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    return Some(i);
                }
                if n.is_u64() {
                    self.fail(path, "integer out of range");
                    return None;
                }
                match n.as_f64() {
                    Some(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 => {
                        Some(f as i64)
                    }
                    _ => {
                        self.fail(path, format!("expected an integer, got {n}"));
                        None
                    }
                }
            }
            other => {
                self.fail(path, format!("expected an integer, got {}", json_type(other)));
                None
            }
        }
    }

    fn position(&mut self, map: &Map<String, Value>) -> Option<Position> {
        match self.required(map, "position", "position")? {
            Value::Object(position) => {
                let x = self.float(position, "x", "position.x");
                let y = self.float(position, "y", "position.y");
                Some(Position { x: x?, y: y? })
            }
            other => {
                self.fail(
                    "position",
                    format!("expected an object with x and y, got {}", json_type(other)),
                );
                None
            }
        }
    }
}

pub(crate) fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("fixture must be an object"),
        }
    }

    fn valid() -> Value {
        json!({
            "robot_id": "r1",
            "timestamp": "2024-01-01T00:00:00Z",
            "position": {"x": 1.5, "y": -2.0},
            "temperature": 36.6,
            "battery_percentage": 87,
            "rotation": 90.0
        })
    }

    fn fields_of(errors: &[FieldError]) -> Vec<&str> {
        errors.iter().map(|e| e.field.as_str()).collect()
    }

    #[test]
    fn decodes_valid_record() {
        let status = validate_robot_status(&record(valid())).unwrap();
        assert_eq!(status.robot_id, "r1");
        assert_eq!(status.position, Position { x: 1.5, y: -2.0 });
        assert_eq!(status.temperature, 36.6);
        assert_eq!(status.battery_percentage, 87);
        assert_eq!(status.rotation, 90.0);
        assert_eq!(serde_json::to_value(&status).unwrap(), valid());
    }

    #[test]
    fn integers_are_accepted_for_float_fields() {
        let mut value = valid();
        value["temperature"] = json!(37);
        value["position"]["x"] = json!(3);
        let status = validate_robot_status(&record(value)).unwrap();
        assert_eq!(status.temperature, 37.0);
        assert_eq!(status.position.x, 3.0);
    }

    #[test]
    fn missing_rotation_is_reported() {
        let mut value = valid();
        value.as_object_mut().unwrap().remove("rotation");
        let errors = validate_robot_status(&record(value)).unwrap_err();
        assert_eq!(fields_of(&errors), vec!["rotation"]);
        assert_eq!(errors[0].message, "field required");
    }

    #[test]
    fn battery_must_be_integral() {
        let mut value = valid();
        value["battery_percentage"] = json!(87.5);
        let errors = validate_robot_status(&record(value)).unwrap_err();
        assert_eq!(fields_of(&errors), vec!["battery_percentage"]);

        let mut value = valid();
        value["battery_percentage"] = json!("87");
        assert!(validate_robot_status(&record(value)).is_err());

        let mut value = valid();
        value["battery_percentage"] = json!(87.0);
        assert_eq!(
            validate_robot_status(&record(value)).unwrap().battery_percentage,
            87
        );
    }

    #[test]
    fn battery_range_is_not_enforced() {
        let mut value = valid();
        value["battery_percentage"] = json!(140);
        assert_eq!(
            validate_robot_status(&record(value)).unwrap().battery_percentage,
            140
        );
    }

    #[test]
    fn timestamp_must_parse() {
        let mut value = valid();
        value["timestamp"] = json!("not a date");
        let errors = validate_robot_status(&record(value)).unwrap_err();
        assert_eq!(fields_of(&errors), vec!["timestamp"]);

        let mut value = valid();
        value["timestamp"] = json!(1_704_067_200);
        assert!(validate_robot_status(&record(value)).is_err());
    }

    #[test]
    fn empty_robot_id_is_rejected() {
        let mut value = valid();
        value["robot_id"] = json!("");
        let errors = validate_robot_status(&record(value)).unwrap_err();
        assert_eq!(errors[0].message, "must not be empty");
    }

    #[test]
    fn collects_every_error() {
        let value = json!({
            "robot_id": 7,
            "position": {"x": "left"},
            "temperature": null,
            "battery_percentage": true
        });
        let errors = validate_robot_status(&record(value)).unwrap_err();
        assert_eq!(
            fields_of(&errors),
            vec![
                "robot_id",
                "timestamp",
                "position.x",
                "position.y",
                "temperature",
                "battery_percentage",
                "rotation"
            ]
        );
    }

    #[test]
    fn position_must_be_an_object() {
        let mut value = valid();
        value["position"] = json!([1.5, -2.0]);
        let errors = validate_robot_status(&record(value)).unwrap_err();
        assert_eq!(fields_of(&errors), vec!["position"]);
        assert!(errors[0].message.contains("array"));
    }

    #[test]
    fn extra_keys_are_dropped() {
        let mut value = valid();
        value["firmware"] = json!("1.2.3");
        let status = validate_robot_status(&record(value)).unwrap();
        assert_eq!(serde_json::to_value(&status).unwrap(), valid());
    }
}
