use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Planar position of the robot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Complete, schema-validated telemetry snapshot
///
/// Produced only by [`crate::validation::validate_robot_status`]; unknown keys in the
/// persisted record are dropped. `rotation` is passed through without unit conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RobotStatus {
    pub robot_id: String,
    pub timestamp: Timestamp,
    pub position: Position,
    pub temperature: f64,
    pub battery_percentage: i64,
    pub rotation: f64,
}

/// ISO-8601 timestamp that remembers its persisted spelling
///
/// Serializes back to exactly the string it was parsed from, so a status record
/// round-trips without reformatting (`Z` stays `Z`, fractional digits are kept).
/// Values without an offset are interpreted as UTC.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timestamp {
    raw: String,
    parsed: DateTime<FixedOffset>,
}

/// Offset-aware spellings tried after RFC 3339: optional seconds, `+HH:MM`, `+HHMM`
/// or `+HH` offsets, `T` or space separator
const OFFSET_FORMATS: [&str; 12] = [
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M:%S%.f%#z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%dT%H:%M%z",
    "%Y-%m-%dT%H:%M%#z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%#z",
    "%Y-%m-%d %H:%M%:z",
    "%Y-%m-%d %H:%M%z",
    "%Y-%m-%d %H:%M%#z",
];

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

impl Timestamp {
    pub fn parse(raw: &str) -> Result<Self, chrono::ParseError> {
        let rfc3339_error = match DateTime::parse_from_rfc3339(raw) {
            Ok(parsed) => return Ok(Self::new(raw, parsed)),
            Err(e) => e,
        };

        // chrono's %z family does not read the `Z` designator
        let normalized = match raw.strip_suffix(['Z', 'z']) {
            Some(prefix) => format!("{prefix}+00:00"),
            None => raw.to_string(),
        };

        for format in OFFSET_FORMATS {
            if let Ok(parsed) = DateTime::parse_from_str(&normalized, format) {
                return Ok(Self::new(raw, parsed));
            }
        }

        for format in NAIVE_FORMATS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
                return Ok(Self::new(raw, naive.and_utc().fixed_offset()));
            }
        }

        Err(rfc3339_error)
    }

    fn new(raw: &str, parsed: DateTime<FixedOffset>) -> Self {
        Self {
            raw: raw.to_string(),
            parsed,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn as_datetime(&self) -> DateTime<FixedOffset> {
        self.parsed
    }

    pub fn to_utc(&self) -> DateTime<Utc> {
        self.parsed.with_timezone(&Utc)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        use serde::de::Error;

        let raw = String::deserialize(deserializer)?;
        Timestamp::parse(&raw)
            .map_err(|e| D::Error::custom(format!("invalid ISO-8601 timestamp '{raw}': {e}")))
    }
}
