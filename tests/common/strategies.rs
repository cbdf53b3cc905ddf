//! Proptest strategies for well-formed status records

use chrono::{DateTime, FixedOffset, SecondsFormat};
use proptest::prelude::*;
use serde_json::{json, Value};

/// Non-empty robot identifiers
pub fn robot_id_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9-]{0,15}"
}

/// ISO-8601 timestamps between 2000 and 2100 with arbitrary quarter-hour offsets,
/// in several spellings, including `+HHMM` offsets without the colon
pub fn timestamp_strategy() -> impl Strategy<Value = String> {
    (
        946_684_800i64..4_102_444_800i64,
        -48i32..=56i32,
        0u32..1000u32,
        prop_oneof![
            Just(SecondsFormat::Secs),
            Just(SecondsFormat::Millis),
            Just(SecondsFormat::Micros)
        ],
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(|(secs, quarter_hours, millis, format, use_z, compact_offset)| {
            let offset = FixedOffset::east_opt(quarter_hours * 15 * 60)
                .unwrap_or_else(|| FixedOffset::east_opt(0).unwrap());
            let utc = DateTime::from_timestamp(secs, millis * 1_000_000).unwrap();
            let rendered = utc.with_timezone(&offset).to_rfc3339_opts(format, use_z);

            if compact_offset && !rendered.ends_with('Z') {
                // "+05:30" -> "+0530"
                let colon = rendered.len() - 3;
                format!("{}{}", &rendered[..colon], &rendered[colon + 1..])
            } else {
                rendered
            }
        })
}

/// Finite coordinates and readings with two decimal places
pub fn reading_strategy() -> impl Strategy<Value = f64> {
    (-1_000_000i64..1_000_000i64).prop_map(|hundredths| hundredths as f64 / 100.0)
}

pub fn battery_strategy() -> impl Strategy<Value = i64> {
    0i64..=100i64
}

/// A record satisfying the full status schema
pub fn status_record_strategy() -> impl Strategy<Value = Value> {
    (
        robot_id_strategy(),
        timestamp_strategy(),
        reading_strategy(),
        reading_strategy(),
        reading_strategy(),
        battery_strategy(),
        reading_strategy(),
    )
        .prop_map(|(robot_id, timestamp, x, y, temperature, battery, rotation)| {
            json!({
                "robot_id": robot_id,
                "timestamp": timestamp,
                "position": {"x": x, "y": y},
                "temperature": temperature,
                "battery_percentage": battery,
                "rotation": rotation
            })
        })
}
