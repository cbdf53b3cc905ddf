//! Property-based tests for the status read path
//!
//! Any well-formed snapshot must come back from `full_status` unchanged, and each
//! projection must return exactly its own fields.

mod common;

use common::*;
use proptest::prelude::*;
use robot_telemetry::services::StatusService;
use robot_telemetry::store::FileStatusStore;
use serde_json::{json, Value};
use std::sync::Arc;
use tokio_test::block_on;

/// Write `record` to a fresh snapshot file and return what a reader would parse back
fn write_snapshot(dir: &tempfile::TempDir, record: &Value) -> (StatusService, Value) {
    let path = dir.path().join("robot_status.json");
    let bytes = serde_json::to_vec(record).expect("record should serialize");
    std::fs::write(&path, &bytes).expect("snapshot should be writable");
    let on_disk: Value = serde_json::from_slice(&bytes).expect("snapshot should parse");

    let service = StatusService::new(Arc::new(FileStatusStore::new(path)));
    (service, on_disk)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn full_status_echoes_well_formed_records(record in status_record_strategy()) {
        let dir = tempfile::tempdir().expect("tempdir");
        let (service, on_disk) = write_snapshot(&dir, &record);

        let status = block_on(service.full_status());
        prop_assert!(status.is_ok(), "rejected well-formed record: {:?}", status);

        let served = serde_json::to_value(status.unwrap()).expect("status should serialize");
        prop_assert_eq!(served, on_disk);
    }

    #[test]
    fn projections_return_only_their_fields(record in status_record_strategy()) {
        let dir = tempfile::tempdir().expect("tempdir");
        let (service, on_disk) = write_snapshot(&dir, &record);

        let position = serde_json::to_value(block_on(service.position()).unwrap()).unwrap();
        prop_assert_eq!(position, on_disk["position"].clone());

        let battery = serde_json::to_value(block_on(service.battery()).unwrap()).unwrap();
        prop_assert_eq!(
            battery,
            json!({"battery_percentage": on_disk["battery_percentage"].clone()})
        );

        let temperature = serde_json::to_value(block_on(service.temperature()).unwrap()).unwrap();
        prop_assert_eq!(temperature, json!({"temperature": on_disk["temperature"].clone()}));

        let rotation = serde_json::to_value(block_on(service.rotation()).unwrap()).unwrap();
        prop_assert_eq!(rotation, json!({"rotation": on_disk["rotation"].clone()}));
    }

    #[test]
    fn any_single_missing_key_is_reported_by_name(
        record in status_record_strategy(),
        key in prop::sample::select(vec![
            "robot_id",
            "timestamp",
            "position",
            "temperature",
            "battery_percentage",
            "rotation",
        ]),
    ) {
        let mut record = record;
        record.as_object_mut().expect("record is an object").remove(key);

        let dir = tempfile::tempdir().expect("tempdir");
        let (service, _) = write_snapshot(&dir, &record);

        match block_on(service.full_status()) {
            Err(robot_telemetry::StatusError::Validation { details }) => {
                prop_assert_eq!(details.len(), 1);
                prop_assert_eq!(details[0].field.as_str(), key);
            }
            other => prop_assert!(false, "expected validation error, got {:?}", other),
        }
    }
}
