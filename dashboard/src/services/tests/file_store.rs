//! Tests for the JSON file store

use tokio_test::assert_ok;

use super::fixtures::{devices_object, devices_with_malformed};
use super::helpers::temp_json;
use crate::services::FileDeviceStore;
use crate::traits::DeviceStore;

#[tokio::test]
async fn test_reads_export() {
    let file = temp_json(&devices_object().to_string());
    let store = FileDeviceStore::new(file.path());

    let snapshot = assert_ok!(store.fetch_devices().await);
    assert_eq!(snapshot.records.len(), 5);
}

#[tokio::test]
async fn test_malformed_children_are_collected() {
    let file = temp_json(&devices_with_malformed().to_string());
    let store = FileDeviceStore::new(file.path());

    let snapshot = assert_ok!(store.fetch_devices().await);
    assert_eq!(snapshot.records.len(), 2);
    assert_eq!(snapshot.malformed.len(), 3);

    let mut keys: Vec<&str> = snapshot.malformed.iter().map(|m| m.key.as_str()).collect();
    keys.sort_unstable();
    assert_eq!(keys, vec!["flag", "list", "scalar"]);

    let odd = snapshot.records.iter().find(|r| r.device_id == "odd_counter").unwrap();
    assert!(odd.interactions_invalid);
}

#[tokio::test]
async fn test_missing_file_is_fetch_failure() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileDeviceStore::new(dir.path().join("absent.json"));

    let err = store.fetch_devices().await.unwrap_err();
    assert!(err.is_fetch_failure());
}

#[test]
fn test_describe() {
    let store = FileDeviceStore::new("/data/devices.json");
    assert_eq!(store.describe(), "file:///data/devices.json");
}
