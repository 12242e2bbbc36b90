//! Tests for store selection

use std::path::PathBuf;

use shared::{DeviceSource, StoreConfig};

use super::fixtures::devices_object;
use super::helpers::temp_json;
use crate::services::ConfiguredStore;
use crate::traits::DeviceStore;

#[tokio::test]
async fn test_file_source_reads_file() {
    let file = temp_json(&devices_object().to_string());
    let store = ConfiguredStore::from_source(&DeviceSource::File(file.path().to_path_buf())).unwrap();

    assert!(matches!(store, ConfiguredStore::File(_)));
    assert_eq!(store.fetch_devices().await.unwrap().records.len(), 5);
}

#[test]
fn test_remote_source_builds_firebase_store() {
    let source = DeviceSource::Remote(StoreConfig::new("https://example.firebaseio.com", "devices"));
    let store = ConfiguredStore::from_source(&source).unwrap();

    assert!(matches!(store, ConfiguredStore::Remote(_)));
    assert_eq!(store.describe(), "https://example.firebaseio.com/devices.json");
}

#[test]
fn test_invalid_remote_source_is_rejected() {
    let source = DeviceSource::Remote(StoreConfig::new("ftp://example.com", "devices"));
    assert!(ConfiguredStore::from_source(&source).is_err());

    let file = DeviceSource::File(PathBuf::from("/nowhere.json"));
    assert!(ConfiguredStore::from_source(&file).is_ok());
}
