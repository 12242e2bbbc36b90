//! Device records and realtime store snapshot decoding
//!
//! The realtime database hands back loosely typed JSON. Everything is coerced
//! into [`DeviceRecord`] here so nothing downstream touches raw values.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{SharedError, SharedResult};

/// ZIP field exactly as stored on the device entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ZipValue {
    Integer(i64),
    Text(String),
    /// Floats, booleans, nested structures: kept so diagnostics can show them
    Other(Value),
}

impl From<u32> for ZipValue {
    fn from(zip: u32) -> Self {
        ZipValue::Integer(i64::from(zip))
    }
}

impl From<&str> for ZipValue {
    fn from(zip: &str) -> Self {
        ZipValue::Text(zip.to_string())
    }
}

/// One installed water heater controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawDeviceRecord")]
pub struct DeviceRecord {
    /// Key of the entry in the store; not part of the stored value
    #[serde(skip)]
    pub device_id: String,

    #[serde(default)]
    pub zip: Option<ZipValue>,

    /// Number of relay switches; absent counts as zero
    #[serde(default)]
    pub relay_interactions: Option<u64>,

    /// The stored counter was present but not a non-negative whole number.
    /// The device still counts, with zero interactions.
    #[serde(skip)]
    pub interactions_invalid: bool,
}

impl DeviceRecord {
    pub fn new(device_id: impl Into<String>, zip: Option<ZipValue>, relay_interactions: Option<u64>) -> Self {
        Self {
            device_id: device_id.into(),
            zip,
            relay_interactions,
            interactions_invalid: false,
        }
    }

    /// Record whose stored counter could not be read
    pub fn with_invalid_interactions(device_id: impl Into<String>, zip: Option<ZipValue>) -> Self {
        Self {
            interactions_invalid: true,
            ..Self::new(device_id, zip, None)
        }
    }

    /// Relay interactions with the absent-means-zero rule applied
    pub fn interactions(&self) -> u64 {
        self.relay_interactions.unwrap_or(0)
    }
}

/// Device entry as stored, before the counter is coerced
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDeviceRecord {
    #[serde(default)]
    zip: Option<ZipValue>,
    #[serde(default)]
    relay_interactions: Value,
}

impl From<RawDeviceRecord> for DeviceRecord {
    fn from(raw: RawDeviceRecord) -> Self {
        match coerce_count(&raw.relay_interactions) {
            Some(count) => DeviceRecord::new(String::new(), raw.zip, count),
            None => DeviceRecord::with_invalid_interactions(String::new(), raw.zip),
        }
    }
}

/// Read a stored counter: integers, whole floats and numeric strings.
///
/// `Some(None)` means absent, `None` means present but unreadable.
fn coerce_count(value: &Value) -> Option<Option<u64>> {
    match value {
        Value::Null => Some(None),
        Value::Number(n) => match n.as_u64() {
            Some(count) => Some(Some(count)),
            None => n.as_f64().and_then(whole_count).map(Some),
        },
        Value::String(text) => {
            let text = text.trim();
            text.parse::<u64>()
                .ok()
                .or_else(|| text.parse::<f64>().ok().and_then(whole_count))
                .map(Some)
        }
        _ => None,
    }
}

fn whole_count(f: f64) -> Option<u64> {
    // u64::MAX as f64 rounds up to 2^64, so the bound is exclusive
    if f.is_finite() && f >= 0.0 && f.fract() == 0.0 && f < u64::MAX as f64 {
        Some(f as u64)
    } else {
        None
    }
}

/// A store entry that could not be turned into a [`DeviceRecord`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MalformedEntry {
    pub key: String,
    pub reason: String,
}

/// Decoded contents of the devices path
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeviceSnapshot {
    pub records: Vec<DeviceRecord>,
    pub malformed: Vec<MalformedEntry>,
}

impl DeviceSnapshot {
    pub fn from_records(records: Vec<DeviceRecord>) -> Self {
        Self {
            records,
            malformed: Vec::new(),
        }
    }

    /// Decode a REST read of the devices path.
    ///
    /// `null` is an empty collection, an object is keyed by device id and an
    /// array (sequential keys) may contain `null` holes which are ignored.
    /// Individual bad entries land in `malformed`; only a top-level scalar
    /// fails the whole snapshot.
    pub fn from_value(value: Value) -> SharedResult<Self> {
        let mut snapshot = DeviceSnapshot::default();

        match value {
            Value::Null => {}
            Value::Object(entries) => {
                for (key, entry) in entries {
                    snapshot.push_entry(key, entry);
                }
            }
            Value::Array(entries) => {
                for (index, entry) in entries.into_iter().enumerate() {
                    if entry.is_null() {
                        continue;
                    }
                    snapshot.push_entry(index.to_string(), entry);
                }
            }
            other => {
                return Err(SharedError::UnexpectedSnapshotShape {
                    found: json_kind(&other).to_string(),
                });
            }
        }

        Ok(snapshot)
    }

    /// Decode a JSON document (export file or response body)
    pub fn from_json_str(body: &str) -> SharedResult<Self> {
        let value: Value = serde_json::from_str(body)?;
        Self::from_value(value)
    }

    /// Every entry seen, decodable or not
    pub fn total_entries(&self) -> usize {
        self.records.len() + self.malformed.len()
    }

    fn push_entry(&mut self, key: String, entry: Value) {
        if !entry.is_object() {
            self.malformed.push(MalformedEntry {
                reason: format!("expected object, got {}", json_kind(&entry)),
                key,
            });
            return;
        }

        match serde_json::from_value::<DeviceRecord>(entry) {
            Ok(mut record) => {
                record.device_id = key;
                self.records.push(record);
            }
            Err(e) => self.malformed.push(MalformedEntry {
                key,
                reason: e.to_string(),
            }),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
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

    #[test]
    fn test_decode_object_keyed_by_device_id() {
        let snapshot = DeviceSnapshot::from_value(json!({
            "heater-1": { "zip": 90001, "relayInteractions": 3 },
            "heater-2": { "zip": "10001" },
        }))
        .unwrap();

        assert_eq!(snapshot.records.len(), 2);
        assert!(snapshot.malformed.is_empty());

        let first = &snapshot.records[0];
        assert_eq!(first.device_id, "heater-1");
        assert_eq!(first.zip, Some(ZipValue::Integer(90001)));
        assert_eq!(first.interactions(), 3);

        let second = &snapshot.records[1];
        assert_eq!(second.zip, Some(ZipValue::Text("10001".to_string())));
        assert_eq!(second.relay_interactions, None);
        assert_eq!(second.interactions(), 0);
    }

    #[test]
    fn test_decode_array_skips_holes() {
        let snapshot = DeviceSnapshot::from_value(json!([
            null,
            { "zip": 60601, "relayInteractions": 1 },
            null,
            { "zip": 73301 },
        ]))
        .unwrap();

        let ids: Vec<&str> = snapshot.records.iter().map(|r| r.device_id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
        assert_eq!(snapshot.total_entries(), 2);
    }

    #[test]
    fn test_decode_null_is_empty() {
        let snapshot = DeviceSnapshot::from_value(Value::Null).unwrap();
        assert!(snapshot.records.is_empty());
        assert!(snapshot.malformed.is_empty());
    }

    #[test]
    fn test_decode_scalar_is_rejected() {
        let err = DeviceSnapshot::from_value(json!("devices")).unwrap_err();
        assert!(matches!(err, SharedError::UnexpectedSnapshotShape { ref found } if found == "string"));
    }

    #[test]
    fn test_bad_entries_do_not_fail_the_batch() {
        let snapshot = DeviceSnapshot::from_value(json!({
            "a": { "zip": 90001, "relayInteractions": 2 },
            "b": 42,
            "c": [ 90002 ],
        }))
        .unwrap();

        assert_eq!(snapshot.records.len(), 1);
        let keys: Vec<&str> = snapshot.malformed.iter().map(|m| m.key.as_str()).collect();
        assert_eq!(keys, vec!["b", "c"]);
        assert_eq!(snapshot.malformed[0].reason, "expected object, got number");
        assert_eq!(snapshot.total_entries(), 3);
    }

    #[test]
    fn test_interaction_counter_is_coerced() {
        let snapshot = DeviceSnapshot::from_value(json!({
            "text": { "zip": 90001, "relayInteractions": " 5 " },
            "float": { "zip": 90002, "relayInteractions": 2.0 },
            "float_text": { "zip": 90003, "relayInteractions": "4.0" },
            "int": { "zip": 90004, "relayInteractions": 1 },
        }))
        .unwrap();

        assert!(snapshot.malformed.is_empty());
        let by_id = |id: &str| snapshot.records.iter().find(|r| r.device_id == id).unwrap();
        assert_eq!(by_id("text").relay_interactions, Some(5));
        assert_eq!(by_id("float").relay_interactions, Some(2));
        assert_eq!(by_id("float_text").relay_interactions, Some(4));
        assert_eq!(by_id("int").relay_interactions, Some(1));
        assert!(snapshot.records.iter().all(|r| !r.interactions_invalid));
    }

    #[test]
    fn test_unreadable_counter_keeps_the_device() {
        let snapshot = DeviceSnapshot::from_value(json!({
            "negative": { "zip": 90001, "relayInteractions": -4 },
            "words": { "zip": 90002, "relayInteractions": "many" },
            "fraction": { "zip": 90003, "relayInteractions": 2.5 },
            "nested": { "zip": 90004, "relayInteractions": { "count": 3 } },
        }))
        .unwrap();

        assert!(snapshot.malformed.is_empty());
        assert_eq!(snapshot.records.len(), 4);
        for record in &snapshot.records {
            assert!(record.interactions_invalid, "{}", record.device_id);
            assert_eq!(record.interactions(), 0);
            assert!(record.zip.is_some());
        }
    }

    #[test]
    fn test_odd_zip_types_are_kept_not_rejected() {
        let snapshot = DeviceSnapshot::from_value(json!({
            "float": { "zip": 90001.5 },
            "bool": { "zip": true },
            "null": { "zip": null, "relayInteractions": null },
            "extra": { "zip": 10001, "firmware": "2.1.0" },
        }))
        .unwrap();

        assert!(snapshot.malformed.is_empty());
        let by_id = |id: &str| snapshot.records.iter().find(|r| r.device_id == id).unwrap();
        assert!(matches!(by_id("float").zip, Some(ZipValue::Other(_))));
        assert!(matches!(by_id("bool").zip, Some(ZipValue::Other(_))));
        assert_eq!(by_id("null").zip, None);
        assert_eq!(by_id("null").relay_interactions, None);
        assert!(!by_id("null").interactions_invalid);
        assert_eq!(by_id("extra").zip, Some(ZipValue::Integer(10001)));
    }

    #[test]
    fn test_from_json_str_reports_syntax_errors() {
        let err = DeviceSnapshot::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, SharedError::DeserializationError { .. }));
    }
}
