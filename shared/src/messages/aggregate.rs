//! Per-state aggregation output

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::types::StateCode;

/// Device count and summed relay interactions for one state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateAggregate {
    pub device_count: u64,
    pub interaction_total: u64,
}

impl StateAggregate {
    /// Count one more device carrying `interactions` relay switches
    pub fn record(&mut self, interactions: u64) {
        self.device_count += 1;
        self.interaction_total = self.interaction_total.saturating_add(interactions);
    }
}

/// Why a record did not contribute to any state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SkipReason {
    /// ZIP missing, malformed, or outside every known range
    UnresolvableZip,
    /// Entry was not a well-formed device record at all
    MalformedRecord,
}

/// Counts of dropped records, for data-quality monitoring
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkipSummary {
    pub unresolvable_zip: u64,
    pub malformed_record: u64,
}

impl SkipSummary {
    pub fn record(&mut self, reason: SkipReason) {
        match reason {
            SkipReason::UnresolvableZip => self.unresolvable_zip += 1,
            SkipReason::MalformedRecord => self.malformed_record += 1,
        }
    }

    pub fn total(&self) -> u64 {
        self.unresolvable_zip + self.malformed_record
    }
}

/// Result of one aggregation pass.
///
/// `states` only holds states with at least one attributed device, so every
/// entry has `device_count >= 1`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregationReport {
    pub states: BTreeMap<StateCode, StateAggregate>,
    pub skipped: SkipSummary,
    pub total_records: u64,
    /// Attributed devices whose stored interaction counter was unreadable
    /// and counted as zero
    #[serde(default)]
    pub invalid_interactions: u64,
}

impl AggregationReport {
    pub fn get(&self, code: &StateCode) -> Option<&StateAggregate> {
        self.states.get(code)
    }

    /// Devices that were attributed to some state
    pub fn attributed_devices(&self) -> u64 {
        self.states.values().map(|s| s.device_count).sum()
    }

    /// Account for entries the snapshot decoder already rejected
    pub fn add_malformed(&mut self, count: u64) {
        self.skipped.malformed_record += count;
        self.total_records += count;
    }
}
