//! Type definitions for the HTTP API
//!
//! Payloads exchanged between the map page and the dashboard that are not
//! part of the shared aggregation model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use shared::{AggregationReport, SkipSummary, StateCode};

use crate::core::state_name;
use crate::state::TimestampedReport;

fn display_name(state: StateCode) -> String {
    state_name(state).unwrap_or(state.as_str()).to_string()
}

/// One state's entry in the map payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateEntry {
    pub name: String,
    pub device_count: u64,
    pub interaction_total: u64,
}

/// Payload of `GET /api/states`: the aggregation with display names, so
/// the map can shade every state from one response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatesResponse {
    pub states: BTreeMap<StateCode, StateEntry>,
    pub skipped: SkipSummary,
    pub total_records: u64,
    pub invalid_interactions: u64,
    pub generated_at: DateTime<Utc>,
}

impl From<&TimestampedReport> for StatesResponse {
    fn from(stamped: &TimestampedReport) -> Self {
        let report = &stamped.report;
        let states = report
            .states
            .iter()
            .map(|(&state, aggregate)| {
                let entry = StateEntry {
                    name: display_name(state),
                    device_count: aggregate.device_count,
                    interaction_total: aggregate.interaction_total,
                };
                (state, entry)
            })
            .collect();

        Self {
            states,
            skipped: report.skipped,
            total_records: report.total_records,
            invalid_interactions: report.invalid_interactions,
            generated_at: stamped.generated_at,
        }
    }
}

/// Tooltip payload for one clicked state.
///
/// `devices` and `relay_interactions` are `None` when no device resolved to
/// the state; the page shows "N/A" for them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateSummary {
    pub state: StateCode,
    pub name: String,
    pub devices: Option<u64>,
    pub relay_interactions: Option<u64>,
}

impl StateSummary {
    pub fn from_report(state: StateCode, report: &AggregationReport) -> Self {
        let aggregate = report.get(&state);
        Self {
            state,
            name: display_name(state),
            devices: aggregate.map(|a| a.device_count),
            relay_interactions: aggregate.map(|a| a.interaction_total),
        }
    }
}
