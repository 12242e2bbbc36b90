//! Dashboard runtime state
//!
//! Holds the last successful aggregation and fetch health. Nothing in `core`
//! reads it; it only backs the HTTP surface.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;
use tokio::sync::RwLock;

use shared::AggregationReport;

/// Aggregation result with the time it was produced
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimestampedReport {
    #[serde(flatten)]
    pub report: AggregationReport,
    pub generated_at: DateTime<Utc>,
}

impl TimestampedReport {
    pub fn now(report: AggregationReport) -> Self {
        Self {
            report,
            generated_at: Utc::now(),
        }
    }
}

/// Core dashboard state
#[derive(Debug)]
pub struct DashboardState {
    pub bind_address: SocketAddr,
    pub server_start_time: Instant,
    last_report: RwLock<Option<TimestampedReport>>,
    fetch_failures: AtomicU64,
}

impl DashboardState {
    pub fn new(bind_address: SocketAddr) -> Self {
        Self {
            bind_address,
            server_start_time: Instant::now(),
            last_report: RwLock::new(None),
            fetch_failures: AtomicU64::new(0),
        }
    }

    /// Get server uptime in seconds
    pub fn get_uptime_seconds(&self) -> u64 {
        self.server_start_time.elapsed().as_secs()
    }

    pub async fn store_report(&self, report: TimestampedReport) {
        *self.last_report.write().await = Some(report);
    }

    pub async fn last_report(&self) -> Option<TimestampedReport> {
        self.last_report.read().await.clone()
    }

    pub async fn last_refresh(&self) -> Option<DateTime<Utc>> {
        self.last_report.read().await.as_ref().map(|r| r.generated_at)
    }

    /// Increment the failed fetch counter, returning the new total
    pub fn record_fetch_failure(&self) -> u64 {
        self.fetch_failures.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub fn fetch_failures(&self) -> u64 {
        self.fetch_failures.load(Ordering::Relaxed)
    }
}
