//! Service trait definitions for dependency injection
//!
//! All I/O operations are abstracted through these traits for testability

use async_trait::async_trait;

use shared::{AggregationReport, DeviceRecord, DeviceSnapshot, MalformedEntry};
use crate::core::ZipLookupError;
use crate::error::DashboardResult;

/// Source of device records
#[mockall::automock]
#[async_trait]
pub trait DeviceStore: Send + Sync {
    /// Read the whole device collection once
    async fn fetch_devices(&self) -> DashboardResult<DeviceSnapshot>;

    /// Human readable location, for logs
    fn describe(&self) -> String;
}

/// Static file serving service trait
#[mockall::automock]
#[async_trait]
pub trait StaticFileServer: Send + Sync {
    /// Serve static file
    async fn serve_file(&self, path: &str) -> DashboardResult<StaticFileResponse>;
}

/// Hooks for records dropped during aggregation.
///
/// Every method defaults to doing nothing.
#[mockall::automock]
pub trait AggregationObserver: Send + Sync {
    /// A decoded record whose ZIP did not resolve to a state
    fn unresolvable_zip(&self, _record: &DeviceRecord, _error: &ZipLookupError) {}

    /// A store entry the snapshot decoder could not read
    fn malformed_record(&self, _entry: &MalformedEntry) {}

    /// An attributed device whose interaction counter was unreadable
    fn invalid_interactions(&self, _record: &DeviceRecord) {}

    /// The pass finished
    fn aggregated(&self, _report: &AggregationReport) {}
}

/// Static file response
#[derive(Debug, Clone)]
pub struct StaticFileResponse {
    pub content: Vec<u8>,
    pub content_type: String,
    pub cache_control: Option<String>,
}

impl StaticFileResponse {
    /// Create new static file response
    pub fn new(content: Vec<u8>, content_type: String) -> Self {
        Self {
            content,
            content_type,
            cache_control: None,
        }
    }

    /// Set cache control header
    pub fn with_cache_control(mut self, cache_control: String) -> Self {
        self.cache_control = Some(cache_control);
        self
    }
}
