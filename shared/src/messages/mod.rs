//! Message types for the dashboard workspace
//!
//! - `device`: device records and the realtime store snapshot decoder
//! - `aggregate`: per-state aggregation output
//! - `config`: configuration for the store and the HTTP server

pub mod device;
pub mod aggregate;
pub mod config;

pub use device::{DeviceRecord, DeviceSnapshot, MalformedEntry, ZipValue};

pub use aggregate::{AggregationReport, SkipReason, SkipSummary, StateAggregate};

pub use config::{DashboardConfig, DeviceSource, StoreConfig, DEFAULT_STORE_TIMEOUT_SECS};
