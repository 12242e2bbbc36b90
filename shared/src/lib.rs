//! Shared types for the water heater controller dashboard
//!
//! Contains the device record model, per-state aggregate types, configuration
//! and logging used by both the dashboard server and the report CLI.
//! ZIP resolution and aggregation live in the dashboard crate's `core`.

pub mod types;
pub mod errors;
pub mod logging;
pub mod messages;

pub use types::*;
pub use errors::*;

pub use messages::{
    // Device records as read from the realtime store
    DeviceRecord, DeviceSnapshot, MalformedEntry, ZipValue,

    // Aggregation output
    AggregationReport, SkipReason, SkipSummary, StateAggregate,

    // Configuration types
    DashboardConfig, DeviceSource, StoreConfig, DEFAULT_STORE_TIMEOUT_SECS,
};
