//! Smart water heater dashboard
//!
//! Aggregates per-device relay activity from the realtime database into
//! per-state totals and serves them to a clickable US map.

pub mod cli;
pub mod core;
pub mod dashboard_impl;
pub mod error;
pub mod services;
pub mod state;
pub mod traits;
pub mod types;

// Re-export main types
pub use dashboard_impl::DashboardServer;
pub use error::{DashboardError, DashboardResult};
pub use state::{DashboardState, TimestampedReport};
pub use types::{StateEntry, StateSummary, StatesResponse};

// Re-export trait definitions
pub use traits::{AggregationObserver, DeviceStore, StaticFileResponse, StaticFileServer};

// Re-export service implementations
pub use services::{ConfiguredStore, FileDeviceStore, RealFirebaseStore, RealStaticFileServer, TracingObserver};
