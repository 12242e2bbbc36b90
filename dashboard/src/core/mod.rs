//! Core business logic modules
//!
//! Pure business logic with no I/O dependencies

pub mod aggregator;
pub mod state_names;
pub mod zip_resolver;

// Re-export commonly used types
pub use aggregator::{NoopObserver, StateAggregator};
pub use state_names::{code_for_name, lookup_state_key, state_name};
pub use zip_resolver::{
    parse_zip, us_zip_resolver, ZipLookupError, ZipOverlap, ZipRange, ZipStateResolver, MAX_ZIP, MIN_ZIP,
};
