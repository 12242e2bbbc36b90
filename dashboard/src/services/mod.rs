//! Service implementations
//!
//! Real implementations of all service traits for production use

pub mod configured_store;
pub mod file_store;
pub mod firebase_store;
pub mod static_server;
pub mod tracing_observer;

// Re-export service implementations
pub use configured_store::ConfiguredStore;
pub use file_store::FileDeviceStore;
pub use firebase_store::RealFirebaseStore;
pub use static_server::RealStaticFileServer;
pub use tracing_observer::TracingObserver;

#[cfg(test)]
mod tests;
