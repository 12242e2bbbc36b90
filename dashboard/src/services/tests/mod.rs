//! Service tests for the dashboard
//!
//! Stores are exercised against a mock HTTP server and temporary files.

pub mod helpers;
pub mod configured_store;
pub mod file_store;
pub mod static_server;
