//! Test helpers for dashboard service tests

use shared::StoreConfig;
use std::io::Write;
use tempfile::NamedTempFile;

/// Store configuration pointing at a mock server
pub fn store_config(base_url: &str) -> StoreConfig {
    StoreConfig::new(base_url, "devices").with_timeout_secs(2)
}

/// Write `contents` to a fresh temp file, kept alive by the returned handle
pub fn temp_json(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}
