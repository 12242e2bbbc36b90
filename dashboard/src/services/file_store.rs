//! Device store backed by a JSON export on disk
//!
//! Same document shape as the realtime database REST read; used for offline
//! runs and demos.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use shared::{DeviceSnapshot, ProcessId, process_debug};

use crate::error::{DashboardError, DashboardResult};
use crate::traits::DeviceStore;

#[derive(Debug, Clone)]
pub struct FileDeviceStore {
    path: PathBuf,
}

impl FileDeviceStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl DeviceStore for FileDeviceStore {
    async fn fetch_devices(&self) -> DashboardResult<DeviceSnapshot> {
        let body = fs::read_to_string(&self.path)
            .await
            .map_err(|e| DashboardError::fetch_failed(format!("cannot read {}: {}", self.path.display(), e)))?;

        let snapshot = DeviceSnapshot::from_json_str(&body)?;

        process_debug!(
            ProcessId::current(),
            "📂 Loaded {} device entries from {}",
            snapshot.total_entries(),
            self.path.display()
        );

        Ok(snapshot)
    }

    fn describe(&self) -> String {
        format!("file://{}", self.path.display())
    }
}
