//! Device store selected at startup from configuration

use async_trait::async_trait;

use shared::{DeviceSnapshot, DeviceSource};

use crate::error::DashboardResult;
use crate::services::{FileDeviceStore, RealFirebaseStore};
use crate::traits::DeviceStore;

/// Either store, picked from a `DeviceSource`
#[derive(Clone)]
pub enum ConfiguredStore {
    Remote(RealFirebaseStore),
    File(FileDeviceStore),
}

impl ConfiguredStore {
    pub fn from_source(source: &DeviceSource) -> DashboardResult<Self> {
        match source {
            DeviceSource::Remote(config) => Ok(Self::Remote(RealFirebaseStore::new(config)?)),
            DeviceSource::File(path) => Ok(Self::File(FileDeviceStore::new(path))),
        }
    }
}

#[async_trait]
impl DeviceStore for ConfiguredStore {
    async fn fetch_devices(&self) -> DashboardResult<DeviceSnapshot> {
        match self {
            Self::Remote(store) => store.fetch_devices().await,
            Self::File(store) => store.fetch_devices().await,
        }
    }

    fn describe(&self) -> String {
        match self {
            Self::Remote(store) => store.describe(),
            Self::File(store) => store.describe(),
        }
    }
}
