//! Configuration types
//!
//! Built by the binaries from command line flags and environment variables.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use url::Url;

use crate::errors::{SharedError, SharedResult};

/// Default request timeout against the realtime database
pub const DEFAULT_STORE_TIMEOUT_SECS: u64 = 10;

/// Realtime database location of the device collection
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct StoreConfig {
    /// e.g. `https://<project>-default-rtdb.firebaseio.com`
    pub database_url: String,
    /// Path of the device collection below the database root
    pub devices_path: String,
    /// Database secret or ID token, sent as the `auth` query parameter
    pub auth_token: Option<String>,
    pub timeout_secs: u64,
}

impl StoreConfig {
    pub fn new(database_url: impl Into<String>, devices_path: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            devices_path: devices_path.into(),
            auth_token: None,
            timeout_secs: DEFAULT_STORE_TIMEOUT_SECS,
        }
    }

    pub fn with_auth_token(mut self, token: Option<String>) -> Self {
        self.auth_token = token.filter(|t| !t.trim().is_empty());
        self
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// REST endpoint for the device collection: `<database_url>/<devices_path>.json`
    pub fn devices_url(&self) -> SharedResult<Url> {
        let mut url = Url::parse(&self.database_url)
            .map_err(|e| SharedError::invalid_config("database_url", format!("{} ({e})", self.database_url)))?;

        if url.scheme() != "https" && url.scheme() != "http" {
            return Err(SharedError::invalid_config("database_url", self.database_url.clone()));
        }

        let base_path = url.path().trim_end_matches('/').to_string();
        let devices_path = self.devices_path.trim_matches('/');
        url.set_path(&format!("{base_path}/{devices_path}.json"));
        url.set_query(None);

        Ok(url)
    }

    pub fn validate(&self) -> SharedResult<()> {
        self.devices_url()?;
        if self.timeout_secs == 0 {
            return Err(SharedError::invalid_config("timeout_secs", "0"));
        }
        Ok(())
    }
}

/// Where device records come from
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub enum DeviceSource {
    /// Realtime database REST read
    Remote(StoreConfig),
    /// JSON export on local disk, same shape as the REST response
    File(PathBuf),
}

/// Dashboard server configuration
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct DashboardConfig {
    pub bind_host: String,
    pub bind_port: u16,
    pub static_dir: String,
    pub log_level: String,
    pub source: DeviceSource,
}

impl DashboardConfig {
    pub fn bind_address(&self) -> SharedResult<std::net::SocketAddr> {
        format!("{}:{}", self.bind_host, self.bind_port)
            .parse()
            .map_err(|_| SharedError::invalid_config("bind_host", self.bind_host.clone()))
    }
}
