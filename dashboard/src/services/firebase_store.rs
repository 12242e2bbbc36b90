//! Realtime database device store
//!
//! One REST read of `<database_url>/<devices_path>.json` per fetch. The auth
//! token travels as the `auth` query parameter and is never logged.

use async_trait::async_trait;
use std::time::{Duration, Instant};
use url::Url;

use shared::{DeviceSnapshot, ProcessId, StoreConfig, process_debug, process_warn};

use crate::error::{DashboardError, DashboardResult};
use crate::traits::DeviceStore;

/// Real realtime-database client
#[derive(Clone)]
pub struct RealFirebaseStore {
    client: reqwest::Client,
    devices_url: Url,
    auth_token: Option<String>,
}

impl RealFirebaseStore {
    /// Create a store from validated configuration
    pub fn new(config: &StoreConfig) -> DashboardResult<Self> {
        config.validate()?;
        let devices_url = config.devices_url()?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| DashboardError::config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            devices_url,
            auth_token: config.auth_token.clone(),
        })
    }

    pub fn devices_url(&self) -> &Url {
        &self.devices_url
    }
}

#[async_trait]
impl DeviceStore for RealFirebaseStore {
    async fn fetch_devices(&self) -> DashboardResult<DeviceSnapshot> {
        let started = Instant::now();

        let mut request = self.client.get(self.devices_url.clone());
        if let Some(token) = &self.auth_token {
            request = request.query(&[("auth", token.as_str())]);
        }

        let response = request.send().await.map_err(|e| {
            // reqwest errors carry the URL, which would include the token
            DashboardError::fetch_failed(format!("request to {} failed: {}", self.describe(), e.without_url()))
        })?;

        let status = response.status();
        if !status.is_success() {
            process_warn!(
                ProcessId::current(),
                "❌ Device store {} answered HTTP {}",
                self.describe(),
                status.as_u16()
            );
            return Err(DashboardError::StoreStatus {
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| DashboardError::fetch_failed(format!("reading response body failed: {}", e.without_url())))?;

        let snapshot = DeviceSnapshot::from_json_str(&body)?;

        process_debug!(
            ProcessId::current(),
            "📥 Fetched {} device entries ({} bytes) in {} ms",
            snapshot.total_entries(),
            body.len(),
            started.elapsed().as_millis()
        );

        Ok(snapshot)
    }

    fn describe(&self) -> String {
        self.devices_url.to_string()
    }
}
