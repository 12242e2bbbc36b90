//! Command line options shared by both binaries

use clap::Args;
use std::path::PathBuf;

use shared::{DeviceSource, StoreConfig, DEFAULT_STORE_TIMEOUT_SECS};

use crate::error::{DashboardError, DashboardResult};

/// Where to read device records from.
///
/// `--devices-file` wins over the realtime database when both are given.
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Realtime database root, e.g. https://<project>-default-rtdb.firebaseio.com
    #[arg(long, env = "FIREBASE_DATABASE_URL")]
    pub database_url: Option<String>,

    /// Path of the device collection below the database root
    #[arg(long, env = "FIREBASE_DEVICES_PATH", default_value = "devices")]
    pub devices_path: String,

    /// Database secret or ID token
    #[arg(long, env = "FIREBASE_AUTH", hide_env_values = true)]
    pub auth_token: Option<String>,

    /// Request timeout against the realtime database, in seconds
    #[arg(long, env = "FIREBASE_TIMEOUT_SECS", default_value_t = DEFAULT_STORE_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Read devices from a JSON export instead of the realtime database
    #[arg(long, env = "DEVICES_FILE")]
    pub devices_file: Option<PathBuf>,
}

impl SourceArgs {
    pub fn device_source(&self) -> DashboardResult<DeviceSource> {
        if let Some(path) = &self.devices_file {
            return Ok(DeviceSource::File(path.clone()));
        }

        let database_url = self
            .database_url
            .as_ref()
            .ok_or_else(|| DashboardError::config("either --database-url or --devices-file is required"))?;

        let config = StoreConfig::new(database_url.clone(), self.devices_path.clone())
            .with_auth_token(self.auth_token.clone())
            .with_timeout_secs(self.timeout_secs);
        config.validate()?;

        Ok(DeviceSource::Remote(config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> SourceArgs {
        SourceArgs {
            database_url: None,
            devices_path: "devices".to_string(),
            auth_token: None,
            timeout_secs: DEFAULT_STORE_TIMEOUT_SECS,
            devices_file: None,
        }
    }

    #[test]
    fn test_missing_source_is_config_error() {
        assert!(matches!(args().device_source(), Err(DashboardError::Config(_))));
    }

    #[test]
    fn test_file_wins_over_remote() {
        let source = SourceArgs {
            database_url: Some("https://example.firebaseio.com".to_string()),
            devices_file: Some(PathBuf::from("devices.json")),
            ..args()
        };
        assert_eq!(source.device_source().unwrap(), DeviceSource::File(PathBuf::from("devices.json")));
    }

    #[test]
    fn test_remote_source_carries_token_and_timeout() {
        let source = SourceArgs {
            database_url: Some("https://example.firebaseio.com".to_string()),
            auth_token: Some("secret".to_string()),
            timeout_secs: 3,
            ..args()
        };
        match source.device_source().unwrap() {
            DeviceSource::Remote(config) => {
                assert_eq!(config.auth_token.as_deref(), Some("secret"));
                assert_eq!(config.timeout_secs, 3);
            }
            other => panic!("expected remote source, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_database_url_is_rejected() {
        let source = SourceArgs {
            database_url: Some("ftp://example.com".to_string()),
            ..args()
        };
        assert!(matches!(source.device_source(), Err(DashboardError::Shared(_))));
    }
}
