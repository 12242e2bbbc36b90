//! Dashboard-specific error types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;
use shared::SharedError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Device fetch failed: {message}")]
    FetchFailed { message: String },

    #[error("Device store returned HTTP {status}")]
    StoreStatus { status: u16 },

    #[error("HTTP server startup failed: {0}")]
    ServerStartup(String),

    #[error("Static file not found: {path}")]
    StaticFileNotFound { path: String },

    #[error("Access denied: {path}")]
    AccessDenied { path: String },

    #[error("Unknown state: {key}")]
    UnknownState { key: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Shared component error: {0}")]
    Shared(#[from] SharedError),
}

impl DashboardError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn fetch_failed(message: impl Into<String>) -> Self {
        Self::FetchFailed {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// True for every failure to obtain device data, which the map page
    /// renders as its "no data" state
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            Self::FetchFailed { .. }
                | Self::StoreStatus { .. }
                | Self::Shared(SharedError::UnexpectedSnapshotShape { .. })
                | Self::Shared(SharedError::DeserializationError { .. })
        )
    }

    pub fn status_code(&self) -> StatusCode {
        if self.is_fetch_failure() {
            return StatusCode::SERVICE_UNAVAILABLE;
        }
        match self {
            Self::StaticFileNotFound { .. } | Self::UnknownState { .. } => StatusCode::NOT_FOUND,
            Self::AccessDenied { .. } => StatusCode::FORBIDDEN,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let status = if self.is_fetch_failure() { "no_data" } else { "error" };
        let body = json!({
            "status": status,
            "error": self.to_string(),
        });
        (self.status_code(), Json(body)).into_response()
    }
}

pub type DashboardResult<T> = Result<T, DashboardError>;
