//! Shared error types for the dashboard workspace

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SharedError {
    #[error("Invalid state code: {input}")]
    InvalidStateCode { input: String },

    #[error("Invalid configuration: {field} = {value}")]
    InvalidConfig { field: String, value: String },

    #[error("Deserialization failed: {message}")]
    DeserializationError { message: String },

    #[error("Unexpected device snapshot shape: expected object, array or null, got {found}")]
    UnexpectedSnapshotShape { found: String },
}

impl SharedError {
    pub fn invalid_config(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field: field.into(),
            value: value.into(),
        }
    }
}

impl From<serde_json::Error> for SharedError {
    fn from(err: serde_json::Error) -> Self {
        Self::DeserializationError {
            message: err.to_string(),
        }
    }
}

pub type SharedResult<T> = Result<T, SharedError>;
