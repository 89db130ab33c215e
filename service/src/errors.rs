//! Error types for the upgrade mock service

use std::time::Duration;

use thiserror::Error;

/// Main error type for the service
#[derive(Error, Debug)]
pub enum MockError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<anyhow::Error> for MockError {
    fn from(err: anyhow::Error) -> Self {
        MockError::Internal(err.to_string())
    }
}

/// Failure of a single write to the log store.
///
/// Only ever observed by the recorder, which logs and drops it.
#[derive(Error, Debug)]
pub enum SinkError {
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("no response within {0:?}")]
    Timeout(Duration),

    #[error("serialization failure: {0}")]
    Serialize(#[from] serde_json::Error),
}
