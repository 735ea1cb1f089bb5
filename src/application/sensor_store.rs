// Store trait for sensor readings and device settings
use crate::domain::series::RawEntry;
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RetrievalError {
    #[error("request to store failed: {0}")]
    Request(String),
    #[error("store rejected request with status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("unexpected store response: {0}")]
    Body(String),
    #[error("store did not answer within {0:?}")]
    Timeout(Duration),
    #[error("fetch task aborted: {0}")]
    Join(String),
}

#[derive(Debug, Error)]
pub enum WriteError {
    #[error("write to store failed: {0}")]
    Request(String),
    #[error("store rejected write with status {status}: {body}")]
    Status { status: u16, body: String },
}

#[async_trait]
pub trait SensorStore: Send + Sync {
    /// Last `n` entries under `path`, oldest first.
    async fn get_last_n(&self, path: &str, n: usize) -> Result<Vec<RawEntry>, RetrievalError>;

    /// Overwrite the value at `path`.
    async fn set(&self, path: &str, value: Value) -> Result<(), WriteError>;
}
