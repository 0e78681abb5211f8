use thiserror::Error;

use common::error::Error as CircuitError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Configuration error: {0}")]
    ConfigLoadError(String),

    #[error("Season record #{index} is invalid: {reason}")]
    InvalidRecord { index: usize, reason: String },

    #[error("Graph processing error: {0}")]
    GraphError(#[from] CircuitError),

    #[error("Search task failed: {0}")]
    TaskFailed(#[from] tokio::task::JoinError),

    #[error("Failed to render report: {0}")]
    ReportError(#[from] serde_json::Error),
}
