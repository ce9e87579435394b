//! Error types for spreadsheet sync and settings

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The spreadsheet client reported a failure
    #[error("Spreadsheet error: {0}")]
    Client(String),

    /// No spreadsheet is configured
    #[error("Spreadsheet not configured: {0}")]
    NotConfigured(String),

    #[error(transparent)]
    Catalog(#[from] catalog::CatalogError),
}

pub type Result<T> = std::result::Result<T, SyncError>;
