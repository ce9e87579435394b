//! Error types for snapshot encoding and file exchange

use thiserror::Error;

/// Errors that can occur while reading or writing snapshots
#[derive(Debug, Error)]
pub enum ExchangeError {
    /// IO error reading/writing files
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error reading or writing CSV data
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Error parsing or writing JSON data
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Decoded data was not a valid snapshot
    #[error(transparent)]
    Catalog(#[from] catalog::CatalogError),

    /// CSV delimiters must be a single ASCII character
    #[error("Invalid CSV delimiter: {0:?}")]
    InvalidDelimiter(char),

    /// Unsupported file format
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),
}

/// Result type for exchange operations
pub type Result<T> = std::result::Result<T, ExchangeError>;
