//! Error types for catalog operations

use thiserror::Error;

use crate::TemplateId;

/// Errors returned by [`TemplateStore`](crate::TemplateStore) mutations
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A required field was missing on add
    #[error("Validation error: {0}")]
    Validation(String),

    /// The target template does not exist
    #[error("Template not found: {0}")]
    NotFound(TemplateId),

    /// Snapshot input was not a sequence of field maps
    #[error("Import error: {0}")]
    Import(String),
}

/// Result type for catalog operations
pub type Result<T> = std::result::Result<T, CatalogError>;
