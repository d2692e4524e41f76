//! Store error types

use std::path::PathBuf;

use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised by the product store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// SQLite error
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Failed to open database with context
    #[error("Failed to open database at '{path}': {source}")]
    DatabaseOpen {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Database file not found
    #[error("Database not found at: {0}")]
    DatabaseNotFound(PathBuf),

    /// Another product already uses this SKU
    #[error("Duplicate SKU: {0}")]
    DuplicateSku(String),

    /// Another product already uses this id
    #[error("Duplicate product id: {0}")]
    DuplicateId(String),

    /// No product with this id
    #[error("Product not found: {0}")]
    NotFound(String),
}
