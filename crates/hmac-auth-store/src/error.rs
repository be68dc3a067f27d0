//! Store errors

use thiserror::Error;

/// Errors surfaced by account collaborators
#[derive(Error, Debug)]
pub enum StoreError {
    /// Record not found
    #[error("record not found")]
    NotFound,

    /// Backend failure (connection, query, serialization)
    #[error("store backend error: {0}")]
    Backend(String),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;
