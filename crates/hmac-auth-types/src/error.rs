//! Common error types

use thiserror::Error;

/// Errors raised while parsing shared types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TypesError {
    /// Unknown attempt status string
    #[error("invalid attempt status: {0}")]
    InvalidAttemptStatus(String),
}
