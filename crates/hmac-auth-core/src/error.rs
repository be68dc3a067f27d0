//! Auth errors

use thiserror::Error;

use crate::crypto::HmacKeyError;

/// Authentication errors
#[derive(Error, Debug)]
pub enum AuthError {
    /// Missing or invalid signing key, alias table or other startup setting
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Transport string is not a structurally valid token
    #[error("malformed token")]
    MalformedToken,

    /// Token issuance requested for an empty account identifier
    #[error("account identifier is empty")]
    EmptyIdentifier,

    /// Token payload lacks a required entry
    #[error("missing payload entry: {0}")]
    MissingPayloadEntry(String),

    /// Token failed verification (expired, bad signature or undecodable)
    #[error("invalid token")]
    InvalidToken,

    /// Account lookup or persistence failed
    #[error("collaborator error: {0}")]
    Collaborator(String),
}

impl AuthError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::MalformedToken | Self::InvalidToken => 401,
            Self::EmptyIdentifier | Self::MissingPayloadEntry(_) => 400,
            Self::Collaborator(_) => 503,
            Self::Configuration(_) => 500,
        }
    }

    /// Get error code for API responses
    ///
    /// Verification failures share one code so callers cannot tell which
    /// check rejected the token.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MalformedToken | Self::InvalidToken => "INVALID_TOKEN",
            Self::EmptyIdentifier => "EMPTY_IDENTIFIER",
            Self::MissingPayloadEntry(_) => "MISSING_PAYLOAD_ENTRY",
            Self::Collaborator(_) => "COLLABORATOR_ERROR",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
        }
    }
}

impl From<HmacKeyError> for AuthError {
    fn from(err: HmacKeyError) -> Self {
        Self::Configuration(err.to_string())
    }
}

impl From<hmac_auth_store::StoreError> for AuthError {
    fn from(err: hmac_auth_store::StoreError) -> Self {
        tracing::error!("Account store error: {}", err);
        Self::Collaborator(err.to_string())
    }
}
