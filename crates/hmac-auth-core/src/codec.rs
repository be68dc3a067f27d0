//! Transport encoding for tokens
//!
//! A token travels as base64url (no padding) of its JSON form, so it can sit
//! in a query parameter or hidden form field without further escaping.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};

use crate::token::Token;
use crate::AuthError;

/// Encodes tokens to transport strings and back. Knows nothing of validity.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenCodec;

impl TokenCodec {
    /// Encode a token to its transport string
    pub fn encode(token: &Token) -> Result<String, AuthError> {
        let json = serde_json::to_vec(token).map_err(|e| {
            tracing::error!("Failed to serialize token: {}", e);
            AuthError::MalformedToken
        })?;
        Ok(URL_SAFE_NO_PAD.encode(json))
    }

    /// Decode a transport string.
    ///
    /// # Errors
    /// Returns `MalformedToken` on bad base64, bad JSON, or a missing
    /// `payload`, `issuedAt` or `mac` field.
    pub fn decode(transport: &str) -> Result<Token, AuthError> {
        let json = URL_SAFE_NO_PAD
            .decode(transport.trim())
            .map_err(|_| AuthError::MalformedToken)?;
        serde_json::from_slice(&json).map_err(|_| AuthError::MalformedToken)
    }
}
