//! Signed token model and canonical serialization

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::crypto::HmacKey;
use crate::AuthError;

/// Payload key carrying the claimed account identifier
pub const PAYLOAD_USERNAME: &str = "username";
/// Payload key carrying the public provider alias
pub const PAYLOAD_PROVIDER_ALIAS: &str = "authenticationProviderAlias";

/// Signed `(payload, issued_at, mac)` proof of an account identifier.
///
/// The payload is kept in a `BTreeMap` so its JSON form is already
/// key-sorted; that JSON is the canonical byte string the MAC covers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    payload: BTreeMap<String, String>,
    issued_at: i64,
    mac: String,
}

impl Token {
    /// Create an unsigned token issued at `issued_at` (Unix seconds)
    pub fn new(issued_at: i64) -> Self {
        Self {
            payload: BTreeMap::new(),
            issued_at,
            mac: String::new(),
        }
    }

    /// Rebuild a token from its transported parts
    pub fn from_parts(payload: BTreeMap<String, String>, issued_at: i64, mac: impl Into<String>) -> Self {
        Self {
            payload,
            issued_at,
            mac: mac.into(),
        }
    }

    pub fn issued_at(&self) -> i64 {
        self.issued_at
    }

    pub fn mac(&self) -> &str {
        &self.mac
    }

    pub fn payload(&self) -> &BTreeMap<String, String> {
        &self.payload
    }

    /// A token without a MAC is never proof of identity
    pub fn is_signed(&self) -> bool {
        !self.mac.is_empty()
    }

    pub fn has_payload_entry(&self, key: &str) -> bool {
        self.payload.contains_key(key)
    }

    /// Get a payload entry.
    ///
    /// # Errors
    /// Returns `MissingPayloadEntry` if the key is absent.
    pub fn payload_entry(&self, key: &str) -> Result<&str, AuthError> {
        self.payload
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| AuthError::MissingPayloadEntry(key.to_string()))
    }

    /// Set a payload entry. Changing the payload invalidates any existing MAC.
    pub fn set_payload_entry(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.payload.insert(key.into(), value.into());
    }

    /// Claimed account identifier
    pub fn username(&self) -> Option<&str> {
        self.payload.get(PAYLOAD_USERNAME).map(String::as_str)
    }

    /// Public provider alias, if the issuer bound one
    pub fn provider_alias(&self) -> Option<&str> {
        self.payload.get(PAYLOAD_PROVIDER_ALIAS).map(String::as_str)
    }

    /// Deterministic JSON encoding of the payload (keys sorted)
    pub fn canonical_payload(&self) -> Vec<u8> {
        // A string-to-string map always serializes
        serde_json::to_vec(&self.payload).unwrap_or_default()
    }

    /// Bytes covered by the MAC: `canonical_payload | issued_at`
    pub fn signed_message(&self) -> Vec<u8> {
        let mut message = self.canonical_payload();
        message.push(b'|');
        message.extend_from_slice(self.issued_at.to_string().as_bytes());
        message
    }

    /// Compute and attach the MAC over the final payload and timestamp
    pub fn sign(&mut self, key: &HmacKey) {
        self.mac = key.sign(&self.signed_message());
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "username: {:?}, provider alias: {:?}, issued at: {}, mac: ***",
            self.username().unwrap_or_default(),
            self.provider_alias(),
            self.issued_at
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_key() -> HmacKey {
        HmacKey::new("k".repeat(32)).unwrap()
    }

    #[test]
    fn test_canonical_payload_ignores_insertion_order() {
        let mut a = Token::new(1000);
        a.set_payload_entry("username", "alice");
        a.set_payload_entry("authenticationProviderAlias", "a");

        let mut b = Token::new(1000);
        b.set_payload_entry("authenticationProviderAlias", "a");
        b.set_payload_entry("username", "alice");

        assert_eq!(a.canonical_payload(), b.canonical_payload());
        assert_eq!(
            String::from_utf8(a.canonical_payload()).unwrap(),
            r#"{"authenticationProviderAlias":"a","username":"alice"}"#
        );
    }

    #[test]
    fn test_signed_message_format() {
        let mut token = Token::new(1000);
        token.set_payload_entry("username", "alice");
        assert_eq!(token.signed_message(), br#"{"username":"alice"}|1000"#.to_vec());
    }

    #[test]
    fn test_negative_timestamp_in_signed_message() {
        let token = Token::new(-5);
        assert_eq!(token.signed_message(), b"{}|-5".to_vec());
    }

    #[test]
    fn test_payload_entry_accessors() {
        let mut token = Token::new(0);
        assert!(!token.has_payload_entry("username"));
        assert!(matches!(
            token.payload_entry("username"),
            Err(AuthError::MissingPayloadEntry(ref k)) if k == "username"
        ));

        token.set_payload_entry("username", "alice");
        assert!(token.has_payload_entry("username"));
        assert_eq!(token.payload_entry("username").unwrap(), "alice");
        assert_eq!(token.username(), Some("alice"));
        assert_eq!(token.provider_alias(), None);
    }

    #[test]
    fn test_unsigned_until_signed() {
        let mut token = Token::new(1000);
        token.set_payload_entry("username", "alice");
        assert!(!token.is_signed());

        token.sign(&test_key());
        assert!(token.is_signed());
        assert!(test_key().verify(&token.signed_message(), token.mac()));
    }

    #[test]
    fn test_payload_change_invalidates_mac() {
        let key = test_key();
        let mut token = Token::new(1000);
        token.set_payload_entry("username", "alice");
        token.sign(&key);

        token.set_payload_entry("username", "mallory");
        assert!(!key.verify(&token.signed_message(), token.mac()));
    }

    #[test]
    fn test_display_redacts_mac() {
        let mut token = Token::new(1000);
        token.set_payload_entry("username", "alice");
        token.sign(&test_key());

        let shown = token.to_string();
        assert!(shown.contains("alice"));
        assert!(shown.contains("mac: ***"));
        assert!(!shown.contains(token.mac()));
    }
}
