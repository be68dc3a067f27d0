//! Cryptographic utilities for token signing
//!
//! This module provides the security-critical primitives behind token
//! signatures. MAC comparison must not leak how many leading bytes matched.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::sync::Arc;
use subtle::ConstantTimeEq;

/// Pre-validated HMAC-SHA256 signing key.
///
/// The key is validated once at startup; signing and verifying never fail
/// afterwards. Cloning shares the key bytes.
#[derive(Clone)]
pub struct HmacKey {
    key_bytes: Arc<[u8]>,
}

impl HmacKey {
    /// Minimum allowed key length in bytes (256 bits)
    pub const MIN_KEY_LENGTH: usize = 32;

    /// Create a new HMAC key from bytes.
    ///
    /// # Errors
    /// Returns error if the key is empty or shorter than 32 bytes.
    pub fn new(key: impl AsRef<[u8]>) -> Result<Self, HmacKeyError> {
        let key_bytes = key.as_ref();
        if key_bytes.is_empty() {
            return Err(HmacKeyError::Empty);
        }
        if key_bytes.len() < Self::MIN_KEY_LENGTH {
            return Err(HmacKeyError::KeyTooShort {
                actual: key_bytes.len(),
                minimum: Self::MIN_KEY_LENGTH,
            });
        }
        Ok(Self {
            key_bytes: Arc::from(key_bytes),
        })
    }

    fn mac_bytes(&self, data: &[u8]) -> [u8; 32] {
        // HMAC accepts keys of any length; new() only enforces our policy
        let mut mac = <Hmac<Sha256> as Mac>::new_from_slice(&self.key_bytes)
            .unwrap_or_else(|_| unreachable!("HMAC-SHA256 accepts any key length"));
        mac.update(data);
        mac.finalize().into_bytes().into()
    }

    /// Sign data and return the MAC as lowercase hex
    pub fn sign(&self, data: &[u8]) -> String {
        hex::encode(self.mac_bytes(data))
    }

    /// Verify a hex MAC in constant time with respect to its content
    pub fn verify(&self, data: &[u8], mac: &str) -> bool {
        let expected = self.sign(data);
        constant_time_str_eq(&expected, mac)
    }
}

impl std::fmt::Debug for HmacKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HmacKey")
            .field("key_length", &self.key_bytes.len())
            .finish_non_exhaustive()
    }
}

/// Errors that can occur when creating an HMAC key
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HmacKeyError {
    #[error("HMAC key is empty")]
    Empty,

    #[error("HMAC key too short: got {actual} bytes, need at least {minimum}")]
    KeyTooShort { actual: usize, minimum: usize },
}

/// Constant-time byte slice comparison.
///
/// Length is not secret: slices of different length compare unequal
/// immediately. Equal-length slices are compared in full.
#[inline]
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

/// Constant-time string comparison.
#[inline]
pub fn constant_time_str_eq(a: &str, b: &str) -> bool {
    constant_time_eq(a.as_bytes(), b.as_bytes())
}
