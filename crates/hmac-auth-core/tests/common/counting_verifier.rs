//! Token verifier that counts how often it is consulted

use hmac_auth_core::{Token, TokenService, TokenVerifier};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Wraps a real `TokenService` and counts `verify` calls
#[derive(Clone)]
pub struct CountingVerifier {
    inner: Arc<TokenService>,
    calls: Arc<AtomicUsize>,
}

impl CountingVerifier {
    pub fn new(inner: Arc<TokenService>) -> Self {
        Self {
            inner,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    #[allow(dead_code)]
    pub fn reset(&self) {
        self.calls.store(0, Ordering::SeqCst);
    }
}

impl TokenVerifier for CountingVerifier {
    fn verify(&self, token: &Token, now: i64, max_age: Duration) -> bool {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.verify(token, now, max_age)
    }
}
