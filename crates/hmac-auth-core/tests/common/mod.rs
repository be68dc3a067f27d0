//! Common test utilities for hmac-auth-core integration tests

pub mod counting_verifier;
pub mod mock_repos;

#[allow(unused_imports)]
pub use counting_verifier::CountingVerifier;
#[allow(unused_imports)]
pub use mock_repos::MockAccountStore;

/// Signing key shared by integration tests
#[allow(dead_code)]
pub const TEST_KEY: &str = "integration-test-signing-key-0123456789";
