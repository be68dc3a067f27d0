//! Collaborator traits
//!
//! Define the async interfaces the authentication core uses to find and
//! persist accounts.

use async_trait::async_trait;
use hmac_auth_types::Account;

use crate::error::StoreResult;

/// Account lookup used during authentication.
///
/// Implementations perform an elevated lookup: the caller is part of the
/// authorization pipeline, so no authorization checks may apply here.
#[async_trait]
pub trait AccountLookup: Send + Sync {
    /// Find an active account by identifier within one provider
    async fn find_active_account(
        &self,
        identifier: &str,
        provider_name: &str,
    ) -> StoreResult<Option<Account>>;
}

/// Account persistence used after an attempt was recorded
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Persist the mutable attempt-tracking state of an account
    async fn update(&self, account: &Account) -> StoreResult<()>;
}
