//! In-memory account store

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use hmac_auth_types::{Account, AccountId};
use std::sync::Arc;

use crate::error::{StoreError, StoreResult};
use crate::repo::{AccountLookup, AccountRepository};

/// In-memory account store keyed by `(provider_name, identifier)`
#[derive(Default, Clone)]
pub struct MemoryAccountStore {
    accounts: Arc<DashMap<AccountId, Account>>,
    by_identity: Arc<DashMap<(String, String), AccountId>>,
}

impl MemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an account, replacing any account with the same identity
    pub fn insert(&self, account: Account) {
        let key = (account.provider_name.clone(), account.identifier.clone());
        if let Some(previous) = self.by_identity.insert(key, account.id) {
            if previous != account.id {
                self.accounts.remove(&previous);
            }
        }
        self.accounts.insert(account.id, account);
    }

    /// Get an account by storage ID
    pub fn get(&self, id: AccountId) -> Option<Account> {
        self.accounts.get(&id).map(|r| r.value().clone())
    }

    /// Number of stored accounts
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

#[async_trait]
impl AccountLookup for MemoryAccountStore {
    async fn find_active_account(
        &self,
        identifier: &str,
        provider_name: &str,
    ) -> StoreResult<Option<Account>> {
        let key = (provider_name.to_string(), identifier.to_string());
        let now = Utc::now();
        Ok(self
            .by_identity
            .get(&key)
            .and_then(|id| self.accounts.get(id.value()).map(|r| r.value().clone()))
            .filter(|account| account.is_active_at(now)))
    }
}

#[async_trait]
impl AccountRepository for MemoryAccountStore {
    async fn update(&self, account: &Account) -> StoreResult<()> {
        match self.accounts.get_mut(&account.id) {
            Some(mut stored) => {
                *stored = account.clone();
                Ok(())
            }
            None => {
                tracing::warn!(account_id = %account.id, "Update for unknown account");
                Err(StoreError::NotFound)
            }
        }
    }
}
