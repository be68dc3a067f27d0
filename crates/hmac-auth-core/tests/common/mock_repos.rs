//! Mock account collaborators for testing

use async_trait::async_trait;
use dashmap::DashMap;
use hmac_auth_store::{AccountLookup, AccountRepository, StoreError, StoreResult};
use hmac_auth_types::{Account, AccountId};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

/// In-memory account store with call counters and failure injection
#[derive(Default, Clone)]
pub struct MockAccountStore {
    accounts: Arc<DashMap<AccountId, Account>>,
    lookups: Arc<AtomicUsize>,
    updates: Arc<AtomicUsize>,
    fail_lookups: Arc<AtomicBool>,
    fail_updates: Arc<AtomicBool>,
}

#[allow(dead_code)]
impl MockAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a test account directly
    pub fn insert_account(&self, account: Account) -> AccountId {
        let id = account.id;
        self.accounts.insert(id, account);
        id
    }

    pub fn get(&self, id: AccountId) -> Option<Account> {
        self.accounts.get(&id).map(|r| r.value().clone())
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    pub fn updates(&self) -> usize {
        self.updates.load(Ordering::SeqCst)
    }

    pub fn fail_lookups(&self, fail: bool) {
        self.fail_lookups.store(fail, Ordering::SeqCst);
    }

    pub fn fail_updates(&self, fail: bool) {
        self.fail_updates.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl AccountLookup for MockAccountStore {
    async fn find_active_account(
        &self,
        identifier: &str,
        provider_name: &str,
    ) -> StoreResult<Option<Account>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        if self.fail_lookups.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("lookup unavailable".to_string()));
        }
        Ok(self
            .accounts
            .iter()
            .find(|r| {
                let a = r.value();
                a.active && a.identifier == identifier && a.provider_name == provider_name
            })
            .map(|r| r.value().clone()))
    }
}

#[async_trait]
impl AccountRepository for MockAccountStore {
    async fn update(&self, account: &Account) -> StoreResult<()> {
        self.updates.fetch_add(1, Ordering::SeqCst);
        if self.fail_updates.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("update unavailable".to_string()));
        }
        self.accounts.insert(account.id, account.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_store_counts_and_fails() {
        let store = MockAccountStore::new();
        store.insert_account(Account::new("alice", "Foo"));

        assert!(store.find_active_account("alice", "Foo").await.unwrap().is_some());
        assert_eq!(store.lookups(), 1);

        store.fail_lookups(true);
        assert!(store.find_active_account("alice", "Foo").await.is_err());

        store.fail_updates(true);
        assert!(store.update(&Account::new("bob", "Foo")).await.is_err());
        assert_eq!(store.updates(), 1);
    }
}
