//! hmac-auth store - account collaborators
//!
//! Storage is owned by the hosting application. This crate defines the two
//! narrow interfaces the authentication core calls into, plus an in-memory
//! implementation for tests, tools and single-process deployments.
//!
//! # Example
//!
//! ```rust,ignore
//! use hmac_auth_store::{AccountLookup, MemoryAccountStore};
//! use hmac_auth_types::Account;
//!
//! let store = MemoryAccountStore::new();
//! store.insert(Account::new("alice", "DefaultProvider"));
//!
//! let account = store.find_active_account("alice", "DefaultProvider").await?;
//! ```

pub mod error;
pub mod memory;
pub mod repo;

pub use error::{StoreError, StoreResult};
pub use memory::MemoryAccountStore;
pub use repo::*;
