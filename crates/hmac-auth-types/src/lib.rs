//! hmac-auth types - shared domain types
//!
//! This crate contains the account model the authentication core reads and
//! mutates through its storage collaborators:
//! - Account identity and provider binding
//! - Authentication attempt bookkeeping

pub mod account;
pub mod error;

pub use account::*;
pub use error::*;
