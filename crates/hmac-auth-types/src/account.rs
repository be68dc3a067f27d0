//! Account types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::TypesError;

/// Unique account identifier (storage key, never exposed in tokens)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountId(pub Uuid);

impl AccountId {
    /// Create a new random account ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an account ID from a string
    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl Default for AccountId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for AccountId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

/// Result of a single authentication attempt, as recorded on the account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttemptStatus {
    /// Proof was valid
    Successful,
    /// Proof was present but rejected
    WrongCredentials,
}

impl std::fmt::Display for AttemptStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Successful => write!(f, "successful"),
            Self::WrongCredentials => write!(f, "wrong_credentials"),
        }
    }
}

impl std::str::FromStr for AttemptStatus {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "successful" | "success" => Ok(Self::Successful),
            "wrong_credentials" | "failed" => Ok(Self::WrongCredentials),
            _ => Err(TypesError::InvalidAttemptStatus(s.to_string())),
        }
    }
}

/// An account that can be authenticated with a signed token.
///
/// Accounts are scoped to an authentication provider: the same identifier may
/// exist once per provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    /// Public account identifier (carried in tokens as `username`)
    pub identifier: String,
    /// Internal name of the provider this account belongs to
    pub provider_name: String,
    pub active: bool,
    /// Consecutive failed attempts since the last success
    pub failed_attempts: u32,
    pub last_attempt_at: Option<DateTime<Utc>>,
    pub last_successful_at: Option<DateTime<Utc>>,
    /// Accounts past their expiration date are never active
    pub expires_at: Option<DateTime<Utc>>,
}

impl Account {
    /// Create a new active account
    pub fn new(identifier: impl Into<String>, provider_name: impl Into<String>) -> Self {
        Self {
            id: AccountId::new(),
            identifier: identifier.into(),
            provider_name: provider_name.into(),
            active: true,
            failed_attempts: 0,
            last_attempt_at: None,
            last_successful_at: None,
            expires_at: None,
        }
    }

    /// Set an expiration date
    pub fn with_expires_at(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    /// Check whether the account can be authenticated at `now`
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        self.active && self.expires_at.map_or(true, |expires| expires > now)
    }

    /// Record an authentication attempt.
    ///
    /// A successful attempt clears the failure counter.
    pub fn record_attempt(&mut self, status: AttemptStatus, at: DateTime<Utc>) {
        self.last_attempt_at = Some(at);
        match status {
            AttemptStatus::Successful => {
                self.failed_attempts = 0;
                self.last_successful_at = Some(at);
            }
            AttemptStatus::WrongCredentials => {
                self.failed_attempts = self.failed_attempts.saturating_add(1);
            }
        }
    }
}
