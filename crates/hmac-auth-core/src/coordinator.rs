//! Authentication state machine
//!
//! Turns raw credentials into exactly one of three outcomes. The MAC/expiry
//! check runs once per attempt whether or not the claimed account exists, so
//! response timing does not reveal account existence.

use hmac_auth_store::{AccountLookup, AccountRepository};
use hmac_auth_types::{Account, AttemptStatus};
use std::sync::Arc;
use std::time::Duration;

use crate::alias::ProviderAliasResolver;
use crate::clock::{Clock, SystemClock};
use crate::codec::TokenCodec;
use crate::config::{AttemptTracking, AuthConfig};
use crate::credentials::Credentials;
use crate::token::Token;
use crate::token_service::{TokenService, TokenVerifier};
use crate::AuthError;

/// Result of one authentication attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthenticationOutcome {
    /// Token was valid for an active account
    Success(Account),
    /// Token material was present but did not prove identity
    WrongCredentials,
    /// No token material was supplied
    NoCredentialsGiven,
}

impl AuthenticationOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Authenticated account, if any
    pub fn account(&self) -> Option<&Account> {
        match self {
            Self::Success(account) => Some(account),
            _ => None,
        }
    }
}

/// Coordinator settings taken from `AuthConfig`
#[derive(Debug, Clone)]
pub struct CoordinatorOptions {
    pub default_provider_name: String,
    pub max_age: Duration,
    pub attempt_tracking: AttemptTracking,
}

impl From<&AuthConfig> for CoordinatorOptions {
    fn from(config: &AuthConfig) -> Self {
        Self {
            default_provider_name: config.default_provider_name.clone(),
            max_age: config.max_age,
            attempt_tracking: config.attempt_tracking,
        }
    }
}

/// Authenticates callers presenting signed tokens
pub struct AuthenticationCoordinator<L, R, V = TokenService>
where
    L: AccountLookup,
    R: AccountRepository,
    V: TokenVerifier,
{
    verifier: Arc<V>,
    resolver: Arc<ProviderAliasResolver>,
    lookup: Arc<L>,
    repository: Arc<R>,
    clock: Arc<dyn Clock>,
    options: CoordinatorOptions,
}

impl<L, R, V> AuthenticationCoordinator<L, R, V>
where
    L: AccountLookup,
    R: AccountRepository,
    V: TokenVerifier,
{
    /// Create a coordinator using the system clock
    pub fn new(
        verifier: Arc<V>,
        resolver: Arc<ProviderAliasResolver>,
        lookup: Arc<L>,
        repository: Arc<R>,
        options: CoordinatorOptions,
    ) -> Self {
        Self {
            verifier,
            resolver,
            lookup,
            repository,
            clock: Arc::new(SystemClock),
            options,
        }
    }

    /// Use a custom clock
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn options(&self) -> &CoordinatorOptions {
        &self.options
    }

    /// Run one authentication attempt
    pub async fn authenticate(&self, credentials: &Credentials) -> AuthenticationOutcome {
        let Some(material) = credentials.auth_token() else {
            return AuthenticationOutcome::NoCredentialsGiven;
        };

        // Undecodable input is indistinguishable from a bad signature
        let Ok(token) = TokenCodec::decode(material) else {
            tracing::debug!("Rejecting undecodable token");
            return AuthenticationOutcome::WrongCredentials;
        };

        let now = self.clock.now();
        let provider_name = self.provider_name_for(&token);

        let lookup = match token.username() {
            Some(identifier) => self.lookup.find_active_account(identifier, provider_name).await,
            None => Ok(None),
        };

        // Always verify, even when the lookup missed or failed
        let valid = self.verifier.verify(&token, now, self.options.max_age);

        let account = match lookup {
            Ok(Some(account)) => account,
            Ok(None) => {
                tracing::debug!(provider = provider_name, "No active account for token");
                return AuthenticationOutcome::WrongCredentials;
            }
            Err(e) => {
                tracing::warn!(provider = provider_name, "Account lookup failed: {}", e);
                return AuthenticationOutcome::WrongCredentials;
            }
        };

        match self.conclude(account, valid).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::warn!("Authentication attempt aborted: {}", e);
                AuthenticationOutcome::WrongCredentials
            }
        }
    }

    /// Provider named by the token's alias, else the configured default
    fn provider_name_for<'a>(&'a self, token: &'a Token) -> &'a str {
        token
            .provider_alias()
            .and_then(|alias| self.resolver.resolve_alias_to_name(alias))
            .unwrap_or(self.options.default_provider_name.as_str())
    }

    /// Record the attempt on a found account and persist it
    async fn conclude(
        &self,
        mut account: Account,
        valid: bool,
    ) -> Result<AuthenticationOutcome, AuthError> {
        let tracking = self.options.attempt_tracking;
        let (status, record) = if valid {
            (AttemptStatus::Successful, tracking.tracks_success())
        } else {
            (AttemptStatus::WrongCredentials, tracking.tracks_failure())
        };

        if record {
            account.record_attempt(status, self.clock.now_utc());
        }
        self.repository.update(&account).await?;

        if valid {
            tracing::debug!(account_id = %account.id, "Token authentication succeeded");
            Ok(AuthenticationOutcome::Success(account))
        } else {
            tracing::debug!(account_id = %account.id, "Token rejected for existing account");
            Ok(AuthenticationOutcome::WrongCredentials)
        }
    }
}

impl<L, R, V> std::fmt::Debug for AuthenticationCoordinator<L, R, V>
where
    L: AccountLookup,
    R: AccountRepository,
    V: TokenVerifier,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthenticationCoordinator")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
