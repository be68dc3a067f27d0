//! Auth service - ties together token issuance, verification and the
//! authentication coordinator

use hmac_auth_store::{AccountLookup, AccountRepository};
use std::sync::Arc;

use crate::{
    alias::ProviderAliasResolver,
    clock::{Clock, SystemClock},
    config::AuthConfig,
    coordinator::{AuthenticationCoordinator, AuthenticationOutcome, CoordinatorOptions},
    credentials::{self, Credentials},
    crypto::HmacKey,
    token::Token,
    token_service::TokenService,
    AuthError,
};

/// Token authentication service
///
/// Provides a unified interface for:
/// - Token issuance (for links, form fields and server-to-server calls)
/// - Token verification
/// - Authenticating callers against the account store
pub struct HmacAuthService<L: AccountLookup, R: AccountRepository> {
    config: AuthConfig,
    tokens: Arc<TokenService>,
    coordinator: AuthenticationCoordinator<L, R>,
}

impl<L: AccountLookup, R: AccountRepository> HmacAuthService<L, R> {
    /// Create a new auth service using the system clock.
    ///
    /// # Errors
    /// Returns `Configuration` if the signing key or alias table is invalid.
    pub fn new(config: AuthConfig, lookup: Arc<L>, repository: Arc<R>) -> Result<Self, AuthError> {
        Self::with_clock(config, lookup, repository, Arc::new(SystemClock))
    }

    /// Create a new auth service with a custom clock
    pub fn with_clock(
        config: AuthConfig,
        lookup: Arc<L>,
        repository: Arc<R>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, AuthError> {
        config.validate()?;

        let key = HmacKey::new(&config.signing_key)?;
        let resolver = Arc::new(ProviderAliasResolver::new(
            config.provider_aliases.iter().cloned(),
        )?);
        let tokens = Arc::new(
            TokenService::new(key, Arc::clone(&resolver))
                .with_clock(Arc::clone(&clock))
                .with_max_age(config.max_age),
        );
        let coordinator = AuthenticationCoordinator::new(
            Arc::clone(&tokens),
            resolver,
            lookup,
            repository,
            CoordinatorOptions::from(&config),
        )
        .with_clock(clock);

        tracing::info!(
            aliases = config.provider_aliases.len(),
            max_age_secs = config.max_age.as_secs(),
            "Token authentication configured"
        );

        Ok(Self {
            config,
            tokens,
            coordinator,
        })
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    pub fn token_service(&self) -> &TokenService {
        &self.tokens
    }

    // =========================================================================
    // Issuance
    // =========================================================================

    /// Issue a token for an account, optionally bound to a provider alias
    pub fn issue(&self, account_identifier: &str, provider_alias: Option<&str>) -> Result<String, AuthError> {
        self.tokens.issue(account_identifier, provider_alias)
    }

    /// Issue a token for an account of an internal provider
    pub fn issue_for_provider(
        &self,
        account_identifier: &str,
        provider_name: Option<&str>,
    ) -> Result<String, AuthError> {
        self.tokens.issue_for_provider(account_identifier, provider_name)
    }

    /// Query string part (`name=value`) authenticating as the account
    pub fn query_string_part(&self, account_identifier: &str) -> Result<String, AuthError> {
        let token = self.issue(account_identifier, None)?;
        Ok(credentials::query_string_part(&token))
    }

    /// Append an authentication parameter for the account to `uri`
    pub fn authenticated_uri(&self, uri: &str, account_identifier: &str) -> Result<String, AuthError> {
        let token = self.issue(account_identifier, None)?;
        Ok(credentials::append_to_uri(uri, &token))
    }

    // =========================================================================
    // Verification
    // =========================================================================

    /// Decode and verify a transport string without touching accounts
    pub fn decode_and_verify(&self, transport: &str) -> Result<Token, AuthError> {
        self.tokens.decode_and_verify(transport)
    }

    /// Authenticate a caller
    pub async fn authenticate(&self, credentials: &Credentials) -> AuthenticationOutcome {
        self.coordinator.authenticate(credentials).await
    }
}

impl<L: AccountLookup, R: AccountRepository> std::fmt::Debug for HmacAuthService<L, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HmacAuthService")
            .field("config", &self.config)
            .finish()
    }
}
