//! Token issuance and verification

use std::sync::Arc;
use std::time::Duration;

use crate::alias::ProviderAliasResolver;
use crate::clock::{Clock, SystemClock};
use crate::codec::TokenCodec;
use crate::config::{AuthConfig, DEFAULT_MAX_AGE};
use crate::crypto::HmacKey;
use crate::token::{Token, PAYLOAD_PROVIDER_ALIAS, PAYLOAD_USERNAME};
use crate::AuthError;

/// Expiry and MAC check used by the authentication coordinator
pub trait TokenVerifier: Send + Sync {
    /// True if the token is within `max_age` of `now` and its MAC is valid
    fn verify(&self, token: &Token, now: i64, max_age: Duration) -> bool;
}

/// Issues signed transport strings and verifies decoded tokens.
///
/// Holds only startup configuration, so one instance can be shared across
/// any number of concurrent requests.
#[derive(Clone)]
pub struct TokenService {
    key: HmacKey,
    resolver: Arc<ProviderAliasResolver>,
    clock: Arc<dyn Clock>,
    max_age: Duration,
}

impl TokenService {
    /// Create a token service using the system clock and default max age
    pub fn new(key: HmacKey, resolver: Arc<ProviderAliasResolver>) -> Self {
        Self {
            key,
            resolver,
            clock: Arc::new(SystemClock),
            max_age: DEFAULT_MAX_AGE,
        }
    }

    /// Build key and alias table from configuration
    pub fn from_config(config: &AuthConfig) -> Result<Self, AuthError> {
        let key = HmacKey::new(&config.signing_key)?;
        let resolver = ProviderAliasResolver::new(config.provider_aliases.iter().cloned())?;
        Ok(Self::new(key, Arc::new(resolver)).with_max_age(config.max_age))
    }

    /// Use a custom clock
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Set the max age used by `decode_and_verify`
    pub fn with_max_age(mut self, max_age: Duration) -> Self {
        self.max_age = max_age;
        self
    }

    pub fn max_age(&self) -> Duration {
        self.max_age
    }

    pub fn resolver(&self) -> &ProviderAliasResolver {
        &self.resolver
    }

    /// Issue a transport string for `account_identifier` at `now`.
    ///
    /// The alias entry is only added for a non-empty alias.
    ///
    /// # Errors
    /// Returns `EmptyIdentifier` if the identifier is empty.
    pub fn issue_at(
        &self,
        account_identifier: &str,
        provider_alias: Option<&str>,
        now: i64,
    ) -> Result<String, AuthError> {
        if account_identifier.is_empty() {
            return Err(AuthError::EmptyIdentifier);
        }

        let mut token = Token::new(now);
        token.set_payload_entry(PAYLOAD_USERNAME, account_identifier);
        if let Some(alias) = provider_alias.filter(|a| !a.is_empty()) {
            token.set_payload_entry(PAYLOAD_PROVIDER_ALIAS, alias);
        }
        token.sign(&self.key);

        TokenCodec::encode(&token)
    }

    /// Issue a transport string at the current clock time
    pub fn issue(
        &self,
        account_identifier: &str,
        provider_alias: Option<&str>,
    ) -> Result<String, AuthError> {
        self.issue_at(account_identifier, provider_alias, self.clock.now())
    }

    /// Issue a token bound to an internal provider name.
    ///
    /// The name is replaced by its public alias; a name without an alias is
    /// left out of the token, so authentication falls back to the default
    /// provider.
    pub fn issue_for_provider(
        &self,
        account_identifier: &str,
        provider_name: Option<&str>,
    ) -> Result<String, AuthError> {
        let alias = provider_name.and_then(|name| {
            let alias = self.resolver.resolve_name_to_alias(name);
            if alias.is_none() {
                tracing::debug!(provider = name, "Provider has no public alias, omitting");
            }
            alias
        });
        self.issue(account_identifier, alias)
    }

    /// Check expiry and MAC.
    ///
    /// Tokens dated in the future are accepted. Both checks always run.
    pub fn verify(&self, token: &Token, now: i64, max_age: Duration) -> bool {
        let max_age_secs = i64::try_from(max_age.as_secs()).unwrap_or(i64::MAX);
        let fresh = now.saturating_sub(token.issued_at()) <= max_age_secs;
        let authentic = token.is_signed() & self.key.verify(&token.signed_message(), token.mac());

        if !(fresh && authentic) {
            tracing::debug!(fresh, authentic, "Token verification failed");
        }
        fresh & authentic
    }

    /// Decode and verify at the current clock time.
    ///
    /// # Errors
    /// Every failure is reported as `InvalidToken`.
    pub fn decode_and_verify(&self, transport: &str) -> Result<Token, AuthError> {
        let token = TokenCodec::decode(transport).map_err(|_| AuthError::InvalidToken)?;
        if !self.verify(&token, self.clock.now(), self.max_age) {
            return Err(AuthError::InvalidToken);
        }
        Ok(token)
    }
}

impl TokenVerifier for TokenService {
    fn verify(&self, token: &Token, now: i64, max_age: Duration) -> bool {
        TokenService::verify(self, token, now, max_age)
    }
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("max_age", &self.max_age)
            .field("aliases", &self.resolver.len())
            .finish_non_exhaustive()
    }
}
