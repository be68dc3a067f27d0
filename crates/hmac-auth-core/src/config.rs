//! Configuration types for token authentication

use std::time::Duration;

use crate::crypto::HmacKey;
use crate::AuthError;

/// Default replay window for issued tokens (1 hour)
pub const DEFAULT_MAX_AGE: Duration = Duration::from_secs(60 * 60);

/// Provider used when a token carries no (known) alias
pub const DEFAULT_PROVIDER_NAME: &str = "DefaultProvider";

/// Which authentication attempts are recorded on the account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AttemptTracking {
    /// Record successful and failed attempts
    #[default]
    Always,
    SuccessfulOnly,
    FailedOnly,
    Never,
}

impl AttemptTracking {
    pub fn tracks_success(self) -> bool {
        matches!(self, Self::Always | Self::SuccessfulOnly)
    }

    pub fn tracks_failure(self) -> bool {
        matches!(self, Self::Always | Self::FailedOnly)
    }
}

impl std::str::FromStr for AttemptTracking {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "always" | "true" => Ok(Self::Always),
            "successful" | "successfulonly" | "successful_only" => Ok(Self::SuccessfulOnly),
            "failed" | "failedonly" | "failed_only" => Ok(Self::FailedOnly),
            "never" | "false" => Ok(Self::Never),
            other => Err(AuthError::Configuration(format!(
                "unknown attempt tracking policy {other:?}"
            ))),
        }
    }
}

/// Token authentication configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// HMAC secret for token signing (at least 32 bytes)
    pub signing_key: String,
    /// Maximum age of a token at verification time
    pub max_age: Duration,
    /// Provider name used when the token names no known alias
    pub default_provider_name: String,
    /// `(alias, provider_name)` pairs in configuration order
    pub provider_aliases: Vec<(String, String)>,
    pub attempt_tracking: AttemptTracking,
}

impl AuthConfig {
    /// Create a new config with default max age, provider and tracking
    pub fn new(signing_key: impl Into<String>) -> Self {
        Self {
            signing_key: signing_key.into(),
            max_age: DEFAULT_MAX_AGE,
            default_provider_name: DEFAULT_PROVIDER_NAME.to_string(),
            provider_aliases: Vec::new(),
            attempt_tracking: AttemptTracking::default(),
        }
    }

    /// Create a new config and validate it
    pub fn try_new(signing_key: impl Into<String>) -> Result<Self, AuthError> {
        let config = Self::new(signing_key);
        config.validate()?;
        Ok(config)
    }

    /// Check the settings that would otherwise fail at first use
    pub fn validate(&self) -> Result<(), AuthError> {
        HmacKey::new(&self.signing_key)?;
        if self.default_provider_name.is_empty() {
            return Err(AuthError::Configuration(
                "default provider name is empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Set max token age
    pub fn with_max_age(mut self, max_age: Duration) -> Self {
        self.max_age = max_age;
        self
    }

    /// Set default provider name
    pub fn with_default_provider_name(mut self, name: impl Into<String>) -> Self {
        self.default_provider_name = name.into();
        self
    }

    /// Add a provider alias
    pub fn with_provider_alias(mut self, alias: impl Into<String>, name: impl Into<String>) -> Self {
        self.provider_aliases.push((alias.into(), name.into()));
        self
    }

    /// Set attempt tracking policy
    pub fn with_attempt_tracking(mut self, tracking: AttemptTracking) -> Self {
        self.attempt_tracking = tracking;
        self
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("signing_key", &"***")
            .field("max_age", &self.max_age)
            .field("default_provider_name", &self.default_provider_name)
            .field("provider_aliases", &self.provider_aliases)
            .field("attempt_tracking", &self.attempt_tracking)
            .finish()
    }
}
