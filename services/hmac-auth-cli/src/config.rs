//! Configuration for the hmac-auth CLI.

use hmac_auth_core::{AttemptTracking, AuthConfig};
use std::time::Duration;

const SECRET: &str = "HMAC_AUTH_SECRET";
const MAX_AGE_SECS: &str = "HMAC_AUTH_MAX_AGE_SECS";
const DEFAULT_PROVIDER: &str = "HMAC_AUTH_DEFAULT_PROVIDER";
const PROVIDER_ALIASES: &str = "HMAC_AUTH_PROVIDER_ALIASES";
const TRACK_ATTEMPTS: &str = "HMAC_AUTH_TRACK_ATTEMPTS";

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Auth core configuration
    pub auth: AuthConfig,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable source
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let secret = var(SECRET).ok_or(ConfigError::Missing(SECRET))?;

        let max_age_secs: u64 = var(MAX_AGE_SECS)
            .unwrap_or_else(|| "3600".to_string())
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid(MAX_AGE_SECS))?;

        let mut auth = AuthConfig::new(secret).with_max_age(Duration::from_secs(max_age_secs));

        if let Some(name) = var(DEFAULT_PROVIDER) {
            auth = auth.with_default_provider_name(name.trim());
        }

        if let Some(aliases) = var(PROVIDER_ALIASES) {
            for (alias, name) in parse_aliases(&aliases)? {
                auth = auth.with_provider_alias(alias, name);
            }
        }

        if let Some(tracking) = var(TRACK_ATTEMPTS) {
            let tracking: AttemptTracking = tracking
                .parse()
                .map_err(|_| ConfigError::Invalid(TRACK_ATTEMPTS))?;
            auth = auth.with_attempt_tracking(tracking);
        }

        auth.validate()
            .map_err(|e| ConfigError::AuthConfig(e.to_string()))?;

        Ok(Self { auth })
    }
}

/// Parse `alias=Name,alias2=Name2`, keeping configuration order
fn parse_aliases(raw: &str) -> Result<Vec<(String, String)>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            entry
                .split_once('=')
                .map(|(alias, name)| (alias.trim().to_string(), name.trim().to_string()))
                .ok_or(ConfigError::Invalid(PROVIDER_ALIASES))
        })
        .collect()
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),

    #[error("Auth config error: {0}")]
    AuthConfig(String),
}
