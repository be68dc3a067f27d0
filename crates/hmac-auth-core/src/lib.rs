//! hmac-auth core - signed token authentication
//!
//! Issues short-lived HMAC-signed tokens that prove knowledge of an account
//! identifier, and authenticates callers presenting them:
//!
//! - [`HmacKey`] signs and verifies MACs in constant time
//! - [`Token`] and [`TokenCodec`] define the token and its transport form
//! - [`TokenService`] issues and verifies tokens
//! - [`ProviderAliasResolver`] maps public aliases to provider names
//! - [`AuthenticationCoordinator`] decides the outcome of an attempt
//!
//! [`HmacAuthService`] wires all of them from an [`AuthConfig`].

pub mod alias;
pub mod clock;
pub mod codec;
pub mod config;
pub mod coordinator;
pub mod credentials;
pub mod crypto;
pub mod error;
pub mod service;
pub mod token;
pub mod token_service;

pub use alias::ProviderAliasResolver;
pub use clock::{Clock, FixedClock, SystemClock};
pub use codec::TokenCodec;
pub use config::{AttemptTracking, AuthConfig};
pub use coordinator::{AuthenticationCoordinator, AuthenticationOutcome, CoordinatorOptions};
pub use credentials::{append_to_uri, hidden_field, query_string_part, Credentials, AUTH_TOKEN_PARAMETER};
pub use crypto::{constant_time_eq, constant_time_str_eq, HmacKey, HmacKeyError};
pub use error::AuthError;
pub use service::HmacAuthService;
pub use token::{Token, PAYLOAD_PROVIDER_ALIAS, PAYLOAD_USERNAME};
pub use token_service::{TokenService, TokenVerifier};
