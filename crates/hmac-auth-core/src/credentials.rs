//! Credential extraction and transport helpers
//!
//! The hosting framework hands us request arguments; these helpers pull the
//! token out of them and build the parameter that carries it back in.

use serde_json::Value;
use url::form_urlencoded;

/// Request parameter carrying the token (query string or form field)
pub const AUTH_TOKEN_PARAMETER: &str = "__authentication[HmacAuthentication][authToken]";

/// Path of the token inside nested request arguments
const AUTH_TOKEN_PATH: [&str; 3] = ["__authentication", "HmacAuthentication", "authToken"];

/// Raw credentials for one authentication attempt
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    auth_token: Option<String>,
}

impl Credentials {
    /// Credentials carrying a transport string
    pub fn from_token(token: impl Into<String>) -> Self {
        Self {
            auth_token: Some(token.into()),
        }
    }

    /// No credentials at all
    pub fn none() -> Self {
        Self::default()
    }

    /// Extract from nested request arguments, e.g. a parsed form body:
    /// `{"__authentication": {"HmacAuthentication": {"authToken": "..."}}}`
    pub fn from_arguments(arguments: &Value) -> Self {
        let token = AUTH_TOKEN_PATH
            .iter()
            .try_fold(arguments, |value, key| value.get(key))
            .and_then(Value::as_str)
            .map(str::to_string);
        Self { auth_token: token }
    }

    /// Extract from a URL query string (with or without leading `?`)
    pub fn from_query(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let token = form_urlencoded::parse(query.as_bytes())
            .find(|(name, _)| name == AUTH_TOKEN_PARAMETER)
            .map(|(_, value)| value.into_owned());
        Self { auth_token: token }
    }

    /// Token material, if any non-blank value was supplied
    pub fn auth_token(&self) -> Option<&str> {
        self.auth_token
            .as_deref()
            .map(str::trim)
            .filter(|token| !token.is_empty())
    }

    pub fn is_present(&self) -> bool {
        self.auth_token().is_some()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("auth_token", &self.auth_token.as_ref().map(|_| "***"))
            .finish()
    }
}

/// `name=value` query string part carrying `token`
pub fn query_string_part(token: &str) -> String {
    form_urlencoded::Serializer::new(String::new())
        .append_pair(AUTH_TOKEN_PARAMETER, token)
        .finish()
}

/// Append the token parameter to a URI, keeping any `#fragment` last
pub fn append_to_uri(uri: &str, token: &str) -> String {
    let (base, fragment) = match uri.split_once('#') {
        Some((base, fragment)) => (base, Some(fragment)),
        None => (uri, None),
    };
    let separator = if !base.contains('?') {
        "?"
    } else if base.ends_with('?') || base.ends_with('&') {
        ""
    } else {
        "&"
    };

    let mut out = format!("{base}{separator}{}", query_string_part(token));
    if let Some(fragment) = fragment {
        out.push('#');
        out.push_str(fragment);
    }
    out
}

/// `(name, value)` for a hidden form field carrying `token`
pub fn hidden_field(token: &str) -> (&'static str, String) {
    (AUTH_TOKEN_PARAMETER, token.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_arguments() {
        let args = json!({
            "__authentication": {"HmacAuthentication": {"authToken": "abc"}},
            "other": 1
        });
        assert_eq!(Credentials::from_arguments(&args).auth_token(), Some("abc"));
    }

    #[test]
    fn test_from_arguments_missing_or_wrong_type() {
        assert!(!Credentials::from_arguments(&json!({})).is_present());
        assert!(!Credentials::from_arguments(&json!({"__authentication": "x"})).is_present());
        let numeric = json!({"__authentication": {"HmacAuthentication": {"authToken": 5}}});
        assert!(!Credentials::from_arguments(&numeric).is_present());
    }

    #[test]
    fn test_blank_token_is_absent() {
        assert!(!Credentials::from_token("").is_present());
        assert!(!Credentials::from_token("   ").is_present());
        assert_eq!(Credentials::from_token(" abc ").auth_token(), Some("abc"));
        assert!(!Credentials::none().is_present());
    }

    #[test]
    fn test_query_roundtrip() {
        let part = query_string_part("tok-en_1");
        assert!(part.starts_with("__authentication%5BHmacAuthentication%5D%5BauthToken%5D="));
        assert_eq!(Credentials::from_query(&part).auth_token(), Some("tok-en_1"));
    }

    #[test]
    fn test_from_query_accepts_raw_brackets() {
        let query = "?page=2&__authentication[HmacAuthentication][authToken]=xyz";
        assert_eq!(Credentials::from_query(query).auth_token(), Some("xyz"));
        assert!(!Credentials::from_query("page=2").is_present());
    }

    #[test]
    fn test_append_to_uri() {
        let part = query_string_part("t");
        assert_eq!(append_to_uri("/a", "t"), format!("/a?{part}"));
        assert_eq!(append_to_uri("/a?x=1", "t"), format!("/a?x=1&{part}"));
        assert_eq!(append_to_uri("/a?", "t"), format!("/a?{part}"));
        assert_eq!(append_to_uri("/a#top", "t"), format!("/a?{part}#top"));
    }

    #[test]
    fn test_hidden_field() {
        let (name, value) = hidden_field("t");
        assert_eq!(name, AUTH_TOKEN_PARAMETER);
        assert_eq!(value, "t");
    }

    #[test]
    fn test_debug_redacts_token() {
        let creds = Credentials::from_token("secret-token");
        assert!(!format!("{creds:?}").contains("secret-token"));
    }
}
