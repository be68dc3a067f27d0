//! Subcommand implementations.

use hmac_auth_core::{append_to_uri, AuthError, TokenCodec, TokenService};
use serde_json::json;

/// Issue a transport string for an account
pub fn issue(
    tokens: &TokenService,
    account: &str,
    alias: Option<&str>,
    provider: Option<&str>,
) -> Result<String, AuthError> {
    match provider {
        Some(name) => tokens.issue_for_provider(account, Some(name)),
        None => tokens.issue(account, alias),
    }
}

/// Build a URI that authenticates as `account`
pub fn link(
    tokens: &TokenService,
    uri: &str,
    account: &str,
    alias: Option<&str>,
) -> Result<String, AuthError> {
    let token = tokens.issue(account, alias)?;
    Ok(append_to_uri(uri, &token))
}

/// Describe a transport string as JSON. The MAC is never printed.
pub fn inspect(tokens: &TokenService, transport: &str) -> serde_json::Value {
    let Ok(token) = TokenCodec::decode(transport) else {
        return json!({ "decodable": false, "valid": false });
    };
    let valid = tokens.decode_and_verify(transport).is_ok();
    json!({
        "decodable": true,
        "valid": valid,
        "issuedAt": token.issued_at(),
        "payload": token.payload(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use hmac_auth_core::{AuthConfig, Credentials};

    fn tokens() -> TokenService {
        let config = AuthConfig::new("0123456789abcdef0123456789abcdef")
            .with_provider_alias("a", "Foo");
        TokenService::from_config(&config).unwrap()
    }

    #[test]
    fn test_issue_with_provider_uses_alias() {
        let tokens = tokens();
        let transport = issue(&tokens, "alice", None, Some("Foo")).unwrap();
        let token = tokens.decode_and_verify(&transport).unwrap();
        assert_eq!(token.provider_alias(), Some("a"));
    }

    #[test]
    fn test_link_carries_token() {
        let tokens = tokens();
        let uri = link(&tokens, "https://shop.example/orders?page=2", "alice", None).unwrap();
        let query = uri.split_once('?').map(|(_, q)| q).unwrap();

        let credentials = Credentials::from_query(query);
        let token = tokens
            .decode_and_verify(credentials.auth_token().unwrap())
            .unwrap();
        assert_eq!(token.username(), Some("alice"));
    }

    #[test]
    fn test_inspect_hides_mac() {
        let tokens = tokens();
        let transport = issue(&tokens, "alice", Some("a"), None).unwrap();
        let report = inspect(&tokens, &transport);

        assert_eq!(report["valid"], true);
        assert_eq!(report["payload"]["username"], "alice");
        assert!(report.get("mac").is_none());
    }

    #[test]
    fn test_inspect_garbage() {
        let report = inspect(&tokens(), "%%%");
        assert_eq!(report["decodable"], false);
    }
}
