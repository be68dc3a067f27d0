//! Provider alias table
//!
//! Tokens carry a short public alias instead of the internal provider name.

use std::collections::HashMap;

use crate::AuthError;

/// Read-only alias <-> provider name table, built once at startup
#[derive(Debug, Clone, Default)]
pub struct ProviderAliasResolver {
    by_alias: HashMap<String, String>,
    /// Configuration order, for deterministic name -> alias lookups
    entries: Vec<(String, String)>,
}

impl ProviderAliasResolver {
    /// Build from `(alias, provider_name)` pairs in configuration order.
    ///
    /// # Errors
    /// Returns `Configuration` for duplicate aliases, empty aliases or
    /// empty provider names.
    pub fn new<I, A, N>(pairs: I) -> Result<Self, AuthError>
    where
        I: IntoIterator<Item = (A, N)>,
        A: Into<String>,
        N: Into<String>,
    {
        let mut resolver = Self::default();
        for (alias, name) in pairs {
            let (alias, name) = (alias.into(), name.into());
            if alias.is_empty() {
                return Err(AuthError::Configuration(format!(
                    "empty alias for provider {name:?}"
                )));
            }
            if name.is_empty() {
                return Err(AuthError::Configuration(format!(
                    "alias {alias:?} maps to an empty provider name"
                )));
            }
            if resolver.by_alias.contains_key(&alias) {
                return Err(AuthError::Configuration(format!(
                    "duplicate provider alias {alias:?}"
                )));
            }
            resolver.by_alias.insert(alias.clone(), name.clone());
            resolver.entries.push((alias, name));
        }
        Ok(resolver)
    }

    /// Provider name configured for `alias`
    pub fn resolve_alias_to_name(&self, alias: &str) -> Option<&str> {
        self.by_alias.get(alias).map(String::as_str)
    }

    /// First configured alias for `name`
    pub fn resolve_name_to_alias(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(_, provider)| provider == name)
            .map(|(alias, _)| alias.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_both_directions() {
        let resolver = ProviderAliasResolver::new([("a", "Foo"), ("b", "Bar")]).unwrap();
        assert_eq!(resolver.resolve_alias_to_name("a"), Some("Foo"));
        assert_eq!(resolver.resolve_name_to_alias("Bar"), Some("b"));
        assert_eq!(resolver.resolve_alias_to_name("c"), None);
        assert_eq!(resolver.resolve_name_to_alias("Baz"), None);
    }

    #[test]
    fn test_first_alias_wins_for_shared_name() {
        let resolver = ProviderAliasResolver::new([("z", "Foo"), ("a", "Foo")]).unwrap();
        assert_eq!(resolver.resolve_name_to_alias("Foo"), Some("z"));
        assert_eq!(resolver.resolve_alias_to_name("a"), Some("Foo"));
    }

    #[test]
    fn test_duplicate_alias_rejected() {
        let result = ProviderAliasResolver::new([("a", "Foo"), ("a", "Bar")]);
        assert!(matches!(result, Err(AuthError::Configuration(_))));
    }

    #[test]
    fn test_empty_entries_rejected() {
        assert!(ProviderAliasResolver::new([("", "Foo")]).is_err());
        assert!(ProviderAliasResolver::new([("a", "")]).is_err());
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let resolver = ProviderAliasResolver::new([("a", "Foo")]).unwrap();
        assert_eq!(resolver.resolve_alias_to_name("A"), None);
        assert_eq!(resolver.resolve_name_to_alias("foo"), None);
    }
}
