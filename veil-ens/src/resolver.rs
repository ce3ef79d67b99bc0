//! Stub resolver returning fresh random meta-addresses.

use async_trait::async_trait;
use tracing::{debug, instrument};

use veil_core::error::{Result, VeilError};
use veil_core::traits::MetaAddressResolver;
use veil_core::types::MetaAddress;
use veil_crypto::random_meta_address;

/// Trims a name and rejects empty ones.
///
/// Case is preserved; lookups that should be case-insensitive lowercase
/// the result themselves.
pub fn normalize_name(name: &str) -> Result<&str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(VeilError::MissingParameters("name cannot be empty".into()));
    }
    Ok(trimmed)
}

/// Resolver that invents a new meta-address on every call.
///
/// Stands in for an ENS lookup. Nothing is cached: resolving the same name
/// twice yields two unrelated key pairs, so callers must keep the
/// meta-address they resolved if they want to scan for it later.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomResolver;

impl RandomResolver {
    /// Creates the stub resolver.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl MetaAddressResolver for RandomResolver {
    #[instrument(skip(self))]
    async fn resolve(&self, name: &str) -> Result<MetaAddress> {
        let name = normalize_name(name)?;
        let meta = random_meta_address(&mut rand::thread_rng());
        debug!(name, "Generated stub meta-address");
        Ok(meta)
    }

    fn backend(&self) -> &'static str {
        "random"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("alice.eth", "alice.eth" ; "plain")]
    #[test_case("  bob.eth\n", "bob.eth" ; "trimmed")]
    #[test_case("Carol.ETH", "Carol.ETH" ; "case preserved")]
    fn test_normalize_name(input: &str, expected: &str) {
        assert_eq!(normalize_name(input).unwrap(), expected);
    }

    #[test_case("" ; "empty")]
    #[test_case("   " ; "whitespace")]
    fn test_normalize_name_rejects(input: &str) {
        assert!(matches!(normalize_name(input), Err(VeilError::MissingParameters(_))));
    }

    #[tokio::test]
    async fn test_random_resolver_fresh_keys() {
        let resolver = RandomResolver::new();

        let a = resolver.resolve("alice.eth").await.unwrap();
        let b = resolver.resolve("alice.eth").await.unwrap();

        assert_ne!(a, b);
        assert_ne!(a.spend_key, a.view_key);
    }

    #[tokio::test]
    async fn test_random_resolver_rejects_empty_name() {
        let resolver = RandomResolver::new();
        assert!(resolver.resolve(" ").await.is_err());
        assert_eq!(resolver.backend(), "random");
    }
}
