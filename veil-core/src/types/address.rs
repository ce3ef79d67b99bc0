//! Meta-address type.
//!
//! A [`MetaAddress`] is the recipient's long-lived published key pair.
//! Senders derive one-time stealth addresses from it.

use serde::{Deserialize, Serialize};

use super::PublicKey;
use crate::error::{Result, VeilError};

/// A recipient's published (spend key, view key) pair.
///
/// Immutable once resolved.
///
/// # Example
/// ```
/// use veil_core::MetaAddress;
///
/// let meta = MetaAddress::from_hex_parts(&"11".repeat(32), &"22".repeat(32)).unwrap();
/// assert_eq!(meta.view_key.to_hex(), "22".repeat(32));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaAddress {
    /// Spend key - mixed into the derived secret
    pub spend_key: PublicKey,
    /// View key - mixed into the derived secret and the discovery tag
    pub view_key: PublicKey,
}

impl MetaAddress {
    /// Creates a meta-address from two keys.
    pub fn new(spend_key: PublicKey, view_key: PublicKey) -> Self {
        Self { spend_key, view_key }
    }

    /// Parses a meta-address from two 32-byte hex strings.
    ///
    /// # Errors
    /// Returns `InvalidMetaAddress` naming the offending field when a key
    /// is missing, not hex, or not 32 bytes.
    pub fn from_hex_parts(spend_key: &str, view_key: &str) -> Result<Self> {
        let spend_key = parse_key("spend key", spend_key)?;
        let view_key = parse_key("view key", view_key)?;
        Ok(Self::new(spend_key, view_key))
    }
}

fn parse_key(field: &str, value: &str) -> Result<PublicKey> {
    if value.trim().is_empty() {
        return Err(VeilError::InvalidMetaAddress(format!("{} is required", field)));
    }
    PublicKey::from_hex(value.trim())
        .map_err(|e| VeilError::InvalidMetaAddress(format!("{}: {}", field, e)))
}
