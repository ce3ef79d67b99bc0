//! Digest primitive backends.
//!
//! Both backends hash the plain concatenation of their inputs; the
//! concatenation itself is done once by the provided methods of
//! [`DigestPrimitive`].
//!
//! ```text
//! digest(x1, x2, ..., xn) = H(bytes(x1) || bytes(x2) || ... || bytes(xn))
//! ```
//!
//! There is no domain separation and no length framing. That is the
//! placeholder's contract, and a substituted permutation must keep the same
//! call signature.

use std::sync::Arc;

use sha2::{Digest, Sha256};
use sha3::Keccak256;

use veil_core::constants::DIGEST_SIZE;
use veil_core::error::{Result, VeilError};
use veil_core::traits::DigestPrimitive;

/// Names accepted by [`digest_backend`].
pub const DIGEST_BACKENDS: &[&str] = &["sha256", "keccak256"];

// ═══════════════════════════════════════════════════════════════════════════════
// SHA-256
// ═══════════════════════════════════════════════════════════════════════════════

/// SHA-256 over the concatenated inputs. The default backend.
#[derive(Clone, Copy, Debug, Default)]
pub struct Sha256Digest;

impl DigestPrimitive for Sha256Digest {
    fn name(&self) -> &'static str {
        "sha256"
    }

    fn hash_bytes(&self, input: &[u8]) -> [u8; DIGEST_SIZE] {
        Sha256::digest(input).into()
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// KECCAK-256
// ═══════════════════════════════════════════════════════════════════════════════

/// Keccak-256 over the concatenated inputs.
///
/// Note: Keccak-256 is NOT SHA3-256. They use different padding.
#[derive(Clone, Copy, Debug, Default)]
pub struct Keccak256Digest;

impl DigestPrimitive for Keccak256Digest {
    fn name(&self) -> &'static str {
        "keccak256"
    }

    fn hash_bytes(&self, input: &[u8]) -> [u8; DIGEST_SIZE] {
        Keccak256::digest(input).into()
    }
}

/// Selects a digest backend by name (case-insensitive).
///
/// # Errors
/// Returns `ConfigError` for unknown names.
pub fn digest_backend(name: &str) -> Result<Arc<dyn DigestPrimitive>> {
    match name.trim().to_ascii_lowercase().as_str() {
        "sha256" | "sha-256" => Ok(Arc::new(Sha256Digest)),
        "keccak256" | "keccak-256" => Ok(Arc::new(Keccak256Digest)),
        other => Err(VeilError::ConfigError(format!(
            "unknown digest backend {:?}, expected one of {:?}",
            other, DIGEST_BACKENDS
        ))),
    }
}
