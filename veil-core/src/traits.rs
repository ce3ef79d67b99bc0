//! Common traits for VEIL.
//!
//! These traits are the seams where backends are substituted: a real
//! algebraic hash for the placeholder digest, a persistent or on-chain ledger
//! for the in-memory one, a registry lookup for the random resolver stub, and
//! a SNARK prover for the placeholder proofs.

use async_trait::async_trait;

use crate::constants::DIGEST_SIZE;
use crate::error::{Result, VeilError};
use crate::types::{Announcement, Hash32, MetaAddress, Proof, ViewTag};

// ═══════════════════════════════════════════════════════════════════════════════
// DIGEST PRIMITIVE
// ═══════════════════════════════════════════════════════════════════════════════

/// Deterministic one-way function over an ordered list of byte strings.
///
/// Backends implement [`hash_bytes`](Self::hash_bytes) only. The provided
/// methods fix the input convention: parts are concatenated with no
/// separators and no length prefixes.
pub trait DigestPrimitive: Send + Sync {
    /// Short backend name (e.g. "sha256").
    fn name(&self) -> &'static str;

    /// Hashes a single byte string.
    fn hash_bytes(&self, input: &[u8]) -> [u8; DIGEST_SIZE];

    /// Hashes the concatenation of `parts`.
    fn hash_parts(&self, parts: &[&[u8]]) -> Hash32 {
        Hash32::from_array(self.hash_bytes(&parts.concat()))
    }

    /// Hashes the concatenation of the bytes decoded from each hex input.
    ///
    /// # Errors
    /// Returns `InvalidEncoding` if `inputs` is empty or any input is not hex.
    fn digest(&self, inputs: &[&str]) -> Result<String> {
        if inputs.is_empty() {
            return Err(VeilError::InvalidEncoding(
                "digest requires at least one input".into(),
            ));
        }

        let mut buf = Vec::with_capacity(inputs.iter().map(|s| s.len() / 2).sum());
        for (index, input) in inputs.iter().enumerate() {
            let bytes = hex::decode(input)
                .map_err(|e| VeilError::InvalidEncoding(format!("input {}: {}", index, e)))?;
            buf.extend_from_slice(&bytes);
        }

        Ok(hex::encode(self.hash_bytes(&buf)))
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// ANNOUNCEMENT LEDGER
// ═══════════════════════════════════════════════════════════════════════════════

/// Append-only announcement storage.
///
/// Implementations might use:
/// - In-memory storage (for testing/development)
/// - A database table
/// - On-chain announcer events
#[async_trait]
pub trait AnnouncementLedger: Send + Sync {
    /// Records an announcement and returns its assigned id.
    ///
    /// Ids start at 1, increase monotonically, and are never reused.
    async fn append(&self, announcement: Announcement) -> Result<u64>;

    /// Retrieves an announcement by id.
    async fn find(&self, id: u64) -> Result<Option<Announcement>>;

    /// Returns every announcement whose recomputed tag
    /// `digest(view_key, R)[0]` equals `tag`, in insertion order.
    async fn scan(
        &self,
        tag: ViewTag,
        view_key: &[u8],
        digest: &dyn DigestPrimitive,
    ) -> Result<Vec<Announcement>>;

    /// Returns a point-in-time copy of every announcement, in insertion order.
    async fn snapshot(&self) -> Result<Vec<Announcement>>;

    /// Returns total announcement count.
    async fn count(&self) -> Result<u64>;
}

// ═══════════════════════════════════════════════════════════════════════════════
// META-ADDRESS RESOLVER
// ═══════════════════════════════════════════════════════════════════════════════

/// Name → meta-address oracle (ENS or a registry in production).
#[async_trait]
pub trait MetaAddressResolver: Send + Sync {
    /// Resolves a name to a meta-address.
    ///
    /// # Errors
    /// Returns `NotRegistered` if the name has no published meta-address.
    async fn resolve(&self, name: &str) -> Result<MetaAddress>;

    /// Short backend name, for logs and health output.
    fn backend(&self) -> &'static str;
}

// ═══════════════════════════════════════════════════════════════════════════════
// PROVER
// ═══════════════════════════════════════════════════════════════════════════════

/// Produces opaque proofs about announcements.
///
/// `None` means no statement was supplied; the prover decides what that
/// yields.
pub trait Prover: Send + Sync {
    /// Proves the stealth address was derived from the meta-address.
    fn prove_derivation(&self, announcement: Option<&Announcement>) -> Proof;

    /// Proves control of the keys behind the stealth address.
    fn prove_ownership(&self, announcement: Option<&Announcement>) -> Proof;
}
