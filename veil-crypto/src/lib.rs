//! # VEIL Cryptography
//!
//! Placeholder cryptographic primitives for the VEIL protocol.
//!
//! This crate provides:
//!
//! - **Hash**: Digest primitive backends (SHA-256 default, Keccak-256 alternate)
//! - **View Tags**: Discovery tag computation and constant-time verification
//! - **Derivation**: Stealth secrets, addresses, note secrets, commitments, nullifiers
//! - **Random**: Key and ephemeral value sampling
//!
//! ## Security Properties
//!
//! None of this is real stealth-address cryptography. The digest backends
//! stand in for a circuit-friendly hash behind the
//! [`DigestPrimitive`](veil_core::DigestPrimitive) trait, so a real
//! construction can be dropped in without changing any caller.
//!
//! ## Example
//!
//! ```rust
//! use veil_core::DigestPrimitive;
//! use veil_crypto::Sha256Digest;
//!
//! let digest = Sha256Digest;
//! let out = digest.digest(&["6162", "63"]).unwrap();
//! assert_eq!(out, "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

pub mod hash;
pub mod view_tag;
pub mod derive;
pub mod random;

// Re-export main functions at crate root
pub use hash::{digest_backend, Keccak256Digest, Sha256Digest, DIGEST_BACKENDS};
pub use view_tag::{compute_view_tag, verify_view_tag};
pub use derive::{
    amount_word, derive_announcement, derive_stealth_secret, note_commitment, note_nullifier,
    note_secret, verify_announcement,
};
pub use random::{random_meta_address, random_public_key};
