//! Stealth address and note derivation.
//!
//! This module implements every derived value in the protocol. All of them
//! are a single digest over concatenated byte strings.
//!
//! ## Derivation Flow
//!
//! ```text
//! (spend_key, view_key), R
//!       ↓
//! derived_secret = digest(spend_key || view_key || R)
//!       ↓
//! address        = derived_secret[..20]
//! view_tag       = digest(view_key || R)[0]
//! ```
//!
//! ## Notes
//!
//! ```text
//! note_secret = digest(view_key || R)
//! commitment  = digest(address || amount_word || note_secret)
//! nullifier   = digest(note_secret || address)
//! ```
//!
//! `amount_word` is the amount as a 32-byte big-endian integer, which is
//! the byte form of its 64-digit zero-padded lowercase hex.

use subtle::ConstantTimeEq;

use veil_core::constants::AMOUNT_WORD_SIZE;
use veil_core::traits::DigestPrimitive;
use veil_core::types::{Announcement, Hash32, MetaAddress, PublicKey, StealthAddress};

use crate::view_tag::compute_view_tag;

/// Derives the stealth secret `digest(spend_key || view_key || R)`.
pub fn derive_stealth_secret(
    digest: &dyn DigestPrimitive,
    meta: &MetaAddress,
    ephemeral: &PublicKey,
) -> Hash32 {
    digest.hash_parts(&[
        meta.spend_key.as_bytes(),
        meta.view_key.as_bytes(),
        ephemeral.as_bytes(),
    ])
}

/// Derives a complete (unrecorded) announcement for a given R.
///
/// The caller supplies R so derivation stays deterministic and testable;
/// sampling lives in [`crate::random`].
pub fn derive_announcement(
    digest: &dyn DigestPrimitive,
    subject_name: &str,
    meta: &MetaAddress,
    ephemeral: PublicKey,
) -> Announcement {
    let secret = derive_stealth_secret(digest, meta, &ephemeral);
    let tag = compute_view_tag(digest, meta.view_key.as_bytes(), &ephemeral);
    Announcement::new(subject_name, meta.clone(), ephemeral, secret, tag)
}

/// Checks that an announcement's secret, address, and tag are consistent
/// with its meta-address and R.
pub fn verify_announcement(digest: &dyn DigestPrimitive, announcement: &Announcement) -> bool {
    let secret = derive_stealth_secret(
        digest,
        &announcement.meta_address,
        &announcement.ephemeral_public,
    );
    let tag = compute_view_tag(
        digest,
        announcement.meta_address.view_key.as_bytes(),
        &announcement.ephemeral_public,
    );

    let secret_ok: bool = secret
        .as_bytes()
        .ct_eq(announcement.derived_secret.as_bytes())
        .into();

    secret_ok
        && StealthAddress::from_secret(&secret) == announcement.address
        && tag == announcement.view_tag
}

// ═══════════════════════════════════════════════════════════════════════════════
// NOTES
// ═══════════════════════════════════════════════════════════════════════════════

/// Derives the note secret `digest(view_key || R)` for an announcement.
pub fn note_secret(digest: &dyn DigestPrimitive, announcement: &Announcement) -> Hash32 {
    digest.hash_parts(&[
        announcement.meta_address.view_key.as_bytes(),
        announcement.ephemeral_public.as_bytes(),
    ])
}

/// Encodes an amount as a 32-byte big-endian word.
pub fn amount_word(amount: u64) -> [u8; AMOUNT_WORD_SIZE] {
    let mut word = [0u8; AMOUNT_WORD_SIZE];
    word[AMOUNT_WORD_SIZE - 8..].copy_from_slice(&amount.to_be_bytes());
    word
}

/// Computes `digest(address || amount_word || note_secret)`.
pub fn note_commitment(
    digest: &dyn DigestPrimitive,
    address: &StealthAddress,
    amount: u64,
    secret: &Hash32,
) -> Hash32 {
    digest.hash_parts(&[address.as_bytes(), &amount_word(amount), secret.as_bytes()])
}

/// Computes `digest(note_secret || address)`.
pub fn note_nullifier(
    digest: &dyn DigestPrimitive,
    secret: &Hash32,
    address: &StealthAddress,
) -> Hash32 {
    digest.hash_parts(&[secret.as_bytes(), address.as_bytes()])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::Sha256Digest;
    use proptest::prelude::*;

    fn make_meta() -> MetaAddress {
        MetaAddress::new(PublicKey::from_array([0x11; 32]), PublicKey::from_array([0x22; 32]))
    }

    #[test]
    fn test_derive_stealth_secret_matches_hex_digest() {
        let meta = make_meta();
        let r = PublicKey::from_array([0x33; 32]);

        let secret = derive_stealth_secret(&Sha256Digest, &meta, &r);
        let expected = Sha256Digest
            .digest(&[&"11".repeat(32), &"22".repeat(32), &"33".repeat(32)])
            .unwrap();

        assert_eq!(secret.to_hex(), expected);
    }

    #[test]
    fn test_derive_announcement() {
        let meta = make_meta();
        let r = PublicKey::from_array([0x33; 32]);

        let ann = derive_announcement(&Sha256Digest, "alice.eth", &meta, r);

        assert_eq!(ann.id, 0);
        assert_eq!(ann.subject_name, "alice.eth");
        assert_eq!(ann.ephemeral_public, r);
        assert_eq!(ann.address.as_bytes(), &ann.derived_secret.as_bytes()[..20]);
        assert_eq!(ann.address.to_hex_string().len(), 42);
        assert!(verify_announcement(&Sha256Digest, &ann));
    }

    #[test]
    fn test_derive_announcement_deterministic() {
        let meta = make_meta();
        let r = PublicKey::from_array([0x44; 32]);
        let a = derive_announcement(&Sha256Digest, "a", &meta, r);
        let b = derive_announcement(&Sha256Digest, "a", &meta, r);
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_r_different_address() {
        let meta = make_meta();
        let a = derive_announcement(&Sha256Digest, "a", &meta, PublicKey::from_array([1; 32]));
        let b = derive_announcement(&Sha256Digest, "a", &meta, PublicKey::from_array([2; 32]));
        assert_ne!(a.address, b.address);
        assert_ne!(a.derived_secret, b.derived_secret);
    }

    #[test]
    fn test_verify_announcement_detects_tampering() {
        let meta = make_meta();
        let mut ann = derive_announcement(&Sha256Digest, "a", &meta, PublicKey::from_array([7; 32]));

        ann.view_tag = veil_core::ViewTag::new(ann.view_tag.value() ^ 0xff);
        assert!(!verify_announcement(&Sha256Digest, &ann));

        let mut ann = derive_announcement(&Sha256Digest, "a", &meta, PublicKey::from_array([7; 32]));
        ann.ephemeral_public = PublicKey::from_array([8; 32]);
        assert!(!verify_announcement(&Sha256Digest, &ann));
    }

    #[test]
    fn test_note_secret_shares_tag_byte() {
        let meta = make_meta();
        let ann = derive_announcement(&Sha256Digest, "a", &meta, PublicKey::from_array([9; 32]));
        let secret = note_secret(&Sha256Digest, &ann);
        assert_eq!(secret.as_bytes()[0], ann.view_tag.value());
    }

    #[test]
    fn test_amount_word() {
        assert_eq!(hex::encode(amount_word(0)), "0".repeat(64));
        assert_eq!(hex::encode(amount_word(255)), format!("{:064x}", 255));
        assert_eq!(hex::encode(amount_word(u64::MAX)), format!("{:064x}", u64::MAX));
    }

    #[test]
    fn test_nullifier_differs_from_commitment() {
        let address = StealthAddress::from_array([0xaa; 20]);
        let secret = Hash32::from_array([0xbb; 32]);
        let c = note_commitment(&Sha256Digest, &address, 10, &secret);
        let n = note_nullifier(&Sha256Digest, &secret, &address);
        assert_ne!(c, n);
    }

    proptest! {
        #[test]
        fn prop_commitment_matches_hex_form(
            amount in any::<u64>(),
            addr in any::<[u8; 20]>(),
            secret in any::<[u8; 32]>(),
        ) {
            let address = StealthAddress::from_array(addr);
            let secret = Hash32::from_array(secret);

            let commitment = note_commitment(&Sha256Digest, &address, amount, &secret);
            let expected = Sha256Digest.digest(&[
                &address.to_hex_unprefixed(),
                &format!("{:064x}", amount),
                &secret.to_hex(),
            ]).unwrap();

            prop_assert_eq!(commitment.to_hex(), expected);
        }

        #[test]
        fn prop_nullifier_matches_hex_form(
            addr in any::<[u8; 20]>(),
            secret in any::<[u8; 32]>(),
        ) {
            let address = StealthAddress::from_array(addr);
            let secret = Hash32::from_array(secret);

            let nullifier = note_nullifier(&Sha256Digest, &secret, &address);
            let expected = Sha256Digest
                .digest(&[&secret.to_hex(), &address.to_hex_unprefixed()])
                .unwrap();

            prop_assert_eq!(nullifier.to_hex(), expected);
        }
    }
}
