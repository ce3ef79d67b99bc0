//! Stealth payment creation (sender side).

use rand::{CryptoRng, RngCore};

use veil_core::traits::DigestPrimitive;
use veil_core::types::{Announcement, MetaAddress};
use veil_crypto::{derive_announcement, random_public_key};

/// Samples a fresh R and derives an unrecorded announcement.
///
/// The ledger assigns the id when the announcement is appended. Any pair of
/// 32-byte keys is accepted, including all-zero keys.
pub fn create_announcement_with_rng<R: RngCore + CryptoRng>(
    digest: &dyn DigestPrimitive,
    subject_name: &str,
    meta: &MetaAddress,
    rng: &mut R,
) -> Announcement {
    let ephemeral = random_public_key(rng);
    derive_announcement(digest, subject_name, meta, ephemeral)
}

/// [`create_announcement_with_rng`] using the thread RNG.
pub fn create_announcement(
    digest: &dyn DigestPrimitive,
    subject_name: &str,
    meta: &MetaAddress,
) -> Announcement {
    create_announcement_with_rng(digest, subject_name, meta, &mut rand::thread_rng())
}
