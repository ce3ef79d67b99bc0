//! Protocol constants for VEIL.
//!
//! Sizes follow the placeholder construction: every digest is 32 bytes and
//! every derived value is a prefix of one.

// ═══════════════════════════════════════════════════════════════════════════════
// KEY AND DIGEST SIZES
// ═══════════════════════════════════════════════════════════════════════════════

/// Size of a meta-address public key (spend key or view key) in bytes.
pub const PUBLIC_KEY_SIZE: usize = 32;

/// Size of the per-payment ephemeral value R in bytes.
pub const EPHEMERAL_SIZE: usize = 32;

/// Size of a digest primitive output in bytes.
pub const DIGEST_SIZE: usize = 32;

/// Size of a digest primitive output in hex characters.
pub const DIGEST_HEX_LEN: usize = DIGEST_SIZE * 2;

// ═══════════════════════════════════════════════════════════════════════════════
// DERIVED VALUE SIZES
// ═══════════════════════════════════════════════════════════════════════════════

/// Size of a stealth address in bytes (first 20 bytes of the derived secret).
pub const ADDRESS_SIZE: usize = 20;

/// Size of a discovery tag in bytes (first byte of the view digest).
/// One byte leaves a 1/256 false positive rate for the prefilter.
pub const VIEW_TAG_SIZE: usize = 1;

/// Number of possible view tag values (2^8 = 256).
pub const VIEW_TAG_SPACE: usize = 256;

/// Width of the big-endian amount word hashed into a commitment.
pub const AMOUNT_WORD_SIZE: usize = 32;

/// Size of each placeholder proof element.
pub const PROOF_ELEMENT_SIZE: usize = 32;

/// Prefix used when rendering addresses.
pub const ADDRESS_PREFIX: &str = "0x";

// ═══════════════════════════════════════════════════════════════════════════════
// SERVICE DEFAULTS
// ═══════════════════════════════════════════════════════════════════════════════

/// Default HTTP port for the API server.
pub const DEFAULT_API_PORT: u16 = 3001;

/// Default digest backend name.
pub const DEFAULT_DIGEST_BACKEND: &str = "sha256";

/// Message attached to a sweep that found nothing to spend.
pub const EMPTY_SWEEP_MESSAGE: &str = "No notes found for provided view key";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_is_digest_prefix() {
        assert!(ADDRESS_SIZE < DIGEST_SIZE);
        assert_eq!(ADDRESS_SIZE * 2, 40);
    }

    #[test]
    fn test_view_tag_space() {
        assert_eq!(VIEW_TAG_SPACE, 1 << (VIEW_TAG_SIZE * 8));
    }

    #[test]
    fn test_amount_word_matches_hex_padding() {
        // amounts are rendered as 64 hex characters
        assert_eq!(AMOUNT_WORD_SIZE * 2, DIGEST_HEX_LEN);
    }
}
