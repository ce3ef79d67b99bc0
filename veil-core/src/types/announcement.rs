//! Announcement types for the VEIL ledger.
//!
//! Announcements are produced by the derivation engine and carry everything a
//! recipient needs to recognize a payment: the ephemeral value R, the derived
//! secret, the stealth address, and the discovery tag.

use serde::{Deserialize, Serialize};

use super::{Hash32, MetaAddress, PublicKey, StealthAddress, ViewTag};
use crate::constants::VIEW_TAG_SPACE;

/// An announcement recorded in the ledger.
///
/// Immutable after creation and never deleted.
///
/// Invariants (checked by `veil_crypto::derive::verify_announcement`):
/// - `derived_secret == digest(spend_key, view_key, ephemeral_public)`
/// - `address == derived_secret[..20]`
/// - `view_tag == digest(view_key, ephemeral_public)[0]`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Announcement {
    /// Unique identifier (assigned by the ledger, starts at 1)
    pub id: u64,
    /// Name the meta-address was resolved from
    pub subject_name: String,
    /// Meta-address the payment was derived for
    pub meta_address: MetaAddress,
    /// Ephemeral value R
    pub ephemeral_public: PublicKey,
    /// digest(spend_key, view_key, R)
    pub derived_secret: Hash32,
    /// One-time address (first 20 bytes of the derived secret)
    pub address: StealthAddress,
    /// Discovery tag (first byte of digest(view_key, R))
    pub view_tag: ViewTag,
}

impl Announcement {
    /// Creates an announcement that has not been recorded yet.
    pub fn new(
        subject_name: impl Into<String>,
        meta_address: MetaAddress,
        ephemeral_public: PublicKey,
        derived_secret: Hash32,
        view_tag: ViewTag,
    ) -> Self {
        Self {
            id: 0, // Assigned by ledger
            subject_name: subject_name.into(),
            meta_address,
            ephemeral_public,
            address: StealthAddress::from_secret(&derived_secret),
            derived_secret,
            view_tag,
        }
    }

    /// Returns true once the ledger has assigned an id.
    pub fn is_recorded(&self) -> bool {
        self.id != 0
    }
}

/// Statistics about announcements in a ledger.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AnnouncementStats {
    /// Total number of announcements
    pub total_count: u64,
    /// Announcements per view tag (for distribution analysis)
    pub view_tag_distribution: Vec<u64>,
}

impl Default for AnnouncementStats {
    fn default() -> Self {
        Self {
            total_count: 0,
            view_tag_distribution: vec![0; VIEW_TAG_SPACE],
        }
    }
}

impl AnnouncementStats {
    /// Creates empty stats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates stats with a new announcement.
    pub fn add(&mut self, announcement: &Announcement) {
        self.total_count += 1;
        self.view_tag_distribution[announcement.view_tag.value() as usize] += 1;
    }

    /// Returns the most common view tag and its count.
    pub fn most_common(&self) -> Option<(ViewTag, u64)> {
        self.view_tag_distribution
            .iter()
            .enumerate()
            .filter(|(_, &count)| count > 0)
            .max_by_key(|(_, &count)| count)
            .map(|(tag, &count)| (ViewTag::new(tag as u8), count))
    }

    /// Chi-squared statistic against a uniform tag distribution.
    pub fn chi_squared(&self) -> f64 {
        let expected = self.total_count as f64 / VIEW_TAG_SPACE as f64;
        if expected == 0.0 {
            return 0.0;
        }

        self.view_tag_distribution
            .iter()
            .map(|&observed| {
                let diff = observed as f64 - expected;
                (diff * diff) / expected
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_announcement(tag: u8) -> Announcement {
        let meta = MetaAddress::new(PublicKey::from_array([1; 32]), PublicKey::from_array([2; 32]));
        Announcement::new(
            "alice.eth",
            meta,
            PublicKey::from_array([3; 32]),
            Hash32::from_array([0x5a; 32]),
            ViewTag::new(tag),
        )
    }

    #[test]
    fn test_announcement_creation() {
        let ann = make_announcement(0x42);
        assert_eq!(ann.id, 0);
        assert!(!ann.is_recorded());
        assert_eq!(ann.address.to_hex_unprefixed(), "5a".repeat(20));
    }

    #[test]
    fn test_announcement_serde() {
        let ann = make_announcement(0x0f);
        let json = serde_json::to_value(&ann).unwrap();
        assert_eq!(json["view_tag"], "0f");
        assert_eq!(json["address"], format!("0x{}", "5a".repeat(20)));

        let back: Announcement = serde_json::from_value(json).unwrap();
        assert_eq!(back, ann);
    }

    #[test]
    fn test_announcement_stats() {
        let mut stats = AnnouncementStats::new();

        stats.add(&make_announcement(0x42));
        stats.add(&make_announcement(0x42));
        stats.add(&make_announcement(0x00));

        assert_eq!(stats.total_count, 3);
        assert_eq!(stats.view_tag_distribution[0x42], 2);
        assert_eq!(stats.view_tag_distribution[0x00], 1);
        assert_eq!(stats.most_common(), Some((ViewTag::new(0x42), 2)));
    }

    #[test]
    fn test_empty_stats() {
        let stats = AnnouncementStats::new();
        assert_eq!(stats.most_common(), None);
        assert_eq!(stats.chi_squared(), 0.0);
    }
}
