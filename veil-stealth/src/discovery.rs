//! Payment discovery (recipient side).
//!
//! Two rules decide whether an announcement belongs to a view key:
//!
//! 1. **Prefilter**: the recomputed tag `digest(view_key, R)[0]` equals the
//!    announcement's tag. Cheap, with a 1/256 false positive rate.
//! 2. **Ownership**: `digest(spend_key, view_key, R)` equals the
//!    announcement's derived secret. This is the rule sweeps use.
//!
//! Any announcement that passes (2) also passes (1), since both were derived
//! from the same view key and R.

use std::collections::HashSet;

use subtle::ConstantTimeEq;

use veil_core::traits::DigestPrimitive;
use veil_core::types::{Announcement, StealthAddress};
use veil_crypto::verify_view_tag;

/// Result of checking a single announcement against a view key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScanResult {
    /// View tag didn't match - not for this recipient
    NotForUs,
    /// View tag matched but re-derivation did not (tag collision)
    TagCollision,
    /// View tag and re-derivation both matched - payment discovered
    Discovered,
}

impl ScanResult {
    /// Returns true if a payment was discovered.
    pub fn is_discovered(&self) -> bool {
        matches!(self, ScanResult::Discovered)
    }

    /// Returns true if the prefilter passed.
    pub fn tag_matched(&self) -> bool {
        !matches!(self, ScanResult::NotForUs)
    }
}

/// Statistics for scanning operations.
#[derive(Debug, Clone, Default)]
pub struct ScanStats {
    /// Total announcements scanned
    pub total_scanned: u64,
    /// Number of view tag matches
    pub view_tag_matches: u64,
    /// Number of payments discovered
    pub discoveries: u64,
    /// Duration of the scan in milliseconds
    pub duration_ms: u64,
}

impl ScanStats {
    /// Creates a new stats tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a scan result.
    pub fn record(&mut self, result: ScanResult) {
        self.total_scanned += 1;
        match result {
            ScanResult::Discovered => {
                self.view_tag_matches += 1;
                self.discoveries += 1;
            }
            ScanResult::TagCollision => {
                self.view_tag_matches += 1;
            }
            ScanResult::NotForUs => {}
        }
    }

    /// Returns the scan rate (announcements per second).
    pub fn rate(&self) -> f64 {
        if self.duration_ms == 0 {
            0.0
        } else {
            (self.total_scanned as f64 / self.duration_ms as f64) * 1000.0
        }
    }

    /// Returns the filter efficiency (percentage of announcements filtered).
    pub fn filter_efficiency(&self) -> f64 {
        if self.total_scanned == 0 {
            0.0
        } else {
            ((self.total_scanned - self.view_tag_matches) as f64 / self.total_scanned as f64) * 100.0
        }
    }
}

/// Re-derives the stealth secret with `view_key` and compares it, in
/// constant time, to the announcement's derived secret.
pub fn owns_announcement(
    digest: &dyn DigestPrimitive,
    announcement: &Announcement,
    view_key: &[u8],
) -> bool {
    let secret = digest.hash_parts(&[
        announcement.meta_address.spend_key.as_bytes(),
        view_key,
        announcement.ephemeral_public.as_bytes(),
    ]);
    secret
        .as_bytes()
        .ct_eq(announcement.derived_secret.as_bytes())
        .into()
}

/// Runs the prefilter, then the ownership rule.
pub fn scan_announcement(
    digest: &dyn DigestPrimitive,
    announcement: &Announcement,
    view_key: &[u8],
) -> ScanResult {
    if !verify_view_tag(
        digest,
        view_key,
        &announcement.ephemeral_public,
        announcement.view_tag,
    ) {
        return ScanResult::NotForUs;
    }

    if owns_announcement(digest, announcement, view_key) {
        ScanResult::Discovered
    } else {
        ScanResult::TagCollision
    }
}

/// Collects the stealth addresses of every announcement `view_key` owns.
pub fn owned_addresses(
    digest: &dyn DigestPrimitive,
    announcements: &[Announcement],
    view_key: &[u8],
) -> HashSet<StealthAddress> {
    announcements
        .iter()
        .filter(|ann| scan_announcement(digest, ann, view_key).is_discovered())
        .map(|ann| ann.address)
        .collect()
}
