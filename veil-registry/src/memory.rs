//! In-memory announcement ledger.
//!
//! Fast, thread-safe storage suitable for development, testing,
//! and single-process deployments.

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::{debug, instrument};

use veil_core::error::Result;
use veil_core::traits::{AnnouncementLedger, DigestPrimitive};
use veil_core::types::{Announcement, AnnouncementStats, ViewTag};
use veil_crypto::verify_view_tag;

/// In-memory announcement ledger.
///
/// An append-only vector behind a single lock. The id of an announcement is
/// its 1-based position, assigned while the write lock is held, so ids are
/// unique, gap-free, and match insertion order even under concurrent appends.
///
/// # Scanning
///
/// There is no view tag index. A scan recomputes `digest(view_key, R)[0]`
/// for every announcement, because the stored tag was computed with the
/// recipient's view key and the scanner's key may differ.
#[derive(Debug)]
pub struct MemoryLedger {
    inner: RwLock<Inner>,
}

#[derive(Debug)]
struct Inner {
    announcements: Vec<Announcement>,
    stats: AnnouncementStats,
}

impl MemoryLedger {
    /// Creates a new empty in-memory ledger.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates a ledger with preallocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: RwLock::new(Inner {
                announcements: Vec::with_capacity(capacity),
                stats: AnnouncementStats::new(),
            }),
        }
    }

    /// Returns the current statistics.
    pub fn stats(&self) -> AnnouncementStats {
        self.inner.read().stats.clone()
    }

    /// Returns the number of announcements.
    pub fn len(&self) -> usize {
        self.inner.read().announcements.len()
    }

    /// Returns true if the ledger is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.read().announcements.is_empty()
    }
}

impl Default for MemoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AnnouncementLedger for MemoryLedger {
    /// Appends an announcement, overwriting whatever id it carried.
    #[instrument(skip(self, announcement), fields(subject = %announcement.subject_name))]
    async fn append(&self, mut announcement: Announcement) -> Result<u64> {
        let mut inner = self.inner.write();
        let id = inner.announcements.len() as u64 + 1;
        announcement.id = id;

        debug!(id, view_tag = %announcement.view_tag, "Recording announcement");

        inner.stats.add(&announcement);
        inner.announcements.push(announcement);

        Ok(id)
    }

    #[instrument(skip(self))]
    async fn find(&self, id: u64) -> Result<Option<Announcement>> {
        if id == 0 {
            return Ok(None);
        }
        let inner = self.inner.read();
        Ok(inner.announcements.get((id - 1) as usize).cloned())
    }

    /// Linear scan over every announcement, in insertion order.
    #[instrument(skip(self, view_key, digest), fields(tag = %tag))]
    async fn scan(
        &self,
        tag: ViewTag,
        view_key: &[u8],
        digest: &dyn DigestPrimitive,
    ) -> Result<Vec<Announcement>> {
        let inner = self.inner.read();
        let matching: Vec<Announcement> = inner
            .announcements
            .iter()
            .filter(|ann| verify_view_tag(digest, view_key, &ann.ephemeral_public, tag))
            .cloned()
            .collect();

        debug!(
            scanned = inner.announcements.len(),
            count = matching.len(),
            "Scanned by view tag"
        );
        Ok(matching)
    }

    async fn snapshot(&self) -> Result<Vec<Announcement>> {
        Ok(self.inner.read().announcements.clone())
    }

    async fn count(&self) -> Result<u64> {
        Ok(self.inner.read().announcements.len() as u64)
    }
}
