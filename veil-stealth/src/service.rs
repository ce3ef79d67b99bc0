//! The stealth payment service.
//!
//! [`StealthService`] owns one announcement ledger and one note pool and
//! wires them to a digest backend, a resolver and a prover. Every transport
//! (HTTP, CLI) holds a service instance and calls into it; there is no
//! global state.

use std::sync::Arc;

use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use veil_core::error::{Result, VeilError};
use veil_core::traits::{AnnouncementLedger, DigestPrimitive, MetaAddressResolver, Prover};
use veil_core::types::{
    Announcement, MetaAddress, NoteView, PoolState, Proof, SweepOutcome, ViewTag,
};
use veil_crypto::{digest_backend, Sha256Digest};
use veil_ens::RandomResolver;
use veil_pool::{validate_amount, NotePool};
use veil_registry::MemoryLedger;

use crate::discovery::owned_addresses;
use crate::payment::create_announcement_with_rng;
use crate::prover::PlaceholderProver;

/// Counters reported by health endpoints.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServiceStats {
    /// Announcements recorded
    pub announcements: u64,
    /// Notes deposited, spent or not
    pub notes: u64,
    /// Digest backend name
    pub digest: String,
    /// Resolver backend name
    pub resolver: String,
}

/// Builder for [`StealthService`].
///
/// Unset parts default to SHA-256, an in-memory ledger, the random resolver
/// and the placeholder prover.
#[derive(Default)]
pub struct ServiceBuilder {
    digest: Option<Arc<dyn DigestPrimitive>>,
    ledger: Option<Arc<dyn AnnouncementLedger>>,
    resolver: Option<Arc<dyn MetaAddressResolver>>,
    prover: Option<Arc<dyn Prover>>,
}

impl ServiceBuilder {
    /// Creates a builder with every part unset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the digest backend.
    pub fn digest(mut self, digest: Arc<dyn DigestPrimitive>) -> Self {
        self.digest = Some(digest);
        self
    }

    /// Sets the digest backend by name.
    pub fn digest_name(self, name: &str) -> Result<Self> {
        Ok(self.digest(digest_backend(name)?))
    }

    /// Sets the announcement ledger.
    pub fn ledger(mut self, ledger: Arc<dyn AnnouncementLedger>) -> Self {
        self.ledger = Some(ledger);
        self
    }

    /// Sets the meta-address resolver.
    pub fn resolver(mut self, resolver: Arc<dyn MetaAddressResolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    /// Sets the prover.
    pub fn prover(mut self, prover: Arc<dyn Prover>) -> Self {
        self.prover = Some(prover);
        self
    }

    /// Builds the service.
    pub fn build(self) -> StealthService {
        let digest = self.digest.unwrap_or_else(|| Arc::new(Sha256Digest));
        StealthService {
            pool: NotePool::new(digest.clone()),
            digest,
            ledger: self.ledger.unwrap_or_else(|| Arc::new(MemoryLedger::new())),
            resolver: self.resolver.unwrap_or_else(|| Arc::new(RandomResolver::new())),
            prover: self.prover.unwrap_or_else(|| Arc::new(PlaceholderProver::new())),
        }
    }
}

/// Stealth payment service: resolve, derive, scan, deposit, sweep, prove.
pub struct StealthService {
    digest: Arc<dyn DigestPrimitive>,
    ledger: Arc<dyn AnnouncementLedger>,
    pool: NotePool,
    resolver: Arc<dyn MetaAddressResolver>,
    prover: Arc<dyn Prover>,
}

impl StealthService {
    /// Starts a builder.
    pub fn builder() -> ServiceBuilder {
        ServiceBuilder::new()
    }

    /// Creates a service with every default.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Returns the digest backend.
    pub fn digest(&self) -> &dyn DigestPrimitive {
        self.digest.as_ref()
    }

    /// Returns the note pool.
    pub fn pool(&self) -> &NotePool {
        &self.pool
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Announcements
    // ═══════════════════════════════════════════════════════════════════════

    /// Resolves a name to a meta-address.
    #[instrument(skip(self))]
    pub async fn resolve(&self, name: &str) -> Result<MetaAddress> {
        self.resolver.resolve(name).await
    }

    /// Derives a stealth address for `meta` and records the announcement.
    #[instrument(skip(self, meta))]
    pub async fn derive(&self, name: &str, meta: &MetaAddress) -> Result<Announcement> {
        let announcement =
            create_announcement_with_rng(self.digest(), name, meta, &mut rand::thread_rng());
        self.record(announcement).await
    }

    /// Like [`derive`](Self::derive) with an injected RNG.
    pub async fn derive_with_rng<R: RngCore + CryptoRng>(
        &self,
        name: &str,
        meta: &MetaAddress,
        rng: &mut R,
    ) -> Result<Announcement> {
        let announcement = create_announcement_with_rng(self.digest(), name, meta, rng);
        self.record(announcement).await
    }

    async fn record(&self, mut announcement: Announcement) -> Result<Announcement> {
        announcement.id = self.ledger.append(announcement.clone()).await?;
        info!(
            id = announcement.id,
            view_tag = %announcement.view_tag,
            address = %announcement.address,
            "Derived stealth address"
        );
        Ok(announcement)
    }

    /// Looks up a recorded announcement.
    ///
    /// # Errors
    /// `UnknownAnnouncement` if the id is not recorded.
    pub async fn announcement(&self, id: u64) -> Result<Announcement> {
        self.ledger
            .find(id)
            .await?
            .ok_or(VeilError::UnknownAnnouncement(id))
    }

    /// Returns announcements whose recomputed tag matches, parsing both
    /// arguments from hex.
    ///
    /// Malformed input is not an error: it matches nothing.
    #[instrument(skip(self, view_key))]
    pub async fn scan(&self, tag: &str, view_key: &str) -> Result<Vec<Announcement>> {
        let tag = match ViewTag::from_hex(tag.trim()) {
            Ok(tag) => tag,
            Err(e) => {
                debug!(error = %e, "Unparseable view tag, empty scan");
                return Ok(Vec::new());
            }
        };
        let view_key = match hex::decode(view_key.trim()) {
            Ok(key) => key,
            Err(e) => {
                debug!(error = %e, "Unparseable view key, empty scan");
                return Ok(Vec::new());
            }
        };
        self.scan_tag(tag, &view_key).await
    }

    /// Returns announcements whose recomputed tag equals `tag`.
    pub async fn scan_tag(&self, tag: ViewTag, view_key: &[u8]) -> Result<Vec<Announcement>> {
        self.ledger.scan(tag, view_key, self.digest()).await
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Pool
    // ═══════════════════════════════════════════════════════════════════════

    /// Deposits `amount` to the stealth address of a recorded announcement.
    ///
    /// The amount is checked before the announcement is looked up.
    ///
    /// # Errors
    /// `InvalidAmount` if the amount is not in `1..=u64::MAX`;
    /// `UnknownAnnouncement` if the id is not recorded. Neither creates a note.
    #[instrument(skip(self))]
    pub async fn deposit(&self, announcement_id: u64, amount: i128) -> Result<NoteView> {
        let amount = validate_amount(amount)?;
        let announcement = self.announcement(announcement_id).await?;
        self.pool.deposit(&announcement, amount)
    }

    /// Returns the pool state.
    pub fn state(&self) -> PoolState {
        self.pool.state()
    }

    /// Spends every unspent note owned by `view_key` (hex) into one transfer
    /// to `destination`.
    ///
    /// # Errors
    /// `MissingParameters` if either argument is empty; `InvalidEncoding` if
    /// the view key is not hex.
    #[instrument(skip(self, view_key))]
    pub async fn sweep(&self, view_key: &str, destination: &str) -> Result<SweepOutcome> {
        let view_key = view_key.trim();
        let destination = destination.trim();
        if view_key.is_empty() || destination.is_empty() {
            return Err(VeilError::MissingParameters(
                "view key and destination address are required".into(),
            ));
        }
        let view_key = hex::decode(view_key)?;

        // Append-only ledger: announcements recorded after this snapshot
        // cannot have notes yet.
        let announcements = self.ledger.snapshot().await?;
        let owned = owned_addresses(self.digest(), &announcements, &view_key);
        debug!(owned = owned.len(), "Resolved owned addresses");

        Ok(self.pool.sweep(&owned, destination))
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Proofs
    // ═══════════════════════════════════════════════════════════════════════

    /// Produces a derivation proof, over an announcement if `id` is given.
    pub async fn derivation_proof(&self, id: Option<u64>) -> Result<Proof> {
        let announcement = self.statement(id).await?;
        Ok(self.prover.prove_derivation(announcement.as_ref()))
    }

    /// Produces an ownership proof, over an announcement if `id` is given.
    pub async fn ownership_proof(&self, id: Option<u64>) -> Result<Proof> {
        let announcement = self.statement(id).await?;
        Ok(self.prover.prove_ownership(announcement.as_ref()))
    }

    async fn statement(&self, id: Option<u64>) -> Result<Option<Announcement>> {
        match id {
            Some(id) => self.announcement(id).await.map(Some),
            None => Ok(None),
        }
    }

    /// Returns health counters.
    pub async fn stats(&self) -> Result<ServiceStats> {
        Ok(ServiceStats {
            announcements: self.ledger.count().await?,
            notes: self.pool.len() as u64,
            digest: self.digest.name().to_string(),
            resolver: self.resolver.backend().to_string(),
        })
    }
}

impl Default for StealthService {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for StealthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StealthService")
            .field("digest", &self.digest.name())
            .field("resolver", &self.resolver.backend())
            .field("pool", &self.pool)
            .finish()
    }
}
