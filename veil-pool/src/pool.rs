//! Note storage, deposit, state and sweep.

use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info, instrument, warn};

use veil_core::error::{Result, VeilError};
use veil_core::traits::DigestPrimitive;
use veil_core::types::{
    Announcement, Note, NoteView, PoolState, StealthAddress, SweepOutcome, Transfer,
};
use veil_crypto::derive::{note_commitment, note_nullifier, note_secret};

/// Checks that a requested amount is a positive value that fits a note.
///
/// Amounts arrive signed so that zero and negative requests can be told
/// apart from overflow.
pub fn validate_amount(amount: i128) -> Result<u64> {
    if amount <= 0 {
        return Err(VeilError::InvalidAmount(format!(
            "amount must be positive, got {}",
            amount
        )));
    }
    u64::try_from(amount).map_err(|_| {
        VeilError::InvalidAmount(format!("amount {} exceeds {}", amount, u64::MAX))
    })
}

/// The shielded note pool.
///
/// All notes live in one arena behind a single mutex. Deposit, state and
/// sweep each take the lock once, so a sweep selects and marks its notes
/// atomically and no note can be spent by two sweeps.
pub struct NotePool {
    digest: Arc<dyn DigestPrimitive>,
    notes: Mutex<Vec<Note>>,
}

impl NotePool {
    /// Creates an empty pool that derives note values with `digest`.
    pub fn new(digest: Arc<dyn DigestPrimitive>) -> Self {
        Self {
            digest,
            notes: Mutex::new(Vec::new()),
        }
    }

    /// Creates a note for a recorded announcement.
    ///
    /// The returned view carries no nullifier and no secret.
    ///
    /// Callers holding a signed request amount run it through
    /// [`validate_amount`] first.
    ///
    /// # Errors
    /// `InvalidAmount` if `amount` is zero.
    #[instrument(skip(self, announcement), fields(announcement = announcement.id))]
    pub fn deposit(&self, announcement: &Announcement, amount: u64) -> Result<NoteView> {
        if amount == 0 {
            return Err(VeilError::InvalidAmount("amount must be positive, got 0".into()));
        }

        let secret = note_secret(self.digest.as_ref(), announcement);
        let address = announcement.address;
        let commitment = note_commitment(self.digest.as_ref(), &address, amount, &secret);
        let nullifier = note_nullifier(self.digest.as_ref(), &secret, &address);

        let mut notes = self.notes.lock();

        if notes.iter().any(|n| n.commitment == commitment) {
            // Same announcement and amount twice; the nullifiers collide too.
            warn!(%commitment, "Duplicate commitment accepted");
        }

        let note = Note {
            id: notes.len() as u64 + 1,
            commitment,
            address,
            amount,
            nullifier,
            spent: false,
        };
        let view = note.view();
        notes.push(note);

        debug!(id = view.id, amount, "Deposited note");
        Ok(view)
    }

    /// Returns the aggregate pool state.
    ///
    /// Nullifiers of unspent notes are never included.
    pub fn state(&self) -> PoolState {
        let notes = self.notes.lock();

        let mut state = PoolState {
            total: 0,
            commitments: Vec::with_capacity(notes.len()),
            nullifiers: Vec::new(),
        };

        for note in notes.iter() {
            state.commitments.push(note.view());
            if note.spent {
                state.nullifiers.push(note.nullifier);
            } else {
                state.total += u128::from(note.amount);
            }
        }

        state
    }

    /// Spends every unspent note at one of `owned` and emits a single
    /// aggregate transfer to `destination`.
    ///
    /// Nothing to spend is not an error: the outcome is empty.
    #[instrument(skip(self, owned), fields(owned = owned.len()))]
    pub fn sweep(&self, owned: &HashSet<StealthAddress>, destination: &str) -> SweepOutcome {
        let mut outcome = SweepOutcome::default();

        if owned.is_empty() {
            debug!("No owned addresses, nothing to sweep");
            return outcome;
        }

        let mut notes = self.notes.lock();
        for note in notes
            .iter_mut()
            .filter(|n| !n.spent && owned.contains(&n.address))
        {
            note.spent = true;
            outcome.swept_total += u128::from(note.amount);
            outcome.spent_note_ids.push(note.id);
        }
        drop(notes);

        if outcome.is_empty() {
            debug!("No unspent notes at owned addresses");
            return outcome;
        }

        outcome.transfers.push(Transfer {
            to: destination.to_string(),
            value: outcome.swept_total,
        });

        info!(
            swept = %outcome.swept_total,
            notes = outcome.spent_note_ids.len(),
            "Swept notes"
        );
        outcome
    }

    /// Looks up a note by id (including its nullifier).
    pub fn note(&self, id: u64) -> Option<Note> {
        if id == 0 {
            return None;
        }
        self.notes.lock().get((id - 1) as usize).cloned()
    }

    /// Returns the number of notes, spent or not.
    pub fn len(&self) -> usize {
        self.notes.lock().len()
    }

    /// Returns true if no note has been deposited.
    pub fn is_empty(&self) -> bool {
        self.notes.lock().is_empty()
    }

    /// Returns the number of unspent notes.
    pub fn unspent_count(&self) -> usize {
        self.notes.lock().iter().filter(|n| !n.spent).count()
    }
}

impl std::fmt::Debug for NotePool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotePool")
            .field("digest", &self.digest.name())
            .field("notes", &self.len())
            .finish()
    }
}
