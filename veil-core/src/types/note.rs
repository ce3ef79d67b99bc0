//! Shielded pool types.
//!
//! - [`Note`]: A pool entry, including its nullifier (pool-internal)
//! - [`NoteView`]: The public projection handed to depositors and state readers
//! - [`PoolState`]: Aggregate state snapshot
//! - [`SweepOutcome`]: Result of spending every note discoverable by a view key

use serde::{Deserialize, Serialize};

use super::{Hash32, StealthAddress};

/// A note held by the pool.
///
/// `spent` only ever moves from false to true.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Note {
    /// Unique identifier (assigned by the pool, starts at 1)
    pub id: u64,
    /// digest(address, amount_word, note_secret)
    pub commitment: Hash32,
    /// Stealth address copied from the owning announcement
    pub address: StealthAddress,
    /// Positive amount in base units
    pub amount: u64,
    /// digest(note_secret, address); only revealed once spent
    pub nullifier: Hash32,
    /// Whether a sweep has consumed this note
    pub spent: bool,
}

impl Note {
    /// Returns the public projection of this note.
    pub fn view(&self) -> NoteView {
        NoteView {
            id: self.id,
            commitment: self.commitment,
            address: self.address,
            amount: self.amount,
            spent: self.spent,
        }
    }
}

/// Public projection of a note (no nullifier, no secret).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteView {
    /// Note id
    pub id: u64,
    /// Commitment
    pub commitment: Hash32,
    /// Stealth address
    pub address: StealthAddress,
    /// Amount
    pub amount: u64,
    /// Spent flag
    pub spent: bool,
}

impl From<&Note> for NoteView {
    fn from(note: &Note) -> Self {
        note.view()
    }
}

/// Aggregate pool state.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolState {
    /// Sum of amounts over unspent notes
    pub total: u128,
    /// Every note, spent or not, in deposit order
    pub commitments: Vec<NoteView>,
    /// Nullifiers of spent notes only
    pub nullifiers: Vec<Hash32>,
}

/// An aggregate transfer instruction emitted by a sweep.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    /// Destination address, passed through as given
    pub to: String,
    /// Total value moved
    pub value: u128,
}

/// Result of a sweep.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepOutcome {
    /// Sum of the amounts of the notes spent by this sweep
    pub swept_total: u128,
    /// Zero or one aggregate transfer
    pub transfers: Vec<Transfer>,
    /// Ids of the notes spent by this sweep, in deposit order
    pub spent_note_ids: Vec<u64>,
}

impl SweepOutcome {
    /// Returns true if the sweep spent nothing.
    pub fn is_empty(&self) -> bool {
        self.spent_note_ids.is_empty()
    }
}
