//! Domain types for VEIL.
//!
//! This module provides all the core data structures used throughout the protocol:
//!
//! - [`PublicKey`], [`Hash32`], [`StealthAddress`], [`ViewTag`]: fixed-size hex values
//! - [`MetaAddress`]: Published (spend key, view key) pair
//! - [`Announcement`]: A recorded stealth derivation
//! - [`Note`], [`PoolState`], [`SweepOutcome`]: Shielded pool accounting
//! - [`Proof`]: Opaque proof placeholder

mod keys;
mod address;
mod announcement;
mod note;
mod proof;

pub use keys::*;
pub use address::*;
pub use announcement::*;
pub use note::*;
pub use proof::*;
