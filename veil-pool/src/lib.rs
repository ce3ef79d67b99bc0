//! # VEIL Pool
//!
//! The shielded note pool: UTXO-style accounting over stealth addresses.
//!
//! Deposits turn an announcement and an amount into a [`Note`] whose
//! commitment hides (address, amount, secret). Sweeps spend every unspent
//! note at a set of owned addresses and reveal only their nullifiers.
//!
//! The pool does not decide which addresses a view key owns; the caller
//! passes that set in, so the discovery rule lives with the rest of the
//! stealth logic.
//!
//! ## Example
//!
//! ```rust,ignore
//! use veil_pool::NotePool;
//!
//! let pool = NotePool::new(digest);
//! let note = pool.deposit(&announcement, 5)?;
//! let outcome = pool.sweep(&owned_addresses, "0xabc");
//! assert_eq!(outcome.swept_total, 5);
//! ```
//!
//! [`Note`]: veil_core::Note

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod pool;

pub use pool::{validate_amount, NotePool};
