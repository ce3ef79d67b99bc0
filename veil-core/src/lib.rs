//! # VEIL Core
//!
//! Core types, errors, and traits for the VEIL stealth payment protocol.
//!
//! This crate provides the foundational building blocks used by all other VEIL crates:
//!
//! - **Types**: Meta-addresses, announcements, pool notes, and proof placeholders
//! - **Errors**: The protocol error taxonomy
//! - **Constants**: Sizes and defaults shared across crates
//! - **Traits**: The seams where backends are substituted (digest, ledger, resolver, prover)
//!
//! ## Example
//!
//! ```rust
//! use veil_core::{MetaAddress, PublicKey};
//!
//! let meta = MetaAddress::new(PublicKey::from_array([1u8; 32]), PublicKey::from_array([2u8; 32]));
//! let json = serde_json::to_string(&meta).unwrap();
//! assert!(json.contains("0101"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all)]

pub mod constants;
pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use constants::*;
pub use error::{Result, VeilError};
pub use traits::*;
pub use types::*;
