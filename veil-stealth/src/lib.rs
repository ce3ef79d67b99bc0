//! # VEIL Stealth Payment Protocol
//!
//! High-level API for creating, discovering and spending stealth payments.
//!
//! This crate provides:
//!
//! - **Payment Creation**: Derive one-time addresses and announcements from a meta-address
//! - **Payment Discovery**: View tag prefilter and the re-derivation ownership rule
//! - **Proofs**: A placeholder prover with the shape a SNARK backend must keep
//! - **Service**: [`StealthService`], which owns the ledger and the note pool
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use veil_stealth::StealthService;
//!
//! let service = StealthService::builder().build();
//!
//! // Sender: resolve the recipient and derive a one-time address
//! let meta = service.resolve("alice.eth").await?;
//! let announcement = service.derive("alice.eth", &meta).await?;
//!
//! // Fund it through the pool
//! service.deposit(announcement.id, 5).await?;
//!
//! // Recipient: spend everything the view key owns
//! let outcome = service.sweep(&meta.view_key.to_hex(), "0xabc").await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

pub mod payment;
pub mod discovery;
pub mod prover;
pub mod service;

pub use payment::{create_announcement, create_announcement_with_rng};
pub use discovery::{owned_addresses, owns_announcement, scan_announcement, ScanResult, ScanStats};
pub use prover::PlaceholderProver;
pub use service::{ServiceBuilder, ServiceStats, StealthService};
