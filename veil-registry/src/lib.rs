//! # VEIL Registry
//!
//! Announcement storage and retrieval for the VEIL protocol.
//!
//! The only backend today is [`MemoryLedger`]: an append-only, in-process
//! log suitable for development, testing, and single-node deployments.
//! Persistent or on-chain ledgers plug in behind the same
//! [`AnnouncementLedger`](veil_core::AnnouncementLedger) trait.
//!
//! ## Example
//!
//! ```rust,ignore
//! use veil_registry::{Ledger, MemoryLedger};
//!
//! let ledger = MemoryLedger::new();
//!
//! // Record an announcement
//! let id = ledger.append(announcement).await?;
//!
//! // Scan by recomputed view tag
//! let matching = ledger.scan(tag, &view_key, &digest).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod memory;

pub use memory::MemoryLedger;

// Re-export the trait from core
pub use veil_core::traits::AnnouncementLedger as Ledger;
