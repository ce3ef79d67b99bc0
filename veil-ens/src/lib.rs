//! # VEIL Name Resolution
//!
//! Name → meta-address resolution for VEIL.
//!
//! - [`RandomResolver`]: the stub oracle; every call returns fresh random keys
//! - [`DirectoryResolver`]: a fixed table of published meta-addresses, loaded
//!   from JSON, that fails with `NotRegistered` on unknown names
//!
//! An ENS-backed resolver would implement the same
//! [`MetaAddressResolver`](veil_core::MetaAddressResolver) trait.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod directory;
mod resolver;

pub use directory::{DirectoryEntry, DirectoryResolver};
pub use resolver::{normalize_name, RandomResolver};
