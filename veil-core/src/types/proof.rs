//! Opaque proof objects produced by an external prover.
//!
//! The core never inspects proof internals; a [`Proof`] is carried from a
//! [`crate::traits::Prover`] to whoever asked for it.

use serde::{Deserialize, Serialize};

/// Which statement a proof attests to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProofKind {
    /// The stealth address was derived correctly from the meta-address.
    Derivation,
    /// The prover controls the keys behind the stealth address.
    Ownership,
}

/// A three-element proof, Groth16-shaped.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proof {
    /// First element
    #[serde(with = "hex")]
    pub a: Vec<u8>,
    /// Second element
    #[serde(with = "hex")]
    pub b: Vec<u8>,
    /// Third element
    #[serde(with = "hex")]
    pub c: Vec<u8>,
}
