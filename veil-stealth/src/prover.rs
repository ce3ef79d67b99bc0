//! Placeholder proof generation.

use rand::RngCore;
use tracing::debug;

use veil_core::constants::PROOF_ELEMENT_SIZE;
use veil_core::traits::Prover;
use veil_core::types::{Announcement, Proof, ProofKind};

/// Prover that returns random bytes in the shape of a Groth16 proof.
///
/// It proves nothing. The statement is ignored except for logging.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlaceholderProver;

impl PlaceholderProver {
    /// Creates the placeholder prover.
    pub fn new() -> Self {
        Self
    }

    fn random_proof(&self, kind: ProofKind, announcement: Option<&Announcement>) -> Proof {
        let mut rng = rand::thread_rng();
        let mut element = || {
            let mut bytes = vec![0u8; PROOF_ELEMENT_SIZE];
            rng.fill_bytes(&mut bytes);
            bytes
        };
        let proof = Proof {
            a: element(),
            b: element(),
            c: element(),
        };
        debug!(?kind, announcement = announcement.map(|a| a.id), "Generated placeholder proof");
        proof
    }
}

impl Prover for PlaceholderProver {
    fn prove_derivation(&self, announcement: Option<&Announcement>) -> Proof {
        self.random_proof(ProofKind::Derivation, announcement)
    }

    fn prove_ownership(&self, announcement: Option<&Announcement>) -> Proof {
        self.random_proof(ProofKind::Ownership, announcement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_proof_shape() {
        let proof = PlaceholderProver::new().prove_derivation(None);
        assert_eq!(proof.a.len(), PROOF_ELEMENT_SIZE);
        assert_eq!(proof.b.len(), PROOF_ELEMENT_SIZE);
        assert_eq!(proof.c.len(), PROOF_ELEMENT_SIZE);
    }

    #[test]
    fn test_proofs_are_fresh() {
        let prover = PlaceholderProver::new();
        let a = prover.prove_ownership(None);
        let b = prover.prove_ownership(None);
        assert_ne!(a, b);
        assert_ne!(a.a, a.b);
    }
}
