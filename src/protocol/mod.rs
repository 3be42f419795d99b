/// Batch proofs sharing one challenge.
pub mod batch;
/// Core protocol types (generators, witness, commitments, proof).
pub mod gadgets;
/// Prover implementation for generating proofs.
pub mod prover;
/// Merlin transcript wrapper for the Fiat-Shamir transform.
pub mod transcript;
/// Verifier implementation for validating proofs.
pub mod verifier;

pub use batch::BatchProof;
pub use gadgets::{Commitments, DleqProof, Generators, Witness};
pub use prover::Prover;
pub use transcript::Transcript;
pub use verifier::Verifier;
