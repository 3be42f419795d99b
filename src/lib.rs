//! Non-interactive zero-knowledge proofs of discrete-logarithm equality (DLEQ).
//!
//! Given two generators `g` and `h` and a secret scalar `x`, a [`DleqProof`] convinces
//! a verifier that `xG = g^x` and `xH = h^x` share the same exponent, without
//! revealing `x`. The construction is the Chaum-Pedersen sigma protocol made
//! non-interactive with the Fiat-Shamir transform over a merlin [`Transcript`].
//!
//! Many instances can be proven together with [`prove_batch`]: every proof in the
//! resulting [`BatchProof`] carries one challenge derived from the whole batch.
//!
//! The engine is generic over the [`Group`] trait. Two groups ship with the crate:
//! [`Ristretto255`] and [`P256`].
//!
//! # Example
//!
//! ```rust
//! use dleq::{DleqProof, Generators, Group, Ristretto255, SecureRng, Witness};
//!
//! let mut rng = SecureRng::new();
//! let generators = Generators::<Ristretto255>::from_seeds(b"G0", b"H0").unwrap();
//! let witness = Witness::new(Ristretto255::random_scalar(&mut rng));
//!
//! let (proof, commitments) = DleqProof::prove(&mut rng, &generators, &witness).unwrap();
//! assert!(proof.verify(&generators, &commitments).is_ok());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Batch construction configuration.
pub mod config;
/// Group trait and secure randomness.
pub mod crypto;
/// Error types.
pub mod error;
/// Concrete group implementations.
pub mod groups;
/// Proof construction and verification.
pub mod protocol;

pub use config::BatchConfig;
pub use crypto::{Group, SecureRng};
pub use error::Error;
pub use groups::{P256, Ristretto255};
pub use protocol::batch::{prove_batch, prove_batch_with_config, BatchProof};
pub use protocol::{Commitments, DleqProof, Generators, Prover, Transcript, Verifier, Witness};

/// Result type used throughout the crate.
pub type Result<T> = core::result::Result<T, Error>;
