//! Error types for DLEQ proofs

/// Main error types for the library.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Batch input sequences do not have the same length.
    #[error("Batch inputs have different lengths")]
    DifferentLengths,

    /// The proof did not verify.
    #[error("Proof verification failed")]
    VerificationFailed,

    /// Invalid group parameters were provided.
    #[error("Invalid group parameters: {0}")]
    InvalidParams(String),

    /// A scalar value is invalid or out of range.
    #[error("Invalid scalar: {0}")]
    InvalidScalar(String),

    /// A group element is invalid or not in the correct subgroup.
    #[error("Invalid group element: {0}")]
    InvalidGroupElement(String),

    /// Serialized proof bytes are malformed.
    #[error("Invalid proof encoding: {0}")]
    InvalidEncoding(String),
}
