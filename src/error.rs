//! Error kinds for the DID/zk core (§7).
//!
//! Modeled on the `ZkError`/`ZkpError` enums seen across the retrieval
//! pack's identity crates: a single `thiserror`-derived enum, one variant
//! per failure class, with `#[from]` conversions for the arkworks error
//! types the prover/verifier can surface.

use thiserror::Error;

/// Errors returned by every fallible operation in this crate.
#[derive(Debug, Error)]
pub enum DidError {
    /// A DID or credential id is unknown to the registry.
    #[error("not found: {0}")]
    NotFound(String),

    /// Malformed hex/bytes, an out-of-range scalar, or an age/threshold
    /// outside the circuit's supported bit width.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The Groth16 prover rejected the witness (unsatisfiable assignment).
    #[error("circuit failed: {0}")]
    CircuitFailed(String),

    /// RNG failure, serialization failure, or an invariant the core
    /// otherwise assumes can never break.
    #[error("internal error: {0}")]
    Internal(String),

    /// Circuit-specific setup failed at service construction. Always
    /// fatal — callers should not retry.
    #[error("setup failed: {0}")]
    SetupFailed(String),
}

impl DidError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        DidError::InvalidInput(msg.into())
    }

    pub(crate) fn internal(msg: impl Into<String>) -> Self {
        DidError::Internal(msg.into())
    }
}

impl From<ark_relations::r1cs::SynthesisError> for DidError {
    fn from(e: ark_relations::r1cs::SynthesisError) -> Self {
        // `AssignmentMissing`/unsatisfiable witnesses surface during
        // proving; anything else (malformed constraint system) is a bug
        // in our own circuit code, but we still report it as
        // `CircuitFailed` rather than panicking on a runtime input path.
        DidError::CircuitFailed(e.to_string())
    }
}

/// Result alias used throughout the crate.
pub type DidResult<T> = Result<T, DidError>;
