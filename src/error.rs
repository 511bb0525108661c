//! @acp:module "Errors"
//! @acp:summary "Error types for the factorization kernel and its tooling"
//! @acp:domain math
//! @acp:layer utility

use thiserror::Error;

/// @acp:summary "Library error type"
#[derive(Debug, Error)]
pub enum PrimesError {
    /// Input outside the domain of a strict factorization
    #[error("{0} has no prime factorization")]
    OutOfDomain(u64),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Two implementations disagreed on the same input
    #[error(
        "Implementation {implementation} returned different result for {input}: expected {expected:?}, got {actual:?}"
    )]
    Mismatch {
        implementation: String,
        input: u64,
        expected: Vec<u64>,
        actual: Vec<u64>,
    },

    /// A batch came back with a different number of results than inputs
    #[error("Implementation {implementation} returned {actual} results for a batch of {expected}")]
    BatchLength {
        implementation: String,
        expected: usize,
        actual: usize,
    },

    #[error("Not enough implementations to compare (got {0}, need at least 2)")]
    NotEnoughImplementations(usize),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, PrimesError>;
