//! Error types for slider-search.

use thiserror::Error;

/// Errors surfaced to callers of the solver.
///
/// Search exhaustion is not an error; it is reported as `Ok(None)` by
/// [`crate::search::solve`].
#[derive(Debug, Error)]
pub enum PuzzleError {
    /// The board is not a permutation of `0..n²` for the stated size.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The textual board could not be read as a list of integers.
    #[error("could not parse board: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PuzzleError>;
