//! Error types for tour solving

use thiserror::Error;
use tourforge_core::MapError;

/// Errors raised before a search starts.
///
/// A cancelled search is not an error; it is reported as
/// [`SolveOutcome::Cancelled`](crate::SolveOutcome::Cancelled).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolveError {
    /// The start city is not among the active cities
    #[error("invalid start city")]
    InvalidStartCity(#[source] MapError),

    /// The active cities do not form a complete graph
    #[error("invalid map")]
    InvalidMap(#[source] MapError),

    #[error("population size must be at least 2, got {0}")]
    InvalidPopulationSize(i64),

    #[error("number of generations must not be negative, got {0}")]
    InvalidGenerations(i64),

    #[error("mutation rate must be within [0, 1], got {0}")]
    InvalidMutationRate(f64),
}

/// Result type alias for solver operations
pub type Result<T> = std::result::Result<T, SolveError>;
