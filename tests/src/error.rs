//! Error types for fixture construction.

use thiserror::Error;
use weft_core::GraphError;

/// Result type for fixture operations.
pub type FixtureResult<T> = Result<T, FixtureError>;

/// Errors raised while building or querying a fixture.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FixtureError {
    #[error("Unknown fixture name: {0}")]
    UnknownName(String),

    #[error("Fixture name used twice: {0}")]
    DuplicateName(String),

    #[error(transparent)]
    Graph(#[from] GraphError),
}
