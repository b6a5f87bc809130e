//! Constraint error types.

use thiserror::Error;

/// Result type for constraint operations.
pub type ConstraintResult<T> = Result<T, ConstraintError>;

/// Errors raised while assembling or addressing constraints.
///
/// Violations found while checking a graph are not errors; they are reported
/// as [`Violations`](crate::Violations).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstraintError {
    #[error("Duplicate constraint: {name}")]
    DuplicateConstraint { name: String },

    #[error("Unknown constraint: {name}")]
    UnknownConstraint { name: String },

    #[error("Edge labels requirement needs at least one of origin, target or edge predicate")]
    EmptyEdgeLabelsRequirement,
}

impl ConstraintError {
    pub fn duplicate(name: impl Into<String>) -> Self {
        Self::DuplicateConstraint { name: name.into() }
    }

    pub fn unknown_constraint(name: impl Into<String>) -> Self {
        Self::UnknownConstraint { name: name.into() }
    }
}
