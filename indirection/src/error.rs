//! Indirection error types.

use thiserror::Error;
use weft_constraint::{ConstraintError, Violations};
use weft_core::{GraphError, ObjectId};

/// Result type for indirection operations.
pub type IndirectionResult<T> = Result<T, IndirectionError>;

/// Errors raised while resolving or rewriting indirect edges.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IndirectionError {
    /// Generic structural error from the graph store.
    #[error(transparent)]
    Graph(#[from] GraphError),

    /// The canonical rule set could not be assembled.
    #[error(transparent)]
    Constraint(#[from] ConstraintError),

    // ==================== Malformed indirection ====================
    #[error("Node {0} is not a proxy")]
    NotAProxy(ObjectId),

    #[error("Proxy {proxy} has no subject edge")]
    MissingSubject { proxy: ObjectId },

    #[error("Proxy {proxy} has more than one subject edge: {edges:?}")]
    AmbiguousSubject { proxy: ObjectId, edges: Vec<ObjectId> },

    #[error("Subject chain from proxy {proxy} loops through {nodes:?}")]
    SubjectCycle { proxy: ObjectId, nodes: Vec<ObjectId> },

    #[error("Subject edge {0} has an indirect origin")]
    IndirectSubjectOrigin(ObjectId),

    // ==================== Rewriting ====================
    #[error("Rewrite policy moved edge {edge} from {expected:?} to {actual:?}")]
    PolicyRetargeted {
        edge: ObjectId,
        expected: (ObjectId, ObjectId),
        actual: (ObjectId, ObjectId),
    },

    #[error("Indirection preconditions violated by {} constraint(s)", .0.len())]
    PreconditionsViolated(Violations),

    #[error("Edge {edge} is still indirect after rewriting")]
    UnresolvedIndirection { edge: ObjectId },
}

impl IndirectionError {
    /// Returns true if the input graph's proxy structure is broken, as opposed
    /// to a generic structural error or a misbehaving rewrite policy.
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            IndirectionError::NotAProxy(_)
                | IndirectionError::MissingSubject { .. }
                | IndirectionError::AmbiguousSubject { .. }
                | IndirectionError::SubjectCycle { .. }
                | IndirectionError::IndirectSubjectOrigin(_)
                | IndirectionError::PreconditionsViolated(_)
        )
    }
}
