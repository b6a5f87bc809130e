//! Weft Constraint
//!
//! Validate graph structure against named rules.
//!
//! Responsibilities:
//! - Composable predicates selecting nodes and edges
//! - Requirements picking violators out of a matched set
//! - Named node and edge constraints
//! - Report violations as data, never mutating the graph

mod checker;
mod constraint;
mod error;
mod predicate;
mod requirement;
mod violation;

pub use checker::ConstraintChecker;
pub use constraint::{Constraint, ConstraintCheckResult, ConstraintScope};
pub use error::{ConstraintError, ConstraintResult};
pub use predicate::{
    AnyPredicate, CompoundPredicate, EdgePredicate, FnPredicate, IsNode, LabelMatch,
    LabelPredicate, LogicalOp, NegationPredicate, ObjectRef, Predicate, PredicateExt,
    SharedPredicate,
};
pub use requirement::{
    AcceptAll, EdgeLabelsRequirement, RejectAll, Requirement, UniqueNeighbourRequirement,
    UniqueProperty,
};
pub use violation::{Violation, Violations};
