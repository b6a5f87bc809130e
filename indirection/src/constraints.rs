//! The canonical indirection rule set.
//!
//! Rewriting assumes these hold. Callers run them through a
//! [`ConstraintChecker`] before rewriting, or let the rewriter do it with
//! [`RewriteOptions::verify_preconditions`](crate::RewriteOptions).

use crate::error::{IndirectionError, IndirectionResult};
use crate::model::real_subject_path;
use weft_constraint::{
    Constraint, ConstraintChecker, EdgeLabelsRequirement, LabelPredicate, ObjectRef, Requirement,
    UniqueNeighbourRequirement,
};
use weft_core::{label_set, labels, ObjectId};
use weft_graph::{Graph, NeighbourSelector};

pub const PROXY_HAS_SINGLE_SUBJECT: &str = "proxy_has_single_subject";
pub const SUBJECT_ORIGIN_IS_PROXY: &str = "subject_origin_is_proxy";
pub const INDIRECT_ORIGIN_IS_PROXY: &str = "indirect_origin_is_proxy";
pub const INDIRECT_TARGET_IS_PROXY: &str = "indirect_target_is_proxy";
pub const SUBJECT_CHAIN_ACYCLIC: &str = "subject_chain_acyclic";

/// Proxies whose subject chain loops back on itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubjectChainAcyclic;

impl Requirement for SubjectChainAcyclic {
    fn check(&self, graph: &Graph, candidates: &[ObjectRef<'_>]) -> Vec<ObjectId> {
        candidates
            .iter()
            .filter_map(ObjectRef::as_node)
            .filter(|node| {
                matches!(
                    real_subject_path(graph, node.id()),
                    Err(IndirectionError::SubjectCycle { .. })
                )
            })
            .map(|node| node.id())
            .collect()
    }
}

/// Rules every graph handed to the rewriter must satisfy.
pub fn indirection_constraints() -> Vec<Constraint> {
    let is_proxy = || LabelPredicate::all([labels::PROXY]);

    vec![
        Constraint::node(
            PROXY_HAS_SINGLE_SUBJECT,
            "A proxy has exactly one subject edge",
            is_proxy(),
            UniqueNeighbourRequirement::required(NeighbourSelector::outgoing(label_set![
                labels::SUBJECT
            ])),
        ),
        Constraint::edge(
            SUBJECT_ORIGIN_IS_PROXY,
            "A subject edge originates from a proxy and has a direct origin",
            LabelPredicate::all([labels::SUBJECT]),
            EdgeLabelsRequirement::origin(is_proxy())
                .with_edge(LabelPredicate::none([labels::INDIRECT_ORIGIN])),
        ),
        Constraint::edge(
            INDIRECT_ORIGIN_IS_PROXY,
            "An edge with an indirect origin originates from a proxy",
            LabelPredicate::all([labels::INDIRECT_ORIGIN]),
            EdgeLabelsRequirement::origin(is_proxy()),
        ),
        Constraint::edge(
            INDIRECT_TARGET_IS_PROXY,
            "An edge with an indirect target points to a proxy",
            LabelPredicate::all([labels::INDIRECT_TARGET]),
            EdgeLabelsRequirement::target(is_proxy()),
        ),
        Constraint::node(
            SUBJECT_CHAIN_ACYCLIC,
            "Following indirect subject edges never revisits a proxy",
            is_proxy(),
            SubjectChainAcyclic,
        ),
    ]
}

/// A checker loaded with [`indirection_constraints`].
pub fn indirection_checker() -> IndirectionResult<ConstraintChecker> {
    Ok(ConstraintChecker::new(indirection_constraints())?)
}
