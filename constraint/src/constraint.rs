//! Named structural rules.

use crate::predicate::{ObjectRef, Predicate, SharedPredicate};
use crate::requirement::Requirement;
use std::sync::Arc;
use weft_core::ObjectId;
use weft_graph::Graph;

/// Which kind of object a constraint is applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintScope {
    Nodes,
    Edges,
}

/// Outcome of checking one constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstraintCheckResult {
    Success,
    Failure {
        nodes: Vec<ObjectId>,
        edges: Vec<ObjectId>,
    },
}

impl ConstraintCheckResult {
    pub fn is_success(&self) -> bool {
        matches!(self, ConstraintCheckResult::Success)
    }
}

/// A named rule: a match predicate selecting candidates and a requirement
/// picking the violators among them.
#[derive(Debug, Clone)]
pub struct Constraint {
    pub name: String,
    pub description: String,
    pub scope: ConstraintScope,
    pub predicate: SharedPredicate,
    pub requirement: Arc<dyn Requirement>,
}

impl Constraint {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        scope: ConstraintScope,
        predicate: impl Predicate + 'static,
        requirement: impl Requirement + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            scope,
            predicate: Arc::new(predicate),
            requirement: Arc::new(requirement),
        }
    }

    /// Constraint over the graph's nodes.
    pub fn node(
        name: impl Into<String>,
        description: impl Into<String>,
        predicate: impl Predicate + 'static,
        requirement: impl Requirement + 'static,
    ) -> Self {
        Self::new(name, description, ConstraintScope::Nodes, predicate, requirement)
    }

    /// Constraint over the graph's edges.
    pub fn edge(
        name: impl Into<String>,
        description: impl Into<String>,
        predicate: impl Predicate + 'static,
        requirement: impl Requirement + 'static,
    ) -> Self {
        Self::new(name, description, ConstraintScope::Edges, predicate, requirement)
    }

    /// Objects in scope that the match predicate selects, in ID order.
    pub fn candidates<'g>(&self, graph: &'g Graph) -> Vec<ObjectRef<'g>> {
        let objects: Box<dyn Iterator<Item = ObjectRef<'g>>> = match self.scope {
            ConstraintScope::Nodes => Box::new(graph.nodes().map(ObjectRef::Node)),
            ConstraintScope::Edges => Box::new(graph.edges().map(ObjectRef::Edge)),
        };
        objects
            .filter(|object| self.predicate.matches(graph, *object))
            .collect()
    }

    /// Run the rule against a graph. The graph is not modified.
    pub fn check(&self, graph: &Graph) -> ConstraintCheckResult {
        let candidates = self.candidates(graph);
        let violators = self.requirement.check(graph, &candidates);
        if violators.is_empty() {
            return ConstraintCheckResult::Success;
        }

        let (mut nodes, mut edges): (Vec<ObjectId>, Vec<ObjectId>) = violators
            .into_iter()
            .partition(|id| graph.contains_node(*id));
        nodes.sort();
        nodes.dedup();
        edges.sort();
        edges.dedup();
        ConstraintCheckResult::Failure { nodes, edges }
    }
}
