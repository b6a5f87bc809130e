//! Requirements: rules that pick violators out of a matched candidate set.

use crate::error::{ConstraintError, ConstraintResult};
use crate::predicate::{ObjectRef, Predicate, SharedPredicate};
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;
use weft_core::ObjectId;
use weft_graph::{Graph, NeighbourSelector};

/// Inspects the objects a constraint matched and returns the IDs of those
/// that violate it.
pub trait Requirement: fmt::Debug + Send + Sync {
    fn check(&self, graph: &Graph, candidates: &[ObjectRef<'_>]) -> Vec<ObjectId>;
}

/// Every candidate is a violation. Used to prohibit a shape entirely.
#[derive(Debug, Clone, Copy, Default)]
pub struct RejectAll;

impl Requirement for RejectAll {
    fn check(&self, _graph: &Graph, candidates: &[ObjectRef<'_>]) -> Vec<ObjectId> {
        candidates.iter().map(ObjectRef::id).collect()
    }
}

/// Never reports a violation.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl Requirement for AcceptAll {
    fn check(&self, _graph: &Graph, _candidates: &[ObjectRef<'_>]) -> Vec<ObjectId> {
        Vec::new()
    }
}

/// Candidates sharing an extracted value all violate the rule.
///
/// Objects for which the extractor yields nothing are ignored.
pub struct UniqueProperty<V, F> {
    name: &'static str,
    extract: F,
    _value: std::marker::PhantomData<fn() -> V>,
}

impl<V, F> UniqueProperty<V, F>
where
    V: Eq + Hash,
    F: Fn(ObjectRef<'_>) -> Option<V> + Send + Sync,
{
    pub fn new(name: &'static str, extract: F) -> Self {
        Self {
            name,
            extract,
            _value: std::marker::PhantomData,
        }
    }
}

impl<V, F> fmt::Debug for UniqueProperty<V, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("UniqueProperty").field(&self.name).finish()
    }
}

impl<V, F> Requirement for UniqueProperty<V, F>
where
    V: Eq + Hash,
    F: Fn(ObjectRef<'_>) -> Option<V> + Send + Sync,
{
    fn check(&self, _graph: &Graph, candidates: &[ObjectRef<'_>]) -> Vec<ObjectId> {
        let mut groups: HashMap<V, Vec<ObjectId>> = HashMap::new();
        for candidate in candidates {
            if let Some(value) = (self.extract)(*candidate) {
                groups.entry(value).or_default().push(candidate.id());
            }
        }

        let mut violators: Vec<ObjectId> = groups
            .into_values()
            .filter(|group| group.len() > 1)
            .flatten()
            .collect();
        violators.sort();
        violators
    }
}

/// A node may have at most one edge picked by the selector; exactly one when
/// `required`. Edge candidates are skipped.
#[derive(Debug, Clone)]
pub struct UniqueNeighbourRequirement {
    pub selector: NeighbourSelector,
    pub required: bool,
}

impl UniqueNeighbourRequirement {
    pub fn new(selector: NeighbourSelector, required: bool) -> Self {
        Self { selector, required }
    }

    /// At most one selected edge.
    pub fn optional(selector: NeighbourSelector) -> Self {
        Self::new(selector, false)
    }

    /// Exactly one selected edge.
    pub fn required(selector: NeighbourSelector) -> Self {
        Self::new(selector, true)
    }
}

impl Requirement for UniqueNeighbourRequirement {
    fn check(&self, graph: &Graph, candidates: &[ObjectRef<'_>]) -> Vec<ObjectId> {
        candidates
            .iter()
            .filter_map(ObjectRef::as_node)
            .filter(|node| {
                let count = graph.neighbours_with(node.id(), &self.selector).len();
                count > 1 || (self.required && count == 0)
            })
            .map(|node| node.id())
            .collect()
    }
}

/// Edges whose origin, target or own labels fail the supplied tests.
///
/// Node candidates are skipped.
#[derive(Debug, Clone)]
pub struct EdgeLabelsRequirement {
    origin: Option<SharedPredicate>,
    target: Option<SharedPredicate>,
    edge: Option<SharedPredicate>,
}

impl EdgeLabelsRequirement {
    /// At least one part must be supplied.
    pub fn new(
        origin: Option<SharedPredicate>,
        target: Option<SharedPredicate>,
        edge: Option<SharedPredicate>,
    ) -> ConstraintResult<Self> {
        if origin.is_none() && target.is_none() && edge.is_none() {
            return Err(ConstraintError::EmptyEdgeLabelsRequirement);
        }
        Ok(Self {
            origin,
            target,
            edge,
        })
    }

    pub fn origin(predicate: impl Predicate + 'static) -> Self {
        Self {
            origin: Some(Arc::new(predicate)),
            target: None,
            edge: None,
        }
    }

    pub fn target(predicate: impl Predicate + 'static) -> Self {
        Self {
            origin: None,
            target: Some(Arc::new(predicate)),
            edge: None,
        }
    }

    pub fn edge(predicate: impl Predicate + 'static) -> Self {
        Self {
            origin: None,
            target: None,
            edge: Some(Arc::new(predicate)),
        }
    }

    pub fn with_origin(mut self, predicate: impl Predicate + 'static) -> Self {
        self.origin = Some(Arc::new(predicate));
        self
    }

    pub fn with_target(mut self, predicate: impl Predicate + 'static) -> Self {
        self.target = Some(Arc::new(predicate));
        self
    }

    pub fn with_edge(mut self, predicate: impl Predicate + 'static) -> Self {
        self.edge = Some(Arc::new(predicate));
        self
    }

    fn endpoint_holds(graph: &Graph, predicate: &Option<SharedPredicate>, node: ObjectId) -> bool {
        match predicate {
            Some(predicate) => graph
                .node(node)
                .is_some_and(|node| predicate.matches(graph, ObjectRef::Node(node))),
            None => true,
        }
    }
}

impl Requirement for EdgeLabelsRequirement {
    fn check(&self, graph: &Graph, candidates: &[ObjectRef<'_>]) -> Vec<ObjectId> {
        candidates
            .iter()
            .filter_map(ObjectRef::as_edge)
            .filter(|edge| {
                let edge_holds = self
                    .edge
                    .as_ref()
                    .map_or(true, |p| p.matches(graph, ObjectRef::Edge(edge)));
                !(edge_holds
                    && Self::endpoint_holds(graph, &self.origin, edge.origin())
                    && Self::endpoint_holds(graph, &self.target, edge.target()))
            })
            .map(|edge| edge.id())
            .collect()
    }
}
