//! Composable boolean tests over graph objects.

use std::fmt;
use std::sync::Arc;
use weft_core::{Edge, LabelSet, Node, ObjectId};
use weft_graph::Graph;

/// A borrowed node or edge.
#[derive(Debug, Clone, Copy)]
pub enum ObjectRef<'a> {
    Node(&'a Node),
    Edge(&'a Edge),
}

impl<'a> ObjectRef<'a> {
    pub fn id(&self) -> ObjectId {
        match self {
            ObjectRef::Node(node) => node.id(),
            ObjectRef::Edge(edge) => edge.id(),
        }
    }

    pub fn labels(&self) -> &'a LabelSet {
        match self {
            ObjectRef::Node(node) => &node.labels,
            ObjectRef::Edge(edge) => &edge.labels,
        }
    }

    pub fn as_node(&self) -> Option<&'a Node> {
        match self {
            ObjectRef::Node(node) => Some(node),
            ObjectRef::Edge(_) => None,
        }
    }

    pub fn as_edge(&self) -> Option<&'a Edge> {
        match self {
            ObjectRef::Node(_) => None,
            ObjectRef::Edge(edge) => Some(edge),
        }
    }
}

impl<'a> From<&'a Node> for ObjectRef<'a> {
    fn from(node: &'a Node) -> Self {
        ObjectRef::Node(node)
    }
}

impl<'a> From<&'a Edge> for ObjectRef<'a> {
    fn from(edge: &'a Edge) -> Self {
        ObjectRef::Edge(edge)
    }
}

/// A pure boolean test of a graph object.
///
/// The graph is passed along so predicates can look at an edge's endpoints.
pub trait Predicate: fmt::Debug + Send + Sync {
    fn matches(&self, graph: &Graph, object: ObjectRef<'_>) -> bool;
}

/// Shared, immutable predicate.
pub type SharedPredicate = Arc<dyn Predicate>;

impl<P: Predicate + ?Sized> Predicate for Arc<P> {
    fn matches(&self, graph: &Graph, object: ObjectRef<'_>) -> bool {
        (**self).matches(graph, object)
    }
}

/// Composition helpers. Every combinator returns a new predicate.
pub trait PredicateExt: Predicate + Sized + 'static {
    fn and(self, other: impl Predicate + 'static) -> CompoundPredicate {
        CompoundPredicate::and(vec![self.shared(), other.shared()])
    }

    fn or(self, other: impl Predicate + 'static) -> CompoundPredicate {
        CompoundPredicate::or(vec![self.shared(), other.shared()])
    }

    fn not(self) -> NegationPredicate {
        NegationPredicate::new(self)
    }

    fn shared(self) -> SharedPredicate {
        Arc::new(self)
    }
}

impl<P: Predicate + Sized + 'static> PredicateExt for P {}

/// Matches every object.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnyPredicate;

impl Predicate for AnyPredicate {
    fn matches(&self, _graph: &Graph, _object: ObjectRef<'_>) -> bool {
        true
    }
}

/// How a [`LabelPredicate`] compares label sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelMatch {
    /// Object carries every label.
    All,
    /// Object carries at least one label.
    Any,
    /// Object carries none of the labels.
    None,
}

/// Tests an object's labels against a set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelPredicate {
    pub mode: LabelMatch,
    pub labels: LabelSet,
}

impl LabelPredicate {
    pub fn new(mode: LabelMatch, labels: impl Into<LabelSet>) -> Self {
        Self {
            mode,
            labels: labels.into(),
        }
    }

    pub fn all(labels: impl Into<LabelSet>) -> Self {
        Self::new(LabelMatch::All, labels)
    }

    pub fn any(labels: impl Into<LabelSet>) -> Self {
        Self::new(LabelMatch::Any, labels)
    }

    pub fn none(labels: impl Into<LabelSet>) -> Self {
        Self::new(LabelMatch::None, labels)
    }

    /// Test a label set directly.
    pub fn matches_labels(&self, labels: &LabelSet) -> bool {
        match self.mode {
            LabelMatch::All => labels.is_superset(&self.labels),
            LabelMatch::Any => labels.intersects(&self.labels),
            LabelMatch::None => labels.is_disjoint(&self.labels),
        }
    }
}

impl Predicate for LabelPredicate {
    fn matches(&self, _graph: &Graph, object: ObjectRef<'_>) -> bool {
        self.matches_labels(object.labels())
    }
}

/// Logical connective of a [`CompoundPredicate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOp {
    And,
    Or,
}

/// Short-circuiting conjunction or disjunction.
///
/// An empty conjunction matches everything, an empty disjunction nothing.
#[derive(Debug, Clone)]
pub struct CompoundPredicate {
    pub op: LogicalOp,
    pub predicates: Vec<SharedPredicate>,
}

impl CompoundPredicate {
    pub fn new(op: LogicalOp, predicates: Vec<SharedPredicate>) -> Self {
        Self { op, predicates }
    }

    pub fn and(predicates: Vec<SharedPredicate>) -> Self {
        Self::new(LogicalOp::And, predicates)
    }

    pub fn or(predicates: Vec<SharedPredicate>) -> Self {
        Self::new(LogicalOp::Or, predicates)
    }
}

impl Predicate for CompoundPredicate {
    fn matches(&self, graph: &Graph, object: ObjectRef<'_>) -> bool {
        match self.op {
            LogicalOp::And => self.predicates.iter().all(|p| p.matches(graph, object)),
            LogicalOp::Or => self.predicates.iter().any(|p| p.matches(graph, object)),
        }
    }
}

/// Inverts another predicate.
#[derive(Debug, Clone)]
pub struct NegationPredicate {
    pub predicate: SharedPredicate,
}

impl NegationPredicate {
    pub fn new(predicate: impl Predicate + 'static) -> Self {
        Self {
            predicate: Arc::new(predicate),
        }
    }
}

impl Predicate for NegationPredicate {
    fn matches(&self, graph: &Graph, object: ObjectRef<'_>) -> bool {
        !self.predicate.matches(graph, object)
    }
}

/// Conjunction of independent tests on an edge, its origin node and its
/// target node. Unset parts are vacuously true; nodes never match.
#[derive(Debug, Clone, Default)]
pub struct EdgePredicate {
    pub origin: Option<SharedPredicate>,
    pub target: Option<SharedPredicate>,
    pub edge: Option<SharedPredicate>,
}

impl EdgePredicate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn origin(mut self, predicate: impl Predicate + 'static) -> Self {
        self.origin = Some(Arc::new(predicate));
        self
    }

    pub fn target(mut self, predicate: impl Predicate + 'static) -> Self {
        self.target = Some(Arc::new(predicate));
        self
    }

    pub fn edge(mut self, predicate: impl Predicate + 'static) -> Self {
        self.edge = Some(Arc::new(predicate));
        self
    }

    /// Test an edge of `graph`. A missing endpoint fails its part.
    pub fn matches_edge(&self, graph: &Graph, edge: &Edge) -> bool {
        let endpoint_matches = |predicate: &Option<SharedPredicate>, node_id: ObjectId| {
            predicate.as_ref().map_or(true, |p| {
                graph
                    .node(node_id)
                    .is_some_and(|node| p.matches(graph, ObjectRef::Node(node)))
            })
        };

        self.edge
            .as_ref()
            .map_or(true, |p| p.matches(graph, ObjectRef::Edge(edge)))
            && endpoint_matches(&self.origin, edge.origin())
            && endpoint_matches(&self.target, edge.target())
    }
}

impl Predicate for EdgePredicate {
    fn matches(&self, graph: &Graph, object: ObjectRef<'_>) -> bool {
        match object {
            ObjectRef::Edge(edge) => self.matches_edge(graph, edge),
            ObjectRef::Node(_) => false,
        }
    }
}

/// Matches nodes only.
#[derive(Debug, Clone, Copy, Default)]
pub struct IsNode;

impl Predicate for IsNode {
    fn matches(&self, _graph: &Graph, object: ObjectRef<'_>) -> bool {
        matches!(object, ObjectRef::Node(_))
    }
}

/// A named closure predicate.
pub struct FnPredicate<F> {
    name: &'static str,
    test: F,
}

impl<F> FnPredicate<F>
where
    F: Fn(&Graph, ObjectRef<'_>) -> bool + Send + Sync,
{
    pub fn new(name: &'static str, test: F) -> Self {
        Self { name, test }
    }
}

impl<F> fmt::Debug for FnPredicate<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FnPredicate").field(&self.name).finish()
    }
}

impl<F> Predicate for FnPredicate<F>
where
    F: Fn(&Graph, ObjectRef<'_>) -> bool + Send + Sync,
{
    fn matches(&self, graph: &Graph, object: ObjectRef<'_>) -> bool {
        (self.test)(graph, object)
    }
}
