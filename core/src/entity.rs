//! Entity structures for weft.
//!
//! Nodes and edges are the two object kinds of the multigraph. Both are
//! created detached and become owned by a graph when inserted into it. They
//! refer to each other only by [`ObjectId`], never by reference.

use crate::{labels, Attributes, Components, GraphError, GraphId, GraphResult, LabelSet, ObjectId, Value};

/// A node in the multigraph.
#[derive(Debug, Clone)]
pub struct Node {
    id: ObjectId,
    /// Labels, user-defined and system roles.
    pub labels: LabelSet,
    /// Attribute values.
    pub attributes: Attributes,
    /// Typed extension data.
    pub components: Components,
    owner: Option<GraphId>,
}

impl Node {
    /// Create a detached node.
    pub fn new(id: ObjectId, labels: impl Into<LabelSet>) -> Self {
        Self {
            id,
            labels: labels.into(),
            attributes: Attributes::new(),
            components: Components::new(),
            owner: None,
        }
    }

    /// Builder: set attributes.
    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    /// The graph currently owning this node.
    pub fn owner(&self) -> Option<GraphId> {
        self.owner
    }

    pub fn is_attached(&self) -> bool {
        self.owner.is_some()
    }

    /// Mark the node as owned by `graph`.
    ///
    /// Fails if the node already belongs to a graph; call [`detach`](Self::detach)
    /// first to re-associate it.
    pub fn attach(&mut self, graph: GraphId) -> GraphResult<()> {
        if let Some(owner) = self.owner {
            return Err(GraphError::NodeAlreadyOwned { id: self.id, owner });
        }
        self.owner = Some(graph);
        Ok(())
    }

    /// Clear ownership, returning the previous owner.
    pub fn detach(&mut self) -> Option<GraphId> {
        self.owner.take()
    }

    /// A copy of this node that belongs to no graph.
    pub fn detached(&self) -> Self {
        Self {
            owner: None,
            ..self.clone()
        }
    }

    /// A copy of this node owned by `graph`, whatever the current owner.
    pub fn transferred(&self, graph: GraphId) -> Self {
        Self {
            owner: Some(graph),
            ..self.clone()
        }
    }

    pub fn has_label(&self, label: &str) -> bool {
        self.labels.contains(label)
    }

    /// Returns true if the node owns other nodes through holon edges.
    pub fn is_holon(&self) -> bool {
        self.labels.contains(labels::HOLON)
    }

    /// Returns true if the node stands in for another node.
    pub fn is_proxy(&self) -> bool {
        self.labels.contains(labels::PROXY)
    }

    /// Generic key-value query.
    ///
    /// `id` and `labels` are answered from the node itself, any other key from
    /// its attributes.
    pub fn attribute(&self, key: &str) -> Option<Value> {
        match key {
            "id" => Some(id_value(self.id)),
            "labels" => Some(labels_value(&self.labels)),
            _ => self.attributes.get(key).cloned(),
        }
    }

    /// Set an attribute value.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.attributes.insert(name.into(), value.into());
    }

    /// Remove an attribute.
    pub fn remove_attr(&mut self, name: &str) -> Option<Value> {
        self.attributes.remove(name)
    }
}

/// A directed edge in the multigraph.
///
/// Multiple edges between the same pair of nodes, including self-loops, are
/// allowed.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    id: ObjectId,
    origin: ObjectId,
    target: ObjectId,
    /// Labels, user-defined and system roles.
    pub labels: LabelSet,
    /// Attribute values.
    pub attributes: Attributes,
    owner: Option<GraphId>,
}

impl Edge {
    /// Create a detached edge.
    pub fn new(
        id: ObjectId,
        origin: ObjectId,
        target: ObjectId,
        labels: impl Into<LabelSet>,
    ) -> Self {
        Self {
            id,
            origin,
            target,
            labels: labels.into(),
            attributes: Attributes::new(),
            owner: None,
        }
    }

    /// Builder: set attributes.
    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn origin(&self) -> ObjectId {
        self.origin
    }

    pub fn target(&self) -> ObjectId {
        self.target
    }

    /// Returns true if origin and target are the same node.
    pub fn is_self_loop(&self) -> bool {
        self.origin == self.target
    }

    /// Returns true if the node is the origin or the target.
    pub fn involves(&self, node: ObjectId) -> bool {
        self.origin == node || self.target == node
    }

    /// The graph currently owning this edge.
    pub fn owner(&self) -> Option<GraphId> {
        self.owner
    }

    pub fn is_attached(&self) -> bool {
        self.owner.is_some()
    }

    /// Mark the edge as owned by `graph`.
    pub fn attach(&mut self, graph: GraphId) -> GraphResult<()> {
        if let Some(owner) = self.owner {
            return Err(GraphError::EdgeAlreadyOwned { id: self.id, owner });
        }
        self.owner = Some(graph);
        Ok(())
    }

    /// Clear ownership, returning the previous owner.
    pub fn detach(&mut self) -> Option<GraphId> {
        self.owner.take()
    }

    /// A copy of this edge that belongs to no graph.
    pub fn detached(&self) -> Self {
        Self {
            owner: None,
            ..self.clone()
        }
    }

    /// A copy of this edge owned by `graph`, whatever the current owner.
    pub fn transferred(&self, graph: GraphId) -> Self {
        Self {
            owner: Some(graph),
            ..self.clone()
        }
    }

    /// A detached copy with the same identity and labels but other endpoints.
    pub fn with_endpoints(&self, origin: ObjectId, target: ObjectId) -> Self {
        Self {
            origin,
            target,
            owner: None,
            ..self.clone()
        }
    }

    /// A detached copy under another identifier.
    pub fn with_id(&self, id: ObjectId) -> Self {
        Self {
            id,
            owner: None,
            ..self.clone()
        }
    }

    pub fn has_label(&self, label: &str) -> bool {
        self.labels.contains(label)
    }

    /// Generic key-value query.
    ///
    /// `id`, `labels`, `origin` and `target` are answered from the edge
    /// itself, any other key from its attributes.
    pub fn attribute(&self, key: &str) -> Option<Value> {
        match key {
            "id" => Some(id_value(self.id)),
            "labels" => Some(labels_value(&self.labels)),
            "origin" => Some(Value::Ref(self.origin)),
            "target" => Some(Value::Ref(self.target)),
            _ => self.attributes.get(key).cloned(),
        }
    }

    /// Set an attribute value.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.attributes.insert(name.into(), value.into());
    }

    /// Remove an attribute.
    pub fn remove_attr(&mut self, name: &str) -> Option<Value> {
        self.attributes.remove(name)
    }
}

/// Ids that do not fit an `Int` are answered as references.
fn id_value(id: ObjectId) -> Value {
    i64::try_from(id.raw()).map_or(Value::Ref(id), Value::Int)
}

fn labels_value(labels: &LabelSet) -> Value {
    Value::List(labels.iter().map(Value::from).collect())
}
