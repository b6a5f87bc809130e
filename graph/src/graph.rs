//! Core graph storage implementation.

use crate::index::AdjacencyIndex;
use crate::observer::{GraphChange, GraphObserver};
use crate::selector::NeighbourSelector;
use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};
use std::fmt;
use tracing::trace;
use weft_core::{
    Edge, Endpoint, GraphError, GraphId, GraphResult, IdGenerator, LabelSet, Node, ObjectId,
};

/// The in-memory labelled multigraph.
///
/// Nodes and edges are stored in flat collections keyed by [`ObjectId`]; edges
/// refer to their endpoints by ID only. Every edge's origin and target are
/// nodes of the same graph.
pub struct Graph {
    /// Identity used as the ownership marker
    id: GraphId,
    /// Node storage
    nodes: BTreeMap<ObjectId, Node>,
    /// Edge storage
    edges: BTreeMap<ObjectId, Edge>,
    /// ID allocator, shared by nodes and edges
    ids: IdGenerator,
    /// Adjacency index
    adjacency: AdjacencyIndex,
    /// Change notification hook
    observer: Option<Box<dyn GraphObserver>>,
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Graph")
            .field("id", &self.id)
            .field("nodes", &self.nodes.len())
            .field("edges", &self.edges.len())
            .field("observed", &self.observer.is_some())
            .finish()
    }
}

impl Graph {
    /// Create a new empty graph.
    pub fn new() -> Self {
        Self {
            id: GraphId::fresh(),
            nodes: BTreeMap::new(),
            edges: BTreeMap::new(),
            ids: IdGenerator::new(),
            adjacency: AdjacencyIndex::new(),
            observer: None,
        }
    }

    /// Identity of this graph instance.
    pub fn id(&self) -> GraphId {
        self.id
    }

    /// Allocate an identifier not used by any object of this graph.
    pub fn next_id(&mut self) -> GraphResult<ObjectId> {
        self.ids.next_id()
    }

    /// Install the change observer, returning the previous one.
    pub fn set_observer(
        &mut self,
        observer: impl GraphObserver + 'static,
    ) -> Option<Box<dyn GraphObserver>> {
        self.observer.replace(Box::new(observer))
    }

    /// Remove the change observer.
    pub fn clear_observer(&mut self) -> Option<Box<dyn GraphObserver>> {
        self.observer.take()
    }

    fn notify(&mut self, change: GraphChange) {
        if let Some(observer) = self.observer.as_mut() {
            observer.will_change(&change);
        }
    }

    fn is_used(&self, id: ObjectId) -> bool {
        self.nodes.contains_key(&id) || self.edges.contains_key(&id)
    }

    // ==================== Node Operations ====================

    /// Insert a detached node.
    pub fn add_node(&mut self, mut node: Node) -> GraphResult<ObjectId> {
        let id = node.id();
        if let Some(owner) = node.owner() {
            return Err(GraphError::NodeAlreadyOwned { id, owner });
        }
        if self.is_used(id) {
            return Err(GraphError::DuplicateId(id));
        }

        self.notify(GraphChange::AddNode(id));
        node.attach(self.id)?;
        self.ids.mark_used(id);
        self.nodes.insert(id, node);
        trace!(node_id = %id, graph = %self.id, "node added");
        Ok(id)
    }

    /// Allocate an ID, then create and insert a node with the given labels.
    pub fn create_node(&mut self, labels: impl Into<LabelSet>) -> GraphResult<ObjectId> {
        let id = self.ids.next_id()?;
        self.add_node(Node::new(id, labels))
    }

    /// Remove a node and every edge incident to it.
    ///
    /// Incident edges are removed first and returned, detached, together with
    /// the detached node.
    pub fn remove_node(&mut self, id: ObjectId) -> GraphResult<(Node, Vec<Edge>)> {
        if !self.nodes.contains_key(&id) {
            return Err(GraphError::NodeNotFound(id));
        }

        let incident = self.adjacency.involving(id);
        let mut removed = Vec::with_capacity(incident.len());
        for edge_id in incident {
            removed.push(self.remove_edge(edge_id)?);
        }

        self.notify(GraphChange::RemoveNode(id));
        let mut node = self.nodes.remove(&id).ok_or(GraphError::NodeNotFound(id))?;
        node.detach();
        trace!(node_id = %id, cascaded = removed.len(), "node removed");
        Ok((node, removed))
    }

    /// Get a node by ID.
    pub fn node(&self, id: ObjectId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Get a node by ID, failing if it does not exist.
    pub fn try_node(&self, id: ObjectId) -> GraphResult<&Node> {
        self.nodes.get(&id).ok_or(GraphError::NodeNotFound(id))
    }

    /// Get a mutable reference to a node.
    ///
    /// Labels, attributes and components may be edited; identity and
    /// ownership cannot.
    pub fn node_mut(&mut self, id: ObjectId) -> Option<&mut Node> {
        self.nodes.get_mut(&id)
    }

    pub fn contains_node(&self, id: ObjectId) -> bool {
        self.nodes.contains_key(&id)
    }

    // ==================== Edge Operations ====================

    /// Insert a detached edge whose endpoints are nodes of this graph.
    pub fn add_edge(&mut self, mut edge: Edge) -> GraphResult<ObjectId> {
        let id = edge.id();
        if let Some(owner) = edge.owner() {
            return Err(GraphError::EdgeAlreadyOwned { id, owner });
        }
        if self.is_used(id) {
            return Err(GraphError::DuplicateId(id));
        }
        self.check_endpoint(id, Endpoint::Origin, edge.origin())?;
        self.check_endpoint(id, Endpoint::Target, edge.target())?;

        self.notify(GraphChange::AddEdge {
            id,
            origin: edge.origin(),
            target: edge.target(),
        });
        edge.attach(self.id)?;
        self.ids.mark_used(id);
        self.adjacency.insert(id, edge.origin(), edge.target());
        trace!(edge_id = %id, origin = %edge.origin(), target = %edge.target(), "edge added");
        self.edges.insert(id, edge);
        Ok(id)
    }

    /// Allocate an ID, then create and insert an edge.
    pub fn create_edge(
        &mut self,
        origin: ObjectId,
        target: ObjectId,
        labels: impl Into<LabelSet>,
    ) -> GraphResult<ObjectId> {
        let id = self.ids.peek()?;
        self.check_endpoint(id, Endpoint::Origin, origin)?;
        self.check_endpoint(id, Endpoint::Target, target)?;
        let id = self.ids.next_id()?;
        self.add_edge(Edge::new(id, origin, target, labels))
    }

    fn check_endpoint(&self, edge: ObjectId, endpoint: Endpoint, node: ObjectId) -> GraphResult<()> {
        if self.nodes.contains_key(&node) {
            Ok(())
        } else {
            Err(GraphError::DanglingEndpoint {
                edge,
                endpoint,
                node,
            })
        }
    }

    /// Remove an edge, returning it detached.
    pub fn remove_edge(&mut self, id: ObjectId) -> GraphResult<Edge> {
        let (origin, target) = match self.edges.get(&id) {
            Some(edge) => (edge.origin(), edge.target()),
            None => return Err(GraphError::EdgeNotFound(id)),
        };

        self.notify(GraphChange::RemoveEdge { id, origin, target });
        let mut edge = self.edges.remove(&id).ok_or(GraphError::EdgeNotFound(id))?;
        self.adjacency.remove(id, origin, target);
        edge.detach();
        trace!(edge_id = %id, "edge removed");
        Ok(edge)
    }

    /// Get an edge by ID.
    pub fn edge(&self, id: ObjectId) -> Option<&Edge> {
        self.edges.get(&id)
    }

    /// Get an edge by ID, failing if it does not exist.
    pub fn try_edge(&self, id: ObjectId) -> GraphResult<&Edge> {
        self.edges.get(&id).ok_or(GraphError::EdgeNotFound(id))
    }

    /// Get a mutable reference to an edge.
    ///
    /// Labels and attributes may be edited; identity, endpoints and ownership
    /// cannot.
    pub fn edge_mut(&mut self, id: ObjectId) -> Option<&mut Edge> {
        self.edges.get_mut(&id)
    }

    pub fn contains_edge(&self, id: ObjectId) -> bool {
        self.edges.contains_key(&id)
    }

    /// Returns true if the ID belongs to a node or an edge of this graph.
    pub fn contains(&self, id: ObjectId) -> bool {
        self.is_used(id)
    }

    // ==================== Traversal ====================

    /// Edges whose origin is the node.
    pub fn outgoing(&self, node_id: ObjectId) -> impl Iterator<Item = &Edge> + '_ {
        self.adjacency
            .outgoing(node_id)
            .filter_map(move |id| self.edges.get(&id))
    }

    /// Edges whose target is the node.
    pub fn incoming(&self, node_id: ObjectId) -> impl Iterator<Item = &Edge> + '_ {
        self.adjacency
            .incoming(node_id)
            .filter_map(move |id| self.edges.get(&id))
    }

    /// Edges incident to the node in either direction, in ID order.
    pub fn neighbours(&self, node_id: ObjectId) -> Vec<&Edge> {
        self.adjacency
            .involving(node_id)
            .into_iter()
            .filter_map(|id| self.edges.get(&id))
            .collect()
    }

    /// Edges around the node picked by a selector, in ID order.
    pub fn neighbours_with(&self, node_id: ObjectId, selector: &NeighbourSelector) -> Vec<&Edge> {
        self.neighbours(node_id)
            .into_iter()
            .filter(|edge| selector.selects(node_id, edge))
            .collect()
    }

    // ==================== Queries ====================

    /// Get the number of nodes in the graph.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get the number of edges in the graph.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// All node IDs in ascending order.
    pub fn node_ids(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.nodes.keys().copied()
    }

    /// All edge IDs in ascending order.
    pub fn edge_ids(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.edges.keys().copied()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.nodes.values()
    }

    pub fn edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.edges.values()
    }

    /// Nodes satisfying a test.
    pub fn select_nodes<'a>(
        &'a self,
        mut test: impl FnMut(&Node) -> bool + 'a,
    ) -> impl Iterator<Item = &'a Node> + 'a {
        self.nodes.values().filter(move |node| test(*node))
    }

    /// Edges satisfying a test.
    pub fn select_edges<'a>(
        &'a self,
        mut test: impl FnMut(&Edge) -> bool + 'a,
    ) -> impl Iterator<Item = &'a Edge> + 'a {
        self.edges.values().filter(move |edge| test(*edge))
    }

    // ==================== Algorithms ====================

    /// Order a subset of nodes so that every followed edge points forward.
    ///
    /// Only edges accepted by `follow` with both endpoints in `nodes` are
    /// considered. Zero-indegree nodes are emitted in the order they appear in
    /// `nodes`. If the frontier runs dry while edges remain, the result is
    /// [`GraphError::Cycle`] carrying exactly those remaining edges.
    pub fn topological_sort(
        &self,
        nodes: &[ObjectId],
        follow: impl Fn(&Edge) -> bool,
    ) -> GraphResult<Vec<ObjectId>> {
        let mut order: Vec<ObjectId> = Vec::with_capacity(nodes.len());
        let mut members: BTreeSet<ObjectId> = BTreeSet::new();
        for &id in nodes {
            self.try_node(id)?;
            if members.insert(id) {
                order.push(id);
            }
        }

        let mut remaining: BTreeSet<ObjectId> = BTreeSet::new();
        let mut indegree: HashMap<ObjectId, usize> = order.iter().map(|&id| (id, 0)).collect();
        for edge in self.edges.values() {
            if members.contains(&edge.origin()) && members.contains(&edge.target()) && follow(edge) {
                remaining.insert(edge.id());
                *indegree.entry(edge.target()).or_default() += 1;
            }
        }

        let mut frontier: VecDeque<ObjectId> = order
            .iter()
            .copied()
            .filter(|id| indegree.get(id).copied() == Some(0))
            .collect();
        let mut sorted = Vec::with_capacity(order.len());

        while let Some(node_id) = frontier.pop_front() {
            sorted.push(node_id);
            for edge_id in self.adjacency.outgoing(node_id) {
                if !remaining.remove(&edge_id) {
                    continue;
                }
                let target = match self.edges.get(&edge_id) {
                    Some(edge) => edge.target(),
                    None => continue,
                };
                if let Some(degree) = indegree.get_mut(&target) {
                    *degree -= 1;
                    if *degree == 0 {
                        frontier.push_back(target);
                    }
                }
            }
        }

        if remaining.is_empty() {
            Ok(sorted)
        } else {
            Err(GraphError::Cycle {
                edges: remaining.into_iter().collect(),
            })
        }
    }

    /// An independent copy with identical IDs, labels, attributes and endpoints.
    ///
    /// The copy has its own identity and owns freshly cloned objects; it does
    /// not inherit the change observer.
    pub fn copy(&self) -> Graph {
        let id = GraphId::fresh();
        let nodes = self
            .nodes
            .iter()
            .map(|(&node_id, node)| (node_id, node.transferred(id)))
            .collect();
        let edges = self
            .edges
            .iter()
            .map(|(&edge_id, edge)| (edge_id, edge.transferred(id)))
            .collect();

        Graph {
            id,
            nodes,
            edges,
            ids: self.ids.clone(),
            adjacency: self.adjacency.clone(),
            observer: None,
        }
    }

    /// Compare node IDs, edge IDs, labels and edge endpoints with another graph.
    pub fn is_structurally_equal(&self, other: &Graph) -> bool {
        self.nodes.len() == other.nodes.len()
            && self.edges.len() == other.edges.len()
            && self.nodes.iter().all(|(id, node)| {
                other
                    .nodes
                    .get(id)
                    .is_some_and(|theirs| theirs.labels == node.labels)
            })
            && self.edges.iter().all(|(id, edge)| {
                other.edges.get(id).is_some_and(|theirs| {
                    theirs.origin() == edge.origin()
                        && theirs.target() == edge.target()
                        && theirs.labels == edge.labels
                })
            })
    }
}
