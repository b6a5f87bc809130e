//! Edge paths.

use weft_core::{Edge, GraphError, GraphResult, ObjectId};

/// A non-empty, connected sequence of edges.
///
/// For every consecutive pair the earlier edge's target is the later edge's
/// origin. Edges are snapshots; the path stays valid after the graph changes.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    edges: Vec<Edge>,
}

impl Path {
    /// Build a path, validating that it is non-empty and connected.
    pub fn new(edges: Vec<Edge>) -> GraphResult<Self> {
        if edges.is_empty() {
            return Err(GraphError::EmptyPath);
        }
        for pair in edges.windows(2) {
            if pair[0].target() != pair[1].origin() {
                return Err(GraphError::DisconnectedPath { edge: pair[1].id() });
            }
        }
        Ok(Self { edges })
    }

    /// Append an edge that continues from the current target.
    pub fn push(&mut self, edge: Edge) -> GraphResult<()> {
        if edge.origin() != self.target() {
            return Err(GraphError::DisconnectedPath { edge: edge.id() });
        }
        self.edges.push(edge);
        Ok(())
    }

    /// Origin of the first edge.
    pub fn origin(&self) -> ObjectId {
        self.edges[0].origin()
    }

    /// Target of the last edge.
    pub fn target(&self) -> ObjectId {
        self.edges[self.edges.len() - 1].target()
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn edge_ids(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.edges.iter().map(Edge::id)
    }

    /// Nodes visited, from origin to target.
    pub fn nodes(&self) -> Vec<ObjectId> {
        std::iter::once(self.origin())
            .chain(self.edges.iter().map(Edge::target))
            .collect()
    }

    pub fn contains_node(&self, node: ObjectId) -> bool {
        self.edges.iter().any(|edge| edge.involves(node))
    }

    /// Number of edges. Always at least one.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Always false; kept for API symmetry with collections.
    pub fn is_empty(&self) -> bool {
        false
    }
}
