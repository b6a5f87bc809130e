//! Adjacency index for node-local edge lookups.

use weft_core::ObjectId;
use std::collections::{BTreeSet, HashMap};

/// Adjacency index: node -> { outgoing edges, incoming edges }
///
/// Edge sets are ordered so traversal results are deterministic.
#[derive(Debug, Default, Clone)]
pub struct AdjacencyIndex {
    /// Edges where the node is the origin
    outgoing: HashMap<ObjectId, BTreeSet<ObjectId>>,
    /// Edges where the node is the target
    incoming: HashMap<ObjectId, BTreeSet<ObjectId>>,
}

impl AdjacencyIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, edge_id: ObjectId, origin: ObjectId, target: ObjectId) {
        self.outgoing.entry(origin).or_default().insert(edge_id);
        self.incoming.entry(target).or_default().insert(edge_id);
    }

    pub fn remove(&mut self, edge_id: ObjectId, origin: ObjectId, target: ObjectId) {
        Self::remove_from(&mut self.outgoing, origin, edge_id);
        Self::remove_from(&mut self.incoming, target, edge_id);
    }

    fn remove_from(
        index: &mut HashMap<ObjectId, BTreeSet<ObjectId>>,
        node_id: ObjectId,
        edge_id: ObjectId,
    ) {
        if let Some(set) = index.get_mut(&node_id) {
            set.remove(&edge_id);
            if set.is_empty() {
                index.remove(&node_id);
            }
        }
    }

    /// Edges whose origin is the node.
    pub fn outgoing(&self, node_id: ObjectId) -> impl Iterator<Item = ObjectId> + '_ {
        self.outgoing
            .get(&node_id)
            .into_iter()
            .flat_map(|set| set.iter().copied())
    }

    /// Edges whose target is the node.
    pub fn incoming(&self, node_id: ObjectId) -> impl Iterator<Item = ObjectId> + '_ {
        self.incoming
            .get(&node_id)
            .into_iter()
            .flat_map(|set| set.iter().copied())
    }

    /// All edges involving a node, self-loops reported once.
    pub fn involving(&self, node_id: ObjectId) -> BTreeSet<ObjectId> {
        self.outgoing(node_id).chain(self.incoming(node_id)).collect()
    }
}
