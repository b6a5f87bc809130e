//! Neighbourhood selection.

use weft_core::{Edge, LabelSet, ObjectId};

/// Direction of an edge relative to the node it is looked up from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// The node is the edge's origin.
    Outgoing,
    /// The node is the edge's target.
    Incoming,
    /// Either end.
    Both,
}

impl Direction {
    /// Returns true if `edge` leaves or enters `node` in this direction.
    pub fn matches(&self, node: ObjectId, edge: &Edge) -> bool {
        match self {
            Direction::Outgoing => edge.origin() == node,
            Direction::Incoming => edge.target() == node,
            Direction::Both => edge.involves(node),
        }
    }
}

/// Selects the edges around a node: a direction plus labels every selected
/// edge must carry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NeighbourSelector {
    pub direction: Direction,
    pub labels: LabelSet,
}

impl NeighbourSelector {
    pub fn new(direction: Direction, labels: impl Into<LabelSet>) -> Self {
        Self {
            direction,
            labels: labels.into(),
        }
    }

    pub fn outgoing(labels: impl Into<LabelSet>) -> Self {
        Self::new(Direction::Outgoing, labels)
    }

    pub fn incoming(labels: impl Into<LabelSet>) -> Self {
        Self::new(Direction::Incoming, labels)
    }

    /// Returns true if `edge` is selected when looking from `node`.
    pub fn selects(&self, node: ObjectId, edge: &Edge) -> bool {
        self.direction.matches(node, edge) && edge.labels.is_superset(&self.labels)
    }
}
