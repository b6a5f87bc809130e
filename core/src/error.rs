//! Structural error types for weft.

use crate::{GraphId, ObjectId};
use thiserror::Error;

/// Which end of an edge an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Origin,
    Target,
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Endpoint::Origin => write!(f, "origin"),
            Endpoint::Target => write!(f, "target"),
        }
    }
}

/// Errors raised when a graph invariant would be broken.
///
/// These are programmer errors: the operation is refused and the graph is
/// left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// Node not found.
    #[error("Node not found: {0}")]
    NodeNotFound(ObjectId),

    /// Edge not found.
    #[error("Edge not found: {0}")]
    EdgeNotFound(ObjectId),

    /// Identifier already used by a node or an edge of the graph.
    #[error("Duplicate object id: {0}")]
    DuplicateId(ObjectId),

    /// Node already belongs to a graph.
    #[error("Node {id} already belongs to graph {owner}")]
    NodeAlreadyOwned { id: ObjectId, owner: GraphId },

    /// Edge already belongs to a graph.
    #[error("Edge {id} already belongs to graph {owner}")]
    EdgeAlreadyOwned { id: ObjectId, owner: GraphId },

    /// Edge endpoint is not a node of the graph.
    #[error("Edge {edge} has dangling {endpoint}: {node}")]
    DanglingEndpoint {
        edge: ObjectId,
        endpoint: Endpoint,
        node: ObjectId,
    },

    /// Every identifier has been handed out.
    #[error("Object id space exhausted")]
    IdSpaceExhausted,

    /// The followed edges form a cycle.
    #[error("Graph contains a cycle through edges {edges:?}")]
    Cycle { edges: Vec<ObjectId> },

    /// A path must contain at least one edge.
    #[error("Path is empty")]
    EmptyPath,

    /// Consecutive path edges do not share an endpoint.
    #[error("Path is disconnected at edge {edge}")]
    DisconnectedPath { edge: ObjectId },
}

/// Result type for graph operations.
pub type GraphResult<T> = Result<T, GraphError>;
