//! Identity types for weft objects.
//!
//! Nodes and edges share a single identifier space within a graph. Identifiers
//! are:
//! - Unique across nodes and edges of one graph
//! - Permanent once assigned
//! - Opaque to external users

use crate::{GraphError, GraphResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Identifier of a node or an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(pub u64);

impl ObjectId {
    /// Create a new ObjectId from a raw value.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw value.
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u64> for ObjectId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

static NEXT_GRAPH_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a graph instance.
///
/// Used as the ownership marker on nodes and edges. Two graphs never share a
/// `GraphId`, including a graph and its copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GraphId(u64);

impl GraphId {
    /// Allocate a fresh graph identity.
    pub fn fresh() -> Self {
        Self(NEXT_GRAPH_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw value.
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for GraphId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "g{}", self.0)
    }
}

/// Monotonic generator of [`ObjectId`]s.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    /// `None` once `u64::MAX` has been handed out or marked used.
    next: Option<u64>,
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator {
    /// Create a generator whose first identifier is `#1`.
    pub fn new() -> Self {
        Self { next: Some(1) }
    }

    /// Create a generator starting at a given raw value.
    pub fn starting_at(next: u64) -> Self {
        Self { next: Some(next) }
    }

    /// Allocate the next identifier.
    pub fn next_id(&mut self) -> GraphResult<ObjectId> {
        let id = self.peek()?;
        self.next = id.raw().checked_add(1);
        Ok(id)
    }

    /// Record an externally supplied identifier so it is never handed out.
    pub fn mark_used(&mut self, id: ObjectId) {
        if let Some(next) = self.next {
            if id.raw() >= next {
                self.next = id.raw().checked_add(1);
            }
        }
    }

    /// The identifier the next call to [`next_id`](Self::next_id) returns.
    pub fn peek(&self) -> GraphResult<ObjectId> {
        self.next.map(ObjectId::new).ok_or(GraphError::IdSpaceExhausted)
    }
}
