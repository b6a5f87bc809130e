//! Change notification seam.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use weft_core::ObjectId;

/// A structural change about to be applied to a graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphChange {
    AddNode(ObjectId),
    RemoveNode(ObjectId),
    AddEdge {
        id: ObjectId,
        origin: ObjectId,
        target: ObjectId,
    },
    RemoveEdge {
        id: ObjectId,
        origin: ObjectId,
        target: ObjectId,
    },
}

/// Receives a notification before every structural mutation of a graph.
///
/// Label and attribute edits are not structural and are not reported.
pub trait GraphObserver: Send {
    fn will_change(&mut self, change: &GraphChange);
}

/// Observer that records every change it is told about.
///
/// Clones share the same log, so a clone can be handed to the graph while the
/// caller keeps another to inspect.
#[derive(Debug, Default, Clone)]
pub struct ChangeLog {
    changes: Arc<Mutex<Vec<GraphChange>>>,
}

impl ChangeLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the recorded changes.
    pub fn changes(&self) -> Vec<GraphChange> {
        self.lock().clone()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, Vec<GraphChange>> {
        self.changes.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl GraphObserver for ChangeLog {
    fn will_change(&mut self, change: &GraphChange) {
        self.lock().push(change.clone());
    }
}
