//! Weft Graph Storage
//!
//! This crate provides the in-memory labelled multigraph:
//! - Node and edge storage keyed by ObjectId, with ownership enforcement
//! - Adjacency index: find edges from/to a node
//! - Neighbourhood selection by direction and labels
//! - Edge paths
//! - Topological sorting over a selected edge subset
//! - Change notification before structural mutations

mod graph;
mod index;
mod observer;
mod path;
mod selector;

pub use graph::Graph;
pub use observer::{ChangeLog, GraphChange, GraphObserver};
pub use path::Path;
pub use selector::{Direction, NeighbourSelector};
