//! Named graph fixtures.
//!
//! Tests describe graphs with names instead of raw IDs:
//!
//! ```
//! use weft_tests::prelude::*;
//!
//! let fx = Fixture::builder()
//!     .node("origin", ["Flow"])
//!     .proxy("proxy")
//!     .node("target", ["Stock"])
//!     .subject("subject", "proxy", "target")
//!     .edge("reference", "origin", "proxy", [labels::INDIRECT_TARGET])
//!     .build()
//!     .unwrap();
//! assert_eq!(fx.graph().edge_count(), 2);
//! ```

use std::collections::BTreeMap;

use weft_core::{label_set, labels, LabelSet, ObjectId};
use weft_graph::Graph;

use crate::error::{FixtureError, FixtureResult};

/// A graph plus the names its objects were created under.
#[derive(Debug)]
pub struct Fixture {
    graph: Graph,
    names: BTreeMap<String, ObjectId>,
}

impl Fixture {
    pub fn builder() -> FixtureBuilder {
        FixtureBuilder::default()
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn graph_mut(&mut self) -> &mut Graph {
        &mut self.graph
    }

    pub fn into_graph(self) -> Graph {
        self.graph
    }

    /// ID of a named object.
    pub fn id(&self, name: &str) -> FixtureResult<ObjectId> {
        self.names
            .get(name)
            .copied()
            .ok_or_else(|| FixtureError::UnknownName(name.to_string()))
    }

    /// IDs of several named objects, in the given order.
    pub fn ids(&self, names: &[&str]) -> FixtureResult<Vec<ObjectId>> {
        names.iter().map(|name| self.id(name)).collect()
    }
}

/// Builds a [`Fixture`]. The first failure is kept and reported by
/// [`build`](Self::build).
#[derive(Debug, Default)]
pub struct FixtureBuilder {
    graph: Graph,
    names: BTreeMap<String, ObjectId>,
    error: Option<FixtureError>,
}

impl FixtureBuilder {
    pub fn node(mut self, name: &str, labels: impl Into<LabelSet>) -> Self {
        if self.error.is_none() && self.claim(name) {
            match self.graph.create_node(labels) {
                Ok(id) => {
                    self.names.insert(name.to_string(), id);
                }
                Err(err) => self.error = Some(err.into()),
            }
        }
        self
    }

    pub fn proxy(self, name: &str) -> Self {
        self.node(name, label_set![labels::PROXY])
    }

    pub fn edge(mut self, name: &str, origin: &str, target: &str, labels: impl Into<LabelSet>) -> Self {
        if self.error.is_some() || !self.claim(name) {
            return self;
        }
        match self.connect(origin, target, labels.into()) {
            Ok(id) => {
                self.names.insert(name.to_string(), id);
            }
            Err(err) => self.error = Some(err),
        }
        self
    }

    /// Direct subject edge.
    pub fn subject(self, name: &str, proxy: &str, target: &str) -> Self {
        self.edge(name, proxy, target, label_set![labels::SUBJECT])
    }

    /// Subject edge continuing the chain at another proxy.
    pub fn indirect_subject(self, name: &str, proxy: &str, next: &str) -> Self {
        self.edge(
            name,
            proxy,
            next,
            label_set![labels::SUBJECT, labels::INDIRECT_TARGET],
        )
    }

    pub fn build(self) -> FixtureResult<Fixture> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(Fixture {
                graph: self.graph,
                names: self.names,
            }),
        }
    }

    fn claim(&mut self, name: &str) -> bool {
        if self.names.contains_key(name) {
            self.error = Some(FixtureError::DuplicateName(name.to_string()));
            false
        } else {
            true
        }
    }

    fn connect(&mut self, origin: &str, target: &str, labels: LabelSet) -> FixtureResult<ObjectId> {
        let origin = self.lookup(origin)?;
        let target = self.lookup(target)?;
        Ok(self.graph.create_edge(origin, target, labels)?)
    }

    fn lookup(&self, name: &str) -> FixtureResult<ObjectId> {
        self.names
            .get(name)
            .copied()
            .ok_or_else(|| FixtureError::UnknownName(name.to_string()))
    }
}

/// `origin --indirect-target--> proxy0`, then `hops` subject edges (at least
/// one) ending at `target`. Every hop but the last is marked indirect-target.
///
/// Names: `origin`, `target`, `proxy{i}`, `hop{i}` and `reference`.
pub fn proxy_chain(hops: usize) -> FixtureResult<Fixture> {
    let mut builder = Fixture::builder()
        .node("origin", ["Flow"])
        .node("target", ["Stock"]);
    for i in 0..hops.max(1) {
        builder = builder.proxy(&format!("proxy{i}"));
    }
    for i in 0..hops.max(1) {
        let proxy = format!("proxy{i}");
        let hop = format!("hop{i}");
        builder = if i + 1 < hops {
            builder.indirect_subject(&hop, &proxy, &format!("proxy{}", i + 1))
        } else {
            builder.subject(&hop, &proxy, "target")
        };
    }
    builder
        .edge("reference", "origin", "proxy0", ["drains", labels::INDIRECT_TARGET])
        .build()
}

/// Origin and target of an edge.
pub fn endpoints(graph: &Graph, edge: ObjectId) -> FixtureResult<(ObjectId, ObjectId)> {
    let edge = graph.try_edge(edge)?;
    Ok((edge.origin(), edge.target()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_reports_unknown_names() {
        let result = Fixture::builder()
            .node("a", ["A"])
            .edge("e", "a", "missing", LabelSet::new())
            .build();

        assert_eq!(result.unwrap_err(), FixtureError::UnknownName("missing".into()));
    }

    #[test]
    fn test_builder_reports_duplicates() {
        let result = Fixture::builder().node("a", ["A"]).node("a", ["B"]).build();

        assert_eq!(result.unwrap_err(), FixtureError::DuplicateName("a".into()));
    }

    #[test]
    fn test_proxy_chain_shape() {
        let fx = proxy_chain(3).unwrap();

        assert_eq!(fx.graph().node_count(), 5);
        assert_eq!(fx.graph().edge_count(), 4);
        let hop0 = fx.graph().edge(fx.id("hop0").unwrap()).unwrap();
        assert!(hop0.has_label(labels::INDIRECT_TARGET));
        let hop2 = fx.graph().edge(fx.id("hop2").unwrap()).unwrap();
        assert!(!hop2.has_label(labels::INDIRECT_TARGET));
        assert_eq!(hop2.target(), fx.id("target").unwrap());
    }
}
