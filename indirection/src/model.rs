//! Reserved-label queries and proxy subject chains.
//!
//! Roles are capabilities read off the label set: a node is a proxy when it
//! carries [`labels::PROXY`], an edge is a subject edge when it carries
//! [`labels::SUBJECT`], and so on.

use crate::error::{IndirectionError, IndirectionResult};
use std::collections::BTreeSet;
use weft_core::{labels, Edge, Node, ObjectId};
use weft_graph::{Graph, Path};

pub fn is_proxy(node: &Node) -> bool {
    node.is_proxy()
}

pub fn is_subject(edge: &Edge) -> bool {
    edge.has_label(labels::SUBJECT)
}

pub fn has_indirect_origin(edge: &Edge) -> bool {
    edge.has_label(labels::INDIRECT_ORIGIN)
}

pub fn has_indirect_target(edge: &Edge) -> bool {
    edge.has_label(labels::INDIRECT_TARGET)
}

/// Edge has at least one endpoint marked indirect.
pub fn is_indirect(edge: &Edge) -> bool {
    has_indirect_origin(edge) || has_indirect_target(edge)
}

/// Edges the rewriter has to resolve: indirect and not themselves subject
/// edges. Ascending ID order.
pub fn indirect_edges(graph: &Graph) -> Vec<ObjectId> {
    graph
        .select_edges(|edge| is_indirect(edge) && !is_subject(edge))
        .map(Edge::id)
        .collect()
}

/// The outgoing subject edge of a proxy, if it has one.
///
/// Fails if the node is missing, is not a proxy, or has several subject
/// edges.
pub fn subject_edge(graph: &Graph, proxy: ObjectId) -> IndirectionResult<Option<&Edge>> {
    let node = graph.try_node(proxy)?;
    if !is_proxy(node) {
        return Err(IndirectionError::NotAProxy(proxy));
    }

    let mut subjects = graph.outgoing(proxy).filter(|edge| is_subject(edge));
    let first = subjects.next();
    let rest: Vec<ObjectId> = subjects.map(Edge::id).collect();
    match first {
        Some(edge) if rest.is_empty() => Ok(Some(edge)),
        Some(edge) => {
            let mut edges = vec![edge.id()];
            edges.extend(rest);
            Err(IndirectionError::AmbiguousSubject { proxy, edges })
        }
        None => Ok(None),
    }
}

/// Walk the subject chain starting at a proxy.
///
/// The walk follows the proxy's subject edge and keeps going while that edge
/// is itself marked indirect-target, in which case its target must be another
/// proxy. The first subject edge with a direct target ends the chain. A chain
/// that comes back to a visited proxy fails with
/// [`IndirectionError::SubjectCycle`].
pub fn real_subject_path(graph: &Graph, proxy: ObjectId) -> IndirectionResult<Path> {
    let mut visited = BTreeSet::from([proxy]);
    let mut chain = vec![proxy];
    let mut edges = Vec::new();
    let mut current = proxy;

    loop {
        let edge = subject_edge(graph, current)?
            .ok_or(IndirectionError::MissingSubject { proxy: current })?;
        if has_indirect_origin(edge) {
            return Err(IndirectionError::IndirectSubjectOrigin(edge.id()));
        }
        edges.push(edge.detached());

        if !has_indirect_target(edge) {
            break;
        }

        let next = edge.target();
        if !visited.insert(next) {
            chain.push(next);
            return Err(IndirectionError::SubjectCycle {
                proxy,
                nodes: chain,
            });
        }
        chain.push(next);
        current = next;
    }

    Ok(Path::new(edges)?)
}

/// The node a proxy ultimately stands for.
pub fn real_subject(graph: &Graph, proxy: ObjectId) -> IndirectionResult<ObjectId> {
    real_subject_path(graph, proxy).map(|path| path.target())
}
