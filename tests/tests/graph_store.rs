//! Graph store behaviour seen from the outside.

use pretty_assertions::assert_eq;
use weft_graph::{ChangeLog, GraphChange};
use weft_tests::prelude::*;

#[test]
fn test_membership_follows_add_and_remove() -> TestResult {
    // GIVEN
    let mut graph = Graph::new();
    let node = Node::new(graph.next_id()?, label_set!["Stock"]);
    let id = node.id();

    // WHEN
    graph.add_node(node)?;

    // THEN
    assert!(graph.contains(id));
    let (removed, edges) = graph.remove_node(id)?;
    assert!(!graph.contains(id));
    assert!(edges.is_empty());
    assert!(!removed.is_attached());
    Ok(())
}

#[test]
fn test_remove_node_reports_incident_edges() -> TestResult {
    // GIVEN a hub with edges in, out, a self-loop and an unrelated edge
    let fx = Fixture::builder()
        .node("hub", ["Stock"])
        .node("a", ["Flow"])
        .node("b", ["Flow"])
        .edge("in", "a", "hub", ["feeds"])
        .edge("out", "hub", "b", ["feeds"])
        .edge("loop", "hub", "hub", ["feeds"])
        .edge("other", "a", "b", ["feeds"])
        .build()?;
    let hub = fx.id("hub")?;
    let mut graph = fx.graph().copy();

    // WHEN
    let (_, removed) = graph.remove_node(hub)?;

    // THEN exactly the incident edges are returned and gone
    let mut removed: Vec<ObjectId> = removed.iter().map(Edge::id).collect();
    removed.sort();
    assert_eq!(removed, fx.ids(&["in", "out", "loop"])?);
    assert_eq!(graph.edge_ids().collect::<Vec<_>>(), fx.ids(&["other"])?);
    Ok(())
}

#[test]
fn test_node_cannot_join_two_graphs() -> TestResult {
    // GIVEN a node moved from one graph to another
    let mut first = Graph::new();
    let mut second = Graph::new();
    let id = first.create_node(label_set![])?;
    let (node, _) = first.remove_node(id)?;
    second.add_node(node)?;

    // WHEN a copy still owned by the second graph is inserted in the first
    let still_owned = second.try_node(id)?.clone();

    // THEN
    assert!(matches!(
        first.add_node(still_owned),
        Err(GraphError::NodeAlreadyOwned { owner, .. }) if owner == second.id()
    ));
    Ok(())
}

#[test]
fn test_dangling_edge_refused() {
    let mut graph = Graph::new();
    let a = graph.create_node(label_set![]).unwrap();
    let missing = ObjectId(99);

    let err = graph.create_edge(a, missing, label_set![]).unwrap_err();

    assert!(matches!(err, GraphError::DanglingEndpoint { node, .. } if node == missing));
    assert_eq!(graph.edge_count(), 0);
}

#[test]
fn test_topological_sort_reports_remaining_cycle() -> TestResult {
    // GIVEN a -> b -> c -> b, c -> d
    let fx = Fixture::builder()
        .node("a", label_set![])
        .node("b", label_set![])
        .node("c", label_set![])
        .node("d", label_set![])
        .edge("ab", "a", "b", ["next"])
        .edge("bc", "b", "c", ["next"])
        .edge("cb", "c", "b", ["next"])
        .edge("cd", "c", "d", ["next"])
        .build()?;
    let nodes = fx.ids(&["a", "b", "c", "d"])?;

    // WHEN
    let err = fx.graph().topological_sort(&nodes, |_| true).unwrap_err();

    // THEN the edges left when the frontier ran dry
    assert_eq!(
        err,
        GraphError::Cycle {
            edges: fx.ids(&["bc", "cb", "cd"])?
        }
    );

    // AND ignoring the back edge gives an order
    let back = fx.id("cb")?;
    let order = fx.graph().topological_sort(&nodes, |edge| edge.id() != back)?;
    assert_eq!(order, nodes);
    Ok(())
}

#[test]
fn test_observer_sees_cascade_before_node_removal() -> TestResult {
    let fx = proxy_chain(1)?;
    let mut graph = fx.graph().copy();
    let log = ChangeLog::new();
    graph.set_observer(log.clone());

    let proxy = fx.id("proxy0")?;
    graph.remove_node(proxy)?;

    let changes = log.changes();
    assert_eq!(changes.len(), 3);
    assert!(changes[..2].iter().all(|change| matches!(change, GraphChange::RemoveEdge { .. })));
    assert_eq!(changes[2], GraphChange::RemoveNode(proxy));
    Ok(())
}

#[test]
fn test_copy_keeps_ids_and_independence() -> TestResult {
    let fx = proxy_chain(2)?;
    let mut copy = fx.graph().copy();

    assert!(copy.is_structurally_equal(fx.graph()));
    assert_ne!(copy.id(), fx.graph().id());

    copy.remove_edge(fx.id("reference")?)?;
    assert!(fx.graph().contains_edge(fx.id("reference")?));
    Ok(())
}
