//! Indirection rewriting scenarios.

use weft_tests::prelude::*;

mod single_hop {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_reference_is_resolved_in_place() -> TestResult {
        init_tracing();
        // GIVEN origin --indirect-target--> proxy --subject--> target
        let fx = proxy_chain(1)?;
        let [origin, proxy, target, subject, reference] =
            <[ObjectId; 5]>::try_from(fx.ids(&["origin", "proxy0", "target", "hop0", "reference"])?)
                .map_err(|_| "five ids")?;

        // WHEN
        let outcome = IndirectionRewriter::new().rewrite(fx.graph())?;

        // THEN the reference keeps its id, runs origin -> target, lost the label
        assert_eq!(endpoints(&outcome.graph, reference)?, (origin, target));
        let edge = outcome.graph.try_edge(reference)?;
        assert_eq!(edge.labels, label_set!["drains"]);

        // AND nothing else changed
        assert_eq!(endpoints(&outcome.graph, subject)?, (proxy, target));
        assert_eq!(
            outcome.graph.node_ids().collect::<Vec<_>>(),
            fx.graph().node_ids().collect::<Vec<_>>()
        );
        assert_eq!(
            outcome.graph.edge_ids().collect::<Vec<_>>(),
            fx.graph().edge_ids().collect::<Vec<_>>()
        );
        Ok(())
    }
}

mod two_hop {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_chain_is_followed_to_the_end() -> TestResult {
        init_tracing();
        // GIVEN origin -> proxy0 =subject,indirect=> proxy1 =subject=> target
        let fx = proxy_chain(2)?;
        let reference = fx.id("reference")?;

        // WHEN
        let graph = rewrite(fx.graph())?;

        // THEN
        assert_eq!(
            endpoints(&graph, reference)?,
            (fx.id("origin")?, fx.id("target")?)
        );
        assert!(indirect_edges(&graph).is_empty());

        // AND the indirect subject hop is still there, still indirect
        let hop = graph.try_edge(fx.id("hop0")?)?;
        assert!(is_subject(hop) && has_indirect_target(hop));
        Ok(())
    }

    #[test]
    fn test_paths_given_to_the_policy() -> TestResult {
        // GIVEN
        let fx = proxy_chain(2)?;
        let hops = fx.ids(&["hop0", "hop1"])?;

        // WHEN a policy stores the path it is shown as an attribute
        fn record(ctx: &mut RewriteContext<'_>) -> Option<Edge> {
            let mut edge = ctx.proposed().clone();
            let hops = ctx
                .target_path()
                .map(|path| path.len() as i64)
                .unwrap_or_default();
            edge.set_attr("hops", hops);
            Some(edge)
        }
        let outcome = IndirectionRewriter::new()
            .with_policy(record)
            .rewrite(fx.graph())?;

        // THEN
        let edge = outcome.graph.try_edge(fx.id("reference")?)?;
        assert_eq!(edge.attribute("hops"), Some(Value::Int(hops.len() as i64)));
        Ok(())
    }
}

mod idempotence {
    use super::*;

    #[test]
    fn test_second_pass_is_a_no_op() -> TestResult {
        // GIVEN
        let fx = proxy_chain(3)?;
        let once = rewrite(fx.graph())?;

        // WHEN
        let outcome = IndirectionRewriter::new().rewrite(&once)?;

        // THEN
        assert!(outcome.rewritten.is_empty());
        assert!(outcome.graph.is_structurally_equal(&once));
        Ok(())
    }
}

mod policy_hook {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tag(ctx: &mut RewriteContext<'_>) -> Option<Edge> {
        let origin = ctx.proposed().origin();
        ctx.node_mut(origin)?.labels.insert("rewired");
        let mut edge = ctx.proposed().clone();
        edge.labels.insert("rewired");
        Some(edge)
    }

    fn bypass(ctx: &mut RewriteContext<'_>) -> Option<Edge> {
        Some(ctx.original().detached())
    }

    #[test]
    fn test_hook_labels_edge_and_origin() -> TestResult {
        init_tracing();
        // GIVEN
        let fx = proxy_chain(1)?;
        let origin = fx.id("origin")?;

        // WHEN
        let outcome = IndirectionRewriter::new()
            .with_policy(tag)
            .rewrite(fx.graph())?;

        // THEN
        let edge = outcome.graph.try_edge(fx.id("reference")?)?;
        assert_eq!(edge.labels, label_set!["drains", "rewired"]);
        assert_eq!(
            outcome.graph.try_node(origin)?.labels,
            label_set!["Flow", "rewired"]
        );
        Ok(())
    }

    #[test]
    fn test_hook_cannot_keep_the_proxy_endpoint() -> TestResult {
        // GIVEN a hook returning the unresolved edge
        let fx = proxy_chain(1)?;

        // WHEN
        let err = IndirectionRewriter::new()
            .with_policy(bypass)
            .rewrite(fx.graph())
            .unwrap_err();

        // THEN
        assert_eq!(
            err,
            IndirectionError::PolicyRetargeted {
                edge: fx.id("reference")?,
                expected: (fx.id("origin")?, fx.id("target")?),
                actual: (fx.id("origin")?, fx.id("proxy0")?),
            }
        );
        Ok(())
    }
}

mod guarantees {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_source_untouched_and_proxies_kept() -> TestResult {
        // GIVEN
        let fx = proxy_chain(2)?;
        let before = fx.graph().copy();

        // WHEN
        let graph = rewrite(fx.graph())?;

        // THEN the input is as it was
        assert!(fx.graph().is_structurally_equal(&before));
        assert_eq!(
            endpoints(fx.graph(), fx.id("reference")?)?,
            (fx.id("origin")?, fx.id("proxy0")?)
        );

        // AND the output still has every proxy and subject edge
        for name in ["proxy0", "proxy1", "hop0", "hop1"] {
            assert!(graph.contains(fx.id(name)?), "{name} missing");
        }
        Ok(())
    }

    #[test]
    fn test_many_references_share_a_chain() -> TestResult {
        // GIVEN several flows referring to the same proxy, in both directions
        let fx = Fixture::builder()
            .node("a", ["Flow"])
            .node("b", ["Flow"])
            .proxy("proxy")
            .node("target", ["Stock"])
            .subject("subject", "proxy", "target")
            .edge("a_in", "a", "proxy", [labels::INDIRECT_TARGET])
            .edge("b_in", "b", "proxy", [labels::INDIRECT_TARGET])
            .edge("out", "proxy", "a", [labels::INDIRECT_ORIGIN])
            .edge("note", "b", "proxy", ["annotates"])
            .build()?;
        let [a, b, proxy, target] = <[ObjectId; 4]>::try_from(fx.ids(&["a", "b", "proxy", "target"])?)
            .map_err(|_| "four ids")?;

        // WHEN
        let outcome = IndirectionRewriter::new().rewrite(fx.graph())?;

        // THEN
        assert_eq!(outcome.rewritten, fx.ids(&["a_in", "b_in", "out"])?);
        assert_eq!(endpoints(&outcome.graph, fx.id("a_in")?)?, (a, target));
        assert_eq!(endpoints(&outcome.graph, fx.id("b_in")?)?, (b, target));
        assert_eq!(endpoints(&outcome.graph, fx.id("out")?)?, (target, a));
        assert_eq!(endpoints(&outcome.graph, fx.id("note")?)?, (b, proxy));
        Ok(())
    }
}

mod malformed {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_checker_first_then_rewrite() -> TestResult {
        // GIVEN an indirect reference to a plain node
        let fx = Fixture::builder()
            .node("a", ["Flow"])
            .node("b", ["Stock"])
            .edge("e", "a", "b", [labels::INDIRECT_TARGET])
            .build()?;

        // THEN the checker explains what is wrong
        let violations = indirection_checker()?.check(fx.graph());
        assert_eq!(
            violations.names().collect::<Vec<_>>(),
            vec![INDIRECT_TARGET_IS_PROXY]
        );

        // AND rewriting fails with a malformed indirection error
        let err = rewrite(fx.graph()).unwrap_err();
        assert!(err.is_malformed());
        assert_eq!(err, IndirectionError::NotAProxy(fx.id("b")?));
        Ok(())
    }

    #[test]
    fn test_subject_cycle_fails_fast() -> TestResult {
        // GIVEN p -> q -> p, both indirect subject hops
        let fx = Fixture::builder()
            .node("a", ["Flow"])
            .proxy("p")
            .proxy("q")
            .indirect_subject("pq", "p", "q")
            .indirect_subject("qp", "q", "p")
            .edge("e", "a", "p", [labels::INDIRECT_TARGET])
            .build()?;

        // WHEN
        let err = rewrite(fx.graph()).unwrap_err();

        // THEN
        assert!(matches!(err, IndirectionError::SubjectCycle { .. }));
        assert!(err.is_malformed());
        Ok(())
    }
}
