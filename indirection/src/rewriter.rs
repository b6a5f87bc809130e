//! Indirect edge rewriting.
//!
//! The rewriter works on a private copy of its input. Every edge carrying an
//! indirect endpoint, subject edges excepted, is queued once. Each step takes
//! one edge off the queue, resolves its indirect endpoints to the end of the
//! proxy's subject chain, lets the policy hook adjust the proposal and puts
//! the accepted edge in place of the original. Rewritten edges are never
//! queued again, so the loop runs once per queued edge.

use crate::constraints::indirection_checker;
use crate::error::{IndirectionError, IndirectionResult};
use crate::model::{has_indirect_origin, has_indirect_target, indirect_edges, real_subject_path};
use crate::options::RewriteOptions;
use std::collections::BTreeSet;
use std::fmt;
use tracing::{debug, info, warn};
use weft_core::{labels, Edge, Node, ObjectId};
use weft_graph::{Graph, Path};

/// What the policy hook sees for one edge.
///
/// The working graph is reachable read-only, except for node labels and
/// attributes through [`node_mut`](Self::node_mut).
pub struct RewriteContext<'a> {
    graph: &'a mut Graph,
    original: Edge,
    origin_path: Option<Path>,
    target_path: Option<Path>,
    proposed: Edge,
}

impl<'a> RewriteContext<'a> {
    /// The edge as found in the working graph.
    pub fn original(&self) -> &Edge {
        &self.original
    }

    /// Subject chain the origin was resolved through, if it was indirect.
    pub fn origin_path(&self) -> Option<&Path> {
        self.origin_path.as_ref()
    }

    /// Subject chain the target was resolved through, if it was indirect.
    pub fn target_path(&self) -> Option<&Path> {
        self.target_path.as_ref()
    }

    /// The edge that replaces the original unless the hook supplies another.
    pub fn proposed(&self) -> &Edge {
        &self.proposed
    }

    pub fn graph(&self) -> &Graph {
        &*self.graph
    }

    pub fn node_mut(&mut self, id: ObjectId) -> Option<&mut Node> {
        self.graph.node_mut(id)
    }
}

impl fmt::Debug for RewriteContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RewriteContext")
            .field("original", &self.original)
            .field("origin_path", &self.origin_path)
            .field("target_path", &self.target_path)
            .field("proposed", &self.proposed)
            .finish()
    }
}

/// Caller hook consulted for every rewritten edge.
///
/// Returning `None` accepts the proposed edge. A returned edge replaces it
/// and must keep the proposed origin and target; it may carry other labels,
/// attributes or another identifier.
pub trait RewritePolicy {
    fn rewrite(&mut self, ctx: &mut RewriteContext<'_>) -> Option<Edge>;
}

impl<F> RewritePolicy for F
where
    F: FnMut(&mut RewriteContext<'_>) -> Option<Edge>,
{
    fn rewrite(&mut self, ctx: &mut RewriteContext<'_>) -> Option<Edge> {
        self(ctx)
    }
}

/// Result of a rewrite.
#[derive(Debug)]
pub struct RewriteOutcome {
    /// The rewritten copy.
    pub graph: Graph,
    /// IDs of the edges put in place, in processing order.
    pub rewritten: Vec<ObjectId>,
}

/// Resolves indirect edge endpoints through proxy subject chains.
#[derive(Default)]
pub struct IndirectionRewriter {
    options: RewriteOptions,
    policy: Option<Box<dyn RewritePolicy>>,
}

impl fmt::Debug for IndirectionRewriter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IndirectionRewriter")
            .field("options", &self.options)
            .field("policy", &self.policy.is_some())
            .finish()
    }
}

impl IndirectionRewriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(mut self, options: RewriteOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_policy(mut self, policy: impl RewritePolicy + 'static) -> Self {
        self.policy = Some(Box::new(policy));
        self
    }

    pub fn options(&self) -> &RewriteOptions {
        &self.options
    }

    /// Produce a copy of `source` with every indirect endpoint resolved.
    ///
    /// `source` is left untouched. Proxy nodes and subject edges are kept.
    pub fn rewrite(&mut self, source: &Graph) -> IndirectionResult<RewriteOutcome> {
        if self.options.verify_preconditions {
            let violations = indirection_checker()?.check(source);
            if !violations.is_empty() {
                warn!(
                    constraints = ?violations.names().collect::<Vec<_>>(),
                    "indirection preconditions violated"
                );
                return Err(IndirectionError::PreconditionsViolated(violations));
            }
        }

        let mut graph = source.copy();
        let mut worklist: BTreeSet<ObjectId> = indirect_edges(&graph).into_iter().collect();
        let mut rewritten = Vec::with_capacity(worklist.len());

        while let Some(edge_id) = worklist.pop_first() {
            rewritten.push(self.rewrite_edge(&mut graph, edge_id)?);
        }

        if self.options.verify_result {
            if let Some(&edge) = indirect_edges(&graph).first() {
                return Err(IndirectionError::UnresolvedIndirection { edge });
            }
        }

        info!(
            source = %source.id(),
            rewritten = rewritten.len(),
            "indirection rewrite finished"
        );
        Ok(RewriteOutcome { graph, rewritten })
    }

    fn rewrite_edge(&mut self, graph: &mut Graph, edge_id: ObjectId) -> IndirectionResult<ObjectId> {
        let original = graph.try_edge(edge_id)?.detached();
        let mut proposed = original.clone();

        let origin_path = if has_indirect_origin(&original) {
            let path = real_subject_path(graph, original.origin())?;
            proposed.labels.remove(labels::INDIRECT_ORIGIN);
            Some(path)
        } else {
            None
        };
        let target_path = if has_indirect_target(&original) {
            let path = real_subject_path(graph, original.target())?;
            proposed.labels.remove(labels::INDIRECT_TARGET);
            Some(path)
        } else {
            None
        };

        let origin = origin_path.as_ref().map_or(original.origin(), Path::target);
        let target = target_path.as_ref().map_or(original.target(), Path::target);
        let proposed = proposed.with_endpoints(origin, target);

        let accepted = match self.policy.as_mut() {
            Some(policy) => {
                let mut ctx = RewriteContext {
                    graph: &mut *graph,
                    original,
                    origin_path,
                    target_path,
                    proposed,
                };
                let replacement = policy.rewrite(&mut ctx);
                replacement.unwrap_or(ctx.proposed)
            }
            None => proposed,
        };

        let actual = (accepted.origin(), accepted.target());
        if actual != (origin, target) {
            return Err(IndirectionError::PolicyRetargeted {
                edge: edge_id,
                expected: (origin, target),
                actual,
            });
        }

        graph.remove_edge(edge_id)?;
        let id = graph.add_edge(accepted.detached())?;
        debug!(
            edge_id = %edge_id,
            replacement = %id,
            origin = %origin,
            target = %target,
            "edge rewritten"
        );
        Ok(id)
    }
}

/// Rewrite with default options and no policy.
pub fn rewrite(source: &Graph) -> IndirectionResult<Graph> {
    IndirectionRewriter::new()
        .rewrite(source)
        .map(|outcome| outcome.graph)
}
