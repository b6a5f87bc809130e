//! Weft Indirection
//!
//! Proxies and indirect edge endpoints.
//!
//! A proxy node stands in for another node through its subject edge. An edge
//! endpoint marked indirect refers to whatever the proxy ultimately stands
//! for. This crate provides:
//! - Role queries over the reserved labels
//! - Subject chain resolution
//! - The canonical indirection constraints
//! - The rewriter that resolves indirect endpoints in a copy of a graph

mod constraints;
mod error;
mod model;
mod options;
mod rewriter;

pub use constraints::{
    indirection_checker, indirection_constraints, SubjectChainAcyclic, INDIRECT_ORIGIN_IS_PROXY,
    INDIRECT_TARGET_IS_PROXY, PROXY_HAS_SINGLE_SUBJECT, SUBJECT_CHAIN_ACYCLIC,
    SUBJECT_ORIGIN_IS_PROXY,
};
pub use error::{IndirectionError, IndirectionResult};
pub use model::{
    has_indirect_origin, has_indirect_target, indirect_edges, is_indirect, is_proxy, is_subject,
    real_subject, real_subject_path, subject_edge,
};
pub use options::RewriteOptions;
pub use rewriter::{rewrite, IndirectionRewriter, RewriteContext, RewriteOutcome, RewritePolicy};
