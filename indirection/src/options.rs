//! Configuration for indirection rewriting

use serde::{Deserialize, Serialize};

/// Configuration for [`IndirectionRewriter`](crate::IndirectionRewriter)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewriteOptions {
    /// Check the canonical indirection constraints on the input first
    pub verify_preconditions: bool,
    /// Check that no indirect edge is left once the worklist is drained
    pub verify_result: bool,
}

impl RewriteOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_verify_preconditions(mut self, enabled: bool) -> Self {
        self.verify_preconditions = enabled;
        self
    }

    pub fn with_verify_result(mut self, enabled: bool) -> Self {
        self.verify_result = enabled;
        self
    }

    /// Every check enabled.
    pub fn strict() -> Self {
        Self {
            verify_preconditions: true,
            verify_result: true,
        }
    }
}
