//! Constraint checking.

use std::collections::HashSet;
use tracing::debug;
use weft_graph::Graph;

use crate::constraint::{Constraint, ConstraintCheckResult};
use crate::error::{ConstraintError, ConstraintResult};
use crate::violation::{Violation, Violations};

/// Runs a fixed set of named constraints against graphs.
///
/// Checking is analysis only: the graph is borrowed immutably and violations
/// are returned as data.
#[derive(Debug, Clone, Default)]
pub struct ConstraintChecker {
    constraints: Vec<Constraint>,
}

impl ConstraintChecker {
    /// Create a checker. Constraint names must be unique.
    pub fn new(constraints: Vec<Constraint>) -> ConstraintResult<Self> {
        let mut seen = HashSet::new();
        for constraint in &constraints {
            if !seen.insert(constraint.name.as_str()) {
                return Err(ConstraintError::duplicate(&constraint.name));
            }
        }
        Ok(Self { constraints })
    }

    /// Register one more constraint.
    pub fn add(&mut self, constraint: Constraint) -> ConstraintResult<()> {
        if self.constraints.iter().any(|c| c.name == constraint.name) {
            return Err(ConstraintError::duplicate(constraint.name));
        }
        self.constraints.push(constraint);
        Ok(())
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// Check all constraints, in registration order.
    pub fn check(&self, graph: &Graph) -> Violations {
        self.constraints
            .iter()
            .filter_map(|constraint| Self::violation(constraint, graph))
            .collect()
    }

    /// Check a single constraint by name.
    pub fn check_constraint(&self, name: &str, graph: &Graph) -> ConstraintResult<Option<Violation>> {
        let constraint = self
            .constraints
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| ConstraintError::unknown_constraint(name))?;
        Ok(Self::violation(constraint, graph))
    }

    fn violation(constraint: &Constraint, graph: &Graph) -> Option<Violation> {
        match constraint.check(graph) {
            ConstraintCheckResult::Success => None,
            ConstraintCheckResult::Failure { nodes, edges } => {
                debug!(
                    constraint = %constraint.name,
                    nodes = nodes.len(),
                    edges = edges.len(),
                    "constraint violated"
                );
                Some(Violation::new(
                    constraint.name.clone(),
                    constraint.description.clone(),
                    nodes,
                    edges,
                ))
            }
        }
    }
}
