//! Constraint violation types.

use serde::Serialize;
use weft_core::ObjectId;

/// Objects that broke one named constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// The constraint that was violated.
    pub constraint_name: String,
    /// Human-readable description of the rule.
    pub description: String,
    /// Offending nodes, in ascending order.
    pub nodes: Vec<ObjectId>,
    /// Offending edges, in ascending order.
    pub edges: Vec<ObjectId>,
}

impl Violation {
    pub fn new(
        constraint_name: impl Into<String>,
        description: impl Into<String>,
        mut nodes: Vec<ObjectId>,
        mut edges: Vec<ObjectId>,
    ) -> Self {
        nodes.sort();
        nodes.dedup();
        edges.sort();
        edges.dedup();
        Self {
            constraint_name: constraint_name.into(),
            description: description.into(),
            nodes,
            edges,
        }
    }

    /// Check whether a node or an edge is among the offenders.
    pub fn involves(&self, id: ObjectId) -> bool {
        self.nodes.contains(&id) || self.edges.contains(&id)
    }
}

/// Collection of violations, one entry per failed constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Violations {
    violations: Vec<Violation>,
}

impl Violations {
    /// Create a new empty violations collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a violation.
    pub fn push(&mut self, violation: Violation) {
        self.violations.push(violation);
    }

    /// Check if there are any violations.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Get the number of violations.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Get all violations.
    pub fn all(&self) -> &[Violation] {
        &self.violations
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Violation> {
        self.violations.iter()
    }

    /// Violation reported by the named constraint, if it failed.
    pub fn get(&self, constraint_name: &str) -> Option<&Violation> {
        self.violations
            .iter()
            .find(|v| v.constraint_name == constraint_name)
    }

    /// Names of the failed constraints, in report order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.violations.iter().map(|v| v.constraint_name.as_str())
    }

    /// Merge another violations collection.
    pub fn merge(&mut self, other: Violations) {
        self.violations.extend(other.violations);
    }
}

impl IntoIterator for Violations {
    type Item = Violation;
    type IntoIter = std::vec::IntoIter<Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.into_iter()
    }
}

impl<'a> IntoIterator for &'a Violations {
    type Item = &'a Violation;
    type IntoIter = std::slice::Iter<'a, Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.iter()
    }
}

impl FromIterator<Violation> for Violations {
    fn from_iter<I: IntoIterator<Item = Violation>>(iter: I) -> Self {
        Self {
            violations: iter.into_iter().collect(),
        }
    }
}
