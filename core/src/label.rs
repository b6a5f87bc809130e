//! Label sets and reserved system labels.
//!
//! Labels are short strings attached to nodes and edges. Labels starting with
//! [`labels::SYSTEM_MARKER`] are managed by the library and denote roles;
//! every other label is opaque user data.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Reserved label names.
pub mod labels {
    /// Prefix marking a label as system-managed.
    pub const SYSTEM_MARKER: char = '%';

    /// Node stands in for another node.
    pub const PROXY: &str = "%proxy";
    /// Edge from a proxy to the node it directly represents.
    pub const SUBJECT: &str = "%subject";
    /// Edge origin must be resolved through a proxy subject chain.
    pub const INDIRECT_ORIGIN: &str = "%indirect-origin";
    /// Edge target must be resolved through a proxy subject chain.
    pub const INDIRECT_TARGET: &str = "%indirect-target";
    /// Node owns other nodes, or edge expresses holon ownership.
    pub const HOLON: &str = "%holon";

    /// Returns true if the label is reserved for the library.
    pub fn is_system(label: &str) -> bool {
        label.starts_with(SYSTEM_MARKER)
    }
}

/// An ordered set of labels.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabelSet {
    labels: BTreeSet<String>,
}

impl LabelSet {
    /// Create an empty label set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a label. Returns true if it was not present.
    pub fn insert(&mut self, label: impl Into<String>) -> bool {
        self.labels.insert(label.into())
    }

    /// Remove a label. Returns true if it was present.
    pub fn remove(&mut self, label: &str) -> bool {
        self.labels.remove(label)
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, label: impl Into<String>) -> Self {
        self.insert(label);
        self
    }

    /// Builder form of [`remove`](Self::remove).
    pub fn without(mut self, label: &str) -> Self {
        self.remove(label);
        self
    }

    pub fn contains(&self, label: &str) -> bool {
        self.labels.contains(label)
    }

    /// True if every label of `other` is in this set.
    pub fn is_superset(&self, other: &LabelSet) -> bool {
        self.labels.is_superset(&other.labels)
    }

    /// True if the two sets share at least one label.
    pub fn intersects(&self, other: &LabelSet) -> bool {
        !self.labels.is_disjoint(&other.labels)
    }

    /// True if the two sets share no label.
    pub fn is_disjoint(&self, other: &LabelSet) -> bool {
        self.labels.is_disjoint(&other.labels)
    }

    /// Add every label of `other`.
    pub fn extend_from(&mut self, other: &LabelSet) {
        self.labels.extend(other.labels.iter().cloned());
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Iterate labels in lexicographic order.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.labels.iter().map(String::as_str)
    }

    /// Labels carrying the system marker.
    pub fn system_labels(&self) -> impl Iterator<Item = &str> + '_ {
        self.iter().filter(|l| labels::is_system(l))
    }

    /// Labels without the system marker.
    pub fn user_labels(&self) -> impl Iterator<Item = &str> + '_ {
        self.iter().filter(|l| !labels::is_system(l))
    }
}

impl<S: Into<String>> FromIterator<S> for LabelSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            labels: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<S: Into<String>, const N: usize> From<[S; N]> for LabelSet {
    fn from(labels: [S; N]) -> Self {
        labels.into_iter().collect()
    }
}

impl<'a> IntoIterator for &'a LabelSet {
    type Item = &'a String;
    type IntoIter = std::collections::btree_set::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.labels.iter()
    }
}

impl fmt::Display for LabelSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, label) in self.labels.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", label)?;
        }
        write!(f, "}}")
    }
}

/// Helper macro to create label sets.
#[macro_export]
macro_rules! label_set {
    () => {
        $crate::LabelSet::new()
    };
    ($($label:expr),+ $(,)?) => {
        {
            let mut set = $crate::LabelSet::new();
            $(
                set.insert($label);
            )+
            set
        }
    };
}
