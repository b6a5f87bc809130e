//! Typed extension data attached to nodes.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// A type-keyed bag of immutable extension values.
///
/// At most one value per Rust type is stored. Values are shared between a
/// graph and its copies; setting a component replaces the value in this bag
/// only.
#[derive(Clone, Default)]
pub struct Components {
    values: HashMap<TypeId, Arc<dyn Any + Send + Sync>>,
}

impl Components {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a component, returning true if one of the same type was replaced.
    pub fn set<T: Any + Send + Sync>(&mut self, component: T) -> bool {
        self.values
            .insert(TypeId::of::<T>(), Arc::new(component))
            .is_some()
    }

    /// Get the component of type `T`, if present.
    pub fn get<T: Any + Send + Sync>(&self) -> Option<&T> {
        self.values
            .get(&TypeId::of::<T>())
            .and_then(|value| value.downcast_ref::<T>())
    }

    /// Remove the component of type `T`. Returns true if it was present.
    pub fn remove<T: Any + Send + Sync>(&mut self) -> bool {
        self.values.remove(&TypeId::of::<T>()).is_some()
    }

    pub fn contains<T: Any + Send + Sync>(&self) -> bool {
        self.values.contains_key(&TypeId::of::<T>())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl fmt::Debug for Components {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Components")
            .field("count", &self.values.len())
            .finish()
    }
}
