//! Call-scoped bookkeeping: the singleton registry and the loaded set.
//!
//! Both are created fresh for every top-level load and threaded through
//! the walker and loader as parameters. Nothing here is process-wide, so
//! independent loads on unrelated roots never observe each other.

use std::sync::Arc;

use hashbrown::{HashMap, HashSet};
use parking_lot::RwLock;

use crate::component::{Component, ComponentId};
use crate::shared::ErasedInstance;

// ─────────────────────────────────────────────────────────────────────────────
// SingletonRegistry
// ─────────────────────────────────────────────────────────────────────────────

/// Maps each component type to its one instance for the current load.
///
/// The registry owns the canonical `Arc` of every singleton; the
/// [`Shared`](crate::Shared) fields in the graph hold clones of it.
///
/// # Example
///
/// ```
/// use keystone_component::{Component, SingletonRegistry};
///
/// #[derive(Default, Component)]
/// struct Config {
///     retries: u32,
/// }
///
/// let mut registry = SingletonRegistry::new();
/// registry.insert(Config { retries: 3 });
///
/// let config = registry.get::<Config>().unwrap();
/// assert_eq!(config.read().retries, 3);
/// ```
#[derive(Default)]
pub struct SingletonRegistry {
    instances: HashMap<ComponentId, ErasedInstance>,
}

impl SingletonRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            instances: HashMap::new(),
        }
    }

    /// Registers `value` as the singleton of type `T`.
    ///
    /// Returns the previously registered instance, if any.
    pub fn insert<T: Component>(&mut self, value: T) -> Option<Arc<RwLock<T>>> {
        self.insert_shared(Arc::new(RwLock::new(value)))
    }

    /// Registers an existing shared instance as the singleton of type `T`.
    ///
    /// Returns the previously registered instance, if any.
    pub fn insert_shared<T: Component>(&mut self, instance: Arc<RwLock<T>>) -> Option<Arc<RwLock<T>>> {
        let previous = self.get::<T>();
        self.instances.insert(ComponentId::of::<T>(), instance);
        previous
    }

    /// Returns the singleton of type `T`, if registered.
    #[must_use]
    pub fn get<T: Component>(&self) -> Option<Arc<RwLock<T>>> {
        self.instances
            .get(&ComponentId::of::<T>())
            .and_then(|instance| Arc::clone(instance).downcast_arc::<RwLock<T>>().ok())
    }

    /// Returns the type-erased singleton registered under `id`.
    #[must_use]
    pub fn instance(&self, id: ComponentId) -> Option<&ErasedInstance> {
        self.instances.get(&id)
    }

    /// Returns `true` if a singleton of type `T` is registered.
    #[must_use]
    pub fn contains<T: Component>(&self) -> bool {
        self.instances.contains_key(&ComponentId::of::<T>())
    }

    /// Returns the number of registered singletons.
    #[must_use]
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    /// Returns `true` if no singleton is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Iterates over the identities of all registered singletons.
    pub fn ids(&self) -> impl Iterator<Item = ComponentId> + '_ {
        self.instances.keys().copied()
    }

    /// Returns the singleton of type `T`, allocating `T::default()` first
    /// if none is registered. The flag is `true` when a new instance was
    /// allocated.
    pub(crate) fn get_or_create<T: Component + Default>(&mut self) -> (Arc<RwLock<T>>, bool) {
        if let Some(existing) = self.get::<T>() {
            return (existing, false);
        }
        let instance = Arc::new(RwLock::new(T::default()));
        self.instances
            .insert(ComponentId::of::<T>(), Arc::clone(&instance) as ErasedInstance);
        (instance, true)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// LoadedSet
// ─────────────────────────────────────────────────────────────────────────────

/// Records which component types already had their hook run in this load.
///
/// Each type moves from unloaded to loaded at most once; there is no way
/// back.
#[derive(Debug, Default, Clone)]
pub struct LoadedSet {
    loaded: HashSet<ComponentId>,
}

impl LoadedSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            loaded: HashSet::new(),
        }
    }

    /// Returns `true` if the hook of `id` already ran.
    #[must_use]
    pub fn contains(&self, id: ComponentId) -> bool {
        self.loaded.contains(&id)
    }

    /// Returns `true` if the hook of `T` already ran.
    #[must_use]
    pub fn is_loaded<T: Component>(&self) -> bool {
        self.contains(ComponentId::of::<T>())
    }

    /// Marks `id` as loaded. Returns `false` if it already was.
    pub fn mark(&mut self, id: ComponentId) -> bool {
        self.loaded.insert(id)
    }

    /// Returns the number of loaded types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.loaded.len()
    }

    /// Returns `true` if no type has been loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.loaded.is_empty()
    }

    /// Iterates over the loaded types in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = ComponentId> + '_ {
        self.loaded.iter().copied()
    }
}
