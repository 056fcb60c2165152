//! Singleton handles.
//!
//! A [`Shared<T>`] field is the pointer-shaped edge of a component graph.
//! It starts out empty; the walker fills it with the one instance of `T`
//! allocated for the current load, so every `Shared<T>` reachable from the
//! same root ends up pointing at the same `Arc<RwLock<T>>`.

use core::fmt;
use std::sync::Arc;

use downcast_rs::{DowncastSync, impl_downcast};
use parking_lot::{MappedRwLockWriteGuard, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::component::{Component, ComponentId};
use crate::reflect::{FieldMut, Kind, Reflect};
use crate::registry::SingletonRegistry;

// ─────────────────────────────────────────────────────────────────────────────
// Erased instances
// ─────────────────────────────────────────────────────────────────────────────

/// A type-erased singleton instance.
pub trait Instance: DowncastSync {
    /// Returns the identity of the stored component type.
    fn id(&self) -> ComponentId;

    /// Locks the instance for writing and exposes it as a [`Component`].
    fn write(&self) -> MappedRwLockWriteGuard<'_, dyn Component>;
}

impl_downcast!(sync Instance);

impl<T: Component> Instance for RwLock<T> {
    fn id(&self) -> ComponentId {
        ComponentId::of::<T>()
    }

    fn write(&self) -> MappedRwLockWriteGuard<'_, dyn Component> {
        RwLockWriteGuard::map(RwLock::write(self), |component| {
            component as &mut dyn Component
        })
    }
}

/// Shared, type-erased singleton instance as stored in the registry.
pub type ErasedInstance = Arc<dyn Instance>;

/// Outcome of resolving a [`Slot`] against the registry.
pub struct Resolved {
    /// The instance now stored in the slot.
    pub instance: ErasedInstance,
    /// Whether the instance was allocated by this resolution.
    pub created: bool,
}

// ─────────────────────────────────────────────────────────────────────────────
// Slot
// ─────────────────────────────────────────────────────────────────────────────

/// A pointer-shaped field the walker can fill.
pub trait Slot {
    /// Returns the identity of the component type this slot points to.
    fn target(&self) -> ComponentId;

    /// Returns `true` if the slot currently holds an instance.
    fn is_set(&self) -> bool;

    /// Fetches (or allocates and registers) the singleton for the target
    /// type and stores it in the slot.
    fn resolve(&mut self, registry: &mut SingletonRegistry) -> Resolved;
}

// ─────────────────────────────────────────────────────────────────────────────
// Shared
// ─────────────────────────────────────────────────────────────────────────────

/// A handle to the singleton instance of `T`.
///
/// Empty by default. After a successful walk every `Shared<T>` reachable
/// from the root refers to the same instance, see [`ptr_eq`](Self::ptr_eq).
///
/// # Example
///
/// ```
/// use keystone_component::{Component, Shared};
///
/// #[derive(Default, Component)]
/// struct Config {
///     verbose: bool,
/// }
///
/// #[derive(Default, Component)]
/// struct Logger {
///     config: Shared<Config>,
/// }
///
/// #[derive(Default, Component)]
/// struct App {
///     config: Shared<Config>,
///     logger: Shared<Logger>,
/// }
///
/// let mut app = App::default();
/// assert!(!app.config.is_set());
///
/// keystone_component::load(&mut app).unwrap();
///
/// let logger = app.logger.read().unwrap();
/// assert!(app.config.ptr_eq(&logger.config));
/// ```
pub struct Shared<T> {
    inner: Option<Arc<RwLock<T>>>,
}

impl<T> Shared<T> {
    /// Creates an empty handle.
    #[must_use]
    pub const fn empty() -> Self {
        Self { inner: None }
    }

    /// Creates a handle that already holds `value`.
    ///
    /// The walker replaces it with the registry's instance, so this is
    /// mostly useful outside of a load.
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            inner: Some(Arc::new(RwLock::new(value))),
        }
    }

    /// Returns `true` if the handle holds an instance.
    #[must_use]
    pub fn is_set(&self) -> bool {
        self.inner.is_some()
    }

    /// Locks the instance for reading.
    ///
    /// Returns `None` if the handle is empty.
    #[must_use]
    pub fn read(&self) -> Option<RwLockReadGuard<'_, T>> {
        self.inner.as_deref().map(RwLock::read)
    }

    /// Locks the instance for writing.
    ///
    /// Returns `None` if the handle is empty.
    #[must_use]
    pub fn write(&self) -> Option<RwLockWriteGuard<'_, T>> {
        self.inner.as_deref().map(RwLock::write)
    }

    /// Returns the underlying shared lock, if set.
    #[must_use]
    pub fn handle(&self) -> Option<&Arc<RwLock<T>>> {
        self.inner.as_ref()
    }

    /// Returns `true` if both handles are set and point to the same instance.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (&self.inner, &other.inner) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    pub(crate) fn set(&mut self, instance: Arc<RwLock<T>>) {
        self.inner = Some(instance);
    }
}

impl<T> Default for Shared<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> Clone for Shared<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T> From<Arc<RwLock<T>>> for Shared<T> {
    fn from(instance: Arc<RwLock<T>>) -> Self {
        Self {
            inner: Some(instance),
        }
    }
}

impl<T: 'static> fmt::Debug for Shared<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = ComponentId::of::<T>();
        match &self.inner {
            Some(instance) => {
                write!(f, "Shared<{}>({:p})", name.short_name(), Arc::as_ptr(instance))
            }
            None => write!(f, "Shared<{}>(empty)", name.short_name()),
        }
    }
}

impl<T: Component + Default> Slot for Shared<T> {
    fn target(&self) -> ComponentId {
        ComponentId::of::<T>()
    }

    fn is_set(&self) -> bool {
        Shared::is_set(self)
    }

    fn resolve(&mut self, registry: &mut SingletonRegistry) -> Resolved {
        let (instance, created) = registry.get_or_create::<T>();
        self.set(Arc::clone(&instance));
        let instance: ErasedInstance = instance;
        Resolved { instance, created }
    }
}

impl<T: Component + Default> Reflect for Shared<T> {
    fn kind(&self) -> Kind {
        Kind::Pointer
    }

    fn reflect_mut(&mut self) -> FieldMut<'_> {
        FieldMut::Pointer(self)
    }
}
