//! The component trait, component identity, and the load hook capability.
//!
//! A [`Component`] is a struct whose fields the walker can see. Components
//! are normally declared with `#[derive(Component)]`; the derive lists the
//! fields in declaration order and, with `#[component(loadable)]`, exposes
//! the [`Loadable`] hook.

use core::any::TypeId;
use core::fmt;

use crate::reflect::FieldMut;

/// Error type returned by [`Loadable::load`].
///
/// The loader surfaces this value unchanged through
/// [`LoadError::Hook`](crate::LoadError::Hook).
pub type HookError = Box<dyn core::error::Error + Send + Sync + 'static>;

// ─────────────────────────────────────────────────────────────────────────────
// ComponentId
// ─────────────────────────────────────────────────────────────────────────────

/// Unique identifier for a component type.
///
/// Singleton identity and load-once bookkeeping are keyed by the concrete
/// type, so each component type has exactly one `ComponentId`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ComponentId {
    type_id: TypeId,
    type_name: &'static str,
}

impl ComponentId {
    /// Creates a `ComponentId` for the given type.
    #[must_use]
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: core::any::type_name::<T>(),
        }
    }

    /// Returns the underlying `TypeId`.
    #[must_use]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Returns the type name for debugging.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Returns the type name without its module path.
    #[must_use]
    pub fn short_name(&self) -> &'static str {
        let base = self.type_name.split('<').next().unwrap_or(self.type_name);
        let start = base.rfind("::").map_or(0, |i| i + 2);
        &self.type_name[start..]
    }
}

impl fmt::Debug for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ComponentId").field(&self.type_name).finish()
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Component
// ─────────────────────────────────────────────────────────────────────────────

/// A composite value participating in the initialization graph.
///
/// Implemented by `#[derive(Component)]`. Hand-written impls must report
/// the same fields, in the same order, on every call to
/// [`fields_mut`](Self::fields_mut): dependency trees address embedded
/// components by their index in that list.
///
/// The derive also implements [`Reflect`](crate::Reflect), which
/// [`load`](crate::load) requires of its root. A hand-written component
/// without it is loaded through `&mut dyn Component`:
///
/// ```
/// use keystone_component::{Component, ComponentId, FieldMut, Reflect, Shared};
///
/// #[derive(Default, Component)]
/// struct Clock;
///
/// #[derive(Default)]
/// struct Timer {
///     clock: Shared<Clock>,
/// }
///
/// impl Component for Timer {
///     fn component_id(&self) -> ComponentId {
///         ComponentId::of::<Self>()
///     }
///
///     fn fields_mut(&mut self) -> Vec<FieldMut<'_>> {
///         vec![self.clock.reflect_mut()]
///     }
/// }
///
/// let mut timer = Timer::default();
/// keystone_component::load(&mut timer as &mut dyn Component).unwrap();
/// assert!(timer.clock.is_set());
/// ```
///
/// # Example
///
/// ```
/// use keystone_component::{Component, HookError, Loadable, Shared};
///
/// #[derive(Default, Component)]
/// #[component(loadable)]
/// struct Config {
///     #[component(skip)]
///     name: String,
/// }
///
/// impl Loadable for Config {
///     fn load(&mut self) -> Result<(), HookError> {
///         self.name = "config".into();
///         Ok(())
///     }
/// }
///
/// #[derive(Default, Component)]
/// struct App {
///     config: Shared<Config>,
/// }
///
/// let mut app = App::default();
/// keystone_component::load(&mut app).unwrap();
/// assert_eq!(app.config.read().unwrap().name, "config");
/// ```
pub trait Component: Send + Sync + 'static {
    /// Returns the identity of this component's concrete type.
    fn component_id(&self) -> ComponentId;

    /// Returns mutable views of every visible field, in declaration order.
    fn fields_mut(&mut self) -> Vec<FieldMut<'_>>;

    /// Returns the load hook if this type participates in loading.
    ///
    /// The default implementation returns `None`: the component is walked
    /// for its fields but never loaded itself.
    fn as_loadable(&mut self) -> Option<&mut dyn Loadable> {
        None
    }
}

/// The optional lifecycle hook of a component.
///
/// Called at most once per component type per top-level load, after the
/// hooks of every loadable component reachable through its own fields have
/// succeeded. Opt in with `#[component(loadable)]`.
pub trait Loadable {
    /// Runs the hook.
    ///
    /// # Errors
    ///
    /// Any error aborts the whole load and is returned to its caller.
    fn load(&mut self) -> Result<(), HookError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    mod nested {
        pub struct Inner;
        pub struct Wrapper<T>(pub T);
    }

    #[test]
    fn component_id_equality_follows_type() {
        assert_eq!(ComponentId::of::<nested::Inner>(), ComponentId::of::<nested::Inner>());
        assert_ne!(ComponentId::of::<nested::Inner>(), ComponentId::of::<u32>());
    }

    #[test]
    fn short_name_strips_module_path() {
        assert_eq!(ComponentId::of::<nested::Inner>().short_name(), "Inner");
        assert_eq!(
            ComponentId::of::<nested::Wrapper<nested::Inner>>().short_name(),
            "Wrapper<keystone_component::component::tests::nested::Inner>"
        );
    }
}
