//! Dependency-ordered execution of load hooks.
//!
//! A load runs in two phases:
//!
//! 1. **Walk** - the [`Walker`] fills every `Shared` field and records the
//!    [`DependencyTree`].
//! 2. **Hooks** - the tree is visited post-order, left to right. A node's
//!    hook runs only after every child subtree succeeded, and at most once
//!    per component type.
//!
//! The first failing hook aborts the load; hooks that already ran are not
//! undone.
//!
//! # Example
//!
//! ```
//! use keystone_component::{Component, HookError, Loadable, Loader, Shared};
//!
//! #[derive(Default, Component)]
//! #[component(loadable)]
//! struct Config {
//!     endpoint: String,
//! }
//!
//! impl Loadable for Config {
//!     fn load(&mut self) -> Result<(), HookError> {
//!         if self.endpoint.is_empty() {
//!             self.endpoint = "localhost:8080".into();
//!         }
//!         Ok(())
//!     }
//! }
//!
//! #[derive(Default, Component)]
//! struct App {
//!     config: Shared<Config>,
//! }
//!
//! let mut app = App::default();
//! let report = Loader::new()
//!     .provide(Config { endpoint: "example.org:443".into() })
//!     .load(&mut app)
//!     .unwrap();
//!
//! assert_eq!(report.hooks.len(), 1);
//! assert_eq!(app.config.read().unwrap().endpoint, "example.org:443");
//! ```

use core::time::Duration;
use std::time::Instant;

use crate::component::{Component, ComponentId};
use crate::error::LoadError;
use crate::reflect::{FieldMut, Reflect};
use crate::registry::{LoadedSet, SingletonRegistry};
use crate::tree::{DependencyNode, DependencyTree, Target};
use crate::walker::Walker;

/// Summary of a successful load.
#[derive(Debug, Clone)]
pub struct LoadReport {
    /// Component types whose hook ran, in invocation order.
    pub hooks: Vec<ComponentId>,
    /// Number of nodes in the dependency tree, root included.
    pub nodes: usize,
    /// Number of singleton instances in the registry.
    pub singletons: usize,
    /// Total duration of both phases.
    pub duration: Duration,
}

impl LoadReport {
    /// Returns `true` if the hook of `T` ran during the load.
    #[must_use]
    pub fn loaded<T: Component>(&self) -> bool {
        self.hooks.contains(&ComponentId::of::<T>())
    }

    /// Returns the position of `T`'s hook in the invocation order.
    #[must_use]
    pub fn position<T: Component>(&self) -> Option<usize> {
        let id = ComponentId::of::<T>();
        self.hooks.iter().position(|hook| *hook == id)
    }
}

/// Configures and runs a single load.
///
/// A `Loader` is consumed by [`load`](Self::load): singletons provided to it
/// belong to exactly one call.
#[derive(Default)]
pub struct Loader {
    registry: SingletonRegistry,
}

impl Loader {
    /// Creates a loader with an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            registry: SingletonRegistry::new(),
        }
    }

    /// Seeds the registry with a configured instance of `T`.
    ///
    /// Every `Shared<T>` in the graph receives this instance instead of
    /// `T::default()`. Its hook still runs during the load.
    #[must_use]
    pub fn provide<T: Component>(mut self, value: T) -> Self {
        self.registry.insert(value);
        self
    }

    /// Initializes `root`'s component graph and runs its load hooks.
    ///
    /// # Errors
    ///
    /// - [`LoadError::InvalidArgument`] if `root` is not a composite
    ///   component. Nothing is touched.
    /// - [`LoadError::CycleDetected`] if a `Shared` field loops back into a
    ///   type that is still being walked.
    /// - [`LoadError::Hook`] with the first hook failure, in post-order.
    pub fn load<R: Reflect + ?Sized>(self, root: &mut R) -> Result<LoadReport, LoadError> {
        let root = match root.reflect_mut() {
            FieldMut::Composite(component) => component,
            other => {
                return Err(LoadError::InvalidArgument {
                    type_name: core::any::type_name::<R>(),
                    kind: other.kind(),
                });
            }
        };

        let root_id = root.component_id();
        let span = tracing::debug_span!("load", root = root_id.type_name());
        let _enter = span.enter();
        let start = Instant::now();

        let mut registry = self.registry;
        let tree = Walker::new(&mut registry).walk(&mut *root)?;
        tracing::debug!(
            nodes = tree.len(),
            singletons = registry.len(),
            "component graph initialized"
        );

        let mut loaded = LoadedSet::new();
        let mut hooks = Vec::new();
        run_node(tree.root(), root, &mut loaded, &mut hooks)?;

        let report = LoadReport {
            hooks,
            nodes: tree.len(),
            singletons: registry.len(),
            duration: start.elapsed(),
        };
        tracing::debug!(
            hooks = report.hooks.len(),
            duration = ?report.duration,
            "component graph loaded"
        );
        Ok(report)
    }
}

/// Initializes `root`'s component graph and runs its load hooks.
///
/// Shorthand for `Loader::new().load(root)` that drops the report.
///
/// # Errors
///
/// See [`Loader::load`].
pub fn load<R: Reflect + ?Sized>(root: &mut R) -> Result<(), LoadError> {
    Loader::new().load(root).map(|_| ())
}

/// Runs the hooks of a prebuilt tree against `root`.
///
/// `tree` must have been produced by walking `root` (or a value with the
/// same field layout). Types already in `loaded` are skipped, and types
/// whose hook succeeds are added to it.
///
/// Returns the component types whose hook ran, in invocation order.
///
/// # Errors
///
/// - [`LoadError::Hook`] with the first hook failure, in post-order.
/// - [`LoadError::TreeMismatch`] if the tree addresses a field `root` does
///   not have.
pub fn execute_hooks(
    tree: &DependencyTree,
    root: &mut dyn Component,
    loaded: &mut LoadedSet,
) -> Result<Vec<ComponentId>, LoadError> {
    let mut hooks = Vec::new();
    run_node(tree.root(), root, loaded, &mut hooks)?;
    Ok(hooks)
}

fn run_node(
    node: &DependencyNode,
    component: &mut dyn Component,
    loaded: &mut LoadedSet,
    hooks: &mut Vec<ComponentId>,
) -> Result<(), LoadError> {
    if component.component_id() != node.id() {
        return Err(mismatch(component));
    }

    {
        let mut fields = component.fields_mut();
        for child in node.children() {
            match child.target() {
                Target::Field(index) => {
                    let Some(FieldMut::Composite(inner)) = fields.get_mut(*index) else {
                        return Err(LoadError::TreeMismatch {
                            component: node.id().type_name(),
                        });
                    };
                    run_node(child, &mut **inner, loaded, hooks)?;
                }
                Target::Shared(instance) => {
                    let mut guard = instance.write();
                    run_node(child, &mut *guard, loaded, hooks)?;
                }
                Target::Root => {
                    return Err(LoadError::TreeMismatch {
                        component: node.id().type_name(),
                    });
                }
            }
        }
    }

    let id = node.id();
    let Some(hook) = component.as_loadable() else {
        return Ok(());
    };
    if loaded.contains(id) {
        tracing::trace!(component = id.type_name(), "already loaded");
        return Ok(());
    }

    tracing::debug!(component = id.type_name(), "running load hook");
    if let Err(err) = hook.load() {
        tracing::error!(component = id.type_name(), error = %err, "load hook failed");
        return Err(LoadError::Hook(err));
    }
    loaded.mark(id);
    hooks.push(id);
    Ok(())
}

fn mismatch(component: &dyn Component) -> LoadError {
    LoadError::TreeMismatch {
        component: component.component_id().type_name(),
    }
}
