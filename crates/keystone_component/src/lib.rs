//! Singleton component graphs with dependency-ordered load hooks.
//!
//! `keystone_component` takes a root struct, fills in every component it
//! can reach, and then runs each component's load hook after the hooks of
//! everything that component depends on:
//!
//! - [`Component`] - a struct the walker can see into, usually derived
//! - [`Shared`] - a handle to the one instance of a component type
//! - [`Loadable`] - the optional lifecycle hook
//! - [`Walker`] - fills `Shared` fields and builds the [`DependencyTree`]
//! - [`Loader`] - runs hooks post-order, once per type, failing fast
//!
//! # Singletons
//!
//! Identity is the concrete type. Within one load, every `Shared<T>`
//! reachable from the root points at the same instance of `T`. Embedded
//! components (fields whose type is itself a component) are walked in place
//! and never shared.
//!
//! # Load order
//!
//! Hooks run depth-first, children before parents, fields in declaration
//! order. A type's hook runs at most once per load, however many fields
//! reach it. The first failing hook aborts the load and its error is
//! returned unchanged.
//!
//! # Example
//!
//! ```
//! use keystone_component::{Component, HookError, Loadable, Shared};
//!
//! #[derive(Default, Component)]
//! #[component(loadable)]
//! struct Config {
//!     name: String,
//! }
//!
//! impl Loadable for Config {
//!     fn load(&mut self) -> Result<(), HookError> {
//!         self.name = "config".into();
//!         Ok(())
//!     }
//! }
//!
//! #[derive(Default, Component)]
//! #[component(loadable)]
//! struct Logger {
//!     config: Shared<Config>,
//!     name: String,
//! }
//!
//! impl Loadable for Logger {
//!     fn load(&mut self) -> Result<(), HookError> {
//!         let config = self.config.read().ok_or("config module must be loaded")?;
//!         self.name = format!("{}logger", config.name);
//!         Ok(())
//!     }
//! }
//!
//! let mut logger = Logger::default();
//! keystone_component::load(&mut logger).unwrap();
//! assert_eq!(logger.name, "configlogger");
//! ```

// Self-reference so `#[derive(Component)]` output can use
// `keystone_component::` paths inside this crate.
extern crate self as keystone_component;

/// Component trait, identity, and the load hook.
pub mod component;

/// Load errors.
pub mod error;

/// Hook execution.
pub mod loader;

/// Field classification.
pub mod reflect;

/// Singleton registry and loaded set.
pub mod registry;

/// Singleton handles.
pub mod shared;

/// Dependency tree.
pub mod tree;

/// Graph-building traversal.
pub mod walker;

pub use component::{Component, ComponentId, HookError, Loadable};
pub use error::LoadError;
pub use loader::{LoadReport, Loader, execute_hooks, load};
pub use reflect::{FieldMut, Kind, Reflect};
pub use registry::{LoadedSet, SingletonRegistry};
pub use shared::{ErasedInstance, Instance, Resolved, Shared, Slot};
pub use tree::{DependencyNode, DependencyTree, Target};
pub use walker::Walker;

/// Re-export `#[derive(Component)]`.
pub use keystone_component_macros::Component;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use crate::{
        Component, ComponentId, HookError, LoadError, LoadReport, Loadable, Loader, Shared, load,
    };
}
