//! Graph-building traversal.
//!
//! The [`Walker`] visits the fields of a component in declaration order:
//!
//! - embedded components are walked in place;
//! - `Shared<T>` fields receive the singleton of `T` from the registry
//!   (allocating `T::default()` the first time `T` is seen) and the walk
//!   continues into that same instance;
//! - everything else is left alone.
//!
//! Every composite and `Shared` field yields one [`DependencyNode`].

use crate::component::{Component, ComponentId};
use crate::error::LoadError;
use crate::reflect::FieldMut;
use crate::registry::SingletonRegistry;
use crate::tree::{DependencyNode, DependencyTree, Target};

/// Walks a component graph, wiring singletons as it goes.
///
/// # Example
///
/// ```
/// use keystone_component::{Component, Shared, SingletonRegistry, Walker};
///
/// #[derive(Default, Component)]
/// struct Config;
///
/// #[derive(Default, Component)]
/// struct App {
///     primary: Shared<Config>,
///     fallback: Shared<Config>,
/// }
///
/// let mut app = App::default();
/// let mut registry = SingletonRegistry::new();
/// let tree = Walker::new(&mut registry).walk(&mut app).unwrap();
///
/// assert_eq!(tree.len(), 3);
/// assert_eq!(registry.len(), 1);
/// assert!(app.primary.ptr_eq(&app.fallback));
/// ```
pub struct Walker<'r> {
    registry: &'r mut SingletonRegistry,
    /// Singleton types currently being walked, outermost first.
    path: Vec<ComponentId>,
}

impl<'r> Walker<'r> {
    /// Creates a walker that resolves singletons through `registry`.
    pub fn new(registry: &'r mut SingletonRegistry) -> Self {
        Self {
            registry,
            path: Vec::new(),
        }
    }

    /// Walks `root` and returns the dependency tree.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::CycleDetected`] if a `Shared` field refers to a
    /// type that is already being walked further up the same path. The
    /// offending field is left untouched.
    pub fn walk(mut self, root: &mut dyn Component) -> Result<DependencyTree, LoadError> {
        let id = root.component_id();
        let children = self.walk_fields(root)?;
        Ok(DependencyTree::new(DependencyNode::new(id, Target::Root, children)))
    }

    fn walk_fields(&mut self, component: &mut dyn Component) -> Result<Vec<DependencyNode>, LoadError> {
        let mut children = Vec::new();

        for (index, field) in component.fields_mut().into_iter().enumerate() {
            match field {
                FieldMut::Composite(inner) => {
                    let id = inner.component_id();
                    let grandchildren = self.walk_fields(inner)?;
                    children.push(DependencyNode::new(id, Target::Field(index), grandchildren));
                }
                FieldMut::Pointer(slot) => {
                    let id = slot.target();
                    if self.path.contains(&id) {
                        return Err(self.cycle_error(id));
                    }

                    let resolved = slot.resolve(self.registry);
                    tracing::trace!(
                        component = id.type_name(),
                        created = resolved.created,
                        "resolved singleton"
                    );

                    self.path.push(id);
                    let grandchildren = {
                        let mut instance = resolved.instance.write();
                        self.walk_fields(&mut *instance)
                    };
                    self.path.pop();

                    children.push(DependencyNode::new(
                        id,
                        Target::Shared(resolved.instance),
                        grandchildren?,
                    ));
                }
                FieldMut::Other => {}
            }
        }

        Ok(children)
    }

    fn cycle_error(&self, repeated: ComponentId) -> LoadError {
        let start = self
            .path
            .iter()
            .position(|id| *id == repeated)
            .unwrap_or(0);
        let mut path: Vec<&'static str> = self.path[start..]
            .iter()
            .map(ComponentId::type_name)
            .collect();
        path.push(repeated.type_name());
        tracing::error!(cycle = ?path, "dependency cycle detected");
        LoadError::CycleDetected { path }
    }
}
