//! The dependency tree produced by the walker.
//!
//! One [`DependencyNode`] per traversed composite or `Shared` field, in
//! field declaration order, whether or not the field's type is loadable.
//! The loader walks it post-order to sequence hooks without re-deriving
//! structure or re-resolving singletons.

use core::fmt;

use crate::component::ComponentId;
use crate::shared::ErasedInstance;

/// Where the value behind a node lives.
#[derive(Clone)]
pub enum Target {
    /// The root value passed to the load.
    Root,
    /// An embedded component, addressed by its index in the parent's
    /// [`fields_mut`](crate::Component::fields_mut) list.
    Field(usize),
    /// A singleton instance.
    Shared(ErasedInstance),
}

impl fmt::Debug for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Root => f.write_str("Root"),
            Self::Field(index) => f.debug_tuple("Field").field(index).finish(),
            Self::Shared(instance) => f.debug_tuple("Shared").field(&instance.id()).finish(),
        }
    }
}

/// A traversed component and the components discovered in its fields.
#[derive(Debug, Clone)]
pub struct DependencyNode {
    id: ComponentId,
    target: Target,
    children: Vec<DependencyNode>,
}

impl DependencyNode {
    pub(crate) fn new(id: ComponentId, target: Target, children: Vec<DependencyNode>) -> Self {
        Self {
            id,
            target,
            children,
        }
    }

    /// Returns the component type of this node.
    #[must_use]
    pub fn id(&self) -> ComponentId {
        self.id
    }

    /// Returns where the node's value lives.
    #[must_use]
    pub fn target(&self) -> &Target {
        &self.target
    }

    /// Returns the child nodes in field declaration order.
    #[must_use]
    pub fn children(&self) -> &[DependencyNode] {
        &self.children
    }

    /// Returns `true` if the node refers to a singleton instance.
    #[must_use]
    pub fn is_shared(&self) -> bool {
        matches!(self.target, Target::Shared(_))
    }

    /// Counts this node and all its descendants.
    #[must_use]
    pub fn len(&self) -> usize {
        1 + self.children.iter().map(DependencyNode::len).sum::<usize>()
    }

    /// Returns the number of levels below and including this node.
    #[must_use]
    pub fn depth(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(DependencyNode::depth)
            .max()
            .unwrap_or(0)
    }
}

/// The rooted tree of every component reached from a load root.
#[derive(Debug, Clone)]
pub struct DependencyTree {
    root: DependencyNode,
}

impl DependencyTree {
    pub(crate) fn new(root: DependencyNode) -> Self {
        Self { root }
    }

    /// Returns the root node.
    #[must_use]
    pub fn root(&self) -> &DependencyNode {
        &self.root
    }

    /// Returns the total number of nodes, root included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.root.len()
    }

    /// A tree always contains its root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns the node identities in post-order (children first, left to
    /// right), which is the order hooks are considered in.
    #[must_use]
    pub fn post_order(&self) -> Vec<ComponentId> {
        fn visit(node: &DependencyNode, out: &mut Vec<ComponentId>) {
            for child in &node.children {
                visit(child, out);
            }
            out.push(node.id);
        }

        let mut out = Vec::with_capacity(self.len());
        visit(&self.root, &mut out);
        out
    }
}
