//! Errors returned by a load.

use crate::component::HookError;
use crate::reflect::Kind;

/// Errors that can occur while walking or loading a component graph.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The load root is not a composite value.
    ///
    /// Reported before any traversal or mutation happens.
    #[error("expecting a composite component, got {kind} value of type `{type_name}`")]
    InvalidArgument {
        /// The type passed as root.
        type_name: &'static str,
        /// How that type classifies.
        kind: Kind,
    },

    /// A component's load hook failed. The hook's error is carried as-is.
    #[error(transparent)]
    Hook(HookError),

    /// A `Shared` field leads back to a type still being walked.
    #[error("dependency cycle detected: {}", .path.join(" -> "))]
    CycleDetected {
        /// Type names along the cycle, the repeated type last.
        path: Vec<&'static str>,
    },

    /// A dependency tree does not describe the value it was run against.
    #[error("dependency tree does not match component `{component}`")]
    TreeMismatch {
        /// The component whose fields disagree with the tree.
        component: &'static str,
    },
}

impl LoadError {
    /// Returns the hook error, if this is a hook failure.
    #[must_use]
    pub fn hook_error(&self) -> Option<&(dyn core::error::Error + Send + Sync + 'static)> {
        match self {
            Self::Hook(err) => Some(err.as_ref()),
            _ => None,
        }
    }

    /// Consumes the error and returns the original hook error, if any.
    pub fn into_hook_error(self) -> Result<HookError, Self> {
        match self {
            Self::Hook(err) => Ok(err),
            other => Err(other),
        }
    }
}
