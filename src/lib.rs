//! Singleton component graphs with dependency-ordered load hooks.
//!
//! See [`keystone_component`] for the full API.

pub use keystone_component;
pub use keystone_component::*;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use keystone_component::prelude::*;
}
