//! Field classification for the walker.
//!
//! Every field type the walker can see implements [`Reflect`], which sorts
//! it into one of three [`Kind`]s and hands out a mutable view:
//!
//! - [`Kind::Composite`] - an embedded component, walked in place
//! - [`Kind::Pointer`] - a [`Shared<T>`](crate::Shared) singleton handle
//! - [`Kind::Other`] - anything else, left untouched
//!
//! Derived components implement `Reflect` as `Composite`. This module
//! provides `Other` impls for the standard scalar, string, and collection
//! types so they can sit in a derived struct without `#[component(skip)]`.

use core::fmt;
use core::marker::PhantomData;
use core::time::Duration;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::path::PathBuf;
use std::sync::Arc;

use crate::component::Component;
use crate::shared::Slot;

/// The capability set a field belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// An embedded component.
    Composite,
    /// A shared handle to a singleton component.
    Pointer,
    /// Any other value.
    Other,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Composite => "composite",
            Self::Pointer => "pointer",
            Self::Other => "non-composite",
        })
    }
}

/// Mutable view of a single field.
pub enum FieldMut<'a> {
    /// An embedded component.
    Composite(&'a mut dyn Component),
    /// A singleton handle.
    Pointer(&'a mut dyn Slot),
    /// A value the walker ignores.
    Other,
}

impl FieldMut<'_> {
    /// Returns the kind of the viewed field.
    #[must_use]
    pub fn kind(&self) -> Kind {
        match self {
            Self::Composite(_) => Kind::Composite,
            Self::Pointer(_) => Kind::Pointer,
            Self::Other => Kind::Other,
        }
    }
}

impl fmt::Debug for FieldMut<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Composite(component) => f
                .debug_tuple("Composite")
                .field(&component.component_id())
                .finish(),
            Self::Pointer(slot) => f.debug_tuple("Pointer").field(&slot.target()).finish(),
            Self::Other => f.write_str("Other"),
        }
    }
}

/// Runtime classification of a field type.
///
/// `kind` must agree with the variant `reflect_mut` returns.
pub trait Reflect {
    /// Returns the kind of `self`.
    fn kind(&self) -> Kind;

    /// Returns a mutable, classified view of `self`.
    fn reflect_mut(&mut self) -> FieldMut<'_>;
}

impl Reflect for dyn Component {
    fn kind(&self) -> Kind {
        Kind::Composite
    }

    fn reflect_mut(&mut self) -> FieldMut<'_> {
        FieldMut::Composite(self)
    }
}

macro_rules! impl_reflect_other {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Reflect for $ty {
                fn kind(&self) -> Kind {
                    Kind::Other
                }

                fn reflect_mut(&mut self) -> FieldMut<'_> {
                    FieldMut::Other
                }
            }
        )*
    };
}

macro_rules! impl_reflect_other_generic {
    ($([$($params:tt)*] $ty:ty),* $(,)?) => {
        $(
            impl<$($params)*> Reflect for $ty {
                fn kind(&self) -> Kind {
                    Kind::Other
                }

                fn reflect_mut(&mut self) -> FieldMut<'_> {
                    FieldMut::Other
                }
            }
        )*
    };
}

impl_reflect_other!(
    (),
    bool,
    char,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    f32,
    f64,
    String,
    &'static str,
    Duration,
    PathBuf,
);

impl_reflect_other_generic!(
    [T] Vec<T>,
    [T] VecDeque<T>,
    [T] Option<T>,
    [T: ?Sized] Box<T>,
    [T: ?Sized] Arc<T>,
    [T: ?Sized] PhantomData<T>,
    [K, V, S] HashMap<K, V, S>,
    [T, S] HashSet<T, S>,
    [K, V] BTreeMap<K, V>,
    [T] BTreeSet<T>,
    [T, const N: usize] [T; N],
);
