//! Static storage cells backing [`Typed`] and [`TypePath`] impls.
//!
//! Non-generic types get by with a [`NonGenericTypeInfoCell`], a thin
//! [`OnceLock`]. Generic types share one `static CELL` across every
//! monomorphization, so [`GenericTypeInfoCell`] and [`GenericTypePathCell`]
//! key their storage by [`TypeId`] behind an [`RwLock`].
//!
//! There is no `NonGenericTypePathCell`; a string literal does that job.
//!
//! [`Typed`]: crate::info::Typed
//! [`TypePath`]: crate::info::TypePath

use alloc::boxed::Box;
use alloc::string::String;
use core::any::{Any, TypeId};
use core::hash::BuildHasherDefault;
use std::collections::HashMap;
use std::collections::hash_map::DefaultHasher;
use std::sync::{OnceLock, PoisonError, RwLock};

use crate::info::TypeInfo;

mod sealed {
    use super::{String, TypeInfo};

    pub trait TypedProperty: 'static {}

    impl TypedProperty for String {}
    impl TypedProperty for TypeInfo {}
}

use sealed::TypedProperty;

/// Static storage for the type information of one non-generic type.
///
/// See [`NonGenericTypeInfoCell`].
pub struct NonGenericTypeCell<T: TypedProperty>(OnceLock<T>);

/// Static storage for the [`TypeInfo`] of one non-generic type.
///
/// This is what a hand-written [`Typed`](crate::info::Typed) impl puts in
/// its `static CELL`:
///
/// ```
/// use xylo_reflect::impls::NonGenericTypeInfoCell;
/// use xylo_reflect::info::{LeafInfo, TypeInfo, TypePath, Typed};
///
/// struct Marker;
///
/// impl TypePath for Marker {
///     fn type_path() -> &'static str {
///         "demo::Marker"
///     }
///     fn type_name() -> &'static str {
///         "Marker"
///     }
///     fn type_ident() -> &'static str {
///         "Marker"
///     }
/// }
///
/// impl Typed for Marker {
///     fn type_info() -> &'static TypeInfo {
///         static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
///         CELL.get_or_init(|| TypeInfo::Token(LeafInfo::new::<Marker>()))
///     }
/// }
///
/// assert_eq!(Marker::type_info().ty().path(), "demo::Marker");
/// ```
pub type NonGenericTypeInfoCell = NonGenericTypeCell<TypeInfo>;

impl<T: TypedProperty> NonGenericTypeCell<T> {
    /// Creates an empty cell.
    #[inline]
    pub const fn new() -> Self {
        Self(OnceLock::new())
    }

    /// Returns the stored value, initializing it from `f` on first use.
    #[inline]
    pub fn get_or_init<F>(&self, f: F) -> &T
    where
        F: FnOnce() -> T,
    {
        self.0.get_or_init(f)
    }
}

/// Static storage for the type information of a generic type, one entry
/// per monomorphization.
///
/// See [`GenericTypeInfoCell`] and [`GenericTypePathCell`].
pub struct GenericTypeCell<T: TypedProperty>(
    RwLock<HashMap<TypeId, &'static T, BuildHasherDefault<DefaultHasher>>>,
);

/// Static storage for the [`TypeInfo`] of a generic type.
///
/// Used exactly like [`GenericTypePathCell`], with
/// [`get_or_insert`](GenericTypeCell::get_or_insert) building a
/// [`TypeInfo`] instead of a path.
pub type GenericTypeInfoCell = GenericTypeCell<TypeInfo>;

/// Static storage for the type paths of a generic type.
///
/// A hand-written [`TypePath`](crate::info::TypePath) impl concatenates
/// the path once per monomorphization and leaks it into the cell:
///
/// ```
/// use xylo_reflect::impls::{self, GenericTypePathCell};
/// use xylo_reflect::info::TypePath;
///
/// struct Pair<T>(T, T);
///
/// impl<T: TypePath> TypePath for Pair<T> {
///     fn type_path() -> &'static str {
///         static CELL: GenericTypePathCell = GenericTypePathCell::new();
///         CELL.get_or_insert::<Self>(|| {
///             impls::concat(&["demo::Pair<", T::type_path(), ">"])
///         })
///     }
///     fn type_name() -> &'static str {
///         static CELL: GenericTypePathCell = GenericTypePathCell::new();
///         CELL.get_or_insert::<Self>(|| {
///             impls::concat(&["Pair<", T::type_name(), ">"])
///         })
///     }
///     fn type_ident() -> &'static str {
///         "Pair"
///     }
/// }
///
/// assert_eq!(<Pair<i32>>::type_path(), "demo::Pair<i32>");
/// assert_eq!(<Pair<u8>>::type_name(), "Pair<u8>");
/// ```
pub type GenericTypePathCell = GenericTypeCell<String>;

impl<T: TypedProperty> GenericTypeCell<T> {
    /// Creates an empty cell.
    #[inline]
    pub const fn new() -> Self {
        Self(RwLock::new(HashMap::with_hasher(BuildHasherDefault::new())))
    }

    /// Returns the value stored for `G`, initializing it from `f` on the
    /// first call for that monomorphization.
    #[inline(always)]
    pub fn get_or_insert<G: Any + ?Sized>(&self, f: impl FnOnce() -> T) -> &T {
        // Separate to reduce code compilation times
        self.get_or_insert_by_type_id(TypeId::of::<G>(), f)
    }

    // Separate to reduce code compilation times
    #[inline(never)]
    fn get_or_insert_by_type_id(&self, type_id: TypeId, f: impl FnOnce() -> T) -> &T {
        match self.get_by_type_id(type_id) {
            Some(info) => info,
            None => self.insert_by_type_id(type_id, f()),
        }
    }

    // Separate to reduce code compilation times
    #[inline(never)]
    fn get_by_type_id(&self, type_id: TypeId) -> Option<&T> {
        self.0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
            .copied()
    }

    // Separate to reduce code compilation times
    #[inline(never)]
    fn insert_by_type_id(&self, type_id: TypeId, value: T) -> &T {
        *self
            .0
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(type_id)
            .or_insert_with(|| Box::leak(Box::new(value)))
    }
}
