use alloc::boxed::Box;

use crate::Reflect;
use crate::info::{Type, TypeInfo, Typed};
use crate::registry::{Factory, TypeRegistry};

// -----------------------------------------------------------------------------
// TypeMeta

/// Runtime metadata for one type, registered into the [`TypeRegistry`].
///
/// This pairs the type's [`TypeInfo`] with an optional [`Factory`] for
/// producing blank values. An instance can be created with
/// [`TypeMeta::of`], but is usually generated through
/// [`#[derive(Reflect)]`](crate::derive::Reflect), which implements the
/// [`GetTypeMeta`] trait.
///
/// # Example
///
/// ```
/// use xylo_reflect::registry::TypeMeta;
///
/// let meta = TypeMeta::with_factory::<String>();
/// assert_eq!(meta.type_path(), "alloc::string::String");
///
/// let blank = meta.blank().unwrap();
/// assert_eq!(blank.take::<String>().unwrap(), "");
/// ```
#[derive(Clone, Debug)]
pub struct TypeMeta {
    // `Type` access through `TypeInfo` judges the reflect kind each time.
    // The reference is cached to keep the hot lookups cheap.
    ty: &'static Type,
    type_info: &'static TypeInfo,
    factory: Option<Factory>,
}

impl TypeMeta {
    /// Creates a [`TypeMeta`] without a factory.
    ///
    /// Decoding can describe such a type but cannot produce blanks of it.
    #[inline]
    pub fn of<T: Typed>() -> Self {
        let type_info = T::type_info();
        let ty = type_info.ty();
        Self {
            ty,
            type_info,
            factory: None,
        }
    }

    /// Creates a [`TypeMeta`] with a factory producing `T::default()`.
    #[inline]
    pub fn with_factory<T: Typed + Reflect + Default>() -> Self {
        let mut meta = Self::of::<T>();
        meta.factory = Some(Factory::of::<T>());
        meta
    }

    /// Returns the [`TypeInfo`].
    #[inline(always)]
    pub const fn type_info(&self) -> &'static TypeInfo {
        self.type_info
    }

    /// Returns the [`Type`].
    ///
    /// Manually impl for static reference.
    #[inline(always)]
    pub const fn ty(&self) -> &'static Type {
        self.ty
    }

    crate::info::impl_type_fn!();

    /// Replaces the factory.
    ///
    /// Used for types whose blank is not `Default::default()`, or to
    /// attach a factory after [`TypeMeta::of`].
    #[inline]
    pub fn set_factory(&mut self, factory: Factory) {
        self.factory = Some(factory);
    }

    /// Returns the factory, if one is registered.
    #[inline]
    pub fn factory(&self) -> Option<&Factory> {
        self.factory.as_ref()
    }

    /// Produces one blank value, if a factory is registered.
    #[inline]
    pub fn blank(&self) -> Option<Box<dyn Reflect>> {
        self.factory.as_ref().map(Factory::make)
    }
}

// -----------------------------------------------------------------------------
// GetTypeMeta

/// A trait which allows a type to generate its [`TypeMeta`] for
/// registration into the [`TypeRegistry`].
///
/// This trait is automatically implemented by
/// [`#[derive(Reflect)]`](crate::derive::Reflect).
///
/// # Implementation
///
/// Use [`#[derive(Reflect)]`](crate::derive::Reflect):
///
/// ```
/// use xylo_reflect::Reflect;
/// use xylo_reflect::registry::GetTypeMeta;
///
/// #[derive(Reflect, Default)]
/// struct Probe {
///     value: i32,
/// }
///
/// let meta = Probe::get_type_meta();
/// assert!(meta.factory().is_some());
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` does not implement `GetTypeMeta` so cannot provide type registration information",
    note = "consider annotating `{Self}` with `#[derive(Reflect)]`"
)]
pub trait GetTypeMeta: Typed {
    /// Returns the default [`TypeMeta`] for this type.
    fn get_type_meta() -> TypeMeta;

    /// Registers other types needed by this type.
    /// **Allow** not to register oneself.
    fn register_dependencies(_registry: &mut TypeRegistry) {}
}
