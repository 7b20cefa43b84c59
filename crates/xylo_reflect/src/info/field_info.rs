use core::any::{Any, TypeId};

use crate::info::{TypeInfo, Typed};

#[derive(Clone, Copy, Debug)]
struct FieldType {
    ty_id: TypeId,
    // `TypeInfo` is created on first access; a function pointer delays it.
    type_info: fn() -> &'static TypeInfo,
}

/// Information for a named struct field.
///
/// A field comes in three flavors:
///
/// - a plain serialized field ([`NamedField::new`]),
/// - a base field ([`NamedField::base`]) whose fields are flattened into
///   the owning struct when encoding, forming the struct's ancestry chain,
/// - a skipped field ([`NamedField::skipped`]) that never reaches a
///   document and keeps its blank value when decoding. Skipped fields
///   carry no type, so their type does not need to be reflectable.
///
/// # Example
///
/// ```
/// use xylo_reflect::Reflect;
/// use xylo_reflect::info::Typed;
///
/// #[derive(Reflect, Default)]
/// struct Probe {
///     value: i32,
///     #[reflect(ignore)]
///     scratch: i32,
/// }
///
/// let info = Probe::type_info().as_struct().unwrap();
/// assert!(info.field("value").unwrap().type_is::<i32>());
/// assert!(info.field("scratch").unwrap().is_skipped());
/// ```
#[derive(Clone, Debug)]
pub struct NamedField {
    name: &'static str,
    ty: Option<FieldType>,
    base: bool,
}

impl NamedField {
    /// Creates a plain serialized field of type `T` named `name`.
    #[inline]
    pub const fn new<T: Typed>(name: &'static str) -> Self {
        Self {
            name,
            ty: Some(FieldType {
                ty_id: TypeId::of::<T>(),
                type_info: T::type_info,
            }),
            base: false,
        }
    }

    /// Creates a base field of type `T` named `name`.
    #[inline]
    pub const fn base<T: Typed>(name: &'static str) -> Self {
        Self {
            name,
            ty: Some(FieldType {
                ty_id: TypeId::of::<T>(),
                type_info: T::type_info,
            }),
            base: true,
        }
    }

    /// Creates a field that is excluded from serialization.
    #[inline]
    pub const fn skipped(name: &'static str) -> Self {
        Self {
            name,
            ty: None,
            base: false,
        }
    }

    /// Returns the field name.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns `true` for fields excluded from serialization.
    #[inline]
    pub const fn is_skipped(&self) -> bool {
        self.ty.is_none()
    }

    /// Returns `true` for the field holding the struct's base value.
    #[inline]
    pub const fn is_base(&self) -> bool {
        self.base
    }

    /// Returns the `TypeId`, unless the field is skipped.
    #[inline]
    pub fn ty_id(&self) -> Option<TypeId> {
        self.ty.map(|ty| ty.ty_id)
    }

    /// Check if the given type matches this field. Always `false` for
    /// skipped fields.
    #[inline]
    pub fn type_is<T: Any>(&self) -> bool {
        matches!(&self.ty, Some(ty) if ty.ty_id == TypeId::of::<T>())
    }

    /// Returns the field's [`TypeInfo`], unless the field is skipped.
    #[inline]
    pub fn type_info(&self) -> Option<&'static TypeInfo> {
        self.ty.map(|ty| (ty.type_info)())
    }
}
