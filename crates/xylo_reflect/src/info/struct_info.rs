use alloc::boxed::Box;

use crate::info::{NamedField, Type, TypePath, impl_type_fn};
use crate::ops::Struct;

/// Compile-time info for a named-field struct.
///
/// Fields keep their declaration order. At most one field may be marked as
/// the [base field](NamedField::base); it carries the struct's parent value
/// and is flattened into the struct when encoding.
///
/// # Example
///
/// ```
/// use xylo_reflect::Reflect;
/// use xylo_reflect::info::Typed;
///
/// #[derive(Reflect, Default)]
/// struct Station {
///     name: String,
///     channel: u16,
/// }
///
/// let info = Station::type_info().as_struct().unwrap();
/// assert_eq!(info.field_len(), 2);
/// assert_eq!(info.field_at(1).map(|field| field.name()), Some("channel"));
/// ```
#[derive(Clone, Debug)]
pub struct StructInfo {
    ty: Type,
    fields: Box<[NamedField]>,
    base_index: Option<usize>,
}

impl StructInfo {
    impl_type_fn!(ty);

    /// Create a new [`StructInfo`]. Field order follows the input order.
    pub fn new<T: Struct + TypePath>(fields: &[NamedField]) -> Self {
        let fields: Box<[NamedField]> = fields.to_vec().into_boxed_slice();
        let base_index = fields.iter().position(NamedField::is_base);

        Self {
            ty: Type::of::<T>(),
            fields,
            base_index,
        }
    }

    /// Returns the [`NamedField`] with the given `name`, if present.
    pub fn field(&self, name: &str) -> Option<&NamedField> {
        self.fields.iter().find(|field| field.name() == name)
    }

    /// Returns the [`NamedField`] at the given declaration index.
    #[inline]
    pub fn field_at(&self, index: usize) -> Option<&NamedField> {
        self.fields.get(index)
    }

    /// Returns an iterator over the fields in declaration order.
    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &NamedField> {
        self.fields.iter()
    }

    /// Returns the index of the field with the given `name`, if present.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|field| field.name() == name)
    }

    /// Returns the number of declared fields, skipped ones included.
    #[inline]
    pub fn field_len(&self) -> usize {
        self.fields.len()
    }

    /// Returns the base field, if the struct declared one.
    #[inline]
    pub fn base(&self) -> Option<&NamedField> {
        self.base_index.and_then(|index| self.fields.get(index))
    }
}
