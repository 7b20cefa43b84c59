use alloc::boxed::Box;
use core::mem;

use crate::Reflect;
use crate::impls::NonGenericTypeInfoCell;
use crate::info::{LeafInfo, TypeInfo, TypePath, Typed};
use crate::reflection::impl_reflect_cast_fn;
use crate::registry::{GetTypeMeta, TypeMeta};

/// A slot whose concrete type is chosen at runtime.
///
/// Statically typed slots encode without naming their type; a
/// `DynamicValue` instead writes the type path of whatever it currently
/// holds, and decoding resolves that path through the registry. This is
/// how heterogeneous collections travel through documents.
///
/// # Example
///
/// ```
/// use std::collections::BTreeMap;
/// use xylo_reflect::DynamicValue;
///
/// let mut bag: BTreeMap<String, DynamicValue> = BTreeMap::new();
/// bag.insert("answer".into(), DynamicValue::new(42_i32));
/// bag.insert("greeting".into(), DynamicValue::new(String::from("hi")));
///
/// assert_eq!(bag["answer"].get().downcast_ref::<i32>(), Some(&42));
/// ```
#[derive(Debug)]
pub struct DynamicValue(Box<dyn Reflect>);

impl DynamicValue {
    /// Wraps a concrete value.
    #[inline]
    pub fn new<T: Reflect>(value: T) -> Self {
        Self(Box::new(value))
    }

    /// Wraps an already boxed value.
    #[inline]
    pub fn from_boxed(value: Box<dyn Reflect>) -> Self {
        Self(value)
    }

    /// Returns the held value.
    #[inline]
    pub fn get(&self) -> &dyn Reflect {
        &*self.0
    }

    /// Returns the held value mutably.
    #[inline]
    pub fn get_mut(&mut self) -> &mut dyn Reflect {
        &mut *self.0
    }

    /// Swaps in a new value, returning the previous one.
    #[inline]
    pub fn replace(&mut self, value: Box<dyn Reflect>) -> Box<dyn Reflect> {
        mem::replace(&mut self.0, value)
    }

    /// Unwraps into the held value.
    #[inline]
    pub fn into_inner(self) -> Box<dyn Reflect> {
        self.0
    }

    /// Downcasts the held value to `T` by reference.
    #[inline]
    pub fn downcast_ref<T: Reflect>(&self) -> Option<&T> {
        self.get().downcast_ref::<T>()
    }
}

impl TypePath for DynamicValue {
    #[inline]
    fn type_path() -> &'static str {
        "xylo_reflect::DynamicValue"
    }

    #[inline]
    fn type_name() -> &'static str {
        "DynamicValue"
    }

    #[inline]
    fn type_ident() -> &'static str {
        "DynamicValue"
    }

    #[inline]
    fn module_path() -> Option<&'static str> {
        Some("xylo_reflect")
    }
}

impl Typed for DynamicValue {
    fn type_info() -> &'static TypeInfo {
        static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
        CELL.get_or_init(|| TypeInfo::Dynamic(LeafInfo::new::<DynamicValue>()))
    }
}

impl Reflect for DynamicValue {
    impl_reflect_cast_fn!(Dynamic);
}

/// A blank `DynamicValue` would have nothing to hold, so no factory is
/// registered; decoding always builds the inner value first.
impl GetTypeMeta for DynamicValue {
    fn get_type_meta() -> TypeMeta {
        TypeMeta::of::<Self>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replace_hands_back_the_old_value() {
        let mut value = DynamicValue::new(1_u8);
        let old = value.replace(Box::new(String::from("next")));
        assert!(old.is::<u8>());
        assert_eq!(value.downcast_ref::<String>().map(String::as_str), Some("next"));
    }

    #[test]
    fn view_reports_the_wrapper_not_the_inner() {
        use crate::info::{DynamicTypePath, ReflectKind};

        let value = DynamicValue::new(5_i64);
        assert_eq!(value.reflect_kind(), ReflectKind::Dynamic);
        assert_eq!(value.reflect_type_path(), "xylo_reflect::DynamicValue");
        assert_eq!(value.get().reflect_type_path(), "i64");
    }
}
