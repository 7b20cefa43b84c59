use alloc::boxed::Box;
use alloc::string::String;

use crate::Reflect;
use crate::impls::NonGenericTypeInfoCell;
use crate::info::{LeafInfo, TypeInfo, TypePath, Typed};
use crate::ops::{ReflectMut, ReflectRef};
use crate::registry::{GetTypeMeta, TypeMeta};

impl TypePath for String {
    #[inline]
    fn type_path() -> &'static str {
        "alloc::string::String"
    }

    #[inline]
    fn type_name() -> &'static str {
        "String"
    }

    #[inline]
    fn type_ident() -> &'static str {
        "String"
    }

    #[inline]
    fn module_path() -> Option<&'static str> {
        Some("alloc::string")
    }
}

impl Typed for String {
    fn type_info() -> &'static TypeInfo {
        static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
        CELL.get_or_init(|| TypeInfo::Text(LeafInfo::new::<String>()))
    }
}

impl Reflect for String {
    fn set(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>> {
        *self = value.take::<Self>()?;
        Ok(())
    }

    #[inline]
    fn reflect_kind(&self) -> crate::info::ReflectKind {
        crate::info::ReflectKind::Text
    }

    #[inline]
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Text(self)
    }

    #[inline]
    fn reflect_mut(&mut self) -> ReflectMut<'_> {
        ReflectMut::Text(self)
    }
}

impl GetTypeMeta for String {
    fn get_type_meta() -> TypeMeta {
        TypeMeta::with_factory::<Self>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::ReflectRef;

    #[test]
    fn text_view_borrows_the_string() {
        let text = String::from("hello");
        let ReflectRef::Text(view) = text.reflect_ref() else {
            panic!("expected a text view");
        };
        assert_eq!(view, "hello");
    }

    #[test]
    fn path_is_fully_qualified() {
        assert_eq!(String::type_path(), "alloc::string::String");
        assert_eq!(String::type_name(), "String");
    }
}
