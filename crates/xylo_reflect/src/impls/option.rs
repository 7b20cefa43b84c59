use alloc::boxed::Box;

use crate::Reflect;
use crate::impls::{self, GenericTypeInfoCell, GenericTypePathCell};
use crate::info::{OptInfo, TypeInfo, TypePath, Typed};
use crate::ops::Opt;
use crate::reflection::impl_reflect_cast_fn;
use crate::registry::{Factory, GetTypeMeta, TypeMeta, TypeRegistry};

impl<T: TypePath> TypePath for Option<T> {
    fn type_path() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| {
            impls::concat(&["core::option::Option<", T::type_path(), ">"])
        })
    }

    fn type_name() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| impls::concat(&["Option<", T::type_name(), ">"]))
    }

    fn type_ident() -> &'static str {
        "Option"
    }

    fn module_path() -> Option<&'static str> {
        Some("core::option")
    }
}

impl<T: Reflect + Typed> Typed for Option<T> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| TypeInfo::Opt(OptInfo::new::<Self, T>()))
    }
}

impl<T: Reflect + Typed> Reflect for Option<T> {
    impl_reflect_cast_fn!(Opt);
}

impl<T: Reflect + Typed> Opt for Option<T> {
    #[inline]
    fn is_some(&self) -> bool {
        Self::is_some(self)
    }

    #[inline]
    fn get(&self) -> Option<&dyn Reflect> {
        self.as_ref().map(Reflect::as_reflect)
    }

    #[inline]
    fn get_mut(&mut self) -> Option<&mut dyn Reflect> {
        self.as_mut().map(Reflect::as_reflect_mut)
    }

    #[inline]
    fn set_none(&mut self) {
        *self = None;
    }

    fn set_some(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>> {
        *self = Some(value.take::<T>()?);
        Ok(())
    }
}

/// The blank optional is `None`, so no `Default` bound is put on the
/// inner type.
impl<T: Reflect + Typed + GetTypeMeta> GetTypeMeta for Option<T> {
    fn get_type_meta() -> TypeMeta {
        let mut meta = TypeMeta::of::<Self>();
        meta.set_factory(Factory::new(|| Box::new(None::<T>)));
        meta
    }

    fn register_dependencies(registry: &mut TypeRegistry) {
        registry.register::<T>();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_spell_out_the_inner_type() {
        assert_eq!(
            <Option<String>>::type_path(),
            "core::option::Option<alloc::string::String>"
        );
        assert_eq!(<Option<String>>::type_name(), "Option<String>");
        assert_eq!(<Option<String>>::type_ident(), "Option");
    }

    #[test]
    fn set_some_checks_the_inner_type() {
        let mut slot: Option<u32> = None;
        let view: &mut dyn Opt = &mut slot;

        view.set_some(9_u32.into_boxed_reflect()).unwrap();
        assert_eq!(slot, Some(9));

        let view: &mut dyn Opt = &mut slot;
        let rejected = view.set_some(String::from("no").into_boxed_reflect());
        assert!(rejected.unwrap_err().is::<String>());
        assert_eq!(slot, Some(9));
    }

    #[test]
    fn set_none_clears() {
        let mut slot = Some(3_i8);
        let view: &mut dyn Opt = &mut slot;
        assert!(view.is_some());
        view.set_none();
        assert_eq!(slot, None);
    }
}
