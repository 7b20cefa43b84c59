use alloc::boxed::Box;
use alloc::string::ToString;
use alloc::vec::Vec;
use core::array;

use crate::Reflect;
use crate::impls::{self, GenericTypeInfoCell, GenericTypePathCell};
use crate::info::{SeqInfo, TypeInfo, TypePath, Typed};
use crate::ops::{Seq, SeqPrepareError, SeqPushError};
use crate::reflection::impl_reflect_cast_fn;
use crate::registry::{Factory, GetTypeMeta, TypeMeta, TypeRegistry};

// -----------------------------------------------------------------------------
// Vec<T>

impl<T: TypePath> TypePath for Vec<T> {
    fn type_path() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| impls::concat(&["alloc::vec::Vec<", T::type_path(), ">"]))
    }

    fn type_name() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| impls::concat(&["Vec<", T::type_name(), ">"]))
    }

    fn type_ident() -> &'static str {
        "Vec"
    }

    fn module_path() -> Option<&'static str> {
        Some("alloc::vec")
    }
}

impl<T: Reflect + Typed> Typed for Vec<T> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| TypeInfo::Seq(SeqInfo::new::<Self, T>(None)))
    }
}

impl<T: Reflect + Typed> Reflect for Vec<T> {
    impl_reflect_cast_fn!(Seq);
}

impl<T: Reflect + Typed> Seq for Vec<T> {
    #[inline]
    fn len(&self) -> usize {
        self.as_slice().len()
    }

    #[inline]
    fn item(&self, index: usize) -> Option<&dyn Reflect> {
        self.as_slice().get(index).map(Reflect::as_reflect)
    }

    #[inline]
    fn item_mut(&mut self, index: usize) -> Option<&mut dyn Reflect> {
        self.as_mut_slice()
            .get_mut(index)
            .map(Reflect::as_reflect_mut)
    }

    fn prepare(
        &mut self,
        len: usize,
        make_blank: &mut dyn FnMut() -> Box<dyn Reflect>,
    ) -> Result<(), SeqPrepareError> {
        self.clear();
        self.reserve(len);
        for _ in 0..len {
            let blank = make_blank()
                .take::<T>()
                .map_err(|_| SeqPrepareError::ItemType)?;
            Vec::push(self, blank);
        }
        Ok(())
    }

    fn push(&mut self, item: Box<dyn Reflect>) -> Result<(), SeqPushError> {
        let item = item.take::<T>().map_err(|_| SeqPushError::ItemType)?;
        Vec::push(self, item);
        Ok(())
    }
}

impl<T: Reflect + Typed + GetTypeMeta> GetTypeMeta for Vec<T> {
    fn get_type_meta() -> TypeMeta {
        TypeMeta::with_factory::<Self>()
    }

    fn register_dependencies(registry: &mut TypeRegistry) {
        registry.register::<T>();
    }
}

// -----------------------------------------------------------------------------
// [T; N]

impl<T: TypePath, const N: usize> TypePath for [T; N] {
    fn type_path() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| {
            let len = N.to_string();
            impls::concat(&["[", T::type_path(), "; ", &len, "]"])
        })
    }

    fn type_name() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| {
            let len = N.to_string();
            impls::concat(&["[", T::type_name(), "; ", &len, "]"])
        })
    }

    fn type_ident() -> &'static str {
        "array"
    }
}

impl<T: Reflect + Typed, const N: usize> Typed for [T; N] {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| TypeInfo::Seq(SeqInfo::new::<Self, T>(Some(N))))
    }
}

impl<T: Reflect + Typed, const N: usize> Reflect for [T; N] {
    impl_reflect_cast_fn!(Seq);
}

impl<T: Reflect + Typed, const N: usize> Seq for [T; N] {
    #[inline]
    fn len(&self) -> usize {
        N
    }

    #[inline]
    fn item(&self, index: usize) -> Option<&dyn Reflect> {
        self.as_slice().get(index).map(Reflect::as_reflect)
    }

    #[inline]
    fn item_mut(&mut self, index: usize) -> Option<&mut dyn Reflect> {
        self.as_mut_slice()
            .get_mut(index)
            .map(Reflect::as_reflect_mut)
    }

    fn prepare(
        &mut self,
        len: usize,
        make_blank: &mut dyn FnMut() -> Box<dyn Reflect>,
    ) -> Result<(), SeqPrepareError> {
        if len > N {
            return Err(SeqPrepareError::Capacity {
                capacity: N,
                requested: len,
            });
        }
        for slot in self.iter_mut() {
            *slot = make_blank()
                .take::<T>()
                .map_err(|_| SeqPrepareError::ItemType)?;
        }
        Ok(())
    }

    fn push(&mut self, _item: Box<dyn Reflect>) -> Result<(), SeqPushError> {
        Err(SeqPushError::Fixed)
    }
}

impl<T: Reflect + Typed + GetTypeMeta + Default, const N: usize> GetTypeMeta for [T; N] {
    fn get_type_meta() -> TypeMeta {
        let mut meta = TypeMeta::of::<Self>();
        meta.set_factory(Factory::new(|| {
            Box::new(array::from_fn::<T, N, _>(|_| T::default()))
        }));
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
    fn vec_paths_spell_out_the_item() {
        assert_eq!(<Vec<u8>>::type_path(), "alloc::vec::Vec<u8>");
        assert_eq!(
            <Vec<Vec<String>>>::type_path(),
            "alloc::vec::Vec<alloc::vec::Vec<alloc::string::String>>"
        );
    }

    #[test]
    fn array_paths_carry_the_length() {
        assert_eq!(<[i32; 4]>::type_path(), "[i32; 4]");
        assert_eq!(<[i32; 7]>::type_path(), "[i32; 7]");
    }

    #[test]
    fn vec_prepare_then_fill() {
        let mut seq = alloc::vec![1_u8, 2];
        let view: &mut dyn Seq = &mut seq;
        view.prepare(3, &mut || Box::new(0_u8)).unwrap();
        for index in 0..3 {
            view.item_mut(index)
                .unwrap()
                .set(Box::new(index as u8 + 10))
                .unwrap();
        }
        assert_eq!(seq, [10, 11, 12]);
    }

    #[test]
    fn vec_push_checks_the_item_type() {
        let mut seq: Vec<u8> = Vec::new();
        let view: &mut dyn Seq = &mut seq;
        view.push(Box::new(1_u8)).unwrap();
        assert!(matches!(
            view.push(Box::new(String::new())),
            Err(SeqPushError::ItemType)
        ));
        assert_eq!(seq, [1]);
    }

    #[test]
    fn array_prepare_respects_capacity() {
        let mut seq = [0_i32; 2];
        let view: &mut dyn Seq = &mut seq;
        assert!(matches!(
            view.prepare(3, &mut || Box::new(0_i32)),
            Err(SeqPrepareError::Capacity {
                capacity: 2,
                requested: 3
            })
        ));
        view.prepare(2, &mut || Box::new(5_i32)).unwrap();
        assert_eq!(seq, [5, 5]);
    }

    #[test]
    fn array_refuses_push() {
        let mut seq = [0_u8; 1];
        let view: &mut dyn Seq = &mut seq;
        assert!(matches!(
            view.push(Box::new(1_u8)),
            Err(SeqPushError::Fixed)
        ));
    }
}
