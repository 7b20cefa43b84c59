use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use core::hash::Hash;
use std::collections::HashMap;

use crate::Reflect;
use crate::impls::{self, GenericTypeInfoCell, GenericTypePathCell};
use crate::info::{MapInfo, TypeInfo, TypePath, Typed};
use crate::ops::Map;
use crate::reflection::impl_reflect_cast_fn;
use crate::registry::{GetTypeMeta, TypeMeta, TypeRegistry};

/// The two map impls differ only in paths and key bounds.
macro_rules! impl_reflect_for_map {
    ($ty:ident, $path_prefix:literal, $module:literal, [$($key_bound:path),*]) => {
        impl<K: TypePath, V: TypePath> TypePath for $ty<K, V> {
            fn type_path() -> &'static str {
                static CELL: GenericTypePathCell = GenericTypePathCell::new();
                CELL.get_or_insert::<Self>(|| {
                    impls::concat(&[
                        $path_prefix,
                        "<",
                        K::type_path(),
                        ", ",
                        V::type_path(),
                        ">",
                    ])
                })
            }

            fn type_name() -> &'static str {
                static CELL: GenericTypePathCell = GenericTypePathCell::new();
                CELL.get_or_insert::<Self>(|| {
                    impls::concat(&[
                        stringify!($ty),
                        "<",
                        K::type_name(),
                        ", ",
                        V::type_name(),
                        ">",
                    ])
                })
            }

            fn type_ident() -> &'static str {
                stringify!($ty)
            }

            fn module_path() -> Option<&'static str> {
                Some($module)
            }
        }

        impl<K, V> Typed for $ty<K, V>
        where
            K: Reflect + Typed $(+ $key_bound)*,
            V: Reflect + Typed,
        {
            fn type_info() -> &'static TypeInfo {
                static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
                CELL.get_or_insert::<Self>(|| TypeInfo::Map(MapInfo::new::<Self, K, V>()))
            }
        }

        impl<K, V> Reflect for $ty<K, V>
        where
            K: Reflect + Typed $(+ $key_bound)*,
            V: Reflect + Typed,
        {
            impl_reflect_cast_fn!(Map);
        }

        impl<K, V> Map for $ty<K, V>
        where
            K: Reflect + Typed $(+ $key_bound)*,
            V: Reflect + Typed,
        {
            #[inline]
            fn len(&self) -> usize {
                Self::len(self)
            }

            #[inline]
            fn iter(&self) -> Box<dyn Iterator<Item = (&dyn Reflect, &dyn Reflect)> + '_> {
                Box::new(Self::iter(self).map(|(k, v)| (k as &dyn Reflect, v as &dyn Reflect)))
            }

            #[inline]
            fn clear(&mut self) {
                Self::clear(self);
            }

            fn try_insert(
                &mut self,
                key: Box<dyn Reflect>,
                value: Box<dyn Reflect>,
            ) -> Result<Option<Box<dyn Reflect>>, (Box<dyn Reflect>, Box<dyn Reflect>)> {
                let key = match key.take::<K>() {
                    Ok(key) => key,
                    Err(key) => return Err((key, value)),
                };
                let value = match value.take::<V>() {
                    Ok(value) => value,
                    Err(value) => return Err((Box::new(key), value)),
                };
                Ok(Self::insert(self, key, value).map(Reflect::into_boxed_reflect))
            }
        }

        impl<K, V> GetTypeMeta for $ty<K, V>
        where
            K: Reflect + Typed + GetTypeMeta $(+ $key_bound)*,
            V: Reflect + Typed + GetTypeMeta,
        {
            fn get_type_meta() -> TypeMeta {
                TypeMeta::with_factory::<Self>()
            }

            fn register_dependencies(registry: &mut TypeRegistry) {
                registry.register::<K>();
                registry.register::<V>();
            }
        }
    };
}

impl_reflect_for_map!(
    HashMap,
    "std::collections::HashMap",
    "std::collections",
    [Eq, Hash]
);
impl_reflect_for_map!(
    BTreeMap,
    "alloc::collections::BTreeMap",
    "alloc::collections",
    [Ord]
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_spell_out_key_and_value() {
        assert_eq!(
            <HashMap<String, f64>>::type_path(),
            "std::collections::HashMap<alloc::string::String, f64>"
        );
        assert_eq!(
            <BTreeMap<i32, String>>::type_name(),
            "BTreeMap<i32, String>"
        );
    }

    #[test]
    fn try_insert_returns_the_replaced_value() {
        let mut map: BTreeMap<String, i32> = BTreeMap::new();
        let view: &mut dyn Map = &mut map;

        let previous = view
            .try_insert(Box::new(String::from("k")), Box::new(1_i32))
            .unwrap();
        assert!(previous.is_none());

        let previous = view
            .try_insert(Box::new(String::from("k")), Box::new(2_i32))
            .unwrap();
        assert_eq!(previous.unwrap().take::<i32>().ok(), Some(1));
        assert_eq!(map.get("k"), Some(&2));
    }

    #[test]
    fn try_insert_hands_back_mismatched_pairs() {
        let mut map: HashMap<String, i32> = HashMap::new();
        let view: &mut dyn Map = &mut map;

        let (key, value) = view
            .try_insert(Box::new(0_u8), Box::new(1_i32))
            .unwrap_err();
        assert!(key.is::<u8>());
        assert!(value.is::<i32>());
        assert!(map.is_empty());
    }

    #[test]
    fn iter_sees_every_pair() {
        let mut map: BTreeMap<i32, String> = BTreeMap::new();
        map.insert(1, String::from("one"));
        map.insert(2, String::from("two"));

        let view: &dyn Map = &map;
        let keys: Vec<i32> = view
            .iter()
            .map(|(k, _)| *k.downcast_ref::<i32>().unwrap())
            .collect();
        assert_eq!(keys, [1, 2]);
    }
}
