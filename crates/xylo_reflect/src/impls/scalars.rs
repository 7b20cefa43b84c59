use alloc::boxed::Box;

use crate::Reflect;
use crate::impls::NonGenericTypeInfoCell;
use crate::info::{ScalarInfo, TypeInfo, TypePath, Typed};
use crate::ops::{ReflectMut, ReflectRef};
use crate::registry::{GetTypeMeta, TypeMeta};
use crate::scalar::{ScalarKind, ScalarValue};

/// Scalar views copy the value out, so the cast functions are written by
/// hand instead of going through `impl_reflect_cast_fn!`.
macro_rules! impl_scalar {
    ($(($kind:ident, $ty:ty, $path:literal)),* $(,)?) => {
        $(
            impl TypePath for $ty {
                #[inline]
                fn type_path() -> &'static str {
                    $path
                }

                #[inline]
                fn type_name() -> &'static str {
                    $path
                }

                #[inline]
                fn type_ident() -> &'static str {
                    $path
                }
            }

            impl Typed for $ty {
                fn type_info() -> &'static TypeInfo {
                    static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
                    CELL.get_or_init(|| {
                        TypeInfo::Scalar(ScalarInfo::new::<$ty>(ScalarKind::$kind))
                    })
                }
            }

            impl Reflect for $ty {
                fn set(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>> {
                    *self = value.take::<Self>()?;
                    Ok(())
                }

                #[inline]
                fn reflect_kind(&self) -> crate::info::ReflectKind {
                    crate::info::ReflectKind::Scalar
                }

                #[inline]
                fn reflect_ref(&self) -> ReflectRef<'_> {
                    ReflectRef::Scalar(ScalarValue::$kind(*self))
                }

                #[inline]
                fn reflect_mut(&mut self) -> ReflectMut<'_> {
                    ReflectMut::Scalar(self)
                }
            }

            impl GetTypeMeta for $ty {
                fn get_type_meta() -> TypeMeta {
                    TypeMeta::with_factory::<Self>()
                }
            }
        )*
    };
}

impl_scalar! {
    (Bool, bool, "bool"),
    (Char, char, "char"),
    (U8, u8, "u8"),
    (U16, u16, "u16"),
    (U32, u32, "u32"),
    (U64, u64, "u64"),
    (U128, u128, "u128"),
    (Usize, usize, "usize"),
    (I8, i8, "i8"),
    (I16, i16, "i16"),
    (I32, i32, "i32"),
    (I64, i64, "i64"),
    (I128, i128, "i128"),
    (Isize, isize, "isize"),
    (F32, f32, "f32"),
    (F64, f64, "f64"),
}

#[cfg(test)]
mod tests {
    use crate::Reflect;
    use crate::info::Typed;
    use crate::ops::ReflectRef;
    use crate::scalar::ScalarValue;

    #[test]
    fn scalar_view_copies_the_value() {
        let value = 42_u16;
        let ReflectRef::Scalar(scalar) = value.reflect_ref() else {
            panic!("expected a scalar view");
        };
        assert_eq!(scalar, ScalarValue::U16(42));
    }

    #[test]
    fn set_replaces_in_place() {
        let mut value = 1.5_f64;
        value.set(2.5_f64.into_boxed_reflect()).unwrap();
        assert_eq!(value, 2.5);

        let rejected = value.set(true.into_boxed_reflect()).unwrap_err();
        assert!(rejected.is::<bool>());
        assert_eq!(value, 2.5);
    }

    #[test]
    fn paths_are_bare_names() {
        assert_eq!(<bool as Typed>::type_info().ty().path(), "bool");
        assert_eq!(<i128 as Typed>::type_info().ty().path(), "i128");
    }
}
