use alloc::borrow::Cow;
use core::any::TypeId;
use core::fmt;

use crate::Reflect;
use crate::impls::NonGenericTypeInfoCell;
use crate::info::{LeafInfo, Type, TypeInfo, TypePath, Typed};
use crate::reflection::impl_reflect_cast_fn;
use crate::registry::{GetTypeMeta, TypeMeta};
use crate::scalar::ScalarKind;

/// A value standing for a type itself.
///
/// Tokens let a type travel through a document as data: they encode as
/// their [type path](TypePath::type_path) in element text and resolve
/// back through the registry on decode.
///
/// # Example
///
/// ```
/// use xylo_reflect::TypeToken;
///
/// let token = TypeToken::of::<String>();
/// assert_eq!(token.path(), "alloc::string::String");
/// assert!(token.is::<String>());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TypeToken {
    id: TypeId,
    path: Cow<'static, str>,
}

impl TypeToken {
    /// Creates the token of a statically known type.
    #[inline]
    pub fn of<T: TypePath + ?Sized>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            path: Cow::Borrowed(T::type_path()),
        }
    }

    /// Creates the token of a registered [`Type`].
    #[inline]
    pub fn from_type(ty: &Type) -> Self {
        Self {
            id: ty.id(),
            path: Cow::Borrowed(ty.path()),
        }
    }

    /// Creates the token of a primitive scalar kind.
    #[inline]
    pub fn from_scalar(kind: ScalarKind) -> Self {
        Self {
            id: kind.type_id(),
            path: Cow::Borrowed(kind.type_path()),
        }
    }

    /// Returns the [`TypeId`] of the represented type.
    #[inline]
    pub const fn id(&self) -> TypeId {
        self.id
    }

    /// Returns the type path of the represented type.
    #[inline]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns `true` when the token stands for `T`.
    #[inline]
    pub fn is<T: 'static>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

impl fmt::Display for TypeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.path)
    }
}

impl TypePath for TypeToken {
    #[inline]
    fn type_path() -> &'static str {
        "xylo_reflect::TypeToken"
    }

    #[inline]
    fn type_name() -> &'static str {
        "TypeToken"
    }

    #[inline]
    fn type_ident() -> &'static str {
        "TypeToken"
    }

    #[inline]
    fn module_path() -> Option<&'static str> {
        Some("xylo_reflect")
    }
}

impl Typed for TypeToken {
    fn type_info() -> &'static TypeInfo {
        static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
        CELL.get_or_init(|| TypeInfo::Token(LeafInfo::new::<TypeToken>()))
    }
}

impl Reflect for TypeToken {
    impl_reflect_cast_fn!(Token);
}

/// Tokens resolve by path at decode time, so no factory is registered.
impl GetTypeMeta for TypeToken {
    fn get_type_meta() -> TypeMeta {
        TypeMeta::of::<Self>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_of_the_same_type_are_equal() {
        assert_eq!(TypeToken::of::<u8>(), TypeToken::of::<u8>());
        assert_ne!(TypeToken::of::<u8>(), TypeToken::of::<i8>());
    }

    #[test]
    fn from_type_matches_of() {
        let ty = Type::of::<String>();
        assert_eq!(TypeToken::from_type(&ty), TypeToken::of::<String>());
    }

    #[test]
    fn from_scalar_matches_of() {
        assert_eq!(TypeToken::from_scalar(ScalarKind::I32), TypeToken::of::<i32>());
        assert_eq!(TypeToken::from_scalar(ScalarKind::Bool).path(), "bool");
    }
}
