use core::any::{Any, TypeId};

use crate::Reflect;
use crate::info::{Type, TypeInfo, TypePath, Typed, impl_type_fn};
use crate::ops::Opt;

/// Compile-time info for optional types (`Option<T>`).
///
/// Optionals are transparent when encoding: a present value encodes as the
/// inner value, an absent one encodes as nothing at all.
#[derive(Clone, Debug)]
pub struct OptInfo {
    ty: Type,
    inner_id: TypeId,
    // `TypeInfo` is created on first access; a function pointer delays it.
    inner_info: fn() -> &'static TypeInfo,
}

impl OptInfo {
    impl_type_fn!(ty);

    /// Create a new [`OptInfo`] for an optional `TOpt` holding `TInner`.
    pub const fn new<TOpt, TInner>() -> Self
    where
        TOpt: Opt + TypePath,
        TInner: Reflect + Typed,
    {
        Self {
            ty: Type::of::<TOpt>(),
            inner_id: TypeId::of::<TInner>(),
            inner_info: TInner::type_info,
        }
    }

    /// Returns the `TypeId` of the inner type.
    #[inline]
    pub const fn inner_id(&self) -> TypeId {
        self.inner_id
    }

    /// Check if the given type matches the inner type.
    #[inline]
    pub fn inner_is<T: Any>(&self) -> bool {
        self.inner_id == TypeId::of::<T>()
    }

    /// Returns the [`TypeInfo`] of the inner type.
    #[inline]
    pub fn inner_info(&self) -> &'static TypeInfo {
        (self.inner_info)()
    }
}
