use core::any::{Any, TypeId};

use crate::Reflect;
use crate::info::{Type, TypeInfo, TypePath, Typed, impl_type_fn};
use crate::ops::Handle;

/// Compile-time info for shared handles ([`Shared<T>`](crate::Shared)).
///
/// Handles are the unit of identity in encoded documents: the first
/// occurrence is written in full with a `refId`, later occurrences become
/// back references.
#[derive(Clone, Debug)]
pub struct HandleInfo {
    ty: Type,
    inner_id: TypeId,
    // `TypeInfo` is created on first access; a function pointer delays it.
    inner_info: fn() -> &'static TypeInfo,
}

impl HandleInfo {
    impl_type_fn!(ty);

    /// Create a new [`HandleInfo`] for a handle `THandle` wrapping `TInner`.
    pub const fn new<THandle, TInner>() -> Self
    where
        THandle: Handle + TypePath,
        TInner: Reflect + Typed,
    {
        Self {
            ty: Type::of::<THandle>(),
            inner_id: TypeId::of::<TInner>(),
            inner_info: TInner::type_info,
        }
    }

    /// Returns the `TypeId` of the wrapped type.
    #[inline]
    pub const fn inner_id(&self) -> TypeId {
        self.inner_id
    }

    /// Check if the given type matches the wrapped type.
    #[inline]
    pub fn inner_is<T: Any>(&self) -> bool {
        self.inner_id == TypeId::of::<T>()
    }

    /// Returns the [`TypeInfo`] of the wrapped type.
    #[inline]
    pub fn inner_info(&self) -> &'static TypeInfo {
        (self.inner_info)()
    }
}
