use crate::info::{Type, TypePath, impl_type_fn};
use crate::scalar::ScalarKind;

// -----------------------------------------------------------------------------
// LeafInfo

/// Compile-time info for leaf kinds that carry no inner structure worth
/// describing: text, type tokens and dynamic values.
#[derive(Clone, Debug)]
pub struct LeafInfo {
    ty: Type,
}

impl LeafInfo {
    impl_type_fn!(ty);

    /// Create a new [`LeafInfo`] for the given type.
    pub const fn new<T: TypePath + ?Sized>() -> Self {
        Self { ty: Type::of::<T>() }
    }
}

// -----------------------------------------------------------------------------
// ScalarInfo

/// Compile-time info for the primitive scalar types.
///
/// # Example
///
/// ```
/// use xylo_reflect::info::Typed;
/// use xylo_reflect::scalar::ScalarKind;
///
/// let info = i32::type_info().as_scalar().unwrap();
/// assert_eq!(info.scalar_kind(), ScalarKind::I32);
/// ```
#[derive(Clone, Debug)]
pub struct ScalarInfo {
    ty: Type,
    kind: ScalarKind,
}

impl ScalarInfo {
    impl_type_fn!(ty);

    /// Create a new [`ScalarInfo`] for the given type and scalar kind.
    pub const fn new<T: TypePath>(kind: ScalarKind) -> Self {
        Self {
            ty: Type::of::<T>(),
            kind,
        }
    }

    /// Returns which scalar this is.
    #[inline]
    pub const fn scalar_kind(&self) -> ScalarKind {
        self.kind
    }
}
