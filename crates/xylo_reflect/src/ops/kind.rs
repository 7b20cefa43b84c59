use alloc::string::String;

use crate::info::{ReflectKind, ReflectKindError};
use crate::ops::{Handle, Map, Opt, Seq, Struct};
use crate::scalar::ScalarValue;
use crate::{DynamicValue, Reflect, TypeToken};

// -----------------------------------------------------------------------------
// ReflectRef

/// An immutable, kind-tagged view of a reflected value.
///
/// Obtained via [`Reflect::reflect_ref`]. Scalars are copied out as a
/// [`ScalarValue`], text is viewed as `&str`, the structured kinds are
/// viewed through their interface traits.
///
/// [`Reflect::reflect_ref`]: crate::Reflect::reflect_ref
#[derive(Clone, Copy)]
pub enum ReflectRef<'a> {
    Scalar(ScalarValue),
    Text(&'a str),
    Token(&'a TypeToken),
    Opt(&'a dyn Opt),
    Handle(&'a dyn Handle),
    Dynamic(&'a DynamicValue),
    Seq(&'a dyn Seq),
    Map(&'a dyn Map),
    Struct(&'a dyn Struct),
}

macro_rules! impl_ref_cast {
    ($name:ident : $kind:ident => $ty:ty) => {
        /// Casts the view to this kind, reporting the actual kind on
        /// mismatch.
        pub fn $name(self) -> Result<$ty, ReflectKindError> {
            match self {
                Self::$kind(value) => Ok(value),
                other => Err(ReflectKindError {
                    expected: ReflectKind::$kind,
                    received: other.kind(),
                }),
            }
        }
    };
}

impl<'a> ReflectRef<'a> {
    /// Returns the [`ReflectKind`] of the viewed value.
    pub const fn kind(&self) -> ReflectKind {
        match self {
            Self::Scalar(_) => ReflectKind::Scalar,
            Self::Text(_) => ReflectKind::Text,
            Self::Token(_) => ReflectKind::Token,
            Self::Opt(_) => ReflectKind::Opt,
            Self::Handle(_) => ReflectKind::Handle,
            Self::Dynamic(_) => ReflectKind::Dynamic,
            Self::Seq(_) => ReflectKind::Seq,
            Self::Map(_) => ReflectKind::Map,
            Self::Struct(_) => ReflectKind::Struct,
        }
    }

    impl_ref_cast!(as_scalar: Scalar => ScalarValue);
    impl_ref_cast!(as_text: Text => &'a str);
    impl_ref_cast!(as_token: Token => &'a TypeToken);
    impl_ref_cast!(as_opt: Opt => &'a dyn Opt);
    impl_ref_cast!(as_handle: Handle => &'a dyn Handle);
    impl_ref_cast!(as_dynamic: Dynamic => &'a DynamicValue);
    impl_ref_cast!(as_seq: Seq => &'a dyn Seq);
    impl_ref_cast!(as_map: Map => &'a dyn Map);
    impl_ref_cast!(as_struct: Struct => &'a dyn Struct);
}

// -----------------------------------------------------------------------------
// ReflectMut

/// A mutable, kind-tagged view of a reflected value.
///
/// Obtained via [`Reflect::reflect_mut`]. Scalars stay behind
/// `&mut dyn Reflect` and are assigned through [`Reflect::set`].
///
/// [`Reflect::reflect_mut`]: crate::Reflect::reflect_mut
/// [`Reflect::set`]: crate::Reflect::set
pub enum ReflectMut<'a> {
    Scalar(&'a mut dyn Reflect),
    Text(&'a mut String),
    Token(&'a mut TypeToken),
    Opt(&'a mut dyn Opt),
    Handle(&'a mut dyn Handle),
    Dynamic(&'a mut DynamicValue),
    Seq(&'a mut dyn Seq),
    Map(&'a mut dyn Map),
    Struct(&'a mut dyn Struct),
}

macro_rules! impl_mut_cast {
    ($name:ident : $kind:ident => $ty:ty) => {
        /// Casts the view to this kind, reporting the actual kind on
        /// mismatch.
        pub fn $name(self) -> Result<$ty, ReflectKindError> {
            match self {
                Self::$kind(value) => Ok(value),
                other => Err(ReflectKindError {
                    expected: ReflectKind::$kind,
                    received: other.kind(),
                }),
            }
        }
    };
}

impl<'a> ReflectMut<'a> {
    /// Returns the [`ReflectKind`] of the viewed value.
    pub const fn kind(&self) -> ReflectKind {
        match self {
            Self::Scalar(_) => ReflectKind::Scalar,
            Self::Text(_) => ReflectKind::Text,
            Self::Token(_) => ReflectKind::Token,
            Self::Opt(_) => ReflectKind::Opt,
            Self::Handle(_) => ReflectKind::Handle,
            Self::Dynamic(_) => ReflectKind::Dynamic,
            Self::Seq(_) => ReflectKind::Seq,
            Self::Map(_) => ReflectKind::Map,
            Self::Struct(_) => ReflectKind::Struct,
        }
    }

    impl_mut_cast!(as_scalar: Scalar => &'a mut dyn Reflect);
    impl_mut_cast!(as_text: Text => &'a mut String);
    impl_mut_cast!(as_token: Token => &'a mut TypeToken);
    impl_mut_cast!(as_opt: Opt => &'a mut dyn Opt);
    impl_mut_cast!(as_handle: Handle => &'a mut dyn Handle);
    impl_mut_cast!(as_dynamic: Dynamic => &'a mut DynamicValue);
    impl_mut_cast!(as_seq: Seq => &'a mut dyn Seq);
    impl_mut_cast!(as_map: Map => &'a mut dyn Map);
    impl_mut_cast!(as_struct: Struct => &'a mut dyn Struct);
}
