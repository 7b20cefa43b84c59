use core::{error, fmt};

use crate::info::{HandleInfo, LeafInfo, MapInfo, OptInfo};
use crate::info::{ScalarInfo, SeqInfo, StructInfo, Type};

// -----------------------------------------------------------------------------
// ReflectKind

/// An enumeration of the "kinds" of a reflected type.
///
/// The order mirrors the dispatch order of the codec: scalars first, then
/// the leaf kinds, then containers, with structs last.
///
/// A [`ReflectKind`] is obtained via [`Reflect::reflect_kind`], or via
/// [`ReflectRef::kind`] and [`ReflectMut::kind`].
///
/// [`Reflect::reflect_kind`]: crate::Reflect::reflect_kind
/// [`ReflectRef::kind`]: crate::ops::ReflectRef::kind
/// [`ReflectMut::kind`]: crate::ops::ReflectMut::kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReflectKind {
    Scalar,
    Text,
    Token,
    Opt,
    Handle,
    Dynamic,
    Seq,
    Map,
    Struct,
}

impl fmt::Display for ReflectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar => f.pad("Scalar"),
            Self::Text => f.pad("Text"),
            Self::Token => f.pad("Token"),
            Self::Opt => f.pad("Opt"),
            Self::Handle => f.pad("Handle"),
            Self::Dynamic => f.pad("Dynamic"),
            Self::Seq => f.pad("Seq"),
            Self::Map => f.pad("Map"),
            Self::Struct => f.pad("Struct"),
        }
    }
}

/// Error returned when a value is not of the expected [`ReflectKind`].
#[derive(Debug)]
pub struct ReflectKindError {
    pub expected: ReflectKind,
    pub received: ReflectKind,
}

impl fmt::Display for ReflectKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "reflect kind mismatch: expected {}, received {}",
            self.expected, self.received
        )
    }
}

impl error::Error for ReflectKindError {}

// -----------------------------------------------------------------------------
// TypeInfo

/// Compile-time type information for reflected types.
///
/// A `TypeInfo` is one of the kind-specific info structs, tagged by the
/// [`ReflectKind`] it belongs to. It is usually obtained through
/// [`Typed::type_info`](crate::info::Typed::type_info) for a compile-time
/// type, through
/// [`DynamicTyped::reflect_type_info`](crate::info::DynamicTyped::reflect_type_info)
/// for a `dyn Reflect` value, or from a
/// [`TypeRegistry`](crate::registry::TypeRegistry) when all that is known
/// is a serialized type path.
#[derive(Clone, Debug)]
pub enum TypeInfo {
    Scalar(ScalarInfo),
    Text(LeafInfo),
    Token(LeafInfo),
    Opt(OptInfo),
    Handle(HandleInfo),
    Dynamic(LeafInfo),
    Seq(SeqInfo),
    Map(MapInfo),
    Struct(StructInfo),
}

// Helper macro that implements type-safe accessor methods like `as_struct`.
macro_rules! impl_cast_method {
    ($name:ident : $kind:ident => $info:ident) => {
        /// Convert [`TypeInfo`] to the kind-specific info struct.
        pub const fn $name(&self) -> Result<&$info, ReflectKindError> {
            match self {
                Self::$kind(info) => Ok(info),
                _ => Err(ReflectKindError {
                    expected: ReflectKind::$kind,
                    received: self.kind(),
                }),
            }
        }
    };
}

impl TypeInfo {
    impl_cast_method!(as_scalar: Scalar => ScalarInfo);
    impl_cast_method!(as_opt: Opt => OptInfo);
    impl_cast_method!(as_handle: Handle => HandleInfo);
    impl_cast_method!(as_seq: Seq => SeqInfo);
    impl_cast_method!(as_map: Map => MapInfo);
    impl_cast_method!(as_struct: Struct => StructInfo);

    /// Returns the underlying [`Type`] metadata.
    pub const fn ty(&self) -> &Type {
        match self {
            Self::Scalar(info) => info.ty(),
            Self::Text(info) => info.ty(),
            Self::Token(info) => info.ty(),
            Self::Opt(info) => info.ty(),
            Self::Handle(info) => info.ty(),
            Self::Dynamic(info) => info.ty(),
            Self::Seq(info) => info.ty(),
            Self::Map(info) => info.ty(),
            Self::Struct(info) => info.ty(),
        }
    }

    crate::info::impl_type_fn!();

    /// Returns the [`ReflectKind`] of this info (a fast discriminator).
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
}
