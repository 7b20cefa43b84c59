//! Compile-time type information.
//!
//! ## Menu
//!
//! - [`TypePath`]: A trait for stable type names, without a `::` prefix.
//!     - [`type_path`](TypePath::type_path): full path, the unique identity used in documents.
//!     - [`type_name`](TypePath::type_name): name with generics but without modules.
//!     - [`type_ident`](TypePath::type_ident): name without generics or modules.
//!     - [`module_path`](TypePath::module_path): optional module path.
//! - [`DynamicTypePath`]: Dynamic dispatch for `TypePath`.
//! - [`TypePathTable`]: Function pointers to a single type's `TypePath` implementation.
//! - [`Type`]: A `TypeId` paired with a `TypePathTable`.
//!
//! - [`TypeInfo`]: Per-kind compile-time type information, one of:
//!     - [`ScalarInfo`]: primitive scalars (`bool`, integers, floats, `char`).
//!     - [`LeafInfo`]: text, type tokens and dynamic values.
//!     - [`OptInfo`]: optional values, carrying the inner type.
//!     - [`HandleInfo`]: shared handles, carrying the wrapped type.
//!     - [`SeqInfo`]: sequences, carrying the item type and fixed length if any.
//!     - [`MapInfo`]: maps, carrying the key and value types.
//!     - [`StructInfo`]: named-field structs, carrying [`NamedField`] entries.
//! - [`ReflectKind`]: the discriminator of `TypeInfo` and of reflected values.
//!
//! - [`Typed`]: A trait for obtaining `TypeInfo` statically.
//! - [`DynamicTyped`]: Dynamic dispatch for `Typed`.

// -----------------------------------------------------------------------------
// Modules

mod field_info;
mod handle_info;
mod leaf_info;
mod map_info;
mod opt_info;
mod seq_info;
mod struct_info;
mod type_info;
mod type_path;
mod typed;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use type_path::impl_type_fn;

// -----------------------------------------------------------------------------
// Exports

pub use field_info::NamedField;
pub use handle_info::HandleInfo;
pub use leaf_info::{LeafInfo, ScalarInfo};
pub use map_info::MapInfo;
pub use opt_info::OptInfo;
pub use seq_info::SeqInfo;
pub use struct_info::StructInfo;
pub use type_info::{ReflectKind, ReflectKindError, TypeInfo};
pub use type_path::{DynamicTypePath, Type, TypePath, TypePathTable};
pub use typed::{DynamicTyped, Typed};
