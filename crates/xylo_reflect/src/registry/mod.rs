//! The type registry, which resolves type paths found in documents.
//!
//! ## Menu
//!
//! - [`Factory`]: manufactures blank values of one type.
//! - [`TypeMeta`]: a [`TypeInfo`](crate::info::TypeInfo) paired with an
//!   optional [`Factory`].
//! - [`GetTypeMeta`]: derived trait producing a type's [`TypeMeta`].
//! - [`TypeRegistry`]: the store of [`TypeMeta`]s, indexed by [`TypeId`]
//!   and by type path.
//! - [`global`]: the process-wide registry.
//!
//! ## auto_register
//!
//! With the `auto_register` feature, types marked
//! `#[reflect(auto_register)]` (or submitted through
//! [`auto_register!`](crate::auto_register)) are collected at link time
//! by the `inventory` crate and applied by
//! [`TypeRegistry::auto_register`]. Not every platform supports the
//! constructors this relies on; on unsupported platforms the collection
//! is simply empty.
//!
//! [`TypeId`]: core::any::TypeId

// -----------------------------------------------------------------------------
// Modules

mod auto;
mod factory;
mod type_meta;
mod type_registry;

// -----------------------------------------------------------------------------
// Exports

#[cfg(feature = "auto_register")]
pub use auto::AutoRegistration;
pub use factory::Factory;
pub use type_meta::{GetTypeMeta, TypeMeta};
pub use type_registry::{TypeRegistry, global};
