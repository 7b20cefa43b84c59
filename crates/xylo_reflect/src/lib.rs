#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

// -----------------------------------------------------------------------------
// Extern Self

// Usually, we need to use `crate` in the crate itself and use `xylo_reflect`
// in doc testing. But the derive's manifest resolver can only choose one, so
// we must have an `extern self` to ensure `xylo_reflect` can be used as an
// alias for `crate`.
extern crate self as xylo_reflect;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod reflection;

pub mod codec;
pub mod impls;
pub mod info;
pub mod ops;
pub mod registry;
pub mod scalar;

// -----------------------------------------------------------------------------
// Top-Level exports

pub mod __macro_exports;

pub use impls::{DynamicValue, Shared, TypeToken};
pub use reflection::Reflect;
pub use xylo_reflect_derive as derive;
pub use xylo_reflect_derive::Reflect;
