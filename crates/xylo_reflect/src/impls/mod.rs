//! Reflection implementations for built-in types, plus the utilities
//! hand-written impls lean on.
//!
//! - [`concat`]: an efficient string concatenation function.
//! - [`NonGenericTypeInfoCell`]: backs [`Typed`] for non-generic types.
//! - [`GenericTypeInfoCell`]: backs [`Typed`] for generic types.
//! - [`GenericTypePathCell`]: backs [`TypePath`] for generic types.
//!
//! ## Implemented Menu
//!
//! - scalars: `bool`, `char`, `u8`-`u128`, `usize`, `i8`-`i128`, `isize`,
//!   `f32`, `f64`
//! - text: `String`
//! - sequences: `Vec<T>`, `[T; N]`
//! - maps: `HashMap<K, V>` (`RandomState` only), `BTreeMap<K, V>`
//! - optionals: `Option<T>`
//! - crate types: [`Shared<T>`], [`DynamicValue`], [`TypeToken`]
//!
//! [`Typed`]: crate::info::Typed
//! [`TypePath`]: crate::info::TypePath
//! [`Shared<T>`]: crate::Shared

// -----------------------------------------------------------------------------
// Modules

mod cell;

mod dynamic;
mod maps;
mod option;
mod scalars;
mod sequences;
mod shared;
mod text;
mod token;

// -----------------------------------------------------------------------------
// Exports

pub use cell::{GenericTypeInfoCell, GenericTypePathCell, NonGenericTypeInfoCell};

pub use dynamic::DynamicValue;
pub use shared::Shared;
pub use token::TypeToken;

/// An efficient string concatenation function.
///
/// This is usually used for the implementation of `TypePath`.
///
/// # Example
///
/// ```
/// use xylo_reflect::impls;
///
/// let s = impls::concat(&["module", "::", "name", "<", "T", ">"]);
///
/// assert_eq!(s, "module::name<T>");
/// assert_eq!(s.capacity(), 15);
/// ```
///
/// Inline is prohibited here to reduce compilation time.
#[inline(never)]
pub fn concat(arr: &[&str]) -> alloc::string::String {
    let mut len = 0usize;
    for &item in arr {
        len += item.len();
    }
    let mut res = alloc::string::String::with_capacity(len);
    for &item in arr {
        res.push_str(item);
    }
    res
}
