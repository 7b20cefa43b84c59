//! Re-exports used by generated code.
//!
//! Derive output and the [`auto_register!`](crate::auto_register) macro name
//! items through this module so that the invoking crate does not need `alloc`
//! or `inventory` in scope. Not part of the public API.
#![doc(hidden)]

pub use alloc::boxed::Box;

#[cfg(feature = "auto_register")]
pub use inventory;
