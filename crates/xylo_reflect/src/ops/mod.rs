//! Interfaces for kind-specific data access.
//!
//! ## Menu
//!
//! ### Interfaces
//!
//! The following are subtraits of [`Reflect`], providing data access for
//! the structured kinds:
//!
//! - [`Struct`]: named-field structs.
//! - [`Seq`]: sequences (`Vec<T>`, `[T; N]`).
//! - [`Map`]: key-value maps (`HashMap<K, V>`, `BTreeMap<K, V>`).
//! - [`Opt`]: optional values (`Option<T>`).
//! - [`Handle`]: shared, identity-carrying values ([`Shared<T>`]).
//!
//! ### Views
//!
//! [`ReflectRef`] and [`ReflectMut`] are the kind-tagged views returned by
//! [`Reflect::reflect_ref`] and [`Reflect::reflect_mut`]. Scalars view as
//! a copied-out [`ScalarValue`](crate::scalar::ScalarValue), text views as
//! `&str`, everything else views through the interface traits above.
//!
//! [`Reflect`]: crate::Reflect
//! [`Reflect::reflect_ref`]: crate::Reflect::reflect_ref
//! [`Reflect::reflect_mut`]: crate::Reflect::reflect_mut
//! [`Shared<T>`]: crate::Shared

// -----------------------------------------------------------------------------
// Modules

mod handle_ops;
mod kind;
mod map_ops;
mod opt_ops;
mod seq_ops;
mod struct_ops;

// -----------------------------------------------------------------------------
// Exports

pub use kind::{ReflectMut, ReflectRef};

pub use handle_ops::{ErasedHandle, Handle, HandleError};
pub use map_ops::Map;
pub use opt_ops::Opt;
pub use seq_ops::{Seq, SeqPrepareError, SeqPushError};
pub use struct_ops::Struct;
