//! This independent module is used to provide the required path.
//! So as to minimize changes when the `xylo_reflect` structure is modified.
//!
//! The only special feature is the path of xylo_reflect itself,
//! See [`xylo_reflect`] function doc.

use proc_macro2::TokenStream;
use quote::quote;

// -----------------------------------------------------------------------------
// Crate Path

/// Get the correct access path to the `xylo_reflect` crate.
///
/// Not all modules can access the reflection crate itself through
/// `xylo_reflect`, we have to scan the builder's `cargo.toml`.
///
/// 1. For crates that depend on `xylo_reflect`, `::xylo_reflect` is returned here.
/// 2. For crates that depend on `xylograph`, `::xylograph::reflect` is returned here.
/// 3. For other situations, `::xylo_reflect` is returned here, but this may be incorrect.
///
/// The cost of this function is relatively high (accessing files, obtaining
/// read-write lock permissions, querying content...), so the crate path is
/// mainly obtained through parameter passing rather than reacquiring.
pub(crate) fn xylo_reflect() -> syn::Path {
    crate::manifest::Manifest::shared(|manifest| manifest.get_crate_path("xylo_reflect"))
}

// -----------------------------------------------------------------------------
// Modules

mod cell;
mod info;
mod ops;
mod registry;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use cell::*;
pub(crate) use info::*;
pub(crate) use ops::*;
pub(crate) use registry::*;

#[inline(always)]
pub(crate) fn macro_exports_(xylo_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #xylo_reflect_path::__macro_exports
    }
}

#[inline(always)]
pub(crate) fn reflect_(xylo_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #xylo_reflect_path::Reflect
    }
}
