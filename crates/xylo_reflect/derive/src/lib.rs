//! Derive support for `xylo_reflect`.
//!
//! See [`Reflect`].
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(clippy::std_instead_of_core, reason = "proc-macro lib")]
#![allow(clippy::std_instead_of_alloc, reason = "proc-macro lib")]

use proc_macro::TokenStream;
use quote::quote;
use syn::{DeriveInput, parse_macro_input};

static REFLECT_ATTRIBUTE_NAME: &str = "reflect";

// -----------------------------------------------------------------------------
// Modules

mod derive_data;
mod impls;
mod manifest;
mod path;
mod utils;

// -----------------------------------------------------------------------------
// Macros

/// # Full Reflection Derivation
///
/// `#[derive(Reflect)]` on a struct with named fields implements:
///
/// - `TypePath`
/// - `Typed`
/// - `Struct`
/// - `Reflect`
/// - `GetTypeMeta`
///
/// The type must be non-generic and implement [`Default`]: the generated
/// `GetTypeMeta` registers a factory that produces `Self::default()` as
/// the blank value decoding starts from.
///
/// ## Custom Type Path
///
/// The type path defaults to `module_path!()` plus the ident. Since module
/// layout is not always a stable identity, an attribute can pin the full
/// path a type uses in documents:
///
/// ```rust, ignore
/// #[derive(Reflect, Default)]
/// #[reflect(type_path = "you::me::Foo")]
/// struct Foo { /* ... */ }
/// ```
///
/// The last path segment becomes the type's ident; the segments before it
/// become its module path.
///
/// This attribute can only be applied at the type level.
///
/// ## Base Fields
///
/// One field may be marked as the carrier of the type's parent value.
/// Its fields are flattened into the enclosing element when encoding, so
/// a chain of base fields reads like single-inheritance:
///
/// ```rust, ignore
/// #[derive(Reflect, Default)]
/// struct Truck {
///     #[reflect(base)]
///     vehicle: Vehicle,
///     payload: f32,
/// }
/// ```
///
/// Field names must be unique across the whole chain; colliding names are
/// reported when a value is encoded or decoded.
///
/// This attribute can only be applied to at most one field.
///
/// ## Ignored Fields
///
/// ```rust, ignore
/// #[derive(Reflect, Default)]
/// struct Cache {
///     entries: Vec<u64>,
///     #[reflect(ignore)]
///     scratch: Vec<u64>,
/// }
/// ```
///
/// An ignored field never reaches a document and keeps its `Default`
/// value when decoding. Its type does not need to be reflectable.
/// `PhantomData` fields are ignored automatically.
///
/// This attribute can only be applied to fields.
///
/// ## Auto Registration
///
/// Automatic global registration is disabled by default (even when the
/// `auto_register` feature is enabled). You must explicitly enable it per
/// type:
///
/// ```rust, ignore
/// #[derive(Reflect, Default)]
/// #[reflect(auto_register)]
/// struct A { /* ... */ }
/// ```
///
/// This attribute is a no-op when the `auto_register` feature is disabled.
///
/// This attribute can only be applied at the type level.
#[proc_macro_derive(Reflect, attributes(reflect))]
pub fn derive_reflect(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    // Parse type kind, attribute and fields information.
    let info = match derive_data::ReflectStruct::from_input(&ast) {
        Ok(val) => val,
        Err(err) => return err.into_compile_error().into(),
    };

    let reflect_impls = impls::impl_struct(&info);

    TokenStream::from(quote! {
        const _: () = {
            #reflect_impls
        };
    })
}
