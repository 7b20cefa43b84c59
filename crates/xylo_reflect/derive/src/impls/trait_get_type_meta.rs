use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::ReflectStruct;

/// Generate implementation code for `GetTypeMeta` trait.
///
/// The emitted factory produces `Self::default()`, which is why the
/// derive requires [`Default`]. `register_deps_tokens` registers the
/// active field types.
pub(crate) fn impl_trait_get_type_meta(
    info: &ReflectStruct,
    register_deps_tokens: TokenStream,
) -> TokenStream {
    let xylo_reflect_path = info.xylo_reflect_path();
    let get_type_meta_ = crate::path::get_type_meta_(xylo_reflect_path);
    let type_meta_ = crate::path::type_meta_(xylo_reflect_path);

    let ident = info.ident();

    quote! {
        impl #get_type_meta_ for #ident {
            fn get_type_meta() -> #type_meta_ {
                #type_meta_::with_factory::<Self>()
            }

            #register_deps_tokens
        }
    }
}
