use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::ReflectStruct;

/// Generate implementation codes for `TypePath`.
///
/// Without a `type_path` override the path is rooted at the invoking
/// module through `module_path!()`, so the literals concatenate at
/// compile time.
pub(crate) fn impl_trait_type_path(info: &ReflectStruct) -> TokenStream {
    let trait_type_path_ = crate::path::type_path_(info.xylo_reflect_path());

    let ident = info.ident();
    let ident_name = ident.to_string();

    let (type_path, leaf_name, module_path) = match &info.attrs().custom_path {
        Some(custom) => {
            let full = custom.full();
            let leaf = custom.ident();
            (
                quote! { #full },
                quote! { #leaf },
                wrap_in_option(custom.module().map(|module| quote! { #module })),
            )
        }
        None => (
            quote! { ::core::concat!(::core::module_path!(), "::", #ident_name) },
            quote! { #ident_name },
            wrap_in_option(Some(quote! { ::core::module_path!() })),
        ),
    };

    quote! {
        impl #trait_type_path_ for #ident {
            #[inline]
            fn type_path() -> &'static str {
                #type_path
            }

            #[inline]
            fn type_name() -> &'static str {
                #leaf_name
            }

            #[inline]
            fn type_ident() -> &'static str {
                #leaf_name
            }

            #[inline]
            fn module_path() -> ::core::option::Option<&'static str> {
                #module_path
            }
        }
    }
}

fn wrap_in_option(tokens: Option<TokenStream>) -> TokenStream {
    match tokens {
        Some(tokens) => quote! {
            ::core::option::Option::Some(#tokens)
        },
        None => quote! {
            ::core::option::Option::None
        },
    }
}
