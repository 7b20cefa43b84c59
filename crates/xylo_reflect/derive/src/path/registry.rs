use proc_macro2::TokenStream;
use quote::quote;

#[inline]
pub(crate) fn type_meta_(xylo_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #xylo_reflect_path::registry::TypeMeta
    }
}

#[inline]
pub(crate) fn get_type_meta_(xylo_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #xylo_reflect_path::registry::GetTypeMeta
    }
}

#[inline]
pub(crate) fn type_registry_(xylo_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #xylo_reflect_path::registry::TypeRegistry
    }
}

#[cfg(feature = "auto_register")]
#[inline]
pub(crate) fn auto_registration_(xylo_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #xylo_reflect_path::registry::AutoRegistration
    }
}
