use proc_macro2::TokenStream;
use quote::quote;

#[inline]
pub(crate) fn struct_(xylo_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #xylo_reflect_path::ops::Struct
    }
}

#[inline]
pub(crate) fn reflect_ref_(xylo_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #xylo_reflect_path::ops::ReflectRef
    }
}

#[inline]
pub(crate) fn reflect_mut_(xylo_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #xylo_reflect_path::ops::ReflectMut
    }
}
