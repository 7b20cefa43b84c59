use proc_macro2::TokenStream;
use quote::quote;

#[inline]
pub(crate) fn type_path_(xylo_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #xylo_reflect_path::info::TypePath
    }
}

#[inline]
pub(crate) fn typed_(xylo_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #xylo_reflect_path::info::Typed
    }
}

#[inline]
pub(crate) fn type_info_(xylo_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #xylo_reflect_path::info::TypeInfo
    }
}

#[inline]
pub(crate) fn struct_info_(xylo_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #xylo_reflect_path::info::StructInfo
    }
}

#[inline]
pub(crate) fn named_field_(xylo_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #xylo_reflect_path::info::NamedField
    }
}

#[inline]
pub(crate) fn reflect_kind_(xylo_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #xylo_reflect_path::info::ReflectKind
    }
}
