use proc_macro2::TokenStream;
use quote::quote;

#[inline(always)]
pub(crate) fn non_generic_type_info_cell_(xylo_reflect_path: &syn::Path) -> TokenStream {
    quote! {
        #xylo_reflect_path::impls::NonGenericTypeInfoCell
    }
}
