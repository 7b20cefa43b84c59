use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::{ReflectStruct, StructField};

/// Generate implementation code for `Typed`.
///
/// The emitted `StructInfo` lists every declared field in order, skipped
/// ones as placeholders, so field indices line up with the declaration.
pub(crate) fn impl_trait_typed(info: &ReflectStruct) -> TokenStream {
    let xylo_reflect_path = info.xylo_reflect_path();
    let trait_typed_ = crate::path::typed_(xylo_reflect_path);
    let type_info_ = crate::path::type_info_(xylo_reflect_path);
    let struct_info_ = crate::path::struct_info_(xylo_reflect_path);
    let info_cell_ = crate::path::non_generic_type_info_cell_(xylo_reflect_path);

    let field_tokens = info.fields().map(|field| named_field_tokens(info, field));

    let ident = info.ident();

    quote! {
        impl #trait_typed_ for #ident {
            fn type_info() -> &'static #type_info_ {
                static CELL: #info_cell_ = #info_cell_::new();
                CELL.get_or_init(|| {
                    #type_info_::Struct(#struct_info_::new::<Self>(&[
                        #(#field_tokens,)*
                    ]))
                })
            }
        }
    }
}

fn named_field_tokens(info: &ReflectStruct, field: &StructField) -> TokenStream {
    let named_field_ = crate::path::named_field_(info.xylo_reflect_path());
    let name = field.name();

    if field.is_skipped() {
        quote! { #named_field_::skipped(#name) }
    } else if field.is_base() {
        let ty = field.ty;
        quote! { #named_field_::base::<#ty>(#name) }
    } else {
        let ty = field.ty;
        quote! { #named_field_::new::<#ty>(#name) }
    }
}
