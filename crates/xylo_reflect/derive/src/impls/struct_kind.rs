use proc_macro2::TokenStream;
use quote::quote;

use super::{get_auto_register_impl, impl_trait_get_type_meta};
use super::{impl_trait_reflect, impl_trait_type_path, impl_trait_typed};

use crate::derive_data::{ReflectStruct, StructField};

/// Implement full reflect for struct type.
pub(crate) fn impl_struct(info: &ReflectStruct) -> TokenStream {
    // trait: TypePath
    let type_path_trait_tokens = impl_trait_type_path(info);

    // trait: Typed
    let typed_trait_tokens = impl_trait_typed(info);

    // trait: Struct
    let struct_trait_tokens = impl_trait_struct(info);

    // trait: Reflect
    let reflect_trait_tokens = impl_trait_reflect(info);

    // trait: GetTypeMeta
    let get_type_meta_tokens = impl_trait_get_type_meta(info, get_registry_dependencies(info));

    // feature: auto_register
    let auto_register_tokens = get_auto_register_impl(info);

    quote! {
        #type_path_trait_tokens

        #typed_trait_tokens

        #struct_trait_tokens

        #reflect_trait_tokens

        #get_type_meta_tokens

        #auto_register_tokens
    }
}

/// Generate `Struct` trait implementation tokens.
fn impl_trait_struct(info: &ReflectStruct) -> TokenStream {
    let xylo_reflect_path = info.xylo_reflect_path();
    let struct_ = crate::path::struct_(xylo_reflect_path);
    let reflect_ = crate::path::reflect_(xylo_reflect_path);

    let field_names = info
        .active_fields()
        .map(StructField::name)
        .collect::<Vec<String>>();
    let field_idents = info
        .active_fields()
        .map(|field| field.ident)
        .collect::<Vec<_>>();

    let ident = info.ident();

    quote! {
        impl #struct_ for #ident {
            fn field(&self, name: &str) -> ::core::option::Option<&dyn #reflect_> {
                match name {
                    #(#field_names => ::core::option::Option::Some(&self.#field_idents),)*
                    _ => ::core::option::Option::None,
                }
            }

            fn field_mut(&mut self, name: &str) -> ::core::option::Option<&mut dyn #reflect_> {
                match name {
                    #(#field_names => ::core::option::Option::Some(&mut self.#field_idents),)*
                    _ => ::core::option::Option::None,
                }
            }
        }
    }
}

/// Generate partial `GetTypeMeta` implementation tokens.
fn get_registry_dependencies(info: &ReflectStruct) -> TokenStream {
    let type_registry_ = crate::path::type_registry_(info.xylo_reflect_path());

    let field_types = info.active_fields().map(|field| field.ty);

    quote! {
        fn register_dependencies(__registry: &mut #type_registry_) {
            #(#type_registry_::register::<#field_types>(__registry);)*
        }
    }
}
