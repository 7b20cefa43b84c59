use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::ReflectStruct;

/// Generate implementation code for `Reflect` trait.
pub(crate) fn impl_trait_reflect(info: &ReflectStruct) -> TokenStream {
    let xylo_reflect_path = info.xylo_reflect_path();

    let reflect_ = crate::path::reflect_(xylo_reflect_path);
    let macro_exports_ = crate::path::macro_exports_(xylo_reflect_path);
    let reflect_kind_ = crate::path::reflect_kind_(xylo_reflect_path);
    let reflect_ref_ = crate::path::reflect_ref_(xylo_reflect_path);
    let reflect_mut_ = crate::path::reflect_mut_(xylo_reflect_path);

    let ident = info.ident();

    quote! {
        impl #reflect_ for #ident {
            fn set(&mut self, value: #macro_exports_::Box<dyn #reflect_>) -> ::core::result::Result<(), #macro_exports_::Box<dyn #reflect_>> {
                *self = value.take::<Self>()?;
                Ok(())
            }

            #[inline]
            fn reflect_kind(&self) -> #reflect_kind_ {
                #reflect_kind_::Struct
            }

            #[inline]
            fn reflect_ref(&self) -> #reflect_ref_<'_> {
                #reflect_ref_::Struct(self)
            }

            #[inline]
            fn reflect_mut(&mut self) -> #reflect_mut_<'_> {
                #reflect_mut_::Struct(self)
            }
        }
    }
}
