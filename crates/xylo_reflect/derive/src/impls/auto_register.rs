use crate::derive_data::ReflectStruct;

/// Generate `auto_register` implementation
#[cfg(feature = "auto_register")]
pub(crate) fn get_auto_register_impl(info: &ReflectStruct) -> proc_macro2::TokenStream {
    use quote::quote_spanned;

    if let Some(span) = info.attrs().auto_register {
        let xylo_reflect_path = info.xylo_reflect_path();
        let macro_exports_ = crate::path::macro_exports_(xylo_reflect_path);
        let auto_registration_ = crate::path::auto_registration_(xylo_reflect_path);
        let ident = info.ident();

        quote_spanned! { span =>
            #macro_exports_::inventory::submit! {
                #auto_registration_::of::<#ident>()
            }
        }
    } else {
        crate::utils::empty()
    }
}

/// Generate `auto_register` implementation
#[cfg(not(feature = "auto_register"))]
pub(crate) fn get_auto_register_impl(_: &ReflectStruct) -> proc_macro2::TokenStream {
    crate::utils::empty()
}
