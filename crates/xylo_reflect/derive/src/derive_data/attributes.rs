use proc_macro2::Span;
use syn::spanned::Spanned;
use syn::{Attribute, LitStr};

use crate::REFLECT_ATTRIBUTE_NAME;

// -----------------------------------------------------------------------------
// TypeAttributes

/// Container-level `#[reflect(...)]` attributes.
#[derive(Default, Debug)]
pub(crate) struct TypeAttributes {
    /// Present when the type asked for link-time registration.
    pub(crate) auto_register: Option<Span>,
    /// An explicit full type path, replacing the `module_path!()` default.
    pub(crate) custom_path: Option<CustomPath>,
}

impl TypeAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();

        for attr in attrs {
            if !attr.path().is_ident(REFLECT_ATTRIBUTE_NAME) {
                continue;
            }

            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("auto_register") {
                    this.auto_register = Some(meta.path.span());
                    Ok(())
                } else if meta.path.is_ident("type_path") {
                    let lit: LitStr = meta.value()?.parse()?;
                    this.custom_path = Some(CustomPath::from_lit(&lit)?);
                    Ok(())
                } else {
                    Err(meta.error(
                        "unknown container attribute; expected `auto_register` or `type_path = \"...\"`",
                    ))
                }
            })?;
        }

        Ok(this)
    }
}

// -----------------------------------------------------------------------------
// CustomPath

/// A validated `#[reflect(type_path = "...")]` value: a plain path whose
/// last segment stands in for the type's ident.
#[derive(Debug)]
pub(crate) struct CustomPath {
    full: String,
}

impl CustomPath {
    fn from_lit(lit: &LitStr) -> syn::Result<Self> {
        let full = lit.value();

        let parsed: syn::Path = syn::parse_str(&full).map_err(|_| {
            syn::Error::new(
                lit.span(),
                "`type_path` must be a plain `::`-separated path",
            )
        })?;
        if parsed.leading_colon.is_some() {
            return Err(syn::Error::new(
                lit.span(),
                "`type_path` must not start with `::`",
            ));
        }
        if parsed
            .segments
            .iter()
            .any(|segment| !segment.arguments.is_none())
        {
            return Err(syn::Error::new(
                lit.span(),
                "`type_path` must not contain generics",
            ));
        }

        Ok(Self { full })
    }

    /// The whole path, as stored in documents.
    pub fn full(&self) -> &str {
        &self.full
    }

    /// The segments before the ident. `None` when the path is a bare ident.
    pub fn module(&self) -> Option<&str> {
        self.full.rsplit_once("::").map(|(module, _)| module)
    }

    /// The last segment.
    pub fn ident(&self) -> &str {
        self.full
            .rsplit_once("::")
            .map_or(self.full.as_str(), |(_, ident)| ident)
    }
}

// -----------------------------------------------------------------------------
// FieldAttributes

/// Field-level `#[reflect(...)]` attributes.
#[derive(Default, Debug)]
pub(crate) struct FieldAttributes {
    /// Present when the field is excluded from reflection.
    pub(crate) ignore: Option<Span>,
    /// Present when the field carries the type's parent value.
    pub(crate) base: Option<Span>,
}

impl FieldAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();

        for attr in attrs {
            if !attr.path().is_ident(REFLECT_ATTRIBUTE_NAME) {
                continue;
            }

            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("ignore") {
                    this.ignore = Some(meta.path.span());
                    Ok(())
                } else if meta.path.is_ident("base") {
                    this.base = Some(meta.path.span());
                    Ok(())
                } else {
                    Err(meta.error("unknown field attribute; expected `ignore` or `base`"))
                }
            })?;
        }

        if let (Some(span), Some(_)) = (this.base, this.ignore) {
            return Err(syn::Error::new(
                span,
                "`base` cannot be combined with `ignore`",
            ));
        }

        Ok(this)
    }
}
