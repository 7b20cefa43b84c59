use proc_macro2::Span;
use syn::{Data, DeriveInput, Fields, Ident, Type};

use super::{FieldAttributes, TypeAttributes};

// -----------------------------------------------------------------------------
// ReflectStruct

/// Parsed derive input: a non-generic struct with named fields.
pub(crate) struct ReflectStruct<'a> {
    ident: &'a Ident,
    attrs: TypeAttributes,
    xylo_reflect_path: syn::Path,
    fields: Vec<StructField<'a>>,
}

impl<'a> ReflectStruct<'a> {
    pub fn from_input(ast: &'a DeriveInput) -> syn::Result<Self> {
        if !ast.generics.params.is_empty() {
            return Err(syn::Error::new_spanned(
                &ast.generics,
                "#[derive(Reflect)] does not support generic types",
            ));
        }

        let Data::Struct(data) = &ast.data else {
            return Err(syn::Error::new(
                Span::call_site(),
                "#[derive(Reflect)] only supports structs",
            ));
        };

        let Fields::Named(named) = &data.fields else {
            return Err(syn::Error::new(
                Span::call_site(),
                "#[derive(Reflect)] only supports structs with named fields",
            ));
        };

        let attrs = TypeAttributes::parse_attrs(&ast.attrs)?;

        let mut fields = Vec::with_capacity(named.named.len());
        let mut base: Option<Span> = None;

        for field in &named.named {
            let field_attrs = FieldAttributes::parse_attrs(&field.attrs)?;
            let marker = is_marker(&field.ty);

            if let Some(span) = field_attrs.base {
                if marker {
                    return Err(syn::Error::new(
                        span,
                        "a `PhantomData` field cannot be marked `base`",
                    ));
                }
                if base.replace(span).is_some() {
                    return Err(syn::Error::new(
                        span,
                        "at most one field can be marked `base`",
                    ));
                }
            }

            let ident = field.ident.as_ref().expect("named fields have idents");
            fields.push(StructField {
                ident,
                ty: &field.ty,
                attrs: field_attrs,
                marker,
            });
        }

        Ok(Self {
            ident: &ast.ident,
            attrs,
            xylo_reflect_path: crate::path::xylo_reflect(),
            fields,
        })
    }

    #[inline]
    pub fn ident(&self) -> &Ident {
        self.ident
    }

    #[inline]
    pub fn attrs(&self) -> &TypeAttributes {
        &self.attrs
    }

    #[inline]
    pub fn xylo_reflect_path(&self) -> &syn::Path {
        &self.xylo_reflect_path
    }

    /// All declared fields, in declaration order.
    #[inline]
    pub fn fields(&self) -> impl Iterator<Item = &StructField<'a>> {
        self.fields.iter()
    }

    /// Fields that participate in reflection, the base field included.
    #[inline]
    pub fn active_fields(&self) -> impl Iterator<Item = &StructField<'a>> {
        self.fields.iter().filter(|field| !field.is_skipped())
    }
}

// -----------------------------------------------------------------------------
// StructField

/// One named field together with its parsed attributes.
pub(crate) struct StructField<'a> {
    pub(crate) ident: &'a Ident,
    pub(crate) ty: &'a Type,
    attrs: FieldAttributes,
    marker: bool,
}

impl StructField<'_> {
    /// The name the field carries in type info and in documents.
    ///
    /// Raw identifiers keep their `r#` prefix.
    #[inline]
    pub fn name(&self) -> String {
        self.ident.to_string()
    }

    /// Skipped fields stay out of type registration and documents.
    #[inline]
    pub fn is_skipped(&self) -> bool {
        self.marker || self.attrs.ignore.is_some()
    }

    #[inline]
    pub fn is_base(&self) -> bool {
        self.attrs.base.is_some()
    }
}

// `PhantomData` recognized by its last path segment, so the qualified
// spelling `core::marker::PhantomData` is covered too.
fn is_marker(ty: &Type) -> bool {
    if let Type::Path(type_path) = ty
        && let Some(segment) = type_path.path.segments.last()
    {
        segment.ident == "PhantomData"
    } else {
        false
    }
}
