//! Parsing of the derive input and its `#[model(...)]` attributes.

use syn::{Data, DeriveInput, Error, Fields, Ident, Lit, LitBool, LitStr, Path, Result, Type};

// -----------------------------------------------------------------------------
// ModelStruct

/// The parsed derive input: identity, type-level switches, and fields.
pub(crate) struct ModelStruct {
    pub ident: Ident,
    /// Path to the engine crate in generated code, `::mm_model` by default.
    pub crate_path: Path,
    /// Whether to emit the (empty) `Model` implementation.
    pub impl_model: bool,
    pub fields: Vec<ModelField>,
}

/// One parsed field and its attribute overrides.
pub(crate) struct ModelField {
    pub ident: Ident,
    pub ty: Type,
    /// `#[model(key = "...")]`
    pub document_key: Option<String>,
    /// `#[model(ignore)]`
    pub ignore: bool,
    /// `#[model(skip)]`
    pub skip: bool,
    /// `#[model(scale = <number>)]`
    pub scale: Option<f64>,
}

impl ModelStruct {
    pub(crate) fn parse(input: DeriveInput) -> Result<Self> {
        if !input.generics.params.is_empty() {
            return Err(Error::new_spanned(
                &input.generics,
                "`#[derive(Model)]` does not support generic types: model identity is the `TypeId` of a concrete type",
            ));
        }

        let fields = match &input.data {
            Data::Struct(data) => match &data.fields {
                Fields::Named(named) => &named.named,
                _ => {
                    return Err(Error::new_spanned(
                        &input.ident,
                        "`#[derive(Model)]` requires a struct with named fields",
                    ));
                }
            },
            _ => {
                return Err(Error::new_spanned(
                    &input.ident,
                    "`#[derive(Model)]` only supports structs",
                ));
            }
        };

        let mut crate_path: Path = syn::parse_quote!(::mm_model);
        let mut impl_model = true;

        for attr in &input.attrs {
            if !attr.path().is_ident("model") {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("Model") {
                    let lit: LitBool = meta.value()?.parse()?;
                    impl_model = lit.value();
                    Ok(())
                } else if meta.path.is_ident("crate") {
                    let lit: LitStr = meta.value()?.parse()?;
                    crate_path = lit.parse()?;
                    Ok(())
                } else {
                    Err(meta.error("expected `Model = <bool>` or `crate = \"...\"`"))
                }
            })?;
        }

        let mut parsed_fields = Vec::with_capacity(fields.len());
        for field in fields {
            let ident = field.ident.clone().expect("named field has an ident");
            let mut parsed = ModelField {
                ident,
                ty: field.ty.clone(),
                document_key: None,
                ignore: false,
                skip: false,
                scale: None,
            };

            for attr in &field.attrs {
                if !attr.path().is_ident("model") {
                    continue;
                }
                attr.parse_nested_meta(|meta| {
                    if meta.path.is_ident("key") {
                        let lit: LitStr = meta.value()?.parse()?;
                        parsed.document_key = Some(lit.value());
                        Ok(())
                    } else if meta.path.is_ident("ignore") {
                        parsed.ignore = true;
                        Ok(())
                    } else if meta.path.is_ident("skip") {
                        parsed.skip = true;
                        Ok(())
                    } else if meta.path.is_ident("scale") {
                        let lit: Lit = meta.value()?.parse()?;
                        parsed.scale = Some(match &lit {
                            Lit::Float(float) => float.base10_parse()?,
                            Lit::Int(int) => int.base10_parse()?,
                            _ => return Err(Error::new_spanned(&lit, "`scale` expects a number")),
                        });
                        Ok(())
                    } else {
                        Err(meta.error(
                            "expected `key = \"...\"`, `ignore`, `skip`, or `scale = <number>`",
                        ))
                    }
                })?;
            }

            parsed_fields.push(parsed);
        }

        Ok(Self {
            ident: input.ident,
            crate_path,
            impl_model,
            fields: parsed_fields,
        })
    }

    /// Fields that participate in conversion (`skip` excluded).
    pub(crate) fn active_fields(&self) -> impl Iterator<Item = &ModelField> {
        self.fields.iter().filter(|field| !field.skip)
    }
}
