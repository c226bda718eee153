//! Code generation for the `Model` derive.

use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::{ModelField, ModelStruct};

// -----------------------------------------------------------------------------
// Entry

pub(crate) fn expand(model: &ModelStruct) -> TokenStream {
    let introspect_tokens = impl_introspect(model);
    let described_tokens = impl_described(model);
    let convert_tokens = impl_convert(model);
    let model_tokens = if model.impl_model {
        impl_model(model)
    } else {
        TokenStream::new()
    };

    quote! {
        #introspect_tokens

        #described_tokens

        #convert_tokens

        #model_tokens
    }
}

// -----------------------------------------------------------------------------
// Introspect

/// Generate the `Introspect` implementation: the property table plus the
/// static override tables collected from field attributes.
fn impl_introspect(model: &ModelStruct) -> TokenStream {
    let path = &model.crate_path;
    let ident = &model.ident;
    let name = ident.to_string();

    let entries = model
        .active_fields()
        .map(|field| property_entry(model, field));

    let key_entries = model.active_fields().filter_map(|field| {
        field.document_key.as_ref().map(|key| {
            let native = field.ident.to_string();
            quote! { (#native, #key) }
        })
    });

    let ignored = model.active_fields().filter(|field| field.ignore).map(|field| {
        let native = field.ident.to_string();
        quote! { #native }
    });

    let scales = model.active_fields().filter_map(|field| {
        field.scale.map(|scale| {
            let native = field.ident.to_string();
            quote! { (#native, #scale) }
        })
    });

    quote! {
        impl #path::Introspect for #ident {
            fn properties() -> &'static [#path::info::Property] {
                static __TABLE: #path::impls::PropertyTableCell =
                    #path::impls::PropertyTableCell::new();
                __TABLE.get_or_init(|| ::std::vec![ #(#entries),* ])
            }

            fn model_name() -> &'static str {
                #name
            }

            fn document_key_map() -> &'static [(&'static str, &'static str)] {
                &[ #(#key_entries),* ]
            }

            fn ignored_on_decode() -> &'static [&'static str] {
                &[ #(#ignored),* ]
            }

            fn date_scales() -> &'static [(&'static str, f64)] {
                &[ #(#scales),* ]
            }
        }
    }
}

/// Generate one `Property` entry with its accessor closures.
///
/// The closures downcast the erased instance back to the concrete model
/// type; the conversion drivers only ever hand them the matching type.
fn property_entry(model: &ModelStruct, field: &ModelField) -> TokenStream {
    let path = &model.crate_path;
    let ident = &model.ident;
    let field_ident = &field.ident;
    let ty = &field.ty;
    let name = field_ident.to_string();

    quote! {
        #path::info::Property::new::<#ty>(
            #name,
            #path::info::Accessors {
                decode: |__instance: &mut dyn ::core::any::Any,
                         __value: &#path::Value,
                         __cx: &#path::Coercion|
                 -> bool {
                    let __instance = __instance
                        .downcast_mut::<#ident>()
                        .expect("accessor invoked with a foreign model type");
                    match <#ty as #path::Convert>::from_document(__value, __cx) {
                        ::core::option::Option::Some(__converted) => {
                            __instance.#field_ident = __converted;
                            true
                        }
                        ::core::option::Option::None => false,
                    }
                },
                encode: |__instance: &dyn ::core::any::Any,
                         __cx: &#path::Coercion|
                 -> ::core::option::Option<#path::Value> {
                    let __instance = __instance
                        .downcast_ref::<#ident>()
                        .expect("accessor invoked with a foreign model type");
                    <#ty as #path::Convert>::to_document(&__instance.#field_ident, __cx)
                },
                assign: |__instance: &mut dyn ::core::any::Any,
                         __object: ::std::boxed::Box<dyn ::core::any::Any>|
                 -> bool {
                    let __instance = __instance
                        .downcast_mut::<#ident>()
                        .expect("accessor invoked with a foreign model type");
                    match __object.downcast::<#ty>() {
                        ::core::result::Result::Ok(__converted) => {
                            __instance.#field_ident = *__converted;
                            true
                        }
                        ::core::result::Result::Err(_) => false,
                    }
                },
            },
        )
    }
}

// -----------------------------------------------------------------------------
// Described

/// Generate the `Described` implementation: a `Model` descriptor stored in a
/// per-type cell.
fn impl_described(model: &ModelStruct) -> TokenStream {
    let path = &model.crate_path;
    let ident = &model.ident;

    quote! {
        impl #path::info::Described for #ident {
            fn descriptor() -> &'static #path::info::TypeDescriptor {
                static __DESC: #path::impls::DescriptorCell = #path::impls::DescriptorCell::new();
                __DESC.get_or_init(|| {
                    #path::info::TypeDescriptor::Model(#path::info::ModelType::of::<#ident>())
                })
            }
        }
    }
}

// -----------------------------------------------------------------------------
// Convert

/// Generate the `Convert` implementation.
///
/// Construction never fails: a malformed fragment yields a default
/// instance, matching the in-place decode semantics. Collections detect and
/// drop non-mapping elements before calling this.
fn impl_convert(model: &ModelStruct) -> TokenStream {
    let path = &model.crate_path;
    let ident = &model.ident;

    quote! {
        impl #path::Convert for #ident {
            fn from_document(
                __value: &#path::Value,
                __cx: &#path::Coercion,
            ) -> ::core::option::Option<Self> {
                let mut __model = <Self as ::core::default::Default>::default();
                match __cx.mode() {
                    #path::Mode::Document => #path::convert::decode(&mut __model, __value),
                    #path::Mode::Archive => #path::archive::restore(&mut __model, __value),
                }
                ::core::option::Option::Some(__model)
            }

            fn to_document(
                &self,
                __cx: &#path::Coercion,
            ) -> ::core::option::Option<#path::Value> {
                ::core::option::Option::Some(match __cx.mode() {
                    #path::Mode::Document => #path::convert::encode(self),
                    #path::Mode::Archive => #path::archive::snapshot(self),
                })
            }
        }
    }
}

// -----------------------------------------------------------------------------
// Model

/// Generate the default (empty) `Model` implementation.
fn impl_model(model: &ModelStruct) -> TokenStream {
    let path = &model.crate_path;
    let ident = &model.ident;

    quote! {
        impl #path::Model for #ident {}
    }
}
