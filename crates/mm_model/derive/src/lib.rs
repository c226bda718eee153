//! See the [`Model`] derive macro.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

// -----------------------------------------------------------------------------
// Modules

mod derive_data;
mod impls;

// -----------------------------------------------------------------------------
// Macros

/// # Model Derivation
///
/// `#[derive(Model)]` turns a struct with named fields into a convertible
/// model type by implementing the following traits:
///
/// - `Introspect` — the ordered property table and the static override
///   tables collected from field attributes
/// - `Described` — the type's `Model` descriptor
/// - `Convert` — recursive document/archive conversion
/// - `Model` — an empty implementation of the configuration surface
///
/// The struct must also implement `Default` (decoding constructs fresh
/// instances), and every field type must implement `Convert` — a field the
/// engine cannot classify is a compile error. Use a `serde_json::Value`
/// field for opaque pass-through.
///
/// ```rust, ignore
/// #[derive(Default, Model)]
/// struct Person {
///     #[model(key = "user_name")]
///     name: String,
///     age: i64,
///     friends: Vec<Person>,
/// }
/// ```
///
/// ## Field Attributes
///
/// ### Document Key Mapping
///
/// `#[model(key = "...")]` maps the field to a different document key, in
/// both directions:
///
/// ```rust, ignore
/// #[model(key = "user_name")]
/// name: String,
/// ```
///
/// ### Decode-Only Ignore
///
/// `#[model(ignore)]` skips the field during decoding. Encoding is NOT
/// suppressed: the field's current value is still emitted.
///
/// ```rust, ignore
/// #[model(ignore)]
/// session: String,
/// ```
///
/// ### Full Exclusion
///
/// `#[model(skip)]` removes the field from the property table entirely —
/// never decoded, never encoded, invisible to the registry.
///
/// ### Date Timestamp Scale
///
/// `#[model(scale = 1000.0)]` sets the static timestamp scale of a date
/// field (1000.0 reads and writes milliseconds). Without the attribute the
/// process-wide default applies.
///
/// ## Type Attributes
///
/// ### Disabling the `Model` Implementation
///
/// The generated `Model` implementation is empty (all configuration
/// defaults). To override hooks or the per-instance date scale, disable it
/// and write your own:
///
/// ```rust, ignore
/// #[derive(Default, Model)]
/// #[model(Model = false)]
/// struct Account { /* ... */ }
///
/// impl Model for Account {
///     fn date_scale(&self, _property: &str) -> f64 { 1000.0 }
/// }
/// ```
///
/// ### Crate Path
///
/// Generated code refers to the engine as `::mm_model`. When the crate is
/// only reachable under another name (for example through a facade
/// re-export), override the path:
///
/// ```rust, ignore
/// #[derive(Default, Model)]
/// #[model(crate = "mm_core::model")]
/// struct Person { /* ... */ }
/// ```
///
/// ## Limitations
///
/// Generic model types are not supported: model identity is the `TypeId` of
/// a concrete type. Enums, tuple structs, and unit structs are rejected.
#[proc_macro_derive(Model, attributes(model))]
pub fn derive_model(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    match derive_data::ModelStruct::parse(ast) {
        Ok(model) => impls::expand(&model).into(),
        Err(error) => error.into_compile_error().into(),
    }
}
