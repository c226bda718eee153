#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

// -----------------------------------------------------------------------------
// Extern Self

// `crate` inside this crate, `mm_model` in derive-generated code and doc
// tests; the alias lets both spellings resolve everywhere.
extern crate self as mm_model;

// -----------------------------------------------------------------------------
// Modules

mod model;

pub mod archive;
pub mod convert;
pub mod impls;
pub mod info;
pub mod registry;

// -----------------------------------------------------------------------------
// Top-Level exports

pub use convert::{Coercion, Convert, Mode};
pub use impls::{default_date_scale, set_default_date_scale};
pub use model::{Introspect, Model, ModelExt};

/// The generic document value exchanged with the external codec.
pub use serde_json::Value;

pub use mm_model_derive as derive;
