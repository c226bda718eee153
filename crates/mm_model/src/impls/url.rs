//! URL properties.
//!
//! Decoding parses a document string with [`url::Url::parse`]; encoding
//! emits the canonical string form.

use serde_json::Value;
use url::Url;

use crate::convert::{Coercion, Convert};
use crate::info::{Described, TypeDescriptor};

impl Described for Url {
    fn descriptor() -> &'static TypeDescriptor {
        static DESC: TypeDescriptor = TypeDescriptor::Url;
        &DESC
    }
}

impl Convert for Url {
    fn from_document(value: &Value, _cx: &Coercion) -> Option<Self> {
        value.as_str().and_then(|raw| Url::parse(raw).ok())
    }

    fn to_document(&self, _cx: &Coercion) -> Option<Value> {
        Some(Value::String(String::from(self.as_str())))
    }
}

// -----------------------------------------------------------------------------
// Tests
