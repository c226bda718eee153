//! The opaque pass-through.
//!
//! A property declared as [`Value`] carries its document fragment verbatim
//! in both directions. This is the explicit escape hatch for shapes the
//! engine does not understand; any other unsupported field type is a
//! compile error.

use serde_json::Value;

use crate::convert::{Coercion, Convert};
use crate::info::{Described, TypeDescriptor};

impl Described for Value {
    fn descriptor() -> &'static TypeDescriptor {
        static DESC: TypeDescriptor = TypeDescriptor::Opaque;
        &DESC
    }
}

impl Convert for Value {
    fn from_document(value: &Value, _cx: &Coercion) -> Option<Self> {
        Some(value.clone())
    }

    fn to_document(&self, _cx: &Coercion) -> Option<Value> {
        Some(self.clone())
    }
}

// -----------------------------------------------------------------------------
// Tests
