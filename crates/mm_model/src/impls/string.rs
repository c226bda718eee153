//! String properties.

use serde_json::Value;

use crate::convert::{Coercion, Convert};
use crate::info::{Described, TypeDescriptor};

impl Described for String {
    fn descriptor() -> &'static TypeDescriptor {
        static DESC: TypeDescriptor = TypeDescriptor::String;
        &DESC
    }
}

impl Convert for String {
    fn from_document(value: &Value, _cx: &Coercion) -> Option<Self> {
        value.as_str().map(ToOwned::to_owned)
    }

    fn to_document(&self, _cx: &Coercion) -> Option<Value> {
        Some(Value::String(self.clone()))
    }
}
