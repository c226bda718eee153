//! Boxed properties.
//!
//! `Box<T>` is transparent, like `Option<T>`. Its main use is breaking the
//! layout cycle of recursive model types (`Person { lover: Option<Box<Person>> }`).

use serde_json::Value;

use crate::convert::{Coercion, Convert};
use crate::info::{Described, TypeDescriptor};

impl<T: Described> Described for Box<T> {
    #[inline]
    fn descriptor() -> &'static TypeDescriptor {
        T::descriptor()
    }
}

impl<T: Convert> Convert for Box<T> {
    fn from_document(value: &Value, cx: &Coercion) -> Option<Self> {
        T::from_document(value, cx).map(Box::new)
    }

    fn to_document(&self, cx: &Coercion) -> Option<Value> {
        (**self).to_document(cx)
    }
}
