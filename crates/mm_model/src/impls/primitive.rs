//! Boolean, integer, and float properties.
//!
//! Numbers convert with widening/narrowing checks rather than the permissive
//! anything-goes assignment of dynamic hosts: a document number that does
//! not fit the native type leaves the property unchanged.

use serde_json::Value;

use crate::convert::{Coercion, Convert};
use crate::info::{Described, PrimitiveKind, TypeDescriptor};

// -----------------------------------------------------------------------------
// bool

impl Described for bool {
    fn descriptor() -> &'static TypeDescriptor {
        static DESC: TypeDescriptor = TypeDescriptor::Primitive(PrimitiveKind::Bool);
        &DESC
    }
}

impl Convert for bool {
    fn from_document(value: &Value, _cx: &Coercion) -> Option<Self> {
        value.as_bool()
    }

    fn to_document(&self, _cx: &Coercion) -> Option<Value> {
        Some(Value::Bool(*self))
    }
}

// -----------------------------------------------------------------------------
// Integers

macro_rules! impl_convert_int {
    ($($ty:ty),* $(,)?) => {$(
        impl Described for $ty {
            fn descriptor() -> &'static TypeDescriptor {
                static DESC: TypeDescriptor = TypeDescriptor::Primitive(PrimitiveKind::Int);
                &DESC
            }
        }

        impl Convert for $ty {
            fn from_document(value: &Value, _cx: &Coercion) -> Option<Self> {
                if let Some(signed) = value.as_i64() {
                    return <$ty>::try_from(signed).ok();
                }
                value.as_u64().and_then(|unsigned| <$ty>::try_from(unsigned).ok())
            }

            fn to_document(&self, _cx: &Coercion) -> Option<Value> {
                Some(Value::from(*self))
            }
        }
    )*};
}

impl_convert_int!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

// -----------------------------------------------------------------------------
// Floats

impl Described for f32 {
    fn descriptor() -> &'static TypeDescriptor {
        static DESC: TypeDescriptor = TypeDescriptor::Primitive(PrimitiveKind::Float);
        &DESC
    }
}

impl Convert for f32 {
    fn from_document(value: &Value, _cx: &Coercion) -> Option<Self> {
        value.as_f64().map(|float| float as f32)
    }

    fn to_document(&self, _cx: &Coercion) -> Option<Value> {
        serde_json::Number::from_f64(f64::from(*self)).map(Value::Number)
    }
}

impl Described for f64 {
    fn descriptor() -> &'static TypeDescriptor {
        static DESC: TypeDescriptor = TypeDescriptor::Primitive(PrimitiveKind::Float);
        &DESC
    }
}

impl Convert for f64 {
    fn from_document(value: &Value, _cx: &Coercion) -> Option<Self> {
        value.as_f64()
    }

    fn to_document(&self, _cx: &Coercion) -> Option<Value> {
        serde_json::Number::from_f64(*self).map(Value::Number)
    }
}

// -----------------------------------------------------------------------------
// Tests
