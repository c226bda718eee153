//! Ordered and keyed collection properties.
//!
//! Collections convert element-wise, driven by the element's own
//! descriptor. Decoding is best-effort: one bad element does not fail the
//! whole collection, it is simply dropped. Nested-model construction itself
//! never fails, so for model elements the detectable failure is a
//! non-mapping element.

use std::collections::{BTreeMap, HashMap};

use serde_json::{Map, Value};

use crate::convert::{Coercion, Convert};
use crate::impls::GenericDescriptorCell;
use crate::info::{Described, ListDescriptor, MapDescriptor, PropertyKind, TypeDescriptor};

// -----------------------------------------------------------------------------
// Element rule

fn convert_element<T: Convert>(item: &Value, cx: &Coercion) -> Option<T> {
    if T::descriptor().kind() == PropertyKind::Model && !item.is_object() {
        return None;
    }
    T::from_document(item, cx)
}

// -----------------------------------------------------------------------------
// Vec

impl<T: Described> Described for Vec<T> {
    fn descriptor() -> &'static TypeDescriptor {
        static CELL: GenericDescriptorCell = GenericDescriptorCell::new();
        CELL.get_or_insert::<Self>(|| TypeDescriptor::List(ListDescriptor::new::<T>()))
    }
}

impl<T: Convert> Convert for Vec<T> {
    fn from_document(value: &Value, cx: &Coercion) -> Option<Self> {
        let items = value.as_array()?;
        Some(
            items
                .iter()
                .filter_map(|item| convert_element::<T>(item, cx))
                .collect(),
        )
    }

    fn to_document(&self, cx: &Coercion) -> Option<Value> {
        Some(Value::Array(
            self.iter()
                .filter_map(|item| item.to_document(cx))
                .collect(),
        ))
    }
}

// -----------------------------------------------------------------------------
// Keyed maps

macro_rules! impl_convert_keyed_map {
    ($($map:ident),* $(,)?) => {$(
        impl<T: Described> Described for $map<String, T> {
            fn descriptor() -> &'static TypeDescriptor {
                static CELL: GenericDescriptorCell = GenericDescriptorCell::new();
                CELL.get_or_insert::<Self>(|| TypeDescriptor::Map(MapDescriptor::new::<T>()))
            }
        }

        impl<T: Convert> Convert for $map<String, T> {
            fn from_document(value: &Value, cx: &Coercion) -> Option<Self> {
                let entries = value.as_object()?;
                Some(
                    entries
                        .iter()
                        .filter_map(|(key, item)| {
                            convert_element::<T>(item, cx).map(|element| (key.clone(), element))
                        })
                        .collect(),
                )
            }

            fn to_document(&self, cx: &Coercion) -> Option<Value> {
                Some(Value::Object(
                    self.iter()
                        .filter_map(|(key, item)| {
                            item.to_document(cx).map(|value| (key.clone(), value))
                        })
                        .collect::<Map<String, Value>>(),
                ))
            }
        }
    )*};
}

impl_convert_keyed_map!(HashMap, BTreeMap);

// -----------------------------------------------------------------------------
// Tests
