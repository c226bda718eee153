//! Optional properties.
//!
//! `Option<T>` is transparent for classification: the descriptor is the
//! inner type's, so an `Option<DateTime<Utc>>` property still follows the
//! date rules. `None` is the "unset" state — encoding omits the key, and a
//! document `null` clears the slot.

use serde_json::Value;

use crate::convert::{Coercion, Convert};
use crate::info::{Described, TypeDescriptor};

impl<T: Described> Described for Option<T> {
    #[inline]
    fn descriptor() -> &'static TypeDescriptor {
        T::descriptor()
    }
}

impl<T: Convert> Convert for Option<T> {
    fn from_document(value: &Value, cx: &Coercion) -> Option<Self> {
        if value.is_null() {
            return Some(None);
        }
        T::from_document(value, cx).map(Some)
    }

    fn to_document(&self, cx: &Coercion) -> Option<Value> {
        self.as_ref().and_then(|inner| inner.to_document(cx))
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::{Coercion, Convert};

    #[test]
    fn null_clears_the_slot() {
        let cx = Coercion::default();
        assert_eq!(Option::<i64>::from_document(&json!(null), &cx), Some(None));
        assert_eq!(Option::<i64>::from_document(&json!(3), &cx), Some(Some(3)));
        // An incompatible value is not the same as null: nothing converts.
        assert_eq!(Option::<i64>::from_document(&json!("x"), &cx), None);
    }

    #[test]
    fn none_encodes_to_omission() {
        let cx = Coercion::default();
        assert_eq!(None::<String>.to_document(&cx), None);
        assert_eq!(
            Some("here".to_string()).to_document(&cx),
            Some(json!("here"))
        );
    }
}
