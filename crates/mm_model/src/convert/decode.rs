use serde_json::Value;

use super::{Coercion, Mode, unconvertible};
use crate::info::{PropertyDescriptor, PropertyKind};
use crate::model::{Introspect, Model};

// -----------------------------------------------------------------------------
// Decode driver

/// Decodes a document value into `model`, in place.
///
/// The input is expected to be a keyed mapping; anything else is a no-op
/// and the instance keeps its current state. Properties whose document key
/// is absent keep their current values, and properties marked
/// ignored-on-decode are never touched. Decoding never fails: incompatible
/// values degrade silently, except for date/URL properties with no usable
/// interpretation, which are reported as programming errors.
///
/// # Examples
///
/// ```
/// use mm_model::derive::Model;
/// use serde_json::json;
///
/// #[derive(Default, Model)]
/// struct Reading {
///     sensor: String,
///     value: f64,
/// }
///
/// let mut reading = Reading {
///     sensor: "unknown".into(),
///     value: -1.0,
/// };
///
/// // Only present keys are applied.
/// mm_model::convert::decode(&mut reading, &json!({ "value": 21.5 }));
/// assert_eq!(reading.sensor, "unknown");
/// assert_eq!(reading.value, 21.5);
///
/// // A non-mapping input changes nothing.
/// mm_model::convert::decode(&mut reading, &json!("bogus"));
/// assert_eq!(reading.value, 21.5);
/// ```
pub fn decode<M: Model>(model: &mut M, value: &Value) {
    let Some(entries) = value.as_object() else {
        return;
    };

    let info = crate::registry::global().info::<M>();
    for property in info.descriptors() {
        if property.ignored_on_decode() {
            continue;
        }
        let Some(raw) = entries.get(property.document_key()) else {
            continue;
        };
        decode_property(model, property, raw, Mode::Document);
    }
}

/// Applies one property: hook first (document mode, hookable kinds), then
/// the built-in rule for the property's kind.
pub(crate) fn decode_property<M: Model>(
    model: &mut M,
    property: &PropertyDescriptor,
    raw: &Value,
    mode: Mode,
) {
    let kind = property.kind();

    if mode == Mode::Document && kind.is_hookable() {
        if let Some(object) = model.object_from_document(property.native_key(), raw) {
            if (property.accessors().assign)(model, object) {
                return;
            }
            // A hook value of the wrong dynamic type falls through to the
            // built-in rule.
        }
    }

    let cx = Coercion::new(model.date_scale(property.native_key()), mode);
    let assigned = (property.accessors().decode)(model, raw, &cx);

    if !assigned
        && mode == Mode::Document
        && matches!(kind, PropertyKind::Date | PropertyKind::Url)
    {
        unconvertible(M::model_name(), property.native_key(), kind);
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::derive::Model;
    use crate::{Model, ModelExt};

    #[derive(Default, Model)]
    struct Person {
        #[model(key = "user_name")]
        name: String,
        age: i64,
        #[model(ignore)]
        session: String,
        lover: Option<Box<Person>>,
        hobbies: Vec<String>,
    }

    #[test]
    fn decodes_present_keys_only() {
        let person = Person::from_document(&json!({
            "user_name": "Yu",
            "hobbies": ["shopping", "dancing"],
        }));
        assert_eq!(person.name, "Yu");
        assert_eq!(person.age, 0);
        assert_eq!(person.hobbies, ["shopping", "dancing"]);
    }

    #[test]
    fn empty_document_changes_nothing() {
        let mut person = Person {
            name: "Dark".into(),
            age: 24,
            ..Person::default()
        };
        person.merge_document(&json!({}));
        assert_eq!(person.name, "Dark");
        assert_eq!(person.age, 24);
    }

    #[test]
    fn non_mapping_document_is_a_noop() {
        let mut person = Person {
            age: 24,
            ..Person::default()
        };
        person.merge_document(&json!([1, 2, 3]));
        assert_eq!(person.age, 24);
        person.merge_document(&json!(null));
        assert_eq!(person.age, 24);
    }

    #[test]
    fn key_mapping_applies_on_decode() {
        let person = Person::from_document(&json!({ "user_name": "Linda", "name": "wrong" }));
        assert_eq!(person.name, "Linda");
    }

    #[test]
    fn ignored_property_is_never_decoded() {
        let person = Person::from_document(&json!({ "session": "abc123" }));
        assert_eq!(person.session, "");
    }

    #[test]
    fn nested_model_is_always_constructed() {
        let person = Person::from_document(&json!({
            "lover": { "user_name": "Yu", "age": 16 },
        }));
        let lover = person.lover.expect("nested instance must be constructed");
        assert_eq!(lover.name, "Yu");
        assert_eq!(lover.age, 16);

        // A malformed fragment still constructs an (empty) instance...
        let person = Person::from_document(&json!({ "lover": 5 }));
        let lover = person.lover.expect("nested instance must be constructed");
        assert_eq!(lover.name, "");

        // ...while an explicit null clears the optional slot.
        let mut person = Person {
            lover: Some(Box::default()),
            ..Person::default()
        };
        person.merge_document(&json!({ "lover": null }));
        assert!(person.lover.is_none());
    }

    #[test]
    fn incompatible_scalar_keeps_default() {
        let person = Person::from_document(&json!({ "age": "twenty-four" }));
        assert_eq!(person.age, 0);
    }

    #[test]
    fn hook_takes_precedence_over_builtin_rule() {
        #[derive(Default, Model)]
        #[model(Model = false)]
        struct Upper {
            name: String,
        }

        impl Model for Upper {
            fn object_from_document(
                &self,
                property: &str,
                value: &serde_json::Value,
            ) -> Option<Box<dyn core::any::Any>> {
                (property == "name")
                    .then(|| value.as_str().map(|s| Box::new(s.to_uppercase()) as Box<dyn core::any::Any>))
                    .flatten()
            }
        }

        let upper = Upper::from_document(&json!({ "name": "quiet" }));
        assert_eq!(upper.name, "QUIET");
    }

    #[test]
    fn wrong_typed_hook_value_falls_through() {
        #[derive(Default, Model)]
        #[model(Model = false)]
        struct Sloppy {
            count: i64,
        }

        impl Model for Sloppy {
            fn object_from_document(
                &self,
                _property: &str,
                _value: &serde_json::Value,
            ) -> Option<Box<dyn core::any::Any>> {
                // Wrong type on purpose: the engine must ignore it.
                Some(Box::new("not a number".to_string()))
            }
        }

        let sloppy = Sloppy::from_document(&json!({ "count": 3 }));
        assert_eq!(sloppy.count, 3);
    }

    // Release builds log and skip instead; the assertion only exists where
    // the panic does.
    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "cannot decode")]
    fn undecodable_date_is_a_programmer_error() {
        #[derive(Default, Model)]
        struct Broken {
            at: Option<chrono::DateTime<chrono::Utc>>,
        }

        let _ = Broken::from_document(&json!({ "at": "tomorrow" }));
    }

    #[test]
    fn duplicate_document_keys_last_write_wins() {
        #[derive(Default, Model)]
        struct Clash {
            first: i64,
            #[model(key = "first")]
            second: i64,
        }

        let clash = Clash::from_document(&json!({ "first": 7 }));
        // Both properties read the same key; the later one also gets it.
        assert_eq!(clash.first, 7);
        assert_eq!(clash.second, 7);
    }
}
