use serde_json::{Map, Value};

use super::{Coercion, Mode};
use crate::model::Model;

// -----------------------------------------------------------------------------
// Encode driver

/// Encodes `model` to a document mapping.
///
/// Every property in the descriptor list is visited — the decode-ignore
/// flag does not suppress encoding. Unset properties omit their document
/// key entirely; a `null` placeholder is never emitted.
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
///     note: Option<String>,
/// }
///
/// let reading = Reading {
///     sensor: "kitchen".into(),
///     value: 21.5,
///     note: None,
/// };
///
/// // `note` is unset, so its key is absent (not null).
/// assert_eq!(
///     mm_model::convert::encode(&reading),
///     json!({ "sensor": "kitchen", "value": 21.5 }),
/// );
/// ```
pub fn encode<M: Model>(model: &M) -> Value {
    encode_with(model, Mode::Document)
}

/// Encodes under the given mode: document keys and hooks for
/// [`Mode::Document`], native keys and no hooks for [`Mode::Archive`].
pub(crate) fn encode_with<M: Model>(model: &M, mode: Mode) -> Value {
    let info = crate::registry::global().info::<M>();
    let mut entries = Map::with_capacity(info.len());

    for property in info.descriptors() {
        let key = match mode {
            Mode::Document => property.document_key(),
            Mode::Archive => property.native_key(),
        };

        if mode == Mode::Document && property.kind().is_hookable() {
            if let Some(value) = model.document_from_object(property.native_key()) {
                entries.insert(key.to_owned(), value);
                continue;
            }
        }

        let cx = Coercion::new(model.date_scale(property.native_key()), mode);
        if let Some(value) = (property.accessors().encode)(model, &cx) {
            entries.insert(key.to_owned(), value);
        }
    }

    Value::Object(entries)
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
        friends: Vec<Person>,
    }

    #[test]
    fn primitive_round_trip() {
        let person = Person {
            name: "Dark".into(),
            age: 24,
            ..Person::default()
        };
        let doc = person.to_document();
        let back = Person::from_document(&doc);
        assert_eq!(back.name, person.name);
        assert_eq!(back.age, person.age);
    }

    #[test]
    fn key_mapping_applies_on_encode() {
        let person = Person {
            name: "Dark".into(),
            ..Person::default()
        };
        let doc = person.to_document();
        assert_eq!(doc["user_name"], json!("Dark"));
        assert!(doc.get("name").is_none());
    }

    #[test]
    fn ignored_property_is_still_encoded() {
        let person = Person {
            session: "abc123".into(),
            ..Person::default()
        };
        let doc = person.to_document();
        assert_eq!(doc["session"], json!("abc123"));

        // ...but never applied on decode.
        let back = Person::from_document(&doc);
        assert_eq!(back.session, "");
    }

    #[test]
    fn model_collection_round_trip_preserves_order() {
        let ricky = Person {
            name: "Ricky".into(),
            age: 18,
            ..Person::default()
        };
        let linda = Person {
            name: "Linda".into(),
            age: 25,
            ..Person::default()
        };
        let boy = Person {
            name: "Dark".into(),
            age: 24,
            friends: vec![ricky, linda],
            ..Person::default()
        };

        let doc = boy.to_document();
        let friends = doc["friends"].as_array().unwrap();
        assert_eq!(friends.len(), 2);
        assert_eq!(friends[0]["user_name"], json!("Ricky"));
        assert_eq!(friends[1]["user_name"], json!("Linda"));

        let back = Person::from_document(&doc);
        assert_eq!(back.friends.len(), 2);
        assert_eq!(back.friends[0].name, "Ricky");
        assert_eq!(back.friends[0].age, 18);
        assert_eq!(back.friends[1].name, "Linda");
        assert_eq!(back.friends[1].age, 25);
    }

    #[test]
    fn nested_model_round_trip() {
        #[derive(Default, Model)]
        struct Pair {
            label: String,
            inner: Option<Box<Pair>>,
        }

        let pair = Pair {
            label: "outer".into(),
            inner: Some(Box::new(Pair {
                label: "inner".into(),
                inner: None,
            })),
        };

        let doc = pair.to_document();
        assert_eq!(doc["inner"]["label"], json!("inner"));
        // The unset nested slot is omitted, not null.
        assert!(doc["inner"].get("inner").is_none());

        let back = Pair::from_document(&doc);
        assert_eq!(back.label, "outer");
        assert_eq!(back.inner.unwrap().label, "inner");
    }

    #[test]
    fn encode_hook_takes_precedence() {
        #[derive(Default, Model)]
        #[model(Model = false)]
        struct Redacted {
            secret: String,
        }

        impl Model for Redacted {
            fn document_from_object(&self, property: &str) -> Option<serde_json::Value> {
                (property == "secret").then(|| json!("<redacted>"))
            }
        }

        let redacted = Redacted {
            secret: "hunter2".into(),
        };
        assert_eq!(redacted.to_document(), json!({ "secret": "<redacted>" }));
    }

    #[test]
    fn keyed_collection_of_models_round_trip() {
        #[derive(Default, Model)]
        struct Roster {
            people: std::collections::HashMap<String, Person>,
        }

        let mut roster = Roster::default();
        roster.people.insert(
            "lead".into(),
            Person {
                name: "Ripley".into(),
                age: 34,
                ..Person::default()
            },
        );

        let doc = roster.to_document();
        assert_eq!(doc["people"]["lead"]["user_name"], json!("Ripley"));

        let back = Roster::from_document(&doc);
        assert_eq!(back.people.len(), 1);
        assert_eq!(back.people["lead"].age, 34);
    }
}
