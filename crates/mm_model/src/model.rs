use core::any::Any;
use std::collections::HashMap;

use serde_json::Value;

use crate::info::Property;

// -----------------------------------------------------------------------------
// Introspect

/// The structural surface of a model type.
///
/// Generated by [`#[derive(Model)]`](mm_model_derive::Model): the ordered
/// raw property table plus the static override tables collected from field
/// attributes. The [registry](crate::registry) reads this surface exactly
/// once per type and caches the combined result as a
/// [`ModelInfo`](crate::info::ModelInfo).
///
/// Manual implementations are possible (the tables are plain slices) but
/// rarely needed.
pub trait Introspect: Any + Send + Sync {
    /// The ordered raw property table.
    ///
    /// Built on first access and stored for the process lifetime.
    fn properties() -> &'static [Property]
    where
        Self: Sized;

    /// The model's name, used in diagnostics.
    fn model_name() -> &'static str
    where
        Self: Sized;

    /// Native key → document key overrides; identity for absent keys.
    fn document_key_map() -> &'static [(&'static str, &'static str)]
    where
        Self: Sized,
    {
        &[]
    }

    /// Native keys skipped during document decoding (encoding is unaffected).
    fn ignored_on_decode() -> &'static [&'static str]
    where
        Self: Sized,
    {
        &[]
    }

    /// Static per-property date timestamp scales.
    fn date_scales() -> &'static [(&'static str, f64)]
    where
        Self: Sized,
    {
        &[]
    }
}

// -----------------------------------------------------------------------------
// Model

/// The configuration surface of a model type.
///
/// All methods have defaults; the derive emits an empty implementation. To
/// override a hook, disable the generated implementation with
/// `#[model(Model = false)]` and write your own:
///
/// ```
/// use core::any::Any;
/// use mm_model::{Model, ModelExt, Value, derive::Model};
/// use serde_json::json;
///
/// #[derive(Default, Model)]
/// #[model(Model = false)]
/// struct Account {
///     name: String,
/// }
///
/// impl Model for Account {
///     // Accept `{"name": {"first": "A", "last": "B"}}` by flattening it.
///     fn object_from_document(&self, property: &str, value: &Value) -> Option<Box<dyn Any>> {
///         if property == "name" {
///             let first = value.get("first")?.as_str()?;
///             let last = value.get("last")?.as_str()?;
///             return Some(Box::new(format!("{first} {last}")));
///         }
///         None
///     }
/// }
///
/// let account = Account::from_document(&json!({
///     "name": { "first": "Ellen", "last": "Ripley" },
/// }));
/// assert_eq!(account.name, "Ellen Ripley");
/// ```
///
/// The engine never mutates this surface; it re-reads it on every decode and
/// encode call. Only the structural descriptor list is cached.
pub trait Model: Introspect + Default {
    /// The timestamp scale for a date property, per instance.
    ///
    /// The default resolves the property's static `#[model(scale = ...)]`
    /// attribute and falls back to the process-wide default (1.0, meaning
    /// seconds). A scale of 1000.0 reads and writes milliseconds.
    fn date_scale(&self, property: &str) -> f64
    where
        Self: Sized,
    {
        crate::registry::global().info::<Self>().date_scale(property)
    }

    /// Decode hook: converts a raw document value for `property` yourself.
    ///
    /// Consulted first for primitive, string, date, URL, and opaque
    /// properties. Return a boxed value of the property's native type; a
    /// value of the wrong type falls through to the built-in rule.
    fn object_from_document(&self, property: &str, value: &Value) -> Option<Box<dyn Any>> {
        let _ = (property, value);
        None
    }

    /// Encode hook: produces the document value for `property` yourself.
    ///
    /// Consulted first for primitive, string, date, URL, and opaque
    /// properties. The returned value is emitted verbatim under the
    /// property's document key.
    fn document_from_object(&self, property: &str) -> Option<Value> {
        let _ = property;
        None
    }
}

// -----------------------------------------------------------------------------
// ModelExt

/// Conversion entry points, available on every [`Model`].
///
/// # Examples
///
/// ```
/// use mm_model::{ModelExt, derive::Model};
/// use serde_json::json;
///
/// #[derive(Default, Model)]
/// struct Person {
///     name: String,
///     age: i64,
/// }
///
/// let person = Person::from_document(&json!({ "name": "Dara", "age": 24 }));
/// assert_eq!(person.age, 24);
///
/// let doc = person.to_document();
/// assert_eq!(doc, json!({ "name": "Dara", "age": 24 }));
/// ```
pub trait ModelExt: Model + Sized {
    /// Decodes a fresh instance from a document value.
    ///
    /// A non-mapping input yields a default-constructed instance; missing
    /// keys leave their properties at the default value. Decoding never
    /// fails.
    fn from_document(value: &Value) -> Self {
        let mut model = Self::default();
        crate::convert::decode(&mut model, value);
        model
    }

    /// Decodes a document value into this instance, in place.
    ///
    /// Properties absent from the document keep their current values.
    fn merge_document(&mut self, value: &Value) {
        crate::convert::decode(self, value);
    }

    /// Encodes this instance to a document mapping.
    ///
    /// Unset properties are omitted entirely; a `null` is never emitted as a
    /// placeholder.
    fn to_document(&self) -> Value {
        crate::convert::encode(self)
    }

    /// Decodes a sequence of instances from a document sequence.
    ///
    /// Elements that are not mappings are dropped; a non-sequence input
    /// yields an empty vector.
    ///
    /// ```
    /// use mm_model::{ModelExt, derive::Model};
    /// use serde_json::json;
    ///
    /// #[derive(Default, Model)]
    /// struct Tag {
    ///     label: String,
    /// }
    ///
    /// let tags = Tag::array_from_document(&json!([
    ///     { "label": "red" },
    ///     42, // dropped
    ///     { "label": "blue" },
    /// ]));
    /// assert_eq!(tags.len(), 2);
    /// assert_eq!(tags[1].label, "blue");
    /// ```
    fn array_from_document(value: &Value) -> Vec<Self> {
        let Some(items) = value.as_array() else {
            return Vec::new();
        };
        items
            .iter()
            .filter(|item| item.is_object())
            .map(Self::from_document)
            .collect()
    }

    /// Decodes a keyed collection of instances from a document mapping.
    ///
    /// Entries whose values are not mappings are dropped; a non-mapping
    /// input yields an empty map.
    fn dictionary_from_document(value: &Value) -> HashMap<String, Self> {
        let Some(entries) = value.as_object() else {
            return HashMap::new();
        };
        entries
            .iter()
            .filter(|(_, item)| item.is_object())
            .map(|(key, item)| (key.clone(), Self::from_document(item)))
            .collect()
    }

    /// Writes a flat snapshot of the current property state.
    ///
    /// See [`archive::snapshot`](crate::archive::snapshot).
    fn snapshot(&self) -> Value {
        crate::archive::snapshot(self)
    }

    /// Restores property state from a snapshot, in place.
    ///
    /// See [`archive::restore`](crate::archive::restore).
    fn restore(&mut self, snapshot: &Value) {
        crate::archive::restore(self, snapshot);
    }

    /// Returns the document key for a native key, if the property exists.
    fn document_key(property: &str) -> Option<&'static str> {
        crate::registry::global()
            .info::<Self>()
            .document_key(property)
    }
}

impl<M: Model> ModelExt for M {}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::derive::Model;
    use crate::{ModelExt, registry};

    #[derive(Default, Model)]
    struct Gadget {
        #[model(key = "gadget_name")]
        name: String,
        serial: i64,
        // Not a convertible type; `skip` keeps it invisible to the engine.
        #[model(skip)]
        scratch: std::time::Duration,
    }

    #[test]
    fn skip_excludes_the_property_entirely() {
        let info = registry::global().info::<Gadget>();
        assert_eq!(info.len(), 2);
        assert!(info.descriptor("scratch").is_none());

        let gadget = Gadget {
            name: "probe".into(),
            serial: 7,
            scratch: std::time::Duration::from_secs(1),
        };
        let doc = gadget.to_document();
        assert!(doc.get("scratch").is_none());

        let back = Gadget::from_document(&json!({
            "gadget_name": "probe",
            "scratch": 99,
        }));
        assert_eq!(back.scratch, std::time::Duration::default());
        assert_eq!(back.name, "probe");
    }

    #[test]
    fn document_key_lookup() {
        assert_eq!(Gadget::document_key("name"), Some("gadget_name"));
        assert_eq!(Gadget::document_key("serial"), Some("serial"));
        assert_eq!(Gadget::document_key("scratch"), None);
        assert_eq!(Gadget::document_key("no_such_key"), None);
    }

    #[test]
    fn array_convenience_drops_non_mappings() {
        let gadgets = Gadget::array_from_document(&json!([
            { "gadget_name": "a", "serial": 1 },
            null,
            { "gadget_name": "b", "serial": 2 },
        ]));
        assert_eq!(gadgets.len(), 2);
        assert_eq!(gadgets[0].serial, 1);
        assert_eq!(gadgets[1].name, "b");

        assert!(Gadget::array_from_document(&json!("nope")).is_empty());
    }

    #[test]
    fn collection_element_map_is_exposed() {
        use crate::info::PropertyKind;

        #[derive(Default, Model)]
        struct Holder {
            friends: Vec<Gadget>,
            labels: Vec<String>,
            count: i64,
        }

        let info = registry::global().info::<Holder>();
        assert_eq!(
            info.collection_element("friends").unwrap().kind(),
            PropertyKind::Model,
        );
        let element = info.collection_element("friends").unwrap();
        assert!(element.as_model().unwrap().is::<Gadget>());
        assert_eq!(
            info.collection_element("labels").unwrap().kind(),
            PropertyKind::String,
        );
        assert!(info.collection_element("count").is_none());
    }
}
