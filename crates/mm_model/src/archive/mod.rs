//! The flat archival path.
//!
//! [`snapshot`] and [`restore`] visit the same cached descriptor list as the
//! document converters but write a flat key/value image of current property
//! state: properties are keyed by their NATIVE keys (the document-key
//! mapping does not apply), custom hooks are bypassed, and decode-ignored
//! properties are included. Nested models are snapshotted recursively in the
//! same layout.
//!
//! Dates keep their scaled-timestamp form so that one descriptor list
//! round-trips both representations.

use serde_json::Value;

use crate::convert::Mode;
use crate::model::Model;

// -----------------------------------------------------------------------------
// Snapshot / restore

/// Writes a flat snapshot of `model`'s current property state.
///
/// # Examples
///
/// ```
/// use mm_model::derive::Model;
/// use mm_model::{archive, ModelExt};
/// use serde_json::json;
///
/// #[derive(Default, Model)]
/// struct Account {
///     #[model(key = "user_name")]
///     name: String,
///     #[model(ignore)]
///     session: String,
/// }
///
/// let account = Account {
///     name: "Ripley".into(),
///     session: "abc123".into(),
/// };
///
/// // Native keys, ignored properties included.
/// let snapshot = archive::snapshot(&account);
/// assert_eq!(snapshot, json!({ "name": "Ripley", "session": "abc123" }));
///
/// // The document path keeps its own key space.
/// assert_eq!(
///     account.to_document(),
///     json!({ "user_name": "Ripley", "session": "abc123" }),
/// );
/// ```
pub fn snapshot<M: Model>(model: &M) -> Value {
    crate::convert::encode_with(model, Mode::Archive)
}

/// Restores property state from a snapshot into `model`, in place.
///
/// The mirror of [`snapshot`]: properties are read back by native key,
/// without hooks or key mapping, and decode-ignored properties ARE
/// restored. Like document decoding this is best-effort — absent keys keep
/// their current values and incompatible values are skipped silently.
pub fn restore<M: Model>(model: &mut M, snapshot: &Value) {
    let Some(entries) = snapshot.as_object() else {
        return;
    };

    let info = crate::registry::global().info::<M>();
    for property in info.descriptors() {
        let Some(raw) = entries.get(property.native_key()) else {
            continue;
        };
        crate::convert::decode_property(model, property, raw, Mode::Archive);
    }
}

// -----------------------------------------------------------------------------
// Tests
