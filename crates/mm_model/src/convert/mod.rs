//! The bidirectional coercion engine.
//!
//! [`decode`] and [`encode`] drive a model's cached descriptor list: per
//! property they consult the instance's custom hooks (for hookable kinds),
//! then apply the built-in rule for the property's semantic kind. Decoding
//! is best-effort — structural absence and incompatible values are silent —
//! with one exception: a date or URL property that cannot be interpreted at
//! all is a programming error in the model declaration and is reported
//! loudly (panic in debug builds, [`log::error!`] in release builds).

use serde_json::Value;

use crate::info::{Described, PropertyKind};

// -----------------------------------------------------------------------------
// Modules

mod decode;
mod encode;

// -----------------------------------------------------------------------------
// Exports

pub use decode::decode;
pub use encode::encode;

pub(crate) use decode::decode_property;
pub(crate) use encode::encode_with;

// -----------------------------------------------------------------------------
// Coercion context

/// Which key space and rule set a conversion pass uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// The document representation: document keys, custom hooks, key
    /// mapping.
    Document,
    /// The flat archival representation: native keys, no hooks.
    Archive,
}

/// Per-property conversion context, handed to every [`Convert`] call.
///
/// Carries the effective date timestamp scale of the property being
/// converted and the conversion [`Mode`]. The drivers construct one per
/// property; collections pass it through to their elements.
#[derive(Debug, Clone, Copy)]
pub struct Coercion {
    scale: f64,
    mode: Mode,
}

impl Coercion {
    /// Creates a context with the given date scale and mode.
    #[inline]
    pub const fn new(scale: f64, mode: Mode) -> Self {
        Self { scale, mode }
    }

    /// The effective date timestamp scale (1.0 means seconds).
    #[inline]
    pub const fn scale(&self) -> f64 {
        self.scale
    }

    /// The conversion mode.
    #[inline]
    pub const fn mode(&self) -> Mode {
        self.mode
    }
}

impl Default for Coercion {
    /// A document-mode context with the process-wide default date scale.
    fn default() -> Self {
        Self::new(crate::impls::default_date_scale(), Mode::Document)
    }
}

// -----------------------------------------------------------------------------
// Convert

/// Bidirectional conversion between a native value and a document value.
///
/// Implemented for every built-in property type and generated for model
/// types by [`#[derive(Model)]`](mm_model_derive::Model).
///
/// `from_document` returns `None` when the document value is not
/// convertible; the caller decides what that means (a skipped property, a
/// dropped collection element, or a programmer-error signal for dates and
/// URLs). `to_document` returns `None` when the value is unset and its key
/// must be omitted.
///
/// # Examples
///
/// ```
/// use mm_model::{Coercion, Convert};
/// use serde_json::json;
///
/// let cx = Coercion::default();
/// assert_eq!(u32::from_document(&json!(7), &cx), Some(7));
/// assert_eq!(u32::from_document(&json!("seven"), &cx), None);
/// assert_eq!(7_u32.to_document(&cx), Some(json!(7)));
/// ```
pub trait Convert: Described + Sized {
    /// Converts a document value to a native value.
    fn from_document(value: &Value, cx: &Coercion) -> Option<Self>;

    /// Converts this value to its document representation.
    fn to_document(&self, cx: &Coercion) -> Option<Value>;
}

// -----------------------------------------------------------------------------
// Programmer-error signal

/// Reports a date/URL property that cannot be interpreted automatically.
///
/// This is a defect in the model declaration, not in the input: the model
/// declared a kind the engine cannot coerce from the supplied value and
/// provided no hook. Debug builds stop here; release builds log and leave
/// the property unset, and decoding of the remaining properties proceeds.
#[cold]
#[track_caller]
pub(crate) fn unconvertible(model: &str, property: &str, kind: PropertyKind) {
    #[cfg(debug_assertions)]
    panic!(
        "cannot decode `{model}.{property}`: a {kind} property needs a custom hook or a compatible document value"
    );

    #[cfg(not(debug_assertions))]
    log::error!(
        "cannot decode `{model}.{property}`: a {kind} property needs a custom hook or a compatible document value; leaving it unset"
    );
}
