use crate::info::{Accessors, PropertyKind, TypeDescriptor};

// -----------------------------------------------------------------------------
// PropertyDescriptor

/// Cached, immutable metadata for one model property.
///
/// Derived once per model type by the registry: the native key, the resolved
/// document key (the key-mapping override, falling back to the native key),
/// the semantic type descriptor, the decode-ignore flag, the static date
/// scale, and the generated accessor table.
///
/// Document-key uniqueness is not enforced. Two properties mapping to the
/// same document key is caller error: last write wins on decode, and the
/// later property wins in the encoded mapping.
#[derive(Clone, Debug)]
pub struct PropertyDescriptor {
    native_key: &'static str,
    document_key: &'static str,
    descriptor: &'static TypeDescriptor,
    ignored_on_decode: bool,
    date_scale: Option<f64>,
    accessors: Accessors,
}

impl PropertyDescriptor {
    pub(crate) const fn new(
        native_key: &'static str,
        document_key: &'static str,
        descriptor: &'static TypeDescriptor,
        ignored_on_decode: bool,
        date_scale: Option<f64>,
        accessors: Accessors,
    ) -> Self {
        Self {
            native_key,
            document_key,
            descriptor,
            ignored_on_decode,
            date_scale,
            accessors,
        }
    }

    /// The identifier used to read and write the property on an instance.
    #[inline]
    pub const fn native_key(&self) -> &'static str {
        self.native_key
    }

    /// The key used in the document representation.
    #[inline]
    pub const fn document_key(&self) -> &'static str {
        self.document_key
    }

    /// The property type's descriptor.
    #[inline]
    pub const fn descriptor(&self) -> &'static TypeDescriptor {
        self.descriptor
    }

    /// The property's semantic kind.
    #[inline]
    pub const fn kind(&self) -> PropertyKind {
        self.descriptor.kind()
    }

    /// Whether the property is skipped during document decoding.
    ///
    /// Encoding is never suppressed by this flag; only omitting the property
    /// from the table entirely (`#[model(skip)]`) suppresses both directions.
    #[inline]
    pub const fn ignored_on_decode(&self) -> bool {
        self.ignored_on_decode
    }

    /// The static per-property date scale, if one was declared.
    #[inline]
    pub const fn date_scale(&self) -> Option<f64> {
        self.date_scale
    }

    /// The generated accessor table.
    #[inline]
    pub const fn accessors(&self) -> &Accessors {
        &self.accessors
    }
}
