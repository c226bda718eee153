use core::any::TypeId;

use mm_utils::hash::HashMap;

use crate::info::{PropertyDescriptor, TypeDescriptor};
use crate::model::Introspect;

// -----------------------------------------------------------------------------
// ModelInfo

/// The cached descriptor list of one model type.
///
/// Built at most once per type by the [registry](crate::registry): the raw
/// property table is combined with the model's key-mapping, ignore, and
/// date-scale tables into an ordered sequence of [`PropertyDescriptor`],
/// indexed by native key. Immutable for the process lifetime.
///
/// The order is the declaration order of the generated property table.
/// Callers must not depend on it for anything beyond encode-key iteration:
/// document mappings are unordered.
///
/// # Examples
///
/// ```
/// use mm_model::derive::Model;
/// use mm_model::registry;
///
/// #[derive(Default, Model)]
/// struct Pin {
///     #[model(key = "lat")]
///     latitude: f64,
///     longitude: f64,
/// }
///
/// let info = registry::global().info::<Pin>();
/// assert_eq!(info.len(), 2);
/// assert_eq!(info.descriptor("latitude").unwrap().document_key(), "lat");
/// assert_eq!(info.index_of("longitude"), Some(1));
/// ```
#[derive(Debug)]
pub struct ModelInfo {
    type_id: TypeId,
    type_name: &'static str,
    descriptors: Box<[PropertyDescriptor]>,
    native_indices: HashMap<&'static str, usize>,
}

impl ModelInfo {
    /// Builds the descriptor list for `M`.
    ///
    /// Ignored properties are included with the flag set rather than
    /// omitted: the encode path still needs their descriptors.
    pub(crate) fn new<M: Introspect>() -> Self {
        let key_map = M::document_key_map();
        let ignored = M::ignored_on_decode();
        let scales = M::date_scales();

        let properties = M::properties();
        let mut descriptors = Vec::with_capacity(properties.len());
        let mut native_indices = HashMap::default();

        for (index, property) in properties.iter().enumerate() {
            let native_key = property.name();
            let document_key = key_map
                .iter()
                .find(|(native, _)| *native == native_key)
                .map_or(native_key, |(_, document)| *document);
            let date_scale = scales
                .iter()
                .find(|(native, _)| *native == native_key)
                .map(|(_, scale)| *scale);

            descriptors.push(PropertyDescriptor::new(
                native_key,
                document_key,
                property.descriptor(),
                ignored.contains(&native_key),
                date_scale,
                *property.accessors(),
            ));
            native_indices.insert(native_key, index);
        }

        Self {
            type_id: TypeId::of::<M>(),
            type_name: M::model_name(),
            descriptors: descriptors.into_boxed_slice(),
            native_indices,
        }
    }

    /// Returns the `TypeId` of the described model type.
    #[inline]
    pub const fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Returns the model name.
    #[inline]
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Returns the descriptors in property-table order.
    #[inline]
    pub fn descriptors(&self) -> &[PropertyDescriptor] {
        &self.descriptors
    }

    /// Returns the descriptor for the given native key, if present.
    pub fn descriptor(&self, native_key: &str) -> Option<&PropertyDescriptor> {
        self.native_indices
            .get(native_key)
            .map(|index| &self.descriptors[*index])
    }

    /// Returns the index for the given native key, if present.
    pub fn index_of(&self, native_key: &str) -> Option<usize> {
        self.native_indices.get(native_key).copied()
    }

    /// Returns the document key for the given native key, if present.
    pub fn document_key(&self, native_key: &str) -> Option<&'static str> {
        self.descriptor(native_key)
            .map(PropertyDescriptor::document_key)
    }

    /// Returns the element descriptor of a collection property.
    ///
    /// This is the resolved collection element map of the model: `None` for
    /// unknown keys and for non-collection properties.
    pub fn collection_element(&self, native_key: &str) -> Option<&'static TypeDescriptor> {
        self.descriptor(native_key)
            .and_then(|descriptor| descriptor.descriptor().element())
    }

    /// Returns the effective static date scale for the given native key.
    ///
    /// Falls back to the process-wide default
    /// ([`default_date_scale`](crate::default_date_scale)) when the property
    /// declares no scale of its own, or when the key is unknown.
    pub fn date_scale(&self, native_key: &str) -> f64 {
        self.descriptor(native_key)
            .and_then(PropertyDescriptor::date_scale)
            .unwrap_or_else(crate::impls::default_date_scale)
    }

    /// Returns the number of properties.
    #[inline]
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Returns `true` if the model has no convertible properties.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}
