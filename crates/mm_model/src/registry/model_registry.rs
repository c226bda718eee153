use core::any::TypeId;
use std::sync::{Mutex, PoisonError};

use mm_utils::TypeIdMap;

use crate::info::ModelInfo;
use crate::model::Introspect;

// -----------------------------------------------------------------------------
// ModelRegistry

/// A registry of model descriptor lists, keyed by type identity.
///
/// Entries are built lazily: the first [`info`](Self::info) call for a type
/// runs the introspection pass and stores the leaked `&'static` result;
/// every later call is a map lookup. Entries are never evicted and are
/// immutable after construction.
///
/// Concurrent first access is serialized by a mutex scoped to the
/// check-or-build sequence, so the build happens at most once per type and
/// readers never observe a partial descriptor list. Conversion work runs
/// against the returned `&'static` reference, outside the lock.
///
/// The process-wide instance is available through [`global`]; separate
/// registries are only useful for tests.
pub struct ModelRegistry {
    entries: Mutex<TypeIdMap<&'static ModelInfo>>,
}

impl ModelRegistry {
    /// Creates an empty registry.
    #[inline]
    pub const fn new() -> Self {
        Self {
            entries: Mutex::new(TypeIdMap::new()),
        }
    }

    /// Returns the cached [`ModelInfo`] of `M`, building it on first access.
    ///
    /// # Examples
    ///
    /// ```
    /// use mm_model::derive::Model;
    /// use mm_model::registry;
    ///
    /// #[derive(Default, Model)]
    /// struct Marker {
    ///     label: String,
    /// }
    ///
    /// let first = registry::global().info::<Marker>();
    /// let second = registry::global().info::<Marker>();
    /// // One build, one allocation: both lookups observe the same list.
    /// assert!(core::ptr::eq(first, second));
    /// ```
    pub fn info<M: Introspect>(&self) -> &'static ModelInfo {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        *entries.get_or_insert(TypeId::of::<M>(), || {
            Box::leak(Box::new(ModelInfo::new::<M>()))
        })
    }

    /// Returns the cached [`ModelInfo`] for a `TypeId`, if already built.
    ///
    /// Unlike [`info`](Self::info), this never builds an entry.
    pub fn get(&self, type_id: TypeId) -> Option<&'static ModelInfo> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
            .copied()
    }

    /// Whether an entry for `M` has been built.
    pub fn contains<M: Introspect>(&self) -> bool {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_type::<M>()
    }

    /// Returns the number of built entries.
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns `true` if no entry has been built yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ModelRegistry {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

// -----------------------------------------------------------------------------
// Global registry

/// Returns the process-wide [`ModelRegistry`].
///
/// Populated lazily, never evicted, effectively immutable after the first
/// build for a given type.
pub fn global() -> &'static ModelRegistry {
    static REGISTRY: ModelRegistry = ModelRegistry::new();
    &REGISTRY
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::ModelRegistry;
    use crate::impls::PropertyTableCell;
    use crate::info::{Accessors, Property};
    use crate::model::Introspect;

    static BUILDS: AtomicUsize = AtomicUsize::new(0);

    #[derive(Default)]
    struct Counted {
        value: i64,
    }

    impl Introspect for Counted {
        fn properties() -> &'static [Property] {
            // Counts introspection passes, not cache hits: the registry must
            // call this at most once.
            BUILDS.fetch_add(1, Ordering::SeqCst);
            static CELL: PropertyTableCell = PropertyTableCell::new();
            CELL.get_or_init(|| {
                vec![Property::new::<i64>(
                    "value",
                    Accessors {
                        decode: |instance, value, cx| {
                            let instance = instance.downcast_mut::<Counted>().unwrap();
                            match <i64 as crate::Convert>::from_document(value, cx) {
                                Some(v) => {
                                    instance.value = v;
                                    true
                                }
                                None => false,
                            }
                        },
                        encode: |instance, cx| {
                            let instance = instance.downcast_ref::<Counted>().unwrap();
                            <i64 as crate::Convert>::to_document(&instance.value, cx)
                        },
                        assign: |instance, object| {
                            let instance = instance.downcast_mut::<Counted>().unwrap();
                            match object.downcast::<i64>() {
                                Ok(v) => {
                                    instance.value = *v;
                                    true
                                }
                                Err(_) => false,
                            }
                        },
                    },
                )]
            })
        }

        fn model_name() -> &'static str {
            "Counted"
        }
    }

    impl crate::Model for Counted {}

    #[test]
    fn concurrent_first_access_builds_once() {
        let registry = ModelRegistry::new();
        let mut seen = Vec::new();

        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| scope.spawn(|| registry.info::<Counted>()))
                .collect();
            for handle in handles {
                seen.push(handle.join().unwrap());
            }
        });

        let first = seen[0];
        assert_eq!(first.len(), 1);
        for info in &seen {
            assert!(core::ptr::eq(first, *info));
        }
        assert_eq!(BUILDS.load(Ordering::SeqCst), 1);

        // The cached list is also usable for conversion afterwards.
        let mut model = Counted::default();
        crate::convert::decode(&mut model, &serde_json::json!({ "value": 9 }));
        assert_eq!(model.value, 9);
    }

    #[derive(Default)]
    struct Plain;

    impl Introspect for Plain {
        fn properties() -> &'static [Property] {
            &[]
        }

        fn model_name() -> &'static str {
            "Plain"
        }
    }

    #[test]
    fn get_never_builds() {
        let registry = ModelRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.get(core::any::TypeId::of::<Plain>()).is_none());
        registry.info::<Plain>();
        assert_eq!(registry.len(), 1);
        assert!(registry.contains::<Plain>());
        assert!(registry.info::<Plain>().is_empty());
    }
}
