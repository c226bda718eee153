//! Containers for static storage of descriptors and property tables.
//!
//! Non-generic types store their [`TypeDescriptor`] in a [`DescriptorCell`]
//! (an [`OnceLock`], almost free). Generic types share one `static` across
//! all monomorphizations, so [`GenericDescriptorCell`] keys the storage by
//! `TypeId` behind an [`RwLock`]. [`PropertyTableCell`] is the same idea for
//! a model's generated property table.

use std::sync::{OnceLock, PoisonError, RwLock};

use core::any::{Any, TypeId};
use mm_utils::TypeIdMap;

use crate::info::{Property, TypeDescriptor};

// -----------------------------------------------------------------------------
// DescriptorCell

/// Static storage for the [`TypeDescriptor`] of one non-generic type.
///
/// ```ignore
/// impl Described for Position {
///     fn descriptor() -> &'static TypeDescriptor {
///         static CELL: DescriptorCell = DescriptorCell::new();
///         CELL.get_or_init(|| TypeDescriptor::Model(ModelType::of::<Position>()))
///     }
/// }
/// ```
pub struct DescriptorCell(OnceLock<TypeDescriptor>);

impl DescriptorCell {
    /// Creates an empty cell.
    #[inline]
    pub const fn new() -> Self {
        Self(OnceLock::new())
    }

    /// Returns the stored descriptor, initializing it on first access.
    #[inline]
    pub fn get_or_init(&self, f: impl FnOnce() -> TypeDescriptor) -> &TypeDescriptor {
        self.0.get_or_init(f)
    }
}

// -----------------------------------------------------------------------------
// GenericDescriptorCell

/// Static storage for the [`TypeDescriptor`]s of a generic type.
///
/// A `static` inside a generic function is shared by every instantiation,
/// so the cell stores one leaked descriptor per `TypeId`.
///
/// ```ignore
/// impl<T: Described> Described for Vec<T> {
///     fn descriptor() -> &'static TypeDescriptor {
///         static CELL: GenericDescriptorCell = GenericDescriptorCell::new();
///         CELL.get_or_insert::<Self>(|| TypeDescriptor::List(ListDescriptor::new::<T>()))
///     }
/// }
/// ```
pub struct GenericDescriptorCell(RwLock<TypeIdMap<&'static TypeDescriptor>>);

impl GenericDescriptorCell {
    /// Creates an empty cell.
    #[inline]
    pub const fn new() -> Self {
        Self(RwLock::new(TypeIdMap::new()))
    }

    /// Returns the descriptor stored for type `G`, initializing it on first
    /// access.
    pub fn get_or_insert<G: Any + ?Sized>(
        &self,
        f: impl FnOnce() -> TypeDescriptor,
    ) -> &'static TypeDescriptor {
        let type_id = TypeId::of::<G>();
        let cached = self
            .0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
            .copied();
        if let Some(descriptor) = cached {
            return descriptor;
        }
        *self
            .0
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .get_or_insert(type_id, || Box::leak(Box::new(f())))
    }
}

// -----------------------------------------------------------------------------
// PropertyTableCell

/// Static storage for a model's generated property table.
pub struct PropertyTableCell(OnceLock<Vec<Property>>);

impl PropertyTableCell {
    /// Creates an empty cell.
    #[inline]
    pub const fn new() -> Self {
        Self(OnceLock::new())
    }

    /// Returns the stored table, initializing it on first access.
    #[inline]
    pub fn get_or_init(&self, f: impl FnOnce() -> Vec<Property>) -> &[Property] {
        self.0.get_or_init(f)
    }
}
