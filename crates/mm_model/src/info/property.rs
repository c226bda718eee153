use core::any::Any;

use serde_json::Value;

use crate::convert::Coercion;
use crate::info::{Described, TypeDescriptor};

// -----------------------------------------------------------------------------
// Accessor function types

/// Decodes a document value into one property of an erased model instance.
///
/// Returns `true` if the property was assigned.
pub type DecodeFn = fn(&mut dyn Any, &Value, &Coercion) -> bool;

/// Encodes one property of an erased model instance to a document value.
///
/// `None` means the property is unset and its key must be omitted.
pub type EncodeFn = fn(&dyn Any, &Coercion) -> Option<Value>;

/// Assigns an already-converted value (from a custom hook) to one property.
///
/// Returns `false` if the boxed value has the wrong dynamic type, in which
/// case the caller falls through to the built-in coercion rule.
pub type AssignFn = fn(&mut dyn Any, Box<dyn Any>) -> bool;

/// The generated get/set surface of one property.
///
/// The function pointers downcast the erased instance to the concrete model
/// type; the conversion drivers guarantee they are only invoked with it.
#[derive(Clone, Copy)]
pub struct Accessors {
    pub decode: DecodeFn,
    pub encode: EncodeFn,
    pub assign: AssignFn,
}

impl core::fmt::Debug for Accessors {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Accessors").finish_non_exhaustive()
    }
}

// -----------------------------------------------------------------------------
// Property

/// One entry of a model's raw property table, as generated by
/// [`#[derive(Model)]`](mm_model_derive::Model).
///
/// This is the pre-registry form: the native key, the property type's
/// delayed descriptor, and the accessor table. The registry combines it with
/// the model's key-mapping and ignore tables into a cached
/// [`PropertyDescriptor`](crate::info::PropertyDescriptor).
#[derive(Clone, Debug)]
pub struct Property {
    name: &'static str,
    // The descriptor is resolved on first access; a function pointer delays it.
    descriptor: fn() -> &'static TypeDescriptor,
    accessors: Accessors,
}

impl Property {
    /// Creates a new `Property` for the given native key and type `T`.
    pub const fn new<T: Described>(name: &'static str, accessors: Accessors) -> Self {
        Self {
            name,
            descriptor: T::descriptor,
            accessors,
        }
    }

    /// Returns the native key.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the property type's [`TypeDescriptor`].
    #[inline]
    pub fn descriptor(&self) -> &'static TypeDescriptor {
        (self.descriptor)()
    }

    /// Returns the accessor table.
    #[inline]
    pub const fn accessors(&self) -> &Accessors {
        &self.accessors
    }
}
