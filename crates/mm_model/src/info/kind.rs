use core::any::TypeId;
use core::{error, fmt};

use crate::info::ModelInfo;
use crate::model::Introspect;

// -----------------------------------------------------------------------------
// PropertyKind

/// An enumeration of the semantic kinds a property can convert as.
///
/// The kind decides which coercion rule the engine applies to a property:
/// direct value conversion for [`Primitive`]/[`String`], timestamp math for
/// [`Date`], string parsing for [`Url`], recursive conversion for [`Model`],
/// element-wise conversion for [`List`]/[`Map`], and verbatim pass-through
/// for [`Opaque`].
///
/// A `PropertyKind` is obtained via [`TypeDescriptor::kind`].
///
/// [`Primitive`]: PropertyKind::Primitive
/// [`String`]: PropertyKind::String
/// [`Date`]: PropertyKind::Date
/// [`Url`]: PropertyKind::Url
/// [`Model`]: PropertyKind::Model
/// [`List`]: PropertyKind::List
/// [`Map`]: PropertyKind::Map
/// [`Opaque`]: PropertyKind::Opaque
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyKind {
    Primitive,
    String,
    Date,
    Url,
    Model,
    List,
    Map,
    Opaque,
}

impl PropertyKind {
    /// Whether per-property custom hooks are consulted for this kind.
    ///
    /// Nested models and collections convert structurally and never go
    /// through the hook surface.
    #[inline]
    pub const fn is_hookable(self) -> bool {
        !matches!(self, Self::Model | Self::List | Self::Map)
    }
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive => f.pad("Primitive"),
            Self::String => f.pad("String"),
            Self::Date => f.pad("Date"),
            Self::Url => f.pad("Url"),
            Self::Model => f.pad("Model"),
            Self::List => f.pad("List"),
            Self::Map => f.pad("Map"),
            Self::Opaque => f.pad("Opaque"),
        }
    }
}

/// Error returned when a [`TypeDescriptor`] is not the expected [`PropertyKind`].
#[derive(Debug)]
pub struct KindError {
    pub expected: PropertyKind,
    pub received: PropertyKind,
}

impl fmt::Display for KindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "property kind mismatch: expected {}, received {}",
            self.expected, self.received
        )
    }
}

impl error::Error for KindError {}

// -----------------------------------------------------------------------------
// PrimitiveKind

/// The shape of a [`PropertyKind::Primitive`] value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Bool,
    Int,
    Float,
}

// -----------------------------------------------------------------------------
// TypeDescriptor

/// The classification of a property type for conversion purposes.
///
/// Every type usable as a model property implements [`Described`] and
/// reports one `TypeDescriptor`. Composite descriptors carry further
/// structure: [`Model`] names the nested model type, and [`List`]/[`Map`]
/// carry the descriptor of their element type.
///
/// # Examples
///
/// ```
/// use mm_model::info::{Described, PropertyKind};
///
/// assert_eq!(<i32 as Described>::descriptor().kind(), PropertyKind::Primitive);
/// assert_eq!(<Vec<String> as Described>::descriptor().kind(), PropertyKind::List);
/// assert_eq!(
///     <Vec<String> as Described>::descriptor().element().unwrap().kind(),
///     PropertyKind::String,
/// );
/// ```
///
/// [`Model`]: TypeDescriptor::Model
/// [`List`]: TypeDescriptor::List
/// [`Map`]: TypeDescriptor::Map
#[derive(Debug, Clone)]
pub enum TypeDescriptor {
    Primitive(PrimitiveKind),
    String,
    Date,
    Url,
    Model(ModelType),
    List(ListDescriptor),
    Map(MapDescriptor),
    Opaque,
}

// Helper macro that implements kind-checked accessor methods like `as_model`.
macro_rules! impl_cast_method {
    ($name:ident : $kind:ident => $target:ident) => {
        /// Converts this descriptor to its inner structure, or reports the
        /// mismatching kind.
        pub const fn $name(&self) -> Result<&$target, KindError> {
            match self {
                Self::$kind(inner) => Ok(inner),
                _ => Err(KindError {
                    expected: PropertyKind::$kind,
                    received: self.kind(),
                }),
            }
        }
    };
}

impl TypeDescriptor {
    impl_cast_method!(as_model: Model => ModelType);
    impl_cast_method!(as_list: List => ListDescriptor);
    impl_cast_method!(as_map: Map => MapDescriptor);

    /// Returns the [`PropertyKind`] of this descriptor (a fast discriminator).
    pub const fn kind(&self) -> PropertyKind {
        match self {
            Self::Primitive(_) => PropertyKind::Primitive,
            Self::String => PropertyKind::String,
            Self::Date => PropertyKind::Date,
            Self::Url => PropertyKind::Url,
            Self::Model(_) => PropertyKind::Model,
            Self::List(_) => PropertyKind::List,
            Self::Map(_) => PropertyKind::Map,
            Self::Opaque => PropertyKind::Opaque,
        }
    }

    /// Returns the element descriptor of a collection, `None` for
    /// non-collection kinds.
    pub fn element(&self) -> Option<&'static TypeDescriptor> {
        match self {
            Self::List(list) => Some(list.element()),
            Self::Map(map) => Some(map.value()),
            _ => None,
        }
    }
}

// -----------------------------------------------------------------------------
// ModelType

/// The identity of a nested model type.
///
/// Carries the `TypeId`, the model name, and a delayed handle to the model's
/// cached [`ModelInfo`]. The handle is a function pointer so that building
/// one model's descriptor list never forces another's; recursive model types
/// (`Person { friends: Vec<Person> }`) resolve lazily.
#[derive(Clone, Debug)]
pub struct ModelType {
    type_id: TypeId,
    name: &'static str,
    // `ModelInfo` is built on first access; a function pointer delays it.
    info: fn() -> &'static ModelInfo,
}

impl ModelType {
    /// Creates the `ModelType` of `M`.
    pub fn of<M: Introspect>() -> Self {
        Self {
            type_id: TypeId::of::<M>(),
            name: M::model_name(),
            info: crate::registry::info_of::<M>,
        }
    }

    /// Returns the `TypeId` of the model type.
    #[inline]
    pub const fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Check if the given type matches this one.
    #[inline]
    pub fn is<M: Introspect>(&self) -> bool {
        self.type_id == TypeId::of::<M>()
    }

    /// Returns the model name.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the model's cached [`ModelInfo`], building it on first use.
    #[inline]
    pub fn info(&self) -> &'static ModelInfo {
        (self.info)()
    }
}

impl PartialEq for ModelType {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for ModelType {}

// -----------------------------------------------------------------------------
// Collection descriptors

/// Element information for an ordered collection.
#[derive(Clone, Debug)]
pub struct ListDescriptor {
    // Delayed for the same reason as `ModelType::info`.
    element: fn() -> &'static TypeDescriptor,
}

impl ListDescriptor {
    /// Creates a `ListDescriptor` with element type `T`.
    pub const fn new<T: Described>() -> Self {
        Self {
            element: T::descriptor,
        }
    }

    /// Returns the element descriptor.
    #[inline]
    pub fn element(&self) -> &'static TypeDescriptor {
        (self.element)()
    }
}

/// Value information for a keyed collection. Keys are always strings.
#[derive(Clone, Debug)]
pub struct MapDescriptor {
    value: fn() -> &'static TypeDescriptor,
}

impl MapDescriptor {
    /// Creates a `MapDescriptor` with value type `T`.
    pub const fn new<T: Described>() -> Self {
        Self {
            value: T::descriptor,
        }
    }

    /// Returns the value descriptor.
    #[inline]
    pub fn value(&self) -> &'static TypeDescriptor {
        (self.value)()
    }
}

// -----------------------------------------------------------------------------
// Described

/// A type with a known [`TypeDescriptor`].
///
/// Implemented by every built-in property type and generated for model types
/// by [`#[derive(Model)]`](mm_model_derive::Model). A field type without a
/// `Described` implementation is rejected at compile time; the document
/// value itself ([`Value`](crate::Value)) is the explicit opaque escape for
/// shapes the engine does not understand.
pub trait Described: 'static {
    /// Returns the descriptor of this type.
    ///
    /// The descriptor is resolved once and stored for the process lifetime.
    fn descriptor() -> &'static TypeDescriptor;
}

// -----------------------------------------------------------------------------
// Tests
