//! Property metadata: semantic kinds, type descriptors, raw property tables,
//! and the cached per-model descriptor lists.

// -----------------------------------------------------------------------------
// Modules

mod descriptor;
mod kind;
mod model_info;
mod property;

// -----------------------------------------------------------------------------
// Exports

pub use descriptor::PropertyDescriptor;
pub use kind::{Described, KindError, PrimitiveKind, PropertyKind};
pub use kind::{ListDescriptor, MapDescriptor, ModelType, TypeDescriptor};
pub use model_info::ModelInfo;
pub use property::{Accessors, AssignFn, DecodeFn, EncodeFn, Property};
