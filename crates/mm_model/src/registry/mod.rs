//! The process-wide model registry.
//!
//! Descriptor lists are expensive to build and immutable once built, so they
//! are cached here per model type: first access introspects the type and
//! stores the result for the process lifetime, subsequent lookups are O(1).

// -----------------------------------------------------------------------------
// Modules

mod model_registry;

// -----------------------------------------------------------------------------
// Exports

pub use model_registry::{ModelRegistry, global};

use crate::info::ModelInfo;
use crate::model::Introspect;

// Free-function form of `global().info::<M>()`, used as a delayed handle in
// `ModelType` (function pointers cannot close over a method call).
pub(crate) fn info_of<M: Introspect>() -> &'static ModelInfo {
    global().info::<M>()
}
