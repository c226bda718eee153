//! Shared containers for the `mm` crates.
//!
//! Provides fixed-seed hash containers (see [`hash`]) and [`TypeIdMap`],
//! a map specialized for `TypeId` keys.

// -----------------------------------------------------------------------------
// Modules

pub mod hash;

mod typeid_map;

// -----------------------------------------------------------------------------
// Exports

pub use typeid_map::TypeIdMap;
