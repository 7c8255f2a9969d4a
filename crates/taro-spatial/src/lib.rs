//! `taro-spatial` — nearest-node lookups over a loaded TARO model's KD-tree.
//!
//! Mirrors the teacher's split between `dt_spatial::RoadNetwork` (owns the
//! R-tree) and its query methods: `taro-model` owns the raw `SpatialIndex`
//! table and its load-time invariants, this crate only walks it.

pub mod error;
pub mod runtime;

#[cfg(test)]
mod tests;

pub use error::{SpatialError, SpatialResult};
pub use runtime::{Capability, SpatialRuntime};
