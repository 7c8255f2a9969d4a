//! Addressing strategies — resolve a caller-supplied address to an internal
//! node id (`spec.md` §4.10 step 1, §9 Polymorphism).
//!
//! Mirrors the teacher's `dt_spatial::Router` trait-object pattern: a small
//! `Send + Sync` trait carrying a stable `id()`, dispatched dynamically
//! rather than through an enum match, so a caller can plug in a custom
//! addressing scheme without touching the facade.

use taro_model::ModelStore;
use taro_spatial::SpatialRuntime;

use crate::error::{StrategyError, StrategyResult};

/// A caller-supplied address, either an opaque external id or a coordinate
/// pair to be snapped to the nearest node.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Address {
    External(u64),
    Coordinate { x: f64, y: f64 },
}

pub trait AddressingStrategy: Send + Sync {
    /// Stable identifier, used in logs and in the coordinate-cache key
    /// (`spec.md` §4.10 step 2).
    fn id(&self) -> &'static str;

    fn resolve(
        &self,
        model: &ModelStore,
        spatial: &SpatialRuntime<'_>,
        address: Address,
        max_snap_distance: f64,
    ) -> StrategyResult<u32>;
}

/// Resolves external ids through the model's `IdMapper`. Rejects coordinate
/// addresses — a caller configuring this strategy has declared that every
/// address in the request is an external id.
pub struct ExternalIdAddressing;

impl AddressingStrategy for ExternalIdAddressing {
    fn id(&self) -> &'static str {
        "external_id"
    }

    fn resolve(
        &self,
        model: &ModelStore,
        _spatial: &SpatialRuntime<'_>,
        address: Address,
        _max_snap_distance: f64,
    ) -> StrategyResult<u32> {
        let Address::External(ext) = address else {
            return Err(StrategyError::WrongAddressKind);
        };
        let mapper = model.id_mapper.as_ref().ok_or(StrategyError::NoIdMapper)?;
        mapper.to_internal(ext).ok_or(StrategyError::UnknownExternalId(ext))
    }
}

/// Resolves coordinates via the spatial runtime's nearest-neighbor search,
/// rejecting a match farther than `max_snap_distance` away.
pub struct CoordinateAddressing;

impl AddressingStrategy for CoordinateAddressing {
    fn id(&self) -> &'static str {
        "coordinate"
    }

    fn resolve(
        &self,
        _model: &ModelStore,
        spatial: &SpatialRuntime<'_>,
        address: Address,
        max_snap_distance: f64,
    ) -> StrategyResult<u32> {
        let Address::Coordinate { x, y } = address else {
            return Err(StrategyError::WrongAddressKind);
        };
        let (node, dist_sq) = spatial.nearest(x, y)?;
        let distance = dist_sq.sqrt();
        if distance > max_snap_distance {
            return Err(StrategyError::SnapDistanceExceeded { distance, max_snap_distance });
        }
        Ok(node)
    }
}
