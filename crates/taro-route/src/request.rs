//! Route/matrix request shape — `spec.md` §4.10: "(source_address,
//! target_address[s], departure_tick, algorithm, heuristic, trait
//! overrides, snap distance)".

use taro_strategy::Address;
use taro_time::EngineTick;

/// Which heuristic a planner run should use. `None` reduces the search to
/// Dijkstra regardless of `Algorithm`; the two other variants require model
/// support (coordinates, landmarks respectively) checked at dispatch time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HeuristicKind {
    None,
    Euclidean { fastest_speed: f64 },
    Landmark,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Algorithm {
    Dijkstra,
    AStar(HeuristicKind),
}

/// A point-to-point route request.
pub struct RouteRequest<'a> {
    pub source: Address,
    pub target: Address,
    pub departure_tick: EngineTick,
    pub algorithm: Algorithm,
    /// `None` uses `FacadeConfig::max_snap_distance_default`.
    pub max_snap_distance: Option<f64>,
    pub addressing: &'a dyn taro_strategy::AddressingStrategy,
}

/// A one-to-many matrix request.
pub struct MatrixRequest<'a> {
    pub source: Address,
    pub targets: &'a [Address],
    pub departure_tick: EngineTick,
    pub algorithm: Algorithm,
    pub max_snap_distance: Option<f64>,
    pub addressing: &'a dyn taro_strategy::AddressingStrategy,
}
