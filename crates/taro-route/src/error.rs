//! Route-facade error type — `spec.md` §7. Wraps every subsystem error the
//! facade can surface, mirroring how `dt-sim::SimError` wraps
//! `dt_spatial::SpatialError` with `#[from]` rather than re-deriving each
//! variant by hand.

use thiserror::Error;

/// `spec.md` §7's `InvalidInputError`: malformed request fields caught at
/// the facade boundary, before any subsystem is touched.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum InvalidInputError {
    #[error("coordinate ({x}, {y}) is not finite")]
    NonFiniteCoordinate { x: f64, y: f64 },

    #[error("max_snap_distance must be positive, got {0}")]
    NonPositiveSnapDistance(f64),

    #[error("a route or matrix request requires at least one target address")]
    NoTargets,
}

pub type InvalidInputResult<T> = Result<T, InvalidInputError>;

#[derive(Debug, Error)]
pub enum RouteError {
    #[error(transparent)]
    InvalidInput(#[from] InvalidInputError),

    #[error(transparent)]
    Strategy(#[from] taro_strategy::StrategyError),

    #[error(transparent)]
    Heuristic(#[from] taro_search::HeuristicError),

    #[error(transparent)]
    Planner(#[from] taro_search::PlannerError),

    #[error(transparent)]
    Matrix(#[from] taro_search::MatrixError),

    #[error(transparent)]
    Cost(#[from] taro_cost::CostError),
}

pub type RouteResult<T> = Result<T, RouteError>;
