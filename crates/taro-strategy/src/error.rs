//! Addressing/strategy error type.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum StrategyError {
    #[error("external id {0} is not present in this model's id mapping")]
    UnknownExternalId(u64),

    #[error("model has no id mapping; this address can only be resolved by coordinate")]
    NoIdMapper,

    #[error("address kind does not match the configured addressing strategy")]
    WrongAddressKind,

    #[error("resolved node is {distance:.3} units from the query, exceeding max snap distance {max_snap_distance:.3}")]
    SnapDistanceExceeded { distance: f64, max_snap_distance: f64 },

    #[error(transparent)]
    Spatial(#[from] taro_spatial::SpatialError),
}

pub type StrategyResult<T> = Result<T, StrategyError>;
