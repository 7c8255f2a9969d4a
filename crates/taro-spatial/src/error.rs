//! Spatial-runtime error type — `spec.md` §4.4.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SpatialError {
    #[error("spatial index unavailable: {0}")]
    Unavailable(&'static str),

    #[error("query coordinate is not finite: ({x}, {y})")]
    NonFiniteQuery { x: f64, y: f64 },

    #[error("model has no nodes to search")]
    EmptyIndex,
}

pub type SpatialResult<T> = Result<T, SpatialError>;
