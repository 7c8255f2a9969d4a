//! Time-contract error type.

use thiserror::Error;

/// Errors produced by `taro-time`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TimeError {
    #[error("bucket size must be positive, got {0}")]
    NonPositiveBucketSize(i64),

    #[error("unit conversion from {from:?} to {to:?} of value {value} loses precision (remainder {remainder})")]
    LossyConversion {
        value: i64,
        from: crate::EngineTimeUnit,
        to: crate::EngineTimeUnit,
        remainder: i64,
    },

    #[error("tick_duration_ns {got} does not match declared time unit {unit:?} (expected {expected})")]
    TickDurationMismatch {
        unit: crate::EngineTimeUnit,
        expected: u64,
        got: u64,
    },

    #[error("unrecognized time unit tag {0}")]
    UnrecognizedTimeUnit(u8),

    #[error("invalid IANA time zone {0:?}")]
    InvalidTimeZone(String),
}

pub type TimeResult<T> = Result<T, TimeError>;
