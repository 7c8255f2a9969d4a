//! Engine tick model.
//!
//! # Design
//!
//! TARO performs all arithmetic in a single signed integer time unit called
//! an *engine tick* (`spec.md` §3). Unlike the teacher's `dt-core::Tick`
//! (an unsigned simulation step counter), an `EngineTick` is an absolute
//! timestamp — it can be negative (epoch seconds before 1970) and the engine
//! must still produce correct day-of-week and bucket arithmetic for it. Every
//! temporal input is normalized to this unit once, at the model/overlay
//! boundary; no mixed-unit arithmetic happens afterward.

use std::fmt;

use crate::error::{TimeError, TimeResult};

/// Absolute time expressed in engine ticks (seconds or milliseconds, per the
/// model's declared [`EngineTimeUnit`]).
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct EngineTick(pub i64);

impl EngineTick {
    pub const ZERO: EngineTick = EngineTick(0);

    #[inline]
    pub fn offset(self, n: i64) -> EngineTick {
        EngineTick(self.0 + n)
    }
}

impl std::ops::Add<i64> for EngineTick {
    type Output = EngineTick;
    #[inline]
    fn add(self, rhs: i64) -> EngineTick {
        EngineTick(self.0 + rhs)
    }
}

impl std::ops::Sub for EngineTick {
    type Output = i64;
    #[inline]
    fn sub(self, rhs: EngineTick) -> i64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for EngineTick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t{}", self.0)
    }
}

/// The declared unit of an engine tick, per `spec.md` §3 and the
/// `Metadata.time_unit` wire field (§6).
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum EngineTimeUnit {
    Seconds,
    Milliseconds,
}

impl EngineTimeUnit {
    /// `tick_duration_ns` this unit must declare in model metadata.
    pub const fn tick_duration_ns(self) -> u64 {
        match self {
            EngineTimeUnit::Seconds => 1_000_000_000,
            EngineTimeUnit::Milliseconds => 1_000_000,
        }
    }

    /// Decode the wire tag from `Metadata.time_unit` (§6: `SECONDS=0`,
    /// `MILLISECONDS=1`).
    pub fn from_wire_tag(tag: u8) -> TimeResult<Self> {
        match tag {
            0 => Ok(EngineTimeUnit::Seconds),
            1 => Ok(EngineTimeUnit::Milliseconds),
            other => Err(TimeError::UnrecognizedTimeUnit(other)),
        }
    }

    /// Validate that a model-declared `tick_duration_ns` matches this unit.
    pub fn validate_tick_duration_ns(self, declared: u64) -> TimeResult<()> {
        let expected = self.tick_duration_ns();
        if declared == expected {
            Ok(())
        } else {
            Err(TimeError::TickDurationMismatch { unit: self, expected, got: declared })
        }
    }
}

/// Convert `value` expressed in `from` units to `to` units without silent
/// truncation.
///
/// Same-unit conversion is the identity. Converting from a coarser unit to a
/// finer one (seconds → milliseconds) multiplies exactly. Converting from a
/// finer unit to a coarser one fails unless the value divides evenly — a
/// caller that needs sub-bucket precision should not be silently rounded.
pub fn normalize_to_engine_ticks(
    value: i64,
    from: EngineTimeUnit,
    to: EngineTimeUnit,
) -> TimeResult<i64> {
    use EngineTimeUnit::*;
    match (from, to) {
        (Seconds, Seconds) | (Milliseconds, Milliseconds) => Ok(value),
        (Seconds, Milliseconds) => value
            .checked_mul(1_000)
            .ok_or(TimeError::LossyConversion { value, from, to, remainder: 0 }),
        (Milliseconds, Seconds) => {
            let remainder = value.rem_euclid(1_000);
            if remainder == 0 {
                Ok(value.div_euclid(1_000))
            } else {
                Err(TimeError::LossyConversion { value, from, to, remainder })
            }
        }
    }
}
