//! `taro-time` — the engine tick unit, bucketization, day-of-week, and FIFO
//! validation for the TARO time-aware routing engine.
//!
//! This crate is a dependency of every other `taro-*` crate. It intentionally
//! has no `taro-*` dependencies and minimal external ones (`thiserror`,
//! `chrono`, `chrono-tz`).
//!
//! # What lives here
//!
//! | Module       | Contents                                              |
//! |--------------|--------------------------------------------------------|
//! | [`tick`]     | `EngineTick`, `EngineTimeUnit`, `normalize_to_engine_ticks` |
//! | [`calendar`] | `to_bucket`, `day_of_week_utc`, `day_of_week_in_tz`, `validate_fifo` |
//! | [`error`]    | `TimeError`, `TimeResult<T>`                          |

pub mod calendar;
pub mod error;
pub mod tick;


pub use calendar::{day_of_week_in_tz, day_of_week_utc, parse_timezone, to_bucket, validate_fifo};
pub use error::{TimeError, TimeResult};
pub use tick::{normalize_to_engine_ticks, EngineTick, EngineTimeUnit};
