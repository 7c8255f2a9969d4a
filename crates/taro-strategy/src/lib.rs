//! `taro-strategy` — pluggable addressing, temporal-calendar, and
//! turn-transition strategies.
//!
//! Each family is a small `Send + Sync` trait carrying a stable `id()`,
//! matching the teacher's `dt_spatial::Router` trait-object pattern rather
//! than a closed enum: callers can supply their own implementation without
//! touching this crate (`spec.md` §9's "small capability set
//! `{id, validate, compute}`").

pub mod addressing;
pub mod calendar;
pub mod error;
pub mod transition;


pub use addressing::{Address, AddressingStrategy, CoordinateAddressing, ExternalIdAddressing};
pub use calendar::{LinearCalendar, TemporalCalendarStrategy, TzAwareCalendar, UtcCalendar};
pub use error::{StrategyError, StrategyResult};
pub use transition::{EdgeBasedTransition, NodeBasedTransition, TransitionStrategy};
