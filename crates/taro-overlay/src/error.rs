//! Live-overlay error type — `spec.md` §4.6/§7 `LiveUpdateRejectedError`.
//!
//! Batch rejection is non-fatal: the overlay remains usable afterward, so
//! this type never appears as an `Err` — it's only the variant-typed reason
//! code attached inside an [`crate::overlay::IngestSummary`] the caller can
//! branch on.

use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum LiveUpdateRejectedError {
    #[error("update already expired at ingest")]
    AlreadyExpired,

    #[error("overlay at capacity and REJECT_BATCH policy rejected the update")]
    CapacityRejectBatch,

    #[error("overlay at capacity and the precount of new edge ids exceeded free capacity")]
    CapacityPrecountRejected,
}
