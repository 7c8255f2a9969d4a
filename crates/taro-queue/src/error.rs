//! Search-queue error type — `spec.md` §4.8/§7 `PoolExhaustedError` plus the
//! capacity-violation `InvalidInputError` cases this crate owns.

use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum QueueError {
    #[error("edge id {edge} out of range [0, {capacity})")]
    InvalidEdgeId { edge: u32, capacity: usize },

    #[error("extract_min called on an empty queue")]
    ExtractFromEmpty,

    #[error("search-state pool exhausted (capacity {capacity}); a caller likely failed to recycle extracted states")]
    PoolExhausted { capacity: usize },
}

pub type QueueResult<T> = Result<T, QueueError>;
