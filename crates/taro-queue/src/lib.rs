//! `taro-queue` — the planner's indexed priority queue and visited set.
//!
//! Kept allocation-free per query: both types are constructed once per
//! thread (or checked out of a per-thread pool, `spec.md` §5) and `clear`ed
//! between searches rather than rebuilt.

pub mod error;
pub mod heap;
pub mod visited;

#[cfg(test)]
mod tests;

pub use error::{QueueError, QueueResult};
pub use heap::{ExtractedState, SearchQueue};
pub use visited::VisitedSet;
