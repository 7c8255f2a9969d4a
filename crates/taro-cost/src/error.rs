//! Cost-engine error type — `spec.md` §4.7's "hard cost-engine error".

use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum CostError {
    #[error("edge {edge_id} produced a non-finite or negative traversal cost: {value}")]
    NonFiniteOrNegativeTraversal { edge_id: u32, value: f64 },

    #[error("bucket_size_sec must be positive, got {0}")]
    NonPositiveBucketSize(i64),
}

pub type CostResult<T> = Result<T, CostError>;
