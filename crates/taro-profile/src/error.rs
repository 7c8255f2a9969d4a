//! Profile-store error type — `spec.md` §4.5.

use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum ProfileError {
    #[error("fractional bucket {0} is not finite")]
    NonFiniteFractionalBucket(f64),
}

pub type ProfileResult<T> = Result<T, ProfileError>;
