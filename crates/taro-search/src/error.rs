//! `taro-search` error types — `spec.md` §7's `BudgetExceededError` and
//! `UnreachableError`, plus the heuristic-admissibility rejections raised at
//! configuration time.

use thiserror::Error;

use crate::budget::{MatrixBudgetError, SearchBudgetError};

/// A point-to-point source/target pair that a planner was asked to connect
/// but no path exists for (disconnected graph, or every candidate path was
/// blocked).
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("no path from node {from} to node {to}")]
pub struct UnreachableError {
    pub from: u32,
    pub to: u32,
}

/// A heuristic rejected at construction time because it cannot be admissible
/// for the inputs given (`spec.md` §4.9).
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum HeuristicError {
    #[error("fastest_speed must be positive, got {0}")]
    NonPositiveFastestSpeed(f64),
    #[error("landmark heuristic requires at least one landmark")]
    NoLandmarks,
}

pub type HeuristicResult<T> = Result<T, HeuristicError>;

/// Every error a point-to-point planner call can produce.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum PlannerError {
    #[error(transparent)]
    Budget(#[from] SearchBudgetError),
    #[error(transparent)]
    Unreachable(#[from] UnreachableError),
    #[error(transparent)]
    Cost(#[from] taro_cost::CostError),
    #[error(transparent)]
    Queue(#[from] taro_queue::QueueError),
}

pub type PlannerResult<T> = Result<T, PlannerError>;

/// Every error a one-to-many matrix call can produce.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum MatrixError {
    #[error(transparent)]
    Budget(#[from] MatrixBudgetError),
    #[error(transparent)]
    Cost(#[from] taro_cost::CostError),
    #[error(transparent)]
    Queue(#[from] taro_queue::QueueError),
}

pub type MatrixResult<T> = Result<T, MatrixError>;
