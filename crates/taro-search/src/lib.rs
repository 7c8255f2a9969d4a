//! `taro-search` — time-dependent Dijkstra/A* planning and one-to-many
//! matrix queries (`spec.md` §4.9).
//!
//! # Crate layout
//!
//! | Module        | Contents                                               |
//! |---------------|---------------------------------------------------------|
//! | [`planner`]   | `point_to_point`, `PlannerScratch`, `PathResult`         |
//! | [`matrix`]    | `matrix`, `MatrixEntry`                                  |
//! | [`heuristic`] | `Heuristic`, `NoneHeuristic`, `EuclideanHeuristic`, `LandmarkHeuristic` |
//! | [`budget`]    | `SearchBudget`, `SearchBudgetError`, `MatrixBudgetError` |
//! | [`error`]     | `PlannerError`, `MatrixError`, `UnreachableError`, `HeuristicError` |

pub mod budget;
pub mod error;
pub mod heuristic;
pub mod matrix;
pub mod planner;

#[cfg(test)]
mod tests;

pub use budget::{MatrixBudgetError, SearchBudget, SearchBudgetError};
pub use error::{HeuristicError, HeuristicResult, MatrixError, MatrixResult, PlannerError, PlannerResult, UnreachableError};
pub use heuristic::{EuclideanHeuristic, Heuristic, LandmarkHeuristic, NoneHeuristic};
pub use matrix::{matrix, MatrixEntry};
pub use planner::{point_to_point, PathResult, PlannerScratch};
