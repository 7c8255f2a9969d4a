//! Result payloads — `spec.md` §6: "Route: `{ total_cost:f32, total_ticks:i64,
//! edge_path:u32[], arrival_ticks:i64[] }` or `{ unreachable:true,
//! reason_code:string }`. Matrix: one such record per target."

use taro_strategy::Address;

#[derive(Clone, Debug, PartialEq)]
pub enum RouteOutcome {
    Route {
        total_cost: f32,
        total_ticks: i64,
        edge_path: Vec<u32>,
        /// One entry per node visited, including the departure tick —
        /// `arrival_ticks.len() == edge_path.len() + 1`.
        arrival_ticks: Vec<i64>,
    },
    Unreachable {
        reason_code: String,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct MatrixRecord {
    pub target: Address,
    pub outcome: RouteOutcome,
}
