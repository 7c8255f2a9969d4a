//! Transition strategies — how a turn between two edges is costed
//! (`spec.md` §4.7 turn costs, §9 Polymorphism).

use taro_model::{TurnCost, TurnCostTable};

pub trait TransitionStrategy: Send + Sync {
    fn id(&self) -> &'static str;

    /// The declared turn penalty for `from_edge -> to_edge`, if the
    /// strategy models turns at all.
    fn turn_penalty(&self, turn_costs: &TurnCostTable, from_edge: u32, to_edge: u32) -> Option<TurnCost>;
}

/// Turns are costed per the declared `TurnCost` table, keyed by the
/// `(from_edge, to_edge)` pair — the default, and the only strategy the
/// binary model format carries data for.
pub struct EdgeBasedTransition;

impl TransitionStrategy for EdgeBasedTransition {
    fn id(&self) -> &'static str {
        "edge_based"
    }

    fn turn_penalty(&self, turn_costs: &TurnCostTable, from_edge: u32, to_edge: u32) -> Option<TurnCost> {
        turn_costs.lookup(from_edge, to_edge)
    }
}

/// Turns carry no separate penalty — a node-based cost model bakes
/// turning delay into node dwell time elsewhere, outside this crate's
/// scope, so the edge-pair table is never consulted.
pub struct NodeBasedTransition;

impl TransitionStrategy for NodeBasedTransition {
    fn id(&self) -> &'static str {
        "node_based"
    }

    fn turn_penalty(&self, _turn_costs: &TurnCostTable, _from_edge: u32, _to_edge: u32) -> Option<TurnCost> {
        None
    }
}
