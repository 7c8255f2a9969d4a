//! One-to-many matrix queries — `spec.md` §4.9/§4.10.
//!
//! A single run of Dijkstra/A* from `source_node` resolves every target in
//! `target_nodes` as it is settled, stopping once every target has been
//! resolved or the frontier runs dry (remaining targets unreachable).

use std::collections::HashMap;

use taro_cost::{CostEngine, EdgeTraversal};
use taro_model::ModelStore;
use taro_queue::{SearchQueue, VisitedSet};
use taro_time::EngineTick;

use crate::budget::{BudgetTracker, MatrixBudgetError, SearchBudget};
use crate::error::MatrixResult;
use crate::heuristic::Heuristic;
use crate::planner::PlannerScratch;

/// One resolved target in a matrix query.
#[derive(Clone, Debug, PartialEq)]
pub struct MatrixEntry {
    pub target_node: u32,
    pub edges: Vec<u32>,
    pub total_seconds: f64,
    pub arrival_tick: EngineTick,
    /// One tick per node visited, leading with the departure tick — length
    /// `edges.len() + 1`.
    pub arrival_ticks: Vec<EngineTick>,
}

/// Run a one-to-many query from `source_node` to every node in
/// `target_nodes`, returning a [`MatrixEntry`] per reachable target (in no
/// particular order; unreachable targets are simply absent — callers that
/// need to know which targets were unreachable should diff against
/// `target_nodes`).
#[allow(clippy::too_many_arguments)]
pub fn matrix(
    model: &ModelStore,
    cost: &CostEngine<'_>,
    queue: &mut SearchQueue,
    visited: &mut VisitedSet,
    scratch: &mut PlannerScratch,
    budget: SearchBudget,
    settled_limit: usize,
    source_node: u32,
    target_nodes: &[u32],
    depart_tick: EngineTick,
    heuristic: &dyn Heuristic,
) -> MatrixResult<Vec<MatrixEntry>> {
    scratch.reset();
    visited.clear();
    queue.clear();
    let mut tracker = BudgetTracker::new(budget);
    let mut settled_count: usize = 0;

    let mut pending: HashMap<u32, ()> = target_nodes.iter().filter(|&&n| n != source_node).map(|&n| (n, ())).collect();
    let mut resolved: HashMap<u32, MatrixEntry> = HashMap::new();
    if target_nodes.contains(&source_node) {
        resolved.insert(
            source_node,
            MatrixEntry {
                target_node: source_node,
                edges: Vec::new(),
                total_seconds: 0.0,
                arrival_tick: depart_tick,
                arrival_ticks: Vec::new(),
            },
        );
    }

    for edge in model.topology.out_edges(source_node) {
        relax_for_matrix(model, cost, queue, scratch, &mut tracker, heuristic, &pending, edge, depart_tick, 0.0, None)?;
    }

    while !queue.is_empty() {
        if pending.is_empty() {
            break;
        }

        tracker.record_state().map_err(MatrixBudgetError::Row)?;
        let state = queue.extract_min()?;
        let edge = state.edge_id;
        queue.recycle(state);

        if !visited.mark_visited(edge) {
            continue;
        }
        settled_count += 1;
        if settled_count > settled_limit {
            return Err(MatrixBudgetError::SettledExceeded { limit: settled_limit }.into());
        }

        let head_node = model.topology.edge_target[edge as usize];
        let g = scratch.best_g[edge as usize];

        if pending.remove(&head_node).is_some() {
            let entry = reconstruct_matrix(scratch, edge, g, head_node, depart_tick);
            resolved.insert(head_node, entry);
        }

        let arrival = scratch.arrival[edge as usize];
        for next_edge in model.topology.out_edges(head_node) {
            if visited.is_visited(next_edge) {
                continue;
            }
            relax_for_matrix(model, cost, queue, scratch, &mut tracker, heuristic, &pending, next_edge, arrival, g, Some(edge))?;
        }
    }

    Ok(resolved.into_values().collect())
}

#[allow(clippy::too_many_arguments)]
fn relax_for_matrix(
    model: &ModelStore,
    cost: &CostEngine<'_>,
    queue: &mut SearchQueue,
    scratch: &mut PlannerScratch,
    tracker: &mut BudgetTracker,
    heuristic: &dyn Heuristic,
    pending: &HashMap<u32, ()>,
    edge: u32,
    entry_tick: EngineTick,
    g_so_far: f64,
    incoming_edge: Option<u32>,
) -> MatrixResult<()> {
    let (traversal_seconds, exit_tick) = match cost.edge_cost(edge, entry_tick, incoming_edge)? {
        EdgeTraversal::Blocked => return Ok(()),
        EdgeTraversal::Traversable { traversal_seconds, exit_tick } => (traversal_seconds, exit_tick),
    };
    let g = g_so_far + traversal_seconds;

    if g >= scratch.best_g[edge as usize] {
        return Ok(());
    }
    scratch.touch(edge);
    scratch.best_g[edge as usize] = g;
    scratch.pred[edge as usize] = incoming_edge;
    scratch.arrival[edge as usize] = exit_tick;

    let head_node = model.topology.edge_target[edge as usize];
    let h = pending
        .keys()
        .map(|&t| heuristic.estimate(head_node, t))
        .fold(f64::INFINITY, f64::min);
    let h = if h.is_finite() { h } else { 0.0 };
    let f = g + h;
    queue.insert(edge, exit_tick.0, f, incoming_edge)?;
    tracker.record_label(queue.len()).map_err(MatrixBudgetError::Row)?;
    Ok(())
}

fn reconstruct_matrix(
    scratch: &PlannerScratch,
    last_edge: u32,
    total_seconds: f64,
    target_node: u32,
    depart_tick: EngineTick,
) -> MatrixEntry {
    let mut edges = vec![last_edge];
    let mut cur = last_edge;
    while let Some(prev) = scratch.pred[cur as usize] {
        edges.push(prev);
        cur = prev;
    }
    edges.reverse();
    let mut arrival_ticks: Vec<EngineTick> = Vec::with_capacity(edges.len() + 1);
    arrival_ticks.push(depart_tick);
    arrival_ticks.extend(edges.iter().map(|&e| scratch.arrival[e as usize]));
    let arrival_tick = scratch.arrival[last_edge as usize];
    MatrixEntry { target_node, edges, total_seconds, arrival_tick, arrival_ticks }
}
