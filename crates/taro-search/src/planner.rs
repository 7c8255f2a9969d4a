//! Unified Dijkstra/A* point-to-point planner — `spec.md` §4.9.
//!
//! Dijkstra and A* are the same algorithm with a different priority key:
//! this module runs one `point_to_point` function parameterized by
//! `&dyn Heuristic`, with [`crate::heuristic::NoneHeuristic`] making it
//! reduce exactly to Dijkstra.
//!
//! States are edges, not nodes — `spec.md` §4.9's edge-based search mirrors
//! the teacher's node-based `dijkstra` (`dt_spatial::router`) one level down,
//! since turn penalties are keyed on the *incoming edge*, not the node. The
//! queue's priority key is `f = g + h`; a separate dense `best_g` array
//! tracks true cumulative cost `g`, since an admissible heuristic only
//! guarantees `h(target) = 0`, not `h ≡ 0` for intermediate states.

use taro_cost::{CostEngine, EdgeTraversal};
use taro_model::ModelStore;
use taro_queue::{SearchQueue, VisitedSet};
use taro_time::EngineTick;

use crate::budget::{BudgetTracker, SearchBudget};
use crate::error::{PlannerError, PlannerResult, UnreachableError};
use crate::heuristic::Heuristic;

/// A resolved point-to-point path: the edges to traverse in order, the
/// total traversal cost in seconds, and the tick at which the destination
/// is reached.
#[derive(Clone, Debug, PartialEq)]
pub struct PathResult {
    pub edges: Vec<u32>,
    pub total_seconds: f64,
    pub arrival_tick: EngineTick,
    /// One tick per node visited, leading with the departure tick — length
    /// `edges.len() + 1` (`spec.md` §6's `arrival_ticks:i64[]`, §8 scenario 1).
    pub arrival_ticks: Vec<EngineTick>,
}

/// Reusable dense-array scratch space for one planner call, sized to the
/// model's edge count. Indexed by `edge_id`. Callers that issue many
/// point-to-point queries against the same model should keep one of these
/// around and call [`PlannerScratch::reset`] between queries rather than
/// reallocating.
pub struct PlannerScratch {
    pub(crate) best_g: Vec<f64>,
    pub(crate) pred: Vec<Option<u32>>,
    pub(crate) arrival: Vec<EngineTick>,
    touched: Vec<u32>,
}

impl PlannerScratch {
    pub fn new(edge_count: u32) -> Self {
        Self {
            best_g: vec![f64::INFINITY; edge_count as usize],
            pred: vec![None; edge_count as usize],
            arrival: vec![EngineTick::ZERO; edge_count as usize],
            touched: Vec::new(),
        }
    }

    /// Clear only the entries touched since the last reset (or construction)
    /// — avoids an O(edge_count) sweep on every query.
    pub fn reset(&mut self) {
        for &e in &self.touched {
            self.best_g[e as usize] = f64::INFINITY;
            self.pred[e as usize] = None;
        }
        self.touched.clear();
    }

    #[inline]
    pub(crate) fn touch(&mut self, edge: u32) {
        if self.best_g[edge as usize].is_infinite() {
            self.touched.push(edge);
        }
    }
}

/// Find the lowest-cost path from `source_node` to `target_node`, departing
/// no earlier than `depart_tick`.
///
/// `heuristic` is evaluated against each edge's *head* node (the node the
/// edge arrives at) — pass [`crate::heuristic::NoneHeuristic`] for plain
/// Dijkstra.
pub fn point_to_point(
    model: &ModelStore,
    cost: &CostEngine<'_>,
    queue: &mut SearchQueue,
    visited: &mut VisitedSet,
    scratch: &mut PlannerScratch,
    budget: SearchBudget,
    source_node: u32,
    target_node: u32,
    depart_tick: EngineTick,
    heuristic: &dyn Heuristic,
) -> PlannerResult<PathResult> {
    scratch.reset();
    visited.clear();
    queue.clear();
    let mut tracker = BudgetTracker::new(budget);

    if source_node == target_node {
        return Ok(PathResult {
            edges: Vec::new(),
            total_seconds: 0.0,
            arrival_tick: depart_tick,
            arrival_ticks: Vec::new(),
        });
    }

    for edge in model.topology.out_edges(source_node) {
        relax(model, cost, queue, scratch, &mut tracker, heuristic, target_node, edge, depart_tick, 0.0, None)?;
    }

    while !queue.is_empty() {
        tracker.record_state()?;
        let state = queue.extract_min()?;
        let edge = state.edge_id;
        queue.recycle(state);

        if !visited.mark_visited(edge) {
            continue;
        }

        let head_node = model.topology.edge_target[edge as usize];
        let g = scratch.best_g[edge as usize];
        if head_node == target_node {
            return Ok(reconstruct(scratch, edge, g, depart_tick));
        }

        let arrival = scratch.arrival[edge as usize];
        for next_edge in model.topology.out_edges(head_node) {
            if visited.is_visited(next_edge) {
                continue;
            }
            relax(model, cost, queue, scratch, &mut tracker, heuristic, target_node, next_edge, arrival, g, Some(edge))?;
        }
    }

    Err(PlannerError::Unreachable(UnreachableError { from: source_node, to: target_node }))
}

#[allow(clippy::too_many_arguments)]
fn relax(
    model: &ModelStore,
    cost: &CostEngine<'_>,
    queue: &mut SearchQueue,
    scratch: &mut PlannerScratch,
    tracker: &mut BudgetTracker,
    heuristic: &dyn Heuristic,
    target_node: u32,
    edge: u32,
    entry_tick: EngineTick,
    g_so_far: f64,
    incoming_edge: Option<u32>,
) -> PlannerResult<()> {
    let traversal = match cost.edge_cost(edge, entry_tick, incoming_edge)? {
        EdgeTraversal::Blocked => return Ok(()),
        EdgeTraversal::Traversable { traversal_seconds, exit_tick } => (traversal_seconds, exit_tick),
    };
    let (traversal_seconds, exit_tick) = traversal;
    let g = g_so_far + traversal_seconds;

    if g >= scratch.best_g[edge as usize] {
        return Ok(());
    }
    scratch.touch(edge);
    scratch.best_g[edge as usize] = g;
    scratch.pred[edge as usize] = incoming_edge;
    scratch.arrival[edge as usize] = exit_tick;

    let head_node = model.topology.edge_target[edge as usize];
    let h = heuristic.estimate(head_node, target_node);
    let f = g + h;
    queue.insert(edge, exit_tick.0, f, incoming_edge)?;
    tracker.record_label(queue.len())?;
    Ok(())
}

fn reconstruct(scratch: &PlannerScratch, last_edge: u32, total_seconds: f64, depart_tick: EngineTick) -> PathResult {
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
    PathResult { edges, total_seconds, arrival_tick, arrival_ticks }
}
