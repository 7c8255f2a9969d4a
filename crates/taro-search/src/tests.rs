use taro_cost::CostEngine;
use taro_model::ModelBuilder;
use taro_overlay::{BatchUpdate, LiveOverlay, OverlayConfig};
use taro_queue::{SearchQueue, VisitedSet};
use taro_time::{EngineTick, EngineTimeUnit};

use crate::budget::SearchBudget;
use crate::error::{HeuristicError, PlannerError, UnreachableError};
use crate::heuristic::{EuclideanHeuristic, LandmarkHeuristic, NoneHeuristic};
use crate::matrix::matrix;
use crate::planner::{point_to_point, PlannerScratch};

/// n0 --e0--> n1 --e1--> n2 --e3--> n3, plus a dead-end e2: n1 -> n4.
///
/// Edges are added grouped by origin node (origin ids non-decreasing) to
/// match the CSR layout `ModelBuilder` assembles — its internal
/// origin-sort is a stable sort, so it only reorders edges added out of
/// that order.
fn linear_chain() -> (taro_model::ModelStore, LiveOverlay) {
    let mut b = ModelBuilder::new(EngineTimeUnit::Seconds);
    let n0 = b.add_node(0.0, 0.0);
    let n1 = b.add_node(1.0, 0.0);
    let n2 = b.add_node(2.0, 0.0);
    let n3 = b.add_node(3.0, 0.0);
    let n4 = b.add_node(1.0, 5.0);
    b.add_edge(n0, n1, 10.0, taro_model::NO_PROFILE); // e0
    b.add_edge(n1, n2, 10.0, taro_model::NO_PROFILE); // e1
    b.add_edge(n1, n4, 10.0, taro_model::NO_PROFILE); // e2 (dead end)
    b.add_edge(n2, n3, 10.0, taro_model::NO_PROFILE); // e3
    let store = b.build().unwrap();
    let overlay = LiveOverlay::new(OverlayConfig::default());
    (store, overlay)
}

#[test]
fn point_to_point_finds_the_linear_chain_route() {
    let (store, overlay) = linear_chain();
    let engine = CostEngine::new(&store, &overlay, 3_600).unwrap();
    let mut queue = SearchQueue::new(store.edge_count(), 64);
    let mut visited = VisitedSet::new(store.edge_count() as usize);
    let mut scratch = PlannerScratch::new(store.edge_count());

    let result = point_to_point(
        &store,
        &engine,
        &mut queue,
        &mut visited,
        &mut scratch,
        SearchBudget::default(),
        0,
        3,
        EngineTick::ZERO,
        &NoneHeuristic,
    )
    .unwrap();

    assert_eq!(result.edges, vec![0, 1, 3]);
    assert!((result.total_seconds - 30.0).abs() < 1e-9);
}

#[test]
fn point_to_point_reports_unreachable_when_no_path_exists() {
    let (store, overlay) = linear_chain();
    let engine = CostEngine::new(&store, &overlay, 3_600).unwrap();
    let mut queue = SearchQueue::new(store.edge_count(), 64);
    let mut visited = VisitedSet::new(store.edge_count() as usize);
    let mut scratch = PlannerScratch::new(store.edge_count());

    // Node 4 is a dead end; nothing routes back from it to node 3.
    let err = point_to_point(
        &store, &engine, &mut queue, &mut visited, &mut scratch,
        SearchBudget::default(), 4, 3, EngineTick::ZERO, &NoneHeuristic,
    )
    .unwrap_err();

    assert_eq!(err, PlannerError::Unreachable(UnreachableError { from: 4, to: 3 }));
}

#[test]
fn point_to_point_routes_around_a_blocked_edge() {
    let (store, overlay) = linear_chain();
    // Block the direct n1->n2 edge (edge 1) for all time.
    overlay.ingest_batch(&[BatchUpdate { edge_id: 1, speed_factor: 0.0, valid_until_ticks: i64::MAX }], 0);
    let engine = CostEngine::new(&store, &overlay, 3_600).unwrap();
    let mut queue = SearchQueue::new(store.edge_count(), 64);
    let mut visited = VisitedSet::new(store.edge_count() as usize);
    let mut scratch = PlannerScratch::new(store.edge_count());

    let err = point_to_point(
        &store, &engine, &mut queue, &mut visited, &mut scratch,
        SearchBudget::default(), 0, 3, EngineTick::ZERO, &NoneHeuristic,
    )
    .unwrap_err();

    assert_eq!(err, PlannerError::Unreachable(UnreachableError { from: 0, to: 3 }));
}

#[test]
fn point_to_point_trivial_same_node_route_is_empty() {
    let (store, overlay) = linear_chain();
    let engine = CostEngine::new(&store, &overlay, 3_600).unwrap();
    let mut queue = SearchQueue::new(store.edge_count(), 64);
    let mut visited = VisitedSet::new(store.edge_count() as usize);
    let mut scratch = PlannerScratch::new(store.edge_count());

    let result = point_to_point(
        &store, &engine, &mut queue, &mut visited, &mut scratch,
        SearchBudget::default(), 2, 2, EngineTick::ZERO, &NoneHeuristic,
    )
    .unwrap();

    assert!(result.edges.is_empty());
    assert_eq!(result.total_seconds, 0.0);
}

#[test]
fn dijkstra_and_euclidean_a_star_agree_on_the_shortest_path() {
    let (store, overlay) = linear_chain();
    let engine = CostEngine::new(&store, &overlay, 3_600).unwrap();

    let mut queue = SearchQueue::new(store.edge_count(), 64);
    let mut visited = VisitedSet::new(store.edge_count() as usize);
    let mut scratch = PlannerScratch::new(store.edge_count());
    let dijkstra = point_to_point(
        &store, &engine, &mut queue, &mut visited, &mut scratch,
        SearchBudget::default(), 0, 3, EngineTick::ZERO, &NoneHeuristic,
    )
    .unwrap();

    let coords: Vec<(f64, f64)> = store.topology.coordinates.clone();
    let heuristic = EuclideanHeuristic::new(&coords, 1.0).unwrap();
    let mut queue2 = SearchQueue::new(store.edge_count(), 64);
    let mut visited2 = VisitedSet::new(store.edge_count() as usize);
    let mut scratch2 = PlannerScratch::new(store.edge_count());
    let a_star = point_to_point(
        &store, &engine, &mut queue2, &mut visited2, &mut scratch2,
        SearchBudget::default(), 0, 3, EngineTick::ZERO, &heuristic,
    )
    .unwrap();

    assert_eq!(dijkstra.edges, a_star.edges);
    assert!((dijkstra.total_seconds - a_star.total_seconds).abs() < 1e-9);
}

#[test]
fn euclidean_heuristic_rejects_non_positive_fastest_speed() {
    let coords = vec![(0.0, 0.0), (1.0, 0.0)];
    let err = EuclideanHeuristic::new(&coords, 0.0).unwrap_err();
    assert_eq!(err, HeuristicError::NonPositiveFastestSpeed(0.0));
}

#[test]
fn landmark_heuristic_rejects_an_empty_landmark_set() {
    let landmarks: Vec<taro_model::Landmark> = Vec::new();
    let err = LandmarkHeuristic::new(&landmarks).unwrap_err();
    assert_eq!(err, HeuristicError::NoLandmarks);
}

#[test]
fn landmark_heuristic_agrees_with_dijkstra_on_the_shortest_path() {
    let (store, overlay) = linear_chain();
    let engine = CostEngine::new(&store, &overlay, 3_600).unwrap();

    // Landmark at node 3: node 3 has no outgoing edges, so the distance
    // *from* the landmark to anything else is unreachable (MAX); the
    // distance *to* the landmark matches the chain's actual costs.
    let landmarks = vec![taro_model::Landmark {
        node_idx: 3,
        forward_distances: vec![f32::MAX, f32::MAX, f32::MAX, 0.0, f32::MAX],
        backward_distances: vec![30.0, 20.0, 10.0, 0.0, f32::MAX],
    }];
    let heuristic = LandmarkHeuristic::new(&landmarks).unwrap();

    let mut queue = SearchQueue::new(store.edge_count(), 64);
    let mut visited = VisitedSet::new(store.edge_count() as usize);
    let mut scratch = PlannerScratch::new(store.edge_count());
    let result = point_to_point(
        &store, &engine, &mut queue, &mut visited, &mut scratch,
        SearchBudget::default(), 0, 3, EngineTick::ZERO, &heuristic,
    )
    .unwrap();

    assert_eq!(result.edges, vec![0, 1, 3]);
}

#[test]
fn row_work_budget_is_enforced() {
    let (store, overlay) = linear_chain();
    let engine = CostEngine::new(&store, &overlay, 3_600).unwrap();
    let mut queue = SearchQueue::new(store.edge_count(), 64);
    let mut visited = VisitedSet::new(store.edge_count() as usize);
    let mut scratch = PlannerScratch::new(store.edge_count());

    let tiny_budget = SearchBudget { max_states_per_row: 1, ..SearchBudget::default() };
    let err = point_to_point(
        &store, &engine, &mut queue, &mut visited, &mut scratch,
        tiny_budget, 0, 3, EngineTick::ZERO, &NoneHeuristic,
    )
    .unwrap_err();

    assert!(matches!(err, PlannerError::Budget(crate::budget::SearchBudgetError::RowWorkExceeded { limit: 1 })));
}

#[test]
fn matrix_resolves_every_reachable_target_from_one_source() {
    let (store, overlay) = linear_chain();
    let engine = CostEngine::new(&store, &overlay, 3_600).unwrap();
    let mut queue = SearchQueue::new(store.edge_count(), 64);
    let mut visited = VisitedSet::new(store.edge_count() as usize);
    let mut scratch = PlannerScratch::new(store.edge_count());

    let mut entries = matrix(
        &store, &engine, &mut queue, &mut visited, &mut scratch,
        SearchBudget::default(), 1_000, 0, &[1, 2, 3, 4], EngineTick::ZERO, &NoneHeuristic,
    )
    .unwrap();
    entries.sort_by_key(|e| e.target_node);

    assert_eq!(entries.len(), 4);
    assert_eq!(entries[0].target_node, 1);
    assert!((entries[0].total_seconds - 10.0).abs() < 1e-9);
    assert_eq!(entries[2].target_node, 3);
    assert!((entries[2].total_seconds - 30.0).abs() < 1e-9);
}

#[test]
fn matrix_omits_unreachable_targets_rather_than_erroring() {
    let (store, overlay) = linear_chain();
    let engine = CostEngine::new(&store, &overlay, 3_600).unwrap();
    let mut queue = SearchQueue::new(store.edge_count(), 64);
    let mut visited = VisitedSet::new(store.edge_count() as usize);
    let mut scratch = PlannerScratch::new(store.edge_count());

    // From node 4 (a dead end) nothing else is reachable.
    let entries = matrix(
        &store, &engine, &mut queue, &mut visited, &mut scratch,
        SearchBudget::default(), 1_000, 4, &[0, 1, 2, 3], EngineTick::ZERO, &NoneHeuristic,
    )
    .unwrap();

    assert!(entries.is_empty());
}

#[test]
fn matrix_settled_budget_is_enforced() {
    let (store, overlay) = linear_chain();
    let engine = CostEngine::new(&store, &overlay, 3_600).unwrap();
    let mut queue = SearchQueue::new(store.edge_count(), 64);
    let mut visited = VisitedSet::new(store.edge_count() as usize);
    let mut scratch = PlannerScratch::new(store.edge_count());

    let err = matrix(
        &store, &engine, &mut queue, &mut visited, &mut scratch,
        SearchBudget::default(), 1, 0, &[3], EngineTick::ZERO, &NoneHeuristic,
    )
    .unwrap_err();

    assert!(matches!(
        err,
        crate::error::MatrixError::Budget(crate::budget::MatrixBudgetError::SettledExceeded { limit: 1 })
    ));
}
