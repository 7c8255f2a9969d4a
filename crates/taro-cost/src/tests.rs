use taro_model::ModelBuilder;
use taro_overlay::{BatchUpdate, LiveOverlay, OverlayConfig};
use taro_time::{EngineTick, EngineTimeUnit};

use crate::engine::{CostEngine, EdgeTraversal};
use crate::error::CostError;

fn empty_overlay() -> LiveOverlay {
    LiveOverlay::new(OverlayConfig::default())
}

#[test]
fn rejects_non_positive_bucket_size() {
    let mut b = ModelBuilder::new(EngineTimeUnit::Seconds);
    b.add_node(0.0, 0.0);
    let store = b.build().unwrap();
    let overlay = empty_overlay();
    let err = CostEngine::new(&store, &overlay, 0).unwrap_err();
    assert!(matches!(err, CostError::NonPositiveBucketSize(0)));
}

#[test]
fn base_weight_only_when_edge_has_no_profile() {
    let mut b = ModelBuilder::new(EngineTimeUnit::Seconds);
    let n0 = b.add_node(0.0, 0.0);
    let n1 = b.add_node(1.0, 0.0);
    b.add_edge(n0, n1, 10.0, taro_model::NO_PROFILE);
    let store = b.build().unwrap();
    let overlay = empty_overlay();
    let engine = CostEngine::new(&store, &overlay, 3_600).unwrap();

    let result = engine.edge_cost(0, EngineTick(0), None).unwrap();
    match result {
        EdgeTraversal::Traversable { traversal_seconds, exit_tick } => {
            assert_eq!(traversal_seconds, 10.0);
            assert_eq!(exit_tick, EngineTick(10));
        }
        EdgeTraversal::Blocked => panic!("expected traversable"),
    }
}

/// `buckets [1,2,3,4]`, `day_mask` every day, `bucket_size` 3600s; entering at
/// bucket index 2 on a Wednesday multiplies the base weight by 3.0.
#[test]
fn profile_peak_bucket_multiplies_base_weight() {
    let mut b = ModelBuilder::new(EngineTimeUnit::Seconds);
    let n0 = b.add_node(0.0, 0.0);
    let n1 = b.add_node(1.0, 0.0);
    b.add_edge(n0, n1, 100.0, 1);
    b.add_profile(1, 0x7F, vec![1.0, 2.0, 3.0, 4.0], 1.0);
    let store = b.build().unwrap();
    let overlay = empty_overlay();
    let engine = CostEngine::new(&store, &overlay, 3_600).unwrap();

    // 1970-01-01 (epoch 0) is a Thursday; Wednesday is one day earlier.
    // Bucket index 2 spans seconds [7200, 10800) into the day.
    let wednesday_bucket_2 = -86_400 + 7_200;
    let result = engine.edge_cost(0, EngineTick(wednesday_bucket_2), None).unwrap();
    match result {
        EdgeTraversal::Traversable { traversal_seconds, .. } => {
            assert_eq!(traversal_seconds, 300.0);
        }
        EdgeTraversal::Blocked => panic!("expected traversable"),
    }
}

#[test]
fn missing_profile_falls_back_to_neutral_multiplier() {
    let mut b = ModelBuilder::new(EngineTimeUnit::Seconds);
    let n0 = b.add_node(0.0, 0.0);
    let n1 = b.add_node(1.0, 0.0);
    b.add_edge(n0, n1, 50.0, taro_model::NO_PROFILE);
    let store = b.build().unwrap();
    let overlay = empty_overlay();
    let engine = CostEngine::new(&store, &overlay, 3_600).unwrap();

    let result = engine.edge_cost(0, EngineTick(123_456), None).unwrap();
    assert_eq!(
        result,
        EdgeTraversal::Traversable { traversal_seconds: 50.0, exit_tick: EngineTick(123_456 + 50) }
    );
}

#[test]
fn live_overlay_block_short_circuits_to_blocked() {
    let mut b = ModelBuilder::new(EngineTimeUnit::Seconds);
    let n0 = b.add_node(0.0, 0.0);
    let n1 = b.add_node(1.0, 0.0);
    b.add_edge(n0, n1, 10.0, taro_model::NO_PROFILE);
    let store = b.build().unwrap();
    let overlay = empty_overlay();
    overlay.ingest_batch(
        &[BatchUpdate { edge_id: 0, speed_factor: 0.0, valid_until_ticks: 1_000 }],
        0,
    );
    let engine = CostEngine::new(&store, &overlay, 3_600).unwrap();

    let result = engine.edge_cost(0, EngineTick(0), None).unwrap();
    assert_eq!(result, EdgeTraversal::Blocked);
}

#[test]
fn live_overlay_speed_factor_scales_traversal() {
    let mut b = ModelBuilder::new(EngineTimeUnit::Seconds);
    let n0 = b.add_node(0.0, 0.0);
    let n1 = b.add_node(1.0, 0.0);
    b.add_edge(n0, n1, 10.0, taro_model::NO_PROFILE);
    let store = b.build().unwrap();
    let overlay = empty_overlay();
    overlay.ingest_batch(
        &[BatchUpdate { edge_id: 0, speed_factor: 0.5, valid_until_ticks: 1_000 }],
        0,
    );
    let engine = CostEngine::new(&store, &overlay, 3_600).unwrap();

    // multiplier is 1 / speed_factor = 2.0
    let result = engine.edge_cost(0, EngineTick(0), None).unwrap();
    match result {
        EdgeTraversal::Traversable { traversal_seconds, .. } => assert_eq!(traversal_seconds, 20.0),
        EdgeTraversal::Blocked => panic!("expected traversable"),
    }
}

#[test]
fn negative_turn_penalty_blocks_the_transition() {
    let mut b = ModelBuilder::new(EngineTimeUnit::Seconds);
    let n0 = b.add_node(0.0, 0.0);
    let n1 = b.add_node(1.0, 0.0);
    let n2 = b.add_node(2.0, 0.0);
    b.add_edge(n0, n1, 10.0, taro_model::NO_PROFILE);
    b.add_edge(n1, n2, 10.0, taro_model::NO_PROFILE);
    b.add_turn_cost(0, 1, -1.0);
    let store = b.build().unwrap();
    let overlay = empty_overlay();
    let engine = CostEngine::new(&store, &overlay, 3_600).unwrap();

    let result = engine.edge_cost(1, EngineTick(0), Some(0)).unwrap();
    assert_eq!(result, EdgeTraversal::Blocked);
}

#[test]
fn positive_turn_penalty_is_added_to_traversal() {
    let mut b = ModelBuilder::new(EngineTimeUnit::Seconds);
    let n0 = b.add_node(0.0, 0.0);
    let n1 = b.add_node(1.0, 0.0);
    let n2 = b.add_node(2.0, 0.0);
    b.add_edge(n0, n1, 10.0, taro_model::NO_PROFILE);
    b.add_edge(n1, n2, 10.0, taro_model::NO_PROFILE);
    b.add_turn_cost(0, 1, 5.0);
    let store = b.build().unwrap();
    let overlay = empty_overlay();
    let engine = CostEngine::new(&store, &overlay, 3_600).unwrap();

    let result = engine.edge_cost(1, EngineTick(0), Some(0)).unwrap();
    match result {
        EdgeTraversal::Traversable { traversal_seconds, .. } => assert_eq!(traversal_seconds, 15.0),
        EdgeTraversal::Blocked => panic!("expected traversable"),
    }
}

#[test]
fn no_turn_cost_declared_means_no_penalty() {
    let mut b = ModelBuilder::new(EngineTimeUnit::Seconds);
    let n0 = b.add_node(0.0, 0.0);
    let n1 = b.add_node(1.0, 0.0);
    let n2 = b.add_node(2.0, 0.0);
    b.add_edge(n0, n1, 10.0, taro_model::NO_PROFILE);
    b.add_edge(n1, n2, 10.0, taro_model::NO_PROFILE);
    let store = b.build().unwrap();
    let overlay = empty_overlay();
    let engine = CostEngine::new(&store, &overlay, 3_600).unwrap();

    let result = engine.edge_cost(1, EngineTick(0), Some(0)).unwrap();
    match result {
        EdgeTraversal::Traversable { traversal_seconds, .. } => assert_eq!(traversal_seconds, 10.0),
        EdgeTraversal::Blocked => panic!("expected traversable"),
    }
}

#[test]
fn exit_tick_ceils_fractional_seconds_for_a_seconds_model() {
    let mut b = ModelBuilder::new(EngineTimeUnit::Seconds);
    let n0 = b.add_node(0.0, 0.0);
    let n1 = b.add_node(1.0, 0.0);
    b.add_edge(n0, n1, 1.0, 1);
    // single-bucket profile: every bucket gives the same multiplier.
    b.add_profile(1, 0x7F, vec![2.5], 1.0);
    let store = b.build().unwrap();
    let overlay = empty_overlay();
    let engine = CostEngine::new(&store, &overlay, 3_600).unwrap();

    // base 1.0 * multiplier 2.5 = 2.5 seconds -> ceil to 3 ticks.
    let result = engine.edge_cost(0, EngineTick(0), None).unwrap();
    match result {
        EdgeTraversal::Traversable { exit_tick, .. } => assert_eq!(exit_tick, EngineTick(3)),
        EdgeTraversal::Blocked => panic!("expected traversable"),
    }
}

#[test]
fn global_multiplier_scales_the_bucket_value() {
    let mut b = ModelBuilder::new(EngineTimeUnit::Seconds);
    let n0 = b.add_node(0.0, 0.0);
    let n1 = b.add_node(1.0, 0.0);
    b.add_edge(n0, n1, 1.0, 1);
    // bucket value 2.0 * global_multiplier 2.0 = effective multiplier 4.0.
    b.add_profile(1, 0x7F, vec![2.0], 2.0);
    let store = b.build().unwrap();
    let overlay = empty_overlay();
    let engine = CostEngine::new(&store, &overlay, 3_600).unwrap();

    let result = engine.edge_cost(0, EngineTick(0), None).unwrap();
    match result {
        EdgeTraversal::Traversable { traversal_seconds, .. } => assert_eq!(traversal_seconds, 4.0),
        EdgeTraversal::Blocked => panic!("expected traversable"),
    }
}

#[test]
fn exit_tick_ceils_in_milliseconds_for_a_milliseconds_model() {
    let mut b = ModelBuilder::new(EngineTimeUnit::Milliseconds);
    let n0 = b.add_node(0.0, 0.0);
    let n1 = b.add_node(1.0, 0.0);
    b.add_edge(n0, n1, 1.0, 1);
    b.add_profile(1, 0x7F, vec![2.5], 1.0);
    let store = b.build().unwrap();
    let overlay = empty_overlay();
    let engine = CostEngine::new(&store, &overlay, 3_600).unwrap();

    // entry_tick is in milliseconds; to_epoch_seconds divides by 1000 first.
    let result = engine.edge_cost(0, EngineTick(0), None).unwrap();
    match result {
        EdgeTraversal::Traversable { traversal_seconds, exit_tick } => {
            assert_eq!(traversal_seconds, 2.5);
            assert_eq!(exit_tick, EngineTick(2_500));
        }
        EdgeTraversal::Blocked => panic!("expected traversable"),
    }
}
