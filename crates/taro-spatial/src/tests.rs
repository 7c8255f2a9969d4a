use taro_model::ModelBuilder;
use taro_time::EngineTimeUnit;

use crate::error::SpatialError;
use crate::runtime::{Capability, SpatialRuntime};

/// Minimal xorshift64 PRNG. Deterministic and dependency-free — this crate's
/// tests don't need cryptographic quality, only reproducibility.
struct Xorshift64(u64);

impl Xorshift64 {
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }

    fn next_f64(&mut self, lo: f64, hi: f64) -> f64 {
        let frac = (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64;
        lo + frac * (hi - lo)
    }
}

fn brute_force_nearest(points: &[(f64, f64)], x: f64, y: f64) -> (u32, f64) {
    let mut best_id = 0u32;
    let mut best_dist = f64::INFINITY;
    for (i, &(px, py)) in points.iter().enumerate() {
        let dx = px - x;
        let dy = py - y;
        let d = dx * dx + dy * dy;
        if d < best_dist || (d == best_dist && (i as u32) < best_id) {
            best_dist = d;
            best_id = i as u32;
        }
    }
    (best_id, best_dist)
}

#[test]
fn finds_exact_match() {
    let mut b = ModelBuilder::new(EngineTimeUnit::Seconds);
    for i in 0..10 {
        b.add_node(i as f64, 0.0);
    }
    let store = b.with_auto_spatial_index().build().unwrap();
    let runtime = SpatialRuntime::new(
        &store.topology.coordinates,
        store.spatial_index.as_ref(),
        Capability::Enabled,
    );
    let (id, dist) = runtime.nearest(5.0, 0.0).unwrap();
    assert_eq!(id, 5);
    assert_eq!(dist, 0.0);
}

#[test]
fn ties_prefer_smaller_node_id() {
    let mut b = ModelBuilder::new(EngineTimeUnit::Seconds);
    b.add_node(0.0, 0.0);
    b.add_node(0.0, 0.0); // exact duplicate coordinate, higher id
    let store = b.with_auto_spatial_index().build().unwrap();
    let runtime = SpatialRuntime::new(
        &store.topology.coordinates,
        store.spatial_index.as_ref(),
        Capability::Enabled,
    );
    let (id, _) = runtime.nearest(0.0, 0.0).unwrap();
    assert_eq!(id, 0);
}

#[test]
fn rejects_non_finite_query() {
    let mut b = ModelBuilder::new(EngineTimeUnit::Seconds);
    b.add_node(0.0, 0.0);
    let store = b.with_auto_spatial_index().build().unwrap();
    let runtime = SpatialRuntime::new(
        &store.topology.coordinates,
        store.spatial_index.as_ref(),
        Capability::Enabled,
    );
    let err = runtime.nearest(f64::NAN, 0.0).unwrap_err();
    assert!(matches!(err, SpatialError::NonFiniteQuery { .. }));
}

#[test]
fn disabled_capability_fails_even_with_a_present_index() {
    let mut b = ModelBuilder::new(EngineTimeUnit::Seconds);
    b.add_node(0.0, 0.0);
    let store = b.with_auto_spatial_index().build().unwrap();
    let runtime = SpatialRuntime::new(
        &store.topology.coordinates,
        store.spatial_index.as_ref(),
        Capability::Disabled,
    );
    let err = runtime.nearest(0.0, 0.0).unwrap_err();
    assert!(matches!(err, SpatialError::Unavailable(_)));
}

#[test]
fn missing_index_fails() {
    let mut b = ModelBuilder::new(EngineTimeUnit::Seconds);
    b.add_node(0.0, 0.0);
    let store = b.build().unwrap(); // no spatial index
    let runtime = SpatialRuntime::new(&store.topology.coordinates, store.spatial_index.as_ref(), Capability::Enabled);
    let err = runtime.nearest(0.0, 0.0).unwrap_err();
    assert!(matches!(err, SpatialError::Unavailable(_)));
}

#[test]
fn matches_brute_force_over_random_queries() {
    let mut rng = Xorshift64(0x9E3779B97F4A7C15);
    let mut points = Vec::new();
    for _ in 0..200 {
        points.push((rng.next_f64(-500.0, 500.0), rng.next_f64(-500.0, 500.0)));
    }

    let mut b = ModelBuilder::new(EngineTimeUnit::Seconds);
    for &(x, y) in &points {
        b.add_node(x, y);
    }
    let store = b.with_auto_spatial_index().build().unwrap();
    let runtime = SpatialRuntime::new(
        &store.topology.coordinates,
        store.spatial_index.as_ref(),
        Capability::Enabled,
    );

    for _ in 0..300 {
        let qx = rng.next_f64(-600.0, 600.0);
        let qy = rng.next_f64(-600.0, 600.0);
        let expected = brute_force_nearest(&points, qx, qy);
        let actual = runtime.nearest(qx, qy).unwrap();
        assert_eq!(actual, expected, "mismatch for query ({qx}, {qy})");
    }
}
