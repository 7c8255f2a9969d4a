use criterion::{black_box, criterion_group, criterion_main, Criterion};
use taro_cost::CostEngine;
use taro_model::ModelBuilder;
use taro_overlay::{LiveOverlay, OverlayConfig};
use taro_queue::{SearchQueue, VisitedSet};
use taro_search::{point_to_point, NoneHeuristic, PlannerScratch, SearchBudget};
use taro_time::{EngineTick, EngineTimeUnit};

/// A 32x32 grid graph, each node connected to its right and down neighbors.
fn build_grid(side: u32) -> (taro_model::ModelStore, LiveOverlay) {
    let mut b = ModelBuilder::new(EngineTimeUnit::Seconds);
    let mut ids = vec![0u32; (side * side) as usize];
    for y in 0..side {
        for x in 0..side {
            ids[(y * side + x) as usize] = b.add_node(x as f64, y as f64);
        }
    }
    for y in 0..side {
        for x in 0..side {
            let here = ids[(y * side + x) as usize];
            if x + 1 < side {
                b.add_edge(here, ids[(y * side + x + 1) as usize], 1.0, taro_model::NO_PROFILE);
            }
            if y + 1 < side {
                b.add_edge(here, ids[((y + 1) * side + x) as usize], 1.0, taro_model::NO_PROFILE);
            }
        }
    }
    let store = b.build().unwrap();
    let overlay = LiveOverlay::new(OverlayConfig::default());
    (store, overlay)
}

fn point_to_point_grid(c: &mut Criterion) {
    let (store, overlay) = build_grid(32);
    let engine = CostEngine::new(&store, &overlay, 3_600).unwrap();
    let mut queue = SearchQueue::new(store.edge_count(), 4_096);
    let mut visited = VisitedSet::new(store.edge_count() as usize);
    let mut scratch = PlannerScratch::new(store.edge_count());
    let last = store.node_count() - 1;

    c.bench_function("point_to_point_32x32_grid_corner_to_corner", |b| {
        b.iter(|| {
            point_to_point(
                black_box(&store),
                black_box(&engine),
                &mut queue,
                &mut visited,
                &mut scratch,
                SearchBudget::default(),
                0,
                last,
                EngineTick::ZERO,
                &NoneHeuristic,
            )
            .unwrap()
        })
    });
}

criterion_group!(benches, point_to_point_grid);
criterion_main!(benches);
