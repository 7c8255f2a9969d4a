use criterion::{black_box, criterion_group, criterion_main, Criterion};
use taro_queue::SearchQueue;

fn insert_extract_churn(c: &mut Criterion) {
    let mut group = c.benchmark_group("search_queue");
    group.bench_function("insert_then_extract_1000", |b| {
        b.iter(|| {
            let mut q = SearchQueue::new(1_000, 1_000);
            for edge in 0..1_000u32 {
                q.insert(black_box(edge), 0, (1_000 - edge) as f64, None).unwrap();
            }
            while let Ok(state) = q.extract_min() {
                q.recycle(black_box(state));
            }
        })
    });
    group.finish();
}

criterion_group!(benches, insert_extract_churn);
criterion_main!(benches);
