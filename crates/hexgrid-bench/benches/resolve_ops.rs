//! Criterion micro-benchmarks for hit-testing.

use criterion::{criterion_group, criterion_main, Criterion};
use hexgrid_bench::{probe_points, reference_layout, reference_shape};
use std::hint::black_box;

/// Benchmark: resolve 10K points over and around a 100x100 grid.
fn bench_resolve_reference(c: &mut Criterion) {
    let layout = reference_layout(reference_shape(), 1024.0, 1024.0);
    let points = probe_points(1024.0, 1024.0, 10_000);

    c.bench_function("resolve_address_10k", |b| {
        b.iter(|| {
            let mut hits = 0usize;
            for &(x, y) in &points {
                hits += usize::from(layout.resolve_address(x, y).is_some());
            }
            black_box(hits);
        });
    });
}

criterion_group!(benches, bench_resolve_reference);
criterion_main!(benches);
