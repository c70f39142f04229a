//! Benchmarks for the shelf fill allocator.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use shelfgrid_core::Catalog;
use shelfgrid_engine::{fill_shelf, Shelf, ShelfConfig};

fn fill_benchmark(c: &mut Criterion) {
    c.bench_function("fill_8_column_shelf", |b| {
        b.iter(|| {
            let mut shelf = Shelf::new(Catalog::standard(), ShelfConfig::default());
            for i in 0..8 {
                shelf.add_column(60.0 + (i % 3) as f64 * 20.0, 220.0).unwrap();
            }
            let report = fill_shelf(black_box(&mut shelf)).unwrap();
            black_box(report)
        })
    });
}

criterion_group!(benches, fill_benchmark);
criterion_main!(benches);
