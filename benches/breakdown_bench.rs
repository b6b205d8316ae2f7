use criterion::{criterion_group, criterion_main, Criterion};
use flopmap::{compute_breakdown, Hyperparameters, PieChart};
use std::hint::black_box;

fn bench_breakdown(c: &mut Criterion) {
    let params = Hyperparameters::default();

    c.bench_function("compute_breakdown", |b| {
        b.iter(|| compute_breakdown(black_box(&params)))
    });

    let breakdown = compute_breakdown(&params).unwrap();
    c.bench_function("pie_chart_from_breakdown", |b| {
        b.iter(|| PieChart::from_breakdown(black_box(&breakdown)))
    });
}

criterion_group!(benches, bench_breakdown);
criterion_main!(benches);
