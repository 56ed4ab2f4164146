//! Benchmarks for curve sampling.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use payoff_engine::config::EngineConfig;
use payoff_engine::PayoffEngine;

fn standard_engine() -> PayoffEngine {
    match PayoffEngine::standard(EngineConfig::default()) {
        Ok(engine) => engine,
        Err(err) => panic!("engine failed to build: {err}"),
    }
}

fn benchmark_sample_point_counts(c: &mut Criterion) {
    let engine = standard_engine();
    let handle = match engine.resolve("Bull Call Spread").into_resolved() {
        Some(handle) => handle,
        None => panic!("Bull Call Spread missing from the catalog"),
    };
    let mut group = c.benchmark_group("sample_point_count");

    for point_count in [60, 120, 600, 2400] {
        group.bench_with_input(
            BenchmarkId::from_parameter(point_count),
            &point_count,
            |b, &point_count| b.iter(|| engine.sample(&handle, black_box(100.0), point_count)),
        );
    }

    group.finish();
}

fn benchmark_sample_variants(c: &mut Criterion) {
    let engine = standard_engine();
    let mut group = c.benchmark_group("sample_variant");

    for (label, name) in [
        ("standard", "Straddle"),
        ("multi_curve", "Capital Protected Note"),
        ("multi_year", "Phoenix Memory Autocall"),
    ] {
        let handle = match engine.resolve(name).into_resolved() {
            Some(handle) => handle,
            None => panic!("{name} missing from the catalog"),
        };
        group.bench_with_input(BenchmarkId::from_parameter(label), &handle, |b, handle| {
            b.iter(|| engine.sample_default(black_box(handle)))
        });
    }

    group.finish();
}

fn benchmark_plot(c: &mut Criterion) {
    let engine = standard_engine();
    c.bench_function("plot_by_pattern", |b| {
        b.iter(|| engine.plot(black_box("Reverse Convertible Barrière")))
    });
}

criterion_group!(
    benches,
    benchmark_sample_point_counts,
    benchmark_sample_variants,
    benchmark_plot
);
criterion_main!(benches);
