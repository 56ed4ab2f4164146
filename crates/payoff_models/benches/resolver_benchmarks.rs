//! Benchmarks for catalog construction and name resolution.

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use payoff_models::catalog::ProductCatalog;
use payoff_models::resolver::{normalize, NameResolver};

fn benchmark_catalog_build(c: &mut Criterion) {
    c.bench_function("catalog_standard", |b| {
        b.iter(|| ProductCatalog::standard().map(|catalog| black_box(catalog.len())))
    });
}

fn benchmark_normalize(c: &mut Criterion) {
    c.bench_function("normalize_accented", |b| {
        b.iter(|| normalize(black_box("  Capital Protégé à 100% (Plafonné)  ")))
    });
}

fn benchmark_resolve(c: &mut Criterion) {
    let catalog = match ProductCatalog::standard() {
        Ok(catalog) => Arc::new(catalog),
        Err(err) => panic!("catalog failed to build: {err}"),
    };
    let resolver = NameResolver::new(catalog);
    let mut group = c.benchmark_group("resolve");

    for (label, name) in [
        ("exact", "Bull Call Spread"),
        ("normalized", "bull-call spread"),
        ("pattern_early", "Airbag Bonus Certificate"),
        ("pattern_late", "Vente de put"),
        ("unknown", "Totally Unknown Widget"),
    ] {
        group.bench_with_input(BenchmarkId::from_parameter(label), name, |b, name| {
            b.iter(|| resolver.resolve(black_box(name)))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_catalog_build,
    benchmark_normalize,
    benchmark_resolve
);
criterion_main!(benches);
