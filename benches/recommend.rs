//! Recommendation benchmarks
//!
//! - Single query against the built-in catalog (with and without jitter)
//! - Parallel batch over all regional defaults
//!
//! Run with: cargo bench --bench recommend

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use crop_recommender::regional::REGIONAL_DEFAULTS;
use crop_recommender::{CropCatalog, JitterMode, NoJitter, RandomJitter, Recommender, SoilQuery};
use std::sync::Arc;

fn recommender() -> Recommender {
    Recommender::new(Arc::new(CropCatalog::builtin().unwrap()))
}

// ============================================================================
// Single Query
// ============================================================================

fn bench_single(c: &mut Criterion) {
    let recommender = recommender();
    let query = REGIONAL_DEFAULTS[0].to_query();
    let mut group = c.benchmark_group("recommend");

    group.bench_function("no_jitter", |b| {
        b.iter(|| recommender.recommend(black_box(&query), &mut NoJitter).unwrap())
    });

    group.bench_function("seeded_jitter", |b| {
        let mut jitter = RandomJitter::seeded(42);
        b.iter(|| recommender.recommend(black_box(&query), &mut jitter).unwrap())
    });

    group.finish();
}

// ============================================================================
// Batch
// ============================================================================

fn bench_batch(c: &mut Criterion) {
    let recommender = recommender();
    let mut group = c.benchmark_group("recommend_batch");

    for repeat in [1usize, 10, 100] {
        let queries: Vec<SoilQuery> = REGIONAL_DEFAULTS
            .iter()
            .cycle()
            .take(REGIONAL_DEFAULTS.len() * repeat)
            .map(|r| r.to_query())
            .collect();

        group.throughput(Throughput::Elements(queries.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(queries.len()), &queries, |b, q| {
            b.iter(|| recommender.recommend_batch(black_box(q), JitterMode::Seeded(7)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_single, bench_batch);
criterion_main!(benches);
