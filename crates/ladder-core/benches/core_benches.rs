//! Criterion benchmarks for ladder-core hot paths.
//!
//! Covers: full recompute, one mutation tick, and both read queries at the
//! default population.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::SeedableRng;
use rand::rngs::StdRng;

use ladder_core::constants::{DEFAULT_BATCH_SIZE, DEFAULT_POPULATION, DEFAULT_SCORE_RANGE, DEFAULT_TOP_N};
use ladder_core::RankingEngine;

fn seeded_engine() -> (RankingEngine, StdRng) {
    let mut rng = StdRng::seed_from_u64(42);
    let engine = RankingEngine::new();
    engine
        .initialize(DEFAULT_POPULATION, DEFAULT_SCORE_RANGE, &mut rng)
        .unwrap();
    (engine, rng)
}

fn bench_recompute(c: &mut Criterion) {
    let (engine, _) = seeded_engine();

    c.bench_function("recompute_10k", |b| b.iter(|| engine.recompute().unwrap()));
}

fn bench_tick(c: &mut Criterion) {
    let (engine, mut rng) = seeded_engine();

    c.bench_function("tick_batch_50_10k", |b| {
        b.iter(|| engine.tick(black_box(DEFAULT_BATCH_SIZE), &mut rng).unwrap())
    });
}

fn bench_queries(c: &mut Criterion) {
    let (engine, _) = seeded_engine();

    c.bench_function("top_10", |b| b.iter(|| engine.top(black_box(DEFAULT_TOP_N)).unwrap()));
    c.bench_function("search_user_42", |b| {
        b.iter(|| engine.search(black_box("user_42")).unwrap())
    });
}

criterion_group!(benches, bench_recompute, bench_tick, bench_queries);
criterion_main!(benches);
