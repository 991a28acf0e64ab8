//! Shared fixtures for integration tests.

use ladder_core::constants::DEFAULT_SCORE_RANGE;
use ladder_core::ranking::verify_ranks;
use ladder_core::{EntityStore, RankViolation, RankingEngine, Score, Standing};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Deterministic RNG for a test.
pub fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Engine holding exactly `scores` (entity `i + 1` gets `scores[i]`).
pub fn engine_from_scores(scores: &[Score]) -> RankingEngine {
    let store = EntityStore::from_scores(scores, DEFAULT_SCORE_RANGE)
        .expect("fixture scores must be non-empty");
    RankingEngine::with_store(store)
}

/// Engine seeded with `population` random entities.
pub fn seeded_engine(population: usize, seed: u64) -> RankingEngine {
    let engine = RankingEngine::new();
    engine
        .initialize(population, DEFAULT_SCORE_RANGE, &mut rng(seed))
        .expect("seeding must succeed");
    engine
}

/// Rank-density check on a served list of standings.
pub fn check_standings(standings: &[Standing]) -> Result<(), RankViolation> {
    verify_ranks(standings.iter().map(|s| (s.score, s.rank)))
}

/// `(name, rank, score)` sorted by name, for order-insensitive comparison.
pub fn by_name(standings: &[Standing]) -> Vec<(String, u32, Score)> {
    let mut rows: Vec<_> = standings
        .iter()
        .map(|s| (s.name.clone(), s.rank, s.score))
        .collect();
    rows.sort();
    rows
}
