//! Ranking engine: the single owner of all mutation and rank derivation.
//!
//! The [`RankingEngine`] wraps the [`EntityStore`] in a `parking_lot`
//! read-write lock. A mutation batch and the recompute that follows it run
//! inside one write-lock critical section, so a reader either sees the
//! ranking before the batch or after the recompute, never in between.
//! Readers take the shared lock and run concurrently with each other.
//!
//! The engine is an explicit handle: share it with `Arc` between the
//! periodic driver and any number of request handlers.

use std::time::{Duration, Instant};

use parking_lot::RwLock;
use tracing::{debug, info};

use crate::error::LadderError;
use crate::ranking;
use crate::store::EntityStore;
use crate::traits::RandomSource;
use crate::types::{DeltaRange, ScoreRange, Standing};

/// Locked state: the store plus how many recomputes it has been through.
#[derive(Debug)]
struct Board {
    store: EntityStore,
    generation: u64,
}

impl Board {
    fn recompute(&mut self) {
        ranking::recompute(self.store.entities_mut());
        self.generation += 1;
    }
}

/// Outcome of one [`RankingEngine::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    /// Generation published by the recompute that closed this batch.
    pub generation: u64,
    /// Score deltas applied (equals the requested batch size).
    pub mutations: usize,
    /// Wall time spent holding the write lock.
    pub elapsed: Duration,
}

/// A full, consistent copy of the ranking at one generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub generation: u64,
    pub standings: Vec<Standing>,
}

/// Thread-safe leaderboard: fixed population, periodic batched mutation,
/// dense competition ranks.
#[derive(Debug)]
pub struct RankingEngine {
    board: RwLock<Option<Board>>,
    deltas: DeltaRange,
}

impl RankingEngine {
    /// Create an uninitialized engine using the default delta range.
    ///
    /// Every query and mutation fails with [`LadderError::NotInitialized`]
    /// until [`initialize`](Self::initialize) succeeds.
    pub fn new() -> Self {
        Self::with_deltas(DeltaRange::default())
    }

    /// Create an uninitialized engine with a custom delta range.
    pub fn with_deltas(deltas: DeltaRange) -> Self {
        Self {
            board: RwLock::new(None),
            deltas,
        }
    }

    /// Create an engine already holding `store`, ranked once.
    pub fn with_store(store: EntityStore) -> Self {
        let engine = Self::new();
        engine.install(store);
        engine
    }

    /// Seed `population` entities with scores drawn uniformly from `range`
    /// and compute the initial ranking. May succeed only once.
    pub fn initialize(
        &self,
        population: usize,
        range: ScoreRange,
        rng: &mut impl RandomSource,
    ) -> Result<(), LadderError> {
        if self.board.read().is_some() {
            return Err(LadderError::AlreadyInitialized);
        }
        let store = EntityStore::create(population, range, rng)?;

        let mut guard = self.board.write();
        if guard.is_some() {
            return Err(LadderError::AlreadyInitialized);
        }
        let mut board = Board {
            store,
            generation: 0,
        };
        board.recompute();
        *guard = Some(board);

        info!(
            population,
            min = range.min(),
            max = range.max(),
            "engine: initialized"
        );
        Ok(())
    }

    fn install(&self, store: EntityStore) {
        let mut board = Board {
            store,
            generation: 0,
        };
        board.recompute();
        *self.board.write() = Some(board);
    }

    pub fn is_initialized(&self) -> bool {
        self.board.read().is_some()
    }

    /// Apply `batch_size` random score deltas, then recompute once.
    ///
    /// Entities are picked uniformly *with replacement*: one entity may be
    /// mutated several times in a batch. The whole batch plus the recompute
    /// holds the write lock.
    pub fn tick(
        &self,
        batch_size: usize,
        rng: &mut impl RandomSource,
    ) -> Result<TickReport, LadderError> {
        let mut guard = self.board.write();
        let board = guard.as_mut().ok_or(LadderError::NotInitialized)?;
        let started = Instant::now();

        let size = board.store.size();
        for _ in 0..batch_size {
            let index = rng.pick_index(size);
            let delta = rng.draw(self.deltas.as_inclusive());
            board.store.apply_delta(index, delta);
        }
        board.recompute();

        let report = TickReport {
            generation: board.generation,
            mutations: batch_size,
            elapsed: started.elapsed(),
        };
        debug_assert!(ranking::verify_entities(board.store.entities()).is_ok());

        debug!(
            generation = report.generation,
            mutations = report.mutations,
            elapsed_us = report.elapsed.as_micros() as u64,
            "engine: tick applied"
        );
        Ok(report)
    }

    /// Alias of [`tick`](Self::tick) named after the update step it performs.
    pub fn apply_mutation_batch(
        &self,
        batch_size: usize,
        rng: &mut impl RandomSource,
    ) -> Result<TickReport, LadderError> {
        self.tick(batch_size, rng)
    }

    /// Re-sort and re-rank without mutating any score.
    pub fn recompute(&self) -> Result<u64, LadderError> {
        let mut guard = self.board.write();
        let board = guard.as_mut().ok_or(LadderError::NotInitialized)?;
        board.recompute();
        Ok(board.generation)
    }

    /// The first `n` standings in rank order.
    ///
    /// `n` larger than the population is clamped to the population size.
    pub fn top(&self, n: usize) -> Result<Vec<Standing>, LadderError> {
        Ok(self.top_with_generation(n)?.standings)
    }

    /// [`top`](Self::top) together with the generation it was read at.
    pub fn top_with_generation(&self, n: usize) -> Result<Snapshot, LadderError> {
        let guard = self.board.read();
        let board = guard.as_ref().ok_or(LadderError::NotInitialized)?;
        let standings = board
            .store
            .iter()
            .take(n)
            .map(|e| e.standing())
            .collect();
        Ok(Snapshot {
            generation: board.generation,
            standings,
        })
    }

    /// Every entity whose name contains `substring`, case-insensitively,
    /// in rank order. The empty substring matches everything.
    pub fn search(&self, substring: &str) -> Result<Vec<Standing>, LadderError> {
        Ok(self.search_with_generation(substring)?.standings)
    }

    /// [`search`](Self::search) together with the generation it was read at.
    pub fn search_with_generation(&self, substring: &str) -> Result<Snapshot, LadderError> {
        let needle = substring.to_lowercase();
        let guard = self.board.read();
        let board = guard.as_ref().ok_or(LadderError::NotInitialized)?;
        let standings = board
            .store
            .iter()
            // Names are ASCII lowercase by construction.
            .filter(|e| e.name().contains(&needle))
            .map(|e| e.standing())
            .collect();
        Ok(Snapshot {
            generation: board.generation,
            standings,
        })
    }

    /// All standings in rank order.
    pub fn snapshot(&self) -> Result<Snapshot, LadderError> {
        let guard = self.board.read();
        let board = guard.as_ref().ok_or(LadderError::NotInitialized)?;
        Ok(Snapshot {
            generation: board.generation,
            standings: board.store.iter().map(|e| e.standing()).collect(),
        })
    }

    /// Population size. Constant once initialized.
    pub fn size(&self) -> Result<usize, LadderError> {
        let guard = self.board.read();
        guard
            .as_ref()
            .map(|b| b.store.size())
            .ok_or(LadderError::NotInitialized)
    }

    /// Number of completed recomputes, including the initial one.
    pub fn generation(&self) -> Result<u64, LadderError> {
        let guard = self.board.read();
        guard
            .as_ref()
            .map(|b| b.generation)
            .ok_or(LadderError::NotInitialized)
    }
}

impl Default for RankingEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{DEFAULT_SCORE_RANGE, MAX_SCORE, MIN_SCORE};
    use crate::types::{Rank, Score};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::VecDeque;
    use std::ops::RangeInclusive;

    // -------------------------------------------------------------------------
    // Helpers
    // -------------------------------------------------------------------------

    /// Replays a fixed list of `(index, delta)` picks.
    struct Scripted(VecDeque<(usize, Score)>);

    impl RandomSource for Scripted {
        fn pick_index(&mut self, len: usize) -> usize {
            let (idx, _) = self.0.front().copied().expect("script exhausted");
            assert!(idx < len);
            idx
        }

        fn draw(&mut self, _range: RangeInclusive<Score>) -> Score {
            self.0.pop_front().expect("script exhausted").1
        }
    }

    fn engine_with(scores: &[Score]) -> RankingEngine {
        RankingEngine::with_store(EntityStore::from_scores(scores, DEFAULT_SCORE_RANGE).unwrap())
    }

    fn ranks_by_id(engine: &RankingEngine) -> Vec<(String, Rank)> {
        let mut all: Vec<(String, Rank)> = engine
            .snapshot()
            .unwrap()
            .standings
            .into_iter()
            .map(|s| (s.name, s.rank))
            .collect();
        all.sort();
        all
    }

    // -------------------------------------------------------------------------
    // Tests
    // -------------------------------------------------------------------------

    #[test]
    fn queries_before_initialize_are_rejected() {
        let engine = RankingEngine::new();
        let mut rng = StdRng::seed_from_u64(0);

        assert_eq!(engine.top(10), Err(LadderError::NotInitialized));
        assert_eq!(engine.search("user"), Err(LadderError::NotInitialized));
        assert_eq!(engine.size(), Err(LadderError::NotInitialized));
        assert_eq!(engine.recompute(), Err(LadderError::NotInitialized));
        assert_eq!(
            engine.tick(5, &mut rng).unwrap_err(),
            LadderError::NotInitialized
        );
        assert!(!engine.is_initialized());
    }

    #[test]
    fn initialize_only_once() {
        let engine = RankingEngine::new();
        let mut rng = StdRng::seed_from_u64(1);

        engine.initialize(100, DEFAULT_SCORE_RANGE, &mut rng).unwrap();
        assert_eq!(engine.size(), Ok(100));
        assert_eq!(engine.generation(), Ok(1));
        assert_eq!(
            engine.initialize(100, DEFAULT_SCORE_RANGE, &mut rng),
            Err(LadderError::AlreadyInitialized)
        );
    }

    #[test]
    fn initialize_rejects_inverted_range() {
        let engine = RankingEngine::new();
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            engine.initialize(10, ScoreRange::new_unchecked(5000, 100), &mut rng),
            Err(LadderError::InvalidScoreRange { min: 5000, max: 100 })
        );
        assert!(!engine.is_initialized());
    }

    #[test]
    fn initialize_rejects_empty_population() {
        let engine = RankingEngine::new();
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            engine.initialize(0, DEFAULT_SCORE_RANGE, &mut rng),
            Err(LadderError::EmptyPopulation)
        );
        assert!(!engine.is_initialized());
    }

    #[test]
    fn top_three_of_tied_population() {
        let engine = engine_with(&[100, 100, 300, 300, 500]);
        let top = engine.top(3).unwrap();

        assert_eq!(top.len(), 3);
        assert_eq!((top[0].name.as_str(), top[0].rank, top[0].score), ("user_5", 1, 500));
        for s in &top[1..] {
            assert_eq!(s.score, 300);
            assert_eq!(s.rank, 2);
        }
    }

    #[test]
    fn top_clamps_to_population() {
        let engine = engine_with(&[100, 200, 300]);
        assert_eq!(engine.top(10).unwrap().len(), 3);
        assert!(engine.top(0).unwrap().is_empty());
    }

    #[test]
    fn search_is_substring_and_case_insensitive() {
        let scores: Vec<Score> = (1..=20).map(|i| 100 + i * 10).collect();
        let engine = engine_with(&scores);

        let mut names: Vec<String> = engine
            .search("USER_1")
            .unwrap()
            .into_iter()
            .map(|s| s.name)
            .collect();
        names.sort();

        let mut expected: Vec<String> = std::iter::once(1)
            .chain(10..=19)
            .map(|i| format!("user_{i}"))
            .collect();
        expected.sort();
        assert_eq!(names, expected);
    }

    #[test]
    fn search_results_follow_rank_order() {
        let scores: Vec<Score> = (1..=20).map(|i| 100 + i * 10).collect();
        let engine = engine_with(&scores);

        let hits = engine.search("user_1").unwrap();
        assert!(hits.windows(2).all(|w| w[0].rank <= w[1].rank));
        assert!(hits.windows(2).all(|w| w[0].score >= w[1].score));
        // user_19 has the highest score among the hits.
        assert_eq!(hits[0].name, "user_19");
        assert_eq!(hits[0].rank, 2);
    }

    #[test]
    fn empty_search_matches_everyone_and_misses_are_empty() {
        let engine = engine_with(&[100, 200, 300]);
        assert_eq!(engine.search("").unwrap().len(), 3);
        assert!(engine.search("nobody").unwrap().is_empty());
    }

    #[test]
    fn zero_batch_leaves_ranking_unchanged() {
        let engine = engine_with(&[400, 100, 400, 2500, 900]);
        let before = engine.snapshot().unwrap();

        let report = engine.tick(0, &mut StdRng::seed_from_u64(5)).unwrap();
        let after = engine.snapshot().unwrap();

        assert_eq!(report.mutations, 0);
        assert_eq!(before.standings, after.standings);
        assert_eq!(after.generation, before.generation + 1);
    }

    #[test]
    fn same_entity_can_be_hit_twice_in_one_batch() {
        let engine = engine_with(&[1000, 2000, 3000]);
        // Store order after seeding is rank order: index 2 is user_1 (1000).
        let mut script = Scripted(VecDeque::from(vec![(2, 99), (2, 99), (2, 99)]));

        engine.tick(3, &mut script).unwrap();

        let hits = engine.search("user_1").unwrap();
        assert_eq!(hits[0].score, 1297);
        assert_eq!(hits[0].rank, 3);
    }

    #[test]
    fn mutation_reorders_ranks() {
        let engine = engine_with(&[1000, 2000, 3000]);
        // Push user_1 (index 2 in rank order) past the ceiling.
        let mut script = Scripted(VecDeque::from(vec![(2, 99); 50]));
        engine.tick(50, &mut script).unwrap();

        let top = engine.top(1).unwrap();
        assert_eq!(top[0].name, "user_1");
        assert_eq!(top[0].score, MAX_SCORE);
        assert_eq!(top[0].rank, 1);
    }

    #[test]
    fn scores_stay_clamped_across_ticks() {
        let engine = RankingEngine::new();
        let mut rng = StdRng::seed_from_u64(11);
        engine.initialize(50, DEFAULT_SCORE_RANGE, &mut rng).unwrap();

        for _ in 0..200 {
            engine.tick(100, &mut rng).unwrap();
        }

        let snap = engine.snapshot().unwrap();
        assert_eq!(snap.standings.len(), 50);
        assert_eq!(snap.generation, 201);
        assert!(snap.standings.iter().all(|s| (MIN_SCORE..=MAX_SCORE).contains(&s.score)));
        assert!(ranking::verify_ranks(snap.standings.iter().map(|s| (s.score, s.rank))).is_ok());
    }

    #[test]
    fn explicit_recompute_is_idempotent() {
        let engine = engine_with(&[300, 300, 100, 4000]);
        let before = ranks_by_id(&engine);
        let g1 = engine.recompute().unwrap();
        let g2 = engine.recompute().unwrap();
        assert_eq!(g2, g1 + 1);
        assert_eq!(ranks_by_id(&engine), before);
    }

    #[test]
    fn custom_delta_range_is_respected() {
        let engine = RankingEngine::with_deltas(DeltaRange::new(0, 0).unwrap());
        let mut rng = StdRng::seed_from_u64(3);
        engine.initialize(10, DEFAULT_SCORE_RANGE, &mut rng).unwrap();
        let before = engine.snapshot().unwrap().standings;

        engine.tick(25, &mut rng).unwrap();
        assert_eq!(engine.snapshot().unwrap().standings, before);
    }
}
