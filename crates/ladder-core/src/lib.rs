//! # ladder-core — Live leaderboard ranking engine.
//!
//! Maintains a fixed population of scored entities and a dense competition
//! ranking over them:
//! - [`store::EntityStore`] — the entity collection, seeded once
//! - [`ranking`] — sort + dense competition rank assignment
//! - [`engine::RankingEngine`] — batched mutation and consistent reads
//!   behind a single read-write lock
//! - [`traits::RandomSource`] — uniform draws for seeding and mutation

pub mod constants;
pub mod engine;
pub mod error;
pub mod ranking;
pub mod store;
pub mod traits;
pub mod types;

pub use engine::{RankingEngine, Snapshot, TickReport};
pub use error::{LadderError, RankViolation};
pub use store::EntityStore;
pub use traits::RandomSource;
pub use types::{DeltaRange, Entity, EntityId, Rank, Score, ScoreRange, Standing};
