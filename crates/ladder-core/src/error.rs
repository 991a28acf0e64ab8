//! Error types for the ladder core.
use thiserror::Error;

use crate::types::{Rank, Score};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LadderError {
    #[error("leaderboard not initialized")] NotInitialized,
    #[error("leaderboard already initialized")] AlreadyInitialized,
    #[error("population must hold at least one entity")] EmptyPopulation,
    #[error("population of {count} exceeds the entity id space")] PopulationTooLarge { count: usize },
    #[error("invalid score range: {min}..={max}")] InvalidScoreRange { min: Score, max: Score },
    #[error("invalid delta range: {min}..={max}")] InvalidDeltaRange { min: Score, max: Score },
}

/// A rank assignment that breaks dense competition ranking.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RankViolation {
    #[error("entries out of order at position {position}: {above} above {below}")]
    OutOfOrder { position: usize, above: Score, below: Score },
    #[error("entry at position {position} has rank {got}, expected {expected}")]
    WrongRank { position: usize, got: Rank, expected: Rank },
}
