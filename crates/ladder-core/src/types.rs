//! Core leaderboard types: entities, standings, and score bounds.

use std::fmt;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::constants::{DELTA_MAX, DELTA_MIN, NAME_PREFIX};
use crate::error::LadderError;

/// Sequential entity identifier, `1..=N`.
pub type EntityId = u32;

/// Integer score. Signed so deltas can be applied before clamping.
pub type Score = i64;

/// 1-based dense competition rank. `0` means "not yet ranked".
pub type Rank = u32;

/// Build the display name for an entity id.
///
/// # Examples
///
/// ```
/// use ladder_core::types::entity_name;
/// assert_eq!(entity_name(42), "user_42");
/// ```
pub fn entity_name(id: EntityId) -> String {
    format!("{NAME_PREFIX}{id}")
}

// ---------------------------------------------------------------------------
// ScoreRange
// ---------------------------------------------------------------------------

/// Inclusive `[min, max]` bounds a score is clamped into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScoreRange {
    min: Score,
    max: Score,
}

impl ScoreRange {
    /// Validated constructor. Fails when `min > max`.
    pub fn new(min: Score, max: Score) -> Result<Self, LadderError> {
        if min > max {
            return Err(LadderError::InvalidScoreRange { min, max });
        }
        Ok(Self { min, max })
    }

    /// Const constructor for compile-time bounds. Inverted bounds are
    /// rejected later by [`EntityStore`](crate::store::EntityStore).
    pub const fn new_unchecked(min: Score, max: Score) -> Self {
        Self { min, max }
    }

    pub fn min(&self) -> Score {
        self.min
    }

    pub fn max(&self) -> Score {
        self.max
    }

    /// Clamp `score` into the range.
    pub fn clamp(&self, score: Score) -> Score {
        score.clamp(self.min, self.max)
    }

    pub fn contains(&self, score: Score) -> bool {
        (self.min..=self.max).contains(&score)
    }

    pub fn as_inclusive(&self) -> RangeInclusive<Score> {
        self.min..=self.max
    }
}

// ---------------------------------------------------------------------------
// DeltaRange
// ---------------------------------------------------------------------------

/// Inclusive range a single score mutation is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeltaRange {
    min: Score,
    max: Score,
}

impl DeltaRange {
    pub fn new(min: Score, max: Score) -> Result<Self, LadderError> {
        if min > max {
            return Err(LadderError::InvalidDeltaRange { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn as_inclusive(&self) -> RangeInclusive<Score> {
        self.min..=self.max
    }
}

impl Default for DeltaRange {
    fn default() -> Self {
        Self {
            min: DELTA_MIN,
            max: DELTA_MAX,
        }
    }
}

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// A ranked participant.
///
/// `id` and `name` never change after creation. `score` is only changed
/// through [`EntityStore::apply_delta`](crate::store::EntityStore::apply_delta)
/// and `rank` only by [`recompute`](crate::ranking::recompute).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    id: EntityId,
    name: String,
    score: Score,
    rank: Rank,
}

impl Entity {
    pub(crate) fn new(id: EntityId, score: Score) -> Self {
        Self {
            id,
            name: entity_name(id),
            score,
            rank: 0,
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn rank(&self) -> Rank {
        self.rank
    }

    pub(crate) fn set_score(&mut self, score: Score) {
        self.score = score;
    }

    pub(crate) fn set_rank(&mut self, rank: Rank) {
        self.rank = rank;
    }

    /// Read-side projection of this entity.
    pub fn standing(&self) -> Standing {
        Standing {
            rank: self.rank,
            name: self.name.clone(),
            score: self.score,
        }
    }
}

// ---------------------------------------------------------------------------
// Standing
// ---------------------------------------------------------------------------

/// One row of a query result: `(rank, name, score)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    pub rank: Rank,
    pub name: String,
    pub score: Score,
}

/// Line format served to text clients, e.g. `Rank: 1 | user_7 | Rating: 4999`.
impl fmt::Display for Standing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rank: {} | {} | Rating: {}", self.rank, self.name, self.score)
    }
}
