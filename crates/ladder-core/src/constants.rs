//! Leaderboard constants. Scores are plain integers; ranks start at 1.

use crate::types::{Score, ScoreRange};

/// Lowest score any entity can hold. Mutations clamp up to this value.
pub const MIN_SCORE: Score = 100;

/// Highest score any entity can hold. Mutations clamp down to this value.
pub const MAX_SCORE: Score = 5000;

/// Inclusive score bounds used when none are configured.
///
/// # Examples
///
/// ```
/// use ladder_core::constants::{DEFAULT_SCORE_RANGE, MAX_SCORE, MIN_SCORE};
/// assert_eq!(DEFAULT_SCORE_RANGE.min(), MIN_SCORE);
/// assert_eq!(DEFAULT_SCORE_RANGE.max(), MAX_SCORE);
/// ```
pub const DEFAULT_SCORE_RANGE: ScoreRange = ScoreRange::new_unchecked(MIN_SCORE, MAX_SCORE);

/// Smallest per-mutation score delta (inclusive).
pub const DELTA_MIN: Score = -100;

/// Largest per-mutation score delta (inclusive).
pub const DELTA_MAX: Score = 99;

/// Prefix every entity name starts with. The id follows directly.
pub const NAME_PREFIX: &str = "user_";

/// Population seeded at startup when not configured.
pub const DEFAULT_POPULATION: usize = 10_000;

/// Score mutations applied per tick.
pub const DEFAULT_BATCH_SIZE: usize = 50;

/// Seconds between two ticks of the mutation driver.
pub const DEFAULT_TICK_INTERVAL_SECS: u64 = 3;

/// Number of standings served by the plain leaderboard endpoint.
pub const DEFAULT_TOP_N: usize = 10;

/// TCP port the server listens on when `PORT` is unset.
pub const DEFAULT_PORT: u16 = 9090;
