//! Trait interfaces consumed by the ladder core.
//!
//! - [`RandomSource`] — uniform integer draws used for seeding and mutation.
//!   Every `rand` generator implements it; tests can script their own.

use std::ops::RangeInclusive;

use rand::{Rng, RngCore};

use crate::types::Score;

/// Source of uniform random integers.
///
/// Must support both "uniform entity index" and "uniform value in range"
/// draws. Callers never pass an empty range or `len == 0`.
pub trait RandomSource: Send {
    /// Uniform index in `0..len`.
    fn pick_index(&mut self, len: usize) -> usize;

    /// Uniform value in the inclusive `range`.
    fn draw(&mut self, range: RangeInclusive<Score>) -> Score;
}

impl<R: RngCore + Send> RandomSource for R {
    fn pick_index(&mut self, len: usize) -> usize {
        self.gen_range(0..len)
    }

    fn draw(&mut self, range: RangeInclusive<Score>) -> Score {
        self.gen_range(range)
    }
}
