//! Dense competition ranking.
//!
//! Entities are sorted by score descending; equal scores share a rank, and
//! the next distinct score gets its 1-based position, so ranks such as
//! `1, 1, 3, 4, 4, 4, 7` are expected. Ties are broken by ascending id,
//! which makes the order of tied entries in query results deterministic.
//!
//! Cost is O(N log N) for the sort plus one O(N) walk.

use std::cmp::Ordering;

use crate::error::RankViolation;
use crate::types::{Entity, Rank, Score};

/// Ordering used by [`recompute`]: higher score first, then lower id.
pub fn rank_order(a: &Entity, b: &Entity) -> Ordering {
    b.score().cmp(&a.score()).then_with(|| a.id().cmp(&b.id()))
}

/// Re-sort `entities` into rank order and reassign every rank.
pub fn recompute(entities: &mut [Entity]) {
    // (score, id) is a total order, so the unstable sort is deterministic.
    entities.sort_unstable_by(rank_order);

    let mut rank: Rank = 1;
    let mut prev: Option<Score> = None;
    for (i, entity) in entities.iter_mut().enumerate() {
        if prev != Some(entity.score()) {
            rank = i as Rank + 1;
        }
        entity.set_rank(rank);
        prev = Some(entity.score());
    }
}

/// Check that a sequence of `(score, rank)` pairs, in the order they were
/// served, is sorted by score descending and densely ranked:
/// `rank == 1 + |entries with a strictly greater score|`.
///
/// Only meaningful for a complete snapshot or a prefix of one (top-N).
pub fn verify_ranks<I>(entries: I) -> Result<(), RankViolation>
where
    I: IntoIterator<Item = (Score, Rank)>,
{
    let mut prev: Option<Score> = None;
    let mut group_rank: Rank = 1;

    for (position, (score, rank)) in entries.into_iter().enumerate() {
        match prev {
            Some(above) if above < score => {
                return Err(RankViolation::OutOfOrder {
                    position,
                    above,
                    below: score,
                });
            }
            Some(above) if above == score => {}
            _ => group_rank = position as Rank + 1,
        }

        if rank != group_rank {
            return Err(RankViolation::WrongRank {
                position,
                got: rank,
                expected: group_rank,
            });
        }
        prev = Some(score);
    }

    Ok(())
}

/// [`verify_ranks`] over entities in their current order.
pub fn verify_entities(entities: &[Entity]) -> Result<(), RankViolation> {
    verify_ranks(entities.iter().map(|e| (e.score(), e.rank())))
}
