//! Fixed-population entity store.
//!
//! Holds every [`Entity`] in a single vector. Ids are exactly `1..=N`; no
//! entity is added or removed after creation. The vector order is whatever
//! the last [`recompute`](crate::ranking::recompute) left it as, so after a
//! recompute it is the rank order.

use tracing::debug;

use crate::error::LadderError;
use crate::traits::RandomSource;
use crate::types::{Entity, EntityId, Score, ScoreRange};

#[derive(Debug, Clone)]
pub struct EntityStore {
    entities: Vec<Entity>,
    range: ScoreRange,
}

impl EntityStore {
    /// Seed `count` entities with ids `1..=count` and scores drawn uniformly
    /// from `range`. Ranks are left at zero until the first recompute.
    pub fn create(
        count: usize,
        range: ScoreRange,
        rng: &mut impl RandomSource,
    ) -> Result<Self, LadderError> {
        let last = last_id(count)?;
        check_range(range)?;

        let entities = (1..=last)
            .map(|id| Entity::new(id, rng.draw(range.as_inclusive())))
            .collect();

        debug!(count, min = range.min(), max = range.max(), "store: seeded");

        Ok(Self { entities, range })
    }

    /// Build a store from explicit scores. Entity `i + 1` gets `scores[i]`,
    /// clamped into `range`.
    pub fn from_scores(scores: &[Score], range: ScoreRange) -> Result<Self, LadderError> {
        last_id(scores.len())?;
        check_range(range)?;

        let entities = (1..)
            .zip(scores)
            .map(|(id, &s)| Entity::new(id, range.clamp(s)))
            .collect();

        Ok(Self { entities, range })
    }

    /// Number of entities. Constant for the lifetime of the store.
    pub fn size(&self) -> usize {
        self.entities.len()
    }

    /// Entity at position `index` in the current order.
    pub fn get(&self, index: usize) -> Option<&Entity> {
        self.entities.get(index)
    }

    /// Linear lookup by id.
    pub fn entity_by_id(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id() == id)
    }

    /// Iterate in the current order.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub(crate) fn entities_mut(&mut self) -> &mut [Entity] {
        &mut self.entities
    }

    /// Add `delta` to the score of the entity at `index`, then clamp.
    ///
    /// Returns the new score. Panics if `index` is out of bounds; callers
    /// draw `index` from `0..size()`.
    pub fn apply_delta(&mut self, index: usize, delta: Score) -> Score {
        let range = self.range;
        let entity = &mut self.entities[index];
        let next = range.clamp(entity.score().saturating_add(delta));
        entity.set_score(next);
        next
    }
}

/// Highest id for a population of `count`. Ids must fit [`EntityId`].
fn last_id(count: usize) -> Result<EntityId, LadderError> {
    if count == 0 {
        return Err(LadderError::EmptyPopulation);
    }
    EntityId::try_from(count).map_err(|_| LadderError::PopulationTooLarge { count })
}

fn check_range(range: ScoreRange) -> Result<(), LadderError> {
    if range.min() > range.max() {
        return Err(LadderError::InvalidScoreRange {
            min: range.min(),
            max: range.max(),
        });
    }
    Ok(())
}
