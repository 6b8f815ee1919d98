//! Entity pools: bonuses that scale with a live population.

use std::sync::atomic::{AtomicU64, Ordering};

use idle_core::{Modifier, ModifierProvider, ProviderError, StatKey};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{ModifierSpec, scaled_modifiers};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PoolDefinition {
    pub id: String,
    /// Applied once per live entity.
    pub per_entity: Vec<ModifierSpec>,
    /// Population cap; unbounded when absent.
    #[serde(default)]
    pub capacity: Option<u64>,
}

/// A population counter whose size multiplies each per-entity effect.
///
/// Spawns and despawns do not touch the aggregator; recalculate afterwards.
pub struct EntityPool {
    definition: PoolDefinition,
    count: AtomicU64,
}

impl EntityPool {
    pub fn new(definition: PoolDefinition) -> Self {
        Self {
            definition,
            count: AtomicU64::new(0),
        }
    }

    pub fn id(&self) -> &str {
        &self.definition.id
    }

    /// Adds up to `n` entities, stopping at capacity. Returns the new count.
    pub fn spawn(&self, n: u64) -> u64 {
        let capacity = self.definition.capacity.unwrap_or(u64::MAX);
        let previous = self
            .count
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |count| {
                Some(count.saturating_add(n).min(capacity))
            })
            .unwrap_or_else(|count| count);
        let count = previous.saturating_add(n).min(capacity);

        debug!(
            target: "idle_content::pools",
            pool = %self.definition.id,
            requested = n,
            count,
            "Entities spawned"
        );
        count
    }

    /// Removes up to `n` entities, stopping at zero. Returns the new count.
    pub fn despawn(&self, n: u64) -> u64 {
        let previous = self
            .count
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |count| {
                Some(count.saturating_sub(n))
            })
            .unwrap_or_else(|count| count);
        let count = previous.saturating_sub(n);

        debug!(
            target: "idle_content::pools",
            pool = %self.definition.id,
            requested = n,
            count,
            "Entities despawned"
        );
        count
    }

    pub fn count(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }

    pub fn definition(&self) -> &PoolDefinition {
        &self.definition
    }
}

impl ModifierProvider for EntityPool {
    fn name(&self) -> &str {
        &self.definition.id
    }

    fn modifiers_for_stat(&self, stat: StatKey) -> Result<Vec<Modifier>, ProviderError> {
        let count = self.count();
        if count == 0 {
            return Ok(Vec::new());
        }
        Ok(scaled_modifiers(
            &self.definition.per_entity,
            stat,
            count as f64,
            &self.definition.id,
        )?)
    }
}

#[cfg(test)]
mod tests {
    use idle_core::{ModifierKind, ScaledNumber};

    use super::*;
    use crate::providers::Effect;

    fn slimes(capacity: Option<u64>) -> EntityPool {
        EntityPool::new(PoolDefinition {
            id: "slimes".to_owned(),
            per_entity: vec![ModifierSpec {
                stat: StatKey::PassiveIncome,
                effect: Effect::Additive(ScaledNumber::from_raw(2.5).unwrap()),
            }],
            capacity,
        })
    }

    #[test]
    fn spawn_and_despawn_track_count() {
        let pool = slimes(None);
        assert_eq!(pool.spawn(4), 4);
        assert_eq!(pool.spawn(2), 6);
        assert_eq!(pool.despawn(1), 5);
        assert_eq!(pool.count(), 5);
    }

    #[test]
    fn despawn_saturates_at_zero() {
        let pool = slimes(None);
        pool.spawn(2);
        assert_eq!(pool.despawn(10), 0);
        assert_eq!(pool.count(), 0);
    }

    #[test]
    fn spawn_stops_at_capacity() {
        let pool = slimes(Some(3));
        assert_eq!(pool.spawn(5), 3);
        assert_eq!(pool.spawn(1), 3);
    }

    #[test]
    fn contribution_scales_with_count() {
        let pool = slimes(None);
        assert!(pool.modifiers_for_stat(StatKey::PassiveIncome).unwrap().is_empty());

        pool.spawn(4);
        let modifiers = pool.modifiers_for_stat(StatKey::PassiveIncome).unwrap();
        assert_eq!(
            modifiers[0].kind(),
            ModifierKind::Additive(ScaledNumber::from_raw(10.0).unwrap())
        );
        assert!(pool.modifiers_for_stat(StatKey::ClickPower).unwrap().is_empty());
    }
}
