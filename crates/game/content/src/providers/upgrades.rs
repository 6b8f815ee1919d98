//! Purchasable, levelled upgrades.

use std::collections::HashSet;
use std::sync::atomic::{AtomicU32, Ordering};

use idle_core::{
    CoreError, ErrorSeverity, Modifier, ModifierProvider, ProviderError, ScaledNumber, StatKey,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::Effect;

/// Static description of one upgrade, as stored in `upgrades.ron`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UpgradeDefinition {
    pub id: String,
    pub stat: StatKey,
    /// Applied once per purchased level.
    pub effect: Effect,
    pub max_level: u32,
    pub base_cost: ScaledNumber,
    /// Cost multiplier per level already owned; at least `1.0`.
    pub cost_growth: f64,
}

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum UpgradeError {
    #[error("unknown upgrade: {id}")]
    UnknownUpgrade { id: String },

    #[error("upgrade {id} is already at max level {max_level}")]
    MaxLevel { id: String, max_level: u32 },

    #[error("upgrade {id} is defined more than once")]
    DuplicateUpgrade { id: String },

    #[error("upgrade {id} has invalid cost growth {growth}")]
    InvalidGrowth { id: String, growth: f64 },
}

impl CoreError for UpgradeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnknownUpgrade { .. } | Self::MaxLevel { .. } => ErrorSeverity::Validation,
            Self::DuplicateUpgrade { .. } | Self::InvalidGrowth { .. } => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownUpgrade { .. } => "UPGRADE_UNKNOWN",
            Self::MaxLevel { .. } => "UPGRADE_MAX_LEVEL",
            Self::DuplicateUpgrade { .. } => "UPGRADE_DUPLICATE",
            Self::InvalidGrowth { .. } => "UPGRADE_INVALID_GROWTH",
        }
    }
}

struct Upgrade {
    definition: UpgradeDefinition,
    growth: ScaledNumber,
    level: AtomicU32,
}

/// A named set of upgrades and their purchased levels.
///
/// Contributes `effect × level` for every upgrade with at least one level, in
/// definition order.
pub struct UpgradeTree {
    name: String,
    upgrades: Vec<Upgrade>,
}

impl UpgradeTree {
    /// Builds a tree with every upgrade at level zero.
    ///
    /// # Errors
    ///
    /// Rejects repeated ids and a `cost_growth` that is not a finite value of at least `1.0`.
    pub fn new(
        name: impl Into<String>,
        definitions: Vec<UpgradeDefinition>,
    ) -> Result<Self, UpgradeError> {
        let mut seen = HashSet::new();
        let mut upgrades = Vec::with_capacity(definitions.len());

        for definition in definitions {
            if !seen.insert(definition.id.clone()) {
                return Err(UpgradeError::DuplicateUpgrade { id: definition.id });
            }
            let growth = definition.cost_growth;
            let growth = match ScaledNumber::from_raw(growth) {
                Ok(scaled) if growth >= 1.0 => scaled,
                _ => {
                    return Err(UpgradeError::InvalidGrowth {
                        id: definition.id,
                        growth,
                    });
                }
            };
            upgrades.push(Upgrade {
                definition,
                growth,
                level: AtomicU32::new(0),
            });
        }

        Ok(Self {
            name: name.into(),
            upgrades,
        })
    }

    /// Buys one level of `id` and returns the new level.
    ///
    /// Does not charge anything; pair with [`next_cost`](Self::next_cost) and
    /// [`ScaledNumber::checked_spend`] to deduct the price. The caller must
    /// recalculate the aggregator afterwards.
    pub fn purchase(&self, id: &str) -> Result<u32, UpgradeError> {
        let upgrade = self.find(id)?;
        let max_level = upgrade.definition.max_level;

        let level = upgrade
            .level
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |level| {
                (level < max_level).then_some(level + 1)
            })
            .map(|previous| previous + 1)
            .map_err(|_| UpgradeError::MaxLevel {
                id: id.to_owned(),
                max_level,
            })?;

        debug!(
            target: "idle_content::upgrades",
            tree = %self.name,
            upgrade = id,
            level,
            "Upgrade purchased"
        );
        Ok(level)
    }

    /// Sets the level of `id` directly, clamped to its max level (save restore).
    pub fn set_level(&self, id: &str, level: u32) -> Result<u32, UpgradeError> {
        let upgrade = self.find(id)?;
        let level = level.min(upgrade.definition.max_level);
        upgrade.level.store(level, Ordering::Relaxed);
        Ok(level)
    }

    pub fn level(&self, id: &str) -> Result<u32, UpgradeError> {
        Ok(self.find(id)?.level.load(Ordering::Relaxed))
    }

    /// Price of the next level: `base_cost × cost_growth^level`.
    ///
    /// Returns [`UpgradeError::MaxLevel`] once nothing is left to buy.
    pub fn next_cost(&self, id: &str) -> Result<ScaledNumber, UpgradeError> {
        let upgrade = self.find(id)?;
        let level = upgrade.level.load(Ordering::Relaxed);
        if level >= upgrade.definition.max_level {
            return Err(UpgradeError::MaxLevel {
                id: id.to_owned(),
                max_level: upgrade.definition.max_level,
            });
        }
        Ok(upgrade
            .definition
            .base_cost
            .multiply(compound(upgrade.growth, level)))
    }

    /// Definitions in declaration order.
    pub fn definitions(&self) -> impl Iterator<Item = &UpgradeDefinition> + '_ {
        self.upgrades.iter().map(|upgrade| &upgrade.definition)
    }

    pub fn len(&self) -> usize {
        self.upgrades.len()
    }

    pub fn is_empty(&self) -> bool {
        self.upgrades.is_empty()
    }

    fn find(&self, id: &str) -> Result<&Upgrade, UpgradeError> {
        self.upgrades
            .iter()
            .find(|upgrade| upgrade.definition.id == id)
            .ok_or_else(|| UpgradeError::UnknownUpgrade { id: id.to_owned() })
    }
}

impl ModifierProvider for UpgradeTree {
    fn name(&self) -> &str {
        &self.name
    }

    fn modifiers_for_stat(&self, stat: StatKey) -> Result<Vec<Modifier>, ProviderError> {
        let mut modifiers = Vec::new();
        for upgrade in &self.upgrades {
            if upgrade.definition.stat != stat {
                continue;
            }
            let level = upgrade.level.load(Ordering::Relaxed);
            if level == 0 {
                continue;
            }
            modifiers.push(upgrade.definition.effect.scaled(
                stat,
                f64::from(level),
                upgrade.definition.id.as_str(),
            )?);
        }
        Ok(modifiers)
    }
}

/// `growth^exponent` by repeated squaring, staying in tiered form throughout.
fn compound(growth: ScaledNumber, mut exponent: u32) -> ScaledNumber {
    let mut result = ScaledNumber::ONE;
    let mut factor = growth;
    while exponent > 0 {
        if exponent & 1 == 1 {
            result = result.multiply(factor);
        }
        factor = factor.multiply(factor);
        exponent >>= 1;
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use idle_core::ModifierKind;

    fn raw(value: f64) -> ScaledNumber {
        ScaledNumber::from_raw(value).unwrap()
    }

    fn definition(id: &str, effect: Effect, max_level: u32, growth: f64) -> UpgradeDefinition {
        UpgradeDefinition {
            id: id.to_owned(),
            stat: StatKey::ClickPower,
            effect,
            max_level,
            base_cost: raw(10.0),
            cost_growth: growth,
        }
    }

    fn tree() -> UpgradeTree {
        UpgradeTree::new(
            "upgrades",
            vec![
                definition("gloves", Effect::Additive(raw(5.0)), 3, 2.0),
                definition("frenzy", Effect::Multiplicative(0.1), 10, 1.5),
            ],
        )
        .unwrap()
    }

    #[test]
    fn purchase_raises_level_until_max() {
        let tree = tree();
        assert_eq!(tree.level("gloves").unwrap(), 0);
        assert_eq!(tree.purchase("gloves").unwrap(), 1);
        assert_eq!(tree.purchase("gloves").unwrap(), 2);
        assert_eq!(tree.purchase("gloves").unwrap(), 3);
        assert_eq!(
            tree.purchase("gloves"),
            Err(UpgradeError::MaxLevel {
                id: "gloves".to_owned(),
                max_level: 3
            })
        );
        assert_eq!(tree.level("gloves").unwrap(), 3);
    }

    #[test]
    fn unknown_upgrade_is_an_error() {
        let error = tree().purchase("nope").unwrap_err();
        assert_eq!(error.error_code(), "UPGRADE_UNKNOWN");
        assert_eq!(error.severity(), ErrorSeverity::Validation);
    }

    #[test]
    fn next_cost_grows_geometrically() {
        let tree = tree();
        assert_eq!(tree.next_cost("gloves").unwrap(), raw(10.0));
        tree.purchase("gloves").unwrap();
        tree.purchase("gloves").unwrap();
        assert_eq!(tree.next_cost("gloves").unwrap(), raw(40.0));
        tree.purchase("gloves").unwrap();
        assert!(matches!(
            tree.next_cost("gloves"),
            Err(UpgradeError::MaxLevel { .. })
        ));
    }

    #[test]
    fn compound_handles_exponents_past_f64_range() {
        let growth = raw(10.0);
        let big = compound(growth, 400);
        assert_eq!(big.magnitude(), 133);
        assert!(big.mantissa() > 9.99 && big.mantissa() < 10.01);
    }

    #[test]
    fn contributes_effect_times_level() {
        let tree = tree();
        assert!(tree.modifiers_for_stat(StatKey::ClickPower).unwrap().is_empty());

        tree.purchase("gloves").unwrap();
        tree.purchase("gloves").unwrap();
        tree.purchase("frenzy").unwrap();

        let modifiers = tree.modifiers_for_stat(StatKey::ClickPower).unwrap();
        assert_eq!(modifiers.len(), 2);
        assert_eq!(modifiers[0].kind(), ModifierKind::Additive(raw(10.0)));
        assert_eq!(modifiers[0].source(), "gloves");
        assert_eq!(modifiers[1].kind(), ModifierKind::Multiplicative(0.1));
        assert!(tree.modifiers_for_stat(StatKey::SpawnRate).unwrap().is_empty());
    }

    #[test]
    fn set_level_clamps_to_max() {
        let tree = tree();
        assert_eq!(tree.set_level("gloves", 99).unwrap(), 3);
        assert_eq!(tree.level("gloves").unwrap(), 3);
    }

    #[test]
    fn rejects_duplicate_ids_and_bad_growth() {
        let duplicate = UpgradeTree::new(
            "upgrades",
            vec![
                definition("gloves", Effect::Multiplicative(0.1), 1, 1.0),
                definition("gloves", Effect::Multiplicative(0.1), 1, 1.0),
            ],
        );
        assert!(matches!(
            duplicate,
            Err(UpgradeError::DuplicateUpgrade { .. })
        ));

        for growth in [0.5, f64::NAN, f64::INFINITY] {
            let result = UpgradeTree::new(
                "upgrades",
                vec![definition("gloves", Effect::Multiplicative(0.1), 1, growth)],
            );
            assert!(matches!(result, Err(UpgradeError::InvalidGrowth { .. })));
        }
    }
}
