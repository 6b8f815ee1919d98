//! Concrete [`ModifierProvider`](idle_core::ModifierProvider) implementations.
//!
//! Each provider pairs an immutable definition (deserialized from content
//! files) with whatever live state scales it: purchased levels for upgrades,
//! population for entity pools, nothing for zones.

pub mod pools;
pub mod upgrades;
pub mod zones;

pub use pools::{EntityPool, PoolDefinition};
pub use upgrades::{UpgradeDefinition, UpgradeError, UpgradeTree};
pub use zones::{ZoneDefinition, ZoneEffect};

use idle_core::{Modifier, NumberError, ScaledNumber, StatKey};
use serde::{Deserialize, Serialize};

/// Per-unit effect of a content entry.
///
/// RON form: `Additive("1.5K")` or `Multiplicative(0.1)`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Effect {
    /// Flat amount per unit.
    Additive(ScaledNumber),
    /// Fraction per unit (`0.1` = +10%).
    Multiplicative(f64),
}

impl Effect {
    /// Builds the modifier for `units` applications of this effect.
    ///
    /// # Errors
    ///
    /// Returns [`NumberError::InvalidNumber`] if a multiplicative total is not finite.
    pub fn scaled(
        self,
        stat: StatKey,
        units: f64,
        source: impl Into<String>,
    ) -> Result<Modifier, NumberError> {
        match self {
            Self::Additive(amount) => Ok(Modifier::additive(
                stat,
                amount.multiply_scalar(units),
                source,
            )),
            Self::Multiplicative(fraction) => {
                Modifier::multiplicative(stat, fraction * units, source)
            }
        }
    }
}

/// One stat/effect pair in a zone or pool definition.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModifierSpec {
    pub stat: StatKey,
    pub effect: Effect,
}

/// Modifiers for `stat` from `specs`, each applied `units` times.
pub(crate) fn scaled_modifiers(
    specs: &[ModifierSpec],
    stat: StatKey,
    units: f64,
    source: &str,
) -> Result<Vec<Modifier>, NumberError> {
    specs
        .iter()
        .filter(|spec| spec.stat == stat)
        .map(|spec| spec.effect.scaled(stat, units, source))
        .collect()
}
