//! Modifiers - one provider's contribution to one stat.
//!
//! Providers build these fresh on every query; the aggregator consumes them
//! in order and never stores them beyond a breakdown.

use super::key::StatKey;
use crate::number::{NumberError, ScaledNumber};

/// How a modifier combines with the other contributions to its stat.
///
/// ```text
/// final = (base + Σ additive) × (1 + Σ multiplicative)
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ModifierKind {
    /// Flat amount added before multipliers.
    Additive(ScaledNumber),
    /// Fraction summed with other fractions (`0.1` = +10%).
    Multiplicative(f64),
}

/// An immutable contribution to a single stat.
#[derive(Clone, Debug, PartialEq)]
pub struct Modifier {
    stat: StatKey,
    kind: ModifierKind,
    source: String,
}

impl Modifier {
    /// Create a flat contribution.
    pub fn additive(stat: StatKey, amount: ScaledNumber, source: impl Into<String>) -> Self {
        Self {
            stat,
            kind: ModifierKind::Additive(amount),
            source: source.into(),
        }
    }

    /// Create a percentage contribution (`0.2` = +20%).
    ///
    /// # Errors
    ///
    /// Returns [`NumberError::InvalidNumber`] for a non-finite fraction.
    pub fn multiplicative(
        stat: StatKey,
        fraction: f64,
        source: impl Into<String>,
    ) -> Result<Self, NumberError> {
        if !fraction.is_finite() {
            return Err(NumberError::InvalidNumber { value: fraction });
        }
        Ok(Self {
            stat,
            kind: ModifierKind::Multiplicative(fraction),
            source: source.into(),
        })
    }

    pub fn stat(&self) -> StatKey {
        self.stat
    }

    pub fn kind(&self) -> ModifierKind {
        self.kind
    }

    /// Attribution label for UI and diagnostics; not an ownership reference.
    pub fn source(&self) -> &str {
        &self.source
    }
}
