//! Decomposed view of one stat's computed value.

use super::key::StatKey;
use super::modifier::Modifier;
use crate::number::ScaledNumber;

/// `(base + additive_total) × (1 + multiplicative_total) = final_value`, with attribution.
///
/// Recomputed on every reduction; only `final_value` is cached by the aggregator.
#[derive(Clone, Debug, PartialEq)]
pub struct StatBreakdown {
    pub stat: StatKey,
    pub base: ScaledNumber,
    pub additive_total: ScaledNumber,
    pub multiplicative_total: f64,
    pub final_value: ScaledNumber,
    /// Every modifier that matched `stat`, in summation order.
    pub contributions: Vec<Modifier>,
    /// Providers whose query failed during this reduction.
    pub failed_providers: Vec<String>,
}

impl StatBreakdown {
    /// Breakdown with no contributions; `final_value == base`.
    pub fn empty(stat: StatKey, base: ScaledNumber) -> Self {
        Self {
            stat,
            base,
            additive_total: ScaledNumber::ZERO,
            multiplicative_total: 0.0,
            final_value: base,
            contributions: Vec::new(),
            failed_providers: Vec::new(),
        }
    }

    /// `1 + multiplicative_total`.
    pub fn multiplier(&self) -> f64 {
        1.0 + self.multiplicative_total
    }

    /// True when every provider answered.
    pub fn is_complete(&self) -> bool {
        self.failed_providers.is_empty()
    }

    /// Source labels of the contributions, in summation order.
    pub fn sources(&self) -> impl Iterator<Item = &str> + '_ {
        self.contributions.iter().map(Modifier::source)
    }
}
