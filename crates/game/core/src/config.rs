/// Display formatting parameters for [`ScaledNumber`](crate::ScaledNumber).
///
/// Sub-1000 values are treated as "precise" and shown with more decimals than
/// tiered values (`"999.00"` vs `"1.5K"`). Persisted text never goes through
/// this config; see [`ScaledNumber::format_full`](crate::ScaledNumber::format_full).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FormatConfig {
    /// Decimal places for values at magnitude 0.
    pub small_decimals: usize,
    /// Decimal places for values at magnitude 1 and above.
    pub large_decimals: usize,
}

impl FormatConfig {
    // ===== runtime-tunable defaults =====
    pub const DEFAULT_SMALL_DECIMALS: usize = 2;
    pub const DEFAULT_LARGE_DECIMALS: usize = 1;

    pub const fn new() -> Self {
        Self {
            small_decimals: Self::DEFAULT_SMALL_DECIMALS,
            large_decimals: Self::DEFAULT_LARGE_DECIMALS,
        }
    }

    pub const fn with_decimals(small_decimals: usize, large_decimals: usize) -> Self {
        Self {
            small_decimals,
            large_decimals,
        }
    }

    /// Default decimal count for a value at the given magnitude tier.
    pub const fn decimals_for(&self, magnitude: i32) -> usize {
        if magnitude == 0 {
            self.small_decimals
        } else {
            self.large_decimals
        }
    }
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self::new()
    }
}
