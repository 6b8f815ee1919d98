//! Stat identifiers.

/// Every stat the aggregator maintains a cached total for.
///
/// The set is closed: a recalculation pass walks all variants, so adding a
/// stat here is all it takes for it to be cached and queryable.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
    strum::EnumCount,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum StatKey {
    /// Resource gained per manual collection.
    ClickPower,
    /// Resource gained per second without interaction.
    PassiveIncome,
    /// Maximum resource that can be banked.
    ResourceCapacity,
    /// Entities spawned per minute.
    SpawnRate,
    /// Maximum number of live entities.
    EntityCapacity,
    /// Reach of the pickup cursor.
    PickupRadius,
    /// Fraction of passive income earned while the game is closed.
    OfflineEfficiency,
    /// Discount applied to upgrade prices.
    CostReduction,
}

impl StatKey {
    /// All stats in declaration order.
    pub fn all() -> impl Iterator<Item = StatKey> {
        <Self as strum::IntoEnumIterator>::iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::EnumCount;

    #[test]
    fn names_round_trip() {
        for stat in StatKey::all() {
            let name = stat.to_string();
            assert_eq!(name.parse::<StatKey>().unwrap(), stat);
        }
        assert_eq!(StatKey::PassiveIncome.as_ref(), "passive_income");
        assert_eq!("CLICK_POWER".parse::<StatKey>().unwrap(), StatKey::ClickPower);
    }

    #[test]
    fn all_covers_every_variant() {
        assert_eq!(StatKey::all().count(), StatKey::COUNT);
    }
}
