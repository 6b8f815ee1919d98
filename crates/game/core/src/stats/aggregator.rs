//! Provider registry and per-stat cache.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::{debug, error, trace, warn};

use super::breakdown::StatBreakdown;
use super::key::StatKey;
use super::modifier::ModifierKind;
use super::provider::ModifierProvider;
use crate::error::CoreError;
use crate::number::ScaledNumber;

/// Owns the registered providers and one cached total per stat.
///
/// The aggregator is constructed once by whatever orchestrates game events and
/// passed by reference to collaborators. Collaborators hand it provider
/// handles; providers never reach back into it.
///
/// # Recalculation
///
/// Every registration change triggers a full rebuild of the cache. Other
/// events that change a provider's answers (an entity spawned, an upgrade
/// bought) must be followed by an explicit [`recalculate_all`](Self::recalculate_all).
///
/// # Ordering
///
/// Contributions are summed in provider registration order, then in the order
/// each provider returns them. Registering the same providers in a different
/// order may change the low bits of the cached totals.
///
/// # Example
/// ```
/// # use std::sync::Arc;
/// # use idle_core::{Modifier, ModifierProvider, ProviderError, ScaledNumber, StatAggregator, StatKey};
/// struct Cursor;
///
/// impl ModifierProvider for Cursor {
///     fn name(&self) -> &str {
///         "cursor"
///     }
///
///     fn modifiers_for_stat(&self, stat: StatKey) -> Result<Vec<Modifier>, ProviderError> {
///         Ok(match stat {
///             StatKey::ClickPower => {
///                 vec![Modifier::additive(stat, ScaledNumber::from_raw(5.0)?, "cursor")]
///             }
///             _ => Vec::new(),
///         })
///     }
/// }
///
/// let mut stats = StatAggregator::new();
/// stats.register_provider(Arc::new(Cursor));
/// assert_eq!(stats.query(StatKey::ClickPower), ScaledNumber::from_raw(5.0).unwrap());
/// ```
pub struct StatAggregator {
    providers: Vec<Arc<dyn ModifierProvider>>,
    cache: RefCell<StatCache>,
}

#[derive(Default)]
struct StatCache {
    values: HashMap<StatKey, ScaledNumber>,
    generation: u64,
}

impl StatAggregator {
    /// Creates an aggregator with no providers and an unpopulated cache.
    pub fn new() -> Self {
        Self {
            providers: Vec::new(),
            cache: RefCell::new(StatCache::default()),
        }
    }

    /// Creates an aggregator from an initial provider set with a single recalculation.
    ///
    /// Duplicates are skipped exactly as [`register_provider`](Self::register_provider) would.
    pub fn with_providers(providers: impl IntoIterator<Item = Arc<dyn ModifierProvider>>) -> Self {
        let mut aggregator = Self::new();
        for provider in providers {
            aggregator.insert(provider);
        }
        aggregator.recalculate_all();
        aggregator
    }

    /// Appends `provider` unless it is already registered, then recalculates.
    ///
    /// Returns `true` if the provider was newly added. Identity is the handle's
    /// allocation, not the provider's name.
    pub fn register_provider(&mut self, provider: Arc<dyn ModifierProvider>) -> bool {
        let added = self.insert(provider);
        self.recalculate_all();
        added
    }

    /// Removes `provider` if registered, then recalculates.
    ///
    /// Returns `true` if the provider was present. Removing an unknown provider is a no-op.
    pub fn unregister_provider(&mut self, provider: &Arc<dyn ModifierProvider>) -> bool {
        let position = self.position(provider);
        if let Some(index) = position {
            let removed = self.providers.remove(index);
            debug!(
                target: "idle_core::stats",
                provider = removed.name(),
                remaining = self.providers.len(),
                "Provider unregistered"
            );
        } else {
            debug!(
                target: "idle_core::stats",
                provider = provider.name(),
                "Provider not registered, nothing to remove"
            );
        }

        self.recalculate_all();
        position.is_some()
    }

    /// Returns true if this exact provider handle is registered.
    pub fn contains(&self, provider: &Arc<dyn ModifierProvider>) -> bool {
        self.position(provider).is_some()
    }

    /// Rebuilds the cache for every [`StatKey`] from the current providers.
    ///
    /// This is a full rebuild; no entry survives from the previous pass.
    pub fn recalculate_all(&self) {
        let values: HashMap<StatKey, ScaledNumber> = StatKey::all()
            .map(|stat| (stat, self.reduce(stat).final_value))
            .collect();

        let mut cache = self.cache.borrow_mut();
        cache.values = values;
        cache.generation += 1;

        debug!(
            target: "idle_core::stats",
            providers = self.providers.len(),
            generation = cache.generation,
            "Recalculated all stats"
        );
    }

    /// Computes `stat` from a zero base without touching the cache.
    pub fn reduce(&self, stat: StatKey) -> StatBreakdown {
        self.reduce_from(stat, ScaledNumber::ZERO)
    }

    /// Breakdown for UI display; same as [`reduce`](Self::reduce).
    pub fn breakdown(&self, stat: StatKey) -> StatBreakdown {
        self.reduce(stat)
    }

    /// Cached total for `stat`.
    ///
    /// If the cache was never populated, logs the inconsistency and recalculates
    /// before answering. Stats with no cache entry after that read as zero.
    pub fn query(&self, stat: StatKey) -> ScaledNumber {
        if let Some(value) = self.cached(stat) {
            return value;
        }

        warn!(
            target: "idle_core::stats",
            stat = %stat,
            generation = self.generation(),
            "Stat queried before cache was populated, recalculating"
        );
        self.recalculate_all();

        self.cached(stat).unwrap_or(ScaledNumber::ZERO)
    }

    /// What `stat` would be starting from `base` instead of zero. Does not touch the cache.
    pub fn query_with_base(&self, stat: StatKey, base: ScaledNumber) -> ScaledNumber {
        self.reduce_from(stat, base).final_value
    }

    /// Number of completed recalculation passes.
    pub fn generation(&self) -> u64 {
        self.cache.borrow().generation
    }

    /// True once at least one recalculation pass has run.
    pub fn is_populated(&self) -> bool {
        self.generation() > 0
    }

    /// Returns the number of registered providers.
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Returns true if no providers are registered.
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Returns an iterator over provider names in registration order (for debugging).
    pub fn providers(&self) -> impl Iterator<Item = &str> + '_ {
        self.providers.iter().map(|p| p.name())
    }

    fn insert(&mut self, provider: Arc<dyn ModifierProvider>) -> bool {
        if self.position(&provider).is_some() {
            debug!(
                target: "idle_core::stats",
                provider = provider.name(),
                "Provider already registered, ignoring"
            );
            return false;
        }

        debug!(
            target: "idle_core::stats",
            provider = provider.name(),
            position = self.providers.len(),
            "Provider registered"
        );
        self.providers.push(provider);
        true
    }

    fn position(&self, provider: &Arc<dyn ModifierProvider>) -> Option<usize> {
        self.providers.iter().position(|p| Arc::ptr_eq(p, provider))
    }

    fn cached(&self, stat: StatKey) -> Option<ScaledNumber> {
        self.cache.borrow().values.get(&stat).copied()
    }

    fn reduce_from(&self, stat: StatKey, base: ScaledNumber) -> StatBreakdown {
        let mut breakdown = StatBreakdown::empty(stat, base);

        for provider in &self.providers {
            let modifiers = match provider.modifiers_for_stat(stat) {
                Ok(modifiers) => modifiers,
                Err(e) => {
                    error!(
                        target: "idle_core::stats",
                        provider = provider.name(),
                        stat = %stat,
                        code = e.error_code(),
                        severity = e.severity().as_str(),
                        error = %e,
                        "Provider failed, contribution treated as empty"
                    );
                    breakdown.failed_providers.push(provider.name().to_owned());
                    continue;
                }
            };

            for modifier in modifiers {
                if modifier.stat() != stat {
                    continue;
                }
                match modifier.kind() {
                    ModifierKind::Additive(amount) => {
                        breakdown.additive_total = breakdown.additive_total.add(amount);
                    }
                    ModifierKind::Multiplicative(fraction) => {
                        breakdown.multiplicative_total += fraction;
                    }
                }
                breakdown.contributions.push(modifier);
            }
        }

        breakdown.final_value = base
            .add(breakdown.additive_total)
            .multiply_scalar(breakdown.multiplier());

        trace!(
            target: "idle_core::stats",
            stat = %stat,
            contributions = breakdown.contributions.len(),
            final_value = %breakdown.final_value.format_full(),
            "Reduced stat"
        );

        breakdown
    }
}

impl Default for StatAggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for StatAggregator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StatAggregator")
            .field("providers", &self.providers().collect::<Vec<_>>())
            .field("generation", &self.generation())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::stats::{Modifier, ProviderError};

    fn raw(value: f64) -> ScaledNumber {
        ScaledNumber::from_raw(value).unwrap()
    }

    struct Fixed {
        name: &'static str,
        modifiers: Vec<Modifier>,
        queries: AtomicUsize,
    }

    impl Fixed {
        fn new(name: &'static str, modifiers: Vec<Modifier>) -> Arc<dyn ModifierProvider> {
            Arc::new(Self {
                name,
                modifiers,
                queries: AtomicUsize::new(0),
            })
        }
    }

    impl ModifierProvider for Fixed {
        fn name(&self) -> &str {
            self.name
        }

        fn modifiers_for_stat(&self, _stat: StatKey) -> Result<Vec<Modifier>, ProviderError> {
            self.queries.fetch_add(1, Ordering::Relaxed);
            // Returns everything; the aggregator filters by stat.
            Ok(self.modifiers.clone())
        }
    }

    struct Broken;

    impl ModifierProvider for Broken {
        fn name(&self) -> &str {
            "broken"
        }

        fn modifiers_for_stat(&self, _stat: StatKey) -> Result<Vec<Modifier>, ProviderError> {
            Err(ProviderError::Unavailable {
                reason: "pool not loaded".to_owned(),
            })
        }
    }

    fn flat(stat: StatKey, amount: f64, source: &str) -> Modifier {
        Modifier::additive(stat, raw(amount), source)
    }

    fn percent(stat: StatKey, fraction: f64, source: &str) -> Modifier {
        Modifier::multiplicative(stat, fraction, source).unwrap()
    }

    #[test]
    fn combines_additive_then_multiplicative() {
        let mut stats = StatAggregator::new();
        stats.register_provider(Fixed::new("a", vec![flat(StatKey::ClickPower, 50.0, "a")]));
        stats.register_provider(Fixed::new("b", vec![flat(StatKey::ClickPower, 25.0, "b")]));
        stats.register_provider(Fixed::new(
            "c",
            vec![percent(StatKey::ClickPower, 0.2, "c")],
        ));

        assert_eq!(stats.query(StatKey::ClickPower), raw(90.0));

        let breakdown = stats.reduce(StatKey::ClickPower);
        assert_eq!(breakdown.base, ScaledNumber::ZERO);
        assert_eq!(breakdown.additive_total, raw(75.0));
        assert_eq!(breakdown.multiplicative_total, 0.2);
        assert_eq!(breakdown.final_value, raw(90.0));
        assert_eq!(breakdown.sources().collect::<Vec<_>>(), ["a", "b", "c"]);
    }

    #[test]
    fn ignores_modifiers_for_other_stats() {
        let mut stats = StatAggregator::new();
        stats.register_provider(Fixed::new(
            "mixed",
            vec![
                flat(StatKey::ClickPower, 10.0, "mixed"),
                flat(StatKey::SpawnRate, 3.0, "mixed"),
            ],
        ));

        assert_eq!(stats.query(StatKey::ClickPower), raw(10.0));
        assert_eq!(stats.query(StatKey::SpawnRate), raw(3.0));
        assert_eq!(stats.query(StatKey::PickupRadius), ScaledNumber::ZERO);
        assert_eq!(stats.reduce(StatKey::SpawnRate).contributions.len(), 1);
    }

    #[test]
    fn multiplicative_without_additive_stays_zero() {
        let mut stats = StatAggregator::new();
        stats.register_provider(Fixed::new(
            "boost",
            vec![percent(StatKey::PassiveIncome, 1.5, "boost")],
        ));
        assert!(stats.query(StatKey::PassiveIncome).is_zero());
        assert_eq!(
            stats.query_with_base(StatKey::PassiveIncome, raw(10.0)),
            raw(25.0)
        );
    }

    #[test]
    fn duplicate_registration_is_a_no_op() {
        let provider = Fixed::new("a", vec![flat(StatKey::ClickPower, 5.0, "a")]);
        let mut stats = StatAggregator::new();

        assert!(stats.register_provider(Arc::clone(&provider)));
        let once = stats.query(StatKey::ClickPower);
        assert!(!stats.register_provider(Arc::clone(&provider)));

        assert_eq!(stats.len(), 1);
        assert_eq!(stats.query(StatKey::ClickPower), once);
    }

    #[test]
    fn unregister_unknown_provider_is_a_no_op() {
        let registered = Fixed::new("a", vec![flat(StatKey::ClickPower, 5.0, "a")]);
        let stranger = Fixed::new("b", vec![flat(StatKey::ClickPower, 7.0, "b")]);
        let mut stats = StatAggregator::with_providers([Arc::clone(&registered)]);

        assert!(!stats.unregister_provider(&stranger));
        assert_eq!(stats.len(), 1);
        assert_eq!(stats.query(StatKey::ClickPower), raw(5.0));

        assert!(stats.unregister_provider(&registered));
        assert!(stats.is_empty());
        assert!(stats.query(StatKey::ClickPower).is_zero());
    }

    #[test]
    fn registration_changes_trigger_full_rebuild() {
        let mut stats = StatAggregator::new();
        assert!(!stats.is_populated());

        let provider = Fixed::new("a", Vec::new());
        stats.register_provider(Arc::clone(&provider));
        assert_eq!(stats.generation(), 1);

        stats.register_provider(Arc::clone(&provider));
        assert_eq!(stats.generation(), 2);

        stats.unregister_provider(&provider);
        assert_eq!(stats.generation(), 3);
    }

    #[test]
    fn query_self_heals_unpopulated_cache() {
        let provider = Arc::new(Fixed {
            name: "a",
            modifiers: vec![flat(StatKey::ResourceCapacity, 100.0, "a")],
            queries: AtomicUsize::new(0),
        });
        let mut stats = StatAggregator::new();
        stats.providers.push(provider.clone());
        assert!(!stats.is_populated());

        assert_eq!(stats.query(StatKey::ResourceCapacity), raw(100.0));
        assert_eq!(stats.generation(), 1);

        let after_heal = provider.queries.load(Ordering::Relaxed);
        assert_eq!(stats.query(StatKey::ResourceCapacity), raw(100.0));
        assert_eq!(provider.queries.load(Ordering::Relaxed), after_heal);
    }

    #[test]
    fn failing_provider_is_isolated() {
        let mut stats = StatAggregator::new();
        stats.register_provider(Fixed::new("a", vec![flat(StatKey::ClickPower, 5.0, "a")]));
        stats.register_provider(Arc::new(Broken));
        stats.register_provider(Fixed::new("c", vec![flat(StatKey::ClickPower, 6.0, "c")]));

        assert_eq!(stats.query(StatKey::ClickPower), raw(11.0));

        let breakdown = stats.breakdown(StatKey::ClickPower);
        assert!(!breakdown.is_complete());
        assert_eq!(breakdown.failed_providers, ["broken"]);
    }

    #[test]
    fn query_with_base_leaves_cache_alone() {
        let mut stats = StatAggregator::new();
        stats.register_provider(Fixed::new(
            "a",
            vec![
                flat(StatKey::ClickPower, 10.0, "a"),
                percent(StatKey::ClickPower, 1.0, "a"),
            ],
        ));
        let generation = stats.generation();

        assert_eq!(stats.query_with_base(StatKey::ClickPower, raw(40.0)), raw(100.0));
        assert_eq!(stats.query(StatKey::ClickPower), raw(20.0));
        assert_eq!(stats.generation(), generation);
    }

    #[test]
    fn providers_listed_in_registration_order() {
        let stats = StatAggregator::with_providers([
            Fixed::new("zone", Vec::new()),
            Fixed::new("upgrades", Vec::new()),
            Fixed::new("pool", Vec::new()),
        ]);
        assert_eq!(
            stats.providers().collect::<Vec<_>>(),
            ["zone", "upgrades", "pool"]
        );
        assert_eq!(stats.generation(), 1);
    }
}
