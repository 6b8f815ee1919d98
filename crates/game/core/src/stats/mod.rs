//! Stat aggregation.
//!
//! # Architecture
//!
//! ```text
//! [ ModifierProvider × N ]   zones, upgrade trees, entity pools (external)
//!      ↓ modifiers_for_stat (pure query)
//! [ StatAggregator ]         registration order → reduce → cache
//!      ↓ query
//! [ Consumers ]              UI, production ticks, purchase checks
//! ```
//!
//! ## Principles
//!
//! 1. **Single owner**: the aggregator alone holds the provider registry and cache
//! 2. **Pull, never push**: providers are queried; they never call the aggregator
//! 3. **Full rebuild**: every recalculation repopulates every stat
//! 4. **Fixed order**: registration order, then provider list order
//!
//! ## Reduction
//!
//! `final = (base + Σ additive) × (1 + Σ multiplicative)`

pub mod aggregator;
pub mod breakdown;
pub mod key;
pub mod modifier;
pub mod provider;

// Re-export primary types
pub use aggregator::StatAggregator;
pub use breakdown::StatBreakdown;
pub use key::StatKey;
pub use modifier::{Modifier, ModifierKind};
pub use provider::{ModifierProvider, ProviderError};
