//! Numeric and stat core shared by every idle-game system.
//!
//! `idle-core` defines the two pieces everything else reads and writes through:
//! [`ScaledNumber`], a base-1000 tiered number that spans hundreds of orders of
//! magnitude, and [`StatAggregator`], which folds contributions from a changing
//! set of [`ModifierProvider`]s into cached per-stat totals. All APIs are
//! synchronous and free of I/O.
pub mod config;
pub mod error;
pub mod number;
pub mod stats;
pub use config::FormatConfig;
pub use error::{CoreError, ErrorSeverity};
pub use number::{MagnitudeCodec, NumberError, ParseError, ScaledNumber};
pub use stats::{
    Modifier, ModifierKind, ModifierProvider, ProviderError, StatAggregator, StatBreakdown,
    StatKey,
};
