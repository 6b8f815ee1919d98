//! The capability external systems implement to feed the aggregator.

use super::key::StatKey;
use super::modifier::Modifier;
use crate::error::{CoreError, ErrorSeverity};
use crate::number::NumberError;

/// A source of modifiers (zone, upgrade tree, entity pool, ...).
///
/// # Purity
///
/// [`modifiers_for_stat`](Self::modifiers_for_stat) must be a pure query. It
/// may read the provider's own state but must never register or unregister
/// providers, trigger a recalculation, or query the aggregator. Doing so
/// recurses without bound; the aggregator does not guard against it.
///
/// # Summation order
///
/// Modifiers are summed in the order they are returned, after those of every
/// provider registered earlier. Keep the order stable for reproducible
/// floating-point results.
pub trait ModifierProvider: Send + Sync {
    /// Returns a human-readable name for this provider (used in logging and breakdowns).
    fn name(&self) -> &str;

    /// Returns this provider's contributions to `stat`.
    ///
    /// Returning an error drops this provider's contribution to `stat` for the
    /// current pass only; other providers and stats are unaffected.
    fn modifiers_for_stat(&self, stat: StatKey) -> Result<Vec<Modifier>, ProviderError>;
}

/// Failure reported by a [`ModifierProvider`] query.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ProviderError {
    #[error("provider state unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("provider built an invalid modifier")]
    InvalidModifier(#[from] NumberError),
}

impl CoreError for ProviderError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Unavailable { .. } => ErrorSeverity::Recoverable,
            Self::InvalidModifier(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Unavailable { .. } => "PROVIDER_UNAVAILABLE",
            Self::InvalidModifier(_) => "PROVIDER_INVALID_MODIFIER",
        }
    }
}
