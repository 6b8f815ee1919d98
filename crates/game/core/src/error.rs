//! Common error infrastructure for idle-core.
//!
//! This module provides shared types and traits used across all error types in idle-core.
//! Domain-specific errors (e.g., [`NumberError`](crate::number::NumberError),
//! [`ProviderError`](crate::stats::ProviderError)) are defined in their respective
//! modules alongside the operations that produce them.
//!
//! # Design Principles
//!
//! - **Typed Results**: Construction and parsing failures are returned, never panicked
//! - **Severity Classification**: Errors are categorized for recovery strategies
//! - **Isolation**: A failing provider degrades one aggregation pass, not the aggregator

/// Severity level of an error, used for categorization and recovery strategies.
///
/// Errors are classified by their recoverability and expected handling:
/// - **Recoverable**: Temporary conditions that may succeed on a later pass
/// - **Validation**: Invalid input that should be rejected without retry
/// - **Internal**: Unexpected state inconsistencies that require investigation
/// - **Fatal**: Unrecoverable errors indicating corrupted state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - the next recalculation may succeed.
    ///
    /// Examples: provider backing state temporarily unavailable
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: non-finite mantissa, unknown magnitude suffix in a save file
    Validation,

    /// Internal error - unexpected state inconsistency.
    ///
    /// These indicate bugs and should be investigated.
    Internal,

    /// Fatal error - state corrupted, cannot continue.
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all idle-core errors.
///
/// This trait provides a uniform interface for error classification across all
/// error types in the crate, so save layers and logging code can decide how to
/// recover without matching on every concrete enum.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait CoreError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Useful for error categorization and testing.
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
