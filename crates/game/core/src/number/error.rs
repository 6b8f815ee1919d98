//! Errors raised while constructing, combining, or parsing scaled numbers.

use crate::error::{CoreError, ErrorSeverity};

/// Failure to construct or combine a [`ScaledNumber`](super::ScaledNumber).
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum NumberError {
    /// Non-finite input (`NaN`, `±inf`) cannot be normalized.
    #[error("cannot represent non-finite value {value}")]
    InvalidNumber { value: f64 },

    /// Explicit magnitudes must count tiers upward from zero.
    #[error("magnitude {magnitude} is negative")]
    NegativeMagnitude { magnitude: i32 },

    #[error("division by zero")]
    DivisionByZero,
}

impl CoreError for NumberError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidNumber { .. } => "NUMBER_INVALID",
            Self::NegativeMagnitude { .. } => "NUMBER_NEGATIVE_MAGNITUDE",
            Self::DivisionByZero => "NUMBER_DIVISION_BY_ZERO",
        }
    }
}

/// Failure to read a [`ScaledNumber`](super::ScaledNumber) or a magnitude suffix from text.
///
/// Parsing never panics; a corrupted save entry or clipboard paste surfaces here
/// and the caller decides how to recover.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error("empty input")]
    Empty,

    #[error("malformed numeric prefix in {text:?}")]
    InvalidMantissa { text: String },

    #[error("unknown magnitude suffix {suffix:?}")]
    UnknownSuffix { suffix: String },

    #[error("magnitude suffix {suffix:?} is beyond the supported tier range")]
    TierOverflow { suffix: String },

    #[error(transparent)]
    Number(#[from] NumberError),
}

impl CoreError for ParseError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Empty => "PARSE_EMPTY",
            Self::InvalidMantissa { .. } => "PARSE_INVALID_MANTISSA",
            Self::UnknownSuffix { .. } => "PARSE_UNKNOWN_SUFFIX",
            Self::TierOverflow { .. } => "PARSE_TIER_OVERFLOW",
            Self::Number(inner) => inner.error_code(),
        }
    }
}
