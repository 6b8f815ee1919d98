//! Scaled numbers for quantities that outgrow a plain `f64`.
//!
//! - [`ScaledNumber`]: mantissa + base-1000 magnitude tier, signed, saturating
//! - [`MagnitudeCodec`]: tier ↔ suffix (`K`, `M`, …, `a`, `b`, …, `aa`)
//! - Display and persisted text encodings live in `format`
//!
//! Arithmetic operators (`+`, `-`, `*`, `Sum`) are implemented in `ops`.

mod codec;
mod error;
mod format;
mod ops;
#[cfg(feature = "serde")]
mod persist;
mod scaled;

pub use codec::MagnitudeCodec;
pub use error::{NumberError, ParseError};
pub use scaled::{ScaledNumber, TIER_BASE};
