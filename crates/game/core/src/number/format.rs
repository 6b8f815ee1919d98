//! Text encodings of [`ScaledNumber`].
//!
//! Two encodings exist and must not be confused:
//! - **Display** ([`ScaledNumber::format`]): lossy, rounded to 1–2 decimals for UI
//! - **Persisted** ([`ScaledNumber::format_full`]): shortest text that parses back
//!   to the identical value, used for saves
//!
//! Both are accepted by [`ScaledNumber::parse`].

use core::fmt;
use core::str::FromStr;

use super::codec::MagnitudeCodec;
use super::error::ParseError;
use super::scaled::ScaledNumber;
use crate::config::FormatConfig;

impl ScaledNumber {
    /// Display text with the default [`FormatConfig`].
    ///
    /// ```
    /// # use idle_core::ScaledNumber;
    /// assert_eq!(ScaledNumber::from_raw(1500.0).unwrap().format(None), "1.5K");
    /// assert_eq!(ScaledNumber::from_raw(999.0).unwrap().format(None), "999.00");
    /// assert_eq!(ScaledNumber::ZERO.format(None), "0");
    /// ```
    pub fn format(&self, decimal_places: Option<usize>) -> String {
        self.format_with(&FormatConfig::default(), decimal_places)
    }

    /// Display text; `decimal_places` overrides the per-tier default from `config`.
    ///
    /// Rounding that carries the mantissa up to 1000 promotes the value to the
    /// next tier, so `999.96K` renders as `1.0M` rather than `1000.0K`.
    pub fn format_with(&self, config: &FormatConfig, decimal_places: Option<usize>) -> String {
        if self.is_zero() {
            return "0".to_owned();
        }

        let mut magnitude = self.magnitude();
        let mut mantissa = self.mantissa();
        let mut decimals = decimal_places.unwrap_or(config.decimals_for(magnitude));
        let mut digits = format!("{mantissa:.decimals$}");

        if integer_digits(&digits) > 3 && magnitude < i32::MAX {
            magnitude += 1;
            mantissa /= 1000.0;
            decimals = decimal_places.unwrap_or(config.decimals_for(magnitude));
            digits = format!("{mantissa:.decimals$}");
        }

        format!("{digits}{}", MagnitudeCodec::encode(magnitude as u32))
    }

    /// Full-precision text for persistence; `parse(format_full(x)) == x` exactly.
    ///
    /// ```
    /// # use idle_core::ScaledNumber;
    /// let x = ScaledNumber::from_raw(1234.5).unwrap();
    /// assert_eq!(x.format_full(), "1.2345K");
    /// assert_eq!(ScaledNumber::parse(&x.format_full()).unwrap(), x);
    /// ```
    pub fn format_full(&self) -> String {
        if self.is_zero() {
            return "0".to_owned();
        }
        format!(
            "{}{}",
            self.mantissa(),
            MagnitudeCodec::encode(self.magnitude() as u32)
        )
    }

    /// Reads display or persisted text back into a value.
    ///
    /// Grammar: optional sign, digits with optional fraction, optional
    /// whitespace, optional magnitude suffix. Surrounding whitespace is ignored.
    ///
    /// # Errors
    ///
    /// - [`ParseError::Empty`] for blank input
    /// - [`ParseError::InvalidMantissa`] when the numeric prefix is malformed
    /// - [`ParseError::UnknownSuffix`] / [`ParseError::TierOverflow`] for bad suffixes
    /// - [`ParseError::Number`] when the digits overflow to a non-finite value
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(ParseError::Empty);
        }

        let split = trimmed
            .find(|c: char| !(c.is_ascii_digit() || matches!(c, '.' | '+' | '-')))
            .unwrap_or(trimmed.len());
        let (digits, suffix) = trimmed.split_at(split);

        let mantissa: f64 = digits.parse().map_err(|_| ParseError::InvalidMantissa {
            text: trimmed.to_owned(),
        })?;

        let suffix = suffix.trim_start();
        let tier = MagnitudeCodec::decode(suffix)?;
        let magnitude = i32::try_from(tier).map_err(|_| ParseError::TierOverflow {
            suffix: suffix.to_owned(),
        })?;

        Ok(Self::new(mantissa, magnitude)?)
    }
}

/// Count of digits before the decimal point, ignoring the sign.
fn integer_digits(text: &str) -> usize {
    text.trim_start_matches('-')
        .split('.')
        .next()
        .map_or(0, str::len)
}

impl fmt::Display for ScaledNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(f.precision()))
    }
}

impl FromStr for ScaledNumber {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
