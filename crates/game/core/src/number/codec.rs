//! Magnitude tier ↔ display suffix mapping.
//!
//! ```text
//! tier   0   1   2   3   4   5    6    7    8    9    10   11   12  ..  37  38   39
//! suffix ""  K   M   B   T   Qa   Qi   Sx   Sp   Oc   No   Dc   a   ..  z   aa   ab
//! ```
//!
//! Past the named table, suffixes are bijective base-26 lowercase letters in
//! the style of spreadsheet columns, so every tier has exactly one suffix and
//! the naming space never runs out. Decoding is case-sensitive: `"k"` is a
//! generated letter tier, not thousands.

use std::borrow::Cow;

use super::error::ParseError;

const ALPHABET_LEN: u64 = 26;

/// Bijective mapping between magnitude tiers and display suffixes.
pub struct MagnitudeCodec;

impl MagnitudeCodec {
    /// Conventional short-scale names, indexed by tier.
    pub const NAMED_SUFFIXES: [&'static str; 12] = [
        "", "K", "M", "B", "T", "Qa", "Qi", "Sx", "Sp", "Oc", "No", "Dc",
    ];

    /// First tier whose suffix is generated rather than named.
    pub const FIRST_GENERATED_TIER: u32 = Self::NAMED_SUFFIXES.len() as u32;

    /// Suffix for `tier`; empty for tier 0.
    pub fn encode(tier: u32) -> Cow<'static, str> {
        if let Some(&named) = Self::NAMED_SUFFIXES.get(tier as usize) {
            return Cow::Borrowed(named);
        }

        // 1-based so that "a" follows the table and "aa" follows "z".
        let mut index = u64::from(tier - Self::FIRST_GENERATED_TIER) + 1;
        let mut letters = Vec::new();
        while index > 0 {
            index -= 1;
            letters.push(char::from(b'a' + (index % ALPHABET_LEN) as u8));
            index /= ALPHABET_LEN;
        }

        Cow::Owned(letters.into_iter().rev().collect())
    }

    /// Tier for `suffix`; exact inverse of [`encode`](Self::encode).
    ///
    /// # Errors
    ///
    /// - [`ParseError::UnknownSuffix`] for anything `encode` never produces
    /// - [`ParseError::TierOverflow`] for letter sequences past `u32::MAX`
    pub fn decode(suffix: &str) -> Result<u32, ParseError> {
        if let Some(tier) = Self::NAMED_SUFFIXES.iter().position(|named| *named == suffix) {
            return Ok(tier as u32);
        }

        if !suffix.bytes().all(|b| b.is_ascii_lowercase()) {
            return Err(ParseError::UnknownSuffix {
                suffix: suffix.to_owned(),
            });
        }

        let overflow = || ParseError::TierOverflow {
            suffix: suffix.to_owned(),
        };

        let index = suffix.bytes().try_fold(0u64, |acc, b| {
            acc.checked_mul(ALPHABET_LEN)?
                .checked_add(u64::from(b - b'a') + 1)
        });
        let index = index.ok_or_else(overflow)?;

        (index - 1)
            .checked_add(u64::from(Self::FIRST_GENERATED_TIER))
            .and_then(|tier| u32::try_from(tier).ok())
            .ok_or_else(overflow)
    }
}
