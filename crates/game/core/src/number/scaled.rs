//! The scaled numeric type: a mantissa plus a count of base-1000 tiers.
//!
//! Quantities in an idle game routinely span hundreds of orders of magnitude.
//! `ScaledNumber` keeps a normalized mantissa in `[1, 1000)` and counts how
//! many factors of 1000 were divided out, which lines up one-to-one with the
//! K/M/B/T display suffixes.
//!
//! # Normalized form
//!
//! ```text
//! zero:      mantissa == 0.0, magnitude == 0
//! tiered:    1.0 <= |mantissa| < 1000.0, magnitude >= 0
//! fraction:  0.0 < |mantissa| < 1.0, magnitude == 0
//! ```
//!
//! The fraction case exists because magnitude never goes below zero.
//!
//! # Precision
//!
//! Addition aligns the smaller operand to the larger one's tier. Digits that
//! fall below the mantissa's precision are dropped, and an operand more than
//! [`ScaledNumber::PRECISION_TIERS`] tiers smaller is ignored entirely.

use core::cmp::Ordering;
use core::hash::{Hash, Hasher};

use super::error::NumberError;

/// Width of one magnitude tier.
pub const TIER_BASE: f64 = 1000.0;

/// Largest f64 strictly below [`TIER_BASE`].
const MAX_MANTISSA: f64 = 999.999_999_999_999_9;

/// Decimal exponent steps used when rescaling; `1e270` stays finite.
const RESCALE_STEP_TIERS: i64 = 90;

/// A signed quantity stored as `mantissa × 1000^magnitude`.
///
/// Immutable value type: every operation returns a new, renormalized instance.
///
/// # Example
/// ```
/// # use idle_core::ScaledNumber;
/// let gold = ScaledNumber::from_raw(1500.0).unwrap();
/// assert_eq!(gold.mantissa(), 1.5);
/// assert_eq!(gold.magnitude(), 1);
/// assert_eq!(gold.format(None), "1.5K");
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct ScaledNumber {
    mantissa: f64,
    magnitude: i32,
}

impl ScaledNumber {
    /// Tier gap beyond which the smaller addend no longer affects the sum.
    ///
    /// Six tiers is `10^18`, past the ~16 significant digits an f64 carries.
    pub const PRECISION_TIERS: i32 = 6;

    pub const ZERO: Self = Self {
        mantissa: 0.0,
        magnitude: 0,
    };

    pub const ONE: Self = Self {
        mantissa: 1.0,
        magnitude: 0,
    };

    /// Largest representable value; arithmetic saturates here.
    pub const MAX: Self = Self {
        mantissa: MAX_MANTISSA,
        magnitude: i32::MAX,
    };

    /// Most negative representable value; arithmetic saturates here.
    pub const MIN: Self = Self {
        mantissa: -MAX_MANTISSA,
        magnitude: i32::MAX,
    };

    /// Normalizes a finite double into mantissa and magnitude.
    ///
    /// # Errors
    ///
    /// Returns [`NumberError::InvalidNumber`] for `NaN` and `±inf`.
    pub fn from_raw(value: f64) -> Result<Self, NumberError> {
        if !value.is_finite() {
            return Err(NumberError::InvalidNumber { value });
        }
        Ok(Self::normalized(value, 0))
    }

    /// Builds a value from an explicit `(mantissa, magnitude)` pair, renormalizing it.
    ///
    /// `new(1500.0, 1)` is the same value as `new(1.5, 2)`.
    ///
    /// # Errors
    ///
    /// Returns [`NumberError::InvalidNumber`] for a non-finite mantissa and
    /// [`NumberError::NegativeMagnitude`] for a magnitude below zero.
    pub fn new(mantissa: f64, magnitude: i32) -> Result<Self, NumberError> {
        if !mantissa.is_finite() {
            return Err(NumberError::InvalidNumber { value: mantissa });
        }
        if magnitude < 0 {
            return Err(NumberError::NegativeMagnitude { magnitude });
        }
        Ok(Self::normalized(mantissa, i64::from(magnitude)))
    }

    /// Normalized significant digits; carries the sign.
    pub const fn mantissa(&self) -> f64 {
        self.mantissa
    }

    /// Number of base-1000 tiers divided out of the mantissa.
    pub const fn magnitude(&self) -> i32 {
        self.magnitude
    }

    /// True iff the mantissa is exactly zero.
    pub fn is_zero(&self) -> bool {
        self.mantissa == 0.0
    }

    pub fn is_negative(&self) -> bool {
        self.mantissa < 0.0
    }

    /// `-1`, `0` or `1` according to the sign of the value.
    pub fn signum(&self) -> i8 {
        if self.mantissa > 0.0 {
            1
        } else if self.mantissa < 0.0 {
            -1
        } else {
            0
        }
    }

    pub fn abs(self) -> Self {
        Self {
            mantissa: self.mantissa.abs(),
            magnitude: self.magnitude,
        }
    }

    pub fn negate(self) -> Self {
        if self.is_zero() {
            return Self::ZERO;
        }
        Self {
            mantissa: -self.mantissa,
            magnitude: self.magnitude,
        }
    }

    /// Sums two values after aligning the smaller one to the larger one's tier.
    ///
    /// Commutative. Associative only up to floating-point rounding, so callers
    /// that sum many terms must fix the order themselves.
    pub fn add(self, other: Self) -> Self {
        if other.is_zero() {
            return self;
        }
        if self.is_zero() {
            return other;
        }

        let (larger, smaller) = if self.magnitude >= other.magnitude {
            (self, other)
        } else {
            (other, self)
        };

        let gap = i64::from(larger.magnitude) - i64::from(smaller.magnitude);
        if gap > i64::from(Self::PRECISION_TIERS) {
            return larger;
        }

        let aligned = rescale(smaller.mantissa, -gap);
        Self::normalized(larger.mantissa + aligned, i64::from(larger.magnitude))
    }

    /// `self - other`, with the same alignment rules as [`add`](Self::add).
    pub fn subtract(self, other: Self) -> Self {
        self.add(other.negate())
    }

    /// Scales by a plain factor, moving across tier boundaries in either direction.
    ///
    /// Factors of any finite size are accepted; large ones are routed through
    /// [`multiply`](Self::multiply) so the mantissa cannot overflow. A `NaN`
    /// factor yields zero and an infinite factor saturates to [`MAX`](Self::MAX)
    /// or [`MIN`](Self::MIN).
    pub fn multiply_scalar(self, factor: f64) -> Self {
        if factor.is_nan() || self.is_zero() {
            return Self::ZERO;
        }
        if factor.is_infinite() {
            return Self::saturated(self.mantissa * factor);
        }
        self.multiply(Self::normalized(factor, 0))
    }

    pub fn multiply(self, other: Self) -> Self {
        if self.is_zero() || other.is_zero() {
            return Self::ZERO;
        }
        let (lhs, lhs_tiers) = self.unbounded_parts();
        let (rhs, rhs_tiers) = other.unbounded_parts();
        Self::normalized(lhs * rhs, lhs_tiers + rhs_tiers)
    }

    /// # Errors
    ///
    /// Returns [`NumberError::DivisionByZero`] when `divisor` is zero.
    pub fn divide(self, divisor: Self) -> Result<Self, NumberError> {
        if divisor.is_zero() {
            return Err(NumberError::DivisionByZero);
        }
        if self.is_zero() {
            return Ok(Self::ZERO);
        }
        let (lhs, lhs_tiers) = self.unbounded_parts();
        let (rhs, rhs_tiers) = divisor.unbounded_parts();
        Ok(Self::normalized(lhs / rhs, lhs_tiers - rhs_tiers))
    }

    /// Lossy conversion back to a double; `±inf` past the f64 range.
    pub fn to_f64(&self) -> f64 {
        rescale(self.mantissa, i64::from(self.magnitude))
    }

    /// Deducts `cost` if the balance covers it.
    ///
    /// Keeps resource-style balances from going negative without baking that
    /// rule into the arithmetic itself.
    pub fn checked_spend(self, cost: Self) -> Option<Self> {
        if self.compare(&cost) == Ordering::Less {
            return None;
        }
        Some(self.subtract(cost))
    }

    /// Total order consistent with numeric value.
    ///
    /// Sign first, then magnitude (reversed for negatives), then mantissa.
    pub fn compare(&self, other: &Self) -> Ordering {
        let by_sign = self.signum().cmp(&other.signum());
        if by_sign != Ordering::Equal {
            return by_sign;
        }

        let by_magnitude = if self.is_negative() {
            other.magnitude.cmp(&self.magnitude)
        } else {
            self.magnitude.cmp(&other.magnitude)
        };

        by_magnitude.then_with(|| self.mantissa.total_cmp(&other.mantissa))
    }

    /// Brings any finite `(mantissa, magnitude)` pair into normalized form.
    ///
    /// Magnitudes below zero are folded back into the mantissa; magnitudes past
    /// `i32::MAX` saturate.
    pub(crate) fn normalized(mantissa: f64, magnitude: i64) -> Self {
        if mantissa == 0.0 || mantissa.is_nan() {
            return Self::ZERO;
        }
        if mantissa.is_infinite() {
            return Self::saturated(mantissa);
        }

        let abs = mantissa.abs();
        let in_window = magnitude >= 0
            && ((1.0..TIER_BASE).contains(&abs) || (magnitude == 0 && abs < 1.0));

        let (mut mantissa, mut magnitude) = (mantissa, magnitude);
        if !in_window {
            let (digits, offset) = split_tiers(mantissa);
            mantissa = digits;
            magnitude += offset;

            if magnitude < 0 {
                mantissa = rescale(mantissa, magnitude);
                magnitude = 0;
                if mantissa == 0.0 {
                    return Self::ZERO;
                }
            }
        }

        if magnitude > i64::from(i32::MAX) {
            return Self::saturated(mantissa);
        }

        Self {
            mantissa,
            magnitude: magnitude as i32,
        }
    }

    /// Mantissa in `[1, 1000)` with a tier count that may be negative.
    ///
    /// Only differs from the stored form for fractions at magnitude 0.
    fn unbounded_parts(&self) -> (f64, i64) {
        if self.magnitude == 0 && self.mantissa.abs() < 1.0 {
            return split_tiers(self.mantissa);
        }
        (self.mantissa, i64::from(self.magnitude))
    }

    fn saturated(sign_source: f64) -> Self {
        if sign_source < 0.0 { Self::MIN } else { Self::MAX }
    }
}

impl PartialEq for ScaledNumber {
    fn eq(&self, other: &Self) -> bool {
        self.compare(other) == Ordering::Equal
    }
}

impl Eq for ScaledNumber {}

impl PartialOrd for ScaledNumber {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ScaledNumber {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other)
    }
}

impl Hash for ScaledNumber {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.magnitude.hash(state);
        self.mantissa.to_bits().hash(state);
    }
}

/// Splits a finite, non-zero double into a mantissa in `[1, 1000)` and a tier offset.
fn split_tiers(value: f64) -> (f64, i64) {
    let mut tiers = (value.abs().log10() / 3.0).floor() as i64;
    let mut mantissa = rescale(value, -tiers);

    // log10 rounding can leave the estimate one tier off.
    if mantissa.abs() >= TIER_BASE {
        mantissa /= TIER_BASE;
        tiers += 1;
    } else if mantissa.abs() < 1.0 {
        mantissa *= TIER_BASE;
        tiers -= 1;
    }

    (mantissa, tiers)
}

/// Computes `value × 1000^tiers` in steps that stay inside the f64 range.
///
/// Negative steps divide by an exact power of ten so small shifts round once.
fn rescale(value: f64, tiers: i64) -> f64 {
    let mut result = value;
    let mut remaining = tiers;

    while remaining != 0 && result != 0.0 && result.is_finite() {
        let step = remaining.clamp(-RESCALE_STEP_TIERS, RESCALE_STEP_TIERS);
        let power = 10f64.powi((step.abs() * 3) as i32);
        if step > 0 {
            result *= power;
        } else {
            result /= power;
        }
        remaining -= step;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(value: f64) -> ScaledNumber {
        ScaledNumber::from_raw(value).unwrap()
    }

    #[test]
    fn from_raw_normalizes_into_tiers() {
        let n = raw(1500.0);
        assert_eq!(n.mantissa(), 1.5);
        assert_eq!(n.magnitude(), 1);

        let n = raw(999.0);
        assert_eq!(n.mantissa(), 999.0);
        assert_eq!(n.magnitude(), 0);

        let n = raw(1000.0);
        assert_eq!(n.mantissa(), 1.0);
        assert_eq!(n.magnitude(), 1);

        let n = raw(-2_500_000.0);
        assert_eq!(n.mantissa(), -2.5);
        assert_eq!(n.magnitude(), 2);
    }

    #[test]
    fn fractions_stay_at_magnitude_zero() {
        let n = raw(0.25);
        assert_eq!(n.mantissa(), 0.25);
        assert_eq!(n.magnitude(), 0);
    }

    #[test]
    fn from_raw_rejects_non_finite() {
        assert!(matches!(
            ScaledNumber::from_raw(f64::NAN),
            Err(NumberError::InvalidNumber { .. })
        ));
        assert!(ScaledNumber::from_raw(f64::INFINITY).is_err());
        assert!(ScaledNumber::from_raw(f64::NEG_INFINITY).is_err());
    }

    #[test]
    fn negative_zero_is_zero() {
        let n = raw(-0.0);
        assert!(n.is_zero());
        assert_eq!(n.magnitude(), 0);
        assert_eq!(n, ScaledNumber::ZERO);
    }

    #[test]
    fn new_renormalizes_explicit_pairs() {
        let n = ScaledNumber::new(1500.0, 1).unwrap();
        assert_eq!((n.mantissa(), n.magnitude()), (1.5, 2));

        let n = ScaledNumber::new(0.5, 2).unwrap();
        assert_eq!((n.mantissa(), n.magnitude()), (500.0, 1));

        assert_eq!(
            ScaledNumber::new(1.0, -1),
            Err(NumberError::NegativeMagnitude { magnitude: -1 })
        );
    }

    #[test]
    fn add_aligns_to_larger_tier() {
        let sum = raw(1500.0).add(raw(500.0));
        assert_eq!(sum, raw(2000.0));

        let sum = raw(999.0).add(raw(1.0));
        assert_eq!((sum.mantissa(), sum.magnitude()), (1.0, 1));
    }

    #[test]
    fn add_drops_operands_below_precision() {
        let huge = ScaledNumber::new(1.0, 10).unwrap();
        let tiny = raw(5.0);
        assert_eq!(huge.add(tiny), huge);
        assert_eq!(tiny.add(huge), huge);
    }

    #[test]
    fn subtract_crosses_tier_downward() {
        let diff = raw(1500.0).subtract(raw(1000.0));
        assert_eq!((diff.mantissa(), diff.magnitude()), (500.0, 0));

        let diff = raw(10.0).subtract(raw(10.0));
        assert!(diff.is_zero());
        assert_eq!(diff.magnitude(), 0);
    }

    #[test]
    fn subtract_goes_negative() {
        let diff = raw(500.0).subtract(raw(1500.0));
        assert_eq!(diff, raw(-1000.0));
        assert_eq!((diff.mantissa(), diff.magnitude()), (-1.0, 1));
        assert!(diff.is_negative());
    }

    #[test]
    fn multiply_scalar_crosses_tiers_both_ways() {
        let up = raw(500.0).multiply_scalar(4.0);
        assert_eq!((up.mantissa(), up.magnitude()), (2.0, 1));

        let down = raw(2000.0).multiply_scalar(0.25);
        assert_eq!((down.mantissa(), down.magnitude()), (500.0, 0));

        let large = raw(2.0).multiply_scalar(1e300);
        assert_eq!(large.magnitude(), 100);
    }

    #[test]
    fn multiply_scalar_non_finite_factors() {
        assert!(raw(5.0).multiply_scalar(f64::NAN).is_zero());
        assert_eq!(raw(5.0).multiply_scalar(f64::INFINITY), ScaledNumber::MAX);
        assert_eq!(raw(-5.0).multiply_scalar(f64::INFINITY), ScaledNumber::MIN);
    }

    #[test]
    fn multiply_and_divide() {
        let a = ScaledNumber::new(2.0, 3).unwrap();
        let b = ScaledNumber::new(4.0, 2).unwrap();
        assert_eq!(a.multiply(b), ScaledNumber::new(8.0, 5).unwrap());
        assert_eq!(a.divide(b).unwrap(), raw(500.0));
        assert_eq!(
            raw(1.0).divide(ScaledNumber::ZERO),
            Err(NumberError::DivisionByZero)
        );
    }

    #[test]
    fn divide_below_one_stays_fractional() {
        let q = raw(1.0).divide(raw(4.0)).unwrap();
        assert_eq!((q.mantissa(), q.magnitude()), (0.25, 0));
    }

    #[test]
    fn magnitude_saturates() {
        let near_max = ScaledNumber::new(500.0, i32::MAX).unwrap();
        assert_eq!(near_max.multiply_scalar(4.0), ScaledNumber::MAX);
        assert_eq!(near_max.negate().multiply_scalar(4.0), ScaledNumber::MIN);
    }

    #[test]
    fn compare_is_sign_aware() {
        let big_negative = raw(-5000.0);
        let small_positive = raw(3.0);
        assert_eq!(big_negative.compare(&small_positive), Ordering::Less);
        assert_eq!(raw(-5000.0).compare(&raw(-3.0)), Ordering::Less);
        assert_eq!(raw(1500.0).compare(&raw(999.0)), Ordering::Greater);
        assert_eq!(raw(1500.0).compare(&raw(1500.0)), Ordering::Equal);
        assert!(ScaledNumber::ZERO < raw(0.001));
        assert!(raw(-0.001) < ScaledNumber::ZERO);
    }

    #[test]
    fn checked_spend_refuses_overdraft() {
        let balance = raw(100.0);
        assert_eq!(balance.checked_spend(raw(40.0)), Some(raw(60.0)));
        assert_eq!(balance.checked_spend(raw(100.0)), Some(ScaledNumber::ZERO));
        assert_eq!(balance.checked_spend(raw(100.5)), None);
    }

    #[test]
    fn to_f64_round_trips_within_range() {
        assert_eq!(raw(1500.0).to_f64(), 1500.0);
        assert_eq!(raw(-0.5).to_f64(), -0.5);
        assert_eq!(ScaledNumber::MAX.to_f64(), f64::INFINITY);
    }
}
