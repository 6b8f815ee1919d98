//! Operator impls delegating to the named [`ScaledNumber`] methods.

use core::iter::Sum;
use core::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

use super::scaled::ScaledNumber;

impl Add for ScaledNumber {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        ScaledNumber::add(self, rhs)
    }
}

impl Sub for ScaledNumber {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self.subtract(rhs)
    }
}

impl Neg for ScaledNumber {
    type Output = Self;

    fn neg(self) -> Self {
        self.negate()
    }
}

impl Mul<f64> for ScaledNumber {
    type Output = Self;

    fn mul(self, factor: f64) -> Self {
        self.multiply_scalar(factor)
    }
}

impl Mul for ScaledNumber {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        self.multiply(rhs)
    }
}

impl AddAssign for ScaledNumber {
    fn add_assign(&mut self, rhs: Self) {
        *self = ScaledNumber::add(*self, rhs);
    }
}

impl SubAssign for ScaledNumber {
    fn sub_assign(&mut self, rhs: Self) {
        *self = self.subtract(rhs);
    }
}

/// Left fold in iteration order; the order is part of the result.
impl Sum for ScaledNumber {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, ScaledNumber::add)
    }
}

impl<'a> Sum<&'a ScaledNumber> for ScaledNumber {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}
