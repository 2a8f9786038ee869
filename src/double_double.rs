//! Double-double arithmetic, the extended precision tier.
//!
//! A [`DoubleDouble`] is the unevaluated sum `hi + lo` of two f64 values with
//! `|lo| <= ulp(hi)/2`, giving about 106 significand bits. This is the
//! 128-bit double-double `long double` layout; all operations are built
//! from the error-free transformations in [`compensated`](crate::compensated).

use core::cmp::Ordering;
use core::ops::{Add, Div, Mul, Neg, Sub};

#[cfg(not(feature = "std"))]
use num_traits::Float;

use crate::compensated::{exact_mul, fast_two_sum, two_sum};
use crate::ieee754::{Ieee754, ldexp};
use crate::types::FpClass;

/// Value `hi + lo` carried as two non-overlapping f64 components.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DoubleDouble {
    /// Leading component; the value rounded to f64.
    pub hi: f64,
    /// Trailing component, at most half an ulp of `hi`.
    pub lo: f64,
}

impl DoubleDouble {
    /// Zero.
    pub const ZERO: DoubleDouble = DoubleDouble::new(0.0, 0.0);
    /// One.
    pub const ONE: DoubleDouble = DoubleDouble::new(1.0, 0.0);
    /// Quiet NaN.
    pub const NAN: DoubleDouble = DoubleDouble::new(f64::NAN, f64::NAN);
    /// Positive infinity.
    pub const INFINITY: DoubleDouble = DoubleDouble::new(f64::INFINITY, 0.0);
    /// Negative infinity.
    pub const NEG_INFINITY: DoubleDouble = DoubleDouble::new(f64::NEG_INFINITY, 0.0);
    /// Machine epsilon of the double-double format, `2^-104`.
    pub const EPSILON: f64 = 4.930380657631324e-32;

    /// Build from components that are already normalized.
    #[inline]
    pub const fn new(hi: f64, lo: f64) -> Self {
        DoubleDouble { hi, lo }
    }

    /// Exact widening of an f64.
    #[inline]
    pub const fn from_f64(x: f64) -> Self {
        DoubleDouble { hi: x, lo: 0.0 }
    }

    /// Build from a `(hi, lo)` table entry.
    #[inline]
    pub(crate) const fn from_pair(pair: (f64, f64)) -> Self {
        DoubleDouble { hi: pair.0, lo: pair.1 }
    }

    /// Exact sum of two f64 values.
    #[inline]
    pub fn from_sum(a: f64, b: f64) -> Self {
        let (hi, lo) = two_sum(a, b);
        DoubleDouble { hi, lo }
    }

    /// Exact product of two f64 values.
    #[inline]
    pub fn from_prod(a: f64, b: f64) -> Self {
        let (hi, lo) = exact_mul(a, b);
        DoubleDouble { hi, lo }
    }

    /// Round to the nearest f64.
    #[inline]
    pub fn to_f64(self) -> f64 {
        self.hi + self.lo
    }

    /// Classification, taken from the leading component.
    #[inline]
    pub fn classify(self) -> FpClass {
        self.hi.classify_bits()
    }

    /// `true` if either component is NaN.
    #[inline]
    pub fn is_nan(self) -> bool {
        self.hi.is_nan_bits() || self.lo.is_nan_bits()
    }

    /// `true` for ±inf.
    #[inline]
    pub fn is_infinite(self) -> bool {
        self.hi.is_inf_bits()
    }

    /// `true` when both components are finite.
    #[inline]
    pub fn is_finite(self) -> bool {
        !self.hi.is_nan_or_inf_bits() && !self.lo.is_nan_or_inf_bits()
    }

    /// Sign of the value, taken from `hi` (so `-0.0` counts as negative).
    #[inline]
    pub fn is_sign_negative(self) -> bool {
        self.hi.sign_bit()
    }

    /// Absolute value.
    #[inline]
    pub fn abs(self) -> Self {
        if self.is_sign_negative() { -self } else { self }
    }

    /// Exact scaling by `2^n`.
    #[inline]
    pub fn ldexp(self, n: i32) -> Self {
        DoubleDouble::new(ldexp(self.hi, n), ldexp(self.lo, n))
    }

    /// Sum with an f64.
    #[inline]
    pub fn add_f64(self, b: f64) -> Self {
        let (s1, s2) = two_sum(self.hi, b);
        if !s1.is_finite() {
            return DoubleDouble::from_f64(s1);
        }
        let (hi, lo) = fast_two_sum(s1, s2 + self.lo);
        DoubleDouble { hi, lo }
    }

    /// Product with an f64.
    #[inline]
    pub fn mul_f64(self, b: f64) -> Self {
        let (p, e) = exact_mul(self.hi, b);
        if !p.is_finite() {
            return DoubleDouble::from_f64(p);
        }
        let (hi, lo) = fast_two_sum(p, e + self.lo * b);
        DoubleDouble { hi, lo }
    }

    /// Square.
    #[inline]
    pub fn sqr(self) -> Self {
        let (p, e) = exact_mul(self.hi, self.hi);
        if !p.is_finite() {
            return DoubleDouble::from_f64(p);
        }
        let e = e + 2.0 * self.hi * self.lo + self.lo * self.lo;
        let (hi, lo) = fast_two_sum(p, e);
        DoubleDouble { hi, lo }
    }

    /// Reciprocal.
    #[inline]
    pub fn recip(self) -> Self {
        DoubleDouble::ONE / self
    }

    /// Nearest integer, ties away from zero.
    pub fn round(self) -> Self {
        let hi = self.hi.round();
        if hi == self.hi {
            // hi is already an integer; the rounding happens in lo, and a
            // half-integer lo is a tie of the whole value.
            let lo = if (self.lo - self.lo.trunc()).abs() == 0.5 {
                if self.hi + self.lo > 0.0 { self.lo.ceil() } else { self.lo.floor() }
            } else {
                self.lo.round()
            };
            let (hi, lo) = fast_two_sum(hi, lo);
            DoubleDouble { hi, lo }
        } else if (hi - self.hi).abs() == 0.5 && self.lo != 0.0 {
            // Exact tie in hi broken by the sign of lo.
            let hi = if self.lo > 0.0 {
                if hi > self.hi { hi } else { hi + 1.0 }
            } else if hi < self.hi {
                hi
            } else {
                hi - 1.0
            };
            DoubleDouble::from_f64(hi)
        } else {
            DoubleDouble::from_f64(hi)
        }
    }

    /// Horner evaluation over `(hi, lo)` coefficients in ascending order.
    pub fn horner(z: DoubleDouble, coeffs: &[(f64, f64)]) -> DoubleDouble {
        let mut acc = DoubleDouble::ZERO;
        for &c in coeffs.iter().rev() {
            acc = acc * z + DoubleDouble::from_pair(c);
        }
        acc
    }

    /// Horner evaluation over plain f64 coefficients in ascending order.
    pub fn horner_f64(z: DoubleDouble, coeffs: &[f64]) -> DoubleDouble {
        let mut acc = DoubleDouble::ZERO;
        for &c in coeffs.iter().rev() {
            acc = (acc * z).add_f64(c);
        }
        acc
    }
}

impl From<f64> for DoubleDouble {
    #[inline]
    fn from(x: f64) -> Self {
        DoubleDouble::from_f64(x)
    }
}

impl From<DoubleDouble> for f64 {
    #[inline]
    fn from(x: DoubleDouble) -> Self {
        x.to_f64()
    }
}

impl Neg for DoubleDouble {
    type Output = DoubleDouble;

    #[inline]
    fn neg(self) -> DoubleDouble {
        DoubleDouble::new(-self.hi, -self.lo)
    }
}

impl Add for DoubleDouble {
    type Output = DoubleDouble;

    /// Accurate addition (both components are two-summed).
    #[inline]
    fn add(self, rhs: DoubleDouble) -> DoubleDouble {
        let (s1, s2) = two_sum(self.hi, rhs.hi);
        if !s1.is_finite() {
            return DoubleDouble::from_f64(s1);
        }
        let (t1, t2) = two_sum(self.lo, rhs.lo);
        let (s1, s2) = fast_two_sum(s1, s2 + t1);
        let (hi, lo) = fast_two_sum(s1, s2 + t2);
        DoubleDouble { hi, lo }
    }
}

impl Sub for DoubleDouble {
    type Output = DoubleDouble;

    #[inline]
    fn sub(self, rhs: DoubleDouble) -> DoubleDouble {
        self + (-rhs)
    }
}

impl Mul for DoubleDouble {
    type Output = DoubleDouble;

    #[inline]
    fn mul(self, rhs: DoubleDouble) -> DoubleDouble {
        let (p, e) = exact_mul(self.hi, rhs.hi);
        if !p.is_finite() {
            return DoubleDouble::from_f64(p);
        }
        let e = e + (self.hi * rhs.lo + self.lo * rhs.hi);
        let (hi, lo) = fast_two_sum(p, e);
        DoubleDouble { hi, lo }
    }
}

impl Div for DoubleDouble {
    type Output = DoubleDouble;

    /// Long division with three f64 quotient digits.
    #[inline]
    fn div(self, rhs: DoubleDouble) -> DoubleDouble {
        let q1 = self.hi / rhs.hi;
        if !q1.is_finite() || q1 == 0.0 {
            return DoubleDouble::from_f64(q1);
        }
        let r = self - rhs.mul_f64(q1);
        let q2 = r.hi / rhs.hi;
        let r = r - rhs.mul_f64(q2);
        let q3 = r.hi / rhs.hi;
        let (hi, lo) = fast_two_sum(q1, q2);
        DoubleDouble { hi, lo }.add_f64(q3)
    }
}

impl Add<f64> for DoubleDouble {
    type Output = DoubleDouble;

    #[inline]
    fn add(self, rhs: f64) -> DoubleDouble {
        self.add_f64(rhs)
    }
}

impl Sub<f64> for DoubleDouble {
    type Output = DoubleDouble;

    #[inline]
    fn sub(self, rhs: f64) -> DoubleDouble {
        self.add_f64(-rhs)
    }
}

impl Mul<f64> for DoubleDouble {
    type Output = DoubleDouble;

    #[inline]
    fn mul(self, rhs: f64) -> DoubleDouble {
        self.mul_f64(rhs)
    }
}

impl Div<f64> for DoubleDouble {
    type Output = DoubleDouble;

    #[inline]
    fn div(self, rhs: f64) -> DoubleDouble {
        self / DoubleDouble::from_f64(rhs)
    }
}

impl PartialOrd for DoubleDouble {
    /// Lexicographic on `(hi, lo)`, which is the numeric order for
    /// normalized values.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match self.hi.partial_cmp(&other.hi)? {
            Ordering::Equal => self.lo.partial_cmp(&other.lo),
            ord => Some(ord),
        }
    }
}
