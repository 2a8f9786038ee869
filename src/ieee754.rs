//! Bit-level view of IEEE-754 binary32 and binary64 values.
//!
//! Classification and decomposition read the sign, exponent and mantissa
//! fields directly through `to_bits`. The [`portable`] submodule offers the
//! same classification through arithmetic alone.

use crate::machine::MachineFloat;
use crate::types::{Decomposed, FpClass};

/// Field layout of a native IEEE-754 format.
///
/// Raw bits are widened to `u64` so that generic code can handle both
/// precisions with one set of shifts and masks.
pub trait Ieee754: MachineFloat {
    /// Number of explicitly stored mantissa bits.
    const MANTISSA_BITS: u32;
    /// Width of the exponent field.
    const EXPONENT_BITS: u32;
    /// Exponent bias.
    const UBIAS: u32;

    /// Raw bit pattern, zero-extended to 64 bits.
    fn to_raw(self) -> u64;
    /// Inverse of [`to_raw`](Ieee754::to_raw); upper bits are ignored.
    fn from_raw(bits: u64) -> Self;

    /// All-ones exponent field value.
    #[inline]
    fn exponent_max() -> u32 {
        (1u32 << Self::EXPONENT_BITS) - 1
    }

    /// Sign bit.
    #[inline]
    fn sign_bit(self) -> bool {
        (self.to_raw() >> (Self::MANTISSA_BITS + Self::EXPONENT_BITS)) & 1 == 1
    }

    /// Biased exponent field.
    #[inline]
    fn exponent_bits(self) -> u32 {
        ((self.to_raw() >> Self::MANTISSA_BITS) as u32) & Self::exponent_max()
    }

    /// Stored mantissa field, without the implicit bit.
    #[inline]
    fn mantissa_bits(self) -> u64 {
        self.to_raw() & ((1u64 << Self::MANTISSA_BITS) - 1)
    }

    /// Exact classification from the exponent and mantissa fields.
    #[inline]
    fn classify_bits(self) -> FpClass {
        let expo = self.exponent_bits();
        let mant = self.mantissa_bits();
        if expo == 0 {
            if mant == 0 {
                FpClass::Zero
            } else {
                FpClass::Subnormal
            }
        } else if expo == Self::exponent_max() {
            if mant == 0 {
                FpClass::Infinite
            } else {
                FpClass::Nan
            }
        } else {
            FpClass::Normal
        }
    }

    /// `true` for all-ones exponent with a nonzero mantissa.
    #[inline]
    fn is_nan_bits(self) -> bool {
        self.classify_bits() == FpClass::Nan
    }

    /// `true` for all-ones exponent with a zero mantissa.
    #[inline]
    fn is_inf_bits(self) -> bool {
        self.classify_bits() == FpClass::Infinite
    }

    /// `true` for all-ones exponent, i.e. NaN or infinity.
    #[inline]
    fn is_nan_or_inf_bits(self) -> bool {
        self.exponent_bits() == Self::exponent_max()
    }

    /// `true` for a zero exponent with a nonzero mantissa.
    #[inline]
    fn is_subnormal_bits(self) -> bool {
        self.classify_bits() == FpClass::Subnormal
    }

    /// Sign, unbiased exponent and full significand of a finite nonzero value.
    ///
    /// Returns `None` for zeros, infinities and NaN.
    fn decompose(self) -> Option<Decomposed> {
        let negative = self.sign_bit();
        let mant = self.mantissa_bits();
        let implicit = 1u64 << Self::MANTISSA_BITS;
        match self.classify_bits() {
            FpClass::Normal => Some(Decomposed {
                negative,
                exponent: self.exponent_bits() as i32 - Self::UBIAS as i32,
                mantissa: mant | implicit,
            }),
            FpClass::Subnormal => {
                // Shift the leading bit up to the implicit position.
                let shift = mant.leading_zeros() - (63 - Self::MANTISSA_BITS);
                Some(Decomposed {
                    negative,
                    exponent: 1 - Self::UBIAS as i32 - shift as i32,
                    mantissa: mant << shift,
                })
            }
            _ => None,
        }
    }
}

impl Ieee754 for f64 {
    const MANTISSA_BITS: u32 = 52;
    const EXPONENT_BITS: u32 = 11;
    const UBIAS: u32 = 1023;

    #[inline]
    fn to_raw(self) -> u64 {
        self.to_bits()
    }

    #[inline]
    fn from_raw(bits: u64) -> f64 {
        f64::from_bits(bits)
    }
}

impl Ieee754 for f32 {
    const MANTISSA_BITS: u32 = 23;
    const EXPONENT_BITS: u32 = 8;
    const UBIAS: u32 = 127;

    #[inline]
    fn to_raw(self) -> u64 {
        self.to_bits() as u64
    }

    #[inline]
    fn from_raw(bits: u64) -> f32 {
        f32::from_bits(bits as u32)
    }
}

/// Exact power of two `2^n` for `n` in the normal exponent range.
#[inline]
pub(crate) fn pow2<T: Ieee754>(n: i32) -> T {
    debug_assert!((T::MACH_MIN_EXP..=T::MACH_MAX_EXP).contains(&n));
    T::from_raw(((n + T::UBIAS as i32) as u64) << T::MANTISSA_BITS)
}

/// Exact scaling `x · 2^n`.
///
/// Overflow goes to ±inf and results below the normal range round once
/// into the subnormals. Zero, inf and NaN pass through unchanged.
pub fn ldexp<T: Ieee754>(x: T, n: i32) -> T {
    let max = T::MACH_MAX_EXP;
    let min = T::MACH_MIN_EXP;
    let mut y = x;
    let mut n = n;
    // At most two pre-scaling steps in either direction bring n into range.
    if n > max {
        y = y * pow2::<T>(max);
        n -= max;
        if n > max {
            y = y * pow2::<T>(max);
            n -= max;
            if n > max {
                n = max;
            }
        }
    } else if n < min {
        // Scale by 2^(min + digits) to keep bits until the final rounding.
        let step = min + T::MACH_DIGITS;
        y = y * pow2::<T>(step);
        n -= step;
        if n < min {
            y = y * pow2::<T>(step);
            n -= step;
            if n < min {
                n = min;
            }
        }
    }
    y * pow2::<T>(n)
}

/// Split `x` as `m · 2^e` with `1 <= |m| < 2`.
///
/// Zero, infinities and NaN return `(x, 0)`. Subnormals are normalized.
pub fn base2_mant_and_exp<T: Ieee754>(x: T) -> (T, i32) {
    match x.decompose() {
        Some(d) => {
            let sign = if d.negative { 1u64 << (T::MANTISSA_BITS + T::EXPONENT_BITS) } else { 0 };
            let frac = d.mantissa & ((1u64 << T::MANTISSA_BITS) - 1);
            let bits = sign | ((T::UBIAS as u64) << T::MANTISSA_BITS) | frac;
            (T::from_raw(bits), d.exponent)
        }
        None => (x, 0),
    }
}

/// Arithmetic-only classification.
///
/// This is the degraded path for targets without a known bit layout: it
/// only uses comparisons and arithmetic, but must agree with
/// [`Ieee754::classify_bits`] on every input.
pub mod portable {
    use crate::machine::MachineFloat;
    use crate::types::FpClass;

    /// Classify `x` without inspecting its bits.
    #[allow(clippy::eq_op)]
    pub fn classify<T: MachineFloat>(x: T) -> FpClass {
        // NaN is the only value that compares unequal to itself.
        if x != x {
            return FpClass::Nan;
        }
        if x == T::zero() {
            return FpClass::Zero;
        }
        let ax = if x < T::zero() { -x } else { x };
        if ax > T::MACH_HUGE {
            FpClass::Infinite
        } else if ax < T::MACH_TINY {
            FpClass::Subnormal
        } else {
            FpClass::Normal
        }
    }

    /// `true` if `x` is NaN.
    #[inline]
    pub fn is_nan<T: MachineFloat>(x: T) -> bool {
        classify(x) == FpClass::Nan
    }

    /// `true` if `x` is ±inf. Uses self-division: `inf/inf` is NaN while
    /// every finite nonzero value divides itself to 1.
    #[inline]
    #[allow(clippy::eq_op)]
    pub fn is_inf<T: MachineFloat>(x: T) -> bool {
        let q = x / x;
        x == x && x != T::zero() && q != q
    }
}
