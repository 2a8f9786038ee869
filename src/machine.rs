//! Machine constants and the `MachineFloat` trait.
//!
//! Constants follow the IEEE-754 binary32/binary64 parameters. They drive
//! region thresholds, the Veltkamp splitting constant and default solver
//! tolerances.

use num_traits::Float;

/// Floating-point trait for the native precisions.
///
/// Implemented for `f64` and `f32`. Provides machine constants and the
/// conversions used by generic kernels.
pub trait MachineFloat: Float + core::fmt::Debug + 'static {
    /// Machine epsilon, the gap between 1 and the next representable value.
    const MACH_EPSILON: Self;
    /// Smallest positive normal number.
    const MACH_TINY: Self;
    /// Largest finite number.
    const MACH_HUGE: Self;
    /// Number of binary digits in the significand, implicit bit included.
    const MACH_DIGITS: i32;
    /// Minimum exponent of a normal number, `x = m·2^e` with `1 <= m < 2`.
    const MACH_MIN_EXP: i32;
    /// Maximum exponent of a finite number, `x = m·2^e` with `1 <= m < 2`.
    const MACH_MAX_EXP: i32;
    /// Veltkamp splitting constant `2^⌈DIGITS/2⌉ + 1`.
    const SPLITTER: Self;

    /// Infallible conversion from f64.
    ///
    /// For f64 this is the identity; for f32 it rounds via `as f32`.
    /// Coefficient tables shared between precisions are written as f64
    /// literals, so this conversion always succeeds for the supported types.
    fn from_f64(x: f64) -> Self;

    /// Widening conversion to f64. Exact for both supported types.
    fn to_f64(self) -> f64;

    /// Fused multiply-add: `self * a + b`.
    ///
    /// With `std` enabled, uses hardware FMA via the C library `fma()`.
    /// Without `std`, falls back to plain `self * a + b` to avoid the
    /// slow software FMA in libm. Callers needing an exact product error
    /// must use [`two_prod`](crate::compensated::two_prod) instead.
    ///
    /// Named `fma` to avoid ambiguity with [`Float::mul_add`].
    fn fma(self, a: Self, b: Self) -> Self;
}

impl MachineFloat for f64 {
    const MACH_EPSILON: f64 = 2.220446049250313e-16;
    const MACH_TINY: f64 = 2.2250738585072014e-308;
    const MACH_HUGE: f64 = 1.7976931348623157e+308;
    const MACH_DIGITS: i32 = 53;
    const MACH_MIN_EXP: i32 = -1022;
    const MACH_MAX_EXP: i32 = 1023;
    const SPLITTER: f64 = 134_217_729.0; // 2^27 + 1

    #[inline]
    fn from_f64(x: f64) -> f64 {
        x
    }

    #[inline]
    fn to_f64(self) -> f64 {
        self
    }

    #[cfg(feature = "std")]
    #[inline]
    fn fma(self, a: f64, b: f64) -> f64 {
        Float::mul_add(self, a, b)
    }

    #[cfg(not(feature = "std"))]
    #[inline]
    fn fma(self, a: f64, b: f64) -> f64 {
        self * a + b
    }
}

impl MachineFloat for f32 {
    const MACH_EPSILON: f32 = 1.1920929e-7;
    const MACH_TINY: f32 = 1.1754944e-38;
    const MACH_HUGE: f32 = 3.4028235e+38;
    const MACH_DIGITS: i32 = 24;
    const MACH_MIN_EXP: i32 = -126;
    const MACH_MAX_EXP: i32 = 127;
    const SPLITTER: f32 = 4097.0; // 2^12 + 1

    #[inline]
    fn from_f64(x: f64) -> f32 {
        x as f32
    }

    #[inline]
    fn to_f64(self) -> f64 {
        self as f64
    }

    #[cfg(feature = "std")]
    #[inline]
    fn fma(self, a: f32, b: f32) -> f32 {
        Float::mul_add(self, a, b)
    }

    #[cfg(not(feature = "std"))]
    #[inline]
    fn fma(self, a: f32, b: f32) -> f32 {
        self * a + b
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constants_match_core() {
        assert_eq!(f64::MACH_EPSILON, f64::EPSILON);
        assert_eq!(f64::MACH_TINY, f64::MIN_POSITIVE);
        assert_eq!(f64::MACH_HUGE, f64::MAX);
        assert_eq!(f64::MACH_DIGITS as u32, f64::MANTISSA_DIGITS);
        assert_eq!(f32::MACH_EPSILON, f32::EPSILON);
        assert_eq!(f32::MACH_TINY, f32::MIN_POSITIVE);
        assert_eq!(f32::MACH_HUGE, f32::MAX);
        assert_eq!(f32::MACH_DIGITS as u32, f32::MANTISSA_DIGITS);
    }

    #[test]
    fn exponent_range_brackets_normals() {
        assert_eq!(2.0_f64.powi(f64::MACH_MIN_EXP), f64::MIN_POSITIVE);
        assert!(2.0_f64.powi(f64::MACH_MAX_EXP).is_finite());
        assert!(2.0_f64.powi(f64::MACH_MAX_EXP + 1).is_infinite());
        assert_eq!(2.0_f32.powi(f32::MACH_MIN_EXP), f32::MIN_POSITIVE);
        assert!(2.0_f32.powi(f32::MACH_MAX_EXP + 1).is_infinite());
    }

    #[test]
    fn splitter_is_half_width() {
        assert_eq!(f64::SPLITTER, 2.0_f64.powi(27) + 1.0);
        assert_eq!(f32::SPLITTER, 2.0_f32.powi(12) + 1.0);
    }

    #[test]
    fn fma_basic() {
        assert_eq!(MachineFloat::fma(2.0_f64, 3.0, 1.0), 7.0);
        assert_eq!(MachineFloat::fma(2.0_f32, 3.0, 1.0), 7.0);
    }
}
