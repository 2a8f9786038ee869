//! Absolute value and sign transfer by direct sign-bit manipulation.

use crate::double_double::DoubleDouble;
use crate::ieee754::Ieee754;

#[inline]
fn sign_mask<T: Ieee754>() -> u64 {
    1u64 << (T::MANTISSA_BITS + T::EXPONENT_BITS)
}

/// `|x|` for either native precision: clears the sign bit.
#[inline]
pub(crate) fn abs<T: Ieee754>(x: T) -> T {
    T::from_raw(x.to_raw() & !sign_mask::<T>())
}

/// Magnitude of `x` with the sign bit of `y`.
#[inline]
pub(crate) fn copysign<T: Ieee754>(x: T, y: T) -> T {
    let mask = sign_mask::<T>();
    T::from_raw((x.to_raw() & !mask) | (y.to_raw() & mask))
}

/// Absolute value. `abs(-0.0) = +0.0`, NaN keeps its payload.
#[inline]
pub fn abs_f32(x: f32) -> f32 {
    abs(x)
}

/// Absolute value. `abs(-0.0) = +0.0`, NaN keeps its payload.
#[inline]
pub fn abs_f64(x: f64) -> f64 {
    abs(x)
}

/// Absolute value of a double-double: both parts flip when `hi` is negative.
#[inline]
pub fn abs_dd(x: DoubleDouble) -> DoubleDouble {
    x.abs()
}

/// `|x|` with the sign of `y`.
#[inline]
pub fn copysign_f32(x: f32, y: f32) -> f32 {
    copysign(x, y)
}

/// `|x|` with the sign of `y`.
#[inline]
pub fn copysign_f64(x: f64, y: f64) -> f64 {
    copysign(x, y)
}

/// `|x|` with the sign of `y.hi`.
#[inline]
pub fn copysign_dd(x: DoubleDouble, y: DoubleDouble) -> DoubleDouble {
    if x.is_sign_negative() == y.is_sign_negative() { x } else { -x }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn abs_special_values() {
        assert_eq!(abs_f64(-0.0).to_bits(), 0);
        assert_eq!(abs_f32(-0.0).to_bits(), 0);
        assert!(abs_f64(f64::NAN).is_nan());
        assert!(!abs_f64(-f64::NAN).is_sign_negative());
        assert_eq!(abs_f64(f64::NEG_INFINITY), f64::INFINITY);
        assert_eq!(abs_f32(f32::NEG_INFINITY), f32::INFINITY);
        assert_eq!(abs_f64(-2.5), 2.5);
        assert_eq!(abs_f64(f64::MIN_POSITIVE / 8.0), f64::MIN_POSITIVE / 8.0);
        assert_eq!(abs_f64(-f64::MIN_POSITIVE / 8.0), f64::MIN_POSITIVE / 8.0);
    }

    #[test]
    fn copysign_moves_sign_only() {
        assert_eq!(copysign_f64(3.0, -0.0), -3.0);
        assert_eq!(copysign_f64(-3.0, 1.0), 3.0);
        assert_eq!(copysign_f32(0.0, -1.0).to_bits(), (-0.0_f32).to_bits());
        assert!(copysign_f64(f64::NAN, -1.0).is_sign_negative());
        assert_eq!(copysign_f64(f64::INFINITY, -5.0), f64::NEG_INFINITY);
    }

    #[test]
    fn dd_sign_ops() {
        let x = DoubleDouble::new(-1.0, 1e-20);
        let a = abs_dd(x);
        assert_eq!(a.hi, 1.0);
        assert_eq!(a.lo, -1e-20);
        let c = copysign_dd(a, DoubleDouble::from_f64(-2.0));
        assert_eq!(c, x);
        assert_eq!(copysign_dd(x, x), x);
    }
}
