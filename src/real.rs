//! Precision-generic surface over the per-precision entry points.
//!
//! [`Real`] covers the functions that have an `f32`, `f64` and
//! double-double implementation; [`Special`] adds those available for the
//! native precisions only. The free functions pick the implementation from
//! the argument type at compile time, so `log(2.0_f32)` calls
//! [`log_f32`](crate::log::log_f32) and `log(DoubleDouble::from(2.0))`
//! calls [`log_dd`](crate::log::log_dd).
//!
//! Trait methods share their names with inherent float methods. On a
//! concrete `f64` the inherent method wins, so call through the free
//! functions or `<f64 as Real>::sqrt(x)` to reach this crate's version.

use crate::abs::{abs_dd, abs_f32, abs_f64, copysign_dd, copysign_f32, copysign_f64};
use crate::arcsin::{arccos_f32, arccos_f64, arcsin_f32, arcsin_f64};
use crate::arctan::{arctan2_f32, arctan2_f64, arctan_dd, arctan_f32, arctan_f64};
use crate::bessel_i0::{bessel_i0_f32, bessel_i0_f64};
use crate::bessel_j0::{bessel_j0_f32, bessel_j0_f64};
use crate::cbrt::{cbrt_dd, cbrt_f32, cbrt_f64};
use crate::double_double::DoubleDouble;
use crate::erf::{erf_f32, erf_f64};
use crate::exp::{cosh_dd, cosh_f32, cosh_f64, exp_dd, exp_f32, exp_f64};
use crate::fresnel::{
    fresnel_cos_f32, fresnel_cos_f64, fresnel_sin_f32, fresnel_sin_f64, normalized_fresnel_cos_f32,
    normalized_fresnel_cos_f64, normalized_fresnel_sin_f32, normalized_fresnel_sin_f64,
};
use crate::hypot::{hypot_f32, hypot_f64, hypot3_f32, hypot3_f64};
use crate::ieee754::Ieee754;
use crate::lambert_w::{lambert_w_dd, lambert_w_f32, lambert_w_f64};
use crate::log::{log_dd, log_f32, log_f64};
use crate::sqrt::{sqrt_dd, sqrt_f32, sqrt_f64};
use crate::types::FpClass;

/// Functions implemented for `f32`, `f64` and [`DoubleDouble`].
pub trait Real: Copy + PartialOrd + core::fmt::Debug {
    /// IEEE-754 class; a double-double is classified by its high part.
    fn classify(self) -> FpClass;
    fn abs(self) -> Self;
    /// Magnitude of `self` with the sign of `sign`.
    fn copysign(self, sign: Self) -> Self;
    fn sqrt(self) -> Self;
    fn cbrt(self) -> Self;
    fn exp(self) -> Self;
    fn cosh(self) -> Self;
    /// Natural logarithm.
    fn log(self) -> Self;
    fn arctan(self) -> Self;
    /// Principal branch of the Lambert W function.
    fn lambert_w(self) -> Self;
}

/// Functions implemented for the native precisions only.
pub trait Special: Real {
    fn arcsin(self) -> Self;
    fn arccos(self) -> Self;
    /// Four-quadrant arctangent of `self / x`.
    fn arctan2(self, x: Self) -> Self;
    fn hypot(self, other: Self) -> Self;
    /// `√(self² + y² + z²)`.
    fn hypot3(self, y: Self, z: Self) -> Self;
    fn erf(self) -> Self;
    fn bessel_j0(self) -> Self;
    fn bessel_i0(self) -> Self;
    /// `∫₀ˣ sin(t²) dt`.
    fn fresnel_sin(self) -> Self;
    /// `∫₀ˣ cos(t²) dt`.
    fn fresnel_cos(self) -> Self;
    /// `∫₀ˣ sin(πt²/2) dt`.
    fn normalized_fresnel_sin(self) -> Self;
    /// `∫₀ˣ cos(πt²/2) dt`.
    fn normalized_fresnel_cos(self) -> Self;
}

macro_rules! impl_real {
    ($t:ty, $abs:ident, $copysign:ident, $sqrt:ident, $cbrt:ident, $exp:ident, $cosh:ident,
     $log:ident, $atan:ident, $lw:ident, $classify:expr) => {
        impl Real for $t {
            #[inline]
            fn classify(self) -> FpClass {
                ($classify)(self)
            }
            #[inline]
            fn abs(self) -> Self {
                $abs(self)
            }
            #[inline]
            fn copysign(self, sign: Self) -> Self {
                $copysign(self, sign)
            }
            #[inline]
            fn sqrt(self) -> Self {
                $sqrt(self)
            }
            #[inline]
            fn cbrt(self) -> Self {
                $cbrt(self)
            }
            #[inline]
            fn exp(self) -> Self {
                $exp(self)
            }
            #[inline]
            fn cosh(self) -> Self {
                $cosh(self)
            }
            #[inline]
            fn log(self) -> Self {
                $log(self)
            }
            #[inline]
            fn arctan(self) -> Self {
                $atan(self)
            }
            #[inline]
            fn lambert_w(self) -> Self {
                $lw(self)
            }
        }
    };
}

impl_real!(
    f32, abs_f32, copysign_f32, sqrt_f32, cbrt_f32, exp_f32, cosh_f32, log_f32, arctan_f32,
    lambert_w_f32, |x: f32| x.classify_bits()
);
impl_real!(
    f64, abs_f64, copysign_f64, sqrt_f64, cbrt_f64, exp_f64, cosh_f64, log_f64, arctan_f64,
    lambert_w_f64, |x: f64| x.classify_bits()
);
impl_real!(
    DoubleDouble, abs_dd, copysign_dd, sqrt_dd, cbrt_dd, exp_dd, cosh_dd, log_dd, arctan_dd,
    lambert_w_dd, |x: DoubleDouble| x.classify()
);

macro_rules! impl_special {
    ($t:ty, $asin:ident, $acos:ident, $atan2:ident, $hypot:ident, $hypot3:ident,
     $erf:ident, $j0:ident, $i0:ident, $fs:ident, $fc:ident, $nfs:ident, $nfc:ident) => {
        impl Special for $t {
            #[inline]
            fn arcsin(self) -> Self {
                $asin(self)
            }
            #[inline]
            fn arccos(self) -> Self {
                $acos(self)
            }
            #[inline]
            fn arctan2(self, x: Self) -> Self {
                $atan2(self, x)
            }
            #[inline]
            fn hypot(self, other: Self) -> Self {
                $hypot(self, other)
            }
            #[inline]
            fn hypot3(self, y: Self, z: Self) -> Self {
                $hypot3(self, y, z)
            }
            #[inline]
            fn erf(self) -> Self {
                $erf(self)
            }
            #[inline]
            fn bessel_j0(self) -> Self {
                $j0(self)
            }
            #[inline]
            fn bessel_i0(self) -> Self {
                $i0(self)
            }
            #[inline]
            fn fresnel_sin(self) -> Self {
                $fs(self)
            }
            #[inline]
            fn fresnel_cos(self) -> Self {
                $fc(self)
            }
            #[inline]
            fn normalized_fresnel_sin(self) -> Self {
                $nfs(self)
            }
            #[inline]
            fn normalized_fresnel_cos(self) -> Self {
                $nfc(self)
            }
        }
    };
}

impl_special!(
    f32, arcsin_f32, arccos_f32, arctan2_f32, hypot_f32, hypot3_f32, erf_f32, bessel_j0_f32,
    bessel_i0_f32, fresnel_sin_f32, fresnel_cos_f32, normalized_fresnel_sin_f32,
    normalized_fresnel_cos_f32
);
impl_special!(
    f64, arcsin_f64, arccos_f64, arctan2_f64, hypot_f64, hypot3_f64, erf_f64, bessel_j0_f64,
    bessel_i0_f64, fresnel_sin_f64, fresnel_cos_f64, normalized_fresnel_sin_f64,
    normalized_fresnel_cos_f64
);

// ── generic entry points ──

/// IEEE-754 class of `x`.
#[inline]
pub fn classify<T: Real>(x: T) -> FpClass {
    x.classify()
}

/// `|x|`.
#[inline]
pub fn abs<T: Real>(x: T) -> T {
    x.abs()
}

/// `|x|` with the sign of `sign`.
#[inline]
pub fn copysign<T: Real>(x: T, sign: T) -> T {
    x.copysign(sign)
}

/// Square root.
#[inline]
pub fn sqrt<T: Real>(x: T) -> T {
    x.sqrt()
}

/// Cube root.
#[inline]
pub fn cbrt<T: Real>(x: T) -> T {
    x.cbrt()
}

/// `e^x`.
#[inline]
pub fn exp<T: Real>(x: T) -> T {
    x.exp()
}

/// Hyperbolic cosine.
#[inline]
pub fn cosh<T: Real>(x: T) -> T {
    x.cosh()
}

/// Natural logarithm.
#[inline]
pub fn log<T: Real>(x: T) -> T {
    x.log()
}

/// Arctangent.
#[inline]
pub fn arctan<T: Real>(x: T) -> T {
    x.arctan()
}

/// Principal-branch Lambert W.
#[inline]
pub fn lambert_w<T: Real>(x: T) -> T {
    x.lambert_w()
}

/// Arcsine.
#[inline]
pub fn arcsin<T: Special>(x: T) -> T {
    x.arcsin()
}

/// Arccosine.
#[inline]
pub fn arccos<T: Special>(x: T) -> T {
    x.arccos()
}

/// Four-quadrant arctangent of `y / x`.
#[inline]
pub fn arctan2<T: Special>(y: T, x: T) -> T {
    y.arctan2(x)
}

/// `√(x² + y²)`.
#[inline]
pub fn hypot<T: Special>(x: T, y: T) -> T {
    x.hypot(y)
}

/// `√(x² + y² + z²)`.
#[inline]
pub fn hypot3<T: Special>(x: T, y: T, z: T) -> T {
    x.hypot3(y, z)
}

/// Error function.
#[inline]
pub fn erf<T: Special>(x: T) -> T {
    x.erf()
}

/// Bessel `J0`.
#[inline]
pub fn bessel_j0<T: Special>(x: T) -> T {
    x.bessel_j0()
}

/// Modified Bessel `I0`.
#[inline]
pub fn bessel_i0<T: Special>(x: T) -> T {
    x.bessel_i0()
}

/// Fresnel sine integral `∫₀ˣ sin(t²) dt`.
#[inline]
pub fn fresnel_sin<T: Special>(x: T) -> T {
    x.fresnel_sin()
}

/// Fresnel cosine integral `∫₀ˣ cos(t²) dt`.
#[inline]
pub fn fresnel_cos<T: Special>(x: T) -> T {
    x.fresnel_cos()
}

/// Normalized Fresnel sine integral `∫₀ˣ sin(πt²/2) dt`.
#[inline]
pub fn normalized_fresnel_sin<T: Special>(x: T) -> T {
    x.normalized_fresnel_sin()
}

/// Normalized Fresnel cosine integral `∫₀ˣ cos(πt²/2) dt`.
#[inline]
pub fn normalized_fresnel_cos<T: Special>(x: T) -> T {
    x.normalized_fresnel_cos()
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── dispatch ──

    #[test]
    fn generic_calls_match_entry_points() {
        assert_eq!(log(2.5_f64), log_f64(2.5));
        assert_eq!(log(2.5_f32), log_f32(2.5));
        assert_eq!(sqrt(3.0_f64), sqrt_f64(3.0));
        assert_eq!(exp(-1.25_f32), exp_f32(-1.25));
        assert_eq!(cbrt(-9.0_f64), cbrt_f64(-9.0));
        assert_eq!(arctan(0.3_f32), arctan_f32(0.3));
        assert_eq!(lambert_w(2.0_f64), lambert_w_f64(2.0));
        assert_eq!(erf(0.7_f64), erf_f64(0.7));
        assert_eq!(bessel_j0(3.5_f32), bessel_j0_f32(3.5));
        assert_eq!(bessel_i0(12.0_f64), bessel_i0_f64(12.0));
        assert_eq!(arctan2(1.0_f64, -2.0), arctan2_f64(1.0, -2.0));
        assert_eq!(hypot(5.0_f32, 12.0), 13.0);
        assert_eq!(arcsin(0.25_f64), arcsin_f64(0.25));
        assert_eq!(arccos(0.25_f32), arccos_f32(0.25));
        assert_eq!(cosh(1.5_f64), cosh_f64(1.5));
        assert_eq!(hypot3(1.0_f32, 2.0, 2.0), 3.0);
        assert_eq!(fresnel_sin(2.0_f64), fresnel_sin_f64(2.0));
        assert_eq!(fresnel_cos(0.5_f32), fresnel_cos_f32(0.5));
        assert_eq!(normalized_fresnel_sin(3.0_f64), normalized_fresnel_sin_f64(3.0));
        assert_eq!(normalized_fresnel_cos(1.25_f32), normalized_fresnel_cos_f32(1.25));
    }

    #[test]
    fn double_double_dispatch() {
        let x = DoubleDouble::from_f64(2.0);
        assert_eq!(log(x), log_dd(x));
        assert_eq!(exp(x), exp_dd(x));
        assert_eq!(sqrt(x), sqrt_dd(x));
        assert_eq!(cosh(x), cosh_dd(x));
        assert_eq!(abs(-x), x);
        assert_eq!(copysign(x, -x), -x);
        assert_eq!(classify(x), FpClass::Normal);
        assert_eq!(classify(DoubleDouble::NAN), FpClass::Nan);
    }

    #[test]
    fn trait_methods_bypass_inherent() {
        assert_eq!(<f64 as Real>::sqrt(2.0), sqrt_f64(2.0));
        assert_eq!(<f64 as Real>::classify(-0.0), FpClass::Zero);
        assert_eq!(<f32 as Real>::classify(1e-40), FpClass::Subnormal);
    }

    // ── generic callers ──

    fn log_of_exp<T: Real>(x: T) -> T {
        log(exp(x))
    }

    #[test]
    fn generic_composition() {
        assert!((log_of_exp(0.75_f64) - 0.75).abs() <= 2.0 * f64::EPSILON);
        assert!((log_of_exp(0.75_f32) - 0.75).abs() <= 2.0 * f32::EPSILON);
        let r = log_of_exp(DoubleDouble::from_f64(0.75)) - DoubleDouble::from_f64(0.75);
        assert!(r.hi.abs() < 1e-30);
    }
}
