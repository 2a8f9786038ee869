//! Arcsine and arccosine.
//!
//! Both share one rational minimax `R(z)` with
//! `asin(x) = x + x·z·R(z)`, `z = x²`, for `|x| < 1/2`. Closer to one the
//! half-angle identity `acos(|x|) = 2·asin(√z)`, `z = (1 − |x|)/2`, brings
//! the argument back below 1/2.

#![allow(clippy::excessive_precision)]

use crate::algo::constants::{DD_PI_BY_TWO, PI, PI_BY_TWO};
use crate::compensated::two_prod;
use crate::ieee754::Ieee754;
use crate::poly::horner_f64;
use crate::sqrt::{sqrt_f32, sqrt_f64};

#[rustfmt::skip]
const ASIN_P: [f64; 5] = [
    1.6666666666666675172610409335401762495970069423667E-01,
    -2.9647442738212244852684254810912673101657174481766E-01,
    1.6001969221867813049084016184632874497094695883901E-01,
    -2.5510481570872249173776491491771394448907125511346E-02,
    2.6066097969323856113412749790103952111930280796716E-04,
];

#[rustfmt::skip]
const ASIN_Q: [f64; 5] = [
    1.0,
    -2.2288465642924490579275829949790393075345284377974E+00,
    1.6952419643599424152439428142515867324057155650851E+00,
    -5.0120096652328631713045487959099718175996563925832E-01,
    4.5088915315077310386265964807853660211534733521946E-02,
];

/// `x + x·z·R(z)` with `z = x²`, valid for `|x| <= 1/2`.
#[inline]
fn asin_rational<T: Ieee754>(x: T, z: T) -> T {
    let r = horner_f64(z, &ASIN_P) / horner_f64(z, &ASIN_Q);
    x + x * z * r
}

/// `acos(a)` for `1/2 <= a < 1` by the half-angle identity.
#[inline]
fn acos_tail<T: Ieee754>(a: T, sqrt: fn(T) -> T) -> T {
    let z = (T::one() - a) * T::from_f64(0.5);
    let s = sqrt(z);
    let two = T::one() + T::one();
    two * asin_rational(s, z)
}

/// `π/2` as a rounded value of `T` and its error.
#[inline]
fn pi_by_two_split<T: Ieee754>() -> (T, T) {
    let hi = T::from_f64(DD_PI_BY_TWO.0);
    let lo = T::from_f64((DD_PI_BY_TWO.0 - hi.to_f64()) + DD_PI_BY_TWO.1);
    (hi, lo)
}

/// `asin(a) = π/2 − acos(a)` for `1/2 <= a < 1`.
///
/// The subtraction cancels up to one bit, so the rounding error of `√z`
/// is recovered exactly from `z − s²` and folded into the low-order sum.
fn asin_tail<T: Ieee754>(a: T, sqrt: fn(T) -> T) -> T {
    let z = (T::one() - a) * T::from_f64(0.5);
    let s = sqrt(z);
    let (p, e) = two_prod(s, s);
    let c = ((z - p) - e) / (s + s);
    let r = s * z * (horner_f64(z, &ASIN_P) / horner_f64(z, &ASIN_Q));
    let (hi, lo) = pi_by_two_split::<T>();
    let two = T::one() + T::one();
    (hi - two * s) - (two * (c + r) - lo)
}

fn arcsin_kernel<T: Ieee754>(x: T, tiny: T, sqrt: fn(T) -> T) -> T {
    if x.is_nan_bits() {
        return x;
    }
    let a = x.abs();
    if a < tiny {
        return x;
    }
    if a < T::from_f64(0.5) {
        return asin_rational(x, x * x);
    }
    if a > T::one() {
        return T::nan();
    }
    let out = if a == T::one() {
        T::from_f64(PI_BY_TWO)
    } else {
        asin_tail(a, sqrt)
    };
    if x.sign_bit() { -out } else { out }
}

fn arccos_kernel<T: Ieee754>(x: T, sqrt: fn(T) -> T) -> T {
    if x.is_nan_bits() {
        return x;
    }
    let a = x.abs();
    if a < T::from_f64(0.5) {
        return T::from_f64(PI_BY_TWO) - asin_rational(x, x * x);
    }
    if a > T::one() {
        return T::nan();
    }
    if x == T::one() {
        return T::zero();
    }
    if x == -T::one() {
        return T::from_f64(PI);
    }
    let t = acos_tail(a, sqrt);
    if x.sign_bit() { T::from_f64(PI) - t } else { t }
}

/// Arcsine on `[−1, 1]`; NaN outside. Odd.
pub fn arcsin_f32(x: f32) -> f32 {
    arcsin_kernel(x, 2.44140625e-4, sqrt_f32)
}

/// Arcsine on `[−1, 1]`; NaN outside. Odd.
pub fn arcsin_f64(x: f64) -> f64 {
    arcsin_kernel(x, 1.4901161193847656e-8, sqrt_f64)
}

/// Arccosine on `[−1, 1]`, values in `[0, π]`; NaN outside.
pub fn arccos_f32(x: f32) -> f32 {
    arccos_kernel(x, sqrt_f32)
}

/// Arccosine on `[−1, 1]`, values in `[0, π]`; NaN outside.
pub fn arccos_f64(x: f64) -> f64 {
    arccos_kernel(x, sqrt_f64)
}
