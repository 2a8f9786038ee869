//! Euclidean norm `√(x² + y²)` without intermediate overflow or underflow.
//!
//! Both inputs are scaled by the power of two that brings the larger one
//! into `[1, 2)`. The squares are formed exactly with
//! [`two_prod`](crate::compensated::two_prod) and summed with
//! [`two_sum`](crate::compensated::two_sum), and one correction step after
//! the square root absorbs the low-order part.
//!
//! [`hypot3_f64`] does the same for `√(x² + y² + z²)`. The three squares are
//! accumulated with two compensated additions; components too small to
//! matter after scaling underflow to zero harmlessly.

use crate::compensated::{two_prod, two_sum};
use crate::ieee754::{Ieee754, base2_mant_and_exp, ldexp};
use crate::sqrt::{sqrt_f32, sqrt_f64};

fn hypot_kernel<T: Ieee754>(x: T, y: T, sqrt: fn(T) -> T) -> T {
    if x.is_inf_bits() || y.is_inf_bits() {
        return T::infinity();
    }
    if x.is_nan_bits() || y.is_nan_bits() {
        return T::nan();
    }
    let (x, y) = (x.abs(), y.abs());
    let (a, b) = if x >= y { (x, y) } else { (y, x) };
    if b == T::zero() {
        return a;
    }
    let (_, ea) = base2_mant_and_exp(a);
    let (_, eb) = base2_mant_and_exp(b);
    if ea - eb > T::MACH_DIGITS {
        return a + b;
    }
    let a = ldexp(a, -ea);
    let b = ldexp(b, -ea);

    let (a2, a2_err) = two_prod(a, a);
    let (b2, b2_err) = two_prod(b, b);
    let (s, s_err) = two_sum(a2, b2);
    let lo = s_err + (a2_err + b2_err);

    let h = sqrt(s);
    let (h2, h2_err) = two_prod(h, h);
    let r = ((s - h2) - h2_err) + lo;
    let h = h + r / (h + h);
    ldexp(h, ea)
}

fn hypot3_kernel<T: Ieee754>(x: T, y: T, z: T, sqrt: fn(T) -> T) -> T {
    if x.is_inf_bits() || y.is_inf_bits() || z.is_inf_bits() {
        return T::infinity();
    }
    if x.is_nan_bits() || y.is_nan_bits() || z.is_nan_bits() {
        return T::nan();
    }
    let (x, y, z) = (x.abs(), y.abs(), z.abs());
    let a = x.max(y).max(z);
    if a == T::zero() {
        return a;
    }
    let (_, ea) = base2_mant_and_exp(a);
    let (x, y, z) = (ldexp(x, -ea), ldexp(y, -ea), ldexp(z, -ea));

    let (x2, x2_err) = two_prod(x, x);
    let (y2, y2_err) = two_prod(y, y);
    let (z2, z2_err) = two_prod(z, z);
    let (s, s_err) = two_sum(x2, y2);
    let (s, t_err) = two_sum(s, z2);
    let lo = (s_err + t_err) + (x2_err + y2_err + z2_err);

    let h = sqrt(s);
    let (h2, h2_err) = two_prod(h, h);
    let r = ((s - h2) - h2_err) + lo;
    let h = h + r / (h + h);
    ldexp(h, ea)
}

/// `√(x² + y²)`. An infinite argument gives +inf even when the other is NaN.
pub fn hypot_f32(x: f32, y: f32) -> f32 {
    hypot_kernel(x, y, sqrt_f32)
}

/// `√(x² + y²)`. An infinite argument gives +inf even when the other is NaN.
pub fn hypot_f64(x: f64, y: f64) -> f64 {
    hypot_kernel(x, y, sqrt_f64)
}

/// `√(x² + y² + z²)`. An infinite argument gives +inf even when another is
/// NaN.
pub fn hypot3_f32(x: f32, y: f32, z: f32) -> f32 {
    hypot3_kernel(x, y, z, sqrt_f32)
}

/// `√(x² + y² + z²)`. An infinite argument gives +inf even when another is
/// NaN.
pub fn hypot3_f64(x: f64, y: f64, z: f64) -> f64 {
    hypot3_kernel(x, y, z, sqrt_f64)
}
