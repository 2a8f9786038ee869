//! Error-free transformations.
//!
//! Each function returns the rounded result together with its rounding
//! error, so that `out + err` is the exact value of the operation. These
//! are the building blocks of [`DoubleDouble`](crate::DoubleDouble) and of
//! the extra-precise reduction steps in the function kernels.

use crate::machine::MachineFloat;

/// Knuth's two-sum: `s + e == a + b` exactly, with no ordering requirement.
#[inline]
pub fn two_sum<T: MachineFloat>(a: T, b: T) -> (T, T) {
    let s = a + b;
    let bb = s - a;
    let err = (a - (s - bb)) + (b - bb);
    (s, err)
}

/// Dekker's fast two-sum. Requires `|a| >= |b|` (or `a == 0`).
#[inline]
pub fn fast_two_sum<T: MachineFloat>(a: T, b: T) -> (T, T) {
    let s = a + b;
    let z = s - a;
    (s, b - z)
}

/// Two-difference: `d + e == a - b` exactly.
#[inline]
pub fn two_diff<T: MachineFloat>(a: T, b: T) -> (T, T) {
    let d = a - b;
    let bb = d - a;
    let err = (a - (d - bb)) - (b + bb);
    (d, err)
}

/// Veltkamp split of `a` into `hi + lo` with each half fitting in
/// `⌈DIGITS/2⌉` bits, so that products of halves are exact.
///
/// Valid for `|a|` below `MACH_HUGE / SPLITTER`; larger inputs would
/// overflow in the scaling product.
#[inline]
pub fn split<T: MachineFloat>(a: T) -> (T, T) {
    let t = T::SPLITTER * a;
    let hi = t - (t - a);
    (hi, a - hi)
}

/// Dekker's two-product: `p + e == a · b` exactly, using only
/// ordinary multiplications and additions.
#[inline]
pub fn two_prod<T: MachineFloat>(a: T, b: T) -> (T, T) {
    let p = a * b;
    let (ahi, alo) = split(a);
    let (bhi, blo) = split(b);
    let err = ((ahi * bhi - p) + ahi * blo + alo * bhi) + alo * blo;
    (p, err)
}

/// Two-product through a correctly rounded fused multiply-add.
///
/// Always exact: this goes through [`Float::mul_add`](num_traits::Float::mul_add),
/// which is the hardware instruction with `std` and libm's software FMA
/// without it.
#[inline]
pub fn two_prod_fma<T: MachineFloat>(a: T, b: T) -> (T, T) {
    let p = a * b;
    (p, a.mul_add(b, -p))
}

/// Exact product for the double-double kernels.
///
/// Hardware FMA with `std`, Dekker's split otherwise. The split form
/// requires `|a|, |b|` below `2^996` for f64.
#[cfg(feature = "std")]
#[inline]
pub(crate) fn exact_mul<T: MachineFloat>(a: T, b: T) -> (T, T) {
    two_prod_fma(a, b)
}

#[cfg(not(feature = "std"))]
#[inline]
pub(crate) fn exact_mul<T: MachineFloat>(a: T, b: T) -> (T, T) {
    two_prod(a, b)
}

/// Exact square: `p + e == a²`.
#[inline]
pub fn two_sqr<T: MachineFloat>(a: T) -> (T, T) {
    let p = a * a;
    let (hi, lo) = split(a);
    let err = ((hi * hi - p) + (hi + hi) * lo) + lo * lo;
    (p, err)
}
