//! Polynomial and rational approximant evaluation.
//!
//! Coefficients are stored in ascending order throughout the crate:
//! `coeffs[i]` multiplies `z^i`, so `[c0, c1, c2]` is `c0 + c1·z + c2·z²`.

use crate::machine::MachineFloat;
use crate::types::Error;

/// Evaluate `c0 + z(c1 + z(c2 + …))` by Horner's rule.
///
/// An empty slice evaluates to zero.
#[inline]
pub fn horner<T: MachineFloat>(z: T, coeffs: &[T]) -> T {
    let mut acc = T::zero();
    for &c in coeffs.iter().rev() {
        acc = acc * z + c;
    }
    acc
}

/// Horner evaluation with one fused multiply-add per coefficient.
///
/// Identical to [`horner`] except for rounding when the `std` feature
/// provides hardware FMA.
#[inline]
pub fn horner_fma<T: MachineFloat>(z: T, coeffs: &[T]) -> T {
    let mut acc = T::zero();
    for &c in coeffs.iter().rev() {
        acc = acc.fma(z, c);
    }
    acc
}

/// Horner evaluation of f64 coefficients in the precision `T`.
///
/// Lets one f64 table serve both native precisions.
#[inline]
pub(crate) fn horner_f64<T: MachineFloat>(z: T, coeffs: &[f64]) -> T {
    let mut acc = T::zero();
    for &c in coeffs.iter().rev() {
        acc = acc * z + T::from_f64(c);
    }
    acc
}

/// Rational approximant `P(z)/Q(z)`.
#[inline]
pub fn rational<T: MachineFloat>(z: T, p: &[T], q: &[T]) -> T {
    horner(z, p) / horner(z, q)
}

/// Evaluate `p(z)` together with its derivatives.
///
/// Writes `p(z), p'(z), p''(z), …` into `out`, filling as many slots as
/// `out` holds; derivatives above the degree are zero.
///
/// # Errors
///
/// [`Error::InvalidArgument`] when `coeffs` or `out` is empty.
pub fn eval_with_derivatives<T: MachineFloat>(
    coeffs: &[T],
    z: T,
    out: &mut [T],
) -> Result<(), Error> {
    if coeffs.is_empty() || out.is_empty() {
        return Err(Error::InvalidArgument);
    }
    let nd = out.len() - 1;
    let nc = coeffs.len() - 1;

    for slot in out.iter_mut() {
        *slot = T::zero();
    }
    out[0] = coeffs[nc];
    // Synthetic division from the top coefficient down; out[j] accumulates
    // p^(j)(z) / j!.
    for i in (0..nc).rev() {
        let top = nd.min(nc - i);
        for j in (1..=top).rev() {
            out[j] = out[j] * z + out[j - 1];
        }
        out[0] = out[0] * z + coeffs[i];
    }
    let mut fact = T::one();
    for (j, slot) in out.iter_mut().enumerate().skip(2) {
        fact = fact * T::from_f64(j as f64);
        *slot = *slot * fact;
    }
    Ok(())
}

/// Allocate and return `p(z)` and its first `n` derivatives.
///
/// # Errors
///
/// [`Error::InvalidArgument`] when `coeffs` is empty or `n + 1` overflows.
#[cfg(feature = "alloc")]
pub fn derivatives<T: MachineFloat>(
    coeffs: &[T],
    z: T,
    n: usize,
) -> Result<alloc::vec::Vec<T>, Error> {
    if coeffs.is_empty() {
        return Err(Error::InvalidArgument);
    }
    let len = n.checked_add(1).ok_or(Error::InvalidArgument)?;
    let mut out = alloc::vec![T::zero(); len];
    eval_with_derivatives(coeffs, z, &mut out)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── horner tests ──

    #[test]
    fn horner_ascending_order() {
        // 1 + 2z + 3z² at z = 2 → 17
        assert_eq!(horner(2.0_f64, &[1.0, 2.0, 3.0]), 17.0);
        assert_eq!(horner(2.0_f32, &[1.0, 2.0, 3.0]), 17.0);
        assert_eq!(horner_fma(2.0_f64, &[1.0, 2.0, 3.0]), 17.0);
        assert_eq!(horner_f64(2.0_f32, &[1.0, 2.0, 3.0]), 17.0);
    }

    #[test]
    fn horner_empty_is_zero() {
        assert_eq!(horner::<f64>(3.0, &[]), 0.0);
        assert_eq!(horner_fma::<f32>(3.0, &[]), 0.0);
    }

    #[test]
    fn rational_basic() {
        // (1 + z) / (1 - z) at z = 0.5 → 3
        let r = rational(0.5_f64, &[1.0, 1.0], &[1.0, -1.0]);
        assert!((r - 3.0).abs() < 1e-15);
    }

    // ── derivative tests ──

    #[test]
    fn derivatives_of_cubic() {
        // p = 1 + 2z + 3z² + 4z³ at z = 2
        // p = 49, p' = 2 + 6z + 12z² = 62, p'' = 6 + 24z = 54, p''' = 24
        let c = [1.0_f64, 2.0, 3.0, 4.0];
        let mut out = [0.0; 5];
        eval_with_derivatives(&c, 2.0, &mut out).unwrap();
        assert_eq!(out, [49.0, 62.0, 54.0, 24.0, 0.0]);
    }

    #[test]
    fn derivatives_partial_output() {
        let c = [1.0_f64, 2.0, 3.0, 4.0];
        let mut out = [0.0; 2];
        eval_with_derivatives(&c, 2.0, &mut out).unwrap();
        assert_eq!(out, [49.0, 62.0]);
    }

    #[test]
    fn derivatives_constant() {
        let mut out = [9.0_f32; 3];
        eval_with_derivatives(&[5.0_f32], 1.5, &mut out).unwrap();
        assert_eq!(out, [5.0, 0.0, 0.0]);
    }

    #[test]
    fn derivatives_reject_empty() {
        let mut out = [0.0_f64; 3];
        assert_eq!(
            eval_with_derivatives(&[], 1.0, &mut out),
            Err(Error::InvalidArgument)
        );
        let mut none: [f64; 0] = [];
        assert_eq!(
            eval_with_derivatives(&[1.0], 1.0, &mut none),
            Err(Error::InvalidArgument)
        );
    }

    #[cfg(feature = "alloc")]
    #[test]
    fn derivatives_vec() {
        let d = derivatives(&[0.0_f64, 0.0, 1.0], 3.0, 2).unwrap();
        assert_eq!(d, alloc::vec![9.0, 6.0, 2.0]);
        assert!(derivatives::<f64>(&[], 3.0, 2).is_err());
    }

    #[cfg(feature = "alloc")]
    #[test]
    fn derivatives_reject_overflowing_count() {
        assert_eq!(derivatives(&[1.0_f64, 2.0], 0.5, usize::MAX), Err(Error::InvalidArgument));
    }
}
