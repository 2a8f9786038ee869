//! Shared constants used by several function modules.
//!
//! Module-specific tables remain in their respective files. Double-double
//! constants are `(hi, lo)` pairs with `hi` the value rounded to f64.

#![allow(clippy::excessive_precision)]
#![allow(clippy::approx_constant)]

/// π/2
pub(crate) const PI_BY_TWO: f64 = 1.57079632679489661923e+00;

/// π
pub(crate) const PI: f64 = 3.14159265358979323846e+00;

/// √2
pub(crate) const SQRT_2: f64 = 1.41421356237309504880e+00;

/// 2^(1/3)
pub(crate) const CBRT_2: f64 = 1.25992104989487316476e+00;

/// 2^(2/3)
pub(crate) const CBRT_4: f64 = 1.58740105196819947475e+00;

/// 1/√π
pub(crate) const RCPR_SQRT_PI: f64 = 5.64189583547756286948e-01;

/// 1/√(2π)
pub(crate) const RCPR_SQRT_TWO_PI: f64 = 3.98942280401432677940e-01;

/// High part of ln 2 with its low 21 bits clear, so `k·LN_2_HI` is exact
/// for every exponent `k` of a finite f64.
pub(crate) const LN_2_HI: f64 = 6.93147180369123816490e-01;

/// `ln 2 − LN_2_HI`.
pub(crate) const LN_2_LO: f64 = 1.90821492927058770002e-10;

/// 1/ln 2
pub(crate) const RCPR_LN_2: f64 = 1.44269504088896340736e+00;

/// ln 2 split for f32: high part has 16 significant bits.
pub(crate) const LN_2_HI_F32: f32 = 6.9314575195e-01;

/// `ln 2 − LN_2_HI_F32`.
pub(crate) const LN_2_LO_F32: f32 = 1.4286067653e-06;

// ── double-double constants ──

/// π/2 in double-double.
pub(crate) const DD_PI_BY_TWO: (f64, f64) = (1.57079632679489656e+00, 6.12323399573676604e-17);

/// ln 2 in double-double.
pub(crate) const DD_LN_2: (f64, f64) = (6.93147180559945286e-01, 2.31904681384629956e-17);

/// e in double-double.
pub(crate) const DD_E: (f64, f64) = (2.71828182845904509e+00, 1.44564689172925016e-16);

/// 1/e in double-double.
pub(crate) const DD_RCPR_E: (f64, f64) = (3.67879441171442334e-01, -1.24287536727883626e-17);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_recombine() {
        assert_eq!(LN_2_HI + LN_2_LO, core::f64::consts::LN_2);
        assert_eq!(LN_2_HI_F32 + LN_2_LO_F32, core::f32::consts::LN_2);
        // LN_2_HI has at most 32 significant bits.
        let scaled = LN_2_HI * 2.0_f64.powi(32);
        assert_eq!(scaled, scaled.trunc());
    }

    #[test]
    fn dd_constants_round_to_f64() {
        assert_eq!(DD_PI_BY_TWO.0, core::f64::consts::FRAC_PI_2);
        assert_eq!(DD_LN_2.0, core::f64::consts::LN_2);
        assert_eq!(DD_E.0, core::f64::consts::E);
        assert_eq!(DD_RCPR_E.0, 0.36787944117144233);
        for (hi, lo) in [DD_PI_BY_TWO, DD_LN_2, DD_E, DD_RCPR_E] {
            assert_eq!(hi + lo, hi);
        }
    }

    #[test]
    fn cube_roots_of_two() {
        assert!((CBRT_2 * CBRT_2 * CBRT_2 - 2.0).abs() < 1e-15);
        assert!((CBRT_4 - CBRT_2 * CBRT_2).abs() < 1e-15);
    }
}
