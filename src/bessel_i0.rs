//! Modified Bessel function of the first kind of order zero, `I0`.
//!
//! `|x| < 8` sums the Maclaurin series in `x²`. Above that `I0` grows like
//! `e^x/√x`, so the fits approximate `I0(x)·√x·e^(−x)` and the result is
//! rescaled by one rounded product with `e^x`. Only where `e^x` itself
//! overflows is the exponential applied in two halves,
//! `e^(x/2)·(… ·e^(x/2))`, which keeps every intermediate finite until
//! `I0` overflows.

#![allow(clippy::excessive_precision)]

use crate::algo::constants::RCPR_SQRT_TWO_PI;
use crate::exp::{exp_f32, exp_f64};
use crate::ieee754::Ieee754;
use crate::poly::horner;
use crate::sqrt::{sqrt_f32, sqrt_f64};

/// Maclaurin coefficients of I0 in `x²`.
#[rustfmt::skip]
const I0_TAYLOR: [f64; 21] = [
    1.00000000000000000e+00,  2.50000000000000000e-01,
    1.56250000000000000e-02,  4.34027777777777754e-04,
    6.78168402777777740e-06,  6.78168402777777777e-08,
    4.70950279706790135e-10,  2.40280754952443954e-12,
    9.38596699032984197e-15,  2.89690339207711179e-17,
    7.24225848019277894e-20,  1.49633439673404534e-22,
    2.59780277210771739e-25,  3.84290350903508478e-28,
    4.90166263907536350e-31,  5.44629182119484851e-34,
    5.31864435663559425e-37,  4.60090342269515038e-40,
    3.55007980146230734e-43,  2.45850401763317694e-46,
    1.53656501102073564e-49,
];

/// Maclaurin coefficients of I0 in `x²`.
#[rustfmt::skip]
const I0_TAYLOR_F32: [f32; 15] = [
    1.000000000e+00,  2.500000000e-01,  1.562500000e-02,
    4.340277810e-04,  6.781684078e-06,  6.781684192e-08,
    4.709502788e-10,  2.402807554e-12,  9.385967006e-15,
    2.896903303e-17,  7.242258361e-20,  1.496334337e-22,
    2.597802777e-25,  3.842903592e-28,  4.901662860e-31,
];

/// Chebyshev fit of `I0(x)·√x·e^(−x)` in `t = 16/x − 1` for `8 <= x < 64`.
#[rustfmt::skip]
const I0_SCALED: [f64; 21] = [
    4.0217650944500812912412062682554015864758708641122E-01,
    3.3605519836670235954708677573057674903333246992903E-03,
    1.3621607437904054799841758982479293811131516929561E-04,
    1.1143033854011811083558679211638434062764248318695E-05,
    1.4838480973971800609046361672889019897024382546250E-06,
    2.9735845331509646125662538478643653991903153361183E-07,
    8.8713600387547075477658297578709122469344322090695E-08,
    3.9340297511352998278016448937536069448254634984065E-08,
    2.1620199017859248534590406397671142859637435618941E-08,
    7.4722687049004145531137867656084079636040012667167E-09,
    -7.1010934904762743075955916676338088713004980913523E-09,
    -1.3122900132993169208905971014542520951427694412370E-08,
    -4.3057274269883615152914097212223008069764561812301E-09,
    6.9191599461531431879847335005129655312558821369738E-09,
    5.1919580836693996439994143159719873913638489213162E-09,
    -2.5947610525034173704628552617722105818086735464970E-09,
    -2.9337366286377845325039494204330159462216768587498E-09,
    6.7633829293190930605818684065514625993663001150591E-10,
    9.7357766250852428722851597292198387294250385367379E-10,
    -8.9797050228466493282562812742470450345111126838963E-11,
    -1.4824893214970785221533004978797389957959905477607E-10,
];

/// Chebyshev fit of `I0(x)·√x·e^(−x)` in `t = 16/x − 1` for `x >= 8`.
#[rustfmt::skip]
const I0_SCALED_F32: [f32; 5] = [
    4.0217651281544419447e-01,  3.3604423666931898204e-03,
    1.3615603206676122869e-04,  1.1565482083339025932e-05,
    1.6391348715752509935e-06,
];

/// `((2k − 1)!!)² / (k!·8^k)`, coefficients of the asymptotic series in `1/x`.
#[rustfmt::skip]
const I0_ASYM: [f64; 11] = [
    1.0,                       1.25e-01,
    7.03125e-02,               7.32421875e-02,
    1.12152099609375e-01,      2.27108001708984375e-01,
    5.7250142097473144531e-01, 1.7277275025844573975e+00,
    6.0740420012734830379e+00, 2.4380529699556063861e+01,
    1.1001714026924673817e+02,
];

struct I0Params<T: 'static> {
    taylor: &'static [T],
    scaled: &'static [T],
    /// Asymptotic series and the point where it takes over from `scaled`.
    asym: Option<(f64, &'static [T])>,
}

const PARAMS_F64: I0Params<f64> = I0Params {
    taylor: &I0_TAYLOR,
    scaled: &I0_SCALED,
    asym: Some((64.0, &I0_ASYM)),
};

const PARAMS_F32: I0Params<f32> = I0Params {
    taylor: &I0_TAYLOR_F32,
    scaled: &I0_SCALED_F32,
    asym: None,
};

/// `e^a·s` for a positive scale factor `s`.
#[inline]
fn grow<T: Ieee754>(a: T, s: T, exp: fn(T) -> T) -> T {
    let e = exp(a);
    if !e.is_inf_bits() {
        return e * s;
    }
    let h = exp(a * T::from_f64(0.5));
    h * (s * h)
}

fn bessel_i0_kernel<T: Ieee754>(
    x: T,
    params: &I0Params<T>,
    exp: fn(T) -> T,
    sqrt: fn(T) -> T,
) -> T {
    if x.is_nan_bits() {
        return x;
    }
    let a = x.abs();
    if a.is_inf_bits() {
        return a;
    }
    if a < T::from_f64(8.0) {
        return horner(a * a, params.taylor);
    }
    match params.asym {
        Some((start, coeffs)) if a >= T::from_f64(start) => {
            let r = a.recip();
            let s = horner(r, coeffs) * (T::from_f64(RCPR_SQRT_TWO_PI) / sqrt(a));
            grow(a, s, exp)
        }
        _ => {
            let t = T::from_f64(16.0) / a - T::one();
            grow(a, horner(t, params.scaled) / sqrt(a), exp)
        }
    }
}

/// `I0(x)`. Even; `I0(±inf) = +inf`, overflows to +inf past `|x| ≈ 91.9`.
pub fn bessel_i0_f32(x: f32) -> f32 {
    bessel_i0_kernel(x, &PARAMS_F32, exp_f32, sqrt_f32)
}

/// `I0(x)`. Even; `I0(±inf) = +inf`, overflows to +inf past `|x| ≈ 713.99`.
pub fn bessel_i0_f64(x: f64) -> f64 {
    bessel_i0_kernel(x, &PARAMS_F64, exp_f64, sqrt_f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() <= tol * b.abs()
    }

    // mpmath besseli(0, x)
    const REFERENCE: [(f64, f64); 11] = [
        (0.5, 1.063483370741323519),
        (1.0, 1.266065877752008336),
        (5.0, 27.23987182360444689),
        (7.9, 389.4062832821579984),
        (8.0, 427.5641157218047852),
        (10.0, 2815.716628466254471),
        (30.0, 781672297823.9774897),
        (63.0, 1.155209631701217254e26),
        (64.0, 3.115457918187897558e26),
        (100.0, 1.073751707131073824e42),
        (700.0, 1.529593347671873736e302),
    ];

    // ── special values ──

    #[test]
    fn special_values() {
        assert!(bessel_i0_f64(f64::NAN).is_nan());
        assert!(bessel_i0_f32(f32::NAN).is_nan());
        assert_eq!(bessel_i0_f64(f64::INFINITY), f64::INFINITY);
        assert_eq!(bessel_i0_f64(f64::NEG_INFINITY), f64::INFINITY);
        assert_eq!(bessel_i0_f32(f32::NEG_INFINITY), f32::INFINITY);
        assert_eq!(bessel_i0_f64(0.0), 1.0);
        assert_eq!(bessel_i0_f64(-0.0), 1.0);
        assert_eq!(bessel_i0_f64(1e-200), 1.0);
    }

    #[test]
    fn overflow_threshold() {
        assert!(bessel_i0_f64(713.9).is_finite());
        assert_eq!(bessel_i0_f64(714.1), f64::INFINITY);
        assert_eq!(bessel_i0_f64(-1e4), f64::INFINITY);
        assert!(bessel_i0_f32(91.8).is_finite());
        assert_eq!(bessel_i0_f32(92.0), f32::INFINITY);
    }

    // ── accuracy ──

    #[test]
    fn reference_values_f64() {
        for &(x, want) in &REFERENCE {
            let got = bessel_i0_f64(x);
            assert!(close(got, want, 8.0 * f64::EPSILON), "x = {x}: {got} vs {want}");
        }
    }

    #[test]
    fn scaled_region_accuracy() {
        // mpmath besseli(0, x) on [8, 64)
        let cases = [
            (8.5, 683.1619269901156093),
            (12.25, 24075.74003901682919),
            (16.0, 893446.2279201050171),
            (20.75, 90509510.91559715553),
            (24.5, 3538383451.217241485),
            (32.33546, 7778360986250.362018),
            (32.46, 8792932572939.871854),
            (40.0, 14894774793419899.92),
            (47.125, 1.704418819000342542e+19),
            (55.5, 6.809174168365375342e+22),
            (63.75, 2.43109282283061674e+26),
        ];
        for &(x, want) in &cases {
            let got = bessel_i0_f64(x);
            assert!(close(got, want, 4.0 * f64::EPSILON), "x = {x}: {got} vs {want}");
        }
    }

    #[test]
    fn split_exponential_near_overflow() {
        // e^x overflows past 709.78 while I0 stays finite up to 713.98
        let cases = [
            (709.5, 2.029763060075537101e+306),
            (709.9, 3.027197150068396149e+306),
            (712.0, 2.46841105776275243e+307),
        ];
        for &(x, want) in &cases {
            let got = bessel_i0_f64(x);
            assert!(close(got, want, 8.0 * f64::EPSILON), "x = {x}: {got} vs {want}");
        }
    }

    #[test]
    fn reference_values_f32() {
        let cases = [
            (1.0_f32, 1.266065877752008336_f64),
            (5.0, 27.23987182360444689),
            (8.0, 427.5641157218047852),
            (20.0, 43558282.55955353327),
            (50.0, 2.932553783849336327e20),
            (88.0, 7.034019697322303776e36),
        ];
        for &(x, want) in &cases {
            let got = bessel_i0_f32(x) as f64;
            assert!(close(got, want, 1e-6), "x = {x}: {got} vs {want}");
        }
    }

    #[test]
    fn region_boundaries_are_continuous() {
        for &b in &[8.0_f64, 64.0] {
            let below = bessel_i0_f64(b - 1e-12);
            let at = bessel_i0_f64(b);
            assert!(close(below, at, 1e-13), "b = {b}");
        }
    }

    #[test]
    fn even_bitwise() {
        for i in 0..=2000 {
            let x = i as f64 / 10.0;
            assert_eq!(bessel_i0_f64(-x).to_bits(), bessel_i0_f64(x).to_bits());
            let xf = (x / 3.0) as f32;
            assert_eq!(bessel_i0_f32(-xf).to_bits(), bessel_i0_f32(xf).to_bits());
        }
    }

    #[test]
    fn increasing() {
        let mut prev = bessel_i0_f64(0.0);
        for i in 1..=700 {
            let v = bessel_i0_f64(i as f64);
            assert!(v > prev, "x = {i}");
            prev = v;
        }
    }
}
