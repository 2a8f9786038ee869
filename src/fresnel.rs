//! Fresnel integrals.
//!
//! [`fresnel_sin_f64`] and [`fresnel_cos_f64`] integrate `sin(t²)` and
//! `cos(t²)` from 0 to `x`; the `normalized_` forms integrate `sin(πt²/2)`
//! and `cos(πt²/2)`. The two families are related by
//! `S(x) = √(π/2)·Sₙ(x·√(2/π))` and tend to `±√(π/8)` and `±1/2`.
//!
//! Regions are chosen on the normalized argument `u`:
//!
//! - `u < 1`: Maclaurin series in `u⁴`, shortened below `1/4`;
//! - `1 <= u < 2^17`: the auxiliary functions `f` and `g`, with
//!   `C = 1/2 + f·sin φ − g·cos φ` and `S = 1/2 − f·cos φ − g·sin φ`.
//!   They come from a Chebyshev fit in `u − 3/2` on `[1, 2)` and from
//!   rationals in `1/u` on `[2, 4)` and in `4/u` above;
//! - `2^17 <= u < 2^52`: `f = 1/(πu)` and `g = 0`;
//! - above that the limit.
//!
//! The phase `φ` is taken from the exact square `x² = hi + lo`. For the
//! normalized form both parts are reduced modulo 4 without error before
//! scaling by `π/2`; otherwise `sin` and `cos` of `hi` and `lo` are combined
//! with the angle-sum formulas.
//!
//! The f32 versions evaluate the f64 kernel and round once.

#![allow(clippy::excessive_precision)]

use crate::algo::constants::{PI, PI_BY_TWO};
use crate::compensated::exact_mul;
use crate::ieee754::Ieee754;
use crate::poly::{horner, rational};
#[cfg(not(feature = "std"))]
use num_traits::Float;

/// √(π/8)
const SQRT_PI_BY_EIGHT: f64 = 6.2665706865775012560e-01;

/// √(π/2)
const SQRT_PI_BY_TWO: f64 = 1.2533141373155002512e+00;

/// √(2/π)
const SQRT_TWO_BY_PI: f64 = 7.9788456080286535588e-01;

/// Series terms kept below [`MACLAURIN_END`].
const MACLAURIN_TERMS: usize = 6;
const MACLAURIN_END: f64 = 0.25;
const AUX_SMALL_START: f64 = 2.0;
const AUX_START: f64 = 4.0;
const ASYMPTOTIC_START: f64 = 131072.0;
const LIMIT_START: f64 = 4.503599627370496e+15;

/// `C(u) = u·Σ cₙ u⁴ⁿ` with `cₙ = (−1)ⁿ(π/2)²ⁿ / ((2n)!(4n+1))`.
#[rustfmt::skip]
const NORMALIZED_COS_TAYLOR: [f64; 12] = [
    1.0000000000000000000e+00, -2.4674011002723396547e-01,
    2.8185500877894223737e-02, -1.6048831356425354518e-03,
    5.4074133814083916485e-05, -1.2000972558600288324e-06,
    1.8843499115272686015e-08, -2.2022769254454662900e-10,
    1.9896857924180219279e-12, -1.4309189731715199357e-14,
    8.3847297051185536591e-17, -4.0799814492338781250e-19,
];

/// `S(u) = u³·Σ sₙ u⁴ⁿ` with `sₙ = (−1)ⁿ(π/2)²ⁿ⁺¹ / ((2n+1)!(4n+3))`.
#[rustfmt::skip]
const NORMALIZED_SIN_TAYLOR: [f64; 12] = [
    5.2359877559829887308e-01, -9.2280585358035179094e-02,
    7.2447842041970041019e-03, -3.1211694235457920671e-04,
    8.4442728835452537828e-06, -1.5647144500922110176e-07,
    2.1082121933214543747e-09, -2.1574306805843442685e-11,
    1.7334102088874844763e-13, -1.1223244787983954557e-15,
    5.9800532392104043399e-18, -2.6678713628413992880e-20,
];

/// `cₙ = (−1)ⁿ / ((2n)!(4n+1))`.
#[rustfmt::skip]
const COS_TAYLOR: [f64; 12] = [
    1.0000000000000000000e+00, -1.0000000000000000000e-01,
    4.6296296296296296296e-03, -1.0683760683760683761e-04,
    1.4589169000933706816e-06, -1.3122532963802805073e-08,
    8.3507027951472395917e-11, -3.9554295164585257634e-13,
    1.4483264643598137265e-15, -4.2214072888070882330e-18,
    1.0025164934907719167e-20, -1.9770647538779051748e-23,
];

/// `sₙ = (−1)ⁿ / ((2n+1)!(4n+3))`.
#[rustfmt::skip]
const SIN_TAYLOR: [f64; 12] = [
    3.3333333333333333333e-01, -2.3809523809523809524e-02,
    7.5757575757575757576e-04, -1.3227513227513227513e-05,
    1.4503852223150468765e-07, -1.0892221037148573380e-09,
    5.9477940136376350368e-12, -2.4668270102644569277e-14,
    8.0327350124157736091e-17, -2.1078551914421358249e-19,
    4.5518467589282002862e-22, -8.2301492992142213568e-25,
];

/// `f(u)` on `[1, 2)` in powers of `u − 3/2`.
#[rustfmt::skip]
const AUX_F_NEAR: [f64; 18] = [
     2.0341843122601395513e-01, -1.1785589151490044444e-01,
     5.8292318418381550356e-02, -2.2350397275458474797e-02,
     4.6668670331757740968e-03,  1.6810246236650158065e-03,
    -2.6099372810357777582e-03,  1.7947429387382644343e-03,
    -8.8749766883781049493e-04,  3.3306373706076392918e-04,
    -8.6379799121003709287e-05,  5.9984039895114897393e-06,
     9.0774899697895077469e-06, -6.6994743903302883706e-06,
     2.9635885494477090410e-06, -9.3119436820092713289e-07,
     1.5531781943952074371e-07,  1.6863146331832407072e-08,
];

/// `g(u)` on `[1, 2)` in powers of `u − 3/2`.
#[rustfmt::skip]
const AUX_G_NEAR: [f64; 18] = [
     2.5009796942798095144e-02, -4.1413226283390937629e-02,
     4.1837522348087259404e-02, -3.1853041336544106308e-02,
     1.9451738369017119579e-02, -9.6447502210244582039e-03,
     3.7638395138921898243e-03, -1.0025635832231455899e-03,
     3.2270936018360525180e-05,  1.6179079453413249030e-04,
    -1.2186364720291556950e-04,  5.8117613099283326830e-05,
    -2.0254404343909866951e-05,  4.7408672790154552165e-06,
    -2.3468810669240251484e-07, -4.7448635566031005811e-07,
     3.4311399189676166022e-07, -1.2502805585531839321e-07,
];

/// `f(u) = P(1/u)/Q(1/u)` on `[2, 4)`.
#[rustfmt::skip]
const AUX_F_SMALL_P: [f64; 8] = [
     2.5703724299657391880e-07,  3.1830090055989159443e-01,
    -5.8364360938790173767e-01,  2.1270894621813623233e+00,
    -1.3707938560959418038e+00,  2.5885155851674980285e+00,
     1.1096318379407176911e-01,  1.5677269150255168623e-01,
];

#[rustfmt::skip]
const AUX_F_SMALL_Q: [f64; 7] = [
     1.0000000000000000000e+00, -1.8340061067984813713e+00,
     6.6862881102108010107e+00, -4.3270587876109819201e+00,
     8.4987835739785486838e+00, -2.6581276744363058730e-01,
     2.2005566252691005977e+00,
];

/// `g(u) = P(1/u)/Q(1/u)` on `[2, 4)`.
#[rustfmt::skip]
const AUX_G_SMALL_P: [f64; 8] = [
    -1.5037922851806219734e-07,  5.8825135283577460507e-06,
    -1.0404950252132407674e-04,  1.0241463717486993400e-01,
    -1.8819547496642853896e-01,  8.3903448432340481802e-01,
    -6.1254499526256925705e-01,  1.5116321008288957217e+00,
];

#[rustfmt::skip]
const AUX_G_SMALL_Q: [f64; 8] = [
     1.0000000000000000000e+00, -1.7830899368808261166e+00,
     7.9327411271741694325e+00, -4.9327126910218758143e+00,
     1.4055732441050503327e+01,  7.8731074657517163897e-01,
     7.0782106464978070018e+00,  2.6225196697592760185e+00,
];

/// `f(u) = P(4/u)/Q(4/u)` on `[4, 2^17)`.
#[rustfmt::skip]
const AUX_F_P: [f64; 9] = [
    -2.1447177918579579753e-17,  7.9577471545956793464e-02,
    -1.2981161608641168980e-02,  3.1265770142568086318e-03,
     7.7189914096390976786e-03,  1.2152711327644207051e-03,
    -4.2580086843249039237e-04,  2.5599751814229062969e-04,
    -9.2991030649511374604e-06,
];

#[rustfmt::skip]
const AUX_F_Q: [f64; 7] = [
     1.0000000000000000000e+00, -1.6312608777091934007e-01,
     3.9289725286653476886e-02,  9.6999710172863227181e-02,
     1.6458875720410357910e-02, -5.5442943302851907020e-03,
     3.2629747328741893876e-03,
];

/// `g(u) = P(4/u)/Q(4/u)` on `[4, 2^17)`.
#[rustfmt::skip]
const AUX_G_P: [f64; 9] = [
     4.1888470497242228971e-18, -1.9399304561569123981e-15,
     1.5079232893754790306e-13,  1.5831434897680803461e-03,
    -8.5860131430356321612e-04,  4.2520325383513231021e-04,
     3.3997508002435750700e-05, -5.5470926830268577614e-06,
     7.5271268828364550735e-06,
];

#[rustfmt::skip]
const AUX_G_Q: [f64; 7] = [
     1.0000000000000000000e+00, -5.4233958725410615801e-01,
     2.6858208718351641067e-01,  2.1471758208227504686e-02,
     2.4456357033936610542e-03,  1.4961320031496760787e-03,
     1.6780659196575798229e-03,
];

#[derive(Clone, Copy)]
enum Integrand {
    Sin,
    Cos,
}

/// Phase of the integrand: `t²` or `πt²/2`.
#[derive(Clone, Copy)]
enum Phase {
    Square,
    HalfPiSquare,
}

/// `v mod 4` in `[−2, 2]`, exact for every finite `v`.
fn reduce_mod_4(v: f64) -> f64 {
    v - 4.0 * (v * 0.25).round()
}

/// `(sin φ, cos φ)` of the phase at `a >= 0`.
fn phase_sin_cos(a: f64, phase: Phase) -> (f64, f64) {
    let (hi, lo) = exact_mul(a, a);
    match phase {
        Phase::HalfPiSquare => {
            let r = reduce_mod_4(hi) + reduce_mod_4(lo);
            (r * PI_BY_TWO).sin_cos()
        }
        Phase::Square => {
            let (sh, ch) = hi.sin_cos();
            let (sl, cl) = lo.sin_cos();
            (sh * cl + ch * sl, ch * cl - sh * sl)
        }
    }
}

/// Auxiliary functions `(f(u), g(u))` for `1 <= u`.
fn auxiliary(u: f64) -> (f64, f64) {
    if u < AUX_SMALL_START {
        let z = u - 1.5;
        return (horner(z, &AUX_F_NEAR), horner(z, &AUX_G_NEAR));
    }
    if u < AUX_START {
        let t = u.recip();
        return (
            rational(t, &AUX_F_SMALL_P, &AUX_F_SMALL_Q),
            rational(t, &AUX_G_SMALL_P, &AUX_G_SMALL_Q),
        );
    }
    if u < ASYMPTOTIC_START {
        let t = 4.0 / u;
        return (rational(t, &AUX_F_P, &AUX_F_Q), rational(t, &AUX_G_P, &AUX_G_Q));
    }
    ((PI * u).recip(), 0.0)
}

fn taylor(a: f64, integrand: Integrand, phase: Phase, terms: usize) -> f64 {
    let table: &[f64] = match (integrand, phase) {
        (Integrand::Cos, Phase::HalfPiSquare) => &NORMALIZED_COS_TAYLOR,
        (Integrand::Sin, Phase::HalfPiSquare) => &NORMALIZED_SIN_TAYLOR,
        (Integrand::Cos, Phase::Square) => &COS_TAYLOR,
        (Integrand::Sin, Phase::Square) => &SIN_TAYLOR,
    };
    let a2 = a * a;
    let p = horner(a2 * a2, &table[..terms]);
    match integrand {
        Integrand::Cos => a * p,
        Integrand::Sin => (a2 * a) * p,
    }
}

fn fresnel_kernel(x: f64, integrand: Integrand, phase: Phase) -> f64 {
    if x.is_nan_bits() {
        return x;
    }
    let scale = match phase {
        Phase::Square => SQRT_PI_BY_TWO,
        Phase::HalfPiSquare => 1.0,
    };
    let a = x.abs();
    let out = if a.is_inf_bits() {
        match phase {
            Phase::Square => SQRT_PI_BY_EIGHT,
            Phase::HalfPiSquare => 0.5,
        }
    } else {
        let u = match phase {
            Phase::Square => a * SQRT_TWO_BY_PI,
            Phase::HalfPiSquare => a,
        };
        if u < 1.0 {
            let terms = if u < MACLAURIN_END {
                MACLAURIN_TERMS
            } else {
                NORMALIZED_COS_TAYLOR.len()
            };
            taylor(a, integrand, phase, terms)
        } else if u < LIMIT_START {
            let (s, c) = phase_sin_cos(a, phase);
            let (f, g) = auxiliary(u);
            let n = match integrand {
                Integrand::Cos => 0.5 + (f * s - g * c),
                Integrand::Sin => 0.5 - (f * c + g * s),
            };
            scale * n
        } else {
            scale * 0.5
        }
    };
    if x.sign_bit() { -out } else { out }
}

/// `∫₀ˣ sin(t²) dt`. Odd; tends to `±√(π/8)`.
pub fn fresnel_sin_f64(x: f64) -> f64 {
    fresnel_kernel(x, Integrand::Sin, Phase::Square)
}

/// `∫₀ˣ cos(t²) dt`. Odd; tends to `±√(π/8)`.
pub fn fresnel_cos_f64(x: f64) -> f64 {
    fresnel_kernel(x, Integrand::Cos, Phase::Square)
}

/// `∫₀ˣ sin(t²) dt`, through [`fresnel_sin_f64`].
pub fn fresnel_sin_f32(x: f32) -> f32 {
    fresnel_sin_f64(f64::from(x)) as f32
}

/// `∫₀ˣ cos(t²) dt`, through [`fresnel_cos_f64`].
pub fn fresnel_cos_f32(x: f32) -> f32 {
    fresnel_cos_f64(f64::from(x)) as f32
}

/// `∫₀ˣ sin(πt²/2) dt`. Odd; tends to `±1/2`.
pub fn normalized_fresnel_sin_f64(x: f64) -> f64 {
    fresnel_kernel(x, Integrand::Sin, Phase::HalfPiSquare)
}

/// `∫₀ˣ cos(πt²/2) dt`. Odd; tends to `±1/2`.
pub fn normalized_fresnel_cos_f64(x: f64) -> f64 {
    fresnel_kernel(x, Integrand::Cos, Phase::HalfPiSquare)
}

pub fn normalized_fresnel_sin_f32(x: f32) -> f32 {
    normalized_fresnel_sin_f64(f64::from(x)) as f32
}

pub fn normalized_fresnel_cos_f32(x: f32) -> f32 {
    normalized_fresnel_cos_f64(f64::from(x)) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rel(a: f64, b: f64) -> f64 {
        if a == b { 0.0 } else { ((a - b) / b).abs() }
    }

    // mpmath: x, C(x), S(x), ∫cos(t²), ∫sin(t²)
    #[rustfmt::skip]
    const REFERENCE: [(f64, f64, f64, f64, f64); 8] = [
        (0.1, 0.099997532627085073601, 0.00052358954761221068668, 0.099999000004629624497, 0.00033333095238852818081),
        (0.5, 0.49234422587144639288, 0.064732432859999277611, 0.49688402921479471475, 0.041481024268547481599),
        (1.0, 0.77989340037682282947, 0.43825914739035476608, 0.90452423790027208147, 0.31026830172338110181),
        (1.5, 0.44526117603982153506, 0.69750496008209301308, 0.89918485288747861246, 0.77823780430680859961),
        (2.5, 0.45741300964177704525, 0.61918175581959293611, 0.60530783911486795371, 0.43051774376752813455),
        (3.75, 0.49359046264602496047, 0.58453320215047270472, 0.7587872525009296307, 0.61210292814234795654),
        (10.0, 0.49989869420551572361, 0.4681699785848822404, 0.60112518481344434813, 0.58367089992962334216),
        (1000.5, 0.50012175095081008272, 0.49970606693895421723, 0.62703774084813719479, 0.62633328034597732942),
    ];

    // ── special values ──

    #[test]
    fn special_values() {
        assert!(fresnel_sin_f64(f64::NAN).is_nan());
        assert!(normalized_fresnel_cos_f64(f64::NAN).is_nan());
        assert!(fresnel_cos_f32(f32::NAN).is_nan());
        assert_eq!(fresnel_sin_f64(0.0).to_bits(), 0);
        assert_eq!(fresnel_cos_f64(-0.0).to_bits(), (-0.0_f64).to_bits());
        assert_eq!(normalized_fresnel_sin_f64(-0.0).to_bits(), (-0.0_f64).to_bits());
        assert_eq!(normalized_fresnel_cos_f64(f64::INFINITY), 0.5);
        assert_eq!(normalized_fresnel_sin_f64(f64::NEG_INFINITY), -0.5);
        assert_eq!(fresnel_cos_f64(f64::INFINITY), SQRT_PI_BY_EIGHT);
        assert_eq!(fresnel_sin_f64(f64::NEG_INFINITY), -SQRT_PI_BY_EIGHT);
        assert_eq!(normalized_fresnel_cos_f32(f32::INFINITY), 0.5);
        assert_eq!(fresnel_sin_f32(f32::INFINITY), SQRT_PI_BY_EIGHT as f32);
    }

    #[test]
    fn tiny_arguments() {
        assert_eq!(normalized_fresnel_cos_f64(1e-10), 1e-10);
        assert_eq!(fresnel_cos_f64(-1e-300), -1e-300);
        assert!(rel(fresnel_sin_f64(1e-5), 1e-15 / 3.0) <= 4.0 * f64::EPSILON);
        assert_eq!(fresnel_sin_f64(1e-200), 0.0);
        assert_eq!(normalized_fresnel_sin_f32(1e-30), 0.0);
    }

    // ── accuracy ──

    #[test]
    fn matches_reference_f64() {
        for &(x, c, s, pc, ps) in &REFERENCE {
            assert!(rel(normalized_fresnel_cos_f64(x), c) <= 2.0 * f64::EPSILON, "x = {x}");
            assert!(rel(normalized_fresnel_sin_f64(x), s) <= 2.0 * f64::EPSILON, "x = {x}");
            assert!(rel(fresnel_cos_f64(x), pc) <= 2.0 * f64::EPSILON, "x = {x}");
            assert!(rel(fresnel_sin_f64(x), ps) <= 2.0 * f64::EPSILON, "x = {x}");
        }
    }

    #[test]
    fn matches_reference_f32() {
        for &(x, c, s, pc, ps) in &REFERENCE {
            let xf = x as f32;
            assert_eq!(f64::from(xf), x);
            let tol = f64::from(f32::EPSILON);
            assert!(rel(f64::from(normalized_fresnel_cos_f32(xf)), c) <= tol, "x = {x}");
            assert!(rel(f64::from(normalized_fresnel_sin_f32(xf)), s) <= tol, "x = {x}");
            assert!(rel(f64::from(fresnel_cos_f32(xf)), pc) <= tol, "x = {x}");
            assert!(rel(f64::from(fresnel_sin_f32(xf)), ps) <= tol, "x = {x}");
        }
    }

    #[test]
    fn odd() {
        for &x in &[0.2, 0.9, 1.7, 3.1, 77.25, 2e5, 1e17] {
            assert_eq!(fresnel_sin_f64(-x), -fresnel_sin_f64(x));
            assert_eq!(fresnel_cos_f64(-x), -fresnel_cos_f64(x));
            assert_eq!(normalized_fresnel_sin_f64(-x), -normalized_fresnel_sin_f64(x));
            assert_eq!(normalized_fresnel_cos_f64(-x), -normalized_fresnel_cos_f64(x));
        }
    }

    #[test]
    fn normalized_and_plain_agree() {
        let mut x = 0.05_f64;
        while x < 40.0 {
            let u = x * SQRT_TWO_BY_PI;
            // u carries one rounding, which moves the phase by about 2x²ε.
            let tol = 8.0 * f64::EPSILON * (1.0 + x * x);
            let c = SQRT_PI_BY_TWO * normalized_fresnel_cos_f64(u);
            let s = SQRT_PI_BY_TWO * normalized_fresnel_sin_f64(u);
            assert!((fresnel_cos_f64(x) - c).abs() <= tol * c.abs(), "x = {x}");
            assert!((fresnel_sin_f64(x) - s).abs() <= tol * s.abs(), "x = {x}");
            x += 0.0371;
        }
    }

    // ── regions ──

    #[test]
    fn region_boundaries_are_continuous() {
        let bounds = [MACLAURIN_END, 1.0, AUX_SMALL_START, AUX_START, ASYMPTOTIC_START];
        let fns: [fn(f64) -> f64; 4] =
            [normalized_fresnel_cos_f64, normalized_fresnel_sin_f64, fresnel_cos_f64, fresnel_sin_f64];
        for (i, f) in fns.iter().enumerate() {
            let scale = if i < 2 { 1.0 } else { SQRT_PI_BY_TWO };
            for &b in &bounds {
                let at = b * scale;
                let below = f64::from_bits(at.to_bits() - 1);
                let (lo, hi) = (f(below), f(at));
                // |f'| <= 1 across one ulp of the argument
                let slack = 4.0 * f64::EPSILON * hi.abs() + (at - below);
                assert!((hi - lo).abs() <= slack, "fn {i} at {at}: {lo} vs {hi}");
            }
        }
    }

    #[test]
    fn asymptotic_tail() {
        // mpmath at x = 2^17 + 0.5 and x = 10^12
        let x = 131072.5_f64;
        assert!(rel(normalized_fresnel_cos_f64(x), 0.5000009293476495459) <= 2.0 * f64::EPSILON);
        assert!(rel(normalized_fresnel_sin_f64(x), 0.49999775635630018914) <= 2.0 * f64::EPSILON);
        let big = 1e12_f64;
        assert!((normalized_fresnel_cos_f64(big) - 0.5).abs() <= 1.0 / (PI * big));
        assert!((fresnel_sin_f64(big) - SQRT_PI_BY_EIGHT).abs() <= 1.0 / big);
        assert_eq!(normalized_fresnel_sin_f64(1e16), 0.5);
        assert_eq!(fresnel_cos_f64(-1e300), -SQRT_PI_BY_EIGHT);
    }

    #[test]
    fn phase_reduction_is_exact() {
        // (2^26 + 1)² = 2^52 + 2^27 + 1, so πx²/2 ≡ π/2 (mod 2π)
        let (s, c) = phase_sin_cos(67108865.0, Phase::HalfPiSquare);
        assert!((s - 1.0).abs() <= f64::EPSILON);
        assert!(c.abs() <= 1e-15);
        assert_eq!(reduce_mod_4(1e300), 0.0);
        assert_eq!(reduce_mod_4(7.5), -0.5);
        assert_eq!(reduce_mod_4(-1.25), -1.25);
    }
}
