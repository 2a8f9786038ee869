//! Error function `erf(x) = (2/√π)∫₀ˣ e^(−t²) dt`.
//!
//! Every fit is evaluated on `|x|` and the sign is restored afterwards, so
//! `erf(−x)` and `−erf(x)` agree bit for bit. Below one the fit is in `x²`
//! and multiplied back by `x`; above one each piece is a polynomial in the
//! offset from its center. Past the last piece `erf` rounds to one.

#![allow(clippy::excessive_precision)]

use crate::ieee754::Ieee754;
use crate::poly::horner;

/// A polynomial fit in `|x| − center`, used for `|x| < end`.
struct Piece<T: 'static> {
    end: f64,
    center: f64,
    coeffs: &'static [T],
}

struct ErfParams<T: 'static> {
    small: &'static [T],
    pieces: &'static [Piece<T>],
}

/// Chebyshev fit of `erf(x)/x` in `x²` on `[0, 1]`.
#[rustfmt::skip]
const ERF_SMALL: [f64; 13] = [
    1.12837916709551256e+00,
    -3.76126389031837483e-01,
    1.12837916709548791e-01,
    -2.68661706450767923e-02,
    5.22397762481801448e-03,
    -8.54832698083379003e-04,
    1.20553311116427105e-04,
    -1.49255952668311818e-05,
    1.64610004841213676e-06,
    -1.63503127010546952e-07,
    1.46597752740474363e-08,
    -1.13728488567916737e-09,
    5.95717614774891131e-11,
];

/// Chebyshev fit of `erf` in `x − 3/2` on `[1, 2]`.
#[rustfmt::skip]
const ERF_NEAR_THREE_HALVES: [f64; 17] = [
    9.66105146475310761e-01,
    1.18930289223630498e-01,
    -1.78395433835443651e-01,
    1.38752004094016557e-01,
    -4.45988584589381010e-02,
    -1.48662861407379918e-02,
    1.93261720031580458e-02,
    -4.74305350937434013e-03,
    -2.36267772937703846e-03,
    1.70982368356973518e-03,
    -9.29128385171325131e-05,
    -2.54479927042439993e-04,
    7.76790368642019032e-05,
    1.80932498834581106e-05,
    -1.40449549683177902e-05,
    2.69940420554685437e-07,
    1.42343774465235059e-06,
];

/// `erf` in `x − 3` on `[2, 4]`.
#[rustfmt::skip]
const ERF_NEAR_THREE: [f64; 22] = [
    9.9997790950300142278863355722471061050296451720368E-01,
    1.3925305194477978730091759557886507181169650303288E-04,
    -4.1775915584207907505222445864222490037050981433966E-04,
    7.8910062784410584553246307831070049442409725578151E-04,
    -1.0443978895327628690880939985809113179018372962513E-03,
    1.0165472760251672627243542892882602250136363898749E-03,
    -7.3804117629715295141754417612504429566347271247447E-04,
    3.9057168717017588025084699611985071354171021176972E-04,
    -1.3477705374397264294968082173818833018477350223250E-04,
    1.3906709036090407091477497759100032047956244447314E-05,
    1.5616203922585888663540870481575411491315014701930E-05,
    -1.0793030925416155155118496283437255220094175737574E-05,
    3.0307961131322541818630402774496836693087589462673E-06,
    1.2215287848578559299889106663173461753007805591752E-07,
    -4.5267407595312274124698016023302783433887188558728E-07,
    1.6738764602973046014420230239829010634044316939035E-07,
    -9.2100271357752928721700846567656218283477300552198E-09,
    -1.6356949876238991597057015261353570360825712700624E-08,
    5.8849980272257660299305851500710617296276568007381E-09,
    2.7722504490166683723484100155202778056570970412414E-10,
    -4.2766869676693656764337765033494236327562251157342E-10,
    -9.3585224180218124838580975657053993780830761255308E-17,
];

/// `erf` in `x − 5` on `[4, 6]`.
#[rustfmt::skip]
const ERF_NEAR_FIVE: [f64; 18] = [
    9.9999999999846253878003766209229860153027413505968E-01,
    1.5669414601047508105034356488856799019723219194232E-11,
    -7.8354120572362028855259218050569644495176661941769E-11,
    2.5602789237298586068228569174150574163643806687536E-10,
    -6.1378118432240642108701556179142980815344222593979E-10,
    1.1497675468731696554242475220206601206941271508726E-09,
    -1.7542063096402679204007895889148974890443044386928E-09,
    2.2384442509863376661386954823407723418439390834336E-09,
    -2.4145584534091353910479795903445084586094588093661E-09,
    2.2269869488637954043246869826785887322129003452326E-09,
    -1.8180869221228204197072724793592631382302212363175E-09,
    1.3273056965393187548377885707715818863521483014437E-09,
    -7.9840602204922956108616064844948911059243536529766E-10,
    3.8510168290197499805134022322023742472984779136291E-10,
    -1.9964116110595372426997271310974766471990044036930E-10,
    1.0932541980472673355111017027104272274202791021403E-10,
    -3.0057327905735070477046851950492000985362338758821E-11,
    -8.4988789396205286436910679623143481902548138695499E-17,
];


/// Chebyshev fit of `erf(x)/x` in `x²` on `[0, 1]`.
#[rustfmt::skip]
const ERF_SMALL_F32: [f32; 7] = [
    1.128379107e+00,  -3.761262596e-01,  1.128359437e-01,
    -2.685421146e-02,  5.189087242e-03,  -8.016864303e-04,
    7.875874871e-05,
];

/// `erf` in `x − 3/2` on `[1, 2]`.
#[rustfmt::skip]
const ERF_NEAR_THREE_HALVES_F32: [f32; 10] = [
    9.661051631e-01,  1.189302877e-01,  -1.783954203e-01,
    1.387521029e-01,  -4.459946975e-02,  -1.486926060e-02,
    1.933355816e-02,  -4.709593952e-03,  -2.402188256e-03,
    1.555390772e-03,
];

/// `erf` in `x − 2.96` on `[2, 3.92]`.
#[rustfmt::skip]
const ERF_NEAR_THREE_F32: [f32; 11] = [
    9.999716282e-01,  1.766665227e-04,  -5.231463001e-04,
    9.750995087e-04,  -1.266560866e-03,  1.197178266e-03,
    -8.519800031e-04,  4.598474770e-04,  -1.426187082e-04,
    -2.186813072e-05,  2.580761247e-05,
];

const PIECES_F64: [Piece<f64>; 3] = [
    Piece { end: 2.0, center: 1.5, coeffs: &ERF_NEAR_THREE_HALVES },
    Piece { end: 4.0, center: 3.0, coeffs: &ERF_NEAR_THREE },
    Piece { end: 6.0, center: 5.0, coeffs: &ERF_NEAR_FIVE },
];

const PIECES_F32: [Piece<f32>; 2] = [
    Piece { end: 2.0, center: 1.5, coeffs: &ERF_NEAR_THREE_HALVES_F32 },
    Piece { end: 3.92, center: 2.96, coeffs: &ERF_NEAR_THREE_F32 },
];

const PARAMS_F64: ErfParams<f64> = ErfParams {
    small: &ERF_SMALL,
    pieces: &PIECES_F64,
};

const PARAMS_F32: ErfParams<f32> = ErfParams {
    small: &ERF_SMALL_F32,
    pieces: &PIECES_F32,
};

fn erf_kernel<T: Ieee754>(x: T, params: &ErfParams<T>) -> T {
    if x.is_nan_bits() {
        return x;
    }
    let a = x.abs();
    let out = if a.is_inf_bits() {
        T::one()
    } else if a < T::one() {
        a * horner(a * a, params.small)
    } else {
        params
            .pieces
            .iter()
            .find(|p| a < T::from_f64(p.end))
            .map_or(T::one(), |p| horner(a - T::from_f64(p.center), p.coeffs))
    };
    if x.sign_bit() { -out } else { out }
}

/// Error function. Odd; `erf(±inf) = ±1`.
pub fn erf_f32(x: f32) -> f32 {
    erf_kernel(x, &PARAMS_F32)
}

/// Error function. Odd; `erf(±inf) = ±1`.
pub fn erf_f64(x: f64) -> f64 {
    erf_kernel(x, &PARAMS_F64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() <= tol * b.abs().max(1e-300)
    }

    // ── special values ──

    #[test]
    fn special_values() {
        assert!(erf_f64(f64::NAN).is_nan());
        assert!(erf_f32(f32::NAN).is_nan());
        assert_eq!(erf_f64(f64::INFINITY), 1.0);
        assert_eq!(erf_f64(f64::NEG_INFINITY), -1.0);
        assert_eq!(erf_f32(f32::NEG_INFINITY), -1.0);
        assert_eq!(erf_f64(0.0).to_bits(), 0);
        assert_eq!(erf_f64(-0.0).to_bits(), (-0.0_f64).to_bits());
        assert_eq!(erf_f64(6.0), 1.0);
        assert_eq!(erf_f64(-30.0), -1.0);
        assert_eq!(erf_f32(3.92), 1.0);
    }

    #[test]
    fn tiny_arguments() {
        // erf(x) ≈ 2x/√π
        let x = 1e-300;
        assert!(close(erf_f64(x), 1.1283791670955126e-300, f64::EPSILON));
        let s = 5e-324;
        assert!(erf_f64(s) > 0.0);
    }

    // ── accuracy ──

    #[test]
    fn reference_values_f64() {
        let cases = [
            (0.125, 0.14031620480133381),
            (0.5, 0.5204998778130465),
            (1.0, 0.8427007929497149),
            (1.5, 0.9661051464753108),
            (2.0, 0.9953222650189527),
            (2.5, 0.9995930479825550),
            (3.0, 0.9999779095030014),
            (4.0, 0.9999999845827421),
            (5.0, 0.9999999999984626),
        ];
        for &(x, want) in &cases {
            assert!(close(erf_f64(x), want, 4.0 * f64::EPSILON), "x = {x}");
        }
    }

    #[test]
    fn reference_values_f32() {
        let cases = [
            (0.5_f32, 0.5204999_f32),
            (1.0, 0.8427008),
            (1.5, 0.9661051),
            (2.5, 0.999593),
            (3.5, 0.99999925),
        ];
        for &(x, want) in &cases {
            let got = erf_f32(x);
            assert!((got - want).abs() <= 4.0 * f32::EPSILON * want, "x = {x}: {got}");
        }
    }

    #[test]
    fn region_boundaries_are_continuous() {
        for &b in &[1.0_f64, 2.0, 4.0] {
            let below = erf_f64(b - 1e-12);
            let at = erf_f64(b);
            assert!(close(below, at, 1e-11), "b = {b}");
        }
        assert!((erf_f64(6.0 - 1e-9) - 1.0).abs() <= f64::EPSILON);
        assert!((erf_f32(3.9199) - 1.0).abs() <= f32::EPSILON);
    }

    #[test]
    fn odd_bitwise() {
        for i in 1..=700 {
            let x = i as f64 / 100.0;
            assert_eq!(erf_f64(-x).to_bits(), (-erf_f64(x)).to_bits());
            let xf = x as f32;
            assert_eq!(erf_f32(-xf).to_bits(), (-erf_f32(xf)).to_bits());
        }
    }

    #[test]
    fn bounded_by_one() {
        for i in 0..=1000 {
            let x = i as f64 / 100.0;
            assert!(erf_f64(x) <= 1.0);
            assert!(erf_f32(x as f32) <= 1.0);
        }
    }
}
