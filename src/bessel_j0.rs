//! Bessel function of the first kind of order zero, `J0`.
//!
//! Small arguments use the Maclaurin series in `x²`. Between 2 and 16 the
//! line is cut into five pieces, each a Taylor expansion about the zero of
//! `J0` it contains, so the relative error stays small next to the zeros.
//! The zero is stored as a two-part `(hi, lo)` value and the shift
//! `(x − hi) − lo` is exact because `x` lies within a factor of two of
//! `hi`. Beyond 16 the Hankel expansion takes over.

#![allow(clippy::excessive_precision)]

use crate::algo::constants::RCPR_SQRT_PI;
use crate::ieee754::Ieee754;
use crate::poly::horner;
use crate::sqrt::{sqrt_f32, sqrt_f64};

/// Taylor expansion about a zero of `J0`, used for `|x| < end`.
struct ZeroPiece<T: 'static> {
    end: f64,
    hi: T,
    lo: T,
    coeffs: &'static [T],
}

struct J0Params<T: 'static> {
    taylor: &'static [T],
    zeros: &'static [ZeroPiece<T>],
    /// Terms of each Hankel series.
    hankel_terms: usize,
}

/// Maclaurin coefficients of J0 in `x²`.
#[rustfmt::skip]
const J0_TAYLOR: [f64; 13] = [
    1.00000000000000000e+00,  -2.50000000000000000e-01,
    1.56250000000000000e-02,  -4.34027777777777754e-04,
    6.78168402777777740e-06,  -6.78168402777777777e-08,
    4.70950279706790135e-10,  -2.40280754952443954e-12,
    9.38596699032984197e-15,  -2.89690339207711179e-17,
    7.24225848019277894e-20,  -1.49633439673404534e-22,
    2.59780277210771739e-25,
];

/// Maclaurin coefficients of J0 in `x²`.
#[rustfmt::skip]
const J0_TAYLOR_F32: [f32; 8] = [
    1.000000000e+00,  -2.500000000e-01,  1.562500000e-02,  -4.340277810e-04,
    6.781684078e-06,  -6.781684192e-08,  4.709502788e-10,  -2.402807554e-12,
];

/// Hankel coefficients `(−1)^⌊k/2⌋·a_k(0)`, even k for `P` and odd k for `Q`.
#[rustfmt::skip]
const J0_ASYM: [f64; 32] = [
    1.00000000000000000e+00,  1.25000000000000000e-01,
    -7.03125000000000000e-02,  -7.32421875000000000e-02,
    1.12152099609375000e-01,  2.27108001708984375e-01,
    -5.72501420974731445e-01,  -1.72772750258445740e+00,
    6.07404200127348304e+00,  2.43805296995560639e+01,
    -1.10017140269246738e+02,  -5.51335896122020586e+02,
    3.03809051092238406e+03,  1.82577554742931752e+04,
    -1.18838426256783248e+05,  -8.32859304016289301e+05,
    6.25295149343479704e+06,  5.00695895319889262e+07,
    -4.25939216504766881e+08,  -3.83625518023043346e+09,
    3.64684008070655594e+10,  3.64901081884983337e+11,
    -3.83353466139394434e+12,  -4.21897157028409688e+13,
    4.85401468685290062e+14,  5.82724463156690700e+15,
    -7.28685734937765600e+16,  -9.47628809926011008e+17,
    1.27972194197597471e+19,  1.79216232305169891e+20,
    -2.59938210272623513e+21,  -3.90012129203400013e+22,
];

/// Taylor coefficients of J0 about its first zero.
#[rustfmt::skip]
const J0_ZERO1: [f64; 24] = [
    0.00000000000000000e+00,  -5.19147497289466742e-01,
    1.07938701754920097e-01,  5.66017744379462284e-02,
    -8.65766959330491366e-03,  -2.19420035901615610e-03,
    2.64377036752698154e-04,  4.37291927290666478e-05,
    -4.33882628861580686e-06,  -5.30491438347594061e-07,
    4.47005586348552529e-08,  4.32656516789668285e-09,
    -3.16661262458767538e-10,  -2.53389329973797417e-11,
    1.63871429136458423e-12,  1.11697984055893487e-13,
    -6.46951884736167173e-15,  -3.83927250120210925e-16,
    2.01325264088324914e-17,  1.05764240247105987e-18,
    -5.06622491780184185e-20,  -2.38713702942038492e-21,
    1.05234747461553436e-22,  4.49465152287070551e-24,
];

/// Taylor coefficients of J0 about its second zero.
#[rustfmt::skip]
const J0_ZERO2: [f64; 24] = [
    0.00000000000000000e+00,  3.40264806558368160e-01,
    -3.08206514255936481e-02,  -5.29885528676046283e-02,
    4.63104214590764462e-03,  2.25744022903290016e-03,
    -1.75185728994157775e-04,  -4.65210907397432312e-05,
    3.19978690682750586e-06,  5.71649070792750604e-07,
    -3.51153598994674290e-08,  -4.68339624336787370e-09,
    2.59220920424841900e-10,  2.74525338261323724e-11,
    -1.38057620186643913e-12,  -1.20916263367596511e-13,
    5.56643233101784473e-15,  4.14953596291379661e-16,
    -1.76020925112965293e-17,  -1.14093362914826704e-18,
    4.48546138574702390e-20,  2.56996437576990934e-21,
    -9.41159405815818922e-23,  -4.82926327548702509e-24,
];

/// Taylor coefficients of J0 about its third zero.
#[rustfmt::skip]
const J0_ZERO3: [f64; 24] = [
    0.00000000000000000e+00,  -2.71452299928381935e-01,
    1.56841249609538831e-02,  4.40337749634118480e-02,
    -2.50930222721069615e-03,  -2.06033515512592941e-03,
    1.12434867893677445e-04,  4.48230354452420251e-05,
    -2.28839100890422416e-06,  -5.67937951550572283e-07,
    2.69415703984991364e-08,  4.73680719776243202e-09,
    -2.08668818060905817e-10,  -2.80628288136312765e-11,
    1.15022146015401820e-12,  1.24401930846138112e-13,
    -4.75773239095959059e-15,  -4.28573554557231387e-16,
    1.53426446127808623e-17,  1.18107313778138578e-18,
    -3.97044948170915523e-20,  -2.66373839470302268e-21,
    8.43485514591973732e-23,  5.00847988172122761e-24,
];

/// Taylor coefficients of J0 about its fourth zero.
#[rustfmt::skip]
const J0_ZERO4: [f64; 24] = [
    0.00000000000000000e+00,  2.32459831364724784e-01,
    -9.85706451382579139e-03,  -3.81860091116230926e-02,
    1.60739729208968251e-03,  1.84204333886897630e-03,
    -7.58135848099653742e-05,  -4.15928454230836625e-05,
    1.65064634888706363e-06,  5.42545174259435248e-07,
    -2.05580321433169504e-08,  -4.61986541935776370e-09,
    1.66316857309284242e-10,  2.77707419016631047e-11,
    -9.48026433009297962e-13,  -1.24368213792006849e-13,
    4.02506016582508140e-15,  4.31548106723298032e-16,
    -1.32505676589599643e-17,  -1.19534924375523816e-18,
    3.48638825250824914e-20,  2.70573784717399359e-21,
    -7.50740038602618457e-23,  -5.10060871219194179e-24,
];

/// Taylor coefficients of J0 about its fifth zero.
#[rustfmt::skip]
const J0_ZERO5: [f64; 24] = [
    0.00000000000000000e+00,  -2.06546433077996028e-01,
    6.91673603426869350e-03,  3.41155726973474335e-02,
    -1.13727625295984209e-03,  -1.66800572554821913e-03,
    5.48417921919477273e-05,  3.83796585068176980e-05,
    -1.23358103494137395e-06,  -5.10625873698160844e-07,
    1.59248484699110687e-08,  4.42352952675941707e-09,
    -1.33135274405351604e-10,  -2.69620898980741468e-11,
    7.80479282185109620e-13,  1.22063775916751485e-13,
    -3.39215910234215056e-15,  -4.27116772857345821e-16,
    1.13859935579924857e-17,  1.19073588188132531e-18,
    -3.04458694929119799e-20,  -2.70873300454314421e-21,
    6.64532566326367554e-23,  5.12589483528564638e-24,
];

/// Taylor coefficients of J0 about its first zero.
#[rustfmt::skip]
const J0_ZERO1_F32: [f32; 14] = [
    0.000000000e+00,  -5.191475153e-01,  1.079386994e-01,
    5.660177395e-02,  -8.657669649e-03,  -2.194200410e-03,
    2.643770422e-04,  4.372919284e-05,  -4.338826329e-06,
    -5.304914339e-07,  4.470055970e-08,  4.326565328e-09,
    -3.166612528e-10,  -2.533893234e-11,
];

/// Taylor coefficients of J0 about its second zero.
#[rustfmt::skip]
const J0_ZERO2_F32: [f32; 14] = [
    0.000000000e+00,  3.402647972e-01,  -3.082065098e-02,
    -5.298855156e-02,  4.631042015e-03,  2.257440239e-03,
    -1.751857344e-04,  -4.652109055e-05,  3.199786988e-06,
    5.716490818e-07,  -3.511535951e-08,  -4.683396337e-09,
    2.592209225e-10,  2.745253330e-11,
];

/// Taylor coefficients of J0 about its third zero.
#[rustfmt::skip]
const J0_ZERO3_F32: [f32; 14] = [
    0.000000000e+00,  -2.714523077e-01,  1.568412408e-02,
    4.403377324e-02,  -2.509302227e-03,  -2.060335129e-03,
    1.124348710e-04,  4.482303484e-05,  -2.288390988e-06,
    -5.679379456e-07,  2.694157075e-08,  4.736807391e-09,
    -2.086688183e-10,  -2.806282810e-11,
];

/// Taylor coefficients of J0 about its fourth zero.
#[rustfmt::skip]
const J0_ZERO4_F32: [f32; 14] = [
    0.000000000e+00,  2.324598283e-01,  -9.857064113e-03,
    -3.818600997e-02,  1.607397338e-03,  1.842043363e-03,
    -7.581358659e-05,  -4.159284435e-05,  1.650646368e-06,
    5.425451945e-07,  -2.055803172e-08,  -4.619865379e-09,
    1.663168631e-10,  2.777074230e-11,
];

/// Taylor coefficients of J0 about its fifth zero.
#[rustfmt::skip]
const J0_ZERO5_F32: [f32; 14] = [
    0.000000000e+00,  -2.065464258e-01,  6.916736253e-03,
    3.411557153e-02,  -1.137276297e-03,  -1.668005716e-03,
    5.484179201e-05,  3.837965778e-05,  -1.233581088e-06,
    -5.106258527e-07,  1.592484900e-08,  4.423529543e-09,
    -1.331352806e-10,  -2.696209055e-11,
];

#[rustfmt::skip]
const ZEROS: [ZeroPiece<f64>; 5] = [
    ZeroPiece { end: 4.0, hi: 2.40482555769577289e+00, lo: -1.17669165153089404e-16, coeffs: &J0_ZERO1 },
    ZeroPiece { end: 7.0, hi: 5.52007811028631057e+00, lo: 8.08859714614672233e-17, coeffs: &J0_ZERO2 },
    ZeroPiece { end: 10.0, hi: 8.65372791291101251e+00, lo: -2.92812607320778980e-16, coeffs: &J0_ZERO3 },
    ZeroPiece { end: 13.0, hi: 1.17915344390142813e+01, lo: 2.81295691277873505e-16, coeffs: &J0_ZERO4 },
    ZeroPiece { end: 16.0, hi: 1.49309177084877867e+01, lo: -7.07051450598307369e-16, coeffs: &J0_ZERO5 },
];

#[rustfmt::skip]
const ZEROS_F32: [ZeroPiece<f32>; 5] = [
    ZeroPiece { end: 4.0, hi: 2.404825449e+00, lo: 1.087059047e-07, coeffs: &J0_ZERO1_F32 },
    ZeroPiece { end: 7.0, hi: 5.520078182e+00, lo: -7.193414575e-08, coeffs: &J0_ZERO2_F32 },
    ZeroPiece { end: 10.0, hi: 8.653727531e+00, lo: 3.814779177e-07, coeffs: &J0_ZERO3_F32 },
    ZeroPiece { end: 13.0, hi: 1.179153442e+01, lo: 1.518615633e-08, coeffs: &J0_ZERO4_F32 },
    ZeroPiece { end: 16.0, hi: 1.493091774e+01, lo: -3.138037741e-08, coeffs: &J0_ZERO5_F32 },
];

const PARAMS_F64: J0Params<f64> = J0Params {
    taylor: &J0_TAYLOR,
    zeros: &ZEROS,
    hankel_terms: 16,
};

const PARAMS_F32: J0Params<f32> = J0Params {
    taylor: &J0_TAYLOR_F32,
    zeros: &ZEROS_F32,
    hankel_terms: 6,
};

/// Where the Hankel expansion starts.
const HANKEL_START: f64 = 16.0;

/// `P(z)` and `Q(z)` from the interleaved coefficients, `z = 1/x²`.
fn hankel_pq<T: Ieee754>(z: T, terms: usize) -> (T, T) {
    let mut p = T::zero();
    let mut q = T::zero();
    for pair in J0_ASYM.chunks_exact(2).take(terms).rev() {
        p = p * z + T::from_f64(pair[0]);
        q = q * z + T::from_f64(pair[1]);
    }
    (p, q)
}

fn hankel<T: Ieee754>(a: T, terms: usize, sqrt: fn(T) -> T) -> T {
    let r = a.recip();
    let (p, q) = hankel_pq(r * r, terms);
    let (s, c) = a.sin_cos();
    let amp = T::from_f64(RCPR_SQRT_PI) / sqrt(a);
    amp * ((c + s) * p + (s - c) * (q * r))
}

fn bessel_j0_kernel<T: Ieee754>(x: T, params: &J0Params<T>, sqrt: fn(T) -> T) -> T {
    if x.is_nan_bits() {
        return x;
    }
    let a = x.abs();
    if a.is_inf_bits() {
        return T::zero();
    }
    if a < T::from_f64(2.0) {
        return horner(a * a, params.taylor);
    }
    if a >= T::from_f64(HANKEL_START) {
        return hankel(a, params.hankel_terms, sqrt);
    }
    params
        .zeros
        .iter()
        .find(|p| a < T::from_f64(p.end))
        .map_or_else(T::nan, |p| horner((a - p.hi) - p.lo, p.coeffs))
}

/// `J0(x)`. Even; `J0(±inf) = 0`.
pub fn bessel_j0_f32(x: f32) -> f32 {
    bessel_j0_kernel(x, &PARAMS_F32, sqrt_f32)
}

/// `J0(x)`. Even; `J0(±inf) = 0`.
pub fn bessel_j0_f64(x: f64) -> f64 {
    bessel_j0_kernel(x, &PARAMS_F64, sqrt_f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    // mpmath besselj(0, x)
    const REFERENCE: [(f64, f64); 10] = [
        (0.5, 0.93846980724081290423),
        (1.0, 0.76519768655796655145),
        (1.9, 0.28181855937438552233),
        (3.0, -0.26005195490193343762),
        (5.0, -0.17759677131433830435),
        (8.0, 0.17165080713755390609),
        (11.0, -0.17119030040719608991),
        (15.0, -0.014224472826780773234),
        (20.0, 0.16702466434058315473),
        (100.0, 0.019985850304223122424),
    ];

    // ── special values ──

    #[test]
    fn special_values() {
        assert!(bessel_j0_f64(f64::NAN).is_nan());
        assert!(bessel_j0_f32(f32::NAN).is_nan());
        assert_eq!(bessel_j0_f64(f64::INFINITY), 0.0);
        assert_eq!(bessel_j0_f64(f64::NEG_INFINITY), 0.0);
        assert_eq!(bessel_j0_f32(f32::INFINITY), 0.0);
        assert_eq!(bessel_j0_f64(0.0), 1.0);
        assert_eq!(bessel_j0_f64(-0.0), 1.0);
        assert_eq!(bessel_j0_f64(1e-200), 1.0);
    }

    // ── accuracy ──

    #[test]
    fn reference_values_f64() {
        for &(x, want) in &REFERENCE {
            let got = bessel_j0_f64(x);
            assert!((got - want).abs() <= 1e-15, "x = {x}: {got} vs {want}");
        }
    }

    #[test]
    fn reference_values_f32() {
        for &(x, want) in &REFERENCE {
            let got = bessel_j0_f32(x as f32) as f64;
            assert!((got - want).abs() <= 2e-6, "x = {x}: {got} vs {want}");
        }
    }

    #[test]
    fn first_zero() {
        assert!(bessel_j0_f64(2.4048255576957728).abs() < 1e-15);
        assert!(bessel_j0_f32(2.4048255).abs() < 1e-6);
    }

    #[test]
    fn relative_accuracy_near_zeros() {
        // J0'(j) = −J1(j), so J0(j + h) ≈ −J1(j)·h
        let j = 5.520078110286311;
        let h = 1e-9;
        let slope = 0.3402648065583682;
        let got = bessel_j0_f64(j + h);
        let want = slope * ((j + h) - j);
        assert!(((got - want) / want).abs() < 1e-6, "{got} vs {want}");
    }

    #[test]
    fn region_boundaries_are_continuous() {
        for &b in &[2.0_f64, 4.0, 7.0, 10.0, 13.0, 16.0] {
            let below = bessel_j0_f64(b - 1e-13);
            let at = bessel_j0_f64(b);
            assert!((below - at).abs() < 1e-14, "b = {b}");
        }
    }

    #[test]
    fn even_bitwise() {
        for i in 0..=3000 {
            let x = i as f64 / 100.0;
            assert_eq!(bessel_j0_f64(-x).to_bits(), bessel_j0_f64(x).to_bits());
            let xf = x as f32;
            assert_eq!(bessel_j0_f32(-xf).to_bits(), bessel_j0_f32(xf).to_bits());
        }
    }

    #[test]
    fn bounded() {
        for i in 0..=5000 {
            let x = i as f64 / 50.0;
            assert!(bessel_j0_f64(x).abs() <= 1.0);
        }
    }
}
