//! Exponential function.
//!
//! `x = k·ln 2 + r` with `|r| <= ln 2 / 2`, then `r = j/128 + t` with
//! `e^(j/128)` read from a table and `e^t` from a minimax polynomial on
//! `|t| < 1/128`. The result is `e^t · e^(j/128) · 2^k`, scaled with
//! [`ldexp`] so that the subnormal range rounds once. f32 uses a finer
//! 256-step table and a quadratic.
//!
//! `cosh` reuses the same kernel on `|x|`: a Maclaurin series below 1, then
//! `(e^|x| + e^−|x|)/2`, dropping the second term once it is below half an
//! ulp. Between the exp overflow threshold and the cosh one the result is
//! `(e^(|x|/2)/2)·e^(|x|/2)`.

#![allow(clippy::excessive_precision)]

use crate::algo::constants::{
    DD_LN_2, LN_2_HI, LN_2_HI_F32, LN_2_LO, LN_2_LO_F32, RCPR_LN_2,
};
use crate::double_double::DoubleDouble;
use crate::ieee754::{Ieee754, ldexp};
use crate::poly::{horner, horner_f64};

/// Largest argument whose exponential is finite.
const MAX_ARG_F64: f64 = 709.782712893384;
/// Below this the exponential rounds to zero.
const MIN_ARG_F64: f64 = -745.1332191019412;
const MAX_ARG_F32: f32 = 88.72284;
const MIN_ARG_F32: f32 = -103.97208;
/// Largest argument whose hyperbolic cosine is finite.
const COSH_MAX_ARG_F64: f64 = 710.4758600739439;

/// Minimax fit of `e^t` on `|t| < 1/128`.
#[rustfmt::skip]
const EXP_SMALL: [f64; 6] = [
    1.0000000000000000098676804486032581931971677454305E+00,
    1.0000000000000000077001514598996570259345221024298E+00,
    4.9999999999708980614478940658809472988077097967424E-01,
    1.6666666666585521370389353791249722847045340843435E-01,
    4.1666793819163332764129161759693899954112387250407E-02,
    8.3333564677959633974492787478109645751141070623399E-03,
];

/// `e^t ≈ 1 + t + t²/2` on `|t| < 1/256`.
const EXP_SMALL_F32: [f32; 3] = [1.0, 1.0, 0.5];

/// exp(j/128) for j = -45, -44, ..., 45.
#[rustfmt::skip]
const EXP_J128: [f64; 91] = [
    7.03587874345627529e-01,  7.09106182437398425e-01,
    7.14667771155948151e-01,  7.20272979955439818e-01,
    7.25922150952408196e-01,  7.31615628946641783e-01,
    7.37353761442226863e-01,  7.43136898668758317e-01,
    7.48965393602715634e-01,  7.54839601989007347e-01,
    7.60759882362683659e-01,  7.66726596070820055e-01,
    7.72740107294572542e-01,  7.78800783071404878e-01,
    7.84908993317491754e-01,  7.91065110850295961e-01,
    7.97269511411324405e-01,  8.03522573689060771e-01,
    8.09824679342079246e-01,  8.16176213022339780e-01,
    8.22577562398664641e-01,  8.29029118180400371e-01,
    8.35531274141265046e-01,  8.42084427143382386e-01,
    8.48688977161503932e-01,  8.55345327307422520e-01,
    8.62053883854575709e-01,  8.68815056262843166e-01,
    8.75629257203538236e-01,  8.82496902584595455e-01,
    8.89418411575955581e-01,  8.96394206635150459e-01,
    9.03424713533086732e-01,  9.10510361380034161e-01,
    9.17651582651815789e-01,  9.24848813216204824e-01,
    9.32102492359527579e-01,  9.39413062813475808e-01,
    9.46780970782128861e-01,  9.54206665969188350e-01,
    9.61690601605425299e-01,  9.69233234476344130e-01,
    9.76835024950062025e-01,  9.84496437005408453e-01,
    9.92217938260243515e-01,  1.00000000000000000e+00,
    1.00784309720644805e+00,  1.01574770858668573e+00,
    1.02371431660235790e+00,  1.03174340749910276e+00,
    1.03983547133623011e+00,  1.04799100201663276e+00,
    1.05621049731693195e+00,  1.06449445891785932e+00,
    1.07284339243487747e+00,  1.08125780744903954e+00,
    1.08973821753809319e+00,  1.09828514030782576e+00,
    1.10689909742365744e+00,  1.11558061464248071e+00,
    1.12433022184475062e+00,  1.13314845306682632e+00,
    1.14203584653356560e+00,  1.15099294469117641e+00,
    1.16002029424032505e+00,  1.16911844616950433e+00,
    1.17828795578866319e+00,  1.18752938276310060e+00,
    1.19684329114762478e+00,  1.20623024942098067e+00,
    1.21569083052054738e+00,  1.22522561187730750e+00,
    1.23483517545109089e+00,  1.24452010776609523e+00,
    1.25428099994668374e+00,  1.26411844775346638e+00,
    1.27403305161966096e+00,  1.28402541668774139e+00,
    1.29409615284637325e+00,  1.30424587476763776e+00,
    1.31447520194454914e+00,  1.32478475872886547e+00,
    1.33517517436919686e+00,  1.34564708304941050e+00,
    1.35620112392734016e+00,  1.36683794117379631e+00,
    1.37755818401188357e+00,  1.38836250675662676e+00,
    1.39925156885490676e+00,  1.41022603492571075e+00,
    1.42128657480069664e+00,
];
/// exp(j/256) for j = -89, -88, ..., 89.
#[rustfmt::skip]
const EXP_J256: [f32; 179] = [
    7.063416243e-01,  7.091062069e-01,  7.118815184e-01,  7.146677971e-01,
    7.174649239e-01,  7.202729583e-01,  7.230920196e-01,  7.259221673e-01,
    7.287633419e-01,  7.316156030e-01,  7.344790697e-01,  7.373537421e-01,
    7.402396798e-01,  7.431368828e-01,  7.460454702e-01,  7.489653826e-01,
    7.518967390e-01,  7.548395991e-01,  7.577939630e-01,  7.607598901e-01,
    7.637374401e-01,  7.667266130e-01,  7.697274685e-01,  7.727401257e-01,
    7.757645249e-01,  7.788007855e-01,  7.818489075e-01,  7.849090099e-01,
    7.879810333e-01,  7.910650969e-01,  7.941612601e-01,  7.972695231e-01,
    8.003899455e-01,  8.035225868e-01,  8.066674471e-01,  8.098247051e-01,
    8.129942417e-01,  8.161762357e-01,  8.193706274e-01,  8.225775361e-01,
    8.257970214e-01,  8.290291429e-01,  8.322738409e-01,  8.355312943e-01,
    8.388014436e-01,  8.420844078e-01,  8.453802466e-01,  8.486889601e-01,
    8.520106673e-01,  8.553453088e-01,  8.586930633e-01,  8.620538712e-01,
    8.654278517e-01,  8.688150644e-01,  8.722155094e-01,  8.756292462e-01,
    8.790563941e-01,  8.824968934e-01,  8.859509230e-01,  8.894184232e-01,
    8.928995132e-01,  8.963941932e-01,  8.999025822e-01,  9.034247398e-01,
    9.069606066e-01,  9.105103612e-01,  9.140740037e-01,  9.176515937e-01,
    9.212431908e-01,  9.248487949e-01,  9.284685850e-01,  9.321025014e-01,
    9.357506633e-01,  9.394130707e-01,  9.430898428e-01,  9.467809796e-01,
    9.504865408e-01,  9.542066455e-01,  9.579413533e-01,  9.616906047e-01,
    9.654545784e-01,  9.692332149e-01,  9.730266929e-01,  9.768350124e-01,
    9.806582332e-01,  9.844964147e-01,  9.883496761e-01,  9.922179580e-01,
    9.961013794e-01,  1.000000000e+00,  1.003913879e+00,  1.007843137e+00,
    1.011787653e+00,  1.015747666e+00,  1.019723177e+00,  1.023714304e+00,
    1.027721047e+00,  1.031743407e+00,  1.035781503e+00,  1.039835453e+00,
    1.043905258e+00,  1.047991037e+00,  1.052092671e+00,  1.056210518e+00,
    1.060344338e+00,  1.064494491e+00,  1.068660736e+00,  1.072843432e+00,
    1.077042341e+00,  1.081257820e+00,  1.085489750e+00,  1.089738250e+00,
    1.094003320e+00,  1.098285198e+00,  1.102583766e+00,  1.106899142e+00,
    1.111231327e+00,  1.115580559e+00,  1.119946837e+00,  1.124330163e+00,
    1.128730774e+00,  1.133148432e+00,  1.137583494e+00,  1.142035842e+00,
    1.146505594e+00,  1.150992990e+00,  1.155497789e+00,  1.160020351e+00,
    1.164560437e+00,  1.169118404e+00,  1.173694253e+00,  1.178287983e+00,
    1.182899594e+00,  1.187529325e+00,  1.192177296e+00,  1.196843266e+00,
    1.201527596e+00,  1.206230283e+00,  1.210951328e+00,  1.215690851e+00,
    1.220448852e+00,  1.225225568e+00,  1.230021000e+00,  1.234835148e+00,
    1.239668131e+00,  1.244520068e+00,  1.249391079e+00,  1.254281044e+00,
    1.259190083e+00,  1.264118433e+00,  1.269066095e+00,  1.274033070e+00,
    1.279019475e+00,  1.284025431e+00,  1.289050937e+00,  1.294096112e+00,
    1.299161077e+00,  1.304245830e+00,  1.309350491e+00,  1.314475179e+00,
    1.319619894e+00,  1.324784756e+00,  1.329969764e+00,  1.335175157e+00,
    1.340400934e+00,  1.345647097e+00,  1.350913763e+00,  1.356201172e+00,
    1.361509204e+00,  1.366837978e+00,  1.372187614e+00,  1.377558231e+00,
    1.382949829e+00,  1.388362527e+00,  1.393796444e+00,  1.399251580e+00,
    1.404728055e+00,  1.410225987e+00,  1.415745497e+00,
];

/// Reduction constants of one precision.
struct ExpParams<T: 'static> {
    table: &'static [T],
    steps: T,
    poly: &'static [T],
    ln2_hi: T,
    ln2_lo: T,
    max_arg: T,
    min_arg: T,
}

const PARAMS_F64: ExpParams<f64> = ExpParams {
    table: &EXP_J128,
    steps: 128.0,
    poly: &EXP_SMALL,
    ln2_hi: LN_2_HI,
    ln2_lo: LN_2_LO,
    max_arg: MAX_ARG_F64,
    min_arg: MIN_ARG_F64,
};

const PARAMS_F32: ExpParams<f32> = ExpParams {
    table: &EXP_J256,
    steps: 256.0,
    poly: &EXP_SMALL_F32,
    ln2_hi: LN_2_HI_F32,
    ln2_lo: LN_2_LO_F32,
    max_arg: MAX_ARG_F32,
    min_arg: MIN_ARG_F32,
};

fn exp_kernel<T: Ieee754>(x: T, p: &ExpParams<T>) -> T {
    if x.is_nan_bits() {
        return x;
    }
    if x > p.max_arg {
        return T::infinity();
    }
    if x < p.min_arg {
        return T::zero();
    }
    let kf = (x * T::from_f64(RCPR_LN_2)).round();
    let r = (x - kf * p.ln2_hi) - kf * p.ln2_lo;
    let jf = (r * p.steps).trunc();
    let t = r - jf / p.steps;
    let offset = (p.table.len() / 2) as i32;
    let j = jf.to_f64() as i32 + offset;
    let e = horner(t, p.poly) * p.table[j as usize];
    ldexp(e, kf.to_f64() as i32)
}

/// Exponential. `exp(-inf) = 0`, `exp(+inf) = +inf`.
pub fn exp_f32(x: f32) -> f32 {
    exp_kernel(x, &PARAMS_F32)
}

/// Exponential. `exp(-inf) = 0`, `exp(+inf) = +inf`.
pub fn exp_f64(x: f64) -> f64 {
    exp_kernel(x, &PARAMS_F64)
}

/// `1/(2n)!`, the Maclaurin coefficients of `cosh` in `x²`.
#[rustfmt::skip]
const COSH_TAYLOR: [f64; 11] = [
    1.0000000000000000000e+00, 5.0000000000000000000e-01,
    4.1666666666666666667e-02, 1.3888888888888888889e-03,
    2.4801587301587301587e-05, 2.7557319223985890653e-07,
    2.0876756987868098979e-09, 1.1470745597729724714e-11,
    4.7794773323873852974e-14, 1.5619206968586226462e-16,
    4.1103176233121648585e-19,
];

struct CoshParams<T: 'static> {
    exp: &'static ExpParams<T>,
    taylor_terms: usize,
    maclaurin_end: T,
    maclaurin_terms: usize,
    /// `e^−2|x|` is below half an ulp from here on.
    one_sided: T,
}

const COSH_PARAMS_F64: CoshParams<f64> = CoshParams {
    exp: &PARAMS_F64,
    taylor_terms: 11,
    maclaurin_end: 0.03125,
    maclaurin_terms: 5,
    one_sided: 20.0,
};

const COSH_PARAMS_F32: CoshParams<f32> = CoshParams {
    exp: &PARAMS_F32,
    taylor_terms: 6,
    maclaurin_end: 0.0625,
    maclaurin_terms: 3,
    one_sided: 10.0,
};

fn cosh_kernel<T: Ieee754>(x: T, p: &CoshParams<T>) -> T {
    let w = x.abs();
    if w.is_nan_or_inf_bits() {
        return w;
    }
    if w < T::one() {
        let terms = if w < p.maclaurin_end { p.maclaurin_terms } else { p.taylor_terms };
        return horner_f64(w * w, &COSH_TAYLOR[..terms]);
    }
    let half = T::from_f64(0.5);
    if w > p.exp.max_arg {
        let h = exp_kernel(w * half, p.exp);
        return (half * h) * h;
    }
    let e = exp_kernel(w, p.exp);
    if w >= p.one_sided {
        return half * e;
    }
    half * e + half / e
}

/// Hyperbolic cosine. Even; `cosh(±inf) = +inf`.
pub fn cosh_f32(x: f32) -> f32 {
    cosh_kernel(x, &COSH_PARAMS_F32)
}

/// Hyperbolic cosine. Even; `cosh(±inf) = +inf`.
pub fn cosh_f64(x: f64) -> f64 {
    cosh_kernel(x, &COSH_PARAMS_F64)
}

/// `1/n!` for `n = 3..=16` as `(hi, lo)` pairs.
#[rustfmt::skip]
const INV_FACT: [(f64, f64); 14] = [
    (1.66666666666666657e-01, 9.25185853854297066e-18),
    (4.16666666666666644e-02, 2.31296463463574266e-18),
    (8.33333333333333322e-03, 1.15648231731787138e-19),
    (1.38888888888888894e-03, -5.30054395437357706e-20),
    (1.98412698412698413e-04, 1.72095582934207053e-22),
    (2.48015873015873016e-05, 2.15119478667758816e-23),
    (2.75573192239858925e-06, -1.85839327404647208e-22),
    (2.75573192239858883e-07, 2.37677146222502973e-23),
    (2.50521083854417202e-08, -1.44881407093591197e-24),
    (2.08767569878681002e-09, -1.20734505911325997e-25),
    (1.60590438368216133e-10, 1.25852945887520981e-26),
    (1.14707455977297245e-11, 2.06555127528307454e-28),
    (7.64716373181981641e-13, 7.03872877733453001e-30),
    (4.77947733238738525e-14, 4.39920548583408126e-31),
];

/// Exponential in double-double.
///
/// After `x = k·ln 2 + r` (with a double-double `ln 2`), `s = r/1024` goes
/// through a Taylor series for `e^s − 1`, which is then squared ten times
/// in the form `p ← 2p + p²` to recover `e^r − 1` without cancellation.
pub fn exp_dd(x: DoubleDouble) -> DoubleDouble {
    if x.is_nan() {
        return DoubleDouble::NAN;
    }
    if x.hi > MAX_ARG_F64 {
        return DoubleDouble::INFINITY;
    }
    if x.hi < MIN_ARG_F64 {
        return DoubleDouble::ZERO;
    }
    let k = (x.hi * RCPR_LN_2).round();
    let r = x - DoubleDouble::from_pair(DD_LN_2) * k;
    let s = r.ldexp(-10);

    // s + s²(1/2 + s·(1/3! + s/4! + …))
    let tail = DoubleDouble::horner(s, &INV_FACT);
    let mut p = s + s.sqr() * (s * tail).add_f64(0.5);
    for _ in 0..10 {
        p = p.ldexp(1) + p.sqr();
    }
    p.add_f64(1.0).ldexp(k as i32)
}

/// Hyperbolic cosine in double-double, `(e^|x| + 1/e^|x|)/2` from
/// [`exp_dd`].
pub fn cosh_dd(x: DoubleDouble) -> DoubleDouble {
    let w = x.abs();
    if w.is_nan() {
        return DoubleDouble::NAN;
    }
    if w.hi > COSH_MAX_ARG_F64 {
        return DoubleDouble::INFINITY;
    }
    if w.hi > MAX_ARG_F64 {
        let h = exp_dd(w.ldexp(-1));
        return h.ldexp(-1) * h;
    }
    let e = exp_dd(w);
    (e + e.recip()).ldexp(-1)
}
