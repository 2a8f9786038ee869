//! Natural logarithm.
//!
//! For `x = 2^e·m` the top six fraction bits of `m` give an index `k`, and
//! `s = m·64/(64+k)` lies in `[1, 1 + 1/64)`. Then
//! `ln x = e·ln 2 + ln(1 + k/64) + 2·atanh((s−1)/(s+1))` with `ln 2` split
//! into a high part that multiplies exactly and a low correction. The
//! offset `s − 1` is formed as `(m − (1 + k/64))·64/(64+k)`, where the
//! subtraction is exact, so it keeps full relative precision. Just
//! below one the exponent and table terms cancel, so `0.75 < x < 1` sums
//! the atanh series in `(x−1)/(x+1)` directly.

#![allow(clippy::excessive_precision)]

use crate::algo::constants::{DD_LN_2, LN_2_HI, LN_2_HI_F32, LN_2_LO, LN_2_LO_F32};
use crate::algo::reduce::table_index;
use crate::double_double::DoubleDouble;
use crate::exp::exp_dd;
use crate::ieee754::{Ieee754, base2_mant_and_exp};
use crate::poly::horner;

/// `2/(2n+1)`, the atanh series `ln((1+A)/(1-A)) = A·Σ c_n A^(2n)`.
#[rustfmt::skip]
const ATANH_SERIES: [f64; 11] = [
    2.0,                 0.6666666666666666,
    0.4,                 0.2857142857142857,
    0.2222222222222222,  0.18181818181818182,
    0.15384615384615385, 0.13333333333333333,
    0.11764705882352941, 0.10526315789473684,
    0.09523809523809523,
];

#[rustfmt::skip]
const ATANH_SERIES_F32: [f32; 6] = [
    2.0,        0.6666667,
    0.4,        0.2857143,
    0.22222222, 0.18181819,
];

/// 2^-900 and 2^900, where the double-double refinement rescales.
const DD_SCALE_LOW: f64 = 1.1830521861667747e-271;
const DD_SCALE_HIGH: f64 = 8.452712498170644e+270;

/// ln(1 + k/64) for k = 0, 1, ..., 63.
#[rustfmt::skip]
const LN_1P_K64: [f64; 64] = [
    0.00000000000000000e+00,  1.55041865359652545e-02,
    3.07716586667536873e-02,  4.58095360312942013e-02,
    6.06246218164348399e-02,  7.52234212375875316e-02,
    8.96121586896871380e-02,  1.03796793681643559e-01,
    1.17783035656383456e-01,  1.31576357788719261e-01,
    1.45182009844497889e-01,  1.58605030176638573e-01,
    1.71850256926659228e-01,  1.84922338494011990e-01,
    1.97825743329919868e-01,  2.10564769107349642e-01,
    2.23143551314209765e-01,  2.35566071312766911e-01,
    2.47836163904581269e-01,  2.59957524436926046e-01,
    2.71933715483641758e-01,  2.83768173130644619e-01,
    2.95464212893835898e-01,  3.07025035294911874e-01,
    3.18453731118534589e-01,  3.29753286372467980e-01,
    3.40926586970593193e-01,  3.51976423157178198e-01,
    3.62905493689368475e-01,  3.73716409793584059e-01,
    3.84411698910332056e-01,  3.94993808240868993e-01,
    4.05465108108164385e-01,  4.15827895143710990e-01,
    4.26084395310900088e-01,  4.36236766774918072e-01,
    4.46287102628419530e-01,  4.56237433481587573e-01,
    4.66089729924599239e-01,  4.75845904869963920e-01,
    4.85507815781700824e-01,  4.95077266797851523e-01,
    5.04556010752395312e-01,  5.13945751102234283e-01,
    5.23248143764547868e-01,  5.32464798869471845e-01,
    5.41597282432744409e-01,  5.50647117952662302e-01,
    5.59615787935422659e-01,  5.68504735352668766e-01,
    5.77315365034823613e-01,  5.86049045003578239e-01,
    5.94707107746692776e-01,  6.03290851438084252e-01,
    6.11801541105992941e-01,  6.20240409751857569e-01,
    6.28608659422374094e-01,  6.36907462237069177e-01,
    6.45137961373584701e-01,  6.53301272012745682e-01,
    6.61398482245365016e-01,  6.69430653942629239e-01,
    6.77398823591806143e-01,  6.85304003098919368e-01,
];
/// 64 / (64 + k) for k = 0, 1, ..., 63.
#[rustfmt::skip]
const RCPR_1P_K64: [f64; 64] = [
    1.00000000000000000e+00,  9.84615384615384670e-01,
    9.69696969696969724e-01,  9.55223880597014907e-01,
    9.41176470588235281e-01,  9.27536231884057982e-01,
    9.14285714285714257e-01,  9.01408450704225372e-01,
    8.88888888888888840e-01,  8.76712328767123239e-01,
    8.64864864864864913e-01,  8.53333333333333388e-01,
    8.42105263157894690e-01,  8.31168831168831224e-01,
    8.20512820512820484e-01,  8.10126582278481000e-01,
    8.00000000000000044e-01,  7.90123456790123413e-01,
    7.80487804878048808e-01,  7.71084337349397630e-01,
    7.61904761904761862e-01,  7.52941176470588225e-01,
    7.44186046511627897e-01,  7.35632183908045967e-01,
    7.27272727272727293e-01,  7.19101123595505598e-01,
    7.11111111111111138e-01,  7.03296703296703352e-01,
    6.95652173913043459e-01,  6.88172043010752743e-01,
    6.80851063829787218e-01,  6.73684210526315774e-01,
    6.66666666666666630e-01,  6.59793814432989678e-01,
    6.53061224489795866e-01,  6.46464646464646520e-01,
    6.40000000000000013e-01,  6.33663366336633671e-01,
    6.27450980392156854e-01,  6.21359223300970820e-01,
    6.15384615384615419e-01,  6.09523809523809579e-01,
    6.03773584905660354e-01,  5.98130841121495282e-01,
    5.92592592592592560e-01,  5.87155963302752326e-01,
    5.81818181818181790e-01,  5.76576576576576572e-01,
    5.71428571428571397e-01,  5.66371681415929196e-01,
    5.61403508771929793e-01,  5.56521739130434789e-01,
    5.51724137931034475e-01,  5.47008547008547064e-01,
    5.42372881355932202e-01,  5.37815126050420145e-01,
    5.33333333333333326e-01,  5.28925619834710758e-01,
    5.24590163934426257e-01,  5.20325203252032575e-01,
    5.16129032258064502e-01,  5.12000000000000011e-01,
    5.07936507936507908e-01,  5.03937007874015741e-01,
];
/// ln(1 + k/64) for k = 0, 1, ..., 63.
#[rustfmt::skip]
const LN_1P_K64_F32: [f32; 64] = [
    0.000000000e+00,  1.550418697e-02,  3.077165782e-02,  4.580953717e-02,
    6.062462181e-02,  7.522342354e-02,  8.961215615e-02,  1.037967950e-01,
    1.177830324e-01,  1.315763593e-01,  1.451820135e-01,  1.586050242e-01,
    1.718502641e-01,  1.849223375e-01,  1.978257447e-01,  2.105647624e-01,
    2.231435478e-01,  2.355660647e-01,  2.478361577e-01,  2.599575222e-01,
    2.719337046e-01,  2.837681770e-01,  2.954642177e-01,  3.070250452e-01,
    3.184537292e-01,  3.297532797e-01,  3.409265876e-01,  3.519764245e-01,
    3.629055023e-01,  3.737164140e-01,  3.844116926e-01,  3.949938118e-01,
    4.054650962e-01,  4.158279002e-01,  4.260843992e-01,  4.362367690e-01,
    4.462870955e-01,  4.562374353e-01,  4.660897255e-01,  4.758459032e-01,
    4.855078161e-01,  4.950772524e-01,  5.045560002e-01,  5.139457583e-01,
    5.232481360e-01,  5.324648023e-01,  5.415973067e-01,  5.506471395e-01,
    5.596157908e-01,  5.685047507e-01,  5.773153901e-01,  5.860490203e-01,
    5.947071314e-01,  6.032908559e-01,  6.118015647e-01,  6.202403903e-01,
    6.286086440e-01,  6.369074583e-01,  6.451379657e-01,  6.533012986e-01,
    6.613984704e-01,  6.694306731e-01,  6.773988008e-01,  6.853039861e-01,
];
/// 64 / (64 + k) for k = 0, 1, ..., 63.
#[rustfmt::skip]
const RCPR_1P_K64_F32: [f32; 64] = [
    1.000000000e+00,  9.846153855e-01,  9.696969986e-01,  9.552238584e-01,
    9.411764741e-01,  9.275362492e-01,  9.142857194e-01,  9.014084339e-01,
    8.888888955e-01,  8.767123222e-01,  8.648648858e-01,  8.533333540e-01,
    8.421052694e-01,  8.311688304e-01,  8.205128312e-01,  8.101266026e-01,
    8.000000119e-01,  7.901234627e-01,  7.804877758e-01,  7.710843086e-01,
    7.619047761e-01,  7.529411912e-01,  7.441860437e-01,  7.356321812e-01,
    7.272727489e-01,  7.191011310e-01,  7.111111283e-01,  7.032967210e-01,
    6.956521869e-01,  6.881720424e-01,  6.808510423e-01,  6.736842394e-01,
    6.666666865e-01,  6.597937942e-01,  6.530612111e-01,  6.464646459e-01,
    6.399999857e-01,  6.336633563e-01,  6.274510026e-01,  6.213592291e-01,
    6.153846383e-01,  6.095238328e-01,  6.037735939e-01,  5.981308222e-01,
    5.925925970e-01,  5.871559381e-01,  5.818181634e-01,  5.765765905e-01,
    5.714285970e-01,  5.663716793e-01,  5.614035130e-01,  5.565217137e-01,
    5.517241359e-01,  5.470085740e-01,  5.423728824e-01,  5.378151536e-01,
    5.333333611e-01,  5.289255977e-01,  5.245901346e-01,  5.203251839e-01,
    5.161290169e-01,  5.120000243e-01,  5.079365373e-01,  5.039370060e-01,
];

struct LogParams<T: 'static> {
    ln_table: &'static [T; 64],
    rcpr: &'static [T; 64],
    near_one: &'static [T],
    poly: &'static [T],
    ln2_hi: T,
    ln2_lo: T,
}

const PARAMS_F64: LogParams<f64> = LogParams {
    ln_table: &LN_1P_K64,
    rcpr: &RCPR_1P_K64,
    near_one: &ATANH_SERIES,
    poly: &[2.0, 0.6666666666666666, 0.4, 0.2857142857142857],
    ln2_hi: LN_2_HI,
    ln2_lo: LN_2_LO,
};

const PARAMS_F32: LogParams<f32> = LogParams {
    ln_table: &LN_1P_K64_F32,
    rcpr: &RCPR_1P_K64_F32,
    near_one: &ATANH_SERIES_F32,
    poly: &[2.0, 0.6666667],
    ln2_hi: LN_2_HI_F32,
    ln2_lo: LN_2_LO_F32,
};

fn log_kernel<T: Ieee754>(x: T, p: &LogParams<T>) -> T {
    if x.is_nan_bits() {
        return x;
    }
    if x == T::zero() {
        return T::neg_infinity();
    }
    if x.sign_bit() {
        return T::nan();
    }
    if x.is_inf_bits() {
        return x;
    }
    if x > T::from_f64(0.75) && x < T::one() {
        let a = (x - T::one()) / (x + T::one());
        return a * horner(a * a, p.near_one);
    }
    let (m, e) = base2_mant_and_exp(x);
    let k = table_index(m, 6);
    let node = T::one() + T::from_f64(k as f64 / 64.0);
    let d = (m - node) * p.rcpr[k];
    let a = d / (d + T::from_f64(2.0));
    let poly = a * horner(a * a, p.poly);
    let ef = T::from_f64(f64::from(e));
    (ef * p.ln2_hi + p.ln_table[k]) + (ef * p.ln2_lo + poly)
}

/// Natural logarithm. `log(±0) = -inf`, negative inputs give NaN.
pub fn log_f32(x: f32) -> f32 {
    log_kernel(x, &PARAMS_F32)
}

/// Natural logarithm. `log(±0) = -inf`, negative inputs give NaN.
pub fn log_f64(x: f64) -> f64 {
    log_kernel(x, &PARAMS_F64)
}

/// Natural logarithm in double-double.
///
/// One Newton step on `e^y = x` from the f64 logarithm of `x.hi`:
/// `y ← y + x·e^(−y) − 1`. Inputs near either end of the range are first
/// scaled by `2^∓600` so that `e^(−y)` stays normal.
pub fn log_dd(x: DoubleDouble) -> DoubleDouble {
    if x.is_nan() {
        return DoubleDouble::NAN;
    }
    if x.hi == 0.0 {
        return DoubleDouble::NEG_INFINITY;
    }
    if x.hi < 0.0 {
        return DoubleDouble::NAN;
    }
    if x.is_infinite() {
        return DoubleDouble::INFINITY;
    }
    let (x, shift) = if x.hi < DD_SCALE_LOW {
        (x.ldexp(600), -600.0)
    } else if x.hi > DD_SCALE_HIGH {
        (x.ldexp(-600), 600.0)
    } else {
        (x, 0.0)
    };
    let y = DoubleDouble::from_f64(log_f64(x.hi));
    let y = y + (x * exp_dd(-y)).add_f64(-1.0);
    y + DoubleDouble::from_pair(DD_LN_2) * shift
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rel(a: f64, b: f64) -> f64 {
        if b == 0.0 { a.abs() } else { ((a - b) / b).abs() }
    }

    // ── special values ──

    #[test]
    fn special_values() {
        assert_eq!(log_f64(0.0), f64::NEG_INFINITY);
        assert_eq!(log_f64(-0.0), f64::NEG_INFINITY);
        assert!(log_f64(-1.0).is_nan());
        assert_eq!(log_f64(f64::INFINITY), f64::INFINITY);
        assert!(log_f64(f64::NAN).is_nan());
        assert!(log_f64(f64::NEG_INFINITY).is_nan());
        assert_eq!(log_f64(1.0), 0.0);
        assert_eq!(log_f32(0.0), f32::NEG_INFINITY);
        assert!(log_f32(-1.0).is_nan());
        assert_eq!(log_f32(f32::INFINITY), f32::INFINITY);
        assert_eq!(log_f32(1.0), 0.0);
    }

    // ── f64 accuracy ──

    #[test]
    fn matches_core_f64() {
        let mut x = 1e-300_f64;
        while x < 1e300 {
            assert!(rel(log_f64(x), x.ln()) < 4.0 * f64::EPSILON, "x = {x}");
            x *= 1.173;
        }
        assert!(rel(log_f64(2.0), core::f64::consts::LN_2) <= f64::EPSILON);
        assert!(rel(log_f64(core::f64::consts::E), 1.0) <= 2.0 * f64::EPSILON);
    }

    #[test]
    fn near_one() {
        for i in 1..1000 {
            let below = 1.0 - i as f64 * 2.5e-4;
            assert!(rel(log_f64(below), below.ln()) < 4.0 * f64::EPSILON, "x = {below}");
            let above = 1.0 + i as f64 * 1e-5;
            assert!(rel(log_f64(above), above.ln()) < 4.0 * f64::EPSILON, "x = {above}");
        }
        let x = 1.0 - f64::EPSILON / 2.0;
        assert!(rel(log_f64(x), -f64::EPSILON / 2.0) < f64::EPSILON);
    }

    #[test]
    fn table_breaks_above_one() {
        for k in 1..=16 {
            let node = 1.0 + k as f64 / 64.0;
            for x in [
                node,
                node - f64::EPSILON,
                node + f64::EPSILON,
                node + 0.25 / 64.0,
                node + 0.5 / 64.0,
                node + 0.999 / 64.0,
            ] {
                assert!(rel(log_f64(x), x.ln()) < 4.0 * f64::EPSILON, "x = {x}");
                let xf = x as f32;
                let want = xf.ln();
                assert!(((log_f32(xf) - want) / want).abs() < 4.0 * f32::EPSILON, "x = {xf}");
            }
        }
        for x in [1.0157472536384429, 1.030433291838934, 1.2] {
            assert!(rel(log_f64(x), x.ln()) < 4.0 * f64::EPSILON, "x = {x}");
        }
        let xf = 1.0207195_f32;
        assert!(((log_f32(xf) - xf.ln()) / xf.ln()).abs() < 4.0 * f32::EPSILON);
    }

    #[test]
    fn dense_sweep_up_to_two() {
        let mut x = 1.0_f64 + f64::EPSILON;
        while x < 2.0 {
            assert!(rel(log_f64(x), x.ln()) < 4.0 * f64::EPSILON, "x = {x}");
            x += 1.0 / 4099.0;
        }
    }

    #[test]
    fn region_boundary_is_continuous() {
        let lo = log_f64(0.75);
        let hi = log_f64(0.75 + f64::EPSILON);
        assert!(hi > lo);
        assert!(hi - lo < 4.0 * f64::EPSILON);
    }

    #[test]
    fn subnormal_inputs() {
        let tiny = f64::from_bits(1);
        assert!(rel(log_f64(tiny), -744.4400719213812) < f64::EPSILON);
        let sub = f64::MIN_POSITIVE / 10.0;
        assert!(rel(log_f64(sub), sub.ln()) < 4.0 * f64::EPSILON);
    }

    #[test]
    fn matches_core_f32() {
        let mut x = 1e-40_f32;
        while x < 1e38 {
            let want = x.ln();
            assert!(((log_f32(x) - want) / want).abs() < 4.0 * f32::EPSILON, "x = {x}");
            x *= 1.37;
        }
    }

    // ── double-double ──

    #[test]
    fn dd_log_two() {
        let l = log_dd(DoubleDouble::from_f64(2.0));
        assert!((l - DoubleDouble::from_pair(DD_LN_2)).to_f64().abs() < 1e-31);
    }

    #[test]
    fn dd_log_of_e() {
        let l = log_dd(DoubleDouble::from_pair(crate::algo::constants::DD_E));
        assert!((l - 1.0).to_f64().abs() < 1e-31);
    }

    #[test]
    fn dd_extreme_inputs() {
        let tiny = DoubleDouble::from_f64(f64::from_bits(1));
        let l = log_dd(tiny);
        // ln(2^-1074) = -1074·ln 2
        let want = DoubleDouble::from_pair(DD_LN_2) * -1074.0;
        assert!(((l - want) / want).to_f64().abs() < 1e-30);

        let big = DoubleDouble::from_f64(f64::MAX);
        assert!((log_dd(big).to_f64() - f64::MAX.ln()).abs() < 1e-12);
    }

    #[test]
    fn dd_special_values() {
        assert_eq!(log_dd(DoubleDouble::ZERO), DoubleDouble::NEG_INFINITY);
        assert!(log_dd(DoubleDouble::from_f64(-1.0)).is_nan());
        assert!(log_dd(DoubleDouble::INFINITY).is_infinite());
        assert!(log_dd(DoubleDouble::NAN).is_nan());
        assert_eq!(log_dd(DoubleDouble::ONE).to_f64(), 0.0);
    }
}
