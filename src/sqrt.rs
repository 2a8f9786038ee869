//! Square root.
//!
//! The mantissa `m ∈ [1, 2)` is reduced by the shared reciprocal table to
//! `t = m·128/(128+k) ∈ [1, 1 + 1/128)`. Then `√m = √(1+k/128)·√t`, with
//! `√t` from a short series, an odd exponent contributes `√2`, and one
//! Heron step `(w + x/w)/2` brings the root within one ulp. Tuckerman's
//! test on the exact residual `w·(w ± ulp) − x` then picks the correctly
//! rounded neighbour. The Heron step and the test run on the reduced
//! argument in `[1, 4)`, so products never underflow.

#![allow(clippy::excessive_precision)]

use crate::algo::constants::SQRT_2;
use crate::algo::reduce::{RCPR_1P_K128, RCPR_1P_K128_F32, table_index};
use crate::compensated::exact_mul;
use crate::double_double::DoubleDouble;
use crate::ieee754::{Ieee754, base2_mant_and_exp, ldexp};
use crate::poly::horner_f64;
use crate::types::FpClass;

/// Taylor series of `√(1+d)`.
const SQRT_1P_SERIES: [f64; 5] = [1.0, 0.5, -0.125, 0.0625, -0.0390625];

/// sqrt(1 + k/128) for k = 0, 1, ..., 127.
#[rustfmt::skip]
const SQRT_1P_K128: [f64; 128] = [
    1.00000000000000000e+00,  1.00389865026306313e+00,
    1.00778221853731864e+00,  1.01165087851491542e+00,
    1.01550480057949510e+00,  1.01934415189375560e+00,
    1.02316909648405630e+00,  1.02697979532218642e+00,
    1.03077640640441515e+00,  1.03455908482792802e+00,
    1.03832798286475936e+00,  1.04208325003331659e+00,
    1.04582503316759445e+00,  1.04955347648416653e+00,
    1.05326872164704488e+00,  1.05697090783048520e+00,
    1.06066017177982119e+00,  1.06433664787040017e+00,
    1.06800046816469130e+00,  1.07165176246764049e+00,
    1.07529065838032833e+00,  1.07891728135200426e+00,
    1.08253175473054841e+00,  1.08613419981142290e+00,
    1.08972473588516849e+00,  1.09330348028349378e+00,
    1.09687054842401532e+00,  1.10042605385368808e+00,
    1.10397010829098097e+00,  1.10750282166683434e+00,
    1.11102430216444859e+00,  1.11453465625793791e+00,
    1.11803398874989490e+00,  1.12152240280789761e+00,
    1.12500000000000000e+00,  1.12846688032923681e+00,
    1.13192314226717716e+00,  1.13536888278655934e+00,
    1.13880419739303740e+00,  1.14222918015606667e+00,
    1.14564392373895996e+00,  1.14904851942813968e+00,
    1.15244305716161088e+00,  1.15582762555668306e+00,
    1.15920231193696299e+00,  1.16256720235864219e+00,
    1.16592238163610196e+00,  1.16926793336685675e+00,
    1.17260393995585743e+00,  1.17593048263917366e+00,
    1.17924764150707539e+00,  1.18255549552653139e+00,
    1.18585412256314227e+00,  1.18914359940252790e+00,
    1.19242400177118202e+00,  1.19569540435681199e+00,
    1.19895788082817978e+00,  1.20221150385445896e+00,
    1.20545634512411937e+00,  1.20869247536335722e+00,
    1.21191996435408234e+00,  1.21513888095147382e+00,
    1.21834929310112039e+00,  1.22155126785575407e+00,
    1.22474487139158894e+00,  1.22793016902428120e+00,
    1.23110722522451299e+00,  1.23427610363321860e+00,
    1.23743686707645817e+00,  1.24058957757995048e+00,
    1.24373429638327493e+00,  1.24687108395375024e+00,
    1.25000000000000000e+00,  1.25312110348521388e+00,
    1.25623445264011124e+00,  1.25934010497561788e+00,
    1.26243811729525968e+00,  1.26552854570728668e+00,
    1.26861144563652739e+00,  1.27168687183598772e+00,
    1.27475487839819612e+00,  1.27781551876630450e+00,
    1.28086884574494975e+00,  1.28391491151088366e+00,
    1.28695376762337510e+00,  1.28998546503439337e+00,
    1.29301005409857517e+00,  1.29602758458298251e+00,
    1.29903810567665801e+00,  1.30204166599997873e+00,
    1.30503831361381883e+00,  1.30802809602852177e+00,
    1.31101106021268943e+00,  1.31398725260178995e+00,
    1.31695671910659229e+00,  1.31991950512142964e+00,
    1.32287565553229536e+00,  1.32582521472477666e+00,
    1.32876822659183125e+00,  1.33170473454140725e+00,
    1.33463478150391390e+00,  1.33755840993954345e+00,
    1.34047566184545097e+00,  1.34338657876279233e+00,
    1.34629120178362593e+00,  1.34918957155768138e+00,
    1.35208172829899609e+00,  1.35496771179242503e+00,
    1.35784756140002694e+00,  1.36072131606732749e+00,
    1.36358901432946422e+00,  1.36645069431721544e+00,
    1.36930639376291530e+00,  1.37215615000625935e+00,
    1.37500000000000000e+00,  1.37783798031553761e+00,
    1.38067012714840764e+00,  1.38349647632366590e+00,
    1.38631706330117721e+00,  1.38913192318080436e+00,
    1.39194109070750538e+00,  1.39474460027633729e+00,
    1.39754248593736863e+00,  1.40033478140050494e+00,
    1.40312152004022805e+00,  1.40590273490024908e+00,
    1.40867845869808050e+00,  1.41144872382952680e+00,
];

/// sqrt(1 + k/128) for k = 0, 1, ..., 127.
#[rustfmt::skip]
const SQRT_1P_K128_F32: [f32; 128] = [
    1.000000000e+00,  1.003898621e+00,  1.007782221e+00,  1.011650920e+00,
    1.015504837e+00,  1.019344211e+00,  1.023169041e+00,  1.026979804e+00,
    1.030776381e+00,  1.034559131e+00,  1.038327932e+00,  1.042083263e+00,
    1.045825005e+00,  1.049553514e+00,  1.053268671e+00,  1.056970954e+00,
    1.060660124e+00,  1.064336658e+00,  1.068000436e+00,  1.071651816e+00,
    1.075290680e+00,  1.078917265e+00,  1.082531810e+00,  1.086134195e+00,
    1.089724779e+00,  1.093303442e+00,  1.096870542e+00,  1.100426078e+00,
    1.103970051e+00,  1.107502818e+00,  1.111024261e+00,  1.114534616e+00,
    1.118034005e+00,  1.121522427e+00,  1.125000000e+00,  1.128466845e+00,
    1.131923199e+00,  1.135368824e+00,  1.138804197e+00,  1.142229199e+00,
    1.145643950e+00,  1.149048567e+00,  1.152443051e+00,  1.155827641e+00,
    1.159202337e+00,  1.162567258e+00,  1.165922403e+00,  1.169267893e+00,
    1.172603965e+00,  1.175930500e+00,  1.179247618e+00,  1.182555437e+00,
    1.185854077e+00,  1.189143658e+00,  1.192424059e+00,  1.195695400e+00,
    1.198957920e+00,  1.202211499e+00,  1.205456376e+00,  1.208692431e+00,
    1.211920023e+00,  1.215138912e+00,  1.218349338e+00,  1.221551299e+00,
    1.224744916e+00,  1.227930188e+00,  1.231107235e+00,  1.234276056e+00,
    1.237436891e+00,  1.240589619e+00,  1.243734241e+00,  1.246871114e+00,
    1.250000000e+00,  1.253121138e+00,  1.256234407e+00,  1.259340048e+00,
    1.262438059e+00,  1.265528560e+00,  1.268611431e+00,  1.271686912e+00,
    1.274754882e+00,  1.277815461e+00,  1.280868888e+00,  1.283914924e+00,
    1.286953807e+00,  1.289985418e+00,  1.293009996e+00,  1.296027541e+00,
    1.299038053e+00,  1.302041650e+00,  1.305038333e+00,  1.308028102e+00,
    1.311011076e+00,  1.313987255e+00,  1.316956758e+00,  1.319919467e+00,
    1.322875619e+00,  1.325825214e+00,  1.328768253e+00,  1.331704736e+00,
    1.334634781e+00,  1.337558389e+00,  1.340475678e+00,  1.343386531e+00,
    1.346291184e+00,  1.349189520e+00,  1.352081776e+00,  1.354967713e+00,
    1.357847571e+00,  1.360721350e+00,  1.363589048e+00,  1.366450667e+00,
    1.369306445e+00,  1.372156143e+00,  1.375000000e+00,  1.377838016e+00,
    1.380670071e+00,  1.383496523e+00,  1.386317015e+00,  1.389131904e+00,
    1.391941071e+00,  1.394744635e+00,  1.397542477e+00,  1.400334835e+00,
    1.403121471e+00,  1.405902743e+00,  1.408678412e+00,  1.411448717e+00,
];

fn sqrt_kernel<T: Ieee754>(x: T, rcpr: &[T; 128], table: &[T; 128], terms: usize) -> T {
    match x.classify_bits() {
        FpClass::Nan | FpClass::Zero => return x,
        _ => {}
    }
    if x.sign_bit() {
        return T::nan();
    }
    if x.is_inf_bits() {
        return x;
    }
    let (m, e) = base2_mant_and_exp(x);
    let k = table_index(m, 7);
    let d = m * rcpr[k] - T::one();
    let mut w = horner_f64(d, &SQRT_1P_SERIES[..terms]) * table[k];
    let mut xr = m;
    if e.rem_euclid(2) == 1 {
        w = w * T::from_f64(SQRT_2);
        xr = m + m;
    }
    let w = T::from_f64(0.5) * (w + xr / w);
    ldexp(round_to_nearest(xr, w), e.div_euclid(2))
}

/// `a·b − x` with the sign of the exact value.
#[inline]
fn residual<T: Ieee754>(a: T, b: T, x: T) -> T {
    let (p, err) = exact_mul(a, b);
    (p - x) + err
}

/// Correctly rounded `√x` for `x ∈ [1, 4)` given `w` within one ulp of it.
fn round_to_nearest<T: Ieee754>(x: T, w: T) -> T {
    let up = T::from_raw(w.to_raw() + 1);
    if residual(w, up, x) < T::zero() {
        return up;
    }
    let down = T::from_raw(w.to_raw() - 1);
    if residual(w, down, x) >= T::zero() {
        return down;
    }
    w
}

/// Square root. Negative inputs give NaN; `sqrt(-0.0) = -0.0`.
pub fn sqrt_f32(x: f32) -> f32 {
    sqrt_kernel(x, &RCPR_1P_K128_F32, &SQRT_1P_K128_F32, 3)
}

/// Square root. Negative inputs give NaN; `sqrt(-0.0) = -0.0`.
pub fn sqrt_f64(x: f64) -> f64 {
    sqrt_kernel(x, &RCPR_1P_K128, &SQRT_1P_K128, 5)
}

/// Square root in double-double: Karp's step `y + (x − y²)/(2y)` from the
/// f64 root `y` of `x.hi`.
pub fn sqrt_dd(x: DoubleDouble) -> DoubleDouble {
    let y = sqrt_f64(x.hi);
    if x.hi <= 0.0 || !y.is_finite() {
        return DoubleDouble::from_f64(y);
    }
    let r = (x - DoubleDouble::from_prod(y, y)).hi;
    DoubleDouble::from_sum(y, r / (2.0 * y))
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── special values ──

    #[test]
    fn special_values() {
        assert_eq!(sqrt_f64(0.0).to_bits(), 0);
        assert_eq!(sqrt_f64(-0.0).to_bits(), (-0.0_f64).to_bits());
        assert!(sqrt_f64(-1.0).is_nan());
        assert!(sqrt_f64(f64::NAN).is_nan());
        assert!(sqrt_f64(f64::NEG_INFINITY).is_nan());
        assert_eq!(sqrt_f64(f64::INFINITY), f64::INFINITY);
        assert!(sqrt_f32(-1.0).is_nan());
        assert_eq!(sqrt_f32(f32::INFINITY), f32::INFINITY);
        assert_eq!(sqrt_f32(-0.0).to_bits(), (-0.0_f32).to_bits());
    }

    // ── f64 accuracy ──

    #[test]
    fn exact_squares() {
        assert_eq!(sqrt_f64(4.0), 2.0);
        assert_eq!(sqrt_f64(1.0), 1.0);
        assert_eq!(sqrt_f64(0.25), 0.5);
        assert_eq!(sqrt_f32(4.0), 2.0);
    }

    #[test]
    fn matches_core_f64() {
        let mut x = 1e-300_f64;
        while x < 1e300 {
            assert_eq!(sqrt_f64(x), x.sqrt(), "x = {x}");
            x *= 1.377;
        }
        assert_eq!(sqrt_f64(2.0), core::f64::consts::SQRT_2);
        assert_eq!(sqrt_f64(0.5), core::f64::consts::FRAC_1_SQRT_2);
        assert_eq!(sqrt_f64(1e-20), 1e-10);
        assert_eq!(sqrt_f64(f64::MAX), f64::MAX.sqrt());
    }

    #[test]
    fn correctly_rounded_near_binade_edges() {
        let below_four = f64::from_bits(4.0_f64.to_bits() - 1);
        assert_eq!(sqrt_f64(below_four), below_four.sqrt());
        let above_one = 1.0 + f64::EPSILON;
        assert_eq!(sqrt_f64(above_one), above_one.sqrt());
        let below_one = f64::from_bits(1.0_f64.to_bits() - 1);
        assert_eq!(sqrt_f64(below_one), below_one.sqrt());
        let mut x = 1.0_f64;
        while x < 4.0 {
            assert_eq!(sqrt_f64(x), x.sqrt(), "x = {x}");
            x += 1.0 / 1021.0;
        }
    }

    #[test]
    fn region_boundaries_are_continuous() {
        // Table nodes 1 + k/128 and their neighbours, in both exponent parities.
        for k in 0..128 {
            let node = 1.0 + k as f64 / 128.0;
            for scale in [1.0, 2.0] {
                let b = node * scale;
                for x in [f64::from_bits(b.to_bits() - 1), b, f64::from_bits(b.to_bits() + 1)] {
                    assert_eq!(sqrt_f64(x), x.sqrt(), "x = {x}");
                }
                let bf = b as f32;
                for xf in [f32::from_bits(bf.to_bits() - 1), bf, f32::from_bits(bf.to_bits() + 1)] {
                    assert_eq!(sqrt_f32(xf), xf.sqrt(), "x = {xf}");
                }
            }
        }
    }

    #[test]
    fn subnormal_inputs() {
        let tiny = f64::from_bits(1);
        assert_eq!(sqrt_f64(tiny), tiny.sqrt());
        let sub = f64::MIN_POSITIVE / 3.0;
        assert_eq!(sqrt_f64(sub), sub.sqrt());
        let sub32 = f32::MIN_POSITIVE / 7.0;
        assert_eq!(sqrt_f32(sub32), sub32.sqrt());
    }

    #[test]
    fn matches_core_f32() {
        let mut x = 1e-30_f32;
        while x < 1e30 {
            assert_eq!(sqrt_f32(x), x.sqrt(), "x = {x}");
            x *= 1.91;
        }
    }

    // ── double-double ──

    #[test]
    fn dd_sqrt_two() {
        let r = sqrt_dd(DoubleDouble::from_f64(2.0));
        let s = DoubleDouble::new(1.41421356237309515e+00, -9.66729331345291345e-17);
        assert!((r - s).to_f64().abs() < 1e-31);
        let back = r.sqr() - 2.0;
        assert!(back.to_f64().abs() < 1e-30);
    }

    #[test]
    fn dd_special_values() {
        assert!(sqrt_dd(DoubleDouble::from_f64(-4.0)).is_nan());
        assert_eq!(sqrt_dd(DoubleDouble::ZERO), DoubleDouble::ZERO);
        assert!(sqrt_dd(DoubleDouble::INFINITY).is_infinite());
        assert!(sqrt_dd(DoubleDouble::NAN).is_nan());
    }
}
