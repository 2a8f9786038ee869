//! Arctangent and the two-argument arctangent.
//!
//! Small arguments use the Maclaurin series directly and large ones the
//! reflection `atan(x) = π/2 − atan(1/x)`. In between, the binary exponent
//! of `x` picks a point `v` with a stored `atan(v)`, and
//! `atan(x) = atan(v) + atan((x − v)/(1 + xv))` leaves a reduced argument
//! below 0.07 in magnitude.

#![allow(clippy::excessive_precision)]

use crate::algo::constants::{DD_PI_BY_TWO, PI, PI_BY_TWO};
use crate::double_double::DoubleDouble;
use crate::ieee754::Ieee754;
use crate::poly::horner_f64;

/// `atan(x) = x(1 − x²·Σ c_n x^(2n))`, a minimax-tuned Maclaurin tail.
#[rustfmt::skip]
const ATAN_SERIES: [f64; 8] = [
    3.33333333333329318027E-01,  -1.99999999998764832476E-01,
    1.42857142725034663711E-01,  -1.11111104054623557880E-01,
    9.09088713343650656196E-02,  -7.69187620504482999495E-02,
    6.66107313738753120669E-02,  -5.83357013379057348645E-02,
];

/// Expansion points for `|x|` in `[2^(i−3), 2^(i−2))`.
const ATAN_V: [f64; 7] = [0.18, 0.35, 0.72, 1.35, 2.5, 4.0, 8.0];

#[rustfmt::skip]
const ATAN_OF_V: [f64; 7] = [
    0.178092938231197549667920, 0.336674819386727181396699,
    0.624023052976756847589791, 0.933247528656203869893663,
    1.19028994968253173292773,  1.32581766366803246505924,
    1.44644133224813518419997,
];

/// Expansion points for `|x|` in `[2^(i−4), 2^(i−3))`.
const ATAN_V_F32: [f32; 8] = [0.09, 0.18, 0.35, 0.72, 1.35, 2.5, 4.0, 8.0];

#[rustfmt::skip]
const ATAN_OF_V_F32: [f32; 8] = [
    8.975817263e-02,  1.780929416e-01,  3.366748095e-01,  6.240230799e-01,
    9.332475066e-01,  1.190289974e+00,  1.325817704e+00,  1.446441293e+00,
];

struct ArctanParams<T: 'static> {
    v: &'static [T],
    atan_v: &'static [T],
    /// Below `2^tiny_exp`, `atan(x)` rounds to `x`.
    tiny_exp: i32,
    /// Below `2^small_exp`, the series applies to `x` itself.
    small_exp: i32,
    mid_terms: usize,
    large_terms: usize,
}

const PARAMS_F64: ArctanParams<f64> = ArctanParams {
    v: &ATAN_V,
    atan_v: &ATAN_OF_V,
    tiny_exp: -27,
    small_exp: -3,
    mid_terms: 8,
    large_terms: 5,
};

const PARAMS_F32: ArctanParams<f32> = ArctanParams {
    v: &ATAN_V_F32,
    atan_v: &ATAN_OF_V_F32,
    tiny_exp: -12,
    small_exp: -4,
    mid_terms: 4,
    large_terms: 4,
};

#[inline]
fn maclaurin<T: Ieee754>(x: T, terms: usize) -> T {
    let x2 = x * x;
    x * (T::one() - x2 * horner_f64(x2, &ATAN_SERIES[..terms]))
}

fn arctan_kernel<T: Ieee754>(x: T, p: &ArctanParams<T>) -> T {
    if x.is_nan_bits() {
        return x;
    }
    let pi_by_two = T::from_f64(PI_BY_TWO);
    if x.is_inf_bits() {
        return if x.sign_bit() { -pi_by_two } else { pi_by_two };
    }
    let e = x.exponent_bits() as i32 - T::UBIAS as i32;
    if e < p.tiny_exp {
        return x;
    }
    if e < p.small_exp {
        return maclaurin(x, p.mid_terms);
    }
    let a = x.abs();
    let out = if e >= 4 {
        pi_by_two + maclaurin(-a.recip(), p.large_terms)
    } else {
        let i = (e - p.small_exp) as usize;
        let v = p.v[i];
        p.atan_v[i] + maclaurin((a - v) / (T::one() + a * v), p.mid_terms)
    };
    if x.sign_bit() { -out } else { out }
}

/// Arctangent. Odd; `atan(±inf) = ±π/2`.
pub fn arctan_f32(x: f32) -> f32 {
    arctan_kernel(x, &PARAMS_F32)
}

/// Arctangent. Odd; `atan(±inf) = ±π/2`.
pub fn arctan_f64(x: f64) -> f64 {
    arctan_kernel(x, &PARAMS_F64)
}

/// Quadrant reconstruction over a one-argument arctangent, with the
/// zero and infinity cases of C99 Annex F.
fn arctan2_kernel<T: Ieee754>(y: T, x: T, atan: fn(T) -> T) -> T {
    if x.is_nan_bits() || y.is_nan_bits() {
        return T::nan();
    }
    let pi = T::from_f64(PI);
    let pi_by_two = T::from_f64(PI_BY_TWO);
    let with_sign = |v: T| if y.sign_bit() { -v } else { v };

    if y == T::zero() {
        // atan2(±0, +x) = ±0 and atan2(±0, −x) = ±π, signed zeros included.
        return if x.sign_bit() { with_sign(pi) } else { y };
    }
    if x == T::zero() {
        return with_sign(pi_by_two);
    }
    if y.is_inf_bits() {
        let quarter = pi_by_two * T::from_f64(0.5);
        return match (x.is_inf_bits(), x.sign_bit()) {
            (true, false) => with_sign(quarter),
            (true, true) => with_sign(pi - quarter),
            _ => with_sign(pi_by_two),
        };
    }
    if x.is_inf_bits() {
        return if x.sign_bit() { with_sign(pi) } else { with_sign(T::zero()) };
    }
    let a = atan(y / x);
    if !x.sign_bit() {
        a
    } else if y.sign_bit() {
        a - pi
    } else {
        a + pi
    }
}

/// Angle of the point `(x, y)` in `(−π, π]`.
pub fn arctan2_f32(y: f32, x: f32) -> f32 {
    arctan2_kernel(y, x, arctan_f32)
}

/// Angle of the point `(x, y)` in `(−π, π]`.
pub fn arctan2_f64(y: f64, x: f64) -> f64 {
    arctan2_kernel(y, x, arctan_f64)
}

/// atan(n/8) for n = 0, 1, ..., 128, as (hi, lo) pairs.
#[rustfmt::skip]
const ATAN_N_BY_8: [(f64, f64); 129] = [
    (0.00000000000000000e+00, 0.00000000000000000e+00),
    (1.24354994546761438e-01, -3.12532414245393831e-18),
    (2.44978663126864143e-01, 1.06987556187344514e-17),
    (3.58770670270572245e-01, -2.46238155826386349e-17),
    (4.63647609000806094e-01, 2.26987774529616871e-17),
    (5.58599315343562441e-01, -5.45563054859162639e-18),
    (6.43501108793284371e-01, 1.58347850514442862e-17),
    (7.18829999621624527e-01, -2.14783884444569830e-17),
    (7.85398163397448279e-01, 3.06161699786838302e-17),
    (8.44153986113171051e-01, -4.84133701193491676e-17),
    (8.96055384571343927e-01, 2.92387628577430489e-17),
    (9.42000040379463610e-01, 5.46083748584668763e-17),
    (9.82793723247329054e-01, 1.39033110312309985e-17),
    (1.01914134426634972e+00, 1.00040188693667989e-17),
    (1.05165021254837376e+00, -9.65056473146751351e-17),
    (1.08083900054116833e+00, -1.56763225113590725e-17),
    (1.10714871779409041e+00, 9.40447137356637941e-17),
    (1.13095374397916038e+00, 7.12383380453844630e-17),
    (1.15257199721566761e+00, -9.15973850890037882e-17),
    (1.17227388112847630e+00, 8.38518861402867437e-17),
    (1.19028994968253166e+00, 7.68333362984206881e-17),
    (1.20681737028525249e+00, 4.17246763886143912e-17),
    (1.22202532321098967e+00, -2.97916286489284927e-17),
    (1.23605948947808186e+00, 7.87975273945942128e-17),
    (1.24904577239825443e+00, -2.19620379961231090e-18),
    (1.26109338225244039e+00, 3.24213962153496050e-17),
    (1.27229739520871732e+00, 2.24587501503450703e-17),
    (1.28274087974427076e+00, -9.28318875426612948e-18),
    (1.29249666778978534e+00, -6.83080476892666033e-17),
    (1.30162883400919616e+00, -1.23691849982462667e-17),
    (1.31019393504755555e+00, 8.74541373478027883e-17),
    (1.31824205101683711e+00, -6.31939403114467626e-17),
    (1.32581766366803255e+00, -8.82442937395113632e-17),
    (1.33296039933744592e+00, -5.49868737165472099e-17),
    (1.33970565959899957e+00, -2.59901186030413438e-17),
    (1.34608515838025400e+00, -6.77510170979594611e-17),
    (1.35212738092095464e+00, 2.14767425075115096e-17),
    (1.35785797721549950e+00, -2.57878742966343633e-17),
    (1.36330010035969384e+00, 1.09324617152693622e-16),
    (1.36847469841659297e+00, -9.41025536592807857e-17),
    (1.37340076694501589e+00, -3.30771035576951650e-17),
    (1.37809556813251111e+00, -6.17315730203044214e-17),
    (1.38257482149012589e+00, -3.56149043864823010e-17),
    (1.38685287025772142e+00, 3.92141226100124932e-17),
    (1.39094282700241845e+00, -9.84371213348884259e-17),
    (1.39485670134236872e+00, 6.13087941961932245e-17),
    (1.39860551227195762e+00, -2.32406118259162798e-17),
    (1.40219938718546699e+00, 1.61231090531658203e-17),
    (1.40564764938026987e+00, -8.92263013823449239e-17),
    (1.40895889555647380e+00, -1.05455671176754469e-16),
    (1.41214106460849531e+00, -9.57380711055722328e-17),
    (1.41520149881786694e+00, -3.50678547952454637e-17),
    (1.41814699839963154e+00, -8.26388378251101363e-17),
    (1.42098387022199923e+00, 2.20900866241210331e-17),
    (1.42371797140649403e+00, 8.72187092222396751e-17),
    (1.42635474842025256e+00, 7.91995031890824755e-17),
    (1.42889927219073276e+00, -6.45713474323875439e-17),
    (1.43135626970355889e+00, 6.02058731554912409e-18),
    (1.43373015248470903e+00, -4.39620446676763619e-17),
    (1.43602504231716543e+00, 8.91273968704957581e-17),
    (1.43824479449822262e+00, -2.49301991026456555e-17),
    (1.44039301890576321e+00, 5.76522253301451581e-18),
    (1.44247309910910193e+00, -1.10511943543031571e-16),
    (1.44448820973165626e+00, 1.06931701933629014e-16),
    (1.44644133224813509e+00, 9.21132397154505156e-17),
    (1.44833526937755530e+00, -1.09265399720319326e-16),
    (1.45017265821479380e+00, 1.02919411427437102e-16),
    (1.45195598222713151e+00, -9.42166720292864150e-17),
    (1.45368758222803240e+00, -6.81876925015134676e-17),
    (1.45536966642797183e+00, 6.83291287556763246e-17),
    (1.45700431965118860e+00, -4.22229669194038225e-17),
    (1.45859351179764229e+00, -8.18979446563426048e-17),
    (1.46013910562100091e+00, 6.26097470783084416e-17),
    (1.46164286388601883e+00, 5.89382841516530812e-17),
    (1.46310645596207589e+00, 4.13337592224408144e-17),
    (1.46453146390381783e+00, -1.98636879740958877e-17),
    (1.46591938806466282e+00, -9.71125555407483218e-17),
    (1.46727165228435230e+00, -3.21123049890520624e-17),
    (1.46858960868764310e+00, -1.56708809799763594e-17),
    (1.46987454212760271e+00, 5.63240777316963134e-17),
    (1.47112767430373470e+00, -1.08492227620614239e-16),
    (1.47235016758226345e+00, 9.13614136029894830e-17),
    (1.47354312854333092e+00, -7.01294095665885038e-17),
    (1.47470761127752970e+00, 2.04306757497725039e-17),
    (1.47584462045214027e+00, 3.38755967276631476e-17),
    (1.47695511416556013e+00, -2.71247274645261576e-17),
    (1.47804000660675294e+00, -6.86945539366982747e-17),
    (1.47910017053503351e+00, 8.26397654893771380e-17),
    (1.48013643959415142e+00, 8.50262547607966975e-17),
    (1.48114961047341009e+00, 6.26509656459874261e-18),
    (1.48214044492745911e+00, 4.27290242143163829e-17),
    (1.48310967166539620e+00, -5.62137838474268628e-17),
    (1.48405798811891154e+00, -3.44545106786359401e-17),
    (1.48498606209839457e+00, -1.07389386824596711e-16),
    (1.48589453334517474e+00, -7.10803781051839070e-17),
    (1.48678401498740209e+00, -5.19764878679133554e-17),
    (1.48765509490645531e+00, 7.84437173946107664e-17),
    (1.48850833702021479e+00, -5.38321413470952256e-17),
    (1.48934428248902573e+00, -8.64736489955646707e-17),
    (1.49016345084972279e+00, 6.94962534944427023e-18),
    (1.49096634108265924e+00, 6.22143476002012210e-17),
    (1.49175343261630400e+00, 3.61453225840476910e-17),
    (1.49252518627361863e+00, 2.59766380285676556e-17),
    (1.49328204516410490e+00, -6.07079939147340099e-17),
    (1.49402443552511865e+00, -7.47641750277645943e-17),
    (1.49475276751577946e+00, 8.27226371433581882e-17),
    (1.49546743596655651e+00, -1.24767890092467276e-17),
    (1.49616882108738380e+00, 7.25957910206896151e-17),
    (1.49685728913695626e+00, 1.69600762125511713e-17),
    (1.49753319305565724e+00, -7.97586741604944887e-17),
    (1.49819687306440197e+00, 2.66249294030030692e-17),
    (1.49884865723151450e+00, 6.32891347057230044e-17),
    (1.49948886200960629e+00, -8.69233960451104982e-19),
    (1.50011779274429102e+00, -9.06904155436799219e-18),
    (1.50073574415644129e+00, -1.01937039459338933e-16),
    (1.50134300079957450e+00, -5.73416482707638655e-19),
    (1.50193983749385196e+00, 6.06189958407581368e-17),
    (1.50252651973806906e+00, 2.46137435487902548e-17),
    (1.50310330410092807e+00, -1.04816149351053485e-16),
    (1.50367043859279592e+00, -8.89467694426035473e-18),
    (1.50422816301907281e+00, 9.13778153422684716e-18),
    (1.50477670931621987e+00, -5.66966846350420018e-17),
    (1.50531630187143173e+00, 8.04982661956369751e-17),
    (1.50584715782687395e+00, -8.02215463136573207e-17),
    (1.50636948736934317e+00, -1.05533910133197090e-16),
    (1.50688349400616262e+00, -1.97746254909002447e-17),
    (1.50738937482806468e+00, -3.74333793759526117e-17),
    (1.50788732075977139e+00, -6.47588180107808857e-17),
    (1.50837751679893928e+00, -6.60752345087512057e-18),
];

/// Pade numerator `x²·P(x²)` and denominator `Q(x²)` of `atan(x)/x − 1`.
#[rustfmt::skip]
const ATAN_PADE_P: [(f64, f64); 5] = [
    (-3.33333333333333315e-01, -1.85037170770859413e-17),
    (-6.73015873015873067e-01,  5.14579560619913846e-17),
    (-4.46115288220551354e-01, -2.47643732309871997e-17),
    (-1.07355222790870730e-01, -4.09349095801922347e-18),
    (-6.78655300504040025e-03,  2.46790412416351132e-19),
];

#[rustfmt::skip]
const ATAN_PADE_Q: [(f64, f64); 6] = [
    ( 1.00000000000000000e+00,  0.00000000000000000e+00),
    ( 2.61904761904761907e+00, -2.11471052309553615e-17),
    ( 2.48120300751879697e+00,  2.67121329233120356e-17),
    ( 1.02167182662538703e+00, -2.81852284889358614e-17),
    ( 1.70278637770897828e-01,  4.55432045705366093e-18),
    ( 7.85901405096451483e-03,  5.30456047428964134e-19),
];

/// Pade approximant of `atan(z)` for `|z| <= 1/16`.
fn pade_dd(z: DoubleDouble) -> DoubleDouble {
    let z2 = z.sqr();
    let p = z2 * DoubleDouble::horner(z2, &ATAN_PADE_P);
    let q = DoubleDouble::horner(z2, &ATAN_PADE_Q);
    z + z * (p / q)
}

/// Arctangent in double-double.
///
/// With `n = round(8|x|)`, `atan(|x|) = atan(n/8) + atan(z)` for
/// `z = (|x| − n/8)/(1 + |x|·n/8)`, and `|z| <= 1/16` goes through a Pade
/// approximant. Above 16 the reflection `π/2 − atan(1/|x|)` is used.
pub fn arctan_dd(x: DoubleDouble) -> DoubleDouble {
    if x.is_nan() {
        return DoubleDouble::NAN;
    }
    let pi_by_two = DoubleDouble::from_pair(DD_PI_BY_TWO);
    if x.is_infinite() {
        return if x.is_sign_negative() { -pi_by_two } else { pi_by_two };
    }
    if x.hi == 0.0 {
        return x;
    }
    let a = x.abs();
    let out = if a.hi > 16.0 {
        pi_by_two - pade_dd(a.recip())
    } else {
        let n = (8.0 * a.hi).round();
        let v = n * 0.125;
        let z = (a - v) / (a * v).add_f64(1.0);
        DoubleDouble::from_pair(ATAN_N_BY_8[n as usize]) + pade_dd(z)
    };
    if x.is_sign_negative() { -out } else { out }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rel(a: f64, b: f64) -> f64 {
        ((a - b) / b).abs()
    }

    // ── arctan f64 ──

    #[test]
    fn special_values() {
        assert!(arctan_f64(f64::NAN).is_nan());
        assert_eq!(arctan_f64(f64::INFINITY), core::f64::consts::FRAC_PI_2);
        assert_eq!(arctan_f64(f64::NEG_INFINITY), -core::f64::consts::FRAC_PI_2);
        assert_eq!(arctan_f64(0.0).to_bits(), 0);
        assert_eq!(arctan_f64(-0.0).to_bits(), (-0.0_f64).to_bits());
        assert_eq!(arctan_f64(1e-20), 1e-20);
        assert_eq!(arctan_f32(f32::INFINITY), core::f32::consts::FRAC_PI_2);
        assert!(arctan_f32(f32::NAN).is_nan());
    }

    #[test]
    fn matches_core_f64() {
        let mut x = 1e-12_f64;
        while x < 1e12 {
            assert!(rel(arctan_f64(x), x.atan()) < 4.0 * f64::EPSILON, "x = {x}");
            x *= 1.0471;
        }
        assert!(rel(arctan_f64(1.0), core::f64::consts::FRAC_PI_4) < 2.0 * f64::EPSILON);
    }

    #[test]
    fn odd_bitwise() {
        let mut x = 1e-10_f64;
        while x < 1e10 {
            assert_eq!(arctan_f64(-x).to_bits(), (-arctan_f64(x)).to_bits());
            let xf = x as f32;
            assert_eq!(arctan_f32(-xf).to_bits(), (-arctan_f32(xf)).to_bits());
            x *= 1.9;
        }
    }

    #[test]
    fn region_boundaries() {
        for e in -4..=4 {
            let b = 2.0_f64.powi(e);
            let below = arctan_f64(b * (1.0 - f64::EPSILON / 2.0));
            let at = arctan_f64(b);
            assert!(rel(below, at) < 4.0 * f64::EPSILON, "2^{e}");
            assert!(rel(at, b.atan()) < 4.0 * f64::EPSILON, "2^{e}");
        }
    }

    #[test]
    fn monotone_dense() {
        let mut prev = arctan_f64(-40.0);
        let mut x = -40.0_f64;
        while x < 40.0 {
            x += 1.0 / 1024.0;
            let y = arctan_f64(x);
            assert!(y >= prev, "x = {x}");
            prev = y;
        }
    }

    #[test]
    fn matches_core_f32() {
        let mut x = 1e-8_f32;
        while x < 1e8 {
            let r = arctan_f32(x);
            assert!(((r - x.atan()) / x.atan()).abs() < 4.0 * f32::EPSILON, "x = {x}");
            x *= 1.07;
        }
    }

    // ── arctan2 ──

    #[test]
    fn arctan2_quadrants() {
        use core::f64::consts::{FRAC_PI_4, PI};
        assert!(rel(arctan2_f64(1.0, 1.0), FRAC_PI_4) < 2.0 * f64::EPSILON);
        assert!(rel(arctan2_f64(1.0, -1.0), 3.0 * FRAC_PI_4) < 2.0 * f64::EPSILON);
        assert!(rel(arctan2_f64(-1.0, -1.0), -3.0 * FRAC_PI_4) < 2.0 * f64::EPSILON);
        assert!(rel(arctan2_f64(-1.0, 1.0), -FRAC_PI_4) < 2.0 * f64::EPSILON);
        assert!(rel(arctan2_f64(3.0, -4.0), 3.0_f64.atan2(-4.0)) < 2.0 * f64::EPSILON);
        assert!(rel(arctan2_f64(1e-300, -1.0), PI) < f64::EPSILON);
        assert!(rel(arctan2_f32(1.0, -1.0).into(), 2.3561945) < (2.0 * f32::EPSILON).into());
    }

    #[test]
    fn arctan2_zeros_and_infinities() {
        use core::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};
        let inf = f64::INFINITY;
        assert_eq!(arctan2_f64(0.0, 1.0).to_bits(), 0);
        assert_eq!(arctan2_f64(-0.0, 1.0).to_bits(), (-0.0_f64).to_bits());
        assert_eq!(arctan2_f64(0.0, -0.0), PI);
        assert_eq!(arctan2_f64(-0.0, -0.0), -PI);
        assert_eq!(arctan2_f64(0.0, 0.0), 0.0);
        assert_eq!(arctan2_f64(-2.0, 0.0), -FRAC_PI_2);
        assert_eq!(arctan2_f64(inf, inf), FRAC_PI_4);
        assert_eq!(arctan2_f64(-inf, -inf), -3.0 * FRAC_PI_4);
        assert_eq!(arctan2_f64(inf, 5.0), FRAC_PI_2);
        assert_eq!(arctan2_f64(5.0, -inf), PI);
        assert_eq!(arctan2_f64(-5.0, inf).to_bits(), (-0.0_f64).to_bits());
        assert!(arctan2_f64(f64::NAN, 1.0).is_nan());
        assert!(arctan2_f64(inf, f64::NAN).is_nan());
    }

    // ── double-double ──

    #[test]
    fn dd_arctan_one() {
        // atan(1) = π/4
        let r = arctan_dd(DoubleDouble::ONE);
        let want = DoubleDouble::from_pair(DD_PI_BY_TWO).ldexp(-1);
        assert!((r - want).to_f64().abs() < 1e-31);
    }

    #[test]
    fn dd_arctan_matches_f64() {
        let mut x = 1e-5_f64;
        while x < 1e5 {
            let r = arctan_dd(DoubleDouble::from_f64(x));
            assert!(rel(r.to_f64(), x.atan()) < 2.0 * f64::EPSILON, "x = {x}");
            let n = arctan_dd(DoubleDouble::from_f64(-x));
            assert_eq!(n, -r);
            x *= 1.31;
        }
    }

    #[test]
    fn dd_arctan_reflection_consistent() {
        // atan(x) + atan(1/x) = π/2 for x > 0
        let x = DoubleDouble::from_f64(20.0);
        let s = arctan_dd(x) + arctan_dd(x.recip());
        assert!((s - DoubleDouble::from_pair(DD_PI_BY_TWO)).to_f64().abs() < 1e-31);
    }

    #[test]
    fn dd_special_values() {
        assert!(arctan_dd(DoubleDouble::NAN).is_nan());
        assert_eq!(arctan_dd(DoubleDouble::INFINITY).hi, core::f64::consts::FRAC_PI_2);
        assert_eq!(arctan_dd(DoubleDouble::NEG_INFINITY).hi, -core::f64::consts::FRAC_PI_2);
        assert_eq!(arctan_dd(DoubleDouble::ZERO), DoubleDouble::ZERO);
    }
}
