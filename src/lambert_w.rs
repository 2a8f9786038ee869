//! Principal branch `W0` of the Lambert W function, the inverse of `w·e^w`
//! on `[−1/e, ∞)`.
//!
//! Near zero the Maclaurin series and a Pade approximant cover both signs.
//! Next to the branch point `−1/e` the function behaves like a square root
//! and is expanded in `√(x + 1/e)`. The rest of the negative axis is
//! polished by Halley's method. Positive arguments above 1/4 use piecewise
//! rational fits, in `x` up to 18 and in `ln x` beyond.

#![allow(clippy::excessive_precision)]

use log::trace;

use crate::algo::constants::{DD_E, DD_RCPR_E};
use crate::double_double::DoubleDouble;
use crate::exp::{exp_dd, exp_f32, exp_f64};
use crate::ieee754::Ieee754;
use crate::log::{log_f32, log_f64};
use crate::poly::horner_f64;
use crate::roots::halley;
use crate::sqrt::{sqrt_f32, sqrt_f64};

/// `W(x)/x = Σ (−k)^k/(k+1)!·x^k`.
#[rustfmt::skip]
const MACLAURIN: [f64; 11] = [
    1.00000000000000000e+00,  -1.00000000000000000e+00,
    1.50000000000000000e+00,  -2.66666666666666652e+00,
    5.20833333333333304e+00,  -1.08000000000000007e+01,
    2.33430555555555550e+01,  -5.20126984126984127e+01,
    1.18625223214285711e+02,  -2.75573192239858884e+02,
    6.49787172343474481e+02,
];

/// Numerator of the Pade approximant `W(x) ≈ x·P(x)/Q(x)`.
#[rustfmt::skip]
const PADE_P: [f64; 10] = [
    1.0,
    1.0682502565416050016723105546359160380709861862124E+01,
    4.6571964665591139713188203885880491905853395796878E+01,
    1.0645221196874087589402765839192190487117781040351E+02,
    1.3621315458647873063125988415924999885445238071605E+02,
    9.6194426795076224947202936312211557831255938423266E+01,
    3.4212690660831692810057957056825594180703795525921E+01,
    4.7902915867548580879769213470489619147298431970733E+00,
    8.7004781328169727922261553430157539405962610146625E-02,
    -2.3526462504008900307253829870553999017908603231409E-03,
];

#[rustfmt::skip]
const PADE_Q: [f64; 9] = [
    1.0,
    1.1682502565416050016723105546359160380709861862124E+01,
    5.6754467231007189729911309432239652286563257659002E+01,
    1.4834959201829065726552097617128948325334294193599E+02,
    2.2537605259936807001317551097247109802651006779587E+02,
    2.0034496978815222117142763345976687675905641654059E+02,
    9.9324282254815566451544174900199633472503607783434E+01,
    2.4201439090875344909012382876194017492323387287572E+01,
    2.0878375944665185359069024322498319401797520687138E+00,
];

/// Expansion of `W` in `q = √(x + 1/e)` about the branch point.
#[rustfmt::skip]
const NEAR_BRANCH: [f64; 12] = [
    -1.0,
    2.3316439815971242033635360621684008763802362991876,
    -1.8121878856393634902401916475684416651714980624666,
    1.9366311144923597553632774576683830638268857483151,
    -2.3535512018816145168215435615164839701241005150647,
    3.0668589010506319128931489227040074984883898993015,
    -4.1753356002581771388549841774603735734126538575619,
    5.8580237298747741488150538461186213041592413801079,
    -8.4010322175239773709841616885138862868648416074309,
    1.2250753501314460423767939360054731987609556025030E+01,
    -1.8100697012472442755377164038863042726359728131858E+01,
    2.7029044799010561650311482280446256052054836349789E+01,
];

// Rational fits for x >= 1/4. Each piece is `shift + P/Q`, multiplied by
// `x` for the first two and offset by `ln x` for the last four.

#[rustfmt::skip]
const PA: [f64; 7] = [
    1.80340766906685177E-01,  3.28178241493119307E-01,
    -2.19153620687139706E+00,  -7.24750929074563990E+00,
    -7.28395876262524204E+00,  -2.57417169492512916E+00,
    -2.31606948888704503E-01,
];
#[rustfmt::skip]
const QA: [f64; 7] = [
    1.00000000000000000E+00,  7.36482529307436604E+00,
    2.03686007856430677E+01,  2.62864592096657307E+01,
    1.59742041380858333E+01,  4.03760534788374589E+00,
    2.91327346750475362E-01,
];
const A_SHIFT: f64 = 8.19659233093261719E-01;

#[rustfmt::skip]
const PB: [f64; 8] = [
    4.49664083944098322E-01,  1.90417666196776909E+00,
    1.99951368798255994E+00,  -6.91217310299270265E-01,
    -1.88533935998617058E+00,  -7.96743968047750836E-01,
    -1.02891726031055254E-01,  -3.09156013592636568E-03,
];
#[rustfmt::skip]
const QB: [f64; 8] = [
    1.00000000000000000E+00,  6.45854489419584014E+00,
    1.54739232422116048E+01,  1.72606164253337843E+01,
    9.29427055609544096E+00,  2.29040824649748117E+00,
    2.21610620995418981E-01,  5.70597669908194213E-03,
];
const B_SHIFT: f64 = 5.50335884094238281e-01;

#[rustfmt::skip]
const PC: [f64; 8] = [
    -1.16230494982099475E+00,  -3.38528144432561136E+00,
    -2.55653717293161565E+00,  -3.06755172989214189E-01,
    1.73149743765268289E-01,  3.76906042860014206E-02,
    1.84552217624706666E-03,  1.69434126904822116E-05,
];
#[rustfmt::skip]
const QC: [f64; 8] = [
    1.00000000000000000E+00,  3.77187616711220819E+00,
    4.58799960260143701E+00,  2.24101228462292447E+00,
    4.54794195426212385E-01,  3.60761772095963982E-02,
    9.25176499518388571E-04,  4.43611344705509378E-06,
];
const C_SHIFT: f64 = 1.16239356994628906E+00;

#[rustfmt::skip]
const PD: [f64; 9] = [
    -1.80690935424793635E+00,  -3.66995929380314602E+00,
    -1.93842957940149781E+00,  -2.94269984375794040E-01,
    1.81224710627677778E-03,  2.48166798603547447E-03,
    1.15806592415397245E-04,  1.43105573216815533E-06,
    3.47281483428369604E-09,
];
#[rustfmt::skip]
const QD: [f64; 9] = [
    1.00000000000000000E+00,  2.57319080723908597E+00,
    1.96724528442680658E+00,  5.84501352882650722E-01,
    7.37152837939206240E-02,  3.97368430940416778E-03,
    8.54941838187085088E-05,  6.05713225608426678E-07,
    8.17517283816615732E-10,
];
const D_SHIFT: f64 = 1.80937194824218750E+00;

#[rustfmt::skip]
const PE: [f64; 9] = [
    1.97011826279311924E+00,  1.05639945701546704E+00,
    3.33434529073196304E-01,  3.34619153200386816E-02,
    -5.36238353781326675E-03,  -2.43901294871308604E-03,
    -2.13762095619085404E-04,  -4.85531936495542274E-06,
    -2.02473518491905386E-08,
];
#[rustfmt::skip]
const QE: [f64; 9] = [
    1.00000000000000000E+00,  8.60107275833921618E-01,
    4.10420467985504373E-01,  1.18444884081994841E-01,
    2.16966505556021046E-02,  2.24529766630769097E-03,
    9.82045090226437614E-05,  1.36363515125489502E-06,
    3.44200749053237945E-09,
];
const E_SHIFT: f64 = -1.40297317504882812E+00;

#[rustfmt::skip]
const PF: [f64; 9] = [
    3.30547638424076217E+00,  1.64050071277550167E+00,
    4.57149576470736039E-01,  4.03821227745424840E-02,
    -4.99664976882514362E-04,  -1.28527893803052956E-04,
    -2.95470325373338738E-06,  -1.76662025550202762E-08,
    -1.98721972463709290E-11,
];
#[rustfmt::skip]
const QF: [f64; 9] = [
    1.00000000000000000E+00,  6.91472559412458759E-01,
    2.48154578891676774E-01,  4.60893578284335263E-02,
    3.60207838982301946E-03,  1.13001153242430471E-04,
    1.33690948263488455E-06,  4.97253225968548872E-09,
    3.39460723731970550E-12,
];
const F_SHIFT: f64 = -2.73572921752929688E+00;

#[rustfmt::skip]
const PG: [f64; 9] = [
    5.07714858354309672E+00,  -3.32994414518701458E+00,
    -8.61170416909864451E-01,  -4.01139705309486142E-02,
    -1.85374201771834585E-04,  1.08824145844270666E-05,
    1.17216905810452396E-07,  2.97998248101385990E-10,
    1.42294856434176682E-13,
];
#[rustfmt::skip]
const QG: [f64; 9] = [
    1.00000000000000000E+00,  -4.85840770639861485E-01,
    -3.18714850604827580E-01,  -3.20966129264610534E-02,
    -1.06276178044267895E-03,  -1.33597828642644955E-05,
    -6.27900905346219472E-08,  -9.35271498075378319E-11,
    -2.60648331090076845E-14,
];
const G_SHIFT: f64 = -4.01286315917968750E+00;

#[rustfmt::skip]
const PH: [f64; 11] = [
    6.42275660145116698E+00,  1.33047964073367945E+00,
    6.72008923401652816E-02,  1.16444069958125895E-03,
    7.06966760237470501E-06,  5.48974896149039165E-09,
    -7.00379652018853621E-11,  -1.89247635913659556E-13,
    -1.55898770790170598E-16,  -4.06109208815303157E-20,
    -2.21552699006496737E-24,
];
#[rustfmt::skip]
const QH: [f64; 11] = [
    1.00000000000000000E+00,  3.34498588416632854E-01,
    2.51519862456384983E-02,  6.81223810622416254E-04,
    7.94450897106903537E-06,  4.30675039872881342E-08,
    1.10667669458467617E-10,  1.31012240694192289E-13,
    6.53282047177727125E-17,  1.11775518708172009E-20,
    3.78250395617836059E-25,
];
const H_SHIFT: f64 = -5.70115661621093750E+00;


/// Below this `W(x)` rounds to `x`.
const TINY_F64: f64 = f64::EPSILON;
const TINY_F32: f32 = f32::EPSILON;
/// `2^-7`, end of the Maclaurin region.
const MACLAURIN_END: f64 = 0.0078125;
/// `2^-10`, width of the near-branch region in `x + 1/e`.
const NEAR_BRANCH_WIDTH: f64 = 0.0009765625;
/// Halley iteration budget.
const HALLEY_ITERS: u32 = 10;
/// `2^-20`; closer to the branch point the double-double step is skipped.
const DD_BRANCH_GUARD: f64 = 9.5367431640625e-7;

/// `x + 1/e` with `1/e` carried in two parts, so the offset stays accurate
/// when it is tiny. Returns zero exactly when `x` is `−1/e` rounded to `T`
/// and `None` below the branch point.
fn branch_offset<T: Ieee754>(x: T) -> Option<T> {
    let hi = T::from_f64(DD_RCPR_E.0);
    let lo = T::from_f64((DD_RCPR_E.0 - hi.to_f64()) + DD_RCPR_E.1);
    let s = x + hi;
    if s == T::zero() {
        return Some(s);
    }
    let y = s + lo;
    if y < T::zero() { None } else { Some(y) }
}

/// Solves `w − x·e^(−w) = 0` from `w0`. The scaled residual keeps every
/// term bounded for large `w`.
fn halley_polish<T: Ieee754>(x: T, w0: T, exp: fn(T) -> T) -> T {
    let eps = T::epsilon() * w0.abs().max(T::one());
    let w = halley(
        w0,
        |w| w - x * exp(-w),
        |w| T::one() + x * exp(-w),
        |w| -(x * exp(-w)),
        HALLEY_ITERS,
        eps,
    );
    trace!("lambert_w: x = {x:?}, start = {w0:?}, polished = {w:?}");
    w
}

#[inline]
fn ratio(z: f64, p: &[f64], q: &[f64]) -> f64 {
    horner_f64(z, p) / horner_f64(z, q)
}

fn positive_f64(x: f64) -> f64 {
    if x < 0.5 {
        return x * (A_SHIFT + ratio(x, &PA, &QA));
    }
    if x < 2.0 {
        return x * (B_SHIFT + ratio(x, &PB, &QB));
    }
    if x < 6.0 {
        return C_SHIFT + ratio(x, &PC, &QC);
    }
    if x < 18.0 {
        return D_SHIFT + ratio(x, &PD, &QD);
    }
    let l = log_f64(x);
    if l < 9.2 {
        l + E_SHIFT + ratio(l, &PE, &QE)
    } else if l < 32.0 {
        l + F_SHIFT + ratio(l, &PF, &QF)
    } else if l < 100.0 {
        l + G_SHIFT + ratio(l, &PG, &QG)
    } else {
        l + H_SHIFT + ratio(l, &PH, &QH)
    }
}

/// Principal-branch Lambert W. NaN below `−1/e` and at −inf.
pub fn lambert_w_f64(x: f64) -> f64 {
    if x.is_nan_or_inf_bits() {
        if x.is_nan_bits() || x.sign_bit() {
            return f64::NAN;
        }
        return x;
    }
    let a = x.abs();
    if a < TINY_F64 {
        return x;
    }
    if a < MACLAURIN_END {
        return x * horner_f64(x, &MACLAURIN);
    }
    if x < 0.0 {
        if a < 0.0625 {
            return x * ratio(x, &PADE_P, &PADE_Q);
        }
        let Some(y) = branch_offset(x) else {
            return f64::NAN;
        };
        if y == 0.0 {
            return -1.0;
        }
        if y < NEAR_BRANCH_WIDTH {
            return horner_f64(sqrt_f64(y), &NEAR_BRANCH);
        }
        // −1 + p − p²/3 + 11p³/72 with p = √(2e(x + 1/e))
        let p = sqrt_f64(2.0 * DD_E.0 * y);
        let w0 = -1.0 + p * (1.0 + p * (-1.0 / 3.0 + p * (11.0 / 72.0)));
        return halley_polish(x, w0, exp_f64);
    }
    if x < 0.25 {
        return x * ratio(x, &PADE_P, &PADE_Q);
    }
    positive_f64(x)
}

/// Principal-branch Lambert W. NaN below `−1/e` and at −inf.
pub fn lambert_w_f32(x: f32) -> f32 {
    if x.is_nan_or_inf_bits() {
        if x.is_nan_bits() || x.sign_bit() {
            return f32::NAN;
        }
        return x;
    }
    let a = x.abs();
    if a < TINY_F32 {
        return x;
    }
    if a < MACLAURIN_END as f32 {
        return x * horner_f64(x, &MACLAURIN[..5]);
    }
    if x < 0.0 {
        let Some(y) = branch_offset(x) else {
            return f32::NAN;
        };
        if y == 0.0 {
            return -1.0;
        }
        if y < NEAR_BRANCH_WIDTH as f32 {
            return horner_f64(sqrt_f32(y), &NEAR_BRANCH[..6]);
        }
    }
    // Winitzki: W ≈ L·(1 − ln(1 + L)/(2 + L)), L = ln(1 + x)
    let l = log_f32(1.0 + x);
    let w0 = l * (1.0 - log_f32(1.0 + l) / (2.0 + l));
    halley_polish(x, w0, exp_f32)
}

/// Lambert W in double-double: one Halley step from the f64 value.
///
/// Within `2^-20` of the branch point the f64 value is returned as is,
/// since the step divides by `1 + w`.
pub fn lambert_w_dd(x: DoubleDouble) -> DoubleDouble {
    let w0 = lambert_w_f64(x.hi);
    if !w0.is_finite() || x.hi == 0.0 || (w0 + 1.0).abs() < DD_BRANCH_GUARD {
        return DoubleDouble::from_f64(w0);
    }
    let w = DoubleDouble::from_f64(w0);
    let xe = x * exp_dd(-w);
    let f = w - xe;
    let d1 = xe.add_f64(1.0);
    let d2 = -xe;
    let den = d1.sqr().ldexp(1) - f * d2;
    let step = (f * d1).ldexp(1) / den;
    trace!("lambert_w_dd: x = {:e}, step = {:e}", x.hi, step.hi);
    w - step
}
