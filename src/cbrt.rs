//! Cube root.
//!
//! Same reduction as [`sqrt`](crate::sqrt): `m = (1 + k/128)·t`, with
//! `∛(1+k/128)` from a table and `∛t` from a short series. The exponent is
//! split as `e = 3q + r` with `r ∈ {0, 1, 2}` and contributes
//! `2^q · 2^(r/3)`.

#![allow(clippy::excessive_precision)]

use crate::algo::constants::{CBRT_2, CBRT_4};
use crate::algo::reduce::{RCPR_1P_K128, table_index};
use crate::double_double::DoubleDouble;
use crate::ieee754::{Ieee754, base2_mant_and_exp, ldexp};
use crate::poly::horner_f64;

/// Taylor series of `∛(1+d)`.
#[rustfmt::skip]
const CBRT_1P_SERIES: [f64; 5] = [
    1.0,                      3.33333333333333333e-01,
    -1.11111111111111111e-01, 6.17283950617283951e-02,
    -4.11522633744855967e-02,
];

const CBRT_EXPONENT_FACTOR: [f64; 3] = [1.0, CBRT_2, CBRT_4];

/// cbrt(1 + k/128) for k = 0, 1, ..., 127.
#[rustfmt::skip]
const CBRT_1P_K128: [f64; 128] = [
    1.00000000000000000e+00,  1.00259741426460014e+00,
    1.00518143964726447e+00,  1.00775224736432256e+00,
    1.01031000515554759e+00,  1.01285487738048663e+00,
    1.01538702511141987e+00,  1.01790660622308993e+00,
    1.02041377547933698e+00,  1.02290868461676876e+00,
    1.02539148242558698e+00,  1.02786231482768620e+00,
    1.03032132495213924e+00,  1.03276865320816880e+00,
    1.03520443735571321e+00,  1.03762881257367545e+00,
    1.04004191152595205e+00,  1.04244386442532577e+00,
    1.04483479909530796e+00,  1.04721484103000706e+00,
    1.04958411345210201e+00,  1.05194273736899113e+00,
    1.05429083162718662e+00,  1.05662851296502014e+00,
    1.05895589606372331e+00,  1.06127309359694344e+00,
    1.06358021627875154e+00,  1.06587737291019979e+00,
    1.06816467042447916e+00,  1.07044221393072991e+00,
    1.07271010675655187e+00,  1.07496845048926137e+00,
    1.07721734501594191e+00,  1.07945688856232636e+00,
    1.08168717773055634e+00,  1.08390830753585510e+00,
    1.08612037144215301e+00,  1.08832346139670144e+00,
    1.09051766786370941e+00,  1.09270307985703607e+00,
    1.09487978497197225e+00,  1.09704786941614096e+00,
    1.09920741803954480e+00,  1.10135851436379228e+00,
    1.10350124061052601e+00,  1.10563567772908300e+00,
    1.10776190542340847e+00,  1.10988000217825089e+00,
    1.11199004528465784e+00,  1.11409211086479876e+00,
    1.11618627389613434e+00,  1.11827260823495234e+00,
    1.12035118663929123e+00,  1.12242208079127215e+00,
    1.12448536131885368e+00,  1.12654109781703227e+00,
    1.12858935886850031e+00,  1.13063021206378433e+00,
    1.13266372402087323e+00,  1.13468996040435655e+00,
    1.13670898594408598e+00,  1.13872086445337350e+00,
    1.14072565884674160e+00,  1.14272343115723896e+00,
    1.14471424255333187e+00,  1.14669815335538772e+00,
    1.14867522305175984e+00,  1.15064551031448614e+00,
    1.15260907301461168e+00,  1.15456596823714963e+00,
    1.15651625229568555e+00,  1.15845998074663958e+00,
    1.16039720840319482e+00,  1.16232798934890003e+00,
    1.16425237695095896e+00,  1.16617042387321068e+00,
    1.16808218208881498e+00,  1.16998770289264464e+00,
    1.17188703691339957e+00,  1.17378023412544374e+00,
    1.17566734386037886e+00,  1.17754841481835504e+00,
    1.17942349507913335e+00,  1.18129263211289981e+00,
    1.18315587279084222e+00,  1.18501326339549351e+00,
    1.18686484963085004e+00,  1.18871067663226881e+00,
    1.19055078897614952e+00,  1.19238523068940983e+00,
    1.19421404525875419e+00,  1.19603727563974815e+00,
    1.19785496426569593e+00,  1.19966715305633298e+00,
    1.20147388342633321e+00,  1.20327519629363855e+00,
    1.20507113208761507e+00,  1.20686173075703729e+00,
    1.20864703177790989e+00,  1.21042707416112605e+00,
    1.21220189645996990e+00,  1.21397153677746417e+00,
    1.21573603277357001e+00,  1.21749542167223979e+00,
    1.21924974026832844e+00,  1.22099902493436430e+00,
    1.22274331162718708e+00,  1.22448263589445183e+00,
    1.22621703288100425e+00,  1.22794653733512993e+00,
    1.22967118361468208e+00,  1.23139100569308702e+00,
    1.23310603716523515e+00,  1.23481631125325420e+00,
    1.23652186081217530e+00,  1.23822271833548503e+00,
    1.23991891596057524e+00,  1.24161048547408592e+00,
    1.24329745831714766e+00,  1.24497986559052487e+00,
    1.24665773805966151e+00,  1.24833110615963205e+00,
    1.25000000000000000e+00,  1.25166444936958587e+00,
    1.25332448374114613e+00,  1.25498013227596661e+00,
    1.25663142382836979e+00,  1.25827838695014127e+00,
];

fn cbrt_kernel<T: Ieee754>(x: T, rcpr: &[T; 128], table: &[T; 128], terms: usize) -> T {
    if x == T::zero() || x.is_nan_or_inf_bits() {
        return x;
    }
    let (m, e) = base2_mant_and_exp(x.abs());
    let k = table_index(m, 7);
    let d = m * rcpr[k] - T::one();
    let w = horner_f64(d, &CBRT_1P_SERIES[..terms]) * table[k];
    let w = w * T::from_f64(CBRT_EXPONENT_FACTOR[e.rem_euclid(3) as usize]);
    let w = ldexp(w, e.div_euclid(3));
    if x.sign_bit() { -w } else { w }
}

/// Cube root. Odd; ±0, ±inf and NaN return the input.
///
/// Evaluated as [`cbrt_f64`] and rounded once, so the result is within
/// half an ulp plus about `1e-15` relative.
pub fn cbrt_f32(x: f32) -> f32 {
    cbrt_f64(f64::from(x)) as f32
}

/// Cube root. Odd; ±0, ±inf and NaN return the input.
///
/// Finishes with one Newton step `(2y + x/y²)/3`.
pub fn cbrt_f64(x: f64) -> f64 {
    let y = cbrt_kernel(x, &RCPR_1P_K128, &CBRT_1P_K128, 5);
    if y == 0.0 || y.is_nan_or_inf_bits() {
        return y;
    }
    (2.0 * y + x / (y * y)) / 3.0
}

/// Cube root in double-double: one Newton step from the f64 root,
/// carried out in double-double.
pub fn cbrt_dd(x: DoubleDouble) -> DoubleDouble {
    let y = cbrt_f64(x.hi);
    if y == 0.0 || !y.is_finite() {
        return DoubleDouble::from_f64(y);
    }
    // y + (x - y³)/(3y²)
    let y2 = DoubleDouble::from_prod(y, y);
    let r = x - y2 * y;
    DoubleDouble::from_f64(y) + r / (y2 * 3.0)
}
