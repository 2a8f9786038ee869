//! Table-driven mantissa reduction shared by `sqrt` and `cbrt`.
//!
//! A mantissa `m` in `[1, 2)` is written `m = (1 + k/128)·t` where `k` is
//! the integer formed by the top seven fraction bits of `m`, which puts
//! `t` in `[1, 1 + 1/128)`.

#![allow(clippy::excessive_precision)]

use crate::ieee754::Ieee754;

/// Index `k` of the largest `1 + k/2^bits` not above the mantissa of `m`.
#[inline]
pub(crate) fn table_index<T: Ieee754>(m: T, bits: u32) -> usize {
    (m.mantissa_bits() >> (T::MANTISSA_BITS - bits)) as usize
}

/// 128 / (128 + k) for k = 0, 1, ..., 127.
#[rustfmt::skip]
pub(crate) const RCPR_1P_K128: [f64; 128] = [
    1.00000000000000000e+00,  9.92248062015503862e-01,
    9.84615384615384670e-01,  9.77099236641221336e-01,
    9.69696969696969724e-01,  9.62406015037593932e-01,
    9.55223880597014907e-01,  9.48148148148148184e-01,
    9.41176470588235281e-01,  9.34306569343065663e-01,
    9.27536231884057982e-01,  9.20863309352518034e-01,
    9.14285714285714257e-01,  9.07801418439716290e-01,
    9.01408450704225372e-01,  8.95104895104895104e-01,
    8.88888888888888840e-01,  8.82758620689655160e-01,
    8.76712328767123239e-01,  8.70748299319727859e-01,
    8.64864864864864913e-01,  8.59060402684563740e-01,
    8.53333333333333388e-01,  8.47682119205298013e-01,
    8.42105263157894690e-01,  8.36601307189542509e-01,
    8.31168831168831224e-01,  8.25806451612903225e-01,
    8.20512820512820484e-01,  8.15286624203821697e-01,
    8.10126582278481000e-01,  8.05031446540880546e-01,
    8.00000000000000044e-01,  7.95031055900621064e-01,
    7.90123456790123413e-01,  7.85276073619631920e-01,
    7.80487804878048808e-01,  7.75757575757575757e-01,
    7.71084337349397630e-01,  7.66467065868263520e-01,
    7.61904761904761862e-01,  7.57396449704141994e-01,
    7.52941176470588225e-01,  7.48538011695906391e-01,
    7.44186046511627897e-01,  7.39884393063583778e-01,
    7.35632183908045967e-01,  7.31428571428571428e-01,
    7.27272727272727293e-01,  7.23163841807909602e-01,
    7.19101123595505598e-01,  7.15083798882681587e-01,
    7.11111111111111138e-01,  7.07182320441988921e-01,
    7.03296703296703352e-01,  6.99453551912568305e-01,
    6.95652173913043459e-01,  6.91891891891891930e-01,
    6.88172043010752743e-01,  6.84491978609625629e-01,
    6.80851063829787218e-01,  6.77248677248677211e-01,
    6.73684210526315774e-01,  6.70157068062827266e-01,
    6.66666666666666630e-01,  6.63212435233160646e-01,
    6.59793814432989678e-01,  6.56410256410256410e-01,
    6.53061224489795866e-01,  6.49746192893400965e-01,
    6.46464646464646520e-01,  6.43216080402010060e-01,
    6.40000000000000013e-01,  6.36815920398009938e-01,
    6.33663366336633671e-01,  6.30541871921182273e-01,
    6.27450980392156854e-01,  6.24390243902439024e-01,
    6.21359223300970820e-01,  6.18357487922705285e-01,
    6.15384615384615419e-01,  6.12440191387559785e-01,
    6.09523809523809579e-01,  6.06635071090047440e-01,
    6.03773584905660354e-01,  6.00938967136150248e-01,
    5.98130841121495282e-01,  5.95348837209302317e-01,
    5.92592592592592560e-01,  5.89861751152073732e-01,
    5.87155963302752326e-01,  5.84474885844748826e-01,
    5.81818181818181790e-01,  5.79185520361991002e-01,
    5.76576576576576572e-01,  5.73991031390134521e-01,
    5.71428571428571397e-01,  5.68888888888888888e-01,
    5.66371681415929196e-01,  5.63876651982378907e-01,
    5.61403508771929793e-01,  5.58951965065502154e-01,
    5.56521739130434789e-01,  5.54112554112554112e-01,
    5.51724137931034475e-01,  5.49356223175965663e-01,
    5.47008547008547064e-01,  5.44680851063829796e-01,
    5.42372881355932202e-01,  5.40084388185653963e-01,
    5.37815126050420145e-01,  5.35564853556485310e-01,
    5.33333333333333326e-01,  5.31120331950207469e-01,
    5.28925619834710758e-01,  5.26748971193415683e-01,
    5.24590163934426257e-01,  5.22448979591836782e-01,
    5.20325203252032575e-01,  5.18218623481781382e-01,
    5.16129032258064502e-01,  5.14056224899598346e-01,
    5.12000000000000011e-01,  5.09960159362549792e-01,
    5.07936507936507908e-01,  5.05928853754940677e-01,
    5.03937007874015741e-01,  5.01960784313725483e-01,
];

/// 128 / (128 + k) for k = 0, 1, ..., 127.
#[rustfmt::skip]
pub(crate) const RCPR_1P_K128_F32: [f32; 128] = [
    1.000000000e+00,  9.922480583e-01,  9.846153855e-01,  9.770992398e-01,
    9.696969986e-01,  9.624060392e-01,  9.552238584e-01,  9.481481314e-01,
    9.411764741e-01,  9.343065619e-01,  9.275362492e-01,  9.208633304e-01,
    9.142857194e-01,  9.078013897e-01,  9.014084339e-01,  8.951048851e-01,
    8.888888955e-01,  8.827586174e-01,  8.767123222e-01,  8.707482815e-01,
    8.648648858e-01,  8.590604067e-01,  8.533333540e-01,  8.476821184e-01,
    8.421052694e-01,  8.366013169e-01,  8.311688304e-01,  8.258064389e-01,
    8.205128312e-01,  8.152866364e-01,  8.101266026e-01,  8.050314188e-01,
    8.000000119e-01,  7.950310707e-01,  7.901234627e-01,  7.852760553e-01,
    7.804877758e-01,  7.757575512e-01,  7.710843086e-01,  7.664670944e-01,
    7.619047761e-01,  7.573964596e-01,  7.529411912e-01,  7.485380173e-01,
    7.441860437e-01,  7.398843765e-01,  7.356321812e-01,  7.314285636e-01,
    7.272727489e-01,  7.231638432e-01,  7.191011310e-01,  7.150837779e-01,
    7.111111283e-01,  7.071823478e-01,  7.032967210e-01,  6.994535327e-01,
    6.956521869e-01,  6.918919086e-01,  6.881720424e-01,  6.844919920e-01,
    6.808510423e-01,  6.772486567e-01,  6.736842394e-01,  6.701570749e-01,
    6.666666865e-01,  6.632124186e-01,  6.597937942e-01,  6.564102769e-01,
    6.530612111e-01,  6.497461796e-01,  6.464646459e-01,  6.432160735e-01,
    6.399999857e-01,  6.368159056e-01,  6.336633563e-01,  6.305418611e-01,
    6.274510026e-01,  6.243902445e-01,  6.213592291e-01,  6.183574796e-01,
    6.153846383e-01,  6.124401689e-01,  6.095238328e-01,  6.066350937e-01,
    6.037735939e-01,  6.009389758e-01,  5.981308222e-01,  5.953488350e-01,
    5.925925970e-01,  5.898617506e-01,  5.871559381e-01,  5.844748616e-01,
    5.818181634e-01,  5.791855454e-01,  5.765765905e-01,  5.739910603e-01,
    5.714285970e-01,  5.688889027e-01,  5.663716793e-01,  5.638766289e-01,
    5.614035130e-01,  5.589519739e-01,  5.565217137e-01,  5.541125536e-01,
    5.517241359e-01,  5.493562222e-01,  5.470085740e-01,  5.446808338e-01,
    5.423728824e-01,  5.400843620e-01,  5.378151536e-01,  5.355648398e-01,
    5.333333611e-01,  5.311203599e-01,  5.289255977e-01,  5.267489552e-01,
    5.245901346e-01,  5.224489570e-01,  5.203251839e-01,  5.182186365e-01,
    5.161290169e-01,  5.140562057e-01,  5.120000243e-01,  5.099601746e-01,
    5.079365373e-01,  5.059288740e-01,  5.039370060e-01,  5.019608140e-01,
];
