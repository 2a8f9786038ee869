//! Pure Rust elementary and special functions with bit-level IEEE-754 control.
//!
//! Every function is written out from polynomial and rational approximants,
//! table-driven argument reduction and Newton/Halley polishing, without
//! calling the platform libm for the function itself.
//!
//! - Elementary: [`sqrt_f64`], [`cbrt_f64`], [`exp_f64`], [`cosh_f64`],
//!   [`log_f64`], [`arctan_f64`], [`arcsin_f64`], [`arccos_f64`],
//!   [`arctan2_f64`], [`hypot_f64`], [`hypot3_f64`], [`abs_f64`],
//!   [`copysign_f64`].
//! - Special: [`erf_f64`], [`bessel_j0_f64`], [`bessel_i0_f64`],
//!   [`lambert_w_f64`], the Fresnel integrals [`fresnel_sin_f64`],
//!   [`fresnel_cos_f64`] and their normalized forms.
//!
//! Each comes in `_f32` and `_f64` form. The elementary functions other
//! than the inverse-trigonometric and hypot family, and Lambert W, also come
//! in double-double form (`_dd`, about 106 bits, see [`DoubleDouble`]). The
//! [`Real`] and [`Special`] traits and the generic functions such as
//! [`log()`] select the precision from the argument type.
//!
//! # Example
//!
//! ```
//! use specfun::{DoubleDouble, lambert_w_f64, log, log_f64};
//!
//! assert_eq!(log(2.0_f64), log_f64(2.0));
//! let w = lambert_w_f64(1.0);
//! assert!((w * w.exp() - 1.0).abs() < 1e-15);
//! let ln2 = log(DoubleDouble::from_f64(2.0));
//! assert!((ln2.hi - core::f64::consts::LN_2).abs() <= f64::EPSILON);
//! ```
//!
//! # Special values
//!
//! Domain errors return NaN and range errors ±inf. Numerical functions never
//! return `Result`; only APIs that validate caller input do
//! ([`poly::eval_with_derivatives`], [`roots::newton_with_status`],
//! [`roots::halley_with_status`]).
//!
//! # Features
//!
//! - `std` (default): hardware FMA in [`compensated::two_prod_fma`] and
//!   `num-traits/std`.
//! - `alloc`: [`poly::derivatives`], which returns a `Vec`.
//!
//! Without `std` the crate is `no_std` and math fallbacks come from `libm`
//! through `num-traits`.
//!
//! # Logging
//!
//! Solver diagnostics go through the [`log`](https://docs.rs/log) facade:
//! `debug!` when a root polish stops without converging, `trace!` per
//! Lambert W polish. No logger is installed.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "alloc")]
extern crate alloc;

pub mod abs;
pub(crate) mod algo;
pub mod arcsin;
pub mod arctan;
pub mod bessel_i0;
pub mod bessel_j0;
pub mod cbrt;
pub mod compensated;
pub mod double_double;
pub mod erf;
pub mod exp;
pub mod fresnel;
pub mod hypot;
pub mod ieee754;
pub mod lambert_w;
pub mod log;
pub mod machine;
pub mod poly;
pub mod real;
pub mod roots;
pub mod sqrt;
pub mod types;

pub use abs::{abs_dd, abs_f32, abs_f64, copysign_dd, copysign_f32, copysign_f64};
pub use arcsin::{arccos_f32, arccos_f64, arcsin_f32, arcsin_f64};
pub use arctan::{arctan_dd, arctan_f32, arctan_f64, arctan2_f32, arctan2_f64};
pub use bessel_i0::{bessel_i0_f32, bessel_i0_f64};
pub use bessel_j0::{bessel_j0_f32, bessel_j0_f64};
pub use cbrt::{cbrt_dd, cbrt_f32, cbrt_f64};
pub use double_double::DoubleDouble;
pub use erf::{erf_f32, erf_f64};
pub use exp::{cosh_dd, cosh_f32, cosh_f64, exp_dd, exp_f32, exp_f64};
pub use fresnel::{
    fresnel_cos_f32, fresnel_cos_f64, fresnel_sin_f32, fresnel_sin_f64, normalized_fresnel_cos_f32,
    normalized_fresnel_cos_f64, normalized_fresnel_sin_f32, normalized_fresnel_sin_f64,
};
pub use hypot::{hypot_f32, hypot_f64, hypot3_f32, hypot3_f64};
pub use ieee754::{Ieee754, base2_mant_and_exp, ldexp};
pub use lambert_w::{lambert_w_dd, lambert_w_f32, lambert_w_f64};
pub use self::log::{log_dd, log_f32, log_f64};
pub use machine::MachineFloat;
pub use real::{
    Real, Special, abs, arccos, arcsin, arctan, arctan2, bessel_i0, bessel_j0, cbrt, classify,
    copysign, cosh, erf, exp, fresnel_cos, fresnel_sin, hypot, hypot3, lambert_w, log,
    normalized_fresnel_cos, normalized_fresnel_sin, sqrt,
};
pub use roots::{halley, halley_with_status, newton, newton_with_status};
pub use sqrt::{sqrt_dd, sqrt_f32, sqrt_f64};
pub use types::{Decomposed, Error, FpClass, IterConfig, RootResult, RootStatus};
