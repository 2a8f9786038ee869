//! Newton and Halley root polishing.
//!
//! The plain drivers return the root alone and report a vanished step
//! denominator as NaN. The `_with_status` variants take an [`IterConfig`]
//! and say why the iteration stopped.

use log::debug;
use num_traits::Float;

use crate::types::{Error, IterConfig, RootResult, RootStatus};

/// One outcome of the shared iteration loop.
struct Outcome<T> {
    root: T,
    iterations: u32,
    status: RootStatus,
}

fn iterate<T, S>(x0: T, max_iters: u32, eps: T, step: S) -> Outcome<T>
where
    T: Float,
    S: Fn(T) -> Option<T>,
{
    let mut x = x0;
    for n in 1..=max_iters {
        let Some(dx) = step(x) else {
            debug!("root polish: zero denominator after {} steps", n - 1);
            return Outcome {
                root: T::nan(),
                iterations: n,
                status: RootStatus::Singular,
            };
        };
        x = x - dx;
        if dx.abs() <= eps {
            return Outcome {
                root: x,
                iterations: n,
                status: RootStatus::Converged,
            };
        }
    }
    debug!("root polish: no convergence in {max_iters} steps");
    Outcome {
        root: x,
        iterations: max_iters,
        status: RootStatus::MaxIterations,
    }
}

fn newton_step<T: Float>(x: T, f: &impl Fn(T) -> T, df: &impl Fn(T) -> T) -> Option<T> {
    let d = df(x);
    if d == T::zero() {
        return None;
    }
    Some(f(x) / d)
}

fn halley_step<T: Float>(
    x: T,
    f: &impl Fn(T) -> T,
    df: &impl Fn(T) -> T,
    d2f: &impl Fn(T) -> T,
) -> Option<T> {
    let fx = f(x);
    let d1 = df(x);
    let d2 = d2f(x);
    let two = T::one() + T::one();
    let den = two * d1 * d1 - fx * d2;
    if den == T::zero() {
        return None;
    }
    Some(two * fx * d1 / den)
}

fn check_eps<T: Float>(eps: T) -> Result<(), Error> {
    if eps.is_nan() || eps < T::zero() {
        return Err(Error::InvalidArgument);
    }
    Ok(())
}

/// Newton's method `x ← x − f(x)/f'(x)`.
///
/// Stops when a step is at most `eps` in magnitude and returns the
/// updated estimate, or returns the last estimate after `max_iters`
/// steps. A zero derivative returns NaN.
pub fn newton<T, F, D>(x0: T, f: F, df: D, max_iters: u32, eps: T) -> T
where
    T: Float,
    F: Fn(T) -> T,
    D: Fn(T) -> T,
{
    iterate(x0, max_iters, eps, |x| newton_step(x, &f, &df)).root
}

/// Halley's method `x ← x − 2ff'/(2f'² − ff'')`.
///
/// Same stopping rules as [`newton`]; cubic convergence near a simple root.
pub fn halley<T, F, D, D2>(x0: T, f: F, df: D, d2f: D2, max_iters: u32, eps: T) -> T
where
    T: Float,
    F: Fn(T) -> T,
    D: Fn(T) -> T,
    D2: Fn(T) -> T,
{
    iterate(x0, max_iters, eps, |x| halley_step(x, &f, &df, &d2f)).root
}

/// [`newton`] with an iteration budget and a stop reason.
///
/// # Errors
///
/// [`Error::InvalidArgument`] when `cfg.eps` is NaN or negative.
pub fn newton_with_status<T, F, D>(
    x0: T,
    f: F,
    df: D,
    cfg: IterConfig<T>,
) -> Result<RootResult<T>, Error>
where
    T: Float,
    F: Fn(T) -> T,
    D: Fn(T) -> T,
{
    check_eps(cfg.eps)?;
    let out = iterate(x0, cfg.max_iters, cfg.eps, |x| newton_step(x, &f, &df));
    Ok(RootResult {
        root: out.root,
        iterations: out.iterations,
        status: out.status,
    })
}

/// [`halley`] with an iteration budget and a stop reason.
///
/// # Errors
///
/// [`Error::InvalidArgument`] when `cfg.eps` is NaN or negative.
pub fn halley_with_status<T, F, D, D2>(
    x0: T,
    f: F,
    df: D,
    d2f: D2,
    cfg: IterConfig<T>,
) -> Result<RootResult<T>, Error>
where
    T: Float,
    F: Fn(T) -> T,
    D: Fn(T) -> T,
    D2: Fn(T) -> T,
{
    check_eps(cfg.eps)?;
    let out = iterate(x0, cfg.max_iters, cfg.eps, |x| {
        halley_step(x, &f, &df, &d2f)
    });
    Ok(RootResult {
        root: out.root,
        iterations: out.iterations,
        status: out.status,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SQRT_2: f64 = core::f64::consts::SQRT_2;

    // ── newton tests ──

    #[test]
    fn newton_sqrt2() {
        let r = newton(1.0_f64, |x| x * x - 2.0, |x| 2.0 * x, 20, 1e-14);
        assert!((r - SQRT_2).abs() < 1e-15);
    }

    #[test]
    fn newton_terminates_within_ten_steps() {
        let cfg = IterConfig { max_iters: 50, eps: 1e-15 };
        let r = newton_with_status(3.0_f64, |x| x * x * x - 5.0, |x| 3.0 * x * x, cfg).unwrap();
        assert_eq!(r.status, RootStatus::Converged);
        assert!(r.iterations <= 10, "took {}", r.iterations);
        assert!((r.root - 5.0_f64.cbrt()).abs() < 1e-15);
    }

    #[test]
    fn newton_quadratic_convergence() {
        // Errors of successive iterates shrink roughly as e_{n+1} ≈ C e_n².
        let mut x = 1.0_f64;
        let mut errs = [0.0; 4];
        for e in errs.iter_mut() {
            x = newton(x, |x| x * x - 2.0, |x| 2.0 * x, 1, 0.0);
            *e = (x - SQRT_2).abs();
        }
        // e1 = 0.0858, e2 = 0.00245, e3 = 2.1e-6
        assert!(errs[1] < errs[0] * errs[0]);
        assert!(errs[2] < errs[1] * errs[1]);
    }

    #[test]
    fn newton_zero_derivative_is_nan() {
        let r = newton(0.0_f64, |x| x * x + 1.0, |x| 2.0 * x, 10, 1e-12);
        assert!(r.is_nan());
        let r = newton_with_status(0.0_f64, |x| x * x + 1.0, |x| 2.0 * x, IterConfig::default())
            .unwrap();
        assert_eq!(r.status, RootStatus::Singular);
        assert!(r.root.is_nan());
    }

    #[test]
    fn newton_budget_exhausted() {
        let cfg = IterConfig { max_iters: 2, eps: 0.0 };
        let r = newton_with_status(100.0_f64, |x| x * x - 2.0, |x| 2.0 * x, cfg).unwrap();
        assert_eq!(r.status, RootStatus::MaxIterations);
        assert_eq!(r.iterations, 2);
        assert!(r.root.is_finite());
    }

    // ── halley tests ──

    #[test]
    fn halley_sqrt2_converges_fast() {
        let cfg = IterConfig { max_iters: 20, eps: 1e-14 };
        let r = halley_with_status(1.0_f64, |x| x * x - 2.0, |x| 2.0 * x, |_| 2.0, cfg).unwrap();
        assert_eq!(r.status, RootStatus::Converged);
        assert!(r.iterations <= 5, "took {}", r.iterations);
        assert!((r.root - 1.4142135623730951).abs() < 1e-15);

        let plain = halley(1.0_f64, |x| x * x - 2.0, |x| 2.0 * x, |_| 2.0, 20, 1e-14);
        assert_eq!(plain, r.root);
    }

    #[test]
    fn halley_f32() {
        let r = halley(1.0_f32, |x| x * x - 2.0, |x| 2.0 * x, |_| 2.0, 20, 1e-6);
        assert!((r - core::f32::consts::SQRT_2).abs() < 1e-6);
    }

    #[test]
    fn invalid_tolerance() {
        let bad = IterConfig { max_iters: 5, eps: -1.0_f64 };
        assert_eq!(
            halley_with_status(1.0, |x| x, |_| 1.0, |_| 0.0, bad),
            Err(Error::InvalidArgument)
        );
        let bad = IterConfig { max_iters: 5, eps: f64::NAN };
        assert_eq!(
            newton_with_status(1.0, |x| x, |_| 1.0, bad),
            Err(Error::InvalidArgument)
        );
    }
}
