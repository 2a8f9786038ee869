//! Core types shared by the classifier, the evaluators and the solvers.

use core::fmt;

/// IEEE-754 classification of a floating-point value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FpClass {
    /// Positive or negative zero.
    Zero,
    /// Nonzero value with a zero exponent field.
    Subnormal,
    /// Finite value with an exponent field strictly between zero and all-ones.
    Normal,
    /// Positive or negative infinity.
    Infinite,
    /// Quiet or signalling NaN.
    Nan,
}

/// Sign, unbiased exponent and integer significand of a finite nonzero value.
///
/// The value equals `±mantissa · 2^(exponent − MANTISSA_BITS)` and the
/// mantissa always carries its leading bit at position `MANTISSA_BITS`,
/// so subnormal inputs come back renormalized with an exponent below
/// the normal range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Decomposed {
    /// Sign bit of the value.
    pub negative: bool,
    /// Unbiased base-2 exponent of the leading significand bit.
    pub exponent: i32,
    /// Significand with the implicit bit made explicit.
    pub mantissa: u64,
}

/// How an iterative solver stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RootStatus {
    /// `|x_{n+1} − x_n| <= eps` was reached.
    Converged,
    /// The iteration budget ran out; the root is the last estimate.
    MaxIterations,
    /// The step denominator vanished; the root is NaN.
    Singular,
}

/// Result of a solver run, returned by the `_with_status` functions
/// (e.g., [`halley_with_status`](crate::roots::halley_with_status)).
///
/// The plain [`newton`](crate::roots::newton) and
/// [`halley`](crate::roots::halley) functions return only the root and
/// signal a vanished denominator through NaN.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RootResult<T> {
    /// Final estimate, NaN when `status` is [`RootStatus::Singular`].
    pub root: T,
    /// Number of steps taken.
    pub iterations: u32,
    /// Why the iteration stopped.
    pub status: RootStatus,
}

/// Iteration budget and tolerance for the solvers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IterConfig<T> {
    /// Maximum number of steps.
    pub max_iters: u32,
    /// Absolute step tolerance.
    pub eps: T,
}

impl<T: crate::machine::MachineFloat> Default for IterConfig<T> {
    /// Sixteen steps with a tolerance of four machine epsilons.
    fn default() -> Self {
        IterConfig {
            max_iters: 16,
            eps: T::MACH_EPSILON * T::from_f64(4.0),
        }
    }
}

/// Error type for APIs that validate caller input.
///
/// Numerical functions never return this; they follow the IEEE-754
/// convention of NaN for domain errors and ±inf for range errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Error {
    /// Invalid input (e.g., empty coefficient slice, NaN or negative tolerance).
    InvalidArgument,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidArgument => {
                write!(f, "invalid argument: check coefficients and tolerance")
            }
        }
    }
}

impl core::error::Error for Error {}
