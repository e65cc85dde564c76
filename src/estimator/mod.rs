//! Prony's method: fit `F(t) ≈ Σ a_i·exp(b_i·(t − t₀))` to uniformly spaced
//! complex samples.
//!
//! The fit runs in three linear-algebra steps, each exposed as a pure
//! function so it can be inspected or reused on its own:
//!
//! 1. [`lag_matrix`] + [`prediction_coefficients`] — minimum-norm least
//!    squares for the linear-prediction coefficients `d`
//! 2. [`characteristic_polynomial`] + [`Polynomial::roots`](crate::Polynomial::roots)
//!    — roots `u_i` of `x^m − d₀x^{m−1} − … − d_{m−1}`, then [`exponents`]
//!    `b_i = ln(u_i) / Δt`
//! 3. [`vandermonde`] + [`amplitudes`] — least squares for `a` against
//!    `B[k, i] = u_i^k`
//!
//! [`prony`] runs the whole pipeline with [`PronySettings`] and returns a
//! [`PronyFit`] carrying the diagnostics of both solves. [`estimate`] is the
//! plain `(a, b)` form with default settings.
//!
//! # Example
//!
//! ```
//! use prony::{estimate, Complex};
//!
//! // Two damped modes sampled at 50 points on [0, 10]
//! let t: Vec<Complex<f64>> = (0..50)
//!     .map(|k| Complex::new(10.0 * k as f64 / 49.0, 0.0))
//!     .collect();
//! let f: Vec<Complex<f64>> = t
//!     .iter()
//!     .map(|&t| (Complex::new(-2.0, 2.0) * t).exp() + (Complex::new(-6.0, 5.0) * t).exp() * 0.2)
//!     .collect();
//!
//! let (a, b) = estimate(&t, &f, 2).unwrap();
//! let slow = if b[0].re > b[1].re { 0 } else { 1 };
//! assert!((b[slow] - Complex::new(-2.0, 2.0)).norm() < 1e-8);
//! assert!((a[slow] - Complex::new(1.0, 0.0)).norm() < 1e-8);
//! ```

mod fit;
mod steps;

#[cfg(test)]
mod tests;

pub use fit::{estimate, prony, Mode, PronyFit};
pub use steps::{
    amplitudes, characteristic_polynomial, exponents, lag_matrix, prediction_coefficients,
    vandermonde,
};

use crate::linalg::LinalgError;

/// Errors from a Prony fit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PronyError {
    /// Time and value sequences have different lengths.
    LengthMismatch { times: usize, values: usize },
    /// Model order is zero.
    ZeroOrder,
    /// Model order is not smaller than the number of samples.
    OrderTooLarge { order: usize, samples: usize },
    /// A time or value sample is NaN or infinite.
    NonFinite,
    /// The first two time samples coincide.
    ZeroSpacing,
    /// A sample interval departs from the first one by more than the
    /// configured relative tolerance.
    NonUniformSpacing { index: usize, deviation: f64 },
    /// A characteristic root is exactly zero, so its exponent is undefined.
    DegenerateRoot { index: usize },
    /// An SVD or Schur iteration failed.
    Linalg(LinalgError),
}

impl core::fmt::Display for PronyError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            PronyError::LengthMismatch { times, values } => {
                write!(f, "{} time samples but {} values", times, values)
            }
            PronyError::ZeroOrder => write!(f, "model order must be at least 1"),
            PronyError::OrderTooLarge { order, samples } => write!(
                f,
                "model order {} must be less than the number of samples ({})",
                order, samples
            ),
            PronyError::NonFinite => write!(f, "input contains NaN or infinity"),
            PronyError::ZeroSpacing => write!(f, "first two time samples coincide"),
            PronyError::NonUniformSpacing { index, deviation } => write!(
                f,
                "time step after sample {} deviates from the first step by {:.3e} (relative)",
                index, deviation
            ),
            PronyError::DegenerateRoot { index } => {
                write!(f, "characteristic root {} is zero", index)
            }
            PronyError::Linalg(e) => write!(f, "linear algebra failure: {}", e),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for PronyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PronyError::Linalg(e) => Some(e),
            _ => None,
        }
    }
}

impl From<LinalgError> for PronyError {
    fn from(e: LinalgError) -> Self {
        PronyError::Linalg(e)
    }
}

/// What to do when the time samples are not uniformly spaced.
///
/// Only `t₁ − t₀` enters the exponents, so a non-uniform grid silently
/// biases the fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpacingPolicy {
    /// Do not inspect the grid.
    Ignore,
    /// Log the first offending interval and fit anyway.
    #[default]
    Warn,
    /// Fail with [`PronyError::NonUniformSpacing`].
    Reject,
}

/// Settings for [`prony`].
#[derive(Debug, Clone, Copy)]
pub struct PronySettings<T> {
    /// Relative singular-value cutoff for both least-squares solves.
    /// `None` uses machine epsilon times the larger matrix dimension.
    pub rcond: Option<T>,
    /// Handling of non-uniform time grids.
    pub spacing: SpacingPolicy,
    /// Relative tolerance on `|Δt_k − Δt₀| / |Δt₀|`.
    pub spacing_tolerance: T,
    /// Refine characteristic roots with Newton steps.
    pub polish_roots: bool,
    /// Maximum Newton steps per root.
    pub max_polish_iter: usize,
}

impl Default for PronySettings<f64> {
    fn default() -> Self {
        Self {
            rcond: None,
            spacing: SpacingPolicy::Warn,
            spacing_tolerance: 1e-4,
            polish_roots: true,
            max_polish_iter: 8,
        }
    }
}

impl Default for PronySettings<f32> {
    fn default() -> Self {
        Self {
            rcond: None,
            spacing: SpacingPolicy::Warn,
            spacing_tolerance: 1e-3,
            polish_roots: true,
            max_polish_iter: 8,
        }
    }
}
