//! # prony
//!
//! Prony's method in pure Rust: fit a sum of damped complex exponentials
//! `F(t) ≈ Σ a_i·exp(b_i·t)` to uniformly sampled complex data. Used to
//! extract quasinormal-mode frequencies from ringdown time series.
//!
//! ## Quick start
//!
//! ```
//! use prony::{prony, Complex, PronySettings};
//!
//! let t: Vec<Complex<f64>> = (0..40).map(|k| Complex::new(0.1 * k as f64, 0.0)).collect();
//! let f: Vec<Complex<f64>> = t.iter().map(|&t| (Complex::new(-0.5, 3.0) * t).exp() * 2.0).collect();
//!
//! let fit = prony(&t, &f, 1, &PronySettings::default()).unwrap();
//! assert!((fit.exponents[0] - Complex::new(-0.5, 3.0)).norm() < 1e-10);
//! assert!((fit.amplitudes[0] - Complex::new(2.0, 0.0)).norm() < 1e-10);
//! ```
//!
//! ## Modules
//!
//! - [`estimator`] — Prony's method: [`estimate`], [`prony()`] with
//!   [`PronySettings`] / [`PronyFit`], and each pipeline step as a pure
//!   function (lag matrix, prediction coefficients, characteristic
//!   polynomial, exponents, Vandermonde matrix, amplitudes).
//!
//! - [`dynmatrix`] — Heap-allocated `DynMatrix<T>` with runtime dimensions,
//!   column-major `Vec<T>` storage. Implements [`MatrixRef`] / [`MatrixMut`],
//!   so the [`linalg`] free functions work on it directly. [`DynVector<T>`]
//!   for single-index access. [`DynSvd`] (thin SVD, tall or wide, real or
//!   complex) with minimum-norm least squares, and [`DynSchur`] (complex
//!   Schur form) for general eigenvalues.
//!
//! - [`linalg`] — In-place kernels: Householder bidiagonalization with
//!   Golub-Kahan QR, Hessenberg reduction, single-shift complex QR.
//!
//! - [`poly`] — [`Polynomial<T>`] with complex coefficients: Horner
//!   evaluation, companion matrix, roots with Newton polishing.
//!
//! - [`io`] — Four-column sample files and the synthetic reference signal
//!   (requires `std`).
//!
//! - [`traits`] — Element trait hierarchy:
//!   - [`Scalar`] — all matrix elements (`Copy + PartialEq + Debug + Zero + One + Num`)
//!   - [`FloatScalar`] — real floats (`Scalar + Float`)
//!   - [`LinalgScalar`] — real floats and complex numbers, used by decompositions and norms
//!   - [`MatrixRef`] / [`MatrixMut`] — generic read/write access for algorithms
//!
//! ## Logging
//!
//! The estimator emits [`tracing`] events (`debug` for fit progress and rank
//! deficiency, `warn` for uneven time grids and non-unique amplitudes).
//! Install any subscriber to see them; the `prony` binary uses
//! `tracing-subscriber`.
//!
//! ## Cargo features
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `std`   | yes     | Hardware FPU via system libm, `std::error::Error` impls, [`io`] |
//! | `libm`  | no      | Pure-Rust float fallback for `no_std` builds |
//! | `cli`   | no      | The `prony` command-line binary |

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod dynmatrix;
pub mod estimator;
#[cfg(feature = "std")]
pub mod io;
pub mod linalg;
pub mod poly;
pub mod traits;

pub use dynmatrix::{DynMatrix, DynSchur, DynSvd, DynVector, LeastSquares};
pub use estimator::{
    estimate, prony, Mode, PronyError, PronyFit, PronySettings, SpacingPolicy,
};
pub use linalg::LinalgError;
pub use poly::Polynomial;
pub use traits::{FloatScalar, LinalgScalar, MatrixMut, MatrixRef, Scalar};

pub use num_complex::Complex;
