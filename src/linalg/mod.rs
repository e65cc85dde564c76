//! In-place dense kernels behind [`DynSvd`](crate::DynSvd) and
//! [`DynSchur`](crate::DynSchur).
//!
//! The free functions operate on `&mut impl MatrixMut<T>` and work for both
//! real floats and `Complex<T>` elements.

pub(crate) mod hessenberg;
pub(crate) mod schur;
pub(crate) mod svd;

pub use hessenberg::hessenberg;
pub use schur::complex_qr;

use num_traits::{Float, Zero};

/// Errors from linear algebra operations.
///
/// ```
/// use prony::linalg::LinalgError;
///
/// let e = LinalgError::ConvergenceFailure;
/// assert_eq!(e.to_string(), "iterative algorithm did not converge");
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LinalgError {
    /// Iterative algorithm did not converge within the iteration budget.
    ConvergenceFailure,
}

impl core::fmt::Display for LinalgError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            LinalgError::ConvergenceFailure => write!(f, "iterative algorithm did not converge"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for LinalgError {}

/// Real Givens rotation `(c, s)` with `c*a + s*b = r`, `-s*a + c*b = 0`.
#[inline]
pub(crate) fn givens<R: Float + Zero>(a: R, b: R) -> (R, R) {
    if b == R::zero() {
        (R::one(), R::zero())
    } else if b.abs() > a.abs() {
        let t = a / b;
        let s = R::one() / (R::one() + t * t).sqrt();
        (s * t, s)
    } else {
        let t = b / a;
        let c = R::one() / (R::one() + t * t).sqrt();
        (c, c * t)
    }
}
