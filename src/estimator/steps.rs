use alloc::vec::Vec;

use num_complex::Complex;
use num_traits::{One, Zero};

use crate::dynmatrix::{DynMatrix, DynVector, LeastSquares};
use crate::linalg::LinalgError;
use crate::poly::Polynomial;
use crate::traits::FloatScalar;

use super::PronyError;

/// Linear-prediction system for order `m`.
///
/// Returns the `(N−m)×m` matrix `A` whose column `j` is
/// `f[m−1−j .. N−1−j]`, and the right-hand side `f[m .. N]`, so that row `r`
/// reads `Σ_j A[r, j]·d_j ≈ f[m + r]`.
///
/// # Panics
///
/// If `m == 0` or `m >= f.len()`.
pub fn lag_matrix<T: FloatScalar>(
    f: &[Complex<T>],
    m: usize,
) -> (DynMatrix<Complex<T>>, DynVector<Complex<T>>) {
    let n = f.len();
    assert!(m >= 1 && m < n, "order {} out of range for {} samples", m, n);
    let rows = n - m;
    let a = DynMatrix::from_fn(rows, m, |r, j| f[m - 1 - j + r]);
    let rhs = DynVector::from_slice(&f[m..]);
    (a, rhs)
}

/// Minimum-norm least-squares solution of the prediction system `A·d ≈ rhs`.
///
/// Rank deficiency (order larger than the number of modes present, or
/// `N − m < m`) is not an error; the returned [`LeastSquares::rank`] shows it.
pub fn prediction_coefficients<T: FloatScalar>(
    a: &DynMatrix<Complex<T>>,
    rhs: &DynVector<Complex<T>>,
    rcond: Option<T>,
) -> Result<LeastSquares<Complex<T>>, LinalgError> {
    a.lstsq(rhs, rcond)
}

/// Monic characteristic polynomial of the prediction coefficients:
/// `c_m = 1`, `c_{m−i} = −d_{i−1}`.
pub fn characteristic_polynomial<T: FloatScalar>(d: &[Complex<T>]) -> Polynomial<T> {
    Polynomial::monic_from_recurrence(d)
}

/// Continuous exponents `b_i = ln(u_i) / Δt` (principal logarithm).
///
/// A root that is exactly zero has no logarithm and yields
/// [`PronyError::DegenerateRoot`] with its index.
pub fn exponents<T: FloatScalar>(
    roots: &[Complex<T>],
    dt: Complex<T>,
) -> Result<Vec<Complex<T>>, PronyError> {
    roots
        .iter()
        .enumerate()
        .map(|(index, u)| {
            if u.is_zero() {
                Err(PronyError::DegenerateRoot { index })
            } else {
                Ok(u.ln() / dt)
            }
        })
        .collect()
}

/// `n × m` Vandermonde matrix `B[k, i] = u_i^k`.
pub fn vandermonde<T: FloatScalar>(roots: &[Complex<T>], n: usize) -> DynMatrix<Complex<T>> {
    let mut b = DynMatrix::zeros(n, roots.len(), Complex::zero());
    for (i, &u) in roots.iter().enumerate() {
        let mut p = Complex::one();
        for k in 0..n {
            b[(k, i)] = p;
            p = p * u;
        }
    }
    b
}

/// Least-squares amplitudes `a` with `B·a ≈ f`.
pub fn amplitudes<T: FloatScalar>(
    b: &DynMatrix<Complex<T>>,
    f: &[Complex<T>],
    rcond: Option<T>,
) -> Result<LeastSquares<Complex<T>>, LinalgError> {
    b.lstsq(&DynVector::from_slice(f), rcond)
}
