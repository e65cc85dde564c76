use alloc::vec;
use core::ops::Mul;

use crate::traits::{LinalgScalar, Scalar};

use super::vector::DynVector;
use super::DynMatrix;

// ── Matrix multiplication: (M×N) * (N×P) → (M×P) ──────────────────

impl<T: Scalar> Mul for DynMatrix<T> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        &self * &rhs
    }
}

impl<T: Scalar> Mul<&DynMatrix<T>> for &DynMatrix<T> {
    type Output = DynMatrix<T>;

    fn mul(self, rhs: &DynMatrix<T>) -> DynMatrix<T> {
        assert_eq!(
            self.ncols, rhs.nrows,
            "dimension mismatch: {}x{} * {}x{}",
            self.nrows, self.ncols, rhs.nrows, rhs.ncols,
        );
        let m = self.nrows;
        let n = self.ncols;
        let p = rhs.ncols;
        let mut data = vec![T::zero(); m * p];
        // Column-major: walk columns of the result, axpy columns of `self`.
        for j in 0..p {
            for k in 0..n {
                let b_kj = rhs.data[j * n + k];
                for i in 0..m {
                    data[j * m + i] = data[j * m + i] + self.data[k * m + i] * b_kj;
                }
            }
        }
        DynMatrix {
            data,
            nrows: m,
            ncols: p,
        }
    }
}

impl<T: Scalar> DynMatrix<T> {
    /// Matrix-vector product `A x`.
    ///
    /// ```
    /// use prony::{DynMatrix, DynVector};
    /// let a = DynMatrix::from_rows(2, 2, &[1.0, 2.0, 3.0, 4.0]);
    /// let y = a.mul_vec(&DynVector::from_slice(&[1.0, 1.0]));
    /// assert_eq!(y.as_slice(), &[3.0, 7.0]);
    /// ```
    pub fn mul_vec(&self, x: &DynVector<T>) -> DynVector<T> {
        assert_eq!(
            self.ncols,
            x.len(),
            "dimension mismatch: {}x{} * vector of length {}",
            self.nrows,
            self.ncols,
            x.len(),
        );
        let mut out = vec![T::zero(); self.nrows];
        for (k, &xk) in x.as_slice().iter().enumerate() {
            let col = &self.data[k * self.nrows..(k + 1) * self.nrows];
            for (o, &a) in out.iter_mut().zip(col) {
                *o = *o + a * xk;
            }
        }
        DynVector::from_vec(out)
    }

    /// Transpose: (M×N) → (N×M).
    pub fn transpose(&self) -> Self {
        DynMatrix::from_fn(self.ncols, self.nrows, |i, j| self[(j, i)])
    }
}

impl<T: LinalgScalar> DynMatrix<T> {
    /// Conjugate transpose `A^H`: (M×N) → (N×M).
    ///
    /// Identical to [`transpose`](Self::transpose) for real element types.
    pub fn adjoint(&self) -> Self {
        DynMatrix::from_fn(self.ncols, self.nrows, |i, j| self[(j, i)].conj())
    }
}
