use alloc::vec::Vec;
use core::ops::{Index, IndexMut};

use crate::traits::{LinalgScalar, Scalar};

use super::DynMatrix;

/// Runtime-length vector: right-hand sides and solutions of the
/// least-squares solves.
///
/// Stored as a single-row [`DynMatrix`], indexed by one `usize`.
///
/// ```
/// use prony::{Complex, DynVector};
///
/// let v = DynVector::from_slice(&[Complex::new(3.0_f64, 0.0), Complex::new(0.0, 4.0)]);
/// assert_eq!(v.len(), 2);
/// assert_eq!(v[1].im, 4.0);
/// assert!((v.norm() - 5.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DynVector<T> {
    inner: DynMatrix<T>,
}

impl<T: Scalar> DynVector<T> {
    /// Copy from a slice.
    pub fn from_slice(data: &[T]) -> Self {
        Self::from_vec(data.to_vec())
    }

    /// Wrap an owned `Vec` without copying.
    pub fn from_vec(data: Vec<T>) -> Self {
        let n = data.len();
        Self {
            inner: DynMatrix::from_vec(1, n, data),
        }
    }

    /// Length-`n` zero vector. `_zero` only pins the element type.
    pub fn zeros(n: usize, _zero: T) -> Self {
        Self {
            inner: DynMatrix::zeros(1, n, T::zero()),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.inner.ncols()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bilinear product `Σ x_i·y_i`, without conjugation.
    pub fn dot(&self, rhs: &Self) -> T {
        assert_eq!(
            self.len(),
            rhs.len(),
            "dot of vectors with lengths {} and {}",
            self.len(),
            rhs.len()
        );
        self.as_slice()
            .iter()
            .zip(rhs.as_slice())
            .fold(T::zero(), |acc, (&a, &b)| acc + a * b)
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        self.inner.as_slice()
    }

    /// Unwrap into the element `Vec`.
    pub fn into_vec(self) -> Vec<T> {
        self.inner.data
    }
}

impl<T: LinalgScalar> DynVector<T> {
    /// Euclidean norm `sqrt(Σ |x_i|²)`, always real.
    pub fn norm(&self) -> T::Real {
        self.as_slice()
            .iter()
            .fold(<T::Real as num_traits::Zero>::zero(), |acc, &x| {
                acc + (x * x.conj()).re()
            })
            .lsqrt()
    }
}

impl<T> Index<usize> for DynVector<T> {
    type Output = T;

    #[inline]
    fn index(&self, i: usize) -> &T {
        &self.inner[(0, i)]
    }
}

impl<T> IndexMut<usize> for DynVector<T> {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut T {
        &mut self.inner[(0, i)]
    }
}
