//! Heap-allocated matrices and vectors with runtime dimensions.
//!
//! Every system the estimator builds (lag matrix, Vandermonde matrix,
//! companion matrix) has a size known only at run time, so all dense storage
//! lives here, together with the [`DynSvd`] and [`DynSchur`] wrappers.

mod linalg;
mod ops;
mod vector;

pub use linalg::{DynSchur, DynSvd, LeastSquares};
pub use vector::DynVector;

use alloc::vec;
use alloc::vec::Vec;
use core::ops::{Index, IndexMut};

use crate::traits::{MatrixMut, MatrixRef, Scalar};

/// Column-major matrix of runtime size.
///
/// Element `(i, j)` lives at `data[j * nrows + i]`, so every column tail is
/// a contiguous slice for the Householder kernels in [`crate::linalg`].
///
/// # Examples
///
/// ```
/// use prony::{Complex, DynMatrix};
///
/// // Powers of a root down a column
/// let u = Complex::new(0.0_f64, 1.0);
/// let b = DynMatrix::from_fn(4, 1, |k, _| u.powi(k as i32));
/// assert_eq!(b[(2, 0)], Complex::new(-1.0, 0.0));
/// assert_eq!((b.nrows(), b.ncols()), (4, 1));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DynMatrix<T> {
    data: Vec<T>,
    nrows: usize,
    ncols: usize,
}

impl<T: Scalar> DynMatrix<T> {
    /// All-zero `nrows × ncols` matrix. `_zero` only pins the element type.
    ///
    /// ```
    /// use prony::DynMatrix;
    /// let z = DynMatrix::zeros(3, 2, 0.0_f32);
    /// assert!(z.as_slice().iter().all(|&x| x == 0.0));
    /// ```
    pub fn zeros(nrows: usize, ncols: usize, _zero: T) -> Self {
        Self {
            data: vec![T::zero(); nrows * ncols],
            nrows,
            ncols,
        }
    }

    /// `n × n` identity.
    pub fn eye(n: usize, zero: T) -> Self {
        let mut m = Self::zeros(n, n, zero);
        for i in 0..n {
            m[(i, i)] = T::one();
        }
        m
    }

    /// Build from a row-major slice (the order matrices are written in
    /// source code).
    ///
    /// # Panics
    ///
    /// If `row_major.len() != nrows * ncols`.
    ///
    /// ```
    /// use prony::DynMatrix;
    /// let m = DynMatrix::from_rows(2, 3, &[1, 2, 3, 4, 5, 6]);
    /// assert_eq!(m[(1, 0)], 4);
    /// assert_eq!(m.as_slice(), &[1, 4, 2, 5, 3, 6]);
    /// ```
    pub fn from_rows(nrows: usize, ncols: usize, row_major: &[T]) -> Self {
        assert_eq!(
            row_major.len(),
            nrows * ncols,
            "{} elements given for a {}x{} matrix",
            row_major.len(),
            nrows,
            ncols,
        );
        Self::from_fn(nrows, ncols, |i, j| row_major[i * ncols + j])
    }

    /// Take ownership of column-major storage.
    ///
    /// # Panics
    ///
    /// If `data.len() != nrows * ncols`.
    pub fn from_vec(nrows: usize, ncols: usize, data: Vec<T>) -> Self {
        assert_eq!(
            data.len(),
            nrows * ncols,
            "{} elements given for a {}x{} matrix",
            data.len(),
            nrows,
            ncols,
        );
        Self { data, nrows, ncols }
    }
}

impl<T> DynMatrix<T> {
    #[inline]
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    #[inline]
    pub fn ncols(&self) -> usize {
        self.ncols
    }

    #[inline]
    pub fn is_square(&self) -> bool {
        self.nrows == self.ncols
    }

    /// Fill column by column from `f(row, col)`.
    pub fn from_fn(nrows: usize, ncols: usize, f: impl Fn(usize, usize) -> T) -> Self {
        let data = (0..ncols)
            .flat_map(|j| (0..nrows).map(move |i| (i, j)))
            .map(|(i, j)| f(i, j))
            .collect();
        Self { data, nrows, ncols }
    }

    /// Raw column-major storage.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    #[inline]
    fn offset(&self, row: usize, col: usize) -> usize {
        debug_assert!(row < self.nrows && col < self.ncols);
        col * self.nrows + row
    }
}

impl<T> MatrixRef<T> for DynMatrix<T> {
    #[inline]
    fn nrows(&self) -> usize {
        self.nrows
    }

    #[inline]
    fn ncols(&self) -> usize {
        self.ncols
    }

    #[inline]
    fn get(&self, row: usize, col: usize) -> &T {
        &self.data[self.offset(row, col)]
    }

    #[inline]
    fn col_as_slice(&self, col: usize, row_start: usize) -> &[T] {
        let base = col * self.nrows;
        &self.data[base + row_start..base + self.nrows]
    }
}

impl<T> MatrixMut<T> for DynMatrix<T> {
    #[inline]
    fn get_mut(&mut self, row: usize, col: usize) -> &mut T {
        let k = self.offset(row, col);
        &mut self.data[k]
    }

    #[inline]
    fn col_as_mut_slice(&mut self, col: usize, row_start: usize) -> &mut [T] {
        let base = col * self.nrows;
        &mut self.data[base + row_start..base + self.nrows]
    }
}

impl<T> Index<(usize, usize)> for DynMatrix<T> {
    type Output = T;

    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &T {
        &self.data[self.offset(row, col)]
    }
}

impl<T> IndexMut<(usize, usize)> for DynMatrix<T> {
    #[inline]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        let k = self.offset(row, col);
        &mut self.data[k]
    }
}
