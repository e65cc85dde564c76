use core::fmt::Debug;
use num_complex::Complex;
use num_traits::{Float, Num, One, Zero};

/// Element type of a [`DynMatrix`](crate::DynMatrix): plain arithmetic, nothing more.
pub trait Scalar: Copy + PartialEq + Debug + Zero + One + Num {}

impl<T: Copy + PartialEq + Debug + Zero + One + Num> Scalar for T {}

/// `f32` or `f64`: the precision that sample times, tolerances and
/// singular values are carried in.
pub trait FloatScalar: Scalar + Float + LinalgScalar<Real = Self> {}

impl<T: Scalar + Float + LinalgScalar<Real = T>> FloatScalar for T {}

/// Element type accepted by the SVD and the least-squares solver.
///
/// Implemented for `f32`, `f64` and `Complex<f32>`, `Complex<f64>`. The
/// Householder and Givens kernels only ever touch elements through these
/// methods, so one code path handles both real and complex samples.
pub trait LinalgScalar: Scalar {
    /// Precision of the modulus and of singular values.
    type Real: FloatScalar;

    /// `|z|`.
    fn modulus(self) -> Self::Real;

    /// `z̄`; a no-op on reals.
    fn conj(self) -> Self;

    fn re(self) -> Self::Real;

    /// Principal square root.
    fn lsqrt(self) -> Self;

    /// Unit roundoff of [`Self::Real`].
    fn lepsilon() -> Self::Real;

    /// Embed a real value (zero imaginary part).
    fn from_real(r: Self::Real) -> Self;
}

macro_rules! impl_linalg_scalar_real {
    ($($t:ty),*) => {
        $(
            impl LinalgScalar for $t {
                type Real = $t;

                #[inline] fn modulus(self) -> $t { Float::abs(self) }
                #[inline] fn conj(self) -> $t { self }
                #[inline] fn re(self) -> $t { self }
                #[inline] fn lsqrt(self) -> $t { Float::sqrt(self) }
                #[inline] fn lepsilon() -> $t { <$t as Float>::epsilon() }
                #[inline] fn from_real(r: $t) -> $t { r }
            }
        )*
    };
}

impl_linalg_scalar_real!(f32, f64);

impl<T: FloatScalar> LinalgScalar for Complex<T> {
    type Real = T;

    #[inline]
    fn modulus(self) -> T {
        self.norm()
    }

    #[inline]
    fn conj(self) -> Self {
        Complex::conj(&self)
    }

    #[inline]
    fn re(self) -> T {
        self.re
    }

    #[inline]
    fn lsqrt(self) -> Self {
        self.sqrt()
    }

    #[inline]
    fn lepsilon() -> T {
        T::epsilon()
    }

    #[inline]
    fn from_real(r: T) -> Self {
        Complex::new(r, T::zero())
    }
}

/// Element and column access used by the in-place kernels.
pub trait MatrixRef<T> {
    fn nrows(&self) -> usize;
    fn ncols(&self) -> usize;
    fn get(&self, row: usize, col: usize) -> &T;

    /// Rows `row_start..` of column `col`, contiguous in column-major storage.
    fn col_as_slice(&self, col: usize, row_start: usize) -> &[T];
}

/// Write access for reflector and rotation updates.
pub trait MatrixMut<T>: MatrixRef<T> {
    fn get_mut(&mut self, row: usize, col: usize) -> &mut T;

    /// Mutable counterpart of [`MatrixRef::col_as_slice`].
    fn col_as_mut_slice(&mut self, col: usize, row_start: usize) -> &mut [T];
}
