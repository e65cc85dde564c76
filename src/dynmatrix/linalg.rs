use alloc::vec;
use alloc::vec::Vec;

use num_complex::Complex;
use num_traits::{Float, One, Zero};

use crate::linalg::hessenberg::hessenberg;
use crate::linalg::schur::complex_qr;
use crate::linalg::svd::{absorb_phases, accumulate_left, bidiagonal_qr, bidiagonalize};
use crate::linalg::LinalgError;
use crate::traits::{FloatScalar, LinalgScalar};

use super::vector::DynVector;
use super::DynMatrix;

// ── DynSvd ─────────────────────────────────────────────────────────

/// Thin SVD `A = U · diag(σ) · V^H`, the engine behind both Prony solves.
///
/// For an `M × N` input with `K = min(M, N)`: `U` is `M × K`, `σ` has `K`
/// entries in descending order and `V^H` is `K × N`. Complex input goes
/// through complex Householder reflectors; the bidiagonal phases are then
/// moved into `U` and `V` so the Golub-Kahan sweep runs on real numbers.
/// A wide input is decomposed through its adjoint.
///
/// # Example
///
/// ```
/// use prony::{Complex, DynMatrix};
///
/// // Lag matrix of the geometric sequence 1, i, -1, -i, 1: rank one
/// let z = |re: f64, im: f64| Complex::new(re, im);
/// let a = DynMatrix::from_rows(3, 2, &[
///     z(0.0, 1.0), z(1.0, 0.0),
///     z(-1.0, 0.0), z(0.0, 1.0),
///     z(0.0, -1.0), z(-1.0, 0.0),
/// ]);
/// let svd = a.svd().unwrap();
/// assert_eq!((svd.u().nrows(), svd.u().ncols()), (3, 2));
/// assert_eq!((svd.vt().nrows(), svd.vt().ncols()), (2, 2));
/// assert!((svd.singular_values()[0] - 6.0_f64.sqrt()).abs() < 1e-12);
/// assert!(svd.singular_values()[1] < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct DynSvd<T: LinalgScalar> {
    u: DynMatrix<T>,
    singular_values: Vec<T::Real>,
    vt: DynMatrix<T>,
}

impl<T: LinalgScalar> DynSvd<T> {
    /// Decompose `a`. Fails with [`LinalgError::ConvergenceFailure`] after
    /// `30 · max(M, N)` bidiagonal QR sweeps.
    pub fn new(a: &DynMatrix<T>) -> Result<Self, LinalgError> {
        let m = a.nrows();
        let n = a.ncols();
        let k = m.min(n);

        if k == 0 {
            return Ok(Self {
                u: DynMatrix::zeros(m, k, T::zero()),
                singular_values: Vec::new(),
                vt: DynMatrix::zeros(k, n, T::zero()),
            });
        }

        // A^H = U Σ V^H  ⇒  A = V Σ U^H
        let transposed = m < n;
        let mut work = if transposed { a.adjoint() } else { a.clone() };
        let (rows, cols) = (work.nrows(), work.ncols());

        let mut v_mat = DynMatrix::zeros(cols, cols, T::zero());
        let mut u_mat = DynMatrix::zeros(rows, cols, T::zero());
        let mut diag = vec![T::zero(); cols];
        let mut off_diag = vec![T::zero(); cols];
        let mut tau_left = vec![T::zero(); cols];

        bidiagonalize(&mut work, &mut diag, &mut off_diag, &mut tau_left, &mut v_mat, true);
        accumulate_left(&work, &tau_left, &mut u_mat);

        let mut d = vec![<T::Real as Zero>::zero(); cols];
        let mut e = vec![<T::Real as Zero>::zero(); cols];
        absorb_phases(&mut diag, &mut off_diag, &mut d, &mut e, &mut u_mat, &mut v_mat, true, true);
        bidiagonal_qr::<T>(
            &mut d,
            &mut e[..cols - 1],
            &mut u_mat,
            &mut v_mat,
            true,
            true,
            30 * rows.max(cols),
        )?;

        let (u, vt) = if transposed {
            (v_mat, u_mat.adjoint())
        } else {
            (u_mat, v_mat.adjoint())
        };

        Ok(Self {
            u,
            singular_values: d,
            vt,
        })
    }

    /// `σ`, largest first.
    #[inline]
    pub fn singular_values(&self) -> &[T::Real] {
        &self.singular_values
    }

    /// `U`, `M × K`.
    #[inline]
    pub fn u(&self) -> &DynMatrix<T> {
        &self.u
    }

    /// `V^H`, `K × N`.
    #[inline]
    pub fn vt(&self) -> &DynMatrix<T> {
        &self.vt
    }

    /// Count of singular values strictly above `tol`.
    pub fn rank(&self, tol: T::Real) -> usize {
        self.singular_values.iter().filter(|&&s| s > tol).count()
    }

    /// `σ_max / σ_min`, infinite when `σ_min` is exactly zero.
    pub fn condition_number(&self) -> T::Real {
        condition_number(&self.singular_values)
    }

    /// Default relative cutoff for [`solve_least_squares`](Self::solve_least_squares):
    /// machine epsilon times the larger dimension.
    pub fn default_rcond(&self) -> T::Real {
        let dim = self.u.nrows().max(self.vt.ncols());
        T::lepsilon() * <T::Real as num_traits::NumCast>::from(dim).unwrap_or_else(<T::Real as One>::one)
    }

    /// Minimum-norm least-squares solution of `A x ≈ b`.
    ///
    /// Singular values at or below `rcond · σ_max` are treated as zero, so a
    /// rank-deficient system yields the minimum-norm minimiser instead of an
    /// error. `rcond = None` uses [`default_rcond`](Self::default_rcond).
    pub fn solve_least_squares(&self, b: &DynVector<T>, rcond: Option<T::Real>) -> LeastSquares<T> {
        let m = self.u.nrows();
        let n = self.vt.ncols();
        assert_eq!(b.len(), m, "rhs length {} does not match {} rows", b.len(), m);

        let rcond = rcond.unwrap_or_else(|| self.default_rcond());
        let s_max = self
            .singular_values
            .first()
            .copied()
            .unwrap_or_else(<T::Real as Zero>::zero);
        let cutoff = rcond * s_max;

        let mut x = vec![T::zero(); n];
        let mut rank = 0usize;
        for (k, &s) in self.singular_values.iter().enumerate() {
            if s <= cutoff || s == <T::Real as Zero>::zero() {
                continue;
            }
            rank += 1;
            // (U^H b)_k / σ_k
            let mut coef = T::zero();
            for i in 0..m {
                coef = coef + self.u[(i, k)].conj() * b[i];
            }
            coef = coef / T::from_real(s);
            for (j, xj) in x.iter_mut().enumerate() {
                *xj = *xj + self.vt[(k, j)].conj() * coef;
            }
        }

        LeastSquares {
            solution: DynVector::from_vec(x),
            rank,
            singular_values: self.singular_values.clone(),
        }
    }
}

fn condition_number<R: FloatScalar>(singular_values: &[R]) -> R {
    match (singular_values.first(), singular_values.last()) {
        (Some(&s_max), Some(&s_min)) => {
            if s_min == R::zero() {
                <R as Float>::infinity()
            } else {
                s_max / s_min
            }
        }
        _ => R::one(),
    }
}

/// Outcome of a minimum-norm least-squares solve.
#[derive(Debug, Clone)]
pub struct LeastSquares<T: LinalgScalar> {
    /// Minimiser of `‖A x − b‖₂` with the smallest `‖x‖₂`.
    pub solution: DynVector<T>,
    /// Number of singular values kept above the cutoff.
    pub rank: usize,
    /// Singular values of `A`, sorted descending.
    pub singular_values: Vec<T::Real>,
}

impl<T: LinalgScalar> LeastSquares<T> {
    /// Condition number of `A` (σ_max / σ_min, infinite when rank deficient).
    pub fn condition_number(&self) -> T::Real {
        condition_number(&self.singular_values)
    }

    /// Whether every column of `A` contributed to the solution.
    pub fn is_full_rank(&self) -> bool {
        self.rank == self.singular_values.len()
    }
}

// ── DynSchur ───────────────────────────────────────────────────────

/// Complex Schur decomposition `A = Q S Q^H` of a square complex matrix.
///
/// S is upper triangular with the eigenvalues on its diagonal. Real
/// matrices are handled by promoting them to complex, which avoids the
/// 2×2 blocks of the real Schur form.
///
/// # Example
///
/// ```
/// use prony::DynMatrix;
/// use num_complex::Complex;
///
/// // Rotation by 90°: eigenvalues ±i
/// let z = |re: f64, im: f64| Complex::new(re, im);
/// let a = DynMatrix::from_rows(2, 2, &[z(0.0, 0.0), z(-1.0, 0.0), z(1.0, 0.0), z(0.0, 0.0)]);
/// let mut eig = a.eigenvalues().unwrap();
/// eig.sort_by(|a, b| a.im.partial_cmp(&b.im).unwrap());
/// assert!((eig[0] - z(0.0, -1.0)).norm() < 1e-12);
/// assert!((eig[1] - z(0.0, 1.0)).norm() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct DynSchur<T: FloatScalar> {
    s: DynMatrix<Complex<T>>,
    q: DynMatrix<Complex<T>>,
}

impl<T: FloatScalar> DynSchur<T> {
    /// Compute the complex Schur decomposition.
    pub fn new(a: &DynMatrix<Complex<T>>) -> Result<Self, LinalgError> {
        assert!(a.is_square(), "Schur decomposition requires a square matrix");
        let n = a.nrows();
        let mut s = a.clone();
        let mut q = DynMatrix::eye(n, Complex::zero());

        if n <= 1 {
            return Ok(Self { s, q });
        }

        hessenberg(&mut s, &mut q);
        complex_qr(&mut s, &mut q, 30 * n)?;

        Ok(Self { s, q })
    }

    /// The upper-triangular Schur form S.
    #[inline]
    pub fn schur_form(&self) -> &DynMatrix<Complex<T>> {
        &self.s
    }

    /// The unitary Schur vectors Q.
    #[inline]
    pub fn schur_vectors(&self) -> &DynMatrix<Complex<T>> {
        &self.q
    }

    /// Eigenvalues, in the order they appear on the diagonal of S.
    pub fn eigenvalues(&self) -> Vec<Complex<T>> {
        (0..self.s.nrows()).map(|i| self.s[(i, i)]).collect()
    }
}

// ── Convenience methods on DynMatrix ────────────────────────────────

impl<T: LinalgScalar> DynMatrix<T> {
    /// Thin SVD, see [`DynSvd`].
    pub fn svd(&self) -> Result<DynSvd<T>, LinalgError> {
        DynSvd::new(self)
    }

    /// Minimum-norm least-squares solve of `self · x ≈ b` via SVD.
    ///
    /// ```
    /// use prony::{DynMatrix, DynVector};
    ///
    /// // Over-determined fit of y = 1 + 2x through three exact points
    /// let a = DynMatrix::from_rows(3, 2, &[1.0_f64, 0.0, 1.0, 1.0, 1.0, 2.0]);
    /// let b = DynVector::from_slice(&[1.0, 3.0, 5.0]);
    /// let ls = a.lstsq(&b, None).unwrap();
    /// assert_eq!(ls.rank, 2);
    /// assert!((ls.solution[0] - 1.0).abs() < 1e-12);
    /// assert!((ls.solution[1] - 2.0).abs() < 1e-12);
    /// ```
    pub fn lstsq(&self, b: &DynVector<T>, rcond: Option<T::Real>) -> Result<LeastSquares<T>, LinalgError> {
        assert_eq!(
            b.len(),
            self.nrows(),
            "rhs length {} does not match {} rows",
            b.len(),
            self.nrows()
        );
        Ok(self.svd()?.solve_least_squares(b, rcond))
    }
}

impl<T: FloatScalar> DynMatrix<Complex<T>> {
    /// Complex Schur decomposition: `A = Q S Q^H`.
    pub fn schur(&self) -> Result<DynSchur<T>, LinalgError> {
        DynSchur::new(self)
    }

    /// General (complex) eigenvalues.
    pub fn eigenvalues(&self) -> Result<Vec<Complex<T>>, LinalgError> {
        Ok(self.schur()?.eigenvalues())
    }
}
