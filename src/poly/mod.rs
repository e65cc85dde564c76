//! Complex polynomials with ascending coefficients.
//!
//! `p(x) = c[0] + c[1]·x + … + c[n]·x^n`. Roots come from the eigenvalues
//! of the companion matrix, optionally refined by Newton steps.
//!
//! ```
//! use prony::Polynomial;
//! use num_complex::Complex;
//!
//! // x² − 3x + 2 = (x − 1)(x − 2)
//! let p = Polynomial::new(vec![
//!     Complex::new(2.0_f64, 0.0),
//!     Complex::new(-3.0, 0.0),
//!     Complex::new(1.0, 0.0),
//! ]);
//! let mut roots = p.roots(true, 8).unwrap();
//! roots.sort_by(|a, b| a.re.partial_cmp(&b.re).unwrap());
//! assert!((roots[0] - Complex::new(1.0, 0.0)).norm() < 1e-12);
//! assert!((roots[1] - Complex::new(2.0, 0.0)).norm() < 1e-12);
//! ```

use alloc::vec;
use alloc::vec::Vec;

use num_complex::Complex;
use num_traits::{One, Zero};

use crate::dynmatrix::DynMatrix;
use crate::linalg::LinalgError;
use crate::traits::FloatScalar;

/// Polynomial with complex coefficients in ascending order of power.
#[derive(Debug, Clone, PartialEq)]
pub struct Polynomial<T> {
    coeffs: Vec<Complex<T>>,
}

impl<T: FloatScalar> Polynomial<T> {
    /// Build from ascending coefficients. Zero high-order coefficients are
    /// dropped so the last stored coefficient is the leading one.
    pub fn new(mut coeffs: Vec<Complex<T>>) -> Self {
        while coeffs.len() > 1 && coeffs.last().is_some_and(|c| c.is_zero()) {
            coeffs.pop();
        }
        if coeffs.is_empty() {
            coeffs.push(Complex::zero());
        }
        Self { coeffs }
    }

    /// Monic polynomial of the linear recurrence
    /// `x[k] = d[0]·x[k−1] + d[1]·x[k−2] + … + d[m−1]·x[k−m]`:
    ///
    /// `x^m − d[0]·x^{m−1} − … − d[m−1]`.
    ///
    /// ```
    /// use prony::Polynomial;
    /// use num_complex::Complex;
    ///
    /// let d = [Complex::new(3.0_f64, 0.0), Complex::new(-2.0, 0.0)];
    /// let p = Polynomial::monic_from_recurrence(&d);
    /// let c: Vec<f64> = p.coefficients().iter().map(|z| z.re).collect();
    /// assert_eq!(c, vec![2.0, -3.0, 1.0]);
    /// ```
    pub fn monic_from_recurrence(d: &[Complex<T>]) -> Self {
        let m = d.len();
        let mut coeffs = vec![Complex::zero(); m + 1];
        coeffs[m] = Complex::one();
        for (i, &di) in d.iter().enumerate() {
            coeffs[m - 1 - i] = -di;
        }
        Self { coeffs }
    }

    /// Monic polynomial `∏ (x − r_i)`.
    pub fn from_roots(roots: &[Complex<T>]) -> Self {
        let mut coeffs = vec![Complex::one()];
        for &r in roots {
            let mut next = vec![Complex::zero(); coeffs.len() + 1];
            for (k, &c) in coeffs.iter().enumerate() {
                next[k + 1] = next[k + 1] + c;
                next[k] = next[k] - c * r;
            }
            coeffs = next;
        }
        Self { coeffs }
    }

    /// Degree (index of the leading coefficient). The zero polynomial has degree 0.
    #[inline]
    pub fn degree(&self) -> usize {
        self.coeffs.len() - 1
    }

    /// Ascending coefficients.
    #[inline]
    pub fn coefficients(&self) -> &[Complex<T>] {
        &self.coeffs
    }

    /// Evaluate `p(x)` by Horner's rule.
    pub fn eval(&self, x: Complex<T>) -> Complex<T> {
        self.coeffs
            .iter()
            .rev()
            .fold(Complex::zero(), |acc, &c| acc * x + c)
    }

    /// Evaluate `(p(x), p'(x))` in a single Horner pass.
    pub fn eval_with_derivative(&self, x: Complex<T>) -> (Complex<T>, Complex<T>) {
        let mut p = Complex::zero();
        let mut dp = Complex::zero();
        for &c in self.coeffs.iter().rev() {
            dp = dp * x + p;
            p = p * x + c;
        }
        (p, dp)
    }

    /// Companion matrix whose characteristic polynomial is `p / c_n`.
    ///
    /// First row `−c[n−1]/c[n], …, −c[0]/c[n]`, ones on the subdiagonal.
    pub fn companion(&self) -> DynMatrix<Complex<T>> {
        let n = self.degree();
        let lead = self.coeffs[n];
        let mut c = DynMatrix::zeros(n, n, Complex::zero());
        for j in 0..n {
            c[(0, j)] = -self.coeffs[n - 1 - j] / lead;
        }
        for i in 1..n {
            c[(i, i - 1)] = Complex::one();
        }
        c
    }

    /// All `degree()` roots, with multiplicity.
    ///
    /// Zero low-order coefficients are split off first and reported as exact
    /// zero roots at the end of the list. The remaining roots are the
    /// eigenvalues of the companion matrix. With `polish` set, each root is
    /// refined by up to `max_iter` Newton steps, keeping only steps that
    /// reduce `|p(z)|`.
    pub fn roots(&self, polish: bool, max_iter: usize) -> Result<Vec<Complex<T>>, LinalgError> {
        let n = self.degree();
        if n == 0 {
            return Ok(Vec::new());
        }

        let zeros = self.coeffs.iter().take_while(|c| c.is_zero()).count();
        let reduced = Self {
            coeffs: self.coeffs[zeros..].to_vec(),
        };

        let mut roots = match reduced.degree() {
            0 => Vec::new(),
            1 => vec![-reduced.coeffs[0] / reduced.coeffs[1]],
            _ => reduced.companion().eigenvalues()?,
        };

        if polish {
            for r in roots.iter_mut() {
                *r = reduced.polish(*r, max_iter);
            }
        }

        tracing::trace!(degree = n, zero_roots = zeros, "polynomial roots");

        roots.extend(core::iter::repeat(Complex::zero()).take(zeros));
        Ok(roots)
    }

    /// Newton refinement of a single root.
    fn polish(&self, mut z: Complex<T>, max_iter: usize) -> Complex<T> {
        let eps = T::epsilon();
        let (mut pz, _) = self.eval_with_derivative(z);
        for _ in 0..max_iter {
            if pz.is_zero() {
                break;
            }
            let (_, dpz) = self.eval_with_derivative(z);
            if dpz.is_zero() {
                break;
            }
            let delta = pz / dpz;
            let candidate = z - delta;
            let pc = self.eval(candidate);
            if !(pc.re.is_finite() && pc.im.is_finite()) || pc.norm() >= pz.norm() {
                break;
            }
            z = candidate;
            pz = pc;
            if delta.norm() <= eps * z.norm() {
                break;
            }
        }
        z
    }
}
