use crate::linalg::LinalgError;
use crate::traits::{FloatScalar, MatrixMut, MatrixRef};
use num_complex::Complex;
use num_traits::Zero;

#[inline]
fn g<T: Copy>(m: &impl MatrixRef<T>, i: usize, j: usize) -> T {
    *m.get(i, j)
}

/// Complex Givens rotation `G = [[c, s], [-conj(s), c]]` with real `c`,
/// chosen so that `G · [x, y]^T = [r, 0]^T`.
#[inline]
fn complex_givens<T: FloatScalar>(x: Complex<T>, y: Complex<T>) -> (T, Complex<T>) {
    let ay = y.norm();
    if ay == T::zero() {
        return (T::one(), Complex::zero());
    }
    let ax = x.norm();
    if ax == T::zero() {
        return (T::zero(), y.conj() / ay);
    }
    let r = ax.hypot(ay);
    (ax / r, (x / ax) * y.conj() / r)
}

/// Eigenvalue of the 2×2 block `[[a, b], [c, d]]` closest to `d`.
#[inline]
fn wilkinson_shift<T: FloatScalar>(
    a: Complex<T>,
    b: Complex<T>,
    c: Complex<T>,
    d: Complex<T>,
) -> Complex<T> {
    let half = T::one() / (T::one() + T::one());
    let tr = (a + d).scale(half);
    let diff = (a - d).scale(half);
    let disc = (diff * diff + b * c).sqrt();
    let l1 = tr + disc;
    let l2 = tr - disc;
    if (l1 - d).norm() <= (l2 - d).norm() {
        l1
    } else {
        l2
    }
}

/// Single-shift complex QR iteration on an upper Hessenberg matrix.
///
/// Transforms `h` to (complex) Schur form, upper triangular, in place and
/// accumulates the unitary similarity into `q`, so `A = Q S Q^H` holds when
/// `q` enters as the Hessenberg transform. Eigenvalues are the diagonal.
///
/// Wilkinson shifts from the trailing 2×2 block, with an exceptional shift
/// every 10 iterations on the same block.
pub fn complex_qr<T: FloatScalar>(
    h: &mut impl MatrixMut<Complex<T>>,
    q: &mut impl MatrixMut<Complex<T>>,
    max_iter: usize,
) -> Result<(), LinalgError> {
    let n = h.nrows();
    if n <= 1 {
        return Ok(());
    }

    let eps = T::epsilon();
    let mut hnorm = T::zero();
    for j in 0..n {
        for i in 0..n {
            hnorm = hnorm + g(h, i, j).norm_sqr();
        }
    }
    let hnorm = hnorm.sqrt();

    let mut total = 0usize;
    let mut its = 0usize;
    let mut hi = n - 1;

    while hi > 0 {
        // Start of the unreduced block ending at `hi`
        let mut lo = hi;
        while lo > 0 {
            let mut scale = g(h, lo - 1, lo - 1).norm() + g(h, lo, lo).norm();
            if scale == T::zero() {
                scale = hnorm;
            }
            if g(h, lo, lo - 1).norm() <= eps * scale {
                *h.get_mut(lo, lo - 1) = Complex::zero();
                break;
            }
            lo -= 1;
        }

        if lo == hi {
            hi -= 1;
            its = 0;
            continue;
        }

        total += 1;
        its += 1;
        if total > max_iter {
            return Err(LinalgError::ConvergenceFailure);
        }

        let mu = if its % 10 == 0 {
            let sub = g(h, hi, hi - 1).norm();
            let extra = if hi >= 2 && hi - 2 >= lo { g(h, hi - 1, hi - 2).norm() } else { T::zero() };
            g(h, hi, hi) + Complex::new(sub + extra, T::zero())
        } else {
            wilkinson_shift(
                g(h, hi - 1, hi - 1),
                g(h, hi - 1, hi),
                g(h, hi, hi - 1),
                g(h, hi, hi),
            )
        };

        // Implicit single-shift sweep over h[lo..=hi, lo..=hi]
        let mut x = g(h, lo, lo) - mu;
        let mut y = g(h, lo + 1, lo);

        for k in lo..hi {
            if k > lo {
                x = g(h, k, k - 1);
                y = g(h, k + 1, k - 1);
            }
            let (c, s) = complex_givens(x, y);
            let cc = Complex::new(c, T::zero());

            // Rows k, k+1 from the left
            let col_start = if k > lo { k - 1 } else { k };
            for j in col_start..n {
                let a = g(h, k, j);
                let b = g(h, k + 1, j);
                *h.get_mut(k, j) = cc * a + s * b;
                *h.get_mut(k + 1, j) = cc * b - s.conj() * a;
            }
            if k > lo {
                *h.get_mut(k + 1, k - 1) = Complex::zero();
            }

            // Columns k, k+1 from the right (by G^H)
            let row_end = (k + 2).min(hi);
            for i in 0..=row_end {
                let a = g(h, i, k);
                let b = g(h, i, k + 1);
                *h.get_mut(i, k) = a * cc + b * s.conj();
                *h.get_mut(i, k + 1) = b * cc - a * s;
            }

            for i in 0..n {
                let a = g(q, i, k);
                let b = g(q, i, k + 1);
                *q.get_mut(i, k) = a * cc + b * s.conj();
                *q.get_mut(i, k + 1) = b * cc - a * s;
            }
        }
    }

    Ok(())
}
