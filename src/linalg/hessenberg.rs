use alloc::vec::Vec;

use crate::traits::{LinalgScalar, MatrixMut};
use num_traits::Zero;

/// Unitary reduction to upper Hessenberg form, `A = Q H Q^H`.
///
/// `a` is replaced by `H` and `q` is overwritten with `Q`. First stage of
/// [`complex_qr`](super::complex_qr).
pub fn hessenberg<T: LinalgScalar>(a: &mut impl MatrixMut<T>, q: &mut impl MatrixMut<T>) {
    let n = a.nrows();
    assert_eq!(n, a.ncols(), "hessenberg requires a square matrix");
    assert!(q.nrows() == n && q.ncols() == n, "q must be {}x{}", n, n);

    for j in 0..n {
        for i in 0..n {
            *q.get_mut(i, j) = if i == j { T::one() } else { T::zero() };
        }
    }

    for k in 0..n.saturating_sub(2) {
        let Some((v, tau, beta)) = reflector(a.col_as_slice(k, k + 1)) else {
            continue;
        };

        // Column k is written directly below
        reflect_left(a, &v, tau, k + 1);
        reflect_right(a, &v, tau, k + 1);
        reflect_right(q, &v, tau, k + 1);

        *a.get_mut(k + 1, k) = beta;
        for x in a.col_as_mut_slice(k, k + 2) {
            *x = T::zero();
        }
    }
}

/// Householder reflector `P = I − τ·v·v^H` with `v[0] = 1` and `P·x = β·e₁`.
///
/// `τ` is real (stored as `T`). `None` when `x` is numerically zero.
fn reflector<T: LinalgScalar>(x: &[T]) -> Option<(Vec<T>, T, T)> {
    let norm_sq = x
        .iter()
        .fold(T::Real::zero(), |acc, &xi| acc + (xi * xi.conj()).re());
    if norm_sq <= T::lepsilon() * T::lepsilon() {
        return None;
    }

    let norm = norm_sq.lsqrt();
    let head = x[0];
    let alpha = head.modulus();
    // β takes the phase opposite to x[0] so v[0] never cancels
    let sigma = if alpha < T::lepsilon() {
        T::from_real(norm)
    } else {
        T::from_real(norm) * (head / T::from_real(alpha))
    };
    let v0 = head + sigma;

    let v = core::iter::once(T::one())
        .chain(x[1..].iter().map(|&xi| xi / v0))
        .collect();
    Some((v, v0 / sigma, T::zero() - sigma))
}

/// `M[off.., off..] ← P·M[off.., off..]`.
fn reflect_left<T: LinalgScalar>(m: &mut impl MatrixMut<T>, v: &[T], tau: T, off: usize) {
    for j in off..m.ncols() {
        let col = m.col_as_mut_slice(j, off);
        let w = col
            .iter()
            .zip(v)
            .fold(T::zero(), |acc, (&x, &vi)| acc + vi.conj() * x)
            * tau;
        for (x, &vi) in col.iter_mut().zip(v) {
            *x = *x - w * vi;
        }
    }
}

/// `M[.., off..] ← M[.., off..]·P`.
fn reflect_right<T: LinalgScalar>(m: &mut impl MatrixMut<T>, v: &[T], tau: T, off: usize) {
    for i in 0..m.nrows() {
        let w = v
            .iter()
            .enumerate()
            .fold(T::zero(), |acc, (j, &vj)| acc + *m.get(i, off + j) * vj)
            * tau;
        for (j, &vj) in v.iter().enumerate() {
            let x = m.get_mut(i, off + j);
            *x = *x - w * vj.conj();
        }
    }
}
