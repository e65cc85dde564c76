use crate::linalg::{givens, LinalgError};
use crate::traits::{LinalgScalar, MatrixMut, MatrixRef};
use num_traits::{Float, One, Zero};

// ── Householder bidiagonalization ───────────────────────────────────

/// Householder bidiagonalization: reduce an M×N matrix (M ≥ N) to upper
/// bidiagonal form via unitary transforms, `A = U · B · V^H`.
///
/// On return:
/// - `diag[0..n]` holds the (generally complex) bidiagonal diagonal
/// - `off_diag[0..n-1]` holds the bidiagonal superdiagonal
/// - `a[k+1.., k]` holds the left reflector vectors (implicit leading 1),
///   `tau_left[k]` their scale factors; [`accumulate_left`] turns them into U
/// - `v` (N×N) accumulates the right transform when `compute_v` is set
///
/// Left reflectors annihilate columns directly. Right reflectors are built
/// from the conjugated row so that `row · H` lands on the first position,
/// which is what makes the complex case work.
pub(crate) fn bidiagonalize<T: LinalgScalar>(
    a: &mut impl MatrixMut<T>,
    diag: &mut [T],
    off_diag: &mut [T],
    tau_left: &mut [T],
    v: &mut impl MatrixMut<T>,
    compute_v: bool,
) {
    let m = a.nrows();
    let n = a.ncols();
    assert!(m >= n, "bidiagonalize requires M >= N");
    assert!(diag.len() >= n);
    assert!(tau_left.len() >= n);
    assert!(off_diag.len() + 1 >= n);

    if compute_v {
        for i in 0..n {
            for j in 0..n {
                *v.get_mut(i, j) = if i == j { T::one() } else { T::zero() };
            }
        }
    }

    let eps2 = T::lepsilon() * T::lepsilon();

    for k in 0..n {
        // ── Left Householder: zero out a[k+1:m, k] ──
        let mut norm_sq = <T::Real as Zero>::zero();
        for &val in a.col_as_slice(k, k) {
            norm_sq = norm_sq + (val * val.conj()).re();
        }

        if norm_sq > eps2 {
            let norm = norm_sq.lsqrt();
            let akk = *a.get(k, k);
            let alpha = akk.modulus();

            let sigma = if alpha < T::lepsilon() {
                T::from_real(norm)
            } else {
                T::from_real(norm) * (akk / T::from_real(alpha))
            };

            let v0 = akk + sigma;
            *a.get_mut(k, k) = v0;
            for x in a.col_as_mut_slice(k, k + 1) {
                *x = *x / v0;
            }

            let tau = v0 / sigma;
            tau_left[k] = tau;

            // A[k:m, k+1:n] -= tau * v * (v^H * A)
            for j in (k + 1)..n {
                let mut dot = *a.get(k, j);
                for i in (k + 1)..m {
                    dot = dot + (*a.get(i, k)).conj() * *a.get(i, j);
                }
                dot = dot * tau;

                *a.get_mut(k, j) = *a.get(k, j) - dot;
                for i in (k + 1)..m {
                    let vi = *a.get(i, k);
                    *a.get_mut(i, j) = *a.get(i, j) - dot * vi;
                }
            }

            diag[k] = T::zero() - sigma;
        } else {
            tau_left[k] = T::zero();
            diag[k] = *a.get(k, k);
        }

        // ── Right Householder: zero out a[k, k+2:n] ──
        if k + 2 < n {
            let mut norm_sq = <T::Real as Zero>::zero();
            for j in (k + 1)..n {
                let val = *a.get(k, j);
                norm_sq = norm_sq + (val * val.conj()).re();
            }

            if norm_sq > eps2 {
                let norm = norm_sq.lsqrt();
                let x0 = (*a.get(k, k + 1)).conj();
                let alpha = x0.modulus();

                let sigma = if alpha < T::lepsilon() {
                    T::from_real(norm)
                } else {
                    T::from_real(norm) * (x0 / T::from_real(alpha))
                };

                let v0 = x0 + sigma;
                *a.get_mut(k, k + 1) = v0;
                for j in (k + 2)..n {
                    let val = (*a.get(k, j)).conj() / v0;
                    *a.get_mut(k, j) = val;
                }

                let tau = v0 / sigma;

                // A[k+1:m, k+1:n] -= tau * (A v) v^H
                for i in (k + 1)..m {
                    let mut dot = *a.get(i, k + 1);
                    for j in (k + 2)..n {
                        dot = dot + *a.get(i, j) * *a.get(k, j);
                    }
                    dot = dot * tau;

                    *a.get_mut(i, k + 1) = *a.get(i, k + 1) - dot;
                    for j in (k + 2)..n {
                        let vj_conj = (*a.get(k, j)).conj();
                        *a.get_mut(i, j) = *a.get(i, j) - dot * vj_conj;
                    }
                }

                if compute_v {
                    for row in 0..n {
                        let mut dot = *v.get(row, k + 1);
                        for j in (k + 2)..n {
                            dot = dot + *v.get(row, j) * *a.get(k, j);
                        }
                        dot = dot * tau;

                        *v.get_mut(row, k + 1) = *v.get(row, k + 1) - dot;
                        for j in (k + 2)..n {
                            let vj_conj = (*a.get(k, j)).conj();
                            *v.get_mut(row, j) = *v.get(row, j) - dot * vj_conj;
                        }
                    }
                }

                off_diag[k] = (T::zero() - sigma).conj();
            } else {
                off_diag[k] = *a.get(k, k + 1);
            }
        } else if k + 1 < n {
            off_diag[k] = *a.get(k, k + 1);
        }
    }
}

/// Form the thin left factor `U = H_0 H_1 … H_{n-1} · I[:, 0..n]` from the
/// reflectors left in `a` by [`bidiagonalize`].
///
/// `u` must be M×N. Applied backwards so only the leading N columns are
/// ever materialised.
pub(crate) fn accumulate_left<T: LinalgScalar>(
    a: &impl MatrixRef<T>,
    tau_left: &[T],
    u: &mut impl MatrixMut<T>,
) {
    let m = u.nrows();
    let n = u.ncols();
    for i in 0..m {
        for j in 0..n {
            *u.get_mut(i, j) = if i == j { T::one() } else { T::zero() };
        }
    }

    for k in (0..n).rev() {
        let tau = tau_left[k];
        if tau == T::zero() {
            continue;
        }
        // Columns j < k are still e_j here and vanish on rows k..m.
        for j in k..n {
            let mut dot = *u.get(k, j);
            for i in (k + 1)..m {
                dot = dot + (*a.get(i, k)).conj() * *u.get(i, j);
            }
            dot = dot * tau;

            *u.get_mut(k, j) = *u.get(k, j) - dot;
            for i in (k + 1)..m {
                let vi = *a.get(i, k);
                *u.get_mut(i, j) = *u.get(i, j) - dot * vi;
            }
        }
    }
}

/// Rotate the complex phases out of a bidiagonal matrix.
///
/// Rescales row `k` by the phase of `diag[k]` (absorbed into column `k` of
/// U) and column `k+1` by the phase of `off_diag[k]` (absorbed into column
/// `k+1` of V), leaving real non-negative `d` and `e` with the same
/// singular values. For real input this only fixes signs.
#[allow(clippy::too_many_arguments)]
pub(crate) fn absorb_phases<T: LinalgScalar>(
    diag: &mut [T],
    off_diag: &mut [T],
    d: &mut [T::Real],
    e: &mut [T::Real],
    u: &mut impl MatrixMut<T>,
    v: &mut impl MatrixMut<T>,
    compute_u: bool,
    compute_v: bool,
) {
    let n = diag.len();
    let zero = <T::Real as Zero>::zero();

    for k in 0..n {
        let r = diag[k].modulus();
        if r > zero {
            let p = diag[k] / T::from_real(r);
            if compute_u {
                for row in 0..u.nrows() {
                    *u.get_mut(row, k) = *u.get(row, k) * p;
                }
            }
            if k + 1 < n {
                off_diag[k] = off_diag[k] * p.conj();
            }
        }
        d[k] = r;

        if k + 1 < n {
            let r = off_diag[k].modulus();
            if r > zero {
                let q = (off_diag[k] / T::from_real(r)).conj();
                diag[k + 1] = diag[k + 1] * q;
                if compute_v {
                    for row in 0..v.nrows() {
                        *v.get_mut(row, k + 1) = *v.get(row, k + 1) * q;
                    }
                }
            }
            e[k] = r;
        }
    }
}

/// Apply a real plane rotation to columns `(p, q)` of `m`:
/// `col_p ← c·col_p + s·col_q`, `col_q ← c·col_q − s·col_p`.
#[inline]
fn rotate_cols<T: LinalgScalar>(m: &mut impl MatrixMut<T>, p: usize, q: usize, c: T::Real, s: T::Real) {
    let (c, s) = (T::from_real(c), T::from_real(s));
    for row in 0..m.nrows() {
        let mp = *m.get(row, p);
        let mq = *m.get(row, q);
        *m.get_mut(row, p) = c * mp + s * mq;
        *m.get_mut(row, q) = c * mq - s * mp;
    }
}

// ── Golub-Kahan bidiagonal QR ───────────────────────────────────────

/// Golub-Kahan implicit-shift QR iteration on a real bidiagonal matrix.
///
/// On entry `diag[0..n]` / `off_diag[0..n-1]` hold the bidiagonal and
/// `u`, `v` the transforms to accumulate rotations into. On return `diag`
/// contains non-negative singular values sorted descending and `off_diag`
/// is zeroed.
pub(crate) fn bidiagonal_qr<T: LinalgScalar>(
    diag: &mut [T::Real],
    off_diag: &mut [T::Real],
    u: &mut impl MatrixMut<T>,
    v: &mut impl MatrixMut<T>,
    compute_u: bool,
    compute_v: bool,
    max_iter: usize,
) -> Result<(), LinalgError> {
    let n = diag.len();
    let zero = <T::Real as Zero>::zero();
    let one = <T::Real as One>::one();

    if n > 1 {
        let eps = T::lepsilon();
        let mut scale = zero;
        for i in 0..n {
            let e = if i + 1 < n { off_diag[i].abs() } else { zero };
            scale = scale.max(diag[i].abs() + e);
        }
        let tiny = eps * scale;
        let mut iter = 0usize;
        let mut hi = n - 1;

        while hi > 0 {
            if off_diag[hi - 1].abs() <= eps * (diag[hi - 1].abs() + diag[hi].abs()) {
                off_diag[hi - 1] = zero;
                hi -= 1;
                continue;
            }

            // Start of the unreduced block ending at `hi`
            let mut lo = hi - 1;
            while lo > 0 {
                if off_diag[lo - 1].abs() <= eps * (diag[lo - 1].abs() + diag[lo].abs()) {
                    off_diag[lo - 1] = zero;
                    break;
                }
                lo -= 1;
            }

            iter += 1;
            if iter > max_iter {
                return Err(LinalgError::ConvergenceFailure);
            }

            // A zero on the diagonal breaks the Wilkinson shift. Chase the
            // matching superdiagonal entry off the bottom with left
            // rotations, which splits the block.
            if let Some(idx) = (lo..hi).find(|&idx| diag[idx].abs() <= tiny) {
                diag[idx] = zero;
                let mut z = off_diag[idx];
                off_diag[idx] = zero;
                for j in (idx + 1)..=hi {
                    let (c, s) = givens(diag[j], z);
                    diag[j] = c * diag[j] + s * z;
                    if j < hi {
                        z = zero - s * off_diag[j];
                        off_diag[j] = c * off_diag[j];
                    }
                    if compute_u {
                        rotate_cols(u, j, idx, c, s);
                    }
                }
                continue;
            }

            // Wilkinson shift from trailing 2×2 of B^T B
            let d_hi = diag[hi];
            let d_hi1 = diag[hi - 1];
            let e_hi1 = off_diag[hi - 1];
            let e_hi2 = if hi >= 2 && hi - 2 >= lo { off_diag[hi - 2] } else { zero };

            let t11 = d_hi1 * d_hi1 + e_hi2 * e_hi2;
            let t12 = d_hi1 * e_hi1;
            let t22 = d_hi * d_hi + e_hi1 * e_hi1;

            let half = one / (one + one);
            let d = (t11 - t22) * half;
            let sign_d = if d >= zero { one } else { zero - one };
            let mu = t22 - t12 * t12 / (d + sign_d * (d * d + t12 * t12).sqrt());

            // Implicit QR chase
            let mut x = diag[lo] * diag[lo] - mu;
            let mut z = diag[lo] * off_diag[lo];

            for k in lo..hi {
                // Right rotation on columns k, k+1 of B
                let (c, s) = givens(x, z);
                if k > lo {
                    off_diag[k - 1] = c * x + s * z;
                }

                let dk = diag[k];
                let ek = off_diag[k];
                let dk1 = diag[k + 1];
                diag[k] = c * dk + s * ek;
                off_diag[k] = c * ek - s * dk;
                let bulge = s * dk1;
                diag[k + 1] = c * dk1;

                if compute_v {
                    rotate_cols(v, k, k + 1, c, s);
                }

                // Left rotation on rows k, k+1 to remove the bulge at B[k+1, k]
                let (c2, s2) = givens(diag[k], bulge);
                diag[k] = c2 * diag[k] + s2 * bulge;
                let old_ek = off_diag[k];
                let old_dk1 = diag[k + 1];
                off_diag[k] = c2 * old_ek + s2 * old_dk1;
                diag[k + 1] = c2 * old_dk1 - s2 * old_ek;

                if k + 1 < hi {
                    // Fill-in at B[k, k+2] drives the next right rotation
                    let old_ek1 = off_diag[k + 1];
                    x = off_diag[k];
                    z = s2 * old_ek1;
                    off_diag[k + 1] = c2 * old_ek1;
                }

                if compute_u {
                    rotate_cols(u, k, k + 1, c2, s2);
                }
            }
        }
    }

    // Make all singular values non-negative
    for i in 0..n {
        if diag[i] < zero {
            diag[i] = zero - diag[i];
            if compute_u {
                for row in 0..u.nrows() {
                    let val = *u.get(row, i);
                    *u.get_mut(row, i) = T::zero() - val;
                }
            }
        }
    }

    // Sort singular values descending, permute U and V columns
    for i in 0..n {
        let mut max_idx = i;
        for j in (i + 1)..n {
            if diag[j] > diag[max_idx] {
                max_idx = j;
            }
        }
        if max_idx != i {
            diag.swap(i, max_idx);
            if compute_u {
                swap_cols(u, i, max_idx);
            }
            if compute_v {
                swap_cols(v, i, max_idx);
            }
        }
    }

    Ok(())
}

#[inline]
fn swap_cols<T: Copy>(m: &mut impl MatrixMut<T>, a: usize, b: usize) {
    for row in 0..m.nrows() {
        let tmp = *m.get(row, a);
        *m.get_mut(row, a) = *m.get(row, b);
        *m.get_mut(row, b) = tmp;
    }
}
