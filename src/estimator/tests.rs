use super::*;
use crate::linalg::LinalgError;
use alloc::vec::Vec;
use num_complex::Complex;

type C = Complex<f64>;

const TOL: f64 = 1e-8;

fn c(re: f64, im: f64) -> C {
    Complex::new(re, im)
}

fn assert_close(a: C, b: C, tol: f64, msg: &str) {
    assert!(
        (a - b).norm() < tol,
        "{}: {} vs {} (diff {})",
        msg,
        a,
        b,
        (a - b).norm()
    );
}

fn linspace(start: f64, stop: f64, n: usize) -> Vec<C> {
    let step = (stop - start) / (n - 1) as f64;
    (0..n).map(|k| c(start + step * k as f64, 0.0)).collect()
}

fn signal(t: &[C], modes: &[(C, C)]) -> Vec<C> {
    t.iter()
        .map(|&t| {
            modes
                .iter()
                .fold(c(0.0, 0.0), |acc, &(a, b)| acc + a * (b * t).exp())
        })
        .collect()
}

fn two_modes() -> [(C, C); 2] {
    [(c(1.0, 0.0), c(-2.0, 2.0)), (c(0.2, 0.0), c(-6.0, 5.0))]
}

// ═══════════════════════════════════════════════════════════════════
// Pipeline steps
// ═══════════════════════════════════════════════════════════════════

#[test]
fn lag_matrix_layout() {
    let f: Vec<C> = (0..6).map(|k| c(k as f64, -(k as f64))).collect();
    let (a, rhs) = lag_matrix(&f, 2);
    assert_eq!(a.nrows(), 4);
    assert_eq!(a.ncols(), 2);
    assert_eq!(rhs.len(), 4);
    for r in 0..4 {
        assert_eq!(a[(r, 0)], f[r + 1], "A[({},0)]", r);
        assert_eq!(a[(r, 1)], f[r], "A[({},1)]", r);
        assert_eq!(rhs[r], f[r + 2], "rhs[{}]", r);
    }
}

#[test]
#[should_panic]
fn lag_matrix_rejects_full_order() {
    let f = [c(1.0, 0.0); 3];
    let _ = lag_matrix(&f, 3);
}

#[test]
fn prediction_recovers_recurrence() {
    // f[k] = u^k satisfies f[k] = u·f[k−1]
    let u = c(0.6, 0.3);
    let f: Vec<C> = (0..8).map(|k| u.powi(k)).collect();
    let (a, rhs) = lag_matrix(&f, 1);
    let lp = prediction_coefficients(&a, &rhs, None).unwrap();
    assert_eq!(lp.rank, 1);
    assert_close(lp.solution[0], u, 1e-14, "d0");
}

#[test]
fn characteristic_polynomial_signs() {
    let d = [c(1.5, 0.5), c(-0.5, 0.0)];
    let p = characteristic_polynomial(&d);
    let coeffs = p.coefficients();
    assert_eq!(coeffs.len(), 3);
    assert_eq!(coeffs[2], c(1.0, 0.0));
    assert_eq!(coeffs[1], c(-1.5, -0.5));
    assert_eq!(coeffs[0], c(0.5, 0.0));
}

#[test]
fn exponents_from_roots() {
    let dt = c(0.2, 0.0);
    let b = [c(-2.0, 2.0), c(-6.0, 5.0)];
    let u: Vec<C> = b.iter().map(|&b| (b * dt).exp()).collect();
    let got = exponents(&u, dt).unwrap();
    for i in 0..2 {
        assert_close(got[i], b[i], 1e-12, "b");
    }
}

#[test]
fn exponents_zero_root_is_degenerate() {
    let u = [c(0.5, 0.0), c(0.0, 0.0), c(0.0, 0.0)];
    assert_eq!(
        exponents(&u, c(1.0, 0.0)).unwrap_err(),
        PronyError::DegenerateRoot { index: 1 }
    );
}

#[test]
fn vandermonde_layout() {
    let u = [c(2.0, 0.0), c(0.0, 1.0)];
    let b = vandermonde(&u, 4);
    assert_eq!(b.nrows(), 4);
    assert_eq!(b.ncols(), 2);
    let powers_of_i = [c(1.0, 0.0), c(0.0, 1.0), c(-1.0, 0.0), c(0.0, -1.0)];
    for k in 0..4 {
        assert_eq!(b[(k, 0)], c((1 << k) as f64, 0.0), "B[({},0)]", k);
        assert_eq!(b[(k, 1)], powers_of_i[k], "B[({},1)]", k);
    }
}

#[test]
fn amplitudes_exact() {
    let u = [c(0.9, 0.1), c(0.5, -0.4)];
    let b = vandermonde(&u, 6);
    let a_true = crate::DynVector::from_slice(&[c(1.0, -1.0), c(0.25, 0.5)]);
    let f = b.mul_vec(&a_true);
    let ls = amplitudes(&b, f.as_slice(), None).unwrap();
    assert_eq!(ls.rank, 2);
    assert_close(ls.solution[0], a_true[0], 1e-12, "a0");
    assert_close(ls.solution[1], a_true[1], 1e-12, "a1");
}

// ═══════════════════════════════════════════════════════════════════
// Full fit
// ═══════════════════════════════════════════════════════════════════

#[test]
fn two_mode_recovery() {
    let t = linspace(0.0, 10.0, 50);
    let f = signal(&t, &two_modes());
    let fit = prony(&t, &f, 2, &PronySettings::default()).unwrap();

    assert_eq!(fit.order(), 2);
    assert_eq!(fit.prediction_rank, 2);
    assert_eq!(fit.amplitude_rank, 2);
    assert_close(fit.dt, c(10.0 / 49.0, 0.0), 1e-15, "dt");

    let modes = fit.sorted_modes();
    assert_close(modes[0].exponent, c(-6.0, 5.0), TOL, "fast b");
    assert_close(modes[0].amplitude, c(0.2, 0.0), TOL, "fast a");
    assert_close(modes[1].exponent, c(-2.0, 2.0), TOL, "slow b");
    assert_close(modes[1].amplitude, c(1.0, 0.0), TOL, "slow a");

    assert!(fit.residual_norm < 1e-10, "residual {}", fit.residual_norm);
    for k in [0, 7, 31] {
        assert_close(fit.evaluate(t[k]), f[k], 1e-10, "model at sample");
    }
}

#[test]
fn single_mode_recovery() {
    let t = linspace(0.0, 4.0, 17);
    let f = signal(&t, &[(c(3.0, -1.0), c(-0.5, 1.0))]);
    let (a, b) = estimate(&t, &f, 1).unwrap();
    assert_close(a[0], c(3.0, -1.0), 1e-10, "a");
    assert_close(b[0], c(-0.5, 1.0), 1e-10, "b");
}

#[test]
fn estimate_matches_prony() {
    let t = linspace(0.0, 10.0, 50);
    let f = signal(&t, &two_modes());
    let (a, b) = estimate(&t, &f, 2).unwrap();
    let fit = prony(&t, &f, 2, &PronySettings::default()).unwrap();
    assert_eq!(a, fit.amplitudes);
    assert_eq!(b, fit.exponents);
}

#[test]
fn fit_without_polishing() {
    let t = linspace(0.0, 10.0, 50);
    let f = signal(&t, &two_modes());
    let settings = PronySettings {
        polish_roots: false,
        ..PronySettings::default()
    };
    let fit = prony(&t, &f, 2, &settings).unwrap();
    let modes = fit.sorted_modes();
    assert_close(modes[0].exponent, c(-6.0, 5.0), 1e-7, "fast b");
    assert_close(modes[1].exponent, c(-2.0, 2.0), 1e-7, "slow b");
}

#[test]
fn fit_f32() {
    let t: Vec<Complex<f32>> = (0..20).map(|k| Complex::new(0.25 * k as f32, 0.0)).collect();
    let b_true = Complex::new(-0.3_f32, 1.0);
    let f: Vec<Complex<f32>> = t.iter().map(|&t| (b_true * t).exp() * 2.0).collect();
    let (a, b) = estimate(&t, &f, 1).unwrap();
    assert!((b[0] - b_true).norm() < 1e-3, "b = {}", b[0]);
    assert!((a[0] - Complex::new(2.0, 0.0)).norm() < 1e-3, "a = {}", a[0]);
}

#[test]
fn zero_root_is_degenerate() {
    // An impulse has prediction coefficient 0 and characteristic root 0
    let t = linspace(0.0, 5.0, 6);
    let mut f = vec![c(0.0, 0.0); 6];
    f[0] = c(1.0, 0.0);
    assert_eq!(
        prony(&t, &f, 1, &PronySettings::default()).unwrap_err(),
        PronyError::DegenerateRoot { index: 0 }
    );
}

// ═══════════════════════════════════════════════════════════════════
// Input validation
// ═══════════════════════════════════════════════════════════════════

#[test]
fn length_mismatch_checked_first() {
    let t = linspace(0.0, 1.0, 5);
    let f = vec![c(1.0, 0.0); 4];
    assert_eq!(
        prony(&t, &f, 0, &PronySettings::default()).unwrap_err(),
        PronyError::LengthMismatch { times: 5, values: 4 }
    );
}

#[test]
fn zero_order() {
    let t = linspace(0.0, 1.0, 5);
    let f = vec![c(1.0, 0.0); 5];
    assert_eq!(estimate(&t, &f, 0).unwrap_err(), PronyError::ZeroOrder);
}

#[test]
fn order_too_large() {
    let t = linspace(0.0, 1.0, 10);
    let f = signal(&t, &two_modes());
    assert_eq!(
        estimate(&t, &f, 10).unwrap_err(),
        PronyError::OrderTooLarge {
            order: 10,
            samples: 10
        }
    );
    assert_eq!(
        estimate(&t, &f, 11).unwrap_err(),
        PronyError::OrderTooLarge {
            order: 11,
            samples: 10
        }
    );
}

#[test]
fn non_finite_input() {
    let t = linspace(0.0, 1.0, 8);
    let mut f = signal(&t, &two_modes());
    f[3] = c(f64::NAN, 0.0);
    assert_eq!(estimate(&t, &f, 2).unwrap_err(), PronyError::NonFinite);

    let mut t2 = t.clone();
    t2[5] = c(0.0, f64::INFINITY);
    let f2 = signal(&t, &two_modes());
    assert_eq!(estimate(&t2, &f2, 2).unwrap_err(), PronyError::NonFinite);
}

#[test]
fn non_finite_input_f32() {
    let t: Vec<Complex<f32>> = (0..8).map(|k| Complex::new(0.1 * k as f32, 0.0)).collect();
    let mut f: Vec<Complex<f32>> = t.iter().map(|&t| (Complex::new(-1.0, 2.0) * t).exp()).collect();
    f[6] = Complex::new(0.0, f32::NEG_INFINITY);
    assert_eq!(estimate(&t, &f, 1).unwrap_err(), PronyError::NonFinite);
}

#[test]
fn zero_spacing() {
    let t = vec![c(1.0, 0.0), c(1.0, 0.0), c(2.0, 0.0), c(3.0, 0.0)];
    let f = vec![c(1.0, 0.0); 4];
    assert_eq!(estimate(&t, &f, 1).unwrap_err(), PronyError::ZeroSpacing);
}

fn uneven_grid() -> Vec<C> {
    let mut t = linspace(0.0, 9.0, 10);
    for x in t.iter_mut().skip(3) {
        *x = *x + c(0.5, 0.0);
    }
    t
}

#[test]
fn non_uniform_spacing_rejected() {
    let t = uneven_grid();
    let f = signal(&t, &[(c(1.0, 0.0), c(-0.1, 1.0))]);
    let settings = PronySettings {
        spacing: SpacingPolicy::Reject,
        ..PronySettings::default()
    };
    match prony(&t, &f, 1, &settings).unwrap_err() {
        PronyError::NonUniformSpacing { index, deviation } => {
            assert_eq!(index, 2);
            assert!((deviation - 0.5).abs() < 1e-12, "deviation {}", deviation);
        }
        e => panic!("unexpected error {:?}", e),
    }
}

#[test]
fn non_uniform_spacing_tolerated() {
    let t = uneven_grid();
    let f = signal(&t, &[(c(1.0, 0.0), c(-0.1, 1.0))]);
    for policy in [SpacingPolicy::Warn, SpacingPolicy::Ignore] {
        let settings = PronySettings {
            spacing: policy,
            ..PronySettings::default()
        };
        assert!(prony(&t, &f, 1, &settings).is_ok(), "{:?}", policy);
    }
}

#[test]
fn spacing_within_tolerance() {
    // Fixed-width rounding of the time column stays under the default tolerance
    let t: Vec<C> = linspace(0.0, 10.0, 50)
        .iter()
        .map(|z| c((z.re * 1e5).round() / 1e5, 0.0))
        .collect();
    let f = signal(&t, &two_modes());
    let settings = PronySettings {
        spacing: SpacingPolicy::Reject,
        ..PronySettings::default()
    };
    assert!(prony(&t, &f, 2, &settings).is_ok());
}

#[test]
fn default_settings() {
    let s = PronySettings::<f64>::default();
    assert_eq!(s.rcond, None);
    assert_eq!(s.spacing, SpacingPolicy::Warn);
    assert_eq!(s.spacing_tolerance, 1e-4);
    assert!(s.polish_roots);
    assert_eq!(s.max_polish_iter, 8);
}

#[test]
fn error_display() {
    assert_eq!(
        PronyError::OrderTooLarge {
            order: 10,
            samples: 10
        }
        .to_string(),
        "model order 10 must be less than the number of samples (10)"
    );
    assert_eq!(
        PronyError::DegenerateRoot { index: 3 }.to_string(),
        "characteristic root 3 is zero"
    );
    assert_eq!(
        PronyError::from(LinalgError::ConvergenceFailure).to_string(),
        "linear algebra failure: iterative algorithm did not converge"
    );
}
