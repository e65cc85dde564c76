use prony::io::{read_samples, reference_samples, write_reference, DataError};
use prony::estimator::{lag_matrix, prediction_coefficients};
use prony::{estimate, prony, Complex, Mode, PronyError, PronySettings};

type C = Complex<f64>;

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

fn ringdown(t: &[C]) -> Vec<C> {
    t.iter()
        .map(|&t| (c(-2.0, 2.0) * t).exp() + (c(-6.0, 5.0) * t).exp() * 0.2)
        .collect()
}

fn grid(start: f64, n: usize, dt: f64) -> Vec<C> {
    (0..n).map(|k| c(start + dt * k as f64, 0.0)).collect()
}

/// Mode whose exponent is closest to `b`.
fn nearest(modes: &[Mode<f64>], b: C) -> Mode<f64> {
    *modes
        .iter()
        .min_by(|x, y| {
            (x.exponent - b)
                .norm()
                .partial_cmp(&(y.exponent - b).norm())
                .unwrap()
        })
        .unwrap()
}

#[test]
fn reference_scenario() {
    let t = grid(0.0, 50, 10.0 / 49.0);
    let f = ringdown(&t);
    let (a, b) = estimate(&t, &f, 2).unwrap();
    assert_eq!(a.len(), 2);
    assert_eq!(b.len(), 2);

    let (fast, slow) = if b[0].re < b[1].re { (0, 1) } else { (1, 0) };
    assert_close(b[slow], c(-2.0, 2.0), 1e-8, "slow b");
    assert_close(a[slow], c(1.0, 0.0), 1e-8, "slow a");
    assert_close(b[fast], c(-6.0, 5.0), 1e-8, "fast b");
    assert_close(a[fast], c(0.2, 0.0), 1e-8, "fast a");
}

#[test]
fn order_equal_to_sample_count() {
    let t = grid(0.0, 10, 0.5);
    let f = ringdown(&t);
    assert_eq!(
        estimate(&t, &f, 10).unwrap_err(),
        PronyError::OrderTooLarge {
            order: 10,
            samples: 10
        }
    );
}

#[test]
fn time_shift_keeps_exponents() {
    let dt = 0.2;
    let tau = 0.5;
    let t = grid(0.0, 40, dt);
    let t_shifted = grid(tau, 40, dt);
    let settings = PronySettings::default();

    let base = prony(&t, &ringdown(&t), 2, &settings).unwrap();
    let shifted = prony(&t_shifted, &ringdown(&t_shifted), 2, &settings).unwrap();

    for mode in base.modes() {
        let other = nearest(&shifted.modes(), mode.exponent);
        assert_close(other.exponent, mode.exponent, 1e-7, "b under shift");
        // Amplitudes refer to the first sample time
        assert_close(
            other.amplitude,
            mode.amplitude * (mode.exponent * tau).exp(),
            1e-9,
            "a under shift",
        );
    }

    // Both fits describe the same signal
    for &x in &[c(0.6, 0.0), c(1.5, 0.0), c(3.0, 0.0)] {
        assert_close(base.evaluate(x), shifted.evaluate(x), 1e-9, "model");
    }

    // Relabelling the same samples leaves the fit unchanged
    let relabelled = prony(&t_shifted, &ringdown(&t), 2, &settings).unwrap();
    for mode in base.modes() {
        let other = nearest(&relabelled.modes(), mode.exponent);
        assert_close(other.exponent, mode.exponent, 1e-9, "b under relabel");
        assert_close(other.amplitude, mode.amplitude, 1e-9, "a under relabel");
    }
}

#[test]
fn over_fitting_adds_negligible_modes() {
    let t = grid(0.0, 50, 10.0 / 49.0);
    let f = ringdown(&t);
    let settings = PronySettings {
        rcond: Some(1e-10),
        ..PronySettings::default()
    };
    let fit = prony(&t, &f, 4, &settings).unwrap();

    assert_eq!(fit.order(), 4);
    assert_eq!(fit.prediction_rank, 2);

    let modes = fit.modes();
    let slow = nearest(&modes, c(-2.0, 2.0));
    let fast = nearest(&modes, c(-6.0, 5.0));
    assert_close(slow.exponent, c(-2.0, 2.0), 1e-6, "slow b");
    assert_close(slow.amplitude, c(1.0, 0.0), 1e-6, "slow a");
    assert_close(fast.exponent, c(-6.0, 5.0), 1e-6, "fast b");
    assert_close(fast.amplitude, c(0.2, 0.0), 1e-6, "fast a");

    for m in &modes {
        if *m != slow && *m != fast {
            assert!(m.amplitude.norm() < 1e-6, "spurious mode {:?}", m);
        }
    }
    assert!(fit.residual_norm < 1e-8, "residual {}", fit.residual_norm);
}

#[test]
fn reference_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("outputFt.txt");
    write_reference(&path).unwrap();

    let samples = read_samples(&path).unwrap();
    assert_eq!(samples.len(), reference_samples().len());

    let fit = prony(&samples.t, &samples.f, 2, &PronySettings::default()).unwrap();
    let modes = fit.sorted_modes();
    // The time column is rounded to five decimals, which only perturbs Δt
    assert_close(modes[0].exponent, c(-6.0, 5.0), 1e-3, "fast b");
    assert_close(modes[1].exponent, c(-2.0, 2.0), 1e-3, "slow b");
    assert_close(modes[0].amplitude, c(0.2, 0.0), 1e-6, "fast a");
    assert_close(modes[1].amplitude, c(1.0, 0.0), 1e-6, "slow a");
}

#[test]
fn missing_sample_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = read_samples(dir.path().join("absent.txt")).unwrap_err();
    assert!(matches!(err, DataError::Open { .. }), "{:?}", err);
}

#[test]
fn pipeline_steps_match_full_fit() {
    let t = grid(0.0, 30, 0.25);
    let f = ringdown(&t);
    let fit = prony(&t, &f, 2, &PronySettings::default()).unwrap();

    let (a, rhs) = lag_matrix(&f, 2);
    let lp = prediction_coefficients(&a, &rhs, None).unwrap();
    assert_eq!(lp.rank, fit.prediction_rank);
    for (d, expected) in lp.solution.as_slice().iter().zip(&fit.prediction) {
        assert_close(*d, *expected, 1e-14, "prediction coefficient");
    }
}

