use alloc::vec::Vec;

use num_complex::Complex;
use num_traits::Zero;

use crate::traits::FloatScalar;

use super::steps::{
    amplitudes, characteristic_polynomial, exponents, lag_matrix, prediction_coefficients,
    vandermonde,
};
use super::{PronyError, PronySettings, SpacingPolicy};

/// One damped complex exponential `a·exp(b·(t − t₀))`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mode<T> {
    /// Complex amplitude at the first sample time.
    pub amplitude: Complex<T>,
    /// Complex exponent: real part is the damping rate, imaginary part the
    /// angular frequency.
    pub exponent: Complex<T>,
}

impl<T: FloatScalar> Mode<T> {
    /// Value at time offset `dt` from the first sample.
    #[inline]
    pub fn eval(&self, dt: Complex<T>) -> Complex<T> {
        self.amplitude * (self.exponent * dt).exp()
    }
}

/// Result of [`prony`].
#[derive(Debug, Clone)]
pub struct PronyFit<T> {
    /// Amplitudes `a_i`, paired with `exponents` by index.
    pub amplitudes: Vec<Complex<T>>,
    /// Exponents `b_i = ln(u_i) / Δt`.
    pub exponents: Vec<Complex<T>>,
    /// Characteristic roots `u_i`.
    pub roots: Vec<Complex<T>>,
    /// Linear-prediction coefficients `d`.
    pub prediction: Vec<Complex<T>>,
    /// Numerical rank of the prediction system.
    pub prediction_rank: usize,
    /// Condition number of the prediction matrix.
    pub prediction_condition: T,
    /// Numerical rank of the Vandermonde system.
    pub amplitude_rank: usize,
    /// Condition number of the Vandermonde matrix.
    pub amplitude_condition: T,
    /// `‖B·a − F‖₂` of the final reconstruction.
    pub residual_norm: T,
    /// First time sample, the origin of the model.
    pub t0: Complex<T>,
    /// Sample spacing `t₁ − t₀`.
    pub dt: Complex<T>,
}

impl<T: FloatScalar> PronyFit<T> {
    /// Model order.
    #[inline]
    pub fn order(&self) -> usize {
        self.exponents.len()
    }

    /// Amplitude/exponent pairs in root-finder order.
    pub fn modes(&self) -> Vec<Mode<T>> {
        self.amplitudes
            .iter()
            .zip(&self.exponents)
            .map(|(&amplitude, &exponent)| Mode {
                amplitude,
                exponent,
            })
            .collect()
    }

    /// Modes sorted ascending by damping rate `Re b` (fastest decay first).
    pub fn sorted_modes(&self) -> Vec<Mode<T>> {
        let mut modes = self.modes();
        modes.sort_by(|x, y| {
            x.exponent
                .re
                .partial_cmp(&y.exponent.re)
                .unwrap_or(core::cmp::Ordering::Equal)
        });
        modes
    }

    /// Model value `Σ a_i·exp(b_i·(t − t₀))`.
    pub fn evaluate(&self, t: Complex<T>) -> Complex<T> {
        let dt = t - self.t0;
        self.modes()
            .iter()
            .fold(Complex::zero(), |acc, mode| acc + mode.eval(dt))
    }
}

/// Prony fit of order `m` with default settings, returning `(a, b)`.
///
/// `F(t) ≈ Σ a_i·exp(b_i·(t − t₀))`; with `t₀ = 0` this is the plain
/// `Σ a_i·exp(b_i·t)` form.
pub fn estimate<T: FloatScalar>(
    t: &[Complex<T>],
    f: &[Complex<T>],
    m: usize,
) -> Result<(Vec<Complex<T>>, Vec<Complex<T>>), PronyError>
where
    PronySettings<T>: Default,
{
    let fit = prony(t, f, m, &PronySettings::default())?;
    Ok((fit.amplitudes, fit.exponents))
}

/// Prony fit of order `m`.
///
/// # Errors
///
/// Input checks run in order: [`LengthMismatch`](PronyError::LengthMismatch),
/// [`ZeroOrder`](PronyError::ZeroOrder),
/// [`OrderTooLarge`](PronyError::OrderTooLarge),
/// [`NonFinite`](PronyError::NonFinite),
/// [`ZeroSpacing`](PronyError::ZeroSpacing), then
/// [`NonUniformSpacing`](PronyError::NonUniformSpacing) under
/// [`SpacingPolicy::Reject`]. A zero characteristic root gives
/// [`DegenerateRoot`](PronyError::DegenerateRoot); kernel non-convergence
/// gives [`Linalg`](PronyError::Linalg).
pub fn prony<T: FloatScalar>(
    t: &[Complex<T>],
    f: &[Complex<T>],
    m: usize,
    settings: &PronySettings<T>,
) -> Result<PronyFit<T>, PronyError> {
    let n = f.len();
    if t.len() != n {
        return Err(PronyError::LengthMismatch {
            times: t.len(),
            values: n,
        });
    }
    if m == 0 {
        return Err(PronyError::ZeroOrder);
    }
    if m >= n {
        return Err(PronyError::OrderTooLarge {
            order: m,
            samples: n,
        });
    }
    if !t.iter().chain(f).all(|z| z.re.is_finite() && z.im.is_finite()) {
        return Err(PronyError::NonFinite);
    }

    let t0 = t[0];
    let dt = t[1] - t[0];
    if dt.is_zero() {
        return Err(PronyError::ZeroSpacing);
    }
    check_spacing(t, dt, settings)?;

    tracing::debug!(samples = n, order = m, dt = ?dt, "prony fit");

    // Step 1: linear prediction
    let (a, rhs) = lag_matrix(f, m);
    let lp = prediction_coefficients(&a, &rhs, settings.rcond)?;
    if !lp.is_full_rank() {
        tracing::debug!(
            rank = lp.rank,
            order = m,
            "prediction system is rank deficient, using minimum-norm coefficients"
        );
    }

    // Step 2: characteristic roots
    let poly = characteristic_polynomial(lp.solution.as_slice());
    let roots = poly.roots(settings.polish_roots, settings.max_polish_iter)?;
    let b = exponents(&roots, dt)?;

    // Step 3: amplitudes
    let vm = vandermonde(&roots, n);
    let amp = amplitudes(&vm, f, settings.rcond)?;
    if !amp.is_full_rank() {
        tracing::warn!(
            rank = amp.rank,
            order = m,
            "Vandermonde system is rank deficient, amplitudes are not unique"
        );
    }

    let fitted = vm.mul_vec(&amp.solution);
    let residual_norm = f
        .iter()
        .zip(fitted.as_slice())
        .fold(T::zero(), |acc, (&x, &y)| acc + (x - y).norm_sqr())
        .sqrt();

    tracing::debug!(
        prediction_rank = lp.rank,
        amplitude_rank = amp.rank,
        residual = ?residual_norm,
        "prony fit done"
    );

    Ok(PronyFit {
        prediction_condition: lp.condition_number(),
        prediction_rank: lp.rank,
        prediction: lp.solution.into_vec(),
        amplitude_condition: amp.condition_number(),
        amplitude_rank: amp.rank,
        amplitudes: amp.solution.into_vec(),
        exponents: b,
        roots,
        residual_norm,
        t0,
        dt,
    })
}

/// Compare every interval with the first one under the configured policy.
fn check_spacing<T: FloatScalar>(
    t: &[Complex<T>],
    dt: Complex<T>,
    settings: &PronySettings<T>,
) -> Result<(), PronyError> {
    if settings.spacing == SpacingPolicy::Ignore {
        return Ok(());
    }
    let scale = dt.norm();
    let offending = t
        .windows(2)
        .enumerate()
        .skip(1)
        .map(|(index, w)| (index, ((w[1] - w[0]) - dt).norm() / scale))
        .find(|&(_, deviation)| deviation > settings.spacing_tolerance);

    if let Some((index, deviation)) = offending {
        let deviation = deviation.to_f64().unwrap_or(f64::NAN);
        match settings.spacing {
            SpacingPolicy::Reject => {
                return Err(PronyError::NonUniformSpacing { index, deviation });
            }
            SpacingPolicy::Warn => {
                tracing::warn!(
                    index,
                    deviation,
                    "time samples are not uniformly spaced, only the first step is used"
                );
            }
            SpacingPolicy::Ignore => {}
        }
    }
    Ok(())
}
