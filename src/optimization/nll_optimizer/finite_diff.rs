//! Finite-difference Hessian helpers.
//!
//! The INAR likelihood ships without an analytic gradient, so curvature at
//! the optimum is approximated directly from the scalar objective with
//! central second differences. Step sizes follow the standard rule for
//! second differences, `eps^(1/4)` scaled per coordinate: a square-root
//! step (as used for first differences) would put the rounding error of
//! the numerator at the same order as the curvature itself, while the
//! quarter-power step keeps both rounding and truncation error small.
use crate::optimization::{
    errors::OptResult,
    nll_optimizer::{
        types::{Hessian, Theta},
        validation::validate_hessian,
    },
};
use ndarray::Array2;

/// Compute a validated, symmetrized central second-difference Hessian of a
/// scalar objective at `theta`.
///
/// Diagonal entries use the three-point stencil
/// `(f(x + h_i) - 2 f(x) + f(x - h_i)) / h_i^2`; off-diagonal entries use
/// the four-point cross stencil over `(±h_i, ±h_j)`. Steps are
/// `eps^(1/4) · (1 + |theta_i|)` per coordinate, and the result is
/// symmetrized by construction of the cross stencil.
///
/// # Errors
/// - [`crate::optimization::errors::OptError::InvalidHessian`] if any
///   entry is NaN or infinite (e.g. the objective was probed outside its
///   well-behaved region).
pub fn compute_hessian<F: Fn(&Theta) -> f64>(f: &F, theta: &Theta) -> OptResult<Hessian> {
    let n = theta.len();
    let step = f64::EPSILON.powf(0.25);
    let steps: Vec<f64> = theta.iter().map(|&v| step * (1.0 + v.abs())).collect();
    let f0 = f(theta);
    let mut hess = Array2::<f64>::zeros((n, n));

    for i in 0..n {
        let mut probe = theta.clone();
        probe[i] = theta[i] + steps[i];
        let f_plus = f(&probe);
        probe[i] = theta[i] - steps[i];
        let f_minus = f(&probe);
        hess[[i, i]] = (f_plus - 2.0 * f0 + f_minus) / (steps[i] * steps[i]);
    }

    for i in 0..n {
        for j in (i + 1)..n {
            let mut probe = theta.clone();
            probe[i] = theta[i] + steps[i];
            probe[j] = theta[j] + steps[j];
            let f_pp = f(&probe);
            probe[j] = theta[j] - steps[j];
            let f_pm = f(&probe);
            probe[i] = theta[i] - steps[i];
            let f_mm = f(&probe);
            probe[j] = theta[j] + steps[j];
            let f_mp = f(&probe);
            let value = (f_pp - f_pm - f_mp + f_mm) / (4.0 * steps[i] * steps[j]);
            hess[[i, j]] = value;
            hess[[j, i]] = value;
        }
    }

    validate_hessian(&hess, n)?;
    Ok(hess)
}
