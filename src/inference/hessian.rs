//! Hessian-based covariance and standard errors at a fitted optimum.
//!
//! Purpose
//! -------
//! Turn a finite-difference Hessian of the total negative log-likelihood,
//! evaluated at the fitted parameter vector, into a covariance matrix and
//! per-parameter standard errors. The Hessian at the minimum is the
//! observed information `J(theta_hat)`; the covariance estimate is its
//! Moore-Penrose pseudoinverse, built through a symmetric
//! eigendecomposition with small eigenvalues truncated.
//!
//! Key behaviors
//! -------------
//! - [`calc_covariance`] computes the FD Hessian (via the optimizer
//!   layer's [`compute_hessian`]), copies it into a `nalgebra::DMatrix`,
//!   and assembles `J⁺ = Q Λ⁺ Qᵀ` keeping only eigenvalues above
//!   [`EIGEN_EPS`].
//! - [`calc_standard_errors`] returns the square roots of the covariance
//!   diagonal.
//!
//! Conventions
//! -----------
//! - The objective handed in must be the **total** NLL (not an average), so
//!   the pseudoinverse is the covariance directly, with no extra sample
//!   scaling.
//! - Eigenvalue truncation means weakly identified directions contribute
//!   nothing to the variance sums; their standard errors shrink rather than
//!   explode, and callers should treat near-singular information matrices
//!   with suspicion regardless.
//! - No explicit matrix inverse is formed anywhere.
use crate::optimization::{
    errors::OptResult,
    nll_optimizer::{finite_diff::compute_hessian, types::Theta},
    numerical_stability::transformations::EIGEN_EPS,
};
use nalgebra::DMatrix;
use ndarray::{Array1, Array2};

/// Covariance estimate at `theta_hat`: the eigenvalue-truncated
/// pseudoinverse of the observed information matrix.
///
/// # Parameters
/// - `nll`: the total negative log-likelihood as a scalar function of
///   `theta`. Must be twice differentiable (numerically) in a neighborhood
///   of `theta_hat`; probes that fail should return NaN, which the Hessian
///   validation rejects.
/// - `theta_hat`: the fitted parameter vector.
///
/// # Errors
/// Propagates [`compute_hessian`] errors (wrong shape, non-finite entries
/// from degenerate probes).
pub fn calc_covariance<F: Fn(&Theta) -> f64>(
    nll: &F, theta_hat: &Theta,
) -> OptResult<Array2<f64>> {
    let n = theta_hat.len();
    let obs_info = compute_hessian(nll, theta_hat)?;
    let mut obs_info_nalg = DMatrix::<f64>::zeros(n, n);
    fill_dmatrix(&obs_info, &mut obs_info_nalg);
    Ok(pseudo_inverse(obs_info_nalg, n))
}

/// Standard errors at `theta_hat`: square roots of the covariance
/// diagonal.
///
/// # Errors
/// Propagates [`calc_covariance`] errors.
pub fn calc_standard_errors<F: Fn(&Theta) -> f64>(
    nll: &F, theta_hat: &Theta,
) -> OptResult<Array1<f64>> {
    let cov = calc_covariance(nll, theta_hat)?;
    Ok(Array1::from_iter(cov.diag().iter().map(|v| v.sqrt())))
}

// ---- Helper methods ----

/// Copy an `ndarray` matrix into a preallocated `DMatrix`, column by
/// column to match nalgebra's column-major storage.
fn fill_dmatrix(obs_info: &Array2<f64>, obs_info_nalg: &mut DMatrix<f64>) {
    let n = obs_info.ncols();
    for j in 0..n {
        for i in 0..n {
            obs_info_nalg[(i, j)] = obs_info[[i, j]];
        }
    }
}

/// Eigenvalue-truncated pseudoinverse of a symmetric matrix.
///
/// With `J = Q Λ Qᵀ`, returns `Σ_{k: λ_k > EIGEN_EPS} q_k q_kᵀ / λ_k`.
/// Truncated directions (λ at or below the threshold, including any
/// negative curvature from FD noise) contribute nothing, keeping the
/// result positive semi-definite.
fn pseudo_inverse(obs_info_nalg: DMatrix<f64>, n: usize) -> Array2<f64> {
    let eigen_decomp = obs_info_nalg.symmetric_eigen();
    let q = eigen_decomp.eigenvectors;
    let eigenvals = eigen_decomp.eigenvalues;
    let mut cov = Array2::<f64>::zeros((n, n));
    for (k, &lambda) in eigenvals.iter().enumerate() {
        if lambda <= EIGEN_EPS {
            continue;
        }
        for i in 0..n {
            for j in 0..n {
                cov[[i, j]] += q[(i, k)] * q[(j, k)] / lambda;
            }
        }
    }
    cov
}
