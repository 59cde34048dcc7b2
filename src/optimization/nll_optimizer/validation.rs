//! Validation helpers for the NLL optimizer.
//!
//! Centralizes the consistency checks used across the optimizer interface:
//!
//! - **Stopping rules**: [`verify_tol_grad`], [`verify_tol_cost`] ensure
//!   numeric tolerances are finite and strictly positive when provided.
//! - **Gradient validation**: [`validate_grad`] enforces correct dimension
//!   and finite entries.
//! - **Parameter estimates**: [`validate_theta_hat`] ensures a candidate
//!   `theta_hat` exists and contains only finite values.
//! - **Objective values**: [`validate_value`] checks NLL outputs for
//!   finiteness.
//! - **Hessians**: [`validate_hessian`] enforces shape and finiteness.
use crate::optimization::{
    errors::{OptError, OptResult},
    nll_optimizer::types::{Grad, Hessian, Theta},
};

/// Validate the optional gradient-norm tolerance.
///
/// - Accepts `None` (no stopping rule on the gradient).
/// - If `Some`, the value must be finite and strictly positive.
///
/// # Errors
/// Returns [`OptError::InvalidTolGrad`] if the value is non-finite or <= 0.
pub fn verify_tol_grad(tol: Option<f64>) -> OptResult<()> {
    if let Some(tol) = tol {
        if !tol.is_finite() {
            return Err(OptError::InvalidTolGrad { tol, reason: "Tolerance must be finite." });
        }
        if tol <= 0.0 {
            return Err(OptError::InvalidTolGrad { tol, reason: "Tolerance must be positive." });
        }
    }
    Ok(())
}

/// Validate the optional cost-change tolerance.
///
/// - Accepts `None` (no stopping rule on the cost change).
/// - If `Some`, the value must be finite and strictly positive.
///
/// # Errors
/// Returns [`OptError::InvalidTolCost`] if the value is non-finite or <= 0.
pub fn verify_tol_cost(tol: Option<f64>) -> OptResult<()> {
    if let Some(tol) = tol {
        if !tol.is_finite() {
            return Err(OptError::InvalidTolCost { tol, reason: "Tolerance must be finite." });
        }
        if tol <= 0.0 {
            return Err(OptError::InvalidTolCost { tol, reason: "Tolerance must be positive." });
        }
    }
    Ok(())
}

/// Validate a gradient vector against dimension and finiteness.
///
/// # Errors
/// - [`OptError::GradientDimMismatch`] if the length does not match `dim`.
/// - [`OptError::InvalidGradient`] with the index/value of the first
///   offending element.
pub fn validate_grad(grad: &Grad, dim: usize) -> OptResult<()> {
    if grad.len() != dim {
        return Err(OptError::GradientDimMismatch { expected: dim, found: grad.len() });
    }
    for (index, &value) in grad.iter().enumerate() {
        if !value.is_finite() {
            return Err(OptError::InvalidGradient {
                index,
                value,
                reason: "Gradient elements must be finite.",
            });
        }
    }
    Ok(())
}

/// Validate and unwrap an estimated parameter vector (`theta_hat`).
///
/// Accepts only a present vector with all finite entries.
///
/// # Errors
/// - [`OptError::MissingThetaHat`] if no vector was provided.
/// - [`OptError::InvalidThetaHat`] if any element is non-finite.
pub fn validate_theta_hat(theta_hat: Option<Theta>) -> OptResult<Theta> {
    match theta_hat {
        Some(theta) => {
            for (index, &value) in theta.iter().enumerate() {
                if !value.is_finite() {
                    return Err(OptError::InvalidThetaHat {
                        index,
                        value,
                        reason: "Estimated parameters must be finite.",
                    });
                }
            }
            Ok(theta)
        }
        None => Err(OptError::MissingThetaHat),
    }
}

/// Validate a best objective value for finiteness.
///
/// # Errors
/// Returns [`OptError::NonFiniteCost`] if `value` is NaN or infinite.
pub fn validate_value(value: f64) -> OptResult<()> {
    if !value.is_finite() {
        return Err(OptError::NonFiniteCost { value });
    }
    Ok(())
}

/// Validate a Hessian matrix against dimension and finiteness.
///
/// # Errors
/// - [`OptError::HessianDimMismatch`] if the matrix is not `dim x dim`.
/// - [`OptError::InvalidHessian`] with the position of the first non-finite
///   entry.
pub fn validate_hessian(hess: &Hessian, dim: usize) -> OptResult<()> {
    if hess.nrows() != dim || hess.ncols() != dim {
        return Err(OptError::HessianDimMismatch {
            expected: dim,
            found: (hess.nrows(), hess.ncols()),
        });
    }
    for ((row, col), &value) in hess.indexed_iter() {
        if !value.is_finite() {
            return Err(OptError::InvalidHessian { row, col, value });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array2};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover the validation helpers in isolation: accepted inputs,
    // first-offender reporting, and the exact error variants returned.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify tolerance checks accept None and valid positives, and reject
    // non-finite or non-positive values.
    //
    // Given
    // -----
    // - None, Some(1e-6), Some(0.0), Some(NaN).
    //
    // Expect
    // ------
    // - None and Some(1e-6) pass for both checks.
    // - Some(0.0) and Some(NaN) fail with the matching variant.
    fn tolerance_checks_accept_valid_and_reject_invalid() {
        assert!(verify_tol_grad(None).is_ok());
        assert!(verify_tol_grad(Some(1e-6)).is_ok());
        assert!(matches!(verify_tol_grad(Some(0.0)), Err(OptError::InvalidTolGrad { .. })));
        assert!(matches!(verify_tol_grad(Some(f64::NAN)), Err(OptError::InvalidTolGrad { .. })));

        assert!(verify_tol_cost(None).is_ok());
        assert!(verify_tol_cost(Some(1e-8)).is_ok());
        assert!(matches!(verify_tol_cost(Some(-1.0)), Err(OptError::InvalidTolCost { .. })));
    }

    #[test]
    // Purpose
    // -------
    // Ensure gradient validation reports dimension mismatches and the first
    // non-finite element.
    //
    // Given
    // -----
    // - A length-2 gradient checked against dim = 3.
    // - A gradient with NaN at index 1 checked against its own length.
    //
    // Expect
    // ------
    // - GradientDimMismatch { expected: 3, found: 2 }.
    // - InvalidGradient { index: 1, .. }.
    fn validate_grad_reports_mismatch_and_non_finite() {
        let short = array![1.0, 2.0];
        assert_eq!(
            validate_grad(&short, 3).unwrap_err(),
            OptError::GradientDimMismatch { expected: 3, found: 2 }
        );

        let bad = array![0.0, f64::NAN, 1.0];
        match validate_grad(&bad, 3).unwrap_err() {
            OptError::InvalidGradient { index, .. } => assert_eq!(index, 1),
            other => panic!("expected InvalidGradient, got {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // Ensure theta_hat validation returns the vector when finite, and the
    // correct errors when missing or non-finite.
    //
    // Given
    // -----
    // - Some(finite vector), None, Some(vector with +inf).
    //
    // Expect
    // ------
    // - Ok with the same vector; MissingThetaHat; InvalidThetaHat.
    fn validate_theta_hat_covers_all_outcomes() {
        let good = array![0.5, -0.5];
        assert_eq!(validate_theta_hat(Some(good.clone())).unwrap(), good);
        assert_eq!(validate_theta_hat(None).unwrap_err(), OptError::MissingThetaHat);
        assert!(matches!(
            validate_theta_hat(Some(array![0.0, f64::INFINITY])),
            Err(OptError::InvalidThetaHat { index: 1, .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // Ensure Hessian validation enforces squareness against dim and rejects
    // non-finite entries with their position.
    //
    // Given
    // -----
    // - A 2x3 matrix checked against dim = 2.
    // - A 2x2 matrix with NaN at (1, 0).
    //
    // Expect
    // ------
    // - HessianDimMismatch; InvalidHessian { row: 1, col: 0, .. }.
    fn validate_hessian_reports_shape_and_non_finite() {
        let rect = Array2::<f64>::zeros((2, 3));
        assert_eq!(
            validate_hessian(&rect, 2).unwrap_err(),
            OptError::HessianDimMismatch { expected: 2, found: (2, 3) }
        );

        let mut bad = Array2::<f64>::eye(2);
        bad[[1, 0]] = f64::NAN;
        assert!(matches!(
            validate_hessian(&bad, 2),
            Err(OptError::InvalidHessian { row: 1, col: 0, .. })
        ));
    }
}
