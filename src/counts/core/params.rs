//! INAR(1) parameterization: model space and the optimizer-space mapping.
//!
//! This module provides the model-space parameter container [`InarParams`]
//! and the mapping to and from the flat optimizer-space vector
//! `theta = [beta_0 .. beta_{K-1}, gamma]`. Model code works with the
//! tagged structure; the flat layout exists only at the optimizer boundary.
//!
//! ## Mapping conventions
//! - `coefficients` are unconstrained and pass through unchanged.
//! - `thinning_logit` (`gamma`) is the unconstrained coordinate of the
//!   thinning probability; `rho = safe_logistic(gamma)` lies strictly
//!   inside (0, 1) for any real `gamma`, which is what makes unconstrained
//!   L-BFGS applicable to a bounded parameter.
use crate::counts::{core::validation::validate_theta, errors::CountResult};
use crate::optimization::{
    nll_optimizer::Theta,
    numerical_stability::transformations::safe_logistic,
};
use ndarray::{s, Array1, ArrayView1};

/// Model-space parameters for a Poisson INAR(1) model.
///
/// A tagged structure instead of positional slicing: the regression
/// coefficients and the thinning logit are separate fields, and the flat
/// vector layout is produced only by [`InarParams::to_theta`] /
/// consumed only by [`InarParams::from_theta`].
#[derive(Debug, Clone, PartialEq)]
pub struct InarParams {
    /// Regression coefficients `beta`, one per design-matrix column.
    pub coefficients: Array1<f64>,
    /// Unconstrained logit `gamma` of the thinning probability.
    pub thinning_logit: f64,
}

impl InarParams {
    /// Create validated model-space parameters for a model with `k`
    /// regressors.
    ///
    /// # Errors
    /// Rejects a coefficient count other than `k` or any non-finite entry
    /// (including the logit), reusing the theta-layout validation.
    pub fn new(coefficients: Array1<f64>, thinning_logit: f64, k: usize) -> CountResult<Self> {
        let params = InarParams { coefficients, thinning_logit };
        validate_theta(params.to_theta().view(), k + 1)?;
        Ok(params)
    }

    /// Build validated parameters from an optimizer-space vector.
    ///
    /// Layout: the first `k` entries are `beta`, the last is `gamma`.
    ///
    /// # Errors
    /// Propagates [`validate_theta`] errors for a wrong length or
    /// non-finite entries.
    pub fn from_theta(theta: ArrayView1<f64>, k: usize) -> CountResult<Self> {
        validate_theta(theta, k + 1)?;
        Ok(InarParams {
            coefficients: theta.slice(s![..k]).to_owned(),
            thinning_logit: theta[k],
        })
    }

    /// Serialize to the flat optimizer-space vector `[beta.., gamma]`.
    pub fn to_theta(&self) -> Theta {
        let k = self.coefficients.len();
        let mut theta = Array1::zeros(k + 1);
        theta.slice_mut(s![..k]).assign(&self.coefficients);
        theta[k] = self.thinning_logit;
        theta
    }

    /// The thinning probability `rho = logistic(gamma)`, strictly inside
    /// (0, 1).
    pub fn rho(&self) -> f64 {
        safe_logistic(self.thinning_logit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::counts::errors::CountError;
    use approx::assert_relative_eq;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover the tagged-structure round trip with the flat
    // optimizer layout, the rho mapping, and validation failures.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify from_theta splits the flat layout as [beta.., gamma] and
    // to_theta reassembles it exactly.
    //
    // Given
    // -----
    // - theta = [0.5, -0.2, 1.3] with k = 2.
    //
    // Expect
    // ------
    // - coefficients == [0.5, -0.2], thinning_logit == 1.3, and
    //   to_theta() reproduces the input.
    fn theta_round_trip_preserves_layout() {
        let theta = array![0.5, -0.2, 1.3];

        let params = InarParams::from_theta(theta.view(), 2).unwrap();

        assert_eq!(params.coefficients, array![0.5, -0.2]);
        assert_eq!(params.thinning_logit, 1.3);
        assert_eq!(params.to_theta(), theta);
    }

    #[test]
    // Purpose
    // -------
    // Confirm the rho accessor applies the logistic map.
    //
    // Given
    // -----
    // - gamma = 0 and gamma = ln(3) (logistic value 0.75).
    //
    // Expect
    // ------
    // - rho() == 0.5 and 0.75 respectively, both strictly inside (0, 1).
    fn rho_applies_logistic_map() {
        let half = InarParams::new(array![1.0], 0.0, 1).unwrap();
        assert_eq!(half.rho(), 0.5);

        let three_quarters = InarParams::new(array![1.0], 3.0_f64.ln(), 1).unwrap();
        assert_relative_eq!(three_quarters.rho(), 0.75, max_relative = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Ensure layout validation rejects wrong lengths and non-finite
    // entries on both construction paths.
    //
    // Given
    // -----
    // - from_theta with a length-2 vector for k = 2; new with a NaN
    //   coefficient.
    //
    // Expect
    // ------
    // - ThetaLengthMismatch { expected: 3, actual: 2 };
    //   InvalidThetaInput { index: 0, .. }.
    fn construction_rejects_invalid_parameters() {
        assert_eq!(
            InarParams::from_theta(array![0.1, 0.2].view(), 2).unwrap_err(),
            CountError::ThetaLengthMismatch { expected: 3, actual: 2 }
        );
        assert!(matches!(
            InarParams::new(array![f64::NAN], 0.0, 1).unwrap_err(),
            CountError::InvalidThetaInput { index: 0, .. }
        ));
    }
}
