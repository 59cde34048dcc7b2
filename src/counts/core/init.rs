//! Start-value policies for the unconstrained parameter search.
//!
//! Encodes how the initial `theta = [beta.., gamma]` is seeded when `fit`
//! is called without an explicit start vector. The conventional default
//! starts every regression coefficient and the thinning logit at 1.0
//! (a mid-range thinning probability of about 0.73 and a moderate rate),
//! which is a serviceable basin for L-BFGS on well-scaled regressors.
use crate::counts::{
    core::validation::validate_theta,
    errors::CountResult,
};
use ndarray::Array1;

use crate::optimization::nll_optimizer::Theta;

/// Policy for seeding the initial parameter vector.
#[derive(Debug, Clone, PartialEq)]
pub enum StartValues {
    /// All `K + 1` entries start at 1.0.
    Ones,
    /// A fully explicit start vector, validated against the model layout at
    /// construction time.
    Custom(Theta),
}

impl StartValues {
    /// The conventional all-ones start.
    pub const fn ones() -> Self {
        StartValues::Ones
    }

    /// An explicit start vector for a model with `k` regressors.
    ///
    /// # Errors
    /// Propagates [`validate_theta`] errors when the vector is not of
    /// length `k + 1` or carries non-finite entries.
    pub fn custom(theta: Theta, k: usize) -> CountResult<Self> {
        validate_theta(theta.view(), k + 1)?;
        Ok(StartValues::Custom(theta))
    }

    /// Materialize the start vector for a model with `k` regressors.
    pub fn build(&self, k: usize) -> Theta {
        match self {
            StartValues::Ones => Array1::from_elem(k + 1, 1.0),
            StartValues::Custom(theta) => theta.clone(),
        }
    }
}

impl Default for StartValues {
    fn default() -> Self {
        StartValues::Ones
    }
}
