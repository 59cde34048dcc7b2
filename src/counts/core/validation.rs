//! Validation helpers shared by the parameter and model modules.
use crate::counts::errors::{CountError, CountResult};
use ndarray::ArrayView1;

/// Validate an unconstrained parameter vector against the model layout.
///
/// Checks `theta.len() == expected` (the model's `K + 1`) and that every
/// entry is finite.
///
/// # Errors
/// - [`CountError::ThetaLengthMismatch`] on a length disagreement.
/// - [`CountError::InvalidThetaInput`] with the first non-finite entry.
pub fn validate_theta(theta: ArrayView1<f64>, expected: usize) -> CountResult<()> {
    if theta.len() != expected {
        return Err(CountError::ThetaLengthMismatch { expected, actual: theta.len() });
    }
    for (index, &value) in theta.iter().enumerate() {
        if !value.is_finite() {
            return Err(CountError::InvalidThetaInput { index, value });
        }
    }
    Ok(())
}
