//! Errors for INAR count models (data validation, guard and start-value
//! checks, parameter mapping, and fit failures).
//!
//! This module defines the model error type, [`CountError`], used across
//! the counts layer. It implements `Display`/`Error` by hand and converts
//! the `statrs` distribution constructor errors into crate variants.
//!
//! ## Conventions
//! - Indices are 0-based.
//! - Observed counts must be non-negative integers; the series must hold at
//!   least two observations so at least one transition exists.
//! - Optimizer/backend failures are normalized to
//!   [`CountError::OptimizationFailed`] with a human-readable status.
use statrs::distribution::{BinomialError, PoissonError};

/// Crate-wide result alias for count-model operations.
pub type CountResult<T> = Result<T, CountError>;

/// Unified error type for INAR count modeling.
///
/// Covers input/data validation, guard and start-value checks, parameter
/// mapping, and estimation failures.
#[derive(Debug, Clone, PartialEq)]
pub enum CountError {
    // ---- Input/data validation ----
    /// Series needs at least two observations to form one transition.
    SeriesTooShort { len: usize },

    /// Observed series length and design-matrix row count disagree.
    RowCountMismatch { series_len: usize, matrix_rows: usize },

    /// An observed value is NaN/±inf.
    NonFiniteCount { index: usize, value: f64 },

    /// An observed value is negative (counts must be >= 0).
    NegativeCount { index: usize, value: f64 },

    /// An observed value has a fractional part (counts must be integers).
    NonIntegerCount { index: usize, value: f64 },

    /// The design matrix has no columns.
    NoRegressors,

    /// A design-matrix entry is NaN/±inf.
    NonFiniteRegressor { row: usize, col: usize, value: f64 },

    /// Supplied regressor names do not match the column count.
    NameCountMismatch { expected: usize, actual: usize },

    /// Coefficient count does not match the design-matrix column count.
    RegressorCountMismatch { expected: usize, actual: usize },

    // ---- Guards / options validation ----
    /// Rate guards must be finite with 0 < min < max.
    InvalidRateGuards { min: f64, max: f64, reason: &'static str },

    // ---- Parameter mapping ----
    /// Theta length does not match the model's K + 1 parameters.
    ThetaLengthMismatch { expected: usize, actual: usize },

    /// Unconstrained optimization input must have finite values.
    InvalidThetaInput { index: usize, value: f64 },

    // ---- Estimation ----
    /// Optimizer failed or stopped without converging; includes a
    /// human-readable status/reason.
    OptimizationFailed { status: String },

    /// Covariance estimation at the optimum failed; includes a
    /// human-readable status/reason.
    CovarianceFailed { status: String },

    /// Model hasn't been fitted yet.
    ModelNotFitted,

    // ---- statrs distribution errors ----
    /// Wrapper for statrs::distribution::PoissonError
    InvalidPoissonRate,

    /// Wrapper for statrs::distribution::BinomialError
    InvalidThinningProb,

    // ---- Fallback ----
    UnknownError,
}

impl std::error::Error for CountError {}

impl std::fmt::Display for CountError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CountError::SeriesTooShort { len } => {
                write!(f, "Series too short: {len} observations, need at least 2")
            }
            CountError::RowCountMismatch { series_len, matrix_rows } => {
                write!(
                    f,
                    "Series length {series_len} does not match design-matrix row count {matrix_rows}"
                )
            }
            CountError::NonFiniteCount { index, value } => {
                write!(f, "Non-finite observed value at index {index}: {value}")
            }
            CountError::NegativeCount { index, value } => {
                write!(f, "Negative observed value at index {index}: {value}, counts must be >= 0")
            }
            CountError::NonIntegerCount { index, value } => {
                write!(
                    f,
                    "Non-integer observed value at index {index}: {value}, counts must be whole"
                )
            }
            CountError::NoRegressors => {
                write!(f, "Design matrix must have at least one column")
            }
            CountError::NonFiniteRegressor { row, col, value } => {
                write!(f, "Non-finite regressor at ({row}, {col}): {value}")
            }
            CountError::NameCountMismatch { expected, actual } => {
                write!(f, "Regressor name count mismatch: expected {expected}, actual {actual}")
            }
            CountError::RegressorCountMismatch { expected, actual } => {
                write!(f, "Coefficient count mismatch: expected {expected}, actual {actual}")
            }
            CountError::InvalidRateGuards { min, max, reason } => {
                write!(f, "Invalid rate guards ({min}, {max}): {reason}")
            }
            CountError::ThetaLengthMismatch { expected, actual } => {
                write!(f, "Theta length mismatch: expected {expected}, actual {actual}")
            }
            CountError::InvalidThetaInput { index, value } => {
                write!(f, "Invalid theta input at index {index}: {value}, must be finite")
            }
            CountError::OptimizationFailed { status } => {
                write!(f, "Optimization failed: {status}")
            }
            CountError::CovarianceFailed { status } => {
                write!(f, "Covariance estimation failed: {status}")
            }
            CountError::ModelNotFitted => {
                write!(f, "Model has not been fitted yet")
            }
            CountError::InvalidPoissonRate => {
                write!(f, "Poisson rate is invalid (<= 0 or non-finite)")
            }
            CountError::InvalidThinningProb => {
                write!(f, "Thinning probability is invalid (outside [0, 1])")
            }
            CountError::UnknownError => {
                write!(f, "Unknown error")
            }
        }
    }
}

impl From<PoissonError> for CountError {
    fn from(_err: PoissonError) -> Self {
        CountError::InvalidPoissonRate
    }
}

impl From<BinomialError> for CountError {
    fn from(_err: BinomialError) -> Self {
        CountError::InvalidThinningProb
    }
}
