//! Count data containers for INAR family models.
//!
//! Purpose
//! -------
//! Provide a small, validated container binding an observed count series to
//! its design matrix. This module centralizes input validation for raw
//! count data so downstream likelihood code can assume clean, integral,
//! non-negative observations aligned row-by-row with the regressors.
//!
//! Key behaviors
//! -------------
//! - [`CountData`] enforces the basic data invariants: at least two
//!   observations, finite non-negative integral counts, a design matrix
//!   with matching row count and at least one column, finite regressor
//!   entries, and a regressor-name list matching the column count.
//! - Counts are accepted as `f64` (the shape data usually arrives in) and
//!   stored as `u64` after validation, so the integrality check happens
//!   exactly once at the boundary.
//!
//! Invariants & assumptions
//! ------------------------
//! - `y.len() >= 2` (one transition at minimum).
//! - `x.nrows() == y.len()` and `x.ncols() >= 1`.
//! - All counts are finite, non-negative, and integral.
//! - All regressor entries are finite.
//! - `names.len() == x.ncols()`.
//!
//! Conventions
//! -----------
//! - Row `t` of the design matrix aligns with observation `t`; the first
//!   observation contributes no likelihood term (nothing precedes it), but
//!   its regressor row is still carried for alignment.
//! - A standard specification includes an intercept column of ones; this
//!   module does not add one on the caller's behalf.
//!
//! Downstream usage
//! ----------------
//! - Construct [`CountData`] at the boundary where raw observations enter
//!   the modeling stack, then hand it to
//!   [`crate::counts::models::poisson_inar::PoissonInar`].
//! - Consumers may rely on the invariants above and skip re-validation.
//!
//! Testing notes
//! -------------
//! - Unit tests cover the happy path, every rejection branch, and the
//!   default regressor naming.
use crate::counts::errors::{CountError, CountResult};
use ndarray::{Array1, Array2};

/// `CountData`: validated count series bound to its design matrix.
///
/// Purpose
/// -------
/// Represent a single observed count series together with the `T x K`
/// regressor matrix that drives the innovation rate, plus the regressor
/// column names used for reporting. All invariants are enforced once at
/// construction; the value is immutable afterwards.
///
/// Fields
/// ------
/// - `y`: `Array1<u64>`
///   Observed counts, validated from `f64` input (finite, >= 0, integral).
/// - `x`: `Array2<f64>`
///   Design matrix with one row per observation and `K >= 1` finite
///   columns.
/// - `names`: `Vec<String>`
///   Regressor column labels, length `K`. Defaulted to `x0..x{K-1}` when
///   the caller supplies `None`.
///
/// Invariants
/// ----------
/// - `y.len() >= 2`, `x.nrows() == y.len()`, `x.ncols() >= 1`.
/// - Every regressor entry is finite; every count was finite, non-negative,
///   and integral before conversion.
///
/// Notes
/// -----
/// - Validation is O(T·K) in a single pass over each container, stopping at
///   the first offending element.
#[derive(Debug, Clone, PartialEq)]
pub struct CountData {
    /// Observed counts (validated non-negative integers).
    pub y: Array1<u64>,
    /// Design matrix, one row per observation.
    pub x: Array2<f64>,
    /// Regressor column labels, parallel to the columns of `x`.
    pub names: Vec<String>,
}

impl CountData {
    /// Construct a validated [`CountData`] instance.
    ///
    /// Parameters
    /// ----------
    /// - `y`: raw observed series as `f64`. Must hold at least two values,
    ///   each finite, non-negative, and integral.
    /// - `x`: design matrix with `y.len()` rows and at least one finite
    ///   column. Include an intercept column of ones for a standard
    ///   specification.
    /// - `names`: optional regressor labels, one per column; when `None`,
    ///   columns are labeled `x0..x{K-1}`.
    ///
    /// Errors
    /// ------
    /// - [`CountError::SeriesTooShort`] when `y.len() < 2`.
    /// - [`CountError::RowCountMismatch`] when the row counts disagree.
    /// - [`CountError::NonFiniteCount`] / [`CountError::NegativeCount`] /
    ///   [`CountError::NonIntegerCount`] for the first offending observed
    ///   value.
    /// - [`CountError::NoRegressors`] when `x.ncols() == 0`.
    /// - [`CountError::NonFiniteRegressor`] for the first offending matrix
    ///   entry.
    /// - [`CountError::NameCountMismatch`] when supplied names do not match
    ///   the column count.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// # use ndarray::{array, Array2};
    /// # use count_timeseries::counts::core::data::CountData;
    /// let y = array![2.0, 1.0, 3.0, 0.0];
    /// let x = Array2::from_elem((4, 1), 1.0);
    /// let data = CountData::new(y, x, None).unwrap();
    /// assert_eq!(data.len(), 4);
    /// assert_eq!(data.names, vec!["x0".to_string()]);
    /// ```
    pub fn new(y: Array1<f64>, x: Array2<f64>, names: Option<Vec<String>>) -> CountResult<Self> {
        if y.len() < 2 {
            return Err(CountError::SeriesTooShort { len: y.len() });
        }
        if x.nrows() != y.len() {
            return Err(CountError::RowCountMismatch {
                series_len: y.len(),
                matrix_rows: x.nrows(),
            });
        }
        if x.ncols() == 0 {
            return Err(CountError::NoRegressors);
        }

        let mut counts = Array1::<u64>::zeros(y.len());
        for (index, &value) in y.iter().enumerate() {
            if !value.is_finite() {
                return Err(CountError::NonFiniteCount { index, value });
            }
            if value < 0.0 {
                return Err(CountError::NegativeCount { index, value });
            }
            if value.fract() != 0.0 {
                return Err(CountError::NonIntegerCount { index, value });
            }
            counts[index] = value as u64;
        }

        for ((row, col), &value) in x.indexed_iter() {
            if !value.is_finite() {
                return Err(CountError::NonFiniteRegressor { row, col, value });
            }
        }

        let names = match names {
            Some(names) => {
                if names.len() != x.ncols() {
                    return Err(CountError::NameCountMismatch {
                        expected: x.ncols(),
                        actual: names.len(),
                    });
                }
                names
            }
            None => (0..x.ncols()).map(|col| format!("x{col}")).collect(),
        };

        Ok(CountData { y: counts, x, names })
    }

    /// Number of observations `T`.
    pub fn len(&self) -> usize {
        self.y.len()
    }

    /// `true` when the series is empty (unreachable for constructed values,
    /// provided for the conventional pairing with `len`).
    pub fn is_empty(&self) -> bool {
        self.y.is_empty()
    }

    /// Number of regressor columns `K`.
    pub fn num_regressors(&self) -> usize {
        self.x.ncols()
    }
}
