//! count_timeseries: maximum-likelihood estimation for count time series.
//!
//! Purpose
//! -------
//! Estimate first-order integer-valued autoregressive (INAR(1)) models with
//! Poisson innovations and exogenous regressors. The observed count at time
//! `t` is the sum of a Binomial thinning of the previous count (each unit
//! survives independently with probability `rho`) and an independent Poisson
//! arrival stream with rate `mu_t = exp(x_t · beta)`.
//!
//! Key behaviors
//! -------------
//! - Validate and bind an observed count series to a design matrix
//!   ([`counts::core::data::CountData`]).
//! - Evaluate per-observation negative log-likelihood terms for the
//!   thinning-plus-innovation transition law, fully in log space with
//!   underflow clamping ([`counts::core::pmf`]).
//! - Fit the model by unconstrained L-BFGS over `theta = [beta.., gamma]`,
//!   where `rho = logistic(gamma)` keeps the thinning probability inside
//!   (0, 1) ([`counts::models::poisson_inar::PoissonInar`]).
//! - Report observed-information standard errors at the optimum
//!   ([`inference::hessian`]) and simulate synthetic paths ([`counts::sim`]).
//!
//! Conventions
//! -----------
//! - All numeric containers are `ndarray` types over `f64`; counts are
//!   stored as `u64` after validation.
//! - The optimizer layer minimizes the summed negative log-likelihood
//!   directly; there is no sign flip anywhere in the crate.
//! - Construction-time errors fail fast; evaluation-time numeric trouble is
//!   absorbed into a large finite penalty so the optimizer can back away
//!   from infeasible regions instead of seeing NaN or an error.

pub mod counts;
pub mod inference;
pub mod optimization;
