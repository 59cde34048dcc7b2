//! Transition pmf for the Poisson INAR(1) model.
//!
//! The conditional law of `y_t` given `y_{t-1}` is the convolution of a
//! Binomial thinning of the previous count with an independent Poisson
//! arrival stream:
//!
//! `P(y_t | y_{t-1}) = Σ_{j=0}^{min(y_t, y_{t-1})}
//!     Poisson_pmf(y_t - j; mu_t) · Binomial_pmf(j; y_{t-1}, rho)`
//!
//! where `j` counts the survivors from the previous period. This module
//! evaluates that sum entirely in log space: each term is a sum of `statrs`
//! log-pmfs, the terms are combined with a max-shifted log-sum-exp, and the
//! result is floored at [`LOG_PROB_FLOOR`]. The floor is what turns
//! underflowed probability mass into a large finite penalty instead of a
//! `-inf` the optimizer cannot recover from.
use crate::counts::errors::CountResult;
use crate::optimization::numerical_stability::transformations::{log_sum_exp, LOG_PROB_FLOOR};
use statrs::distribution::{Binomial, Discrete, Poisson};

/// Log-probability of the transition `y_prev -> y_t` under thinning
/// probability `rho` and innovation rate `mu`.
///
/// The result lies in `[LOG_PROB_FLOOR, 0]`: a genuine log-probability when
/// the mass is representable, the floor otherwise.
///
/// # Arguments
/// - `y_t`: current count.
/// - `y_prev`: previous count (`y_prev = 0` reduces the law to a pure
///   `Poisson(mu)`, since no survivors are possible).
/// - `mu`: innovation rate; must be strictly positive and finite (callers
///   clamp through [`RateGuards`] first).
/// - `rho`: thinning probability in `[0, 1]`; the model layer produces it
///   via the clamped logistic, so it is strictly interior in practice.
///
/// # Errors
/// Returns a wrapped `statrs` constructor error if `mu` or `rho` fall
/// outside the distribution domains; under guarded inputs this path is
/// unreachable.
///
/// [`RateGuards`]: crate::counts::core::guards::RateGuards
pub fn ln_transition_prob(y_t: u64, y_prev: u64, mu: f64, rho: f64) -> CountResult<f64> {
    let poisson = Poisson::new(mu)?;
    let binomial = Binomial::new(rho, y_prev)?;
    let upper = y_t.min(y_prev);
    let mut terms = Vec::with_capacity(upper as usize + 1);
    for j in 0..=upper {
        terms.push(poisson.ln_pmf(y_t - j) + binomial.ln_pmf(j));
    }
    Ok(log_sum_exp(&terms).max(LOG_PROB_FLOOR))
}
