//! Numerical stability utilities.
//!
//! Provides guarded implementations of the nonlinear transforms used by the
//! count-model likelihood that are prone to overflow/underflow in naive
//! form, together with the small numeric constants shared across the
//! optimization and inference layers. The functions follow explicit-cutoff
//! strategies that keep `f64` arithmetic in a well-conditioned regime.
//!
//! # Provided items
//! - [`LOGIT_EPS`]: clamp width keeping probabilities strictly inside
//!   (0, 1).
//! - [`LOG_PROB_FLOOR`]: lower bound for per-observation log-probabilities;
//!   floored terms become large finite penalties instead of `-inf`.
//! - [`EIGEN_EPS`]: eigenvalue truncation threshold for pseudoinverses.
//! - [`safe_logistic(x)`]: overflow-free logistic map into the open unit
//!   interval.
//! - [`safe_logit(p)`]: inverse of the logistic on (0, 1), with clamping.
//! - [`log_sum_exp(terms)`]: max-shifted `ln Σ exp(terms_i)`.

/// Clamp width for probabilities produced by [`safe_logistic`].
///
/// The thinning probability must stay strictly inside (0, 1) so that
/// Binomial log-pmf terms remain well-defined for every count. Any logistic
/// output is clamped into `[LOGIT_EPS, 1 - LOGIT_EPS]`.
pub const LOGIT_EPS: f64 = 1e-12;

/// Floor for per-observation log-probabilities.
///
/// Slightly above `ln(f64::MIN_POSITIVE)` (about -708.4). A transition
/// whose mass underflows to representable zero contributes a negative
/// log-likelihood of at most `-LOG_PROB_FLOOR` per term, which is a large
/// but finite penalty the optimizer can move away from.
pub const LOG_PROB_FLOOR: f64 = -700.0;

/// Eigenvalues with magnitude at most this threshold are treated as zero
/// when forming pseudoinverse directions in the inference layer.
pub const EIGEN_EPS: f64 = 1e-12;

/// Numerically stable logistic map: `1 / (1 + exp(-x))`.
///
/// Evaluates the branch that never exponentiates a positive argument, so no
/// intermediate overflows for any finite `x`, and clamps the result into
/// `[LOGIT_EPS, 1 - LOGIT_EPS]`. Saturation to exactly 0.0 or 1.0 would
/// otherwise occur in `f64` for |x| beyond roughly 37.
pub fn safe_logistic(x: f64) -> f64 {
    let p = if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    };
    p.clamp(LOGIT_EPS, 1.0 - LOGIT_EPS)
}

/// Stable inverse of the logistic on (0, 1): `ln(p / (1 - p))`.
///
/// The input is clamped into `[LOGIT_EPS, 1 - LOGIT_EPS]` before taking
/// logs, so boundary values map to large finite logits instead of ±inf.
pub fn safe_logit(p: f64) -> f64 {
    let p = p.clamp(LOGIT_EPS, 1.0 - LOGIT_EPS);
    (p / (1.0 - p)).ln()
}

/// Max-shifted `ln Σᵢ exp(termsᵢ)`.
///
/// Shifting by the maximum keeps every exponentiated argument at or below
/// zero, so the sum neither overflows nor collapses when the individual
/// terms are far below the representable range. Returns `-inf` for an empty
/// slice or when every term is `-inf`.
pub fn log_sum_exp(terms: &[f64]) -> f64 {
    let max = terms.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if !max.is_finite() {
        return max;
    }
    max + terms.iter().map(|&v| (v - max).exp()).sum::<f64>().ln()
}
