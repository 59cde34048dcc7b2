//! Poisson INAR(1) model: likelihood evaluation and fit orchestration.
//!
//! This module wires the count-transition pmf to the [`NegLogLikelihood`]
//! trait and owns the fit lifecycle. The model binds its data and options
//! at construction, fixes the reporting parameter names once (so repeated
//! fits cannot duplicate the thinning-logit label), and delegates the
//! actual search to the optimizer layer.
//!
//! Key ideas:
//! - Parameters live in unconstrained space: `theta = [beta.., gamma]`
//!   with `rho = logistic(gamma)` and `mu_t = exp(x_t · beta)` clamped by
//!   the configured rate guards.
//! - Per-observation terms are exposed in forward time order, one per
//!   transition `t-1 -> t` for `t = 1..T-1`.
//! - Numeric trouble during evaluation becomes a large finite penalty;
//!   only structural problems (wrong theta length, non-finite entries)
//!   surface as errors.
use crate::{
    counts::{
        core::{
            data::CountData, options::InarOptions, params::InarParams,
            pmf::ln_transition_prob, validation::validate_theta,
        },
        errors::{CountError, CountResult},
    },
    inference::hessian::{calc_covariance, calc_standard_errors},
    optimization::{
        errors::OptResult,
        nll_optimizer::{minimize, Cost, NegLogLikelihood, SolverReport, Theta},
    },
};
use ndarray::{Array1, Array2};

/// Fit lifecycle of a model instance.
///
/// `Unfit` at construction; `fit` moves the instance to `Fitted` on a
/// converged run or `Failed` otherwise. Both terminal states permit
/// re-entering `fit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitState {
    Unfit,
    Fitted,
    Failed,
}

/// Poisson INAR(1) model over a bound [`CountData`].
///
/// Holds the data, run options, and (after fitting) the solver report and
/// model-space parameter estimates. The parameter-name list is computed
/// once at construction - the `K` regressor labels plus the fixed
/// thinning-logit label `"gamma"` - and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct PoissonInar {
    /// Bound observations and design matrix.
    pub data: CountData,
    /// Run configuration (start policy, optimizer options, rate guards).
    pub options: InarOptions,
    /// Fit lifecycle state.
    pub state: FitState,
    /// Solver report from the most recent `fit` (populated even when the
    /// run did not converge, for inspection).
    pub results: Option<SolverReport>,
    /// Model-space estimates (populated only on a converged fit).
    pub fitted_params: Option<InarParams>,
    /// Reporting labels, length `K + 1`, fixed at construction.
    param_names: Vec<String>,
}

impl PoissonInar {
    /// Construct a model over validated data.
    ///
    /// The reporting names are derived here, exactly once: the data's
    /// regressor labels followed by `"gamma"` for the thinning logit.
    pub fn new(data: CountData, options: InarOptions) -> PoissonInar {
        let mut param_names = data.names.clone();
        param_names.push("gamma".to_string());
        PoissonInar {
            data,
            options,
            state: FitState::Unfit,
            results: None,
            fitted_params: None,
            param_names,
        }
    }

    /// Number of regression coefficients `K`.
    pub fn k(&self) -> usize {
        self.data.num_regressors()
    }

    /// Reporting labels for `theta`, length `K + 1` with `"gamma"` last.
    pub fn param_names(&self) -> &[String] {
        &self.param_names
    }

    /// Per-observation negative log-likelihood terms at `theta`.
    ///
    /// Returns `T - 1` values in forward time order; index `i` holds the
    /// term for the transition into observation `i + 1`. The first
    /// observation conditions the recursion and contributes no term.
    ///
    /// Each term is `-ln P(y_t | y_{t-1})` with the rate clamped through
    /// the configured [`RateGuards`] and the log-probability floored, so
    /// every term is finite for any finite `theta`.
    ///
    /// [`RateGuards`]: crate::counts::core::guards::RateGuards
    ///
    /// # Errors
    /// Structural problems only: a theta of the wrong length or with
    /// non-finite entries.
    pub fn neg_loglik_obs(&self, theta: &Theta) -> CountResult<Array1<f64>> {
        let params = InarParams::from_theta(theta.view(), self.k())?;
        let rho = params.rho();
        let eta = self.data.x.dot(&params.coefficients);
        let guards = &self.options.rate_guards;
        let mut terms = Array1::zeros(self.data.len() - 1);
        for t in 1..self.data.len() {
            let mu = guards.clamp(eta[t].exp());
            let ln_p = ln_transition_prob(self.data.y[t], self.data.y[t - 1], mu, rho)?;
            terms[t - 1] = -ln_p;
        }
        Ok(terms)
    }

    /// Fit by maximum likelihood and cache the results.
    ///
    /// ## Steps
    /// 1. Resolve the start vector: an explicit `start` argument
    ///    (validated) wins over the configured [`StartValues`] policy.
    /// 2. Run the optimizer layer with the configured options.
    /// 3. On a converged report, store it, map `theta_hat` into
    ///    [`InarParams`], and enter `Fitted`.
    /// 4. On a terminated-but-unconverged report (iteration cap, budget
    ///    exhaustion mapped by the runner), store the report for
    ///    inspection, enter `Failed`, and surface
    ///    [`CountError::OptimizationFailed`].
    ///
    /// Re-entering `fit` from `Fitted` or `Failed` is permitted; the
    /// parameter names are fixed at construction and unaffected.
    ///
    /// # Errors
    /// - Start-vector validation errors.
    /// - [`CountError::OptimizationFailed`] for solver errors or
    ///   non-convergence within the configured caps.
    ///
    /// [`StartValues`]: crate::counts::core::init::StartValues
    pub fn fit(&mut self, start: Option<Theta>) -> CountResult<()> {
        let theta0 = match start {
            Some(theta) => {
                validate_theta(theta.view(), self.k() + 1)?;
                theta
            }
            None => self.options.start.build(self.k()),
        };

        let report = match minimize(&*self, theta0, &self.data, &self.options.fit_opts) {
            Ok(report) => report,
            Err(err) => {
                self.state = FitState::Failed;
                return Err(CountError::OptimizationFailed { status: err.to_string() });
            }
        };

        if !report.converged {
            let status = report.status.clone();
            self.results = Some(report);
            self.fitted_params = None;
            self.state = FitState::Failed;
            return Err(CountError::OptimizationFailed { status });
        }

        self.fitted_params = Some(InarParams::from_theta(report.theta_hat.view(), self.k())?);
        self.results = Some(report);
        self.state = FitState::Fitted;
        Ok(())
    }

    /// Estimated thinning probability at the fitted optimum.
    ///
    /// # Errors
    /// Returns [`CountError::ModelNotFitted`] before a converged fit.
    pub fn rho_hat(&self) -> CountResult<f64> {
        self.fitted_params.as_ref().map(InarParams::rho).ok_or(CountError::ModelNotFitted)
    }

    /// Covariance estimate for `theta_hat`: the eigenvalue-truncated
    /// pseudoinverse of the observed information (finite-difference
    /// Hessian of the total NLL at the optimum).
    ///
    /// # Errors
    /// - [`CountError::ModelNotFitted`] before a converged fit.
    /// - [`CountError::CovarianceFailed`] when the Hessian cannot be
    ///   validated (degenerate probes).
    pub fn covariance_matrix(&self) -> CountResult<Array2<f64>> {
        let report = self.fitted_report()?;
        let nll = |theta: &Theta| self.total_nll_or_nan(theta);
        calc_covariance(&nll, &report.theta_hat)
            .map_err(|err| CountError::CovarianceFailed { status: err.to_string() })
    }

    /// Standard errors for `theta_hat` (square roots of the covariance
    /// diagonal).
    ///
    /// # Errors
    /// Same conditions as [`PoissonInar::covariance_matrix`].
    pub fn standard_errors(&self) -> CountResult<Array1<f64>> {
        let report = self.fitted_report()?;
        let nll = |theta: &Theta| self.total_nll_or_nan(theta);
        calc_standard_errors(&nll, &report.theta_hat)
            .map_err(|err| CountError::CovarianceFailed { status: err.to_string() })
    }

    fn fitted_report(&self) -> CountResult<&SolverReport> {
        if self.state != FitState::Fitted {
            return Err(CountError::ModelNotFitted);
        }
        self.results.as_ref().ok_or(CountError::ModelNotFitted)
    }

    /// Total NLL as a plain scalar map for finite-difference probing;
    /// structural failures become NaN, which downstream validation rejects.
    fn total_nll_or_nan(&self, theta: &Theta) -> f64 {
        match self.neg_loglik_obs(theta) {
            Ok(terms) => terms.sum(),
            Err(_) => f64::NAN,
        }
    }
}

impl NegLogLikelihood for PoissonInar {
    type Data = CountData;

    /// Summed negative log-likelihood at `theta`.
    ///
    /// Always finite for structurally valid input: per-term floors and the
    /// rate guards absorb underflow/overflow into penalties.
    fn value(&self, theta: &Theta, _data: &Self::Data) -> OptResult<Cost> {
        Ok(self.neg_loglik_obs(theta)?.sum())
    }

    /// Structural validation of `theta` before optimization begins.
    fn check(&self, theta: &Theta, _data: &Self::Data) -> OptResult<()> {
        validate_theta(theta.view(), self.k() + 1)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::counts::core::{data::CountData, pmf::ln_transition_prob};
    use approx::assert_relative_eq;
    use ndarray::{array, Array1, Array2};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Construction-time parameter naming.
    // - Per-observation NLL terms: length, forward ordering, agreement with
    //   the transition pmf, and finite penalties for extreme theta.
    // - Structural checks on theta.
    //
    // They intentionally DO NOT cover:
    // - End-to-end fitting and refitting (integration tests).
    // -------------------------------------------------------------------------

    fn intercept_model(y: Array1<f64>) -> PoissonInar {
        let rows = y.len();
        let x = Array2::from_elem((rows, 1), 1.0);
        let data = CountData::new(y, x, None).expect("test data should validate");
        PoissonInar::new(data, InarOptions::default())
    }

    #[test]
    // Purpose
    // -------
    // Verify the names are fixed at construction: K regressor labels plus
    // "gamma" last.
    //
    // Given
    // -----
    // - An intercept-only model (K = 1).
    //
    // Expect
    // ------
    // - param_names() == ["x0", "gamma"], state == Unfit, no results.
    fn construction_fixes_parameter_names() {
        let model = intercept_model(array![1.0, 2.0, 0.0]);

        assert_eq!(model.param_names(), &["x0".to_string(), "gamma".to_string()]);
        assert_eq!(model.state, FitState::Unfit);
        assert!(model.results.is_none());
        assert!(model.fitted_params.is_none());
    }

    #[test]
    // Purpose
    // -------
    // Verify the per-observation terms: length T - 1, forward order, and
    // exact agreement with the transition pmf evaluated directly.
    //
    // Given
    // -----
    // - y = [0, 3, 1], intercept-only, theta = (beta0, gamma) = (0.2, 0.4),
    //   so mu = exp(0.2) for every t and rho = logistic(0.4).
    //
    // Expect
    // ------
    // - Two terms: [-ln P(3|0), -ln P(1|3)] in that order.
    fn neg_loglik_obs_is_forward_ordered_and_matches_pmf() {
        let model = intercept_model(array![0.0, 3.0, 1.0]);
        let theta = array![0.2, 0.4];
        let mu = 0.2_f64.exp();
        let rho = 1.0 / (1.0 + (-0.4_f64).exp());

        let terms = model.neg_loglik_obs(&theta).expect("valid theta should evaluate");

        assert_eq!(terms.len(), 2);
        let expected_first = -ln_transition_prob(3, 0, mu, rho).unwrap();
        let expected_second = -ln_transition_prob(1, 3, mu, rho).unwrap();
        assert_relative_eq!(terms[0], expected_first, max_relative = 1e-12);
        assert_relative_eq!(terms[1], expected_second, max_relative = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Cross-check value() against a hand-derived likelihood: with rho
    // driven to the clamp floor, the transition law is effectively pure
    // Poisson.
    //
    // Given
    // -----
    // - y = [1, 2], intercept-only, beta0 = 0 (mu = 1), gamma = -40
    //   (rho at the 1e-12 clamp).
    //
    // Expect
    // ------
    // - value ~= -ln Poisson_pmf(2; 1) = 1 + ln 2 within 1e-6.
    fn value_matches_hand_computed_poisson_limit() {
        let model = intercept_model(array![1.0, 2.0]);
        let theta = array![0.0, -40.0];

        let nll = model.value(&theta, &model.data).expect("value should evaluate");

        assert_relative_eq!(nll, 1.0 + 2.0_f64.ln(), epsilon = 1e-6);
    }

    #[test]
    // Purpose
    // -------
    // Ensure extreme parameter vectors produce large finite penalties, not
    // NaN/inf/panic: the rate guard and log-probability floor absorb both
    // underflow and overflow.
    //
    // Given
    // -----
    // - y = [0, 31, 0] with beta0 = -500 (mu clamped to the 1e-10 guard
    //   floor, so the 0 -> 31 burst is unexplainable) and beta0 = 500
    //   (mu clamped to the 1e10 guard ceiling).
    //
    // Expect
    // ------
    // - Every term is finite; the unexplainable transition hits the
    //   per-term penalty of exactly 700 (the negated floor); the flooded
    //   case stays finite and positive as well.
    fn extreme_theta_yields_finite_penalty() {
        let model = intercept_model(array![0.0, 31.0, 0.0]);

        let starved = model.neg_loglik_obs(&array![-500.0, 0.0]).unwrap();
        assert!(starved.iter().all(|v| v.is_finite()));
        assert_eq!(starved[0], 700.0);

        let flooded = model.value(&array![500.0, 0.0], &model.data).unwrap();
        assert!(flooded.is_finite());
        assert!(flooded > 0.0);
    }

    #[test]
    // Purpose
    // -------
    // Ensure structural validation rejects a theta of the wrong length on
    // both the public sequence API and the optimizer check hook.
    //
    // Given
    // -----
    // - An intercept-only model (expects length 2) and a length-3 theta.
    //
    // Expect
    // ------
    // - neg_loglik_obs returns ThetaLengthMismatch; check errors too.
    fn wrong_theta_length_is_a_structural_error() {
        let model = intercept_model(array![1.0, 0.0, 2.0]);
        let theta = array![0.1, 0.2, 0.3];

        assert_eq!(
            model.neg_loglik_obs(&theta).unwrap_err(),
            CountError::ThetaLengthMismatch { expected: 2, actual: 3 }
        );
        assert!(model.check(&theta, &model.data).is_err());
    }
}
