//! Public API surface for negative log-likelihood minimization.
//!
//! - [`NegLogLikelihood`]: trait users implement for their model.
//! - [`FitOptions`] and [`Tolerances`]: configuration for the optimizer.
//! - [`LineSearcher`]: choice of line search used by L-BFGS.
//! - [`SolverReport`]: normalized result returned by the high-level
//!   `minimize` API.
//!
//! Convention: the objective is the summed negative log-likelihood
//! `c(theta) = Σ_t nll_t(theta)`, minimized directly. An analytic gradient,
//! if provided, is the gradient of that same objective; no sign flips exist
//! anywhere in this layer.
use crate::optimization::{
    errors::{OptError, OptResult},
    nll_optimizer::{
        types::{Cost, FnEvalMap, Grad, Theta},
        validation::{validate_theta_hat, validate_value, verify_tol_cost, verify_tol_grad},
    },
};
use argmin::core::{TerminationReason, TerminationStatus};
use argmin_math::ArgminL2Norm;
use std::str::FromStr;

/// User-implemented negative log-likelihood interface.
///
/// The optimizer minimizes `value` directly; implementations are expected
/// to return a finite penalty (not an error) when a candidate `theta`
/// wanders into a numerically degenerate region, so that gradient-free and
/// finite-difference probing can still make progress away from it.
///
/// - `type Data`: per-model data carried into `value`/`grad`/`check`.
///
/// Required:
/// - `value(&Theta, &Data) -> OptResult<Cost>`: evaluate the summed NLL.
/// - `check(&Theta, &Data) -> OptResult<()>`: structural validation hook
///   rejecting obviously invalid `theta`/`data` pairs. Called once before
///   optimization.
///
/// Optional:
/// - `grad(&Theta, &Data) -> OptResult<Grad>`: analytic gradient of the
///   summed NLL. If not implemented, robust finite differences are used
///   automatically.
pub trait NegLogLikelihood {
    type Data: 'static;

    // Required methods
    fn value(&self, theta: &Theta, data: &Self::Data) -> OptResult<Cost>;
    fn check(&self, theta: &Theta, data: &Self::Data) -> OptResult<()>;

    // Optional methods
    fn grad(&self, _theta: &Theta, _data: &Self::Data) -> OptResult<Grad> {
        Err(OptError::GradientNotImplemented)
    }
}

/// Choice of line search used inside the L-BFGS solver.
///
/// Parses case-insensitively from `"MoreThuente"` / `"HagerZhang"`; unknown
/// names return [`OptError::InvalidLineSearch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineSearcher {
    MoreThuente,
    HagerZhang,
}

impl FromStr for LineSearcher {
    type Err = OptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "morethuente" => Ok(LineSearcher::MoreThuente),
            "hagerzhang" => Ok(LineSearcher::HagerZhang),
            _ => Err(OptError::InvalidLineSearch {
                name: s.to_string(),
                reason: "Valid options are case insensitive 'MoreThuente' or 'HagerZhang'.",
            }),
        }
    }
}

/// Numerical tolerances and the iteration cap used by the optimizer.
///
/// - `tol_grad`: terminate when the gradient norm falls below this threshold.
/// - `tol_cost`: terminate when the change in cost falls below this threshold.
/// - `max_iter`: hard cap on the number of iterations.
///
/// Any field can be `None` but at least one of the three must be provided
/// (see [`Tolerances::new`]).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerances {
    pub tol_grad: Option<f64>,
    pub tol_cost: Option<f64>,
    pub max_iter: Option<usize>,
}

impl Tolerances {
    /// Construct validated tolerances.
    ///
    /// # Rules
    /// - At least one of `tol_grad`, `tol_cost`, or `max_iter` must be `Some`.
    /// - If provided, tolerances must be finite and strictly positive.
    /// - If provided, `max_iter` must be `> 0`.
    ///
    /// # Errors
    /// - [`OptError::NoTolerancesProvided`] if all three are `None`.
    /// - [`OptError::InvalidTolGrad`] / [`OptError::InvalidTolCost`] for
    ///   non-finite or non-positive tolerances.
    /// - [`OptError::InvalidMaxIter`] if `max_iter == 0`.
    pub fn new(
        tol_grad: Option<f64>, tol_cost: Option<f64>, max_iter: Option<usize>,
    ) -> OptResult<Self> {
        if tol_grad.is_none() && tol_cost.is_none() && max_iter.is_none() {
            return Err(OptError::NoTolerancesProvided);
        }
        verify_tol_grad(tol_grad)?;
        verify_tol_cost(tol_cost)?;
        if let Some(max_iter) = max_iter {
            if max_iter == 0 {
                return Err(OptError::InvalidMaxIter {
                    max_iter,
                    reason: "Maximum iterations must be greater than zero.",
                });
            }
        }
        Ok(Self { tol_grad, tol_cost, max_iter })
    }
}

/// Optimizer-level configuration.
///
/// Fields:
/// - `tols: Tolerances`: numerical tolerances and the iteration cap.
/// - `max_fun_evals: u64`: cap on objective evaluations, enforced by the
///   adapter's evaluation budget (argmin has no native function cap).
/// - `line_searcher: LineSearcher`: line-search algorithm used by L-BFGS.
/// - `verbose: bool`: if `true`, attaches an observer (behind the
///   `obs_slog` feature) and prints a pre-iteration line.
/// - `lbfgs_mem: Option<usize>`: L-BFGS history size; `None` uses the
///   crate default of 7.
///
/// Default:
/// - `tols`: `tol_grad = None`, `tol_cost = 1e-8`, `max_iter = 1000`.
///   The cost-change rule is the reliable stop when gradients come from
///   finite differences, whose noise floor sits above any tight
///   gradient-norm threshold.
/// - `max_fun_evals`: 5000
/// - `line_searcher`: `MoreThuente`
/// - `verbose`: `false`
/// - `lbfgs_mem`: `None`
#[derive(Debug, Clone, PartialEq)]
pub struct FitOptions {
    pub tols: Tolerances,
    pub max_fun_evals: u64,
    pub line_searcher: LineSearcher,
    pub verbose: bool,
    pub lbfgs_mem: Option<usize>,
}

impl FitOptions {
    /// Create a validated set of optimizer options.
    ///
    /// Validation of the numeric stopping rules happens in
    /// [`Tolerances::new`]; this constructor additionally rejects a zero
    /// evaluation cap and a zero L-BFGS memory.
    pub fn new(
        tols: Tolerances, max_fun_evals: u64, line_searcher: LineSearcher, verbose: bool,
        lbfgs_mem: Option<usize>,
    ) -> OptResult<Self> {
        if max_fun_evals == 0 {
            return Err(OptError::InvalidMaxFunEvals {
                max_fun_evals,
                reason: "The evaluation cap must be greater than zero.",
            });
        }
        if let Some(mem) = lbfgs_mem {
            if mem == 0 {
                return Err(OptError::InvalidLbfgsMem {
                    mem,
                    reason: "L-BFGS memory must be greater than zero.",
                });
            }
        }
        Ok(Self { tols, max_fun_evals, line_searcher, verbose, lbfgs_mem })
    }
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            tols: Tolerances::new(None, Some(1e-8), Some(1000)).unwrap(),
            max_fun_evals: 5000,
            line_searcher: LineSearcher::MoreThuente,
            verbose: false,
            lbfgs_mem: None,
        }
    }
}

/// Canonical result returned by `minimize`.
///
/// - `theta_hat`: best parameter vector found.
/// - `nll`: best objective value (summed negative log-likelihood).
/// - `converged`: `true` only for a genuine solver convergence
///   (gradient/cost tolerance or target cost). An iteration-cap stop is a
///   terminated run but **not** a convergence.
/// - `status`: human-readable termination status.
/// - `iterations`: number of optimizer iterations performed.
/// - `fn_evals`: function-evaluation counters reported by argmin.
/// - `grad_norm`: norm of the last available gradient, if present.
#[derive(Debug, Clone, PartialEq)]
pub struct SolverReport {
    pub theta_hat: Theta,
    pub nll: f64,
    pub converged: bool,
    pub status: String,
    pub iterations: usize,
    pub fn_evals: FnEvalMap,
    pub grad_norm: Option<f64>,
}

impl SolverReport {
    /// Build a validated [`SolverReport`] from raw solver state.
    ///
    /// Performs:
    /// - `theta_hat` check via `validate_theta_hat` (present and all finite).
    /// - `nll` check via `validate_value` (finite).
    /// - Maps `TerminationStatus` into `(converged, status)`; only
    ///   tolerance/target-cost stops count as convergence.
    /// - Computes `grad_norm` if a gradient was available.
    ///
    /// # Errors
    /// Propagates any validation errors for `theta_hat` or `nll`.
    pub fn new(
        theta_hat_opt: Option<Theta>, nll: f64, termination: TerminationStatus, iterations: u64,
        fn_evals: FnEvalMap, grad: Option<Grad>,
    ) -> OptResult<Self> {
        let theta_hat = validate_theta_hat(theta_hat_opt)?;
        validate_value(nll)?;
        let (converged, status) = match &termination {
            TerminationStatus::NotTerminated => (false, "Not terminated".to_string()),
            TerminationStatus::Terminated(reason) => {
                let converged = matches!(
                    reason,
                    TerminationReason::SolverConverged | TerminationReason::TargetCostReached
                );
                (converged, format!("{reason:?}"))
            }
        };
        let iterations = iterations as usize;
        let grad_norm = grad.map(|g| g.l2_norm());
        Ok(Self { theta_hat, nll, converged, status, iterations, fn_evals, grad_norm })
    }
}
