//! Run-time configuration for INAR model estimation.
use crate::counts::core::{guards::RateGuards, init::StartValues};
use crate::optimization::nll_optimizer::FitOptions;

/// Bundled configuration for a [`PoissonInar`] run: start-value policy,
/// optimizer options, and innovation-rate guards.
///
/// The default pairs the all-ones start with the optimizer defaults
/// (cost-change tolerance 1e-8, 1000 iterations, 5000 objective
/// evaluations) and wide rate guards.
///
/// [`PoissonInar`]: crate::counts::models::poisson_inar::PoissonInar
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InarOptions {
    /// Start-value policy used when `fit` receives no explicit start.
    pub start: StartValues,
    /// Optimizer configuration (tolerances, caps, line search).
    pub fit_opts: FitOptions,
    /// Clamp bounds applied to every innovation rate `mu_t`.
    pub rate_guards: RateGuards,
}

impl InarOptions {
    /// Bundle pre-validated components into a run configuration.
    pub fn new(start: StartValues, fit_opts: FitOptions, rate_guards: RateGuards) -> Self {
        InarOptions { start, fit_opts, rate_guards }
    }
}
