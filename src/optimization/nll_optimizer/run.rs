//! Execution helper that runs an argmin solver on an NLL problem and
//! returns a crate-friendly [`SolverReport`].
use crate::optimization::{
    errors::OptResult,
    nll_optimizer::{
        adapter::ArgMinAdapter,
        traits::{FitOptions, NegLogLikelihood, SolverReport},
        types::{Grad, Theta},
    },
};
#[cfg(feature = "obs_slog")]
use argmin::core::CostFunction;
use argmin::core::{Executor, State};

/// Run an argmin optimization for an NLL problem.
///
/// Shared runner used by both line-search variants. It wires up the user
/// model via [`ArgMinAdapter`], the chosen solver, the initial parameter
/// `theta0` (consumed and set on the optimizer state), optional observers
/// (behind the `obs_slog` feature), and the iteration cap, then executes
/// the solver and converts the final state into a [`SolverReport`].
///
/// # Errors
/// - Propagates any argmin runtime error (line-search failures, adapter
///   errors including budget exhaustion) via the crate's
///   `From<argmin::core::Error>` conversion.
/// - Propagates validation errors raised while constructing the
///   [`SolverReport`].
pub fn run_lbfgs<'a, F, S>(
    theta0: Theta, opts: &FitOptions, problem: ArgMinAdapter<'a, F>, solver: S,
) -> OptResult<SolverReport>
where
    F: NegLogLikelihood,
    S: argmin::core::Solver<
            ArgMinAdapter<'a, F>,
            argmin::core::IterState<Theta, Grad, (), (), (), f64>,
        > + Send
        + 'static,
{
    #[cfg(feature = "obs_slog")]
    if opts.verbose {
        log_initial_state(&theta0, &problem)?;
    }
    let mut executor = Executor::new(problem, solver);
    executor = executor.configure(|state| state.param(theta0));
    #[cfg(feature = "obs_slog")]
    if opts.verbose {
        let observer = argmin_observer_slog::SlogLogger::term_noblock();
        executor = executor.add_observer(observer, argmin::core::observers::ObserverMode::Always);
    }
    if let Some(max_iter) = opts.tols.max_iter {
        executor = executor.configure(|state| state.max_iters(max_iter as u64));
    }

    let mut result = executor.run()?.state().clone();
    let iterations = result.get_iter();
    let function_counts = result.get_func_counts().clone();
    let termination = result.get_termination_status().clone();
    let grad = result.take_gradient();
    SolverReport::new(
        result.take_best_param(),
        result.get_best_cost(),
        termination,
        iterations,
        function_counts,
        grad,
    )
}

// ---- Helper methods ----

#[cfg(feature = "obs_slog")]
fn log_initial_state<F>(theta0: &Theta, problem: &ArgMinAdapter<'_, F>) -> OptResult<()>
where
    F: NegLogLikelihood,
{
    let nll0 = problem.cost(theta0)?;
    eprintln!("init: nll(theta0) = {nll0:.6}");
    Ok(())
}
