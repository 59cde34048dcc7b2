//! L-BFGS solver construction helpers.
//!
//! Small builders that hide argmin's generic wiring and apply crate-level
//! options (tolerances, memory size) so higher-level code can request a
//! configured solver without touching argmin-specific types. The initial
//! parameter vector and the iteration cap are runtime concerns applied by
//! the runner, not here.
use argmin::solver::quasinewton::LBFGS;

use crate::optimization::{
    errors::OptResult,
    nll_optimizer::{
        traits::FitOptions,
        types::{
            Cost, Grad, HagerZhangLS, LbfgsHagerZhang, LbfgsMoreThuente, MoreThuenteLS, Theta,
            DEFAULT_LBFGS_MEM,
        },
    },
};

/// Construct an L-BFGS solver with Hager-Zhang line search.
///
/// Uses `opts.lbfgs_mem` (or [`DEFAULT_LBFGS_MEM`]) for the history size
/// and wires the optional gradient/cost tolerances from `opts.tols`.
///
/// # Errors
/// Propagates argmin configuration errors (e.g. a rejected tolerance) as
/// `OptError`.
pub fn build_solver_hager_zhang(opts: &FitOptions) -> OptResult<LbfgsHagerZhang> {
    let line_search = HagerZhangLS::new();
    let mem = opts.lbfgs_mem.unwrap_or(DEFAULT_LBFGS_MEM);
    configure_lbfgs(LbfgsHagerZhang::new(line_search, mem), opts)
}

/// Construct an L-BFGS solver with More-Thuente line search.
///
/// Same configuration rules as [`build_solver_hager_zhang`].
///
/// # Errors
/// Propagates argmin configuration errors as `OptError`.
pub fn build_solver_more_thuente(opts: &FitOptions) -> OptResult<LbfgsMoreThuente> {
    let line_search = MoreThuenteLS::new();
    let mem = opts.lbfgs_mem.unwrap_or(DEFAULT_LBFGS_MEM);
    configure_lbfgs(LbfgsMoreThuente::new(line_search, mem), opts)
}

/// Apply the optional tolerances from [`FitOptions`] to an L-BFGS solver,
/// independent of the line-search type. When a tolerance is `None` the
/// corresponding argmin default stays in effect.
fn configure_lbfgs<L>(
    mut solver: LBFGS<L, Theta, Grad, Cost>, opts: &FitOptions,
) -> OptResult<LBFGS<L, Theta, Grad, Cost>> {
    if let Some(tol) = opts.tols.tol_grad {
        solver = solver.with_tolerance_grad(tol)?;
    }
    if let Some(tol) = opts.tols.tol_cost {
        solver = solver.with_tolerance_cost(tol)?;
    }
    Ok(solver)
}
