//! Adapter that exposes a user [`NegLogLikelihood`] as an argmin problem.
//!
//! The objective already is the quantity argmin minimizes (a summed negative
//! log-likelihood), so the cost passes through unchanged and analytic
//! gradients need no sign handling. If a gradient is not provided, the cost
//! closure is finite-differenced, central first with a forward-difference
//! retry. The adapter also owns the objective-evaluation budget that
//! enforces the `max_fun_evals` cap, since argmin has no native
//! function-evaluation stopping rule.
use std::cell::{Cell, RefCell};

use crate::optimization::{
    errors::OptError,
    nll_optimizer::{
        traits::NegLogLikelihood,
        types::{Cost, Grad, Theta},
        validation::validate_grad,
    },
};
use argmin::core::{CostFunction, Error, Gradient};
use finitediff::FiniteDiff;

/// Bridges a user [`NegLogLikelihood`] to argmin's `CostFunction` and
/// `Gradient`.
///
/// - `CostFunction::cost` returns the summed NLL unchanged, after charging
///   the evaluation budget and rejecting non-finite values.
/// - `Gradient::gradient` returns the user's analytic gradient when
///   implemented, or a finite-difference gradient of the cost otherwise.
#[derive(Debug, Clone)]
pub struct ArgMinAdapter<'a, F: NegLogLikelihood> {
    pub f: &'a F,
    pub data: &'a F::Data,
    max_fun_evals: u64,
    evals: Cell<u64>,
}

impl<'a, F: NegLogLikelihood> ArgMinAdapter<'a, F> {
    /// Construct a new adapter over a user model, its data, and the
    /// evaluation budget for this run.
    pub fn new(f: &'a F, data: &'a F::Data, max_fun_evals: u64) -> Self {
        Self { f, data, max_fun_evals, evals: Cell::new(0) }
    }

    /// Number of objective evaluations charged so far.
    pub fn evals_used(&self) -> u64 {
        self.evals.get()
    }

    /// Charge one objective evaluation against the budget.
    ///
    /// # Errors
    /// Returns [`OptError::EvalBudgetExhausted`] once `max_fun_evals`
    /// evaluations have been spent; the executor surfaces this as a failed
    /// run rather than a converged one.
    fn charge_eval(&self) -> Result<(), Error> {
        let used = self.evals.get();
        if used >= self.max_fun_evals {
            return Err(OptError::EvalBudgetExhausted { max_fun_evals: self.max_fun_evals }.into());
        }
        self.evals.set(used + 1);
        Ok(())
    }
}

impl<'a, F: NegLogLikelihood> CostFunction for ArgMinAdapter<'a, F> {
    type Param = Theta;
    type Output = Cost;

    /// Evaluate the objective `c(theta)` (the summed NLL).
    ///
    /// - Charges the evaluation budget.
    /// - Calls the user's `value(theta, data)` and checks the result is
    ///   finite.
    ///
    /// # Errors
    /// - [`OptError::EvalBudgetExhausted`] once the budget is spent.
    /// - [`OptError::NonFiniteCost`] if the value is NaN or infinite.
    /// - Propagates any `OptError` from the user's `value`.
    fn cost(&self, theta: &Self::Param) -> Result<Self::Output, Error> {
        self.charge_eval()?;
        let output = self.f.value(theta, self.data)?;
        if !output.is_finite() {
            return Err((OptError::NonFiniteCost { value: output }).into());
        }
        Ok(output)
    }
}

impl<'a, F: NegLogLikelihood> Gradient for ArgMinAdapter<'a, F> {
    type Param = Theta;
    type Gradient = Grad;

    /// Evaluate the gradient of the objective at `theta`.
    ///
    /// Behavior:
    /// - If the user implements `grad(theta, data)`, validate and return it
    ///   unchanged.
    /// - Otherwise finite-difference the cost closure: central differences
    ///   first; if any cost evaluation failed (captured via `closure_err`)
    ///   or the result fails validation, retry once with forward
    ///   differences.
    ///
    /// The FD closure must return `f64`, so errors raised inside it cannot
    /// use `?`; the first one is captured in `closure_err` and the closure
    /// yields NaN, which the post-hoc validation then rejects.
    ///
    /// # Errors
    /// - Propagates user errors from `grad` (other than
    ///   `GradientNotImplemented`).
    /// - Propagates any error raised by cost evaluations performed during
    ///   finite differencing, including budget exhaustion.
    /// - Returns validation errors if the gradient has the wrong dimension
    ///   or non-finite entries.
    fn gradient(&self, theta: &Self::Param) -> Result<Self::Gradient, Error> {
        let dim = theta.len();
        match self.f.grad(theta, self.data) {
            Ok(grad) => {
                validate_grad(&grad, dim)?;
                Ok(grad)
            }
            Err(OptError::GradientNotImplemented) => {
                let closure_err: RefCell<Option<Error>> = RefCell::new(None);
                let cost_func = |theta: &Theta| -> f64 {
                    match self.cost(theta) {
                        Ok(val) => val,
                        Err(e) => {
                            let mut slot = closure_err.borrow_mut();
                            if slot.is_none() {
                                *slot = Some(e);
                            }
                            f64::NAN
                        }
                    }
                };
                let fd_grad = theta.central_diff(&cost_func);
                if closure_err.borrow().is_some() {
                    return forward_fd_retry(theta, &cost_func, &closure_err);
                }
                match validate_grad(&fd_grad, dim) {
                    Ok(()) => Ok(fd_grad),
                    Err(_) => forward_fd_retry(theta, &cost_func, &closure_err),
                }
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// Forward-difference retry for the gradient, with error capture.
///
/// Clears `closure_err`, runs `forward_diff`, surfaces any captured cost
/// error, and validates the resulting gradient before returning it.
fn forward_fd_retry<G: Fn(&Theta) -> f64>(
    theta: &Theta, func: &G, closure_err: &RefCell<Option<Error>>,
) -> Result<Grad, Error> {
    closure_err.replace(None);
    let fd_grad = theta.forward_diff(func);
    if let Some(err) = closure_err.take() {
        return Err(err);
    }
    validate_grad(&fd_grad, theta.len())?;
    Ok(fd_grad)
}
