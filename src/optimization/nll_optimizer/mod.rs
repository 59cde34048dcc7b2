//! nll_optimizer: argmin-powered negative log-likelihood minimizer.
//!
//! Purpose
//! -------
//! Provide a high-level, argmin-backed optimization layer for minimizing
//! summed negative log-likelihoods. Callers implement a single trait,
//! [`NegLogLikelihood`], and invoke [`minimize`] to run L-BFGS with a
//! configurable line search, tolerances, iteration and evaluation caps, and
//! finite-difference fallbacks.
//!
//! Key behaviors
//! -------------
//! - Bridge user objectives into argmin problems via
//!   [`adapter::ArgMinAdapter`], which also enforces the
//!   `max_fun_evals` evaluation budget.
//! - Expose one user-facing entry point, [`minimize`], that validates the
//!   initial guess, builds the configured solver, executes it, and
//!   normalizes results into a [`SolverReport`].
//! - Approximate missing derivatives by robust finite differences
//!   ([`adapter`] for gradients, [`finite_diff`] for Hessians), with
//!   post-hoc validation and error capture.
//!
//! Invariants & assumptions
//! ------------------------
//! - The objective is minimized as-is: user code supplies the negative
//!   log-likelihood directly and there is no sign flip in this layer.
//! - [`NegLogLikelihood::value`] must absorb numeric trouble into large
//!   finite penalties; an error return aborts the whole run.
//! - Parameters live in an unconstrained optimizer space as
//!   [`types::Theta`]. Any mapping from constrained to unconstrained space
//!   happens in the model layer.
//! - Configuration types ([`Tolerances`], [`FitOptions`]) are validated on
//!   construction and treated as internally consistent by the solver layer.
//! - Errors bubble up as [`crate::optimization::errors::OptResult`]; this
//!   module and its children never intentionally panic.
//!
//! Downstream usage
//! ----------------
//! - Model types implement [`NegLogLikelihood`], then call [`minimize`]
//!   with an initial [`types::Theta`], a data payload, and [`FitOptions`].
//! - A returned [`SolverReport`] is not necessarily converged; callers
//!   decide how to surface `converged == false` (the count-model layer
//!   turns it into a failed fit state).

pub mod adapter;
pub mod api;
pub mod builders;
pub mod finite_diff;
pub mod run;
pub mod traits;
pub mod types;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::api::minimize;
pub use self::traits::{FitOptions, LineSearcher, NegLogLikelihood, SolverReport, Tolerances};
pub use self::types::{Cost, FnEvalMap, Grad, Theta, DEFAULT_LBFGS_MEM};
