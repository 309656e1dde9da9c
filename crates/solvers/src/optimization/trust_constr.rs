//! Trust-region interior-point method for inequality-constrained problems.
//!
//! # Algorithm
//!
//! The constraints `c_i(x) ≤ 0` are folded into the objective with a
//! logarithmic barrier,
//!
//! ```text
//! φ_μ(x) = f(x) − μ Σ ln(−c_i(x))
//! ```
//!
//! and a sequence of barrier subproblems is solved for decreasing `μ`. Each
//! subproblem is minimized with a trust-region Newton method: the solver
//! builds the local quadratic model of `φ_μ` from the exact gradient and
//! Hessian (including the constraint curvature weighted by the barrier
//! multipliers `λ_i = μ / −c_i`), and takes a step inside the trust region.
//! When the model Hessian `B` is positive definite the region is measured in
//! the norm `√(pᵀBp)`, so it stretches along a constraint and narrows across
//! it; the step is then the Newton step cut back to the radius. Otherwise the
//! region is Euclidean and the step follows the dogleg path. The step is
//! truncated so every linearized slack keeps a fraction of its current value,
//! rejected if an actual slack does not, and otherwise accepted or rejected by
//! comparing actual to predicted decrease.
//!
//! A subproblem is finished when the stationarity residual
//! `‖∇f + Σ λ_i ∇c_i‖∞` drops below `max(gtol, μ)` or the iterate stops
//! moving: the step or trust radius falls below `xtol`, or the predicted
//! decrease of an accepted step is lost in the roundoff of `φ_μ`. The solve
//! converges once a subproblem finishes with `μ ≤ barrier_tol`.
//!
//! # When to Use
//!
//! - The objective is smooth with an analytic Hessian
//! - The feasible region has a non-empty interior containing the initial guess
//! - The problem is convex, so the barrier path leads to the global minimizer
//!
//! # Observer Events
//!
//! The solver emits one [`Event`] per trust-region iteration and one per
//! barrier reduction:
//!
//! - [`Event::Accepted`] — the trial step decreased the barrier objective
//! - [`Event::Rejected`] — the trial step was infeasible or did not decrease
//!   the barrier objective enough; the trust region shrank
//! - [`Event::BarrierReduced`] — a subproblem finished and `μ` decreased
//!
//! Observers can return [`Action::StopEarly`] to halt immediately with the
//! current iterate.
//!
//! # Nonconvergence
//!
//! Running out of iterations is not an error. The solver returns the current
//! (always strictly feasible) iterate with [`Status::MaxIters`]; callers that
//! want to fail loudly use [`Solution::into_converged`].

mod action;
mod barrier;
mod config;
mod error;
mod event;
mod point;
mod search;
mod solution;
mod state;
mod subproblem;


pub use action::Action;
pub use config::{Config, ConfigError};
pub use error::Error;
pub use event::Event;
pub use point::Point;
pub use solution::{NotConverged, Solution, Status};

use normplot_core::{InequalityConstraints, MinimizationProblem, Observer};

use search::search;

/// Finds the constrained minimum of the objective starting from `x0`.
///
/// The observer receives an [`Event`] for each iteration and each barrier
/// reduction. See the [module docs](self) for details.
///
/// # Errors
///
/// Returns an error if `x0` is not strictly feasible, or if the objective or
/// its derivatives are not finite at an iterate.
pub fn minimize<P, C, Obs, const N: usize>(
    problem: &P,
    constraints: &C,
    x0: [f64; N],
    config: &Config,
    observer: Obs,
) -> Result<Solution<N>, Error>
where
    P: MinimizationProblem<N>,
    C: InequalityConstraints<N>,
    Obs: Observer<Event<N>, Action>,
{
    search(problem, constraints, x0, config, observer)
}

/// Finds the constrained minimum of the objective without observer support.
///
/// This is a convenience wrapper around [`minimize`] that uses a no-op observer.
///
/// # Errors
///
/// Returns an error if `x0` is not strictly feasible, or if the objective or
/// its derivatives are not finite at an iterate.
pub fn minimize_unobserved<P, C, const N: usize>(
    problem: &P,
    constraints: &C,
    x0: [f64; N],
    config: &Config,
) -> Result<Solution<N>, Error>
where
    P: MinimizationProblem<N>,
    C: InequalityConstraints<N>,
{
    minimize(problem, constraints, x0, config, ())
}
