use normplot_core::Observer;
use normplot_solvers::optimization::trust_constr::{self, Action, Config, Event, Status};

use crate::{Point, ProblemSpec};

/// The solver always starts from the origin, which is strictly inside every
/// norm ball with a positive radius.
pub const INITIAL_GUESS: Point = Point::ORIGIN;

/// The constrained minimizer found by [`solve`].
#[derive(Debug, Clone, PartialEq)]
pub struct SolverResult {
    /// The best feasible iterate.
    pub point: Point,

    /// Objective value at `point`.
    pub objective: f64,

    /// Why the solver stopped.
    pub status: Status,

    /// Number of iterations performed.
    pub iters: usize,

    /// Lagrange multiplier estimates, one per constraint.
    pub multipliers: Vec<f64>,
}

impl SolverResult {
    /// Returns `true` if the solver met its tolerances.
    #[must_use]
    pub fn converged(&self) -> bool {
        self.status == Status::Converged
    }
}

/// Minimizes the problem's objective over its norm ball.
///
/// Not converging is not an error: the best iterate is returned with its
/// [`Status`] so callers can decide how to report it.
///
/// # Errors
///
/// Returns an error if the solver hits a non-finite evaluation.
pub fn solve<Obs>(
    spec: &ProblemSpec,
    config: &Config,
    observer: Obs,
) -> Result<SolverResult, trust_constr::Error>
where
    Obs: Observer<Event<2>, Action>,
{
    let constraints = spec.constraints();
    let solution = trust_constr::minimize(
        spec.objective(),
        &constraints,
        INITIAL_GUESS.to_array(),
        config,
        observer,
    )?;

    Ok(SolverResult {
        point: Point::from(solution.x),
        objective: solution.objective,
        status: solution.status,
        iters: solution.iters,
        multipliers: solution.multipliers,
    })
}
