use thiserror::Error;

/// Indicates whether the solver converged or hit the iteration limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Converged according to the configured tolerances.
    Converged,

    /// Reached the iteration limit without converging.
    MaxIters,

    /// Stopped early due to an observer decision.
    StoppedByObserver,
}

/// The result of a trust-region interior-point solve.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution<const N: usize> {
    /// Final solver status.
    pub status: Status,

    /// Final iterate. Always strictly feasible.
    pub x: [f64; N],

    /// Objective value at `x`.
    pub objective: f64,

    /// Lagrange multiplier estimates `μ / −c_i(x)`, one per constraint.
    pub multipliers: Vec<f64>,

    /// Barrier parameter of the last subproblem.
    pub barrier: f64,

    /// Stationarity residual `‖∇f + Σ λ_i ∇c_i‖∞` at `x`.
    pub optimality: f64,

    /// Iteration count when the solver finished.
    pub iters: usize,
}

/// Returned by [`Solution::into_converged`] when the solver did not converge.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("solver did not converge ({:?} after {} iterations)", solution.status, solution.iters)]
pub struct NotConverged<const N: usize> {
    /// The best iterate the solver produced.
    pub solution: Solution<N>,
}

impl<const N: usize> Solution<N> {
    /// Returns `true` if the solver met its tolerances.
    #[must_use]
    pub fn is_converged(&self) -> bool {
        self.status == Status::Converged
    }

    /// Converts a non-converged solution into an error.
    ///
    /// Use this when a best-effort result is not acceptable.
    ///
    /// # Errors
    ///
    /// Returns [`NotConverged`] carrying this solution if the status is
    /// anything other than [`Status::Converged`].
    pub fn into_converged(self) -> Result<Self, NotConverged<N>> {
        if self.is_converged() {
            Ok(self)
        } else {
            Err(NotConverged { solution: self })
        }
    }
}
