use super::Point;

/// Events emitted by the trust-region interior-point solver.
///
/// Every event carries the current iterate, the trust radius that will be
/// used next, and the barrier parameter in effect. Observers use these to
/// record the solver path, log progress, or stop early.
#[derive(Debug, Clone, PartialEq)]
pub enum Event<const N: usize> {
    /// A trial step was accepted and the iterate moved to `point`.
    Accepted {
        /// Iteration number (1-based).
        iter: usize,

        /// The new iterate.
        point: Point<N>,

        /// Euclidean length of the accepted step.
        step_norm: f64,

        /// Ratio of actual to predicted barrier decrease.
        ratio: f64,

        /// Trust radius for the next iteration, in the model's Hessian norm
        /// when that Hessian is positive definite.
        radius: f64,

        /// Barrier parameter in effect.
        barrier: f64,
    },

    /// A trial step was rejected and the trust region shrank.
    Rejected {
        /// Iteration number (1-based).
        iter: usize,

        /// The unchanged iterate.
        point: Point<N>,

        /// The rejected trial point.
        trial: [f64; N],

        /// Ratio of actual to predicted barrier decrease.
        ///
        /// `-∞` when the trial point left the feasible region or used up
        /// too much of a constraint's slack.
        ratio: f64,

        /// Trust radius for the next iteration.
        radius: f64,

        /// Barrier parameter in effect.
        barrier: f64,
    },

    /// A barrier subproblem finished and the barrier parameter decreased.
    BarrierReduced {
        /// Number of iterations completed so far.
        iter: usize,

        /// The iterate that solved the finished subproblem.
        point: Point<N>,

        /// Stationarity residual at `point` for the finished subproblem.
        optimality: f64,

        /// The new barrier parameter.
        barrier: f64,
    },
}

impl<const N: usize> Event<N> {
    /// Returns the iteration number associated with this event.
    #[must_use]
    pub fn iter(&self) -> usize {
        match self {
            Self::Accepted { iter, .. }
            | Self::Rejected { iter, .. }
            | Self::BarrierReduced { iter, .. } => *iter,
        }
    }

    /// Returns the current iterate after this event.
    #[must_use]
    pub fn point(&self) -> Point<N> {
        match self {
            Self::Accepted { point, .. }
            | Self::Rejected { point, .. }
            | Self::BarrierReduced { point, .. } => *point,
        }
    }

    /// Returns the barrier parameter in effect after this event.
    #[must_use]
    pub fn barrier(&self) -> f64 {
        match self {
            Self::Accepted { barrier, .. }
            | Self::Rejected { barrier, .. }
            | Self::BarrierReduced { barrier, .. } => *barrier,
        }
    }
}
