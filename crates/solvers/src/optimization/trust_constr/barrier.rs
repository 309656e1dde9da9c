use normplot_core::{InequalityConstraints, MinimizationProblem};

use crate::linalg;

use super::Point;

/// The log-barrier objective `φ_μ` and its derivatives at a strictly feasible point.
#[derive(Debug, Clone)]
pub(super) struct BarrierEval<const N: usize> {
    pub(super) x: [f64; N],

    /// Objective `f(x)` without the barrier term.
    pub(super) objective: f64,

    /// Barrier objective `φ_μ(x)`.
    pub(super) value: f64,

    /// `∇φ_μ(x) = ∇f(x) + Σ λ_i ∇c_i(x)`.
    pub(super) gradient: [f64; N],

    /// `∇²f(x) + Σ λ_i ∇²c_i(x) + Σ (λ_i / −c_i) ∇c_i ∇c_iᵀ`.
    pub(super) hessian: [[f64; N]; N],

    /// Constraint values `c_i(x)`, all negative.
    pub(super) values: Vec<f64>,

    /// Constraint gradients `∇c_i(x)`.
    pub(super) jacobian: Vec<[f64; N]>,

    /// Barrier multipliers `λ_i = μ / −c_i(x)`.
    pub(super) multipliers: Vec<f64>,

    /// Barrier parameter `μ`.
    pub(super) barrier: f64,
}

impl<const N: usize> BarrierEval<N> {
    /// Evaluates the barrier objective at `x`.
    ///
    /// Returns `None` if `x` is not strictly feasible or if any evaluated
    /// quantity is not finite.
    pub(super) fn at<P, C>(problem: &P, constraints: &C, x: [f64; N], barrier: f64) -> Option<Self>
    where
        P: MinimizationProblem<N>,
        C: InequalityConstraints<N>,
    {
        let values = constraints.values(&x);
        if !values.iter().all(|c| *c < 0.0) {
            return None;
        }

        let objective = problem.objective(&x);
        let log_slack: f64 = values.iter().map(|c| (-c).ln()).sum();
        let value = objective - barrier * log_slack;

        let jacobian = constraints.jacobian(&x);
        let multipliers: Vec<f64> = values.iter().map(|c| barrier / -c).collect();

        let mut gradient = problem.gradient(&x);
        for (row, lambda) in jacobian.iter().zip(&multipliers) {
            gradient = linalg::axpy(*lambda, row, &gradient);
        }

        let mut hessian = problem.hessian(&x);
        linalg::add_assign(&mut hessian, &constraints.weighted_hessian(&x, &multipliers));
        for ((row, lambda), c) in jacobian.iter().zip(&multipliers).zip(&values) {
            linalg::add_outer(&mut hessian, lambda / -c, row);
        }

        let finite = value.is_finite()
            && gradient.iter().all(|g| g.is_finite())
            && hessian.iter().flatten().all(|h| h.is_finite());
        if !finite {
            return None;
        }

        Some(Self {
            x,
            objective,
            value,
            gradient,
            hessian,
            values,
            jacobian,
            multipliers,
            barrier,
        })
    }

    /// Re-evaluates at the same `x` with a new barrier parameter.
    pub(super) fn with_barrier<P, C>(
        &self,
        problem: &P,
        constraints: &C,
        barrier: f64,
    ) -> Option<Self>
    where
        P: MinimizationProblem<N>,
        C: InequalityConstraints<N>,
    {
        Self::at(problem, constraints, self.x, barrier)
    }

    /// Stationarity residual `‖∇f + Σ λ_i ∇c_i‖∞`.
    pub(super) fn optimality(&self) -> f64 {
        linalg::norm_inf(&self.gradient)
    }

    pub(super) fn point(&self) -> Point<N> {
        Point::new(self.x, self.objective)
    }
}
