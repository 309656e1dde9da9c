use normplot_core::{InequalityConstraints, MinimizationProblem};

use crate::linalg;

use super::{
    Config, Event, Point, Solution,
    barrier::BarrierEval,
    solution::Status,
    subproblem::{keeps_slack, predicted_decrease, trial_step},
};

/// Minimum actual-to-predicted ratio for accepting a step.
const ACCEPT_RATIO: f64 = 1e-4;

/// Below this ratio an accepted step still shrinks the trust region.
const POOR_RATIO: f64 = 0.25;

/// Above this ratio a step that reached the boundary expands the trust region.
const GOOD_RATIO: f64 = 0.75;

/// Predicted decreases below this fraction of `1 + |φ|` are lost in roundoff,
/// so the ratio test can no longer judge the step.
const ROUNDOFF: f64 = 1e-13;

const SHRINK: f64 = 0.25;
const EXPAND: f64 = 2.0;
const MAX_RADIUS: f64 = 1e6;

pub(super) struct State<const N: usize> {
    eval: BarrierEval<N>,
    radius: f64,
    stalled: bool,
}

impl<const N: usize> State<N> {
    pub(super) fn new(eval: BarrierEval<N>, radius: f64) -> Self {
        Self {
            eval,
            radius,
            stalled: false,
        }
    }

    pub(super) fn point(&self) -> Point<N> {
        self.eval.point()
    }

    pub(super) fn barrier(&self) -> f64 {
        self.eval.barrier
    }

    pub(super) fn optimality(&self) -> f64 {
        self.eval.optimality()
    }

    pub(super) fn eval(&self) -> &BarrierEval<N> {
        &self.eval
    }

    /// Starts a new barrier subproblem from the current iterate.
    pub(super) fn restart(&mut self, eval: BarrierEval<N>, radius: f64) {
        self.eval = eval;
        self.radius = radius;
        self.stalled = false;
    }

    /// Returns `true` once the current barrier subproblem is solved.
    ///
    /// The subproblem is solved when the stationarity residual is within
    /// `max(gtol, μ)`, or when the iterate can no longer move.
    pub(super) fn is_subproblem_done(&self, config: &Config) -> bool {
        self.stalled
            || self.radius < config.xtol()
            || self.optimality() <= config.gtol().max(self.barrier())
    }

    /// Computes and tries one trust-region step, returning the resulting event.
    pub(super) fn step<P, C>(
        &mut self,
        problem: &P,
        constraints: &C,
        config: &Config,
        iter: usize,
    ) -> Event<N>
    where
        P: MinimizationProblem<N>,
        C: InequalityConstraints<N>,
    {
        let current = &self.eval;
        let barrier = current.barrier;

        let step = trial_step(
            &current.gradient,
            &current.hessian,
            &current.values,
            &current.jacobian,
            self.radius,
        );
        let p = step.p;
        let trial_x = linalg::axpy(1.0, &p, &current.x);
        let step_norm = linalg::norm(&p);
        let predicted = predicted_decrease(&current.gradient, &current.hessian, &p);

        // The model offers no decrease, so the iterate cannot move.
        if !(predicted > 0.0) {
            self.stalled = true;
            return Event::Rejected {
                iter,
                point: current.point(),
                trial: trial_x,
                ratio: 0.0,
                radius: self.radius,
                barrier,
            };
        }

        let trial = BarrierEval::at(problem, constraints, trial_x, barrier)
            .filter(|t| keeps_slack(&current.values, &t.values));
        let at_roundoff = predicted <= ROUNDOFF * (1.0 + current.value.abs());
        let ratio = trial.as_ref().map_or(f64::NEG_INFINITY, |t| {
            if at_roundoff {
                1.0
            } else {
                (current.value - t.value) / predicted
            }
        });

        match trial {
            Some(next) if ratio >= ACCEPT_RATIO => {
                if ratio >= GOOD_RATIO && step.length >= 0.99 * self.radius {
                    self.radius = (EXPAND * self.radius).min(MAX_RADIUS);
                } else if ratio < POOR_RATIO {
                    self.radius *= SHRINK;
                }
                // A feasible step at roundoff level is the last useful one.
                self.stalled = at_roundoff || step.length <= config.xtol();
                self.eval = next;

                Event::Accepted {
                    iter,
                    point: self.eval.point(),
                    step_norm,
                    ratio,
                    radius: self.radius,
                    barrier,
                }
            }
            _ => {
                let point = current.point();
                self.radius = SHRINK * step.length.min(self.radius);
                self.stalled = false;

                Event::Rejected {
                    iter,
                    point,
                    trial: trial_x,
                    ratio,
                    radius: self.radius,
                    barrier,
                }
            }
        }
    }

    pub(super) fn into_solution(self, status: Status, iters: usize) -> Solution<N> {
        let optimality = self.optimality();
        let BarrierEval {
            x,
            objective,
            multipliers,
            barrier,
            ..
        } = self.eval;

        Solution {
            status,
            x,
            objective,
            multipliers,
            barrier,
            optimality,
            iters,
        }
    }
}
