use normplot_core::Observer;
use normplot_solvers::optimization::trust_constr::Event;
use tracing::{debug, trace};

/// An observer that forwards solver events to `tracing`.
///
/// Accepted and rejected steps are logged at `TRACE`, barrier reductions at
/// `DEBUG`. Never returns an action.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl<const N: usize, A> Observer<Event<N>, A> for LogObserver {
    fn observe(&mut self, event: &Event<N>) -> Option<A> {
        match event {
            Event::Accepted {
                iter,
                point,
                step_norm,
                ratio,
                radius,
                barrier,
            } => trace!(
                iter,
                x = ?point.x,
                objective = point.objective,
                step_norm,
                ratio,
                radius,
                barrier,
                "step accepted"
            ),
            Event::Rejected {
                iter,
                trial,
                ratio,
                radius,
                barrier,
                ..
            } => trace!(iter, trial = ?trial, ratio, radius, barrier, "step rejected"),
            Event::BarrierReduced {
                iter,
                point,
                optimality,
                barrier,
            } => debug!(
                iter,
                x = ?point.x,
                objective = point.objective,
                optimality,
                barrier,
                "barrier reduced"
            ),
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use normplot_solvers::optimization::trust_constr::{Action, Point};

    #[test]
    fn never_returns_an_action() {
        let mut observer = LogObserver;
        let event = Event::Rejected {
            iter: 3,
            point: Point::new([0.0, 0.0], 1.0),
            trial: [2.0, 0.0],
            ratio: f64::NEG_INFINITY,
            radius: 0.5,
            barrier: 0.1,
        };

        let action: Option<Action> = observer.observe(&event);
        assert!(action.is_none());
    }
}
