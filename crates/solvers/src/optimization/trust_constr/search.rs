use normplot_core::{InequalityConstraints, MinimizationProblem, Observer};
use tracing::{debug, info, trace};

use super::{
    Action, Config, Error, Event, Solution, barrier::BarrierEval, solution::Status, state::State,
};

/// Core trust-region interior-point loop.
///
/// Alternates between trust-region iterations on the current barrier
/// subproblem and barrier reductions once a subproblem is solved. Barrier
/// reductions do not count against the iteration budget.
pub(super) fn search<P, C, Obs, const N: usize>(
    problem: &P,
    constraints: &C,
    x0: [f64; N],
    config: &Config,
    mut observer: Obs,
) -> Result<Solution<N>, Error>
where
    P: MinimizationProblem<N>,
    C: InequalityConstraints<N>,
    Obs: Observer<Event<N>, Action>,
{
    let values = constraints.values(&x0);
    if values.iter().any(|c| c.is_nan()) {
        return Err(Error::NonFinite);
    }
    let violation = values.into_iter().fold(f64::NEG_INFINITY, f64::max);
    if violation >= 0.0 {
        return Err(Error::InfeasibleStart { violation });
    }

    let eval = BarrierEval::at(problem, constraints, x0, config.initial_barrier())
        .ok_or(Error::NonFinite)?;
    let mut state = State::new(eval, config.initial_radius());

    info!(
        event = "solve_start",
        constraints = constraints.count(),
        objective = state.point().objective,
        barrier = state.barrier(),
    );

    let mut iter = 0;
    loop {
        if state.is_subproblem_done(config) {
            let barrier = state.barrier();
            if barrier <= config.barrier_tol() {
                return Ok(finish(state, Status::Converged, iter));
            }

            let point = state.point();
            let optimality = state.optimality();
            let next_barrier = barrier * config.barrier_decay();
            let eval = state
                .eval()
                .with_barrier(problem, constraints, next_barrier)
                .ok_or(Error::NonFinite)?;
            state.restart(eval, config.initial_radius());

            debug!(
                event = "barrier_reduced",
                iter,
                barrier = next_barrier,
                optimality,
                objective = point.objective,
            );

            let event = Event::BarrierReduced {
                iter,
                point,
                optimality,
                barrier: next_barrier,
            };
            if let Some(Action::StopEarly) = observer.observe(&event) {
                return Ok(finish(state, Status::StoppedByObserver, iter));
            }
            continue;
        }

        if iter >= config.max_iters() {
            return Ok(finish(state, Status::MaxIters, iter));
        }
        iter += 1;

        let event = state.step(problem, constraints, config, iter);
        trace!(
            event = "trust_region_step",
            iter,
            accepted = matches!(event, Event::Accepted { .. }),
            objective = event.point().objective,
            barrier = event.barrier(),
        );

        if let Some(Action::StopEarly) = observer.observe(&event) {
            return Ok(finish(state, Status::StoppedByObserver, iter));
        }
    }
}

fn finish<const N: usize>(state: State<N>, status: Status, iters: usize) -> Solution<N> {
    let solution = state.into_solution(status, iters);
    info!(
        event = "solve_end",
        status = ?solution.status,
        iters = solution.iters,
        objective = solution.objective,
        optimality = solution.optimality,
    );
    solution
}
