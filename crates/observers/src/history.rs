use normplot_core::Observer;

use crate::traits::{HasIterate, HasObjective};

/// Records the path a solver takes through the search space.
///
/// Only events whose iterate moved are recorded, so the history is the
/// sequence of accepted iterates. The starting point is not reported by the
/// solver; seed it with [`History::starting_at`] to include it.
#[derive(Debug, Clone, PartialEq)]
pub struct History<const N: usize> {
    iterates: Vec<[f64; N]>,
    objectives: Vec<f64>,
}

impl<const N: usize> History<N> {
    /// Creates a history that begins at `x0` with objective `objective`.
    #[must_use]
    pub fn starting_at(x0: [f64; N], objective: f64) -> Self {
        Self {
            iterates: vec![x0],
            objectives: vec![objective],
        }
    }

    /// Returns the recorded iterates in order.
    #[must_use]
    pub fn iterates(&self) -> &[[f64; N]] {
        &self.iterates
    }

    /// Returns the objective value at each recorded iterate.
    #[must_use]
    pub fn objectives(&self) -> &[f64] {
        &self.objectives
    }

    /// Returns the number of recorded iterates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.iterates.len()
    }

    /// Returns `true` if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.iterates.is_empty()
    }

    /// Consumes the history and returns the iterates.
    #[must_use]
    pub fn into_iterates(self) -> Vec<[f64; N]> {
        self.iterates
    }
}

impl<const N: usize, E, A> Observer<E, A> for History<N>
where
    E: HasIterate<N> + HasObjective,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        if event.moved() {
            self.iterates.push(event.iterate());
            self.objectives.push(event.objective());
        }
        None
    }
}

/// Allows `&mut History<N>` to be passed to solvers that take an observer by
/// value, so the history can be read after the solve completes.
impl<const N: usize, E, A> Observer<E, A> for &mut History<N>
where
    E: HasIterate<N> + HasObjective,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        (**self).observe(event)
    }
}
