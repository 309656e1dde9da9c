//! Capability traits for cross-solver observers.
//!
//! These traits abstract over solver-specific event types, enabling observers
//! to work generically across different solvers.
//!
//! # Event traits
//!
//! - [`HasObjective`] — events that carry an objective value
//! - [`HasIterate`] — events that carry the current iterate and whether it moved
//!
//! # Example
//!
//! ```rust
//! use normplot_core::Observer;
//! use normplot_observers::traits::HasObjective;
//!
//! struct Best {
//!     objective: f64,
//! }
//!
//! impl<E: HasObjective, A> Observer<E, A> for Best {
//!     fn observe(&mut self, event: &E) -> Option<A> {
//!         self.objective = self.objective.min(event.objective());
//!         None
//!     }
//! }
//! ```

use normplot_solvers::optimization::trust_constr;

/// An event that carries an objective value.
pub trait HasObjective {
    /// Returns the objective for this event.
    fn objective(&self) -> f64;
}

/// An event that carries the solver's current iterate.
pub trait HasIterate<const N: usize> {
    /// Returns the current iterate.
    fn iterate(&self) -> [f64; N];

    /// Returns `true` if the iterate moved with this event.
    fn moved(&self) -> bool;
}

impl<const N: usize> HasObjective for trust_constr::Event<N> {
    fn objective(&self) -> f64 {
        self.point().objective
    }
}

impl<const N: usize> HasIterate<N> for trust_constr::Event<N> {
    fn iterate(&self) -> [f64; N] {
        self.point().x
    }

    fn moved(&self) -> bool {
        matches!(self, trust_constr::Event::Accepted { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use normplot_solvers::optimization::trust_constr::{Event, Point};

    #[test]
    fn trust_constr_event_capabilities() {
        let accepted = Event::Accepted {
            iter: 1,
            point: Point::new([0.5, 0.25], 3.0),
            step_norm: 0.5,
            ratio: 0.9,
            radius: 1.0,
            barrier: 0.1,
        };
        let reduced = Event::BarrierReduced {
            iter: 1,
            point: Point::new([0.5, 0.25], 3.0),
            optimality: 1e-3,
            barrier: 0.02,
        };

        assert_relative_eq!(accepted.objective(), 3.0);
        assert_eq!(accepted.iterate(), [0.5, 0.25]);
        assert!(accepted.moved());
        assert!(!reduced.moved());
    }
}
