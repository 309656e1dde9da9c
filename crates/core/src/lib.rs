//! Core traits for the normplot workspace.
//!
//! This crate defines the shared abstractions that solvers, observers, and
//! problem definitions build on:
//!
//! - [`MinimizationProblem`] — a smooth objective with analytic gradient and
//!   Hessian over `N` solver variables
//! - [`InequalityConstraints`] — a set of `c_i(x) ≤ 0` constraints with their
//!   Jacobian and multiplier-weighted curvature
//! - [`Observer`] — receives solver events and optionally returns control actions

mod observer;
mod problems;

pub use observer::Observer;
pub use problems::{InequalityConstraints, MinimizationProblem};
