//! Solvers for constrained minimization problems.
//!
//! A [`MinimizationProblem`] supplies an objective with its analytic gradient
//! and Hessian; an [`InequalityConstraints`] set supplies `c_i(x) ≤ 0`
//! constraints with their Jacobian and curvature. Solvers in this module
//! search for the feasible `x` that minimizes the objective.
//!
//! # Solvers
//!
//! - [`trust_constr`] — trust-region interior-point method for smooth convex
//!   problems with inequality constraints
//!
//! [`MinimizationProblem`]: normplot_core::MinimizationProblem
//! [`InequalityConstraints`]: normplot_core::InequalityConstraints

pub mod trust_constr;
