//! Numerical solvers for the normplot workspace.
//!
//! # Modules
//!
//! - [`optimization`] — constrained minimization of smooth objectives
//! - [`linalg`] — small dense vector and matrix helpers over `[f64; N]`

pub mod linalg;
pub mod optimization;
