//! Contour plots of a convex quadratic minimized over a norm ball.
//!
//! The objective `f(x) = ½ (x − c)ᵀ Q (x − c)` is minimized subject to either
//! `|x1| + |x2| ≤ t` (an L1 diamond) or `x1² + x2² ≤ t²` (an L2 disk). The
//! constrained minimizer is found with the trust-region interior-point solver
//! from `normplot-solvers`, and [`pipeline::run`] turns the result into
//! [`PlotData`]: a sampled grid of objective values, the contour levels to
//! draw, the feasible region outline, and the figure dimensions.
//!
//! Drawing is optional. With the `plot` feature, `render::show` opens an
//! interactive window; otherwise the plot data can be exported as JSON.

pub mod config;
pub mod contour;
pub mod grid;
pub mod levels;
pub mod pipeline;
pub mod solve;

mod constraint;
mod point;
mod problem;
mod quadratic;

#[cfg(feature = "plot")]
pub mod render;

pub use config::RunConfig;
pub use constraint::{Boundary, ConstraintSpec, LinearInequality, NormBall};
pub use contour::{ContourLine, Segment};
pub use grid::{AxisBounds, FigureSize, Grid};
pub use levels::LevelSequence;
pub use pipeline::PlotData;
pub use point::Point;
pub use problem::ProblemSpec;
pub use quadratic::{Form, ProblemError, QuadraticForm};
pub use solve::SolverResult;
