pub mod constraint;
pub mod optimization;

pub use constraint::InequalityConstraints;
pub use optimization::MinimizationProblem;
