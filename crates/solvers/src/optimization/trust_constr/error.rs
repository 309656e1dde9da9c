use thiserror::Error;

/// Errors that can occur during a trust-region interior-point solve.
///
/// Configuration problems are caught when a [`Config`](super::Config) is
/// built, so they never surface here.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum Error {
    /// The initial guess is on or outside the feasible boundary.
    ///
    /// `violation` is the largest constraint value `c_i(x0)`, which is
    /// non-negative here.
    #[error("initial guess is not strictly feasible (max constraint value {violation})")]
    InfeasibleStart { violation: f64 },

    #[error("objective, gradient, or Hessian is not finite at an iterate")]
    NonFinite,
}
