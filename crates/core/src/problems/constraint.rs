/// A set of inequality constraints `c_i(x) ≤ 0` over `N` solver variables.
///
/// A point is feasible when every constraint value is non-positive and
/// strictly feasible when every value is negative. Interior-point solvers
/// only ever evaluate strictly feasible points, so implementations may assume
/// nothing about behavior outside the feasible region beyond returning finite
/// values.
pub trait InequalityConstraints<const N: usize> {
    /// Returns the number of constraints.
    fn count(&self) -> usize;

    /// Returns the constraint values `c_i(x)`, one per constraint.
    fn values(&self, x: &[f64; N]) -> Vec<f64>;

    /// Returns the constraint gradients `∇c_i(x)`, one row per constraint.
    fn jacobian(&self, x: &[f64; N]) -> Vec<[f64; N]>;

    /// Returns the multiplier-weighted curvature `Σ λ_i ∇²c_i(x)`.
    ///
    /// `multipliers` has one entry per constraint. Linear constraints
    /// contribute nothing and return the zero matrix.
    fn weighted_hessian(&self, x: &[f64; N], multipliers: &[f64]) -> [[f64; N]; N];

    /// Returns the largest constraint violation at `x`, or zero if feasible.
    fn max_violation(&self, x: &[f64; N]) -> f64 {
        self.values(x).into_iter().fold(0.0, f64::max)
    }
}
