/// Defines a smooth minimization problem over `N` solver variables.
///
/// Second-order solvers need the objective together with its exact first and
/// second derivatives. Implementors supply all three analytically, so no
/// finite differencing happens inside a solve.
///
/// The const generic `N` is the number of solver variables.
/// For example, `N = 2` represents a problem in the plane.
pub trait MinimizationProblem<const N: usize> {
    /// Returns the objective value at `x`.
    fn objective(&self, x: &[f64; N]) -> f64;

    /// Returns the gradient of the objective at `x`.
    fn gradient(&self, x: &[f64; N]) -> [f64; N];

    /// Returns the Hessian of the objective at `x`.
    ///
    /// The matrix must be symmetric. Convex problems return a positive
    /// semi-definite matrix everywhere.
    fn hessian(&self, x: &[f64; N]) -> [[f64; N]; N];
}

impl<const N: usize, P> MinimizationProblem<N> for &P
where
    P: MinimizationProblem<N> + ?Sized,
{
    fn objective(&self, x: &[f64; N]) -> f64 {
        (**self).objective(x)
    }

    fn gradient(&self, x: &[f64; N]) -> [f64; N] {
        (**self).gradient(x)
    }

    fn hessian(&self, x: &[f64; N]) -> [[f64; N]; N] {
        (**self).hessian(x)
    }
}
