use crate::{Boundary, ConstraintSpec, Form, NormBall, Point, ProblemError, QuadraticForm};

/// A constrained problem: minimize a quadratic over a norm ball.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProblemSpec {
    objective: QuadraticForm,
    form: Form,
    family: NormBall,
    threshold: f64,
}

impl ProblemSpec {
    /// Creates a problem whose objective is minimized at `min_point`.
    ///
    /// # Errors
    ///
    /// Returns an error if `min_point` is not finite or `threshold` is not
    /// finite and positive.
    pub fn new(
        min_point: Point,
        form: Form,
        family: NormBall,
        threshold: f64,
    ) -> Result<Self, ProblemError> {
        if !threshold.is_finite() || threshold <= 0.0 {
            return Err(ProblemError::Threshold(threshold));
        }
        Ok(Self {
            objective: QuadraticForm::with_form(min_point, form)?,
            form,
            family,
            threshold,
        })
    }

    /// Returns the objective.
    #[must_use]
    pub fn objective(&self) -> &QuadraticForm {
        &self.objective
    }

    /// Returns the unconstrained minimizer.
    #[must_use]
    pub fn min_point(&self) -> Point {
        self.objective.center()
    }

    #[must_use]
    pub fn form(&self) -> Form {
        self.form
    }

    #[must_use]
    pub fn family(&self) -> NormBall {
        self.family
    }

    #[must_use]
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Returns the constraint set handed to the solver.
    #[must_use]
    pub fn constraints(&self) -> ConstraintSpec {
        ConstraintSpec::build(self.family, self.threshold)
    }

    /// Returns the outline of the feasible region.
    #[must_use]
    pub fn boundary(&self) -> Boundary {
        Boundary::of(self.family, self.threshold)
    }

    /// Returns a plain-text description of the constraint, like `|x₁| + |x₂| ≤ 1`.
    #[must_use]
    pub fn constraint_formula(&self) -> String {
        let t = self.threshold;
        match self.family {
            NormBall::L1 => format!("|x₁| + |x₂| ≤ {t}"),
            NormBall::L2 => format!("x₁² + x₂² ≤ {}", t * t),
        }
    }
}
