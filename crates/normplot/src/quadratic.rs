use std::{fmt, str::FromStr};

use normplot_core::MinimizationProblem;
use normplot_solvers::linalg;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Point;

/// Errors that can occur when building a problem.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum ProblemError {
    #[error("minimizer must have finite coordinates")]
    NonFiniteCenter,

    #[error("matrix must be finite and symmetric")]
    NotSymmetric,

    #[error("matrix must be positive definite")]
    NotPositiveDefinite,

    #[error("threshold must be finite and positive, got {0}")]
    Threshold(f64),
}

/// The two weight matrices the tool knows how to plot.
///
/// `Coupled` has an off-diagonal term, so its level sets are tilted ellipses.
/// `Diagonal` is axis aligned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Form {
    Coupled,
    Diagonal,
}

impl Form {
    /// Returns the weight matrix `Q` of this form.
    #[must_use]
    pub const fn matrix(self) -> [[f64; 2]; 2] {
        match self {
            Form::Coupled => [[1.0, 0.5], [0.5, 2.0]],
            Form::Diagonal => [[1.0, 0.0], [0.0, 2.0]],
        }
    }
}

impl fmt::Display for Form {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Form::Coupled => "coupled",
            Form::Diagonal => "diagonal",
        })
    }
}

impl FromStr for Form {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "coupled" => Ok(Form::Coupled),
            "diagonal" => Ok(Form::Diagonal),
            other => Err(format!(
                "unknown form `{other}`, expected `coupled` or `diagonal`"
            )),
        }
    }
}

/// A convex quadratic `f(x) = ½ (x − c)ᵀ Q (x − c)`.
///
/// `Q` is symmetric positive definite, so `c` is the unique global minimizer
/// and `f(c) = 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadraticForm {
    center: Point,
    matrix: [[f64; 2]; 2],
}

impl QuadraticForm {
    /// Creates a quadratic with minimizer `center` and weight matrix `matrix`.
    ///
    /// # Errors
    ///
    /// Returns an error if `center` is not finite or `matrix` is not a finite
    /// symmetric positive definite matrix.
    pub fn new(center: Point, matrix: [[f64; 2]; 2]) -> Result<Self, ProblemError> {
        if !center.is_finite() {
            return Err(ProblemError::NonFiniteCenter);
        }
        if matrix.iter().flatten().any(|m| !m.is_finite()) || !linalg::is_symmetric(&matrix, 0.0)
        {
            return Err(ProblemError::NotSymmetric);
        }
        if linalg::cholesky(&matrix).is_none() {
            return Err(ProblemError::NotPositiveDefinite);
        }
        Ok(Self { center, matrix })
    }

    /// Creates a quadratic using one of the known weight matrices.
    ///
    /// # Errors
    ///
    /// Returns an error if `center` is not finite.
    pub fn with_form(center: Point, form: Form) -> Result<Self, ProblemError> {
        Self::new(center, form.matrix())
    }

    /// Returns the unconstrained minimizer.
    #[must_use]
    pub fn center(&self) -> Point {
        self.center
    }

    /// Returns the weight matrix `Q`.
    #[must_use]
    pub fn matrix(&self) -> &[[f64; 2]; 2] {
        &self.matrix
    }

    /// Evaluates the quadratic at `p`.
    #[must_use]
    pub fn value(&self, p: Point) -> f64 {
        self.objective(&p.to_array())
    }

    /// Returns a plain-text formula, such as
    /// `½(x₁ − 3)² + (x₂ − 2)² + ½(x₁ − 3)(x₂ − 2)`.
    #[must_use]
    pub fn formula(&self) -> String {
        let u = shifted("x₁", self.center.x1);
        let v = shifted("x₂", self.center.x2);
        let [[a, b], [_, d]] = self.matrix;

        let mut terms = vec![
            format!("{}{u}²", coefficient(a / 2.0)),
            format!("{}{v}²", coefficient(d / 2.0)),
        ];
        if b != 0.0 {
            terms.push(format!("{}{u}{v}", coefficient(b)));
        }
        terms.join(" + ")
    }

    fn offset(&self, x: &[f64; 2]) -> [f64; 2] {
        [x[0] - self.center.x1, x[1] - self.center.x2]
    }
}

impl MinimizationProblem<2> for QuadraticForm {
    fn objective(&self, x: &[f64; 2]) -> f64 {
        0.5 * linalg::quad_form(&self.matrix, &self.offset(x))
    }

    fn gradient(&self, x: &[f64; 2]) -> [f64; 2] {
        linalg::mat_vec(&self.matrix, &self.offset(x))
    }

    fn hessian(&self, _x: &[f64; 2]) -> [[f64; 2]; 2] {
        self.matrix
    }
}

fn shifted(name: &str, c: f64) -> String {
    if c == 0.0 {
        name.to_string()
    } else if c > 0.0 {
        format!("({name} − {c})")
    } else {
        format!("({name} + {})", -c)
    }
}

fn coefficient(k: f64) -> String {
    if k == 1.0 {
        String::new()
    } else if k == 0.5 {
        "½".to_string()
    } else {
        format!("{k}·")
    }
}
