use std::{f64::consts::TAU, fmt, str::FromStr};

use normplot_core::InequalityConstraints;
use normplot_solvers::linalg;
use serde::{Deserialize, Serialize};

use crate::Point;

/// Which norm bounds the solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NormBall {
    /// `|x1| + |x2| ≤ t`, a diamond.
    L1,
    /// `x1² + x2² ≤ t²`, a disk.
    L2,
}

impl fmt::Display for NormBall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            NormBall::L1 => "l1",
            NormBall::L2 => "l2",
        })
    }
}

impl FromStr for NormBall {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "l1" => Ok(NormBall::L1),
            "l2" => Ok(NormBall::L2),
            other => Err(format!("unknown norm `{other}`, expected `l1` or `l2`")),
        }
    }
}

/// A single half-plane `a·x ≤ b`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinearInequality {
    pub coefficients: [f64; 2],
    pub upper_bound: f64,
}

impl LinearInequality {
    /// Returns `a·x − b`, which is non-positive inside the half-plane.
    #[must_use]
    pub fn residual(&self, x: &[f64; 2]) -> f64 {
        linalg::dot(&self.coefficients, x) - self.upper_bound
    }
}

/// The feasible region in a form the solver can consume.
///
/// The L1 ball is the intersection of four half-planes. The L2 ball is a
/// single smooth constraint `x1² + x2² − t² ≤ 0`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConstraintSpec {
    Linear { inequalities: Vec<LinearInequality> },
    Nonlinear { threshold: f64 },
}

impl ConstraintSpec {
    /// Builds the constraint set for a norm ball of radius `threshold`.
    ///
    /// The threshold is assumed to be positive.
    #[must_use]
    pub fn build(family: NormBall, threshold: f64) -> Self {
        match family {
            NormBall::L1 => {
                let inequalities = [[1.0, 1.0], [-1.0, -1.0], [-1.0, 1.0], [1.0, -1.0]]
                    .into_iter()
                    .map(|coefficients| LinearInequality {
                        coefficients,
                        upper_bound: threshold,
                    })
                    .collect();
                ConstraintSpec::Linear { inequalities }
            }
            NormBall::L2 => ConstraintSpec::Nonlinear { threshold },
        }
    }

    /// Returns `true` if `p` satisfies every constraint to within `tol`.
    #[must_use]
    pub fn contains(&self, p: Point, tol: f64) -> bool {
        self.max_violation(&p.to_array()) <= tol
    }
}

impl InequalityConstraints<2> for ConstraintSpec {
    fn count(&self) -> usize {
        match self {
            ConstraintSpec::Linear { inequalities } => inequalities.len(),
            ConstraintSpec::Nonlinear { .. } => 1,
        }
    }

    fn values(&self, x: &[f64; 2]) -> Vec<f64> {
        match self {
            ConstraintSpec::Linear { inequalities } => {
                inequalities.iter().map(|ineq| ineq.residual(x)).collect()
            }
            ConstraintSpec::Nonlinear { threshold } => {
                vec![linalg::dot(x, x) - threshold * threshold]
            }
        }
    }

    fn jacobian(&self, x: &[f64; 2]) -> Vec<[f64; 2]> {
        match self {
            ConstraintSpec::Linear { inequalities } => {
                inequalities.iter().map(|ineq| ineq.coefficients).collect()
            }
            ConstraintSpec::Nonlinear { .. } => vec![linalg::scale(2.0, x)],
        }
    }

    fn weighted_hessian(&self, _x: &[f64; 2], multipliers: &[f64]) -> [[f64; 2]; 2] {
        match self {
            ConstraintSpec::Linear { .. } => linalg::zeros(),
            ConstraintSpec::Nonlinear { .. } => {
                let lambda = multipliers.first().copied().unwrap_or(0.0);
                [[2.0 * lambda, 0.0], [0.0, 2.0 * lambda]]
            }
        }
    }
}

/// The outline of the feasible region, for drawing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Boundary {
    Polygon { vertices: Vec<Point> },
    Circle { center: Point, radius: f64 },
}

impl Boundary {
    /// Returns the outline of the `family` ball with radius `threshold`.
    #[must_use]
    pub fn of(family: NormBall, threshold: f64) -> Self {
        match family {
            NormBall::L1 => Boundary::Polygon {
                vertices: vec![
                    Point::new(-threshold, 0.0),
                    Point::new(0.0, threshold),
                    Point::new(threshold, 0.0),
                    Point::new(0.0, -threshold),
                ],
            },
            NormBall::L2 => Boundary::Circle {
                center: Point::ORIGIN,
                radius: threshold,
            },
        }
    }

    /// Returns a closed polyline tracing the boundary.
    ///
    /// Polygons return their vertices with the first repeated at the end.
    /// Circles are sampled at `segments` evenly spaced angles (at least 3).
    #[must_use]
    pub fn outline(&self, segments: usize) -> Vec<Point> {
        match self {
            Boundary::Polygon { vertices } => {
                let mut points = vertices.clone();
                if let Some(&first) = vertices.first() {
                    points.push(first);
                }
                points
            }
            Boundary::Circle { center, radius } => {
                let n = segments.max(3);
                (0..=n)
                    .map(|k| {
                        let angle = TAU * (k % n) as f64 / n as f64;
                        Point::new(
                            center.x1 + radius * angle.cos(),
                            center.x2 + radius * angle.sin(),
                        )
                    })
                    .collect()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn l1_ball_is_four_half_planes() {
        let spec = ConstraintSpec::build(NormBall::L1, 1.0);
        assert_eq!(spec.count(), 4);

        assert!(spec.contains(Point::new(0.5, -0.5), 0.0));
        assert!(spec.contains(Point::new(0.0, 1.0), 0.0));
        assert!(!spec.contains(Point::new(0.6, 0.6), 1e-9));
        assert!(!spec.contains(Point::new(-0.6, -0.6), 1e-9));
        assert!(!spec.contains(Point::new(-0.6, 0.6), 1e-9));
        assert!(!spec.contains(Point::new(0.6, -0.6), 1e-9));
    }

    #[test]
    fn l1_values_at_origin_equal_minus_threshold() {
        let spec = ConstraintSpec::build(NormBall::L1, 2.5);
        assert_eq!(spec.values(&[0.0, 0.0]), vec![-2.5; 4]);
    }

    #[test]
    fn l2_constraint_and_derivatives() {
        let spec = ConstraintSpec::build(NormBall::L2, 2.0);
        assert_eq!(spec.count(), 1);

        let x = [1.0, 1.5];
        assert_relative_eq!(spec.values(&x)[0], 1.0 + 2.25 - 4.0);
        assert_eq!(spec.jacobian(&x), vec![[2.0, 3.0]]);
        assert_eq!(spec.weighted_hessian(&x, &[0.5]), [[1.0, 0.0], [0.0, 1.0]]);
    }

    #[test]
    fn linear_constraints_have_no_curvature() {
        let spec = ConstraintSpec::build(NormBall::L1, 1.0);
        assert_eq!(
            spec.weighted_hessian(&[0.1, 0.2], &[1.0, 2.0, 3.0, 4.0]),
            [[0.0; 2]; 2]
        );
    }

    #[test]
    fn diamond_outline_is_closed() {
        let outline = Boundary::of(NormBall::L1, 1.0).outline(0);
        assert_eq!(outline.len(), 5);
        assert_eq!(outline.first(), outline.last());
        assert_eq!(outline[1], Point::new(0.0, 1.0));
    }

    #[test]
    fn circle_outline_lies_on_circle() {
        let outline = Boundary::of(NormBall::L2, 1.5).outline(64);
        assert_eq!(outline.len(), 65);
        for p in &outline {
            assert_relative_eq!(p.l2_norm(), 1.5, epsilon = 1e-12);
        }
        assert_eq!(outline.first(), outline.last());
    }

    #[test]
    fn parses_family_names() {
        assert_eq!("L1".parse::<NormBall>(), Ok(NormBall::L1));
        assert_eq!("l2".parse::<NormBall>(), Ok(NormBall::L2));
        assert!("linf".parse::<NormBall>().is_err());
    }
}
