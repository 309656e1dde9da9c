use std::fmt;

use serde::{Deserialize, Serialize};

/// A point in the plane.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x1: f64,
    pub x2: f64,
}

impl Point {
    /// The coordinate origin.
    pub const ORIGIN: Self = Self { x1: 0.0, x2: 0.0 };

    /// Creates a new point.
    #[must_use]
    pub const fn new(x1: f64, x2: f64) -> Self {
        Self { x1, x2 }
    }

    /// Returns the coordinates as an array.
    #[must_use]
    pub const fn to_array(self) -> [f64; 2] {
        [self.x1, self.x2]
    }

    /// Returns `|x1| + |x2|`.
    #[must_use]
    pub fn l1_norm(self) -> f64 {
        self.x1.abs() + self.x2.abs()
    }

    /// Returns `√(x1² + x2²)`.
    #[must_use]
    pub fn l2_norm(self) -> f64 {
        self.x1.hypot(self.x2)
    }

    /// Returns `true` if both coordinates are finite.
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x1.is_finite() && self.x2.is_finite()
    }
}

impl From<[f64; 2]> for Point {
    fn from([x1, x2]: [f64; 2]) -> Self {
        Self { x1, x2 }
    }
}

impl From<Point> for [f64; 2] {
    fn from(point: Point) -> Self {
        point.to_array()
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.x1, self.x2)
    }
}
