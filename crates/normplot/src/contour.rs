//! Iso-line extraction by marching squares.
//!
//! Each grid cell is classified by which corners lie at or above the level.
//! Edges whose endpoints disagree carry a crossing, placed by linear
//! interpolation. Saddle cells (opposite corners agree) are resolved with the
//! cell-center average.

use serde::Serialize;

use crate::{Grid, LevelSequence, Point};

/// A straight piece of an iso-line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

/// All segments drawn at one level.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContourLine {
    pub level: f64,
    pub segments: Vec<Segment>,
}

/// Traces every level in `levels` over `grid`.
#[must_use]
pub fn contour_lines(grid: &Grid, levels: &LevelSequence) -> Vec<ContourLine> {
    levels
        .as_slice()
        .iter()
        .map(|&level| ContourLine {
            level,
            segments: segments(grid, level),
        })
        .collect()
}

/// Returns the segments of the iso-line `f = level`.
///
/// Grids with fewer than two samples per axis have no cells and yield nothing.
#[must_use]
pub fn segments(grid: &Grid, level: f64) -> Vec<Segment> {
    let (rows, cols) = grid.shape();
    let f = grid.f_vals();
    let mut out = Vec::new();

    for i in 0..rows.saturating_sub(1) {
        for j in 0..cols.saturating_sub(1) {
            // Counter-clockwise from the lower-left corner.
            let corners = [(i, j), (i, j + 1), (i + 1, j + 1), (i + 1, j)];
            let values = corners.map(|(r, c)| f[[r, c]]);
            let above = values.map(|v| v >= level);

            // Edge k joins corner k to corner k + 1: bottom, right, top, left.
            let crossing = |k: usize| -> Option<Point> {
                let m = (k + 1) % 4;
                if above[k] == above[m] {
                    return None;
                }
                let t = (level - values[k]) / (values[m] - values[k]);
                let a = grid.point(corners[k].0, corners[k].1);
                let b = grid.point(corners[m].0, corners[m].1);
                Some(Point::new(
                    a.x1 + t * (b.x1 - a.x1),
                    a.x2 + t * (b.x2 - a.x2),
                ))
            };
            let edges = [crossing(0), crossing(1), crossing(2), crossing(3)];

            let mut join = |a: usize, b: usize| {
                if let (Some(start), Some(end)) = (edges[a], edges[b]) {
                    out.push(Segment { start, end });
                }
            };

            match edges.iter().filter(|e| e.is_some()).count() {
                2 => {
                    let mut hits = (0..4).filter(|&k| edges[k].is_some());
                    if let (Some(a), Some(b)) = (hits.next(), hits.next()) {
                        join(a, b);
                    }
                }
                4 => {
                    let center = values.iter().sum::<f64>() / 4.0;
                    if (center >= level) == above[0] {
                        // Corners 1 and 3 are cut off.
                        join(0, 1);
                        join(2, 3);
                    } else {
                        // Corners 0 and 2 are cut off.
                        join(3, 0);
                        join(1, 2);
                    }
                }
                _ => {}
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use normplot_core::MinimizationProblem;

    use crate::{AxisBounds, Form, QuadraticForm};

    /// f(x) = x₁, so every iso-line is vertical.
    struct Ramp;

    impl MinimizationProblem<2> for Ramp {
        fn objective(&self, x: &[f64; 2]) -> f64 {
            x[0]
        }

        fn gradient(&self, _x: &[f64; 2]) -> [f64; 2] {
            [1.0, 0.0]
        }

        fn hessian(&self, _x: &[f64; 2]) -> [[f64; 2]; 2] {
            [[0.0; 2]; 2]
        }
    }

    /// f(x) = x₁·x₂, which has a saddle at the origin.
    struct Saddle;

    impl MinimizationProblem<2> for Saddle {
        fn objective(&self, x: &[f64; 2]) -> f64 {
            x[0] * x[1]
        }

        fn gradient(&self, x: &[f64; 2]) -> [f64; 2] {
            [x[1], x[0]]
        }

        fn hessian(&self, _x: &[f64; 2]) -> [[f64; 2]; 2] {
            [[0.0, 1.0], [1.0, 0.0]]
        }
    }

    fn unit_square() -> AxisBounds {
        AxisBounds {
            x: [0.0, 1.0],
            y: [0.0, 1.0],
        }
    }

    #[test]
    fn linear_field_gives_vertical_line() {
        let grid = Grid::evaluate(&Ramp, &unit_square(), 5);
        let segs = segments(&grid, 0.3);

        // One segment per row of cells.
        assert_eq!(segs.len(), 4);
        for seg in &segs {
            assert_relative_eq!(seg.start.x1, 0.3, epsilon = 1e-12);
            assert_relative_eq!(seg.end.x1, 0.3, epsilon = 1e-12);
        }
    }

    #[test]
    fn level_outside_range_has_no_segments() {
        let grid = Grid::evaluate(&Ramp, &unit_square(), 5);
        assert!(segments(&grid, 2.0).is_empty());
        assert!(segments(&grid, -1.0).is_empty());
    }

    #[test]
    fn single_sample_has_no_cells() {
        let grid = Grid::evaluate(&Ramp, &unit_square(), 1);
        assert!(segments(&grid, 0.0).is_empty());
    }

    #[test]
    fn saddle_cell_yields_two_segments() {
        let bounds = AxisBounds {
            x: [-1.0, 1.0],
            y: [-1.0, 1.0],
        };
        let grid = Grid::evaluate(&Saddle, &bounds, 2);
        let segs = segments(&grid, 0.5);

        assert_eq!(segs.len(), 2);
        for seg in segs {
            assert!(seg.start.x1 * seg.start.x2 > 0.0);
        }
    }

    #[test]
    fn ellipse_segments_lie_near_level_set() {
        let f = QuadraticForm::with_form(Point::ORIGIN, Form::Coupled).unwrap();
        let bounds = AxisBounds {
            x: [-2.0, 2.0],
            y: [-2.0, 2.0],
        };
        let grid = Grid::evaluate(&f, &bounds, 81);
        let levels = LevelSequence::select(1.0, 4, 1.0);
        let lines = contour_lines(&grid, &levels);

        assert_eq!(lines.len(), 4);
        assert!(lines[0].segments.is_empty());
        for line in &lines[1..] {
            assert!(!line.segments.is_empty());
            for seg in &line.segments {
                assert_relative_eq!(f.value(seg.start), line.level, epsilon = 1e-2);
            }
        }
    }
}
