use ndarray::{Array1, Array2, Zip};
use normplot_core::MinimizationProblem;
use serde::Serialize;

use crate::Point;

/// How far the plot extends past the constraint on the negative side, as a
/// multiple of the threshold.
pub const MARGIN: f64 = 1.2;

/// How far the plot extends toward the unconstrained minimizer, as a multiple
/// of its coordinate.
pub const REACH: f64 = 2.3;

/// Extra room added to both spans when sizing the figure, as a multiple of
/// the threshold.
const FIGURE_PAD: f64 = 0.1;

/// The plotted rectangle, `[lo, hi]` on each axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AxisBounds {
    pub x: [f64; 2],
    pub y: [f64; 2],
}

impl AxisBounds {
    /// Returns bounds that enclose the norm ball with a margin and reach well
    /// past the unconstrained minimizer.
    ///
    /// Each axis spans `[min(−1.2t, 2.3c), max(1.2t, 2.3c)]`, so a minimizer
    /// with negative coordinates still produces a non-empty range.
    #[must_use]
    pub fn for_problem(min_point: Point, threshold: f64) -> Self {
        let axis = |c: f64| {
            [
                (-MARGIN * threshold).min(REACH * c),
                (MARGIN * threshold).max(REACH * c),
            ]
        };
        Self {
            x: axis(min_point.x1),
            y: axis(min_point.x2),
        }
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.x[1] - self.x[0]
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.y[1] - self.y[0]
    }
}

/// An `n × n` sampling of the objective over an [`AxisBounds`] rectangle.
///
/// Arrays are indexed `[row, column]` with rows following `x2` and columns
/// following `x1`, so `x_grid[[i, j]] == xs[j]` and `y_grid[[i, j]] == ys[i]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Grid {
    x_grid: Array2<f64>,
    y_grid: Array2<f64>,
    f_vals: Array2<f64>,
}

impl Grid {
    /// Samples `problem` on an `n × n` grid spanning `bounds`.
    ///
    /// A sample count of zero is treated as one; a single sample sits at the
    /// lower corner of the bounds.
    #[must_use]
    pub fn evaluate<P>(problem: &P, bounds: &AxisBounds, n_samples: usize) -> Self
    where
        P: MinimizationProblem<2> + Sync,
    {
        let n = n_samples.max(1);
        let xs = Array1::linspace(bounds.x[0], bounds.x[1], n);
        let ys = Array1::linspace(bounds.y[0], bounds.y[1], n);

        let x_grid = Array2::from_shape_fn((n, n), |(_, j)| xs[j]);
        let y_grid = Array2::from_shape_fn((n, n), |(i, _)| ys[i]);
        let mut f_vals = Array2::<f64>::zeros((n, n));

        let zip = Zip::from(&mut f_vals).and(&x_grid).and(&y_grid);
        let eval = |f: &mut f64, &x1: &f64, &x2: &f64| *f = problem.objective(&[x1, x2]);

        #[cfg(feature = "parallel")]
        zip.par_for_each(eval);
        #[cfg(not(feature = "parallel"))]
        zip.for_each(eval);

        Self {
            x_grid,
            y_grid,
            f_vals,
        }
    }

    /// Returns `(rows, columns)`.
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        self.f_vals.dim()
    }

    #[must_use]
    pub fn x_grid(&self) -> &Array2<f64> {
        &self.x_grid
    }

    #[must_use]
    pub fn y_grid(&self) -> &Array2<f64> {
        &self.y_grid
    }

    #[must_use]
    pub fn f_vals(&self) -> &Array2<f64> {
        &self.f_vals
    }

    /// Returns the sample location at `[row, column]`.
    #[must_use]
    pub fn point(&self, row: usize, column: usize) -> Point {
        Point::new(self.x_grid[[row, column]], self.y_grid[[row, column]])
    }
}

/// Plot dimensions in inches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FigureSize {
    pub width: f64,
    pub height: f64,
}

impl FigureSize {
    /// Returns a figure of the given height whose aspect ratio follows the
    /// plotted rectangle, padded by a tenth of the threshold on each axis.
    #[must_use]
    pub fn fit(bounds: &AxisBounds, threshold: f64, height: f64) -> Self {
        let pad = FIGURE_PAD * threshold;
        let width = (bounds.width() + pad) * height / (bounds.height() + pad);
        Self { width, height }
    }
}
