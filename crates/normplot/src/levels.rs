use ndarray::Array1;
use serde::Serialize;

/// Default upper bound on tick intervals per axis.
pub const DEFAULT_MAX_TICK_BINS: usize = 9;

/// Default ratio of contour levels to axis ticks.
pub const DEFAULT_LEVEL_FRACTION: f64 = 0.6;

/// Mantissas of acceptable tick spacings within a decade.
const NICE_STEPS: [f64; 5] = [1.0, 2.0, 2.5, 5.0, 10.0];

/// Slack for treating a bound that lands on a tick as exactly on it.
const EDGE_TOL: f64 = 1e-10;

/// Returns how many ticks a "nice number" locator places on `[lo, hi]`.
///
/// Ticks sit on multiples of the smallest step from `{1, 2, 2.5, 5, 10} × 10ᵏ`
/// that covers the range in at most `max_bins` intervals, with the outermost
/// ticks at or beyond the bounds. An empty or non-finite range has one tick.
#[must_use]
pub fn tick_count(lo: f64, hi: f64, max_bins: usize) -> usize {
    let span = hi - lo;
    if !(span > 0.0 && span.is_finite()) || max_bins == 0 {
        return 1;
    }

    let bins = |step: f64| {
        let first = (lo / step + EDGE_TOL).floor();
        let last = (hi / step - EDGE_TOL).ceil();
        (last - first) as usize
    };

    let base = 10f64.powf((span / max_bins as f64).log10().floor());
    for magnitude in [base, base * 10.0, base * 100.0] {
        for mantissa in NICE_STEPS {
            let n = bins(mantissa * magnitude);
            if n <= max_bins {
                return n + 1;
            }
        }
    }
    max_bins + 1
}

/// Objective values at which contours are drawn.
///
/// Levels ascend evenly from `0`, the unconstrained minimum, to the
/// objective at the constrained solution, so the outermost contour touches
/// the constrained minimizer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct LevelSequence(Vec<f64>);

impl LevelSequence {
    /// Selects `⌊fraction · tick_density⌋` levels between `0` and `top`.
    ///
    /// At least one level is produced. When `top` is positive at least two
    /// are, so both endpoints appear. When `top` is zero (or not a positive
    /// finite number) the sequence is the single level `0`.
    #[must_use]
    pub fn select(top: f64, tick_density: usize, fraction: f64) -> Self {
        if !(top > 0.0 && top.is_finite()) {
            return Self(vec![0.0]);
        }

        let count = ((fraction * tick_density as f64).floor() as usize).max(2);
        let mut levels = Array1::linspace(0.0, top, count).to_vec();
        if let Some(last) = levels.last_mut() {
            *last = top;
        }
        Self(levels)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<f64> {
        self.0
    }
}
