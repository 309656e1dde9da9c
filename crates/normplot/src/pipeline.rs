use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use normplot_core::Observer;
use normplot_observers::{History, LogObserver};
use normplot_solvers::optimization::trust_constr::{self, Action, Event};
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::{
    AxisBounds, Boundary, ContourLine, FigureSize, Grid, LevelSequence, Point, ProblemError,
    ProblemSpec, RunConfig, config::ConfigError, contour, levels::tick_count, solve,
};

/// Errors that can occur while producing plot data.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("invalid problem: {0}")]
    Problem(#[from] ProblemError),

    #[error("solver failed: {0}")]
    Solver(#[from] trust_constr::Error),

    #[error("failed to write plot data: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode plot data: {0}")]
    Json(#[from] serde_json::Error),
}

/// Plain-text labels for the plot legend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    pub objective: String,
    pub constraint: String,
}

/// Everything a renderer needs to draw the plot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotData {
    /// Minimizer of the unconstrained objective.
    pub unconstrained: Point,

    /// Best feasible point the solver found.
    pub constrained: Point,

    /// Objective value at `constrained`.
    pub constrained_objective: f64,

    /// Whether the solver met its tolerances.
    pub converged: bool,

    /// Solver iterations used.
    pub iterations: usize,

    /// Accepted iterates, starting at the initial guess.
    pub path: Vec<Point>,

    pub bounds: AxisBounds,
    pub figure: FigureSize,
    pub grid: Grid,
    pub levels: LevelSequence,
    pub boundary: Boundary,
    pub legend: Legend,
}

impl PlotData {
    /// Traces the contour lines at each level.
    #[must_use]
    pub fn contour_lines(&self) -> Vec<ContourLine> {
        contour::contour_lines(&self.grid, &self.levels)
    }

    /// Writes the plot data to `path` as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or written.
    pub fn save(&self, path: &Path) -> Result<(), Error> {
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }
}

/// Solves the configured problem and assembles its plot data.
///
/// A solver that stops before converging is reported with a warning and its
/// best iterate is still plotted.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the solver fails.
pub fn run(config: &RunConfig) -> Result<PlotData, Error> {
    config.validate()?;

    let spec = ProblemSpec::new(
        config.min_point(),
        config.form(),
        config.family,
        config.threshold,
    )?;
    let solver_config = config.solver.to_config()?;

    info!(
        min_point = %spec.min_point(),
        threshold = spec.threshold(),
        family = %spec.family(),
        form = %spec.form(),
        n_samples = config.n_samples,
        "building contour plot"
    );

    let start = solve::INITIAL_GUESS;
    let mut history = History::starting_at(start.to_array(), spec.objective().value(start));
    let mut log = LogObserver;
    let result = solve::solve(&spec, &solver_config, |event: &Event<2>| {
        Observer::<Event<2>, Action>::observe(&mut history, event);
        Observer::<Event<2>, Action>::observe(&mut log, event)
    })?;

    if !result.converged() {
        warn!(
            status = ?result.status,
            iters = result.iters,
            x = %result.point,
            "constrained solve did not converge, plotting best iterate"
        );
    }

    let bounds = AxisBounds::for_problem(spec.min_point(), spec.threshold());
    let grid = Grid::evaluate(spec.objective(), &bounds, config.n_samples);
    let density = tick_count(bounds.x[0], bounds.x[1], config.render.max_tick_bins);
    let levels = LevelSequence::select(result.objective, density, config.render.level_fraction);

    info!(
        x = %result.point,
        objective = result.objective,
        levels = levels.len(),
        "plot data ready"
    );

    Ok(PlotData {
        unconstrained: spec.min_point(),
        constrained: result.point,
        constrained_objective: result.objective,
        converged: result.converged(),
        iterations: result.iters,
        path: history.into_iterates().into_iter().map(Point::from).collect(),
        bounds,
        figure: FigureSize::fit(&bounds, spec.threshold(), config.render.fig_height),
        grid,
        levels,
        boundary: spec.boundary(),
        legend: Legend {
            objective: spec.objective().formula(),
            constraint: spec.constraint_formula(),
        },
    })
}
