//! Run configuration.
//!
//! A [`RunConfig`] can be built in code, parsed from TOML, or assembled from
//! command-line flags layered over either. Every field has a default, so an
//! empty TOML document is a valid configuration.

use std::path::{Path, PathBuf};

use normplot_solvers::optimization::trust_constr;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    Form, NormBall, Point,
    levels::{DEFAULT_LEVEL_FRACTION, DEFAULT_MAX_TICK_BINS},
};

/// Errors that can occur when loading or validating a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("malformed point `{0}`: expected two comma-separated numbers like `3,2`")]
    MalformedPoint(String),

    #[error("invalid solver settings: {0}")]
    Solver(#[from] trust_constr::ConfigError),
}

/// Everything needed to produce one plot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    /// Minimizer of the unconstrained objective.
    pub min_point: [f64; 2],

    /// Radius of the norm ball.
    pub threshold: f64,

    /// Grid samples per axis.
    pub n_samples: usize,

    /// Which norm bounds the solution.
    pub family: NormBall,

    /// Weight matrix of the objective. Defaults by family, see [`RunConfig::form`].
    pub form: Option<Form>,

    pub render: RenderConfig,

    pub solver: SolverSettings,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            min_point: [3.0, 2.0],
            threshold: 1.0,
            n_samples: 100,
            family: NormBall::L1,
            form: None,
            render: RenderConfig::default(),
            solver: SolverSettings::default(),
        }
    }
}

/// Output and layout settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Figure height in inches. The width follows from the plotted range.
    pub fig_height: f64,

    /// Where the plot data is written.
    pub file_name: PathBuf,

    /// Upper bound on tick intervals along the x-axis.
    pub max_tick_bins: usize,

    /// Ratio of contour levels to x-axis ticks.
    pub level_fraction: f64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            fig_height: 3.0,
            file_name: PathBuf::from("contours.json"),
            max_tick_bins: DEFAULT_MAX_TICK_BINS,
            level_fraction: DEFAULT_LEVEL_FRACTION,
        }
    }
}

/// Optional overrides of the solver defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SolverSettings {
    pub max_iters: Option<usize>,
    pub gtol: Option<f64>,
    pub xtol: Option<f64>,
    pub initial_barrier: Option<f64>,
    pub barrier_decay: Option<f64>,
    pub barrier_tol: Option<f64>,
    pub initial_radius: Option<f64>,
}

impl SolverSettings {
    /// Applies the overrides to the default solver config.
    ///
    /// # Errors
    ///
    /// Returns an error if the resulting config is invalid.
    pub fn to_config(&self) -> Result<trust_constr::Config, ConfigError> {
        let base = trust_constr::Config::default();
        let config = trust_constr::Config::new(
            self.max_iters.unwrap_or(base.max_iters()),
            self.gtol.unwrap_or(base.gtol()),
            self.xtol.unwrap_or(base.xtol()),
        )?
        .with_barrier(
            self.initial_barrier.unwrap_or(base.initial_barrier()),
            self.barrier_decay.unwrap_or(base.barrier_decay()),
            self.barrier_tol.unwrap_or(base.barrier_tol()),
        )?
        .with_initial_radius(self.initial_radius.unwrap_or(base.initial_radius()))?;
        Ok(config)
    }
}

impl RunConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if the file can't be read or contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns error if the string is not valid TOML for this schema.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Returns the unconstrained minimizer.
    #[must_use]
    pub fn min_point(&self) -> Point {
        Point::from(self.min_point)
    }

    /// Returns the objective form, defaulting to `Coupled` for the L1 ball
    /// and `Diagonal` for the L2 ball.
    #[must_use]
    pub fn form(&self) -> Form {
        self.form.unwrap_or(match self.family {
            NormBall::L1 => Form::Coupled,
            NormBall::L2 => Form::Diagonal,
        })
    }

    /// Checks every parameter.
    ///
    /// # Errors
    ///
    /// Returns the first invalid parameter found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.min_point().is_finite() {
            return Err(invalid("min_point", "coordinates must be finite"));
        }
        positive("threshold", self.threshold)?;
        if self.n_samples == 0 {
            return Err(invalid("n_samples", "must be a positive integer"));
        }
        positive("render.fig_height", self.render.fig_height)?;
        if self.render.file_name.as_os_str().is_empty() {
            return Err(invalid("render.file_name", "must not be empty"));
        }
        if self.render.max_tick_bins == 0 {
            return Err(invalid("render.max_tick_bins", "must be a positive integer"));
        }
        positive("render.level_fraction", self.render.level_fraction)?;
        if self.render.level_fraction > 1.0 {
            return Err(invalid("render.level_fraction", "must not exceed 1"));
        }
        self.solver.to_config()?;
        Ok(())
    }
}

/// Parses a point written as `x1,x2`.
///
/// # Errors
///
/// Returns [`ConfigError::MalformedPoint`] unless the input is exactly two
/// finite numbers separated by a comma.
pub fn parse_point(s: &str) -> Result<[f64; 2], ConfigError> {
    let malformed = || ConfigError::MalformedPoint(s.to_string());

    let mut parts = s.split(',').map(|part| part.trim().parse::<f64>());
    match (parts.next(), parts.next(), parts.next()) {
        (Some(Ok(x1)), Some(Ok(x2)), None) if x1.is_finite() && x2.is_finite() => Ok([x1, x2]),
        _ => Err(malformed()),
    }
}

/// Parses a finite, strictly positive number.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidParameter`] naming `name` on failure.
pub fn parse_positive_float(name: &'static str, s: &str) -> Result<f64, ConfigError> {
    let value = s
        .trim()
        .parse::<f64>()
        .map_err(|e| invalid(name, e.to_string()))?;
    positive(name, value)?;
    Ok(value)
}

/// Parses a strictly positive integer.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidParameter`] naming `name` on failure.
pub fn parse_positive_int(name: &'static str, s: &str) -> Result<usize, ConfigError> {
    match s.trim().parse::<usize>() {
        Ok(0) => Err(invalid(name, "must be a positive integer")),
        Ok(n) => Ok(n),
        Err(e) => Err(invalid(name, e.to_string())),
    }
}

fn positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(name, format!("must be finite and positive, got {value}")))
    }
}

fn invalid(name: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidParameter {
        name,
        reason: reason.into(),
    }
}
