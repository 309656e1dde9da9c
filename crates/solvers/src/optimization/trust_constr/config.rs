use thiserror::Error;

/// Configuration for the trust-region interior-point solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    max_iters: usize,
    gtol: f64,
    xtol: f64,
    initial_barrier: f64,
    barrier_decay: f64,
    barrier_tol: f64,
    initial_radius: f64,
}

/// Errors that can occur when validating a trust-region solver config.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("gtol must be finite and non-negative")]
    Gtol,

    #[error("xtol must be finite and non-negative")]
    Xtol,

    #[error("initial barrier must be finite and positive")]
    InitialBarrier,

    #[error("barrier decay must lie strictly between 0 and 1")]
    BarrierDecay,

    #[error("barrier tolerance must be positive and no larger than the initial barrier")]
    BarrierTol,

    #[error("initial trust radius must be finite and positive")]
    InitialRadius,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_iters: 1000,
            gtol: 1e-8,
            xtol: 1e-10,
            initial_barrier: 0.1,
            barrier_decay: 0.2,
            barrier_tol: 1e-8,
            initial_radius: 1.0,
        }
    }
}

impl Config {
    /// Creates a new config with validated tolerances and default barrier
    /// and trust-region settings.
    ///
    /// # Errors
    ///
    /// Returns an error if any tolerance is negative or non-finite.
    pub fn new(max_iters: usize, gtol: f64, xtol: f64) -> Result<Self, ConfigError> {
        if !gtol.is_finite() || gtol < 0.0 {
            return Err(ConfigError::Gtol);
        }
        if !xtol.is_finite() || xtol < 0.0 {
            return Err(ConfigError::Xtol);
        }

        Ok(Self {
            max_iters,
            gtol,
            xtol,
            ..Self::default()
        })
    }

    /// Returns a copy with new barrier schedule settings.
    ///
    /// The barrier parameter starts at `initial`, is multiplied by `decay`
    /// after each subproblem, and the solve converges once a subproblem
    /// finishes with the parameter at or below `tol`.
    ///
    /// # Errors
    ///
    /// Returns an error if `initial` or `tol` is not positive and finite,
    /// if `tol > initial`, or if `decay` is not in `(0, 1)`.
    pub fn with_barrier(self, initial: f64, decay: f64, tol: f64) -> Result<Self, ConfigError> {
        if !initial.is_finite() || initial <= 0.0 {
            return Err(ConfigError::InitialBarrier);
        }
        if !(decay > 0.0 && decay < 1.0) {
            return Err(ConfigError::BarrierDecay);
        }
        if !tol.is_finite() || tol <= 0.0 || tol > initial {
            return Err(ConfigError::BarrierTol);
        }

        Ok(Self {
            initial_barrier: initial,
            barrier_decay: decay,
            barrier_tol: tol,
            ..self
        })
    }

    /// Returns a copy with a new initial trust radius.
    ///
    /// # Errors
    ///
    /// Returns an error if `radius` is not positive and finite.
    pub fn with_initial_radius(self, radius: f64) -> Result<Self, ConfigError> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(ConfigError::InitialRadius);
        }

        Ok(Self {
            initial_radius: radius,
            ..self
        })
    }

    /// Returns the maximum number of trust-region iterations.
    #[must_use]
    pub fn max_iters(&self) -> usize {
        self.max_iters
    }

    /// Returns the stationarity tolerance.
    #[must_use]
    pub fn gtol(&self) -> f64 {
        self.gtol
    }

    /// Returns the step and trust-radius tolerance.
    #[must_use]
    pub fn xtol(&self) -> f64 {
        self.xtol
    }

    /// Returns the starting barrier parameter.
    #[must_use]
    pub fn initial_barrier(&self) -> f64 {
        self.initial_barrier
    }

    /// Returns the factor applied to the barrier parameter between subproblems.
    #[must_use]
    pub fn barrier_decay(&self) -> f64 {
        self.barrier_decay
    }

    /// Returns the barrier parameter at which the solve is considered converged.
    #[must_use]
    pub fn barrier_tol(&self) -> f64 {
        self.barrier_tol
    }

    /// Returns the trust radius used at the start of every subproblem.
    #[must_use]
    pub fn initial_radius(&self) -> f64 {
        self.initial_radius
    }
}
