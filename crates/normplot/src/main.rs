//! normplot CLI: contour plots of a quadratic minimized over an L1 or L2 ball.

use std::{error::Error, path::PathBuf};

use clap::Parser;
use normplot::{
    Form, NormBall, RunConfig,
    config::{ConfigError, parse_point, parse_positive_float, parse_positive_int},
    pipeline,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "normplot")]
#[command(about = "Contour plot of a quadratic minimized over an L1 or L2 ball")]
#[command(version)]
struct Cli {
    /// Minimizer of the unconstrained objective, as `x1,x2`
    #[arg(short, long, value_parser = parse_point, allow_hyphen_values = true)]
    min_point: Option<[f64; 2]>,

    /// Radius of the norm ball
    #[arg(short, long, value_parser = threshold_arg)]
    threshold: Option<f64>,

    /// Figure height in inches
    #[arg(short = 'H', long, value_parser = fig_height_arg)]
    fig_height: Option<f64>,

    /// Grid samples per axis
    #[arg(short, long, value_parser = n_samples_arg)]
    n_samples: Option<usize>,

    /// Output file for the plot data (JSON)
    #[arg(short, long)]
    file_name: Option<PathBuf>,

    /// Constraint norm: `l1` or `l2`
    #[arg(long)]
    family: Option<NormBall>,

    /// Objective weights: `coupled` or `diagonal`
    #[arg(long)]
    form: Option<Form>,

    /// TOML config file; flags override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Open an interactive plot window (requires the `plot` feature)
    #[arg(long)]
    show: bool,
}

impl Cli {
    fn run_config(&self) -> Result<RunConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => RunConfig::load(path)?,
            None => RunConfig::default(),
        };

        if let Some(min_point) = self.min_point {
            config.min_point = min_point;
        }
        if let Some(threshold) = self.threshold {
            config.threshold = threshold;
        }
        if let Some(fig_height) = self.fig_height {
            config.render.fig_height = fig_height;
        }
        if let Some(n_samples) = self.n_samples {
            config.n_samples = n_samples;
        }
        if let Some(file_name) = &self.file_name {
            config.render.file_name.clone_from(file_name);
        }
        if let Some(family) = self.family {
            config.family = family;
        }
        if self.form.is_some() {
            config.form = self.form;
        }
        Ok(config)
    }
}

fn threshold_arg(s: &str) -> Result<f64, ConfigError> {
    parse_positive_float("threshold", s)
}

fn fig_height_arg(s: &str) -> Result<f64, ConfigError> {
    parse_positive_float("fig_height", s)
}

fn n_samples_arg(s: &str) -> Result<usize, ConfigError> {
    parse_positive_int("n_samples", s)
}

/// Logs go to stderr so stdout carries only the solution summary.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("normplot=info,normplot_solvers=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();
    let cli = Cli::parse();
    let config = cli.run_config()?;

    let data = pipeline::run(&config)?;
    println!("unconstrained solution: {}", data.unconstrained);
    println!("constrained solution:   {}", data.constrained);

    let path = &config.render.file_name;
    data.save(path)?;
    println!("plot saved to {}", path.display());

    if cli.show {
        #[cfg(feature = "plot")]
        normplot::render::show(&data)?;

        #[cfg(not(feature = "plot"))]
        tracing::warn!("built without the `plot` feature, ignoring --show");
    }

    Ok(())
}
