use std::fs::File;

use approx::assert_relative_eq;
use normplot::{Boundary, Form, NormBall, PlotData, Point, RunConfig, pipeline};

fn run(config: &RunConfig) -> PlotData {
    pipeline::run(config).expect("pipeline should succeed")
}

/// Checks the properties every plot must have, whatever the problem.
fn assert_well_formed(data: &PlotData, config: &RunConfig) {
    let n = config.n_samples;
    assert_eq!(data.grid.shape(), (n, n));
    assert_eq!(data.grid.x_grid().dim(), (n, n));
    assert_eq!(data.grid.y_grid().dim(), (n, n));

    let levels = data.levels.as_slice();
    assert!(!levels.is_empty());
    assert_eq!(levels[0], 0.0);
    assert_relative_eq!(
        *levels.last().unwrap(),
        data.constrained_objective,
        epsilon = 1e-12
    );
    assert!(levels.windows(2).all(|w| w[0] < w[1]));

    let t = config.threshold;
    let norm = match config.family {
        NormBall::L1 => data.constrained.l1_norm(),
        NormBall::L2 => data.constrained.l2_norm(),
    };
    assert!(norm <= t + 1e-9, "solution {} is outside the ball", data.constrained);

    assert!(data.figure.width > 0.0);
    assert_eq!(data.figure.height, config.render.fig_height);
}

#[test]
fn coupled_quadratic_over_diamond_lands_on_vertex() {
    let config = RunConfig::default();
    let data = run(&config);
    assert_well_formed(&data, &config);

    assert!(data.converged);
    assert_eq!(data.unconstrained, Point::new(3.0, 2.0));
    assert_relative_eq!(data.constrained.x1, 0.0, epsilon = 1e-4);
    assert_relative_eq!(data.constrained.x2, 1.0, epsilon = 1e-4);
    assert_relative_eq!(data.constrained.l1_norm(), 1.0, epsilon = 1e-6);
    assert_relative_eq!(data.constrained_objective, 7.0, epsilon = 1e-3);

    // Ticks from −2 to 7 along x, so ⌊0.6 · 10⌋ levels.
    assert_eq!(data.levels.len(), 6);
    assert!(matches!(data.boundary, Boundary::Polygon { ref vertices } if vertices.len() == 4));
}

#[test]
fn diagonal_quadratic_over_disk_satisfies_kkt() {
    let config = RunConfig {
        min_point: [2.0, 3.0],
        family: NormBall::L2,
        ..RunConfig::default()
    };
    assert_eq!(config.form(), Form::Diagonal);

    let data = run(&config);
    assert_well_formed(&data, &config);
    assert!(data.converged);

    let Point { x1, x2 } = data.constrained;
    assert_relative_eq!(x1.hypot(x2), 1.0, epsilon = 1e-6);

    // From stationarity: x1 = 2 / (1 + 2λ) and x2 = 3 / (1 + λ).
    let lambda = 3.0 / x2 - 1.0;
    assert!(lambda > 0.0);
    assert_relative_eq!(x1, 2.0 / (1.0 + 2.0 * lambda), epsilon = 1e-5);

    // The weighted metric pulls the solution away from the naive projection.
    let naive = Point::new(2.0, 3.0);
    let naive = Point::new(naive.x1 / naive.l2_norm(), naive.x2 / naive.l2_norm());
    assert!((x1 - naive.x1).abs() > 1e-2);

    assert!(matches!(data.boundary, Boundary::Circle { radius, .. } if radius == 1.0));
}

#[test]
fn minimizer_at_origin_gives_single_level() {
    let config = RunConfig {
        min_point: [0.0, 0.0],
        ..RunConfig::default()
    };
    let data = run(&config);
    assert_well_formed(&data, &config);

    assert!(data.converged);
    assert_eq!(data.iterations, 0);
    assert_eq!(data.constrained, Point::ORIGIN);
    assert_eq!(data.constrained_objective, 0.0);
    assert_eq!(data.levels.as_slice(), &[0.0]);

    // The plot still covers the ball with its margin.
    assert_relative_eq!(data.bounds.x[0], -1.2);
    assert_relative_eq!(data.bounds.x[1], 1.2);
}

#[test]
fn interior_minimizer_is_its_own_constrained_solution() {
    let config = RunConfig {
        min_point: [0.25, -0.25],
        threshold: 2.0,
        ..RunConfig::default()
    };
    let data = run(&config);
    assert_well_formed(&data, &config);

    assert_relative_eq!(data.constrained.x1, 0.25, epsilon = 1e-6);
    assert_relative_eq!(data.constrained.x2, -0.25, epsilon = 1e-6);
}

#[test]
fn single_sample_grid() {
    let config = RunConfig {
        n_samples: 1,
        ..RunConfig::default()
    };
    let data = run(&config);
    assert_well_formed(&data, &config);

    assert_eq!(data.grid.point(0, 0), Point::new(-1.2, -1.2));
    assert!(data.contour_lines().iter().all(|line| line.segments.is_empty()));
}

#[test]
fn grid_values_match_objective_at_every_sample() {
    let config = RunConfig {
        n_samples: 12,
        ..RunConfig::default()
    };
    let data = run(&config);

    for ((i, j), &value) in data.grid.f_vals().indexed_iter() {
        let Point { x1, x2 } = data.grid.point(i, j);
        let (u, v) = (x1 - 3.0, x2 - 2.0);
        assert_relative_eq!(value, 0.5 * u * u + v * v + 0.5 * u * v, epsilon = 1e-9);
    }
}

#[test]
fn outermost_contour_passes_through_constrained_solution() {
    let config = RunConfig {
        n_samples: 200,
        ..RunConfig::default()
    };
    let data = run(&config);
    let lines = data.contour_lines();
    let outer = lines.last().unwrap();

    let closest = outer
        .segments
        .iter()
        .flat_map(|s| [s.start, s.end])
        .map(|p| (p.x1 - data.constrained.x1).hypot(p.x2 - data.constrained.x2))
        .fold(f64::INFINITY, f64::min);
    assert!(closest < 0.1, "closest contour point is {closest} away");
}

#[test]
fn solver_path_starts_at_origin_and_stays_feasible() {
    let data = run(&RunConfig::default());

    assert_eq!(data.path.first(), Some(&Point::ORIGIN));
    assert!(data.path.len() > 1);
    for p in &data.path {
        assert!(p.l1_norm() < 1.0);
    }
}

#[test]
fn invalid_threshold_is_rejected_before_solving() {
    let config = RunConfig {
        threshold: -1.0,
        ..RunConfig::default()
    };
    assert!(matches!(
        pipeline::run(&config),
        Err(pipeline::Error::Config(_))
    ));
}

#[test]
fn iteration_limit_still_produces_plot() {
    let mut config = RunConfig::default();
    config.solver.max_iters = Some(2);

    let data = run(&config);
    assert!(!data.converged);
    assert!(data.constrained.l1_norm() < 1.0);
    assert_eq!(data.levels.as_slice().last(), Some(&data.constrained_objective));
}

#[test]
fn plot_data_serializes_to_json() {
    let config = RunConfig {
        n_samples: 3,
        ..RunConfig::default()
    };
    let data = run(&config);
    let json = serde_json::to_value(&data).unwrap();

    assert_eq!(json["unconstrained"]["x1"], 3.0);
    assert_eq!(json["boundary"]["kind"], "polygon");
    assert_eq!(json["levels"].as_array().unwrap().len(), data.levels.len());
    assert_eq!(json["grid"]["f_vals"]["dim"], serde_json::json!([3, 3]));
}

#[test]
fn saved_plot_data_reads_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("contours.json");
    let config = RunConfig {
        n_samples: 4,
        ..RunConfig::default()
    };
    let data = run(&config);

    data.save(&path).unwrap();

    let json: serde_json::Value = serde_json::from_reader(File::open(&path).unwrap()).unwrap();
    assert_eq!(json["constrained_objective"], data.constrained_objective);
    assert_eq!(json["path"].as_array().unwrap().len(), data.path.len());
    assert_eq!(json["grid"]["f_vals"]["dim"], serde_json::json!([4, 4]));
}

#[test]
fn saving_into_a_missing_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("contours.json");
    let data = run(&RunConfig {
        n_samples: 2,
        ..RunConfig::default()
    });

    assert!(matches!(data.save(&path), Err(pipeline::Error::Io(_))));
}
