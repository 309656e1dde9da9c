//! Interactive contour plot window.
//!
//! Draws the contour lines, the feasible region, the unconstrained minimizer,
//! the constrained minimizer, and the solver path in an egui window.

use eframe::egui::{self, Color32};
use egui_plot::{Legend, Line, MarkerShape, Plot, PlotPoints, Points, Polygon};

use crate::{ContourLine, PlotData, Point};

/// Window pixels per figure inch.
const PIXELS_PER_INCH: f64 = 100.0;

/// Samples used to draw a circular boundary.
const CIRCLE_SEGMENTS: usize = 256;

/// Opens a blocking window showing the plot.
///
/// Blocks until the window is closed by the user.
///
/// # Errors
///
/// Returns an error if the native window cannot be created.
pub fn show(data: &PlotData) -> Result<(), eframe::Error> {
    let size = [
        (data.figure.width * PIXELS_PER_INCH) as f32,
        (data.figure.height * PIXELS_PER_INCH) as f32,
    ];
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size(size),
        ..Default::default()
    };

    let app = ContourApp {
        lines: data.contour_lines(),
        region: to_plot(&data.boundary.outline(CIRCLE_SEGMENTS)),
        path: to_plot(&data.path),
        unconstrained: data.unconstrained.to_array(),
        constrained: data.constrained.to_array(),
        objective_label: format!("f(x) = {}", data.legend.objective),
        constraint_label: data.legend.constraint.clone(),
    };

    eframe::run_native(
        "normplot",
        options,
        Box::new(move |_cc| Ok(Box::new(app))),
    )
}

fn to_plot(points: &[Point]) -> Vec<[f64; 2]> {
    points.iter().map(|p| p.to_array()).collect()
}

/// The egui [`eframe::App`] that renders a contour plot.
struct ContourApp {
    lines: Vec<ContourLine>,
    region: Vec<[f64; 2]>,
    path: Vec<[f64; 2]>,
    unconstrained: [f64; 2],
    constrained: [f64; 2],
    objective_label: String,
    constraint_label: String,
}

impl eframe::App for ContourApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let plot = Plot::new("contours")
                .data_aspect(1.0)
                .legend(Legend::default())
                .x_axis_label("x₁")
                .y_axis_label("x₂");

            plot.show(ui, |plot_ui| {
                let count = self.lines.len().max(1) as f32;
                for (k, line) in self.lines.iter().enumerate() {
                    let color = level_color(k as f32 / count);
                    for segment in &line.segments {
                        let points: PlotPoints =
                            vec![segment.start.to_array(), segment.end.to_array()].into();
                        plot_ui.line(Line::new(points).color(color).name(&self.objective_label));
                    }
                }

                plot_ui.polygon(
                    Polygon::new(PlotPoints::from(self.region.clone()))
                        .fill_color(Color32::from_rgba_unmultiplied(30, 90, 200, 90))
                        .name(&self.constraint_label),
                );

                if self.path.len() > 1 {
                    plot_ui.line(
                        Line::new(PlotPoints::from(self.path.clone()))
                            .color(Color32::GRAY)
                            .name("solver path"),
                    );
                }

                plot_ui.points(
                    Points::new(vec![self.unconstrained])
                        .shape(MarkerShape::Diamond)
                        .radius(5.0)
                        .color(Color32::from_rgb(230, 140, 20))
                        .name("unconstrained minimizer"),
                );
                plot_ui.points(
                    Points::new(vec![self.constrained])
                        .shape(MarkerShape::Circle)
                        .radius(5.0)
                        .color(Color32::from_rgb(200, 30, 30))
                        .name("constrained minimizer"),
                );
            });
        });
    }
}

/// Maps `t ∈ [0, 1]` from dark blue (low) to yellow (high).
fn level_color(t: f32) -> Color32 {
    let t = t.clamp(0.0, 1.0);
    let lerp = |a: f32, b: f32| (a + (b - a) * t) as u8;
    Color32::from_rgb(lerp(70.0, 250.0), lerp(20.0, 230.0), lerp(110.0, 30.0))
}
