use std::f64::consts::TAU;

use eframe::egui::{Color32, RichText, Stroke, Ui};
use egui_plot::{Bar, BarChart, Legend, Plot, PlotPoint, PlotPoints, Polygon, Text};

use crate::color::ColorMap;
use crate::state::{AppState, ChartKind};
use crate::stats::report::{ClassSurvival, PassengerReport};
use crate::stats::Summary;

// ---------------------------------------------------------------------------
// Central panel
// ---------------------------------------------------------------------------

/// Render the selected chart in the central panel.
pub fn chart_panel(ui: &mut Ui, state: &AppState) {
    let Some(report) = &state.report else {
        ui.centered_and_justified(|ui: &mut Ui| {
            let hint = if state.table.is_some() {
                "The loaded table cannot be summarised (see status bar)"
            } else {
                "Open a passenger table  (File → Open…)"
            };
            ui.heading(hint);
        });
        return;
    };

    ui.heading(state.chart.title());
    draw(ui, state.chart, report);
}

fn draw(ui: &mut Ui, chart: ChartKind, report: &PassengerReport) {
    match chart {
        ChartKind::Overview => bar_chart(ui, "overview", "Passengers", &report.overview.as_f64()),
        ChartKind::PassengerClasses => pie_chart(ui, "passenger_classes", &report.classes),
        ChartKind::SurvivorClasses => pie_chart(ui, "survivor_classes", &report.survivor_classes),
        ChartKind::PassengerSexes => {
            bar_chart(ui, "passenger_sexes", "Passengers", &report.sexes.counts.as_f64());
        }
        ChartKind::SurvivorSexes => {
            bar_chart(ui, "survivor_sexes", "Survivors", &report.survivor_sexes.counts.as_f64());
        }
        ChartKind::FemaleSurvival => female_survival_chart(ui, &report.female_survival),
    }
}

// ---------------------------------------------------------------------------
// Bar charts
// ---------------------------------------------------------------------------

/// One bar per summary entry, coloured per label.
#[allow(clippy::cast_precision_loss)]
fn bar_chart(ui: &mut Ui, id: &str, y_label: &str, summary: &Summary<f64>) {
    let colors = ColorMap::new(summary.labels());
    let charts: Vec<BarChart> = summary
        .iter()
        .enumerate()
        .map(|(i, (label, &value))| {
            let bar = Bar::new(i as f64, value)
                .name(label)
                .width(0.6)
                .fill(colors.color_for(label));
            BarChart::new(vec![bar])
                .name(label)
                .color(colors.color_for(label))
        })
        .collect();

    Plot::new(id)
        .legend(Legend::default())
        .y_axis_label(y_label)
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for chart in charts {
                plot_ui.bar_chart(chart);
            }
        });
}

/// Female passengers and female survivors side by side for each class.
#[allow(clippy::cast_precision_loss)]
fn female_survival_chart(ui: &mut Ui, rows: &[ClassSurvival]) {
    const WIDTH: f64 = 0.35;
    let colors = ColorMap::new(["Female passengers", "Female survivors"]);

    let passengers = BarChart::new(
        rows.iter()
            .enumerate()
            .map(|(i, row)| {
                Bar::new(i as f64, row.count as f64)
                    .name(row.class.label())
                    .width(WIDTH)
            })
            .collect(),
    )
    .name("Female passengers")
    .color(colors.color_for("Female passengers"));

    let survivors = BarChart::new(
        rows.iter()
            .enumerate()
            .map(|(i, row)| {
                Bar::new(i as f64 + WIDTH, row.survivor_count as f64)
                    .name(format!("{} ({:.0}%)", row.class.label(), row.survival_rate))
                    .width(WIDTH)
            })
            .collect(),
    )
    .name("Female survivors")
    .color(colors.color_for("Female survivors"));

    Plot::new("female_survival")
        .legend(Legend::default())
        .y_axis_label("Passengers")
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(passengers);
            plot_ui.bar_chart(survivors);
        });
}

// ---------------------------------------------------------------------------
// Pie chart
// ---------------------------------------------------------------------------

/// One wedge of a pie, angles in radians counter-clockwise from +x.
#[derive(Debug, Clone, PartialEq)]
struct Slice {
    label: String,
    start: f64,
    sweep: f64,
    /// Percentage of the total.
    share: f64,
}

/// Split the circle by the summary's counts, starting at the top.
/// Empty entries produce no slice; an all-zero summary produces none.
#[allow(clippy::cast_precision_loss)]
fn pie_slices(summary: &Summary<usize>) -> Vec<Slice> {
    let total: usize = summary.values().sum();
    if total == 0 {
        return Vec::new();
    }
    let mut start = TAU / 4.0;
    let mut slices = Vec::new();
    for (label, &n) in summary.iter() {
        if n == 0 {
            continue;
        }
        let fraction = n as f64 / total as f64;
        let sweep = fraction * TAU;
        slices.push(Slice {
            label: label.to_string(),
            start,
            sweep,
            share: fraction * 100.0,
        });
        start += sweep;
    }
    slices
}

/// Closed outline of a wedge of the unit circle: centre, then the arc.
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn wedge_points(start: f64, sweep: f64) -> Vec<[f64; 2]> {
    let steps = ((sweep / TAU) * 120.0).ceil().max(1.0) as usize;
    let mut points = Vec::with_capacity(steps + 2);
    points.push([0.0, 0.0]);
    for i in 0..=steps {
        let angle = start + sweep * (i as f64 / steps as f64);
        points.push([angle.cos(), angle.sin()]);
    }
    points
}

fn pie_chart(ui: &mut Ui, id: &str, summary: &Summary<usize>) {
    let colors = ColorMap::new(summary.labels());
    let slices = pie_slices(summary);

    Plot::new(id)
        .legend(Legend::default())
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .show(ui, |plot_ui| {
            for slice in &slices {
                let color = colors.color_for(&slice.label);
                plot_ui.polygon(
                    Polygon::new(PlotPoints::from(wedge_points(slice.start, slice.sweep)))
                        .name(&slice.label)
                        .fill_color(color)
                        .stroke(Stroke::new(1.0, Color32::WHITE)),
                );

                let mid = slice.start + slice.sweep / 2.0;
                plot_ui.text(Text::new(
                    PlotPoint::new(0.6 * mid.cos(), 0.6 * mid.sin()),
                    RichText::new(format!("{:.1}%", slice.share)).strong(),
                ));
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classes(counts: [usize; 3]) -> Summary<usize> {
        ["class_1", "class_2", "class_3"]
            .into_iter()
            .zip(counts)
            .collect()
    }

    #[test]
    fn slices_cover_the_full_circle() {
        let slices = pie_slices(&classes([1, 1, 2]));
        assert_eq!(slices.len(), 3);
        let sweep: f64 = slices.iter().map(|s| s.sweep).sum();
        assert!((sweep - TAU).abs() < 1e-9);
        assert_eq!(slices[2].share, 50.0);
        assert!((slices[0].start - TAU / 4.0).abs() < 1e-12);
        assert!((slices[1].start - (slices[0].start + slices[0].sweep)).abs() < 1e-12);
    }

    #[test]
    fn empty_classes_are_skipped() {
        let slices = pie_slices(&classes([3, 0, 1]));
        let labels: Vec<_> = slices.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["class_1", "class_3"]);
        assert!(pie_slices(&classes([0, 0, 0])).is_empty());
    }

    #[test]
    fn wedge_starts_at_centre_and_stays_on_unit_circle() {
        let points = wedge_points(0.0, TAU / 4.0);
        assert_eq!(points[0], [0.0, 0.0]);
        assert!(points.len() >= 3);
        for p in &points[1..] {
            assert!(((p[0] * p[0] + p[1] * p[1]) - 1.0).abs() < 1e-9);
        }
        let last = points[points.len() - 1];
        assert!(last[0].abs() < 1e-9 && (last[1] - 1.0).abs() < 1e-9);
    }
}
