use std::f64::consts::{FRAC_PI_2, TAU};

use eframe::egui::{Color32, RichText, Stroke, Ui};
use egui_plot::{Legend, MarkerShape, Plot, PlotPoint, PlotPoints, Points, Polygon, Text};

use crate::color::outcome_color;
use crate::data::chart::{CorrelationPoint, OutcomeChart, ProportionCategory};
use crate::state::AppState;

/// Arc points per full turn of the pie.
const PIE_RESOLUTION: usize = 96;

/// Radius at which slice percentages are drawn.
const LABEL_RADIUS: f64 = 0.65;

// ---------------------------------------------------------------------------
// Pie geometry
// ---------------------------------------------------------------------------

/// Polygons of one pie slice plus the anchor of its percentage label.
#[derive(Debug, Clone, PartialEq)]
pub struct Wedge {
    /// Each polygon spans at most a quarter turn so it stays convex.
    pub polygons: Vec<Vec<[f64; 2]>>,
    pub label_at: [f64; 2],
}

/// Lay out a unit pie starting at 12 o'clock and running clockwise.
/// Zero-width slices get no polygons.
pub fn pie_wedges(fractions: &[f64]) -> Vec<Wedge> {
    let mut start = FRAC_PI_2;
    fractions
        .iter()
        .map(|&fraction| {
            let sweep = fraction.clamp(0.0, 1.0) * TAU;
            let end = start - sweep;
            let mid = start - sweep / 2.0;

            let mut polygons = Vec::new();
            if sweep > 0.0 {
                let parts = (sweep / FRAC_PI_2 - 1e-9).ceil().max(1.0) as usize;
                let part_sweep = sweep / parts as f64;
                for p in 0..parts {
                    let a0 = start - p as f64 * part_sweep;
                    let steps = ((part_sweep / TAU) * PIE_RESOLUTION as f64).ceil().max(1.0) as usize;
                    let mut poly = Vec::with_capacity(steps + 2);
                    poly.push([0.0, 0.0]);
                    for s in 0..=steps {
                        let a = a0 - part_sweep * s as f64 / steps as f64;
                        poly.push([a.cos(), a.sin()]);
                    }
                    polygons.push(poly);
                }
            }

            start = end;
            Wedge {
                polygons,
                label_at: [LABEL_RADIUS * mid.cos(), LABEL_RADIUS * mid.sin()],
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Proportion view
// ---------------------------------------------------------------------------

/// Render the success pie chart.
pub fn outcome_pie(ui: &mut Ui, state: &AppState, height: f32) {
    let chart = state.outcome_chart();
    ui.strong(&chart.title);

    if let Some(hint) = pie_hint(chart) {
        empty_hint(ui, height, hint);
        return;
    }

    let fractions = chart.fractions();
    let wedges = pie_wedges(&fractions);

    Plot::new("outcome_pie")
        .height(height)
        .legend(Legend::default())
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .show_x(false)
        .show_y(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .include_x(-1.3)
        .include_x(1.3)
        .include_y(-1.1)
        .include_y(1.1)
        .show(ui, |plot_ui| {
            for ((slice, wedge), fraction) in chart.slices.iter().zip(&wedges).zip(&fractions) {
                let (name, color) = match &slice.category {
                    ProportionCategory::Site(site) => {
                        (site.clone(), state.site_colors.color_for(site))
                    }
                    ProportionCategory::Outcome(class) => {
                        (format!("class {class}"), outcome_color(*class))
                    }
                };

                for poly in &wedge.polygons {
                    let points: PlotPoints = poly.iter().copied().collect();
                    plot_ui.polygon(
                        Polygon::new(points)
                            .name(&name)
                            .fill_color(color)
                            .stroke(Stroke::new(1.0, Color32::WHITE)),
                    );
                }

                if *fraction > 0.0 {
                    let [x, y] = wedge.label_at;
                    plot_ui.text(Text::new(
                        PlotPoint::new(x, y),
                        RichText::new(format!("{:.1}%", fraction * 100.0))
                            .color(Color32::WHITE)
                            .strong(),
                    ));
                }
            }
        });
}

/// Why the pie has nothing to draw, if it has nothing to draw.
fn pie_hint(chart: &OutcomeChart) -> Option<&'static str> {
    if chart.is_empty() {
        Some("No launches match this site")
    } else if chart.total() == 0 {
        Some("No successful launches")
    } else {
        None
    }
}

// ---------------------------------------------------------------------------
// Relationship view
// ---------------------------------------------------------------------------

/// Render the payload / outcome scatter chart, coloured by booster version.
pub fn correlation_scatter(ui: &mut Ui, state: &AppState, height: f32) {
    let chart = state.correlation_chart();
    ui.strong(&chart.title);

    if chart.is_empty() {
        let hint = if state.filter().payload_range.is_inverted() {
            "Payload range is inverted"
        } else {
            "No launches match this payload range"
        };
        empty_hint(ui, height, hint);
        return;
    }

    let (lo, hi) = state.config().payload_limits;

    Plot::new("correlation_scatter")
        .height(height)
        .legend(Legend::default())
        .x_axis_label("Payload Mass (kg)")
        .y_axis_label("class")
        .include_x(lo)
        .include_x(hi)
        .include_y(-0.25)
        .include_y(1.25)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (category, color) in state.booster_colors.legend_entries() {
                let xy = points_for_category(&chart.points, &category);
                if xy.is_empty() {
                    continue;
                }
                let points: PlotPoints = xy.into_iter().collect();
                plot_ui.points(
                    Points::new(points)
                        .name(&category)
                        .color(color)
                        .shape(MarkerShape::Circle)
                        .filled(true)
                        .radius(4.0),
                );
            }
        });
}

/// `[payload, class]` pairs of one booster category, in row order.
fn points_for_category(points: &[CorrelationPoint], category: &str) -> Vec<[f64; 2]> {
    points
        .iter()
        .filter(|p| p.booster_version_category == category)
        .map(|p| [p.payload_mass_kg, f64::from(p.outcome.value())])
        .collect()
}

fn empty_hint(ui: &mut Ui, height: f32, text: &str) {
    ui.allocate_ui(eframe::egui::vec2(ui.available_width(), height), |ui: &mut Ui| {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.label(RichText::new(text).italics().color(Color32::GRAY));
        });
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn norm(p: [f64; 2]) -> f64 {
        (p[0] * p[0] + p[1] * p[1]).sqrt()
    }

    #[test]
    fn first_slice_starts_at_twelve_oclock_and_runs_clockwise() {
        let wedges = pie_wedges(&[0.25, 0.75]);
        let first = &wedges[0].polygons[0];
        assert_eq!(first[0], [0.0, 0.0]);
        assert!((first[1][0]).abs() < 1e-9 && (first[1][1] - 1.0).abs() < 1e-9);
        let last = first[first.len() - 1];
        assert!((last[0] - 1.0).abs() < 1e-9 && last[1].abs() < 1e-9);
        // Label of the first quarter sits in the upper-right quadrant.
        assert!(wedges[0].label_at[0] > 0.0 && wedges[0].label_at[1] > 0.0);
    }

    #[test]
    fn large_slices_are_split_into_quarter_turns() {
        let wedges = pie_wedges(&[0.25, 0.75]);
        assert_eq!(wedges[0].polygons.len(), 1);
        assert_eq!(wedges[1].polygons.len(), 3);
        let full = pie_wedges(&[1.0]);
        assert_eq!(full[0].polygons.len(), 4);
    }

    #[test]
    fn arc_points_lie_on_the_unit_circle() {
        for wedge in pie_wedges(&[0.1, 0.3, 0.6]) {
            for poly in &wedge.polygons {
                for p in &poly[1..] {
                    assert!((norm(*p) - 1.0).abs() < 1e-9);
                }
            }
            assert!((norm(wedge.label_at) - LABEL_RADIUS).abs() < 1e-9);
        }
    }

    #[test]
    fn pie_hint_tells_no_match_from_no_success() {
        use crate::data::aggregate::aggregate_outcomes;
        use crate::data::filter::SiteSelection;
        use crate::data::model::{LaunchDataset, LaunchRecord, OutcomeClass};

        let failures = LaunchDataset::from_records(vec![
            LaunchRecord::new("CCAFS LC-40", OutcomeClass::Failure, 500.0, "v1.0"),
            LaunchRecord::new("VAFB SLC-4E", OutcomeClass::Failure, 900.0, "v1.1"),
        ]);
        let all = aggregate_outcomes(&failures, &SiteSelection::All);
        assert_eq!(pie_hint(&all), Some("No successful launches"));

        let empty = aggregate_outcomes(&LaunchDataset::default(), &SiteSelection::All);
        assert_eq!(pie_hint(&empty), Some("No launches match this site"));

        let one = aggregate_outcomes(&failures, &SiteSelection::Site("CCAFS LC-40".into()));
        assert_eq!(pie_hint(&one), None);
    }

    #[test]
    fn empty_slices_have_no_polygons() {
        let wedges = pie_wedges(&[0.0, 1.0]);
        assert!(wedges[0].polygons.is_empty());
        assert_eq!(wedges[1].polygons.len(), 4);
    }
}
