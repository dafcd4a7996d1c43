use eframe::egui::{RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::color::outcome_color;
use crate::state::AppState;

/// Tabular view of the scatter points, in source row order.
pub fn records_table(ui: &mut Ui, state: &AppState) {
    let points = &state.correlation_chart().points;
    ui.strong(format!("{} launches in view", points.len()));

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .column(Column::auto().at_least(40.0))
        .column(Column::auto().at_least(140.0))
        .column(Column::auto().at_least(80.0))
        .column(Column::remainder())
        .header(20.0, |mut header| {
            header.col(|ui: &mut Ui| {
                ui.strong("#");
            });
            header.col(|ui: &mut Ui| {
                ui.strong("Payload Mass (kg)");
            });
            header.col(|ui: &mut Ui| {
                ui.strong("class");
            });
            header.col(|ui: &mut Ui| {
                ui.strong("Booster Version Category");
            });
        })
        .body(|body| {
            body.rows(18.0, points.len(), |mut row| {
                let idx = row.index();
                let point = &points[idx];
                row.col(|ui: &mut Ui| {
                    ui.label((idx + 1).to_string());
                });
                row.col(|ui: &mut Ui| {
                    ui.label(format!("{:.1}", point.payload_mass_kg));
                });
                row.col(|ui: &mut Ui| {
                    let label = if point.outcome.is_success() {
                        "1 (success)"
                    } else {
                        "0 (failure)"
                    };
                    ui.label(RichText::new(label).color(outcome_color(point.outcome)));
                });
                row.col(|ui: &mut Ui| {
                    ui.label(point.booster_version_category.as_str());
                });
            });
        });
}
