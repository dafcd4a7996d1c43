use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::export::export_correlation_csv;
use crate::data::filter::{ALL_SITES, SiteSelection};
use crate::state::{AppState, FilterEvent};

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel. Every control change is turned into a
/// [`FilterEvent`]; the panel never touches chart data itself.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let mut events: Vec<FilterEvent> = Vec::new();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Launch site dropdown ----
            ui.strong("Launch site");
            let current = state.filter().site.clone();
            egui::ComboBox::from_id_salt("site_dropdown")
                .selected_text(current.to_string())
                .width(ui.available_width())
                .show_ui(ui, |ui: &mut Ui| {
                    ui.add(
                        egui::TextEdit::singleline(&mut state.site_search)
                            .hint_text("Select a launch site"),
                    );
                    if ui
                        .selectable_label(current == SiteSelection::All, "All Sites")
                        .clicked()
                    {
                        events.push(FilterEvent::SiteSelected(ALL_SITES.to_string()));
                    }
                    for site in state
                        .sites
                        .iter()
                        .filter(|s| matches_search(s, &state.site_search))
                    {
                        let selected = matches!(&current, SiteSelection::Site(s) if s == site);
                        let text = RichText::new(site).color(state.site_colors.color_for(site));
                        if ui.selectable_label(selected, text).clicked() {
                            events.push(FilterEvent::SiteSelected(site.clone()));
                        }
                    }
                });
            ui.separator();

            // ---- Payload range ----
            ui.strong("Payload range (Kg)");
            let (lo, hi) = state.config().payload_limits;
            let step = state.config().payload_step;
            let range = state.filter().payload_range;
            let (mut min, mut max) = (range.min, range.max);

            let min_changed = ui
                .add(egui::Slider::new(&mut min, lo..=hi).step_by(step).text("min"))
                .changed();
            let max_changed = ui
                .add(egui::Slider::new(&mut max, lo..=hi).step_by(step).text("max"))
                .changed();

            // Behave like a two-handle slider: pushing one handle past the
            // other drags the other along.
            if min_changed && min > max {
                max = min;
            } else if max_changed && max < min {
                min = max;
            }
            if min_changed || max_changed {
                events.push(FilterEvent::PayloadRangeChanged(min, max));
            }

            ui.horizontal(|ui: &mut Ui| {
                for mark in &state.config().payload_marks {
                    ui.small(format!("{mark}"));
                }
            });
            ui.separator();

            if ui.button("Reset filters").clicked() {
                state.site_search.clear();
                events.push(FilterEvent::Reset);
            }
            ui.checkbox(&mut state.show_records, "Show records");
        });

    for event in events {
        state.apply(event);
    }
}

/// Case-insensitive substring match for the site search box.
fn matches_search(site: &str, query: &str) -> bool {
    let query = query.trim();
    query.is_empty() || site.to_lowercase().contains(&query.to_lowercase())
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Export CSV…").clicked() {
                export_dialog(state);
                ui.close_menu();
            }
            if ui.button("Quit").clicked() {
                ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
            }
        });

        ui.separator();
        ui.label(
            RichText::new("SpaceX Launch Records Dashboard")
                .strong()
                .color(Color32::from_rgb(0x50, 0x3D, 0x36)),
        );
        ui.separator();

        let ds = state.dataset();
        let mut summary = format!(
            "{} launches loaded, {} in payload view",
            ds.len(),
            state.correlation_chart().len()
        );
        if let Some((lo, hi)) = ds.payload_bounds() {
            summary.push_str(&format!(" (payloads {lo}–{hi} kg)"));
        }
        ui.label(summary);

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Export dialog
// ---------------------------------------------------------------------------

pub fn export_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export scatter data")
        .add_filter("CSV", &["csv"])
        .set_file_name("launches.csv")
        .save_file();

    if let Some(path) = file {
        match export_correlation_csv(state.correlation_chart(), &path) {
            Ok(rows) => {
                state.status_message = None;
                log::info!("Wrote {rows} rows to {}", path.display());
            }
            Err(e) => {
                let e = anyhow::Error::new(e);
                log::error!("Failed to export: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn site_search_is_case_insensitive() {
        assert!(matches_search("KSC LC-39A", ""));
        assert!(matches_search("KSC LC-39A", "ksc"));
        assert!(matches_search("VAFB SLC-4E", " slc "));
        assert!(!matches_search("CCAFS LC-40", "vafb"));
    }
}
