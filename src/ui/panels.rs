use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::model::{TERM, YEAR};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel: one multi-select per present dimension.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let Some(table) = state.table.clone() else {
        ui.label("No dataset loaded.");
        return;
    };

    let years = table.distinct_years();
    let terms = table.distinct_terms();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            if table.has_column(YEAR) {
                let header = format!("Year  ({}/{})", state.selection.years.len(), years.len());
                egui::CollapsingHeader::new(RichText::new(header).strong())
                    .id_salt("year_filter")
                    .default_open(true)
                    .show(ui, |ui: &mut Ui| {
                        ui.horizontal(|ui: &mut Ui| {
                            if ui.small_button("All").clicked() {
                                state.select_all_years();
                            }
                            if ui.small_button("None").clicked() {
                                state.clear_years();
                            }
                        });
                        for &year in &years {
                            let mut checked = state.selection.years.contains(&year);
                            if ui.checkbox(&mut checked, year.to_string()).changed() {
                                state.toggle_year(year);
                            }
                        }
                    });
            }

            if table.has_column(TERM) {
                let header = format!("Term  ({}/{})", state.selection.terms.len(), terms.len());
                egui::CollapsingHeader::new(RichText::new(header).strong())
                    .id_salt("term_filter")
                    .default_open(true)
                    .show(ui, |ui: &mut Ui| {
                        ui.horizontal(|ui: &mut Ui| {
                            if ui.small_button("All").clicked() {
                                state.select_all_terms();
                            }
                            if ui.small_button("None").clicked() {
                                state.clear_terms();
                            }
                        });
                        for term in &terms {
                            let mut checked = state.selection.terms.contains(term);
                            if ui.checkbox(&mut checked, term.as_str()).changed() {
                                state.toggle_term(term);
                            }
                        }
                    });
            }

            if state.selection.years.is_empty() || state.selection.terms.is_empty() {
                ui.add_space(6.0);
                ui.label(
                    RichText::new("An empty selection shows every value.")
                        .small()
                        .color(Color32::GRAY),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui
                .add_enabled(state.data_path.is_some(), egui::Button::new("Reload"))
                .clicked()
            {
                state.reload();
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(table) = &state.table {
            ui.label(format!(
                "{} rows loaded, {} visible",
                table.len(),
                state.visible_rows()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open admissions data")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        log::info!("Opening {}", path.display());
        state.open(&path);
    }
}
