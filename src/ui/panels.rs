use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::model::Preview;
use crate::error::CensusError;
use crate::state::{AppState, LoadTarget};

const PREVIEW_CHOICES: [Preview; 7] = [
    Preview::First(5),
    Preview::First(10),
    Preview::First(20),
    Preview::First(50),
    Preview::Head,
    Preview::Tail,
    Preview::All,
];

// ---------------------------------------------------------------------------
// Left side panel – dataset controls
// ---------------------------------------------------------------------------

/// Render the left control panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Dataset");
    ui.separator();

    let Some((rows, cols)) = state.shape() else {
        ui.label("No dataset loaded.");
        return;
    };
    ui.label(RichText::new(format!("Rows: {rows} | Columns: {cols}")).strong());
    if let Some(name) = &state.source_name {
        ui.label(name);
    }
    ui.add_space(4.0);

    // Clone what we need so we can mutate state inside the loops.
    let categorical = state.categorical_columns.clone();
    let numeric = state.numeric_columns.clone();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Preview selector ----
            ui.strong("Preview");
            egui::ComboBox::from_id_salt("preview_mode")
                .selected_text(state.preview.to_string())
                .show_ui(ui, |ui: &mut Ui| {
                    for choice in PREVIEW_CHOICES {
                        ui.selectable_value(&mut state.preview, choice, choice.to_string());
                    }
                });
            ui.separator();

            // ---- Merge ----
            ui.strong("Merge");
            ui.checkbox(&mut state.tag_sources, "Add source column");
            if ui.button("Merge second file…").clicked() {
                open_file_dialog(ui.ctx(), state, LoadTarget::Merge);
            }
            ui.separator();

            // ---- Histogram on demand ----
            ui.strong("Histogram");
            egui::ComboBox::from_id_salt("histogram_column")
                .selected_text("Add histogram of…")
                .show_ui(ui, |ui: &mut Ui| {
                    for col in &numeric {
                        if ui.selectable_label(false, col).clicked() {
                            state.show_histogram(col);
                        }
                    }
                });
            ui.separator();

            // ---- Categorical selection ----
            let header_text = format!(
                "Categorical columns  ({}/{})",
                state.selected_categories.len(),
                categorical.len()
            );
            egui::CollapsingHeader::new(RichText::new(header_text).strong())
                .id_salt("categorical_columns")
                .default_open(true)
                .show(ui, |ui: &mut Ui| {
                    for col in &categorical {
                        let mut checked = state.selected_categories.contains(col);
                        if ui.checkbox(&mut checked, col).changed() {
                            state.toggle_category(col);
                        }
                    }
                });
            if let Some(label) = state.active_label() {
                ui.label(format!("Counts are split by {label}"));
            }
            if ui.button("Analyze categories").clicked() {
                if let Err(e) = state.run_categorical() {
                    state.report_error(e);
                }
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
            if ui.button("Open CSV…").clicked() {
                open_file_dialog(ui.ctx(), state, LoadTarget::Primary);
                ui.close_menu();
            }
            if ui.button("Merge second file…").clicked() {
                open_file_dialog(ui.ctx(), state, LoadTarget::Merge);
                ui.close_menu();
            }
            ui.separator();
            if ui.button("Export merged CSV…").clicked() {
                export_csv_dialog(state);
                ui.close_menu();
            }
            if ui.button("Export summary JSON…").clicked() {
                export_summary_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some((rows, cols)) = state.shape() {
            ui.label(format!("{rows} rows, {cols} columns"));
            ui.separator();
        }

        if state.loading {
            ui.spinner();
        }

        if let Some(msg) = &state.status_message {
            let color = if state.status_is_error {
                Color32::RED
            } else {
                ui.visuals().text_color()
            };
            ui.label(RichText::new(msg).color(color));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(ctx: &egui::Context, state: &mut AppState, target: LoadTarget) {
    if target == LoadTarget::Merge && state.dataset.is_none() {
        state.report_error(CensusError::NoDataset);
        return;
    }
    let title = match target {
        LoadTarget::Primary => "Open CSV",
        LoadTarget::Merge => "Select a second file to merge",
    };
    let file = rfd::FileDialog::new()
        .set_title(title)
        .add_filter("Supported files", &["csv", "txt", "json"])
        .add_filter("CSV", &["csv", "txt"])
        .add_filter("JSON", &["json"])
        .pick_file();

    if let Some(path) = file {
        let ctx = ctx.clone();
        if let Err(e) = state.request_load(path, target, move || ctx.request_repaint()) {
            state.report_error(e);
        }
    }
}

pub fn export_csv_dialog(state: &mut AppState) {
    if state.dataset.is_none() {
        state.report_error(CensusError::NoDataset);
        return;
    }
    let file = rfd::FileDialog::new()
        .set_title("Export merged CSV")
        .set_file_name("merged.csv")
        .add_filter("CSV", &["csv"])
        .save_file();

    if let Some(path) = file {
        if let Err(e) = state.export_csv(&path) {
            state.report_error(e);
        }
    }
}

pub fn export_summary_dialog(state: &mut AppState) {
    if state.summary.is_empty() {
        state.report_error(CensusError::EmptySummary);
        return;
    }
    let file = rfd::FileDialog::new()
        .set_title("Export summary JSON")
        .set_file_name("summary.json")
        .add_filter("JSON", &["json"])
        .save_file();

    if let Some(path) = file {
        if let Err(e) = state.export_summary(&path) {
            state.report_error(e);
        }
    }
}
