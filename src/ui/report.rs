use eframe::egui::{self, RichText, ScrollArea, Ui};

use super::{plot, tables};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Central panel – the analysis report
// ---------------------------------------------------------------------------

fn section(ui: &mut Ui, title: &str, add_contents: impl FnOnce(&mut Ui)) {
    egui::CollapsingHeader::new(RichText::new(title).strong())
        .id_salt(title)
        .default_open(true)
        .show(ui, add_contents);
}

/// Render every report of the current dataset, top to bottom.
pub fn report_view(ui: &mut Ui, state: &AppState) {
    let dataset = match &state.dataset {
        Some(ds) => ds,
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                if state.loading {
                    ui.spinner();
                } else {
                    ui.heading("Open a CSV file to begin  (File → Open CSV…)");
                }
            });
            return;
        }
    };
    let reports = &state.reports;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            section(ui, "Preview", |ui| {
                tables::preview_table(ui, dataset, state.preview);
            });

            section(ui, "Missing values", |ui| {
                plot::missing_chart(ui, &reports.missing);
            });

            section(ui, "Numeric statistics", |ui| {
                tables::numeric_table(ui, &reports.numeric);
            });

            if !reports.bars.is_empty() {
                section(ui, "Value counts", |ui| {
                    for (col, counts) in &reports.bars {
                        plot::value_count_chart(ui, col, counts);
                    }
                });
            }

            if !reports.histograms.is_empty() {
                section(ui, "Histograms", |ui| {
                    for hist in &reports.histograms {
                        plot::histogram_chart(ui, hist);
                    }
                });
            }

            if let Some(categorical) = &reports.categorical {
                section(ui, "Categorical counts", |ui| {
                    if let Some(label) = state.active_label() {
                        ui.label(format!("Cross-tabulated by {label}"));
                    }
                    tables::categorical_tables(ui, categorical);
                });
            }
        });
}
