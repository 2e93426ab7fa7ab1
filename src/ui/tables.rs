use eframe::egui::{self, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::{Dataset, Preview};
use crate::stats::{CategoricalSummary, NumericSummary};

const ROW_HEIGHT: f32 = 18.0;
const HEADER_HEIGHT: f32 = 20.0;

// ---------------------------------------------------------------------------
// Dataset preview
// ---------------------------------------------------------------------------

/// Table of the rows selected by `preview`. Only "all rows" scrolls
/// vertically; every other window is short enough to show in full.
pub fn preview_table(ui: &mut Ui, dataset: &Dataset, preview: Preview) {
    let rows = dataset.preview(preview);
    let columns = &dataset.columns;

    ui.push_id("preview_table", |ui: &mut Ui| {
        egui::ScrollArea::horizontal().show(ui, |ui: &mut Ui| {
            TableBuilder::new(ui)
                .striped(true)
                .resizable(true)
                .vscroll(preview == Preview::All)
                .max_scroll_height(400.0)
                .columns(Column::auto().at_least(40.0).clip(true), columns.len())
                .header(HEADER_HEIGHT, |mut header| {
                    for col in columns {
                        header.col(|ui| {
                            ui.strong(col);
                        });
                    }
                })
                .body(|body| {
                    body.rows(ROW_HEIGHT, rows.len(), |mut row| {
                        let rec = &rows[row.index()];
                        for col in columns {
                            row.col(|ui| {
                                ui.label(rec.get(col).map(|c| c.to_string()).unwrap_or_default());
                            });
                        }
                    });
                });
        });
    });
}

// ---------------------------------------------------------------------------
// Numeric statistics
// ---------------------------------------------------------------------------

const NUMERIC_HEADERS: [&str; 9] = [
    "Column", "Count", "Mean", "Std", "Min", "25%", "50%", "75%", "Max",
];

pub fn numeric_table(ui: &mut Ui, summary: &NumericSummary) {
    if summary.is_empty() {
        ui.label("No numeric columns.");
        return;
    }
    ui.push_id("numeric_table", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .vscroll(false)
            .columns(Column::auto().at_least(50.0), NUMERIC_HEADERS.len())
            .header(HEADER_HEIGHT, |mut header| {
                for title in NUMERIC_HEADERS {
                    header.col(|ui| {
                        ui.strong(title);
                    });
                }
            })
            .body(|mut body| {
                for (col, s) in summary.iter() {
                    body.row(ROW_HEIGHT, |mut row| {
                        let cells = [
                            col.to_string(),
                            s.count.to_string(),
                            format!("{:.2}", s.mean),
                            format!("{:.2}", s.std),
                            s.min.to_string(),
                            s.q1.to_string(),
                            s.median.to_string(),
                            s.q3.to_string(),
                            s.max.to_string(),
                        ];
                        for text in cells {
                            row.col(|ui| {
                                ui.label(text);
                            });
                        }
                    });
                }
            });
    });
}

// ---------------------------------------------------------------------------
// Categorical counts
// ---------------------------------------------------------------------------

/// One small Category / Count table per analysed column.
pub fn categorical_tables(ui: &mut Ui, summary: &CategoricalSummary) {
    for (col, counts) in summary.iter() {
        ui.add_space(6.0);
        ui.label(RichText::new(col).strong());
        ui.push_id(("categorical_table", col), |ui: &mut Ui| {
            TableBuilder::new(ui)
                .striped(true)
                .vscroll(counts.len() > 20)
                .max_scroll_height(300.0)
                .column(Column::auto().at_least(160.0))
                .column(Column::auto().at_least(50.0))
                .header(HEADER_HEIGHT, |mut header| {
                    header.col(|ui| {
                        ui.strong("Category");
                    });
                    header.col(|ui| {
                        ui.strong("Count");
                    });
                })
                .body(|mut body| {
                    for (key, n) in counts.iter() {
                        body.row(ROW_HEIGHT, |mut row| {
                            row.col(|ui| {
                                ui.label(key);
                            });
                            row.col(|ui| {
                                ui.label(n.to_string());
                            });
                        });
                    }
                });
        });
    }
}
