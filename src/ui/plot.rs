use eframe::egui::{Color32, RichText, Ui};
use egui_plot::{Bar, BarChart, Plot};

use crate::color::{SERIES_COLOR, generate_palette};
use crate::stats::{FrequencyTable, Histogram, MissingReport};

const CHART_HEIGHT: f32 = 220.0;

// ---------------------------------------------------------------------------
// Bar charts
// ---------------------------------------------------------------------------

/// Draw a bar chart with one bar per label. The plot id identifies the chart:
/// drawing again under the same id replaces what was there.
fn bar_chart(
    ui: &mut Ui,
    id: &str,
    axes: (&str, &str),
    labels: Vec<String>,
    values: Vec<f64>,
    colors: &[Color32],
) {
    let bars: Vec<Bar> = values
        .iter()
        .enumerate()
        .map(|(i, &v)| {
            Bar::new(i as f64, v)
                .name(&labels[i])
                .width(0.8)
                .fill(colors.get(i).copied().unwrap_or(SERIES_COLOR))
        })
        .collect();

    Plot::new(id)
        .height(CHART_HEIGHT)
        .x_axis_label(axes.0)
        .y_axis_label(axes.1)
        .include_y(0.0)
        .allow_boxed_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .x_axis_formatter(move |mark, _range| label_at(&labels, mark.value))
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });
}

/// Category label for an axis tick; ticks between bars stay blank.
fn label_at(labels: &[String], x: f64) -> String {
    let i = x.round();
    if (x - i).abs() > 1e-6 || i < 0.0 {
        return String::new();
    }
    labels.get(i as usize).cloned().unwrap_or_default()
}

fn chart_title(ui: &mut Ui, title: &str) {
    ui.label(RichText::new(title).strong());
}

// ---------------------------------------------------------------------------
// Report charts
// ---------------------------------------------------------------------------

/// Percentage of missing values per column.
pub fn missing_chart(ui: &mut Ui, report: &MissingReport) {
    let labels = report.iter().map(|e| e.column.clone()).collect();
    let values = report.iter().map(|e| e.percentage).collect();
    bar_chart(ui, "missing_chart", ("Column", "% Missing"), labels, values, &[]);
}

/// Value counts of one categorical column, one colour per category.
pub fn value_count_chart(ui: &mut Ui, column: &str, counts: &FrequencyTable) {
    chart_title(ui, column);
    let (labels, values): (Vec<String>, Vec<f64>) = counts
        .iter()
        .map(|(k, n)| (k.to_string(), n as f64))
        .unzip();
    let colors = generate_palette(labels.len());
    bar_chart(
        ui,
        &format!("bar_{column}"),
        (column, "Count"),
        labels,
        values,
        &colors,
    );
}

pub fn histogram_chart(ui: &mut Ui, hist: &Histogram) {
    chart_title(ui, &format!("{} distribution", hist.column));
    let (labels, values): (Vec<String>, Vec<f64>) = hist
        .buckets
        .iter()
        .map(|b| (b.label.clone(), b.count as f64))
        .unzip();
    bar_chart(
        ui,
        &format!("hist_{}", hist.column),
        (hist.column.as_str(), "Count"),
        labels,
        values,
        &[],
    );
}
