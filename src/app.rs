use eframe::egui;

use crate::config::AppConfig;
use crate::state::AppState;
use crate::ui::{panels, report};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct RustyCensusApp {
    pub state: AppState,
}

impl RustyCensusApp {
    /// `warning` is shown in the status bar, e.g. an unreadable config file.
    pub fn new(config: AppConfig, warning: Option<String>) -> Self {
        let mut state = AppState::new(config);
        if let Some(w) = warning {
            state.report_error(w);
        }
        Self { state }
    }
}

impl Default for RustyCensusApp {
    fn default() -> Self {
        Self::new(AppConfig::default(), None)
    }
}

impl eframe::App for RustyCensusApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Pick up a finished background load ----
        self.state.poll_pending();

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: dataset controls ----
        egui::SidePanel::left("control_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: report ----
        egui::CentralPanel::default().show(ctx, |ui| {
            report::report_view(ui, &self.state);
        });
    }
}
