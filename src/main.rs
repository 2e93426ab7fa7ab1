use eframe::egui;
use rusty_census::app::RustyCensusApp;
use rusty_census::config::load_config;

fn main() -> eframe::Result {
    env_logger::init();

    let loaded = load_config();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Rusty Census – CSV Summary Viewer",
        options,
        Box::new(move |_cc| Ok(Box::new(RustyCensusApp::new(loaded.config, loaded.warning)))),
    )
}
