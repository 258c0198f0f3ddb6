use cardioscope::gui::CardioApp;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::Builder::from_default_env().filter_level(log::LevelFilter::Info).init();

    log::info!("Starting CardioScope {}", env!("CARGO_PKG_VERSION"));

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("CardioScope")
            .with_inner_size([1200.0, 860.0])
            .with_min_inner_size([800.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        "CardioScope",
        native_options,
        Box::new(|cc| Ok(Box::new(CardioApp::new(cc)?))),
    )
}
