use eframe::egui;
use kanaflash::gui::app::KanaflashApp;

fn main() -> eframe::Result {
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Kanaflash")
            .with_inner_size([960.0, 720.0])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Kanaflash",
        native_options,
        Box::new(|cc| Ok(Box::new(KanaflashApp::new(cc)))),
    )
}
