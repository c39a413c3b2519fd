//! googlyEyes - a pair of eyes that watch the pointer

mod app;

use app::GooglyEyesApp;
use eframe::NativeOptions;
use tracing_subscriber::EnvFilter;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([420.0, 320.0])
            .with_title("googlyEyes"),
        ..Default::default()
    };

    eframe::run_native(
        "googlyEyes",
        options,
        Box::new(|cc| {
            googlycore::Theme::default().apply(&cc.egui_ctx);
            Box::new(GooglyEyesApp::new(cc))
        }),
    )
}
