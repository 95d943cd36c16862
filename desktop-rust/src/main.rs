mod app;
mod io;
mod model;

use app::{DesktopApp, configure_fonts};

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = io::load_service_config();
    log::info!("caption service: {}", config.base_url);

    let options = eframe::NativeOptions::default();
    eframe::run_native(
        "Panoptic Caption Compare",
        options,
        Box::new(move |cc| {
            configure_fonts(&cc.egui_ctx);
            Box::new(DesktopApp::new(cc.egui_ctx.clone(), config))
        }),
    )
}
