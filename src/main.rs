use eframe::egui;

use skydome::SkyConfig;

mod app;

use app::SkyApp;

/// Optional overrides: SKYDOME_STARS (count) and SKYDOME_SEED (catalog seed).
fn config_from_env() -> SkyConfig {
    let mut config = SkyConfig::default();
    if let Ok(raw) = std::env::var("SKYDOME_STARS") {
        match raw.parse() {
            Ok(n) => config = config.with_star_count(n),
            Err(_) => log::warn!("ignoring SKYDOME_STARS={:?}: not a count", raw),
        }
    }
    if let Ok(raw) = std::env::var("SKYDOME_SEED") {
        match raw.parse() {
            Ok(seed) => config = config.with_seed(seed),
            Err(_) => log::warn!("ignoring SKYDOME_SEED={:?}: not a u64", raw),
        }
    }
    config
}

fn main() {
    env_logger::init();

    let config = config_from_env();
    let app = match SkyApp::new(&config) {
        Ok(app) => app,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };
    log::info!("starting with {} stars", app.engine.catalog().len());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Skydome: Planetarium",
        options,
        Box::new(move |cc| {
            cc.egui_ctx.set_visuals(egui::Visuals::dark());
            Ok(Box::new(app))
        }),
    )
    .expect("Failed to start Skydome");
}
