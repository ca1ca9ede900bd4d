use wasm_bindgen::prelude::*;

pub mod application;
pub mod domain;
pub mod event_utils;
pub mod infrastructure;
pub mod presentation;
pub mod time_utils;

pub use application::HeatmapChart;
pub use presentation::StockHeatmap;

/// Install panic hook, console logger and browser clock.
#[wasm_bindgen(start)]
pub fn initialize() {
    console_error_panic_hook::set_once();

    #[cfg(debug_assertions)]
    let console_logger = infrastructure::services::ConsoleLogger::new_development();
    #[cfg(not(debug_assertions))]
    let console_logger = infrastructure::services::ConsoleLogger::new_production();
    domain::logging::init_logger(Box::new(console_logger));

    let browser_time_provider = Box::new(infrastructure::services::BrowserTimeProvider::new());
    domain::logging::init_time_provider(browser_time_provider);

    crate::log_info!(
        domain::logging::LogComponent::Presentation("Initialize"),
        "stock heatmap initialized"
    );
}
