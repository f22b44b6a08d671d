mod app;
mod config;
mod console;
mod effects;
mod logging;

pub use app::run_app;
pub use config::DEFAULT_CONFIG_PATH;
