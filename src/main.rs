mod api;
mod app;
mod config;
mod debounce;
mod error;
mod import;
mod models;
mod screens;
mod session;
mod validation;

use std::path::PathBuf;
use app::App;
use config::CONFIG_FILE;

fn main() -> iced::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("starting GRS admin");

    iced::application("GRS Admin", App::update, App::view)
        .theme(|app: &App| app.theme.clone())
        .window_size(iced::Size::new(1400.0, 850.0))
        .run_with(|| App::new(PathBuf::from(CONFIG_FILE)))
}
