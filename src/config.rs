use std::fs;
use std::path::Path;
use std::time::Duration;
use iced::Theme;
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE: &str = "config.json";
pub const API_URL_ENV: &str = "GRS_API_URL";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub theme_name: String,
    pub api_base_url: String,
    pub session_db: String,
    pub search_debounce_ms: u64,
    pub page_size: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme_name: "Light".to_string(),
            api_base_url: "http://localhost:5000/api".to_string(),
            session_db: "grs_session.db".to_string(),
            search_debounce_ms: 500,
            page_size: 10,
        }
    }
}

impl Config {
    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    /// The grievance list reacts a little faster than the other lists.
    pub fn grievance_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms.saturating_sub(100).max(1))
    }

    pub fn theme(&self) -> Theme {
        theme_from_str(&self.theme_name).unwrap_or(Theme::Light)
    }
}

/// Reads the config file, writing one with defaults when it is missing.
/// `GRS_API_URL` overrides the base URL without touching the file.
pub fn load_config(path: &Path) -> Config {
    let mut config = match fs::read_to_string(path) {
        Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|err| {
            log::warn!("{} is not valid ({err}), using defaults", path.display());
            Config::default()
        }),
        Err(_) => {
            let config = Config::default();
            if let Err(err) = save_config(path, &config) {
                log::warn!("could not create {}: {err}", path.display());
            }
            config
        }
    };
    if let Ok(url) = std::env::var(API_URL_ENV) {
        if !url.trim().is_empty() {
            config.api_base_url = url;
        }
    }
    config
}

pub fn save_config(path: &Path, config: &Config) -> std::io::Result<()> {
    let json = serde_json::to_string_pretty(config)?;
    fs::write(path, json)?;
    Ok(())
}

pub fn theme_from_str(name: &str) -> Option<Theme> {
    Theme::ALL
        .iter()
        .find(|t| theme_to_str(t).eq_ignore_ascii_case(name))
        .cloned()
}

pub fn theme_to_str(theme: &Theme) -> &'static str {
    match theme {
        Theme::Light => "Light",
        Theme::Dark => "Dark",
        Theme::Dracula => "Dracula",
        Theme::Nord => "Nord",
        Theme::SolarizedLight => "SolarizedLight",
        Theme::SolarizedDark => "SolarizedDark",
        Theme::GruvboxLight => "GruvboxLight",
        Theme::GruvboxDark => "GruvboxDark",
        Theme::CatppuccinLatte => "CatppuccinLatte",
        Theme::CatppuccinFrappe => "CatppuccinFrappe",
        Theme::CatppuccinMacchiato => "CatppuccinMacchiato",
        Theme::CatppuccinMocha => "CatppuccinMocha",
        Theme::TokyoNight => "TokyoNight",
        Theme::TokyoNightStorm => "TokyoNightStorm",
        Theme::TokyoNightLight => "TokyoNightLight",
        Theme::KanagawaWave => "KanagawaWave",
        Theme::KanagawaDragon => "KanagawaDragon",
        Theme::KanagawaLotus => "KanagawaLotus",
        Theme::Moonfly => "Moonfly",
        Theme::Nightfly => "Nightfly",
        Theme::Oxocarbon => "Oxocarbon",
        Theme::Ferra => "Ferra",
        _ => "Unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_created_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let config = load_config(&path);
        assert_eq!(config.page_size, 10);
        assert!(path.exists());
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "theme_name": "Dracula", "page_size": 25 }"#).unwrap();
        let config = load_config(&path);
        assert_eq!(config.theme(), Theme::Dracula);
        assert_eq!(config.page_size, 25);
        assert_eq!(config.search_debounce_ms, 500);
    }

    #[test]
    fn debounce_delays() {
        let config = Config::default();
        assert_eq!(config.search_debounce(), Duration::from_millis(500));
        assert_eq!(config.grievance_debounce(), Duration::from_millis(400));
    }

    #[test]
    fn theme_names_round_trip() {
        assert_eq!(theme_from_str("nord"), Some(Theme::Nord));
        assert_eq!(theme_from_str("no such theme"), None);
    }
}
