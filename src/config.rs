use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use color_eyre::eyre::WrapErr;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{audio::config::AudioConfig, util::log::project_directory};

pub const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub search: SearchConfig,
    pub audio: AudioConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub country: Option<String>,
    pub limit: Option<u32>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://itunes.apple.com".to_string(),
            country: None,
            limit: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub debounce_ms: u64,
}

impl SearchConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { debounce_ms: 200 }
    }
}

impl Config {
    pub fn default_path() -> Option<PathBuf> {
        project_directory().map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    /// Defaults, then the config file (if any), then `TUNESCOUT_*` variables.
    pub fn load(path: Option<&Path>) -> color_eyre::Result<Self> {
        let path = path.map(Path::to_path_buf).or_else(Self::default_path);

        let mut config = match path {
            Some(path) if path.exists() => {
                info!(path = %path.display(), "config_loaded");
                Self::from_file(&path)?
            }
            _ => Self::default(),
        };

        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn from_file(path: &Path) -> color_eyre::Result<Self> {
        let content = fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&content).wrap_err_with(|| format!("invalid config in {}", path.display()))
    }

    pub fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(base) = var("TUNESCOUT_API_BASE") {
            self.api.base_url = base;
        }
        if let Some(ms) = var("TUNESCOUT_DEBOUNCE_MS").and_then(|v| v.parse().ok()) {
            self.search.debounce_ms = ms;
        }
        if let Some(volume) = var("TUNESCOUT_VOLUME").and_then(|v| v.parse::<u8>().ok()) {
            self.audio.volume = volume.min(100);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_match_catalog_and_debounce() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "https://itunes.apple.com");
        assert_eq!(config.search.debounce(), Duration::from_millis(200));
        assert_eq!(config.audio.volume, 100);
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let config: Config = toml::from_str(
            r#"
            [api]
            country = "au"

            [search]
            debounce_ms = 350
            "#,
        )
        .unwrap();

        assert_eq!(config.api.country.as_deref(), Some("au"));
        assert_eq!(config.api.base_url, ApiConfig::default().base_url);
        assert_eq!(config.search.debounce_ms, 350);
        assert_eq!(config.audio, AudioConfig::default());
    }

    #[test]
    fn env_overrides_file_values() {
        let env: HashMap<&str, &str> = [
            ("TUNESCOUT_API_BASE", "http://localhost:8080"),
            ("TUNESCOUT_DEBOUNCE_MS", "50"),
            ("TUNESCOUT_VOLUME", "250"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_env(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.api.base_url, "http://localhost:8080");
        assert_eq!(config.search.debounce_ms, 50);
        assert_eq!(config.audio.volume, 100);
    }

    #[test]
    fn unparsable_env_values_are_ignored() {
        let mut config = Config::default();
        config.apply_env(|key| (key == "TUNESCOUT_DEBOUNCE_MS").then(|| "soon".to_string()));
        assert_eq!(config.search.debounce_ms, 200);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let path = std::env::temp_dir().join(format!("tunescout-{}.toml", uuid::Uuid::new_v4()));
        fs::write(&path, "[search]\ndebounce_ms = \"fast\"\n").unwrap();

        assert!(Config::from_file(&path).is_err());
        let _ = fs::remove_file(path);
    }
}
