use crate::error::ConfigError;
use crate::modules::dropdown::DEFAULT_DEBOUNCE;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

const LOCAL_CONFIG: &str = "gabay.toml";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub assets: AssetConfig,
    pub window: WindowConfig,
    pub filter: FilterConfig,
    pub data: DataConfig,
}

/// Where fonts and images are resolved from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    pub root: PathBuf,
    pub show_backdrop: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub initial_width: f32,
    pub initial_height: f32,
    pub min_width: f32,
    pub min_height: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Quiet period before a selection change reaches the owner.
    pub debounce_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub candidates: PathBuf,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self { root: PathBuf::from("."), show_backdrop: true }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            initial_width: 1440.0,
            initial_height: 900.0,
            min_width: 1280.0,
            min_height: 800.0,
        }
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self { debounce_ms: DEFAULT_DEBOUNCE.as_millis() as u64 }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self { candidates: PathBuf::from("resources/data/candidates.json") }
    }
}

impl FilterConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl AppConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        toml::from_str(&content)
            .map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })
    }

    /// `gabay.toml` in the working directory wins over the per-user file.
    pub fn load_or_default() -> Self {
        let candidates = [Some(PathBuf::from(LOCAL_CONFIG)), Self::user_config_path()];
        for path in candidates.into_iter().flatten() {
            if !path.exists() {
                continue;
            }
            match Self::load_from_file(&path) {
                Ok(config) => {
                    log::info!("Loaded configuration from {}", path.display());
                    return config;
                }
                Err(e) => log::warn!("{e}; using defaults"),
            }
        }
        Self::default()
    }

    pub fn merge_with_env(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(root) = lookup("GABAY_ASSET_ROOT") {
            self.assets.root = PathBuf::from(root);
        }
        if let Some(path) = lookup("GABAY_CANDIDATES") {
            self.data.candidates = PathBuf::from(path);
        }
        if let Some(val) = lookup("GABAY_DEBOUNCE_MS") {
            match val.parse::<u64>() {
                Ok(ms) => self.filter.debounce_ms = ms,
                Err(_) => log::warn!("Ignoring GABAY_DEBOUNCE_MS={val}: not a number"),
            }
        }
    }

    pub fn load() -> Self {
        let mut config = Self::load_or_default();
        config.merge_with_env();
        config
    }

    /// Candidate data path, resolved against the asset root when relative.
    pub fn candidates_path(&self) -> PathBuf {
        if self.data.candidates.is_absolute() {
            self.data.candidates.clone()
        } else {
            self.assets.root.join(&self.data.candidates)
        }
    }

    fn user_config_path() -> Option<PathBuf> {
        let mut path = dirs::config_dir()?;
        path.push("gabay_admin");
        path.push("config.toml");
        Some(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_match_the_shipped_window() {
        let config = AppConfig::default();
        assert_eq!(config.filter.debounce(), Duration::from_millis(50));
        assert_eq!(config.window.min_width, 1280.0);
        assert_eq!(config.window.initial_height, 900.0);
        assert!(config.assets.show_backdrop);
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gabay.toml");
        std::fs::write(&path, "[filter]\ndebounce_ms = 120\n").unwrap();

        let config = AppConfig::load_from_file(&path).unwrap();
        assert_eq!(config.filter.debounce_ms, 120);
        assert_eq!(config.window.initial_width, 1440.0);
        assert_eq!(config.assets.root, PathBuf::from("."));
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gabay.toml");
        std::fs::write(&path, "[filter\n").unwrap();
        assert!(matches!(AppConfig::load_from_file(&path), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn env_overrides_win() {
        let vars: HashMap<&str, &str> = [
            ("GABAY_ASSET_ROOT", "/opt/gabay"),
            ("GABAY_DEBOUNCE_MS", "75"),
        ]
        .into_iter()
        .collect();
        let mut config = AppConfig::default();
        config.apply_overrides(|k| vars.get(k).map(|v| v.to_string()));

        assert_eq!(config.assets.root, PathBuf::from("/opt/gabay"));
        assert_eq!(config.filter.debounce_ms, 75);
        assert_eq!(
            config.candidates_path(),
            PathBuf::from("/opt/gabay/resources/data/candidates.json")
        );
    }

    #[test]
    fn bad_debounce_override_is_ignored() {
        let mut config = AppConfig::default();
        config.apply_overrides(|k| (k == "GABAY_DEBOUNCE_MS").then(|| "soon".to_string()));
        assert_eq!(config.filter.debounce_ms, 50);
    }
}
