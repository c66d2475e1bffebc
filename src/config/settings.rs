use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Environment variable pointing at an explicit config file
pub const CONFIG_ENV: &str = "DELIVERY_DESK_CONFIG";

/// Application-wide settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Data directory; overridden by `--data-dir` and `DELIVERY_DESK_DATA`.
    pub data_dir: Option<PathBuf>,
    /// Pause in typing before a search runs, in milliseconds.
    pub search_debounce_ms: u64,
    /// Rows moved by PageUp/PageDown in the browser.
    pub page_size: usize,
    /// Currency shown when a summary spans mixed or no currencies.
    pub default_currency: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: None,
            search_debounce_ms: 500,
            page_size: 10,
            default_currency: "USD".to_string(),
        }
    }
}

impl Settings {
    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    /// Load settings from `DELIVERY_DESK_CONFIG` or the platform config directory
    pub fn load() -> Result<Self> {
        match config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load settings from `path`; a missing file yields defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let settings: Settings = toml::from_str(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))?;

        tracing::debug!(path = %path.display(), ?settings, "Loaded config");
        Ok(settings)
    }
}

/// Config file location: `DELIVERY_DESK_CONFIG`, else `<config_dir>/delivery-desk/config.toml`
pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = env::var_os(CONFIG_ENV).filter(|p| !p.is_empty()) {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir().map(|dir| dir.join("delivery-desk").join("config.toml"))
}
