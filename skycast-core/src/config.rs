use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{env, fs, path::PathBuf};

use crate::model::Units;

/// Environment variable that overrides the stored API key.
pub const API_KEY_ENV: &str = "SKYCAST_API_KEY";

/// City fetched on startup when none is configured.
pub const DEFAULT_CITY: &str = "Bogota";

/// Days requested from the forecast endpoint when none are configured.
pub const DEFAULT_FORECAST_DAYS: u8 = 5;

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// WeatherAPI.com key. `SKYCAST_API_KEY` takes precedence when set.
    pub api_key: Option<String>,

    /// City shown on startup instead of the built-in default.
    pub default_city: Option<String>,

    pub units: Units,
    pub forecast_days: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            default_city: None,
            units: Units::default(),
            forecast_days: DEFAULT_FORECAST_DAYS,
        }
    }
}

impl Config {
    /// API key to use, preferring the environment over the config file.
    pub fn resolve_api_key(&self) -> Result<String> {
        if let Ok(key) = env::var(API_KEY_ENV)
            && !key.is_empty()
        {
            return Ok(key);
        }

        self.api_key.clone().filter(|key| !key.is_empty()).ok_or_else(|| {
            anyhow!(
                "No API key configured.\n\
                 Hint: set {API_KEY_ENV} or run `skycast configure` and paste your \
                 WeatherAPI.com key."
            )
        })
    }

    /// City the interactive view opens with.
    pub fn start_city(&self) -> String {
        self.default_city.clone().unwrap_or_else(|| DEFAULT_CITY.to_string())
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "skycast", "skycast")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
