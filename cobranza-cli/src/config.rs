use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CobranzaConfig {
    /// Number of upcoming dates shown when `--count` is not given
    #[serde(default = "default_count")]
    pub default_count: usize,
    /// chrono format string used for plain-text output, e.g. "%d/%m/%Y"
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

fn default_count() -> usize {
    5
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

impl Default for CobranzaConfig {
    fn default() -> Self {
        Self {
            default_count: default_count(),
            date_format: default_date_format(),
        }
    }
}

impl CobranzaConfig {
    pub fn config_path() -> Result<PathBuf> {
        Ok(dirs::config_dir()
            .context("Cannot determine config directory")?
            .join("cobranza")
            .join("config.toml"))
    }

    /// Load config from the default location. Returns default config if the file doesn't exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config at {}", path.display()))?;
        let config: Self = toml::from_str(&raw)
            .with_context(|| format!("Failed to parse config at {}", path.display()))?;
        Ok(config)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw = toml::to_string_pretty(self)?;
        std::fs::write(path, raw)?;
        Ok(())
    }

    /// Write a default config file if none exists yet. Returns the path either way.
    pub fn ensure_default_at(path: &Path) -> Result<PathBuf> {
        if !path.exists() {
            Self::default().save_to(path)?;
            tracing::info!(path = %path.display(), "created default config");
        }
        Ok(path.to_path_buf())
    }
}
