//! Configuration management for the onthisday CLI
//!
//! Reads `config.json` (camelCase keys) or a TOML file, then applies
//! `IMMICH_SERVER_URL` / `IMMICH_API_KEY` from the environment.

use anyhow::{bail, Context, Result};
use onthisday::{ExclusionConfig, RunSettings};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_DIR: &str = "onthisday";
const CONFIG_FILE: &str = "config.toml";
const LOCAL_CANDIDATES: [&str; 2] = ["config.json", "config.toml"];

const ENV_SERVER_URL: &str = "IMMICH_SERVER_URL";
const ENV_API_KEY: &str = "IMMICH_API_KEY";

/// On-disk format, picked by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ConfigFormat::Json,
            _ => ConfigFormat::Toml,
        }
    }
}

/// CLI Configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    pub server_url: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(flatten)]
    pub exclusions: ExclusionConfig,
    #[serde(default)]
    pub cleanup_daily: bool,
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join(CONFIG_DIR);
        Ok(config_dir)
    }

    /// Pick the config file: explicit path, then `./config.json`,
    /// then `./config.toml`, then the user config directory
    pub fn resolve_path(explicit: Option<&Path>) -> Result<PathBuf> {
        if let Some(path) = explicit {
            return Ok(path.to_path_buf());
        }

        for candidate in LOCAL_CANDIDATES {
            let path = PathBuf::from(candidate);
            if path.exists() {
                return Ok(path);
            }
        }

        Ok(Self::config_dir()?.join(CONFIG_FILE))
    }

    /// Parse config content in the given format
    pub fn parse(content: &str, format: ConfigFormat) -> Result<Self> {
        let config: Self = match format {
            ConfigFormat::Json => {
                serde_json::from_str(content).context("Failed to parse JSON config")?
            }
            ConfigFormat::Toml => toml::from_str(content).context("Failed to parse TOML config")?,
        };
        Ok(config.with_resolved_defaults())
    }

    /// Write defaulted values back so printed config shows what a run uses
    fn with_resolved_defaults(mut self) -> Self {
        let earliest_year = self.exclusions.earliest_year();
        self.exclusions = self.exclusions.with_earliest_year(earliest_year);
        self
    }

    /// Load config from file. A missing file is only an error when the path
    /// was given explicitly.
    pub fn load_from(path: &Path, explicit: bool) -> Result<Self> {
        if !path.exists() {
            if explicit {
                bail!("Config file {:?} does not exist", path);
            }
            return Ok(Self::default().with_resolved_defaults());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;

        Self::parse(&content, ConfigFormat::from_path(path))
            .with_context(|| format!("Invalid config file {:?}", path))
    }

    /// Resolve, load, apply environment overrides and validate
    pub fn load(explicit: Option<&Path>) -> Result<(Self, PathBuf)> {
        let path = Self::resolve_path(explicit)?;
        let mut config = Self::load_from(&path, explicit.is_some())?;
        config.apply_env();
        config.validate()?;
        Ok((config, path))
    }

    pub fn apply_env(&mut self) {
        self.apply_overrides(
            std::env::var(ENV_SERVER_URL).ok(),
            std::env::var(ENV_API_KEY).ok(),
        );
    }

    /// Replace server URL / API key with non-empty override values
    pub fn apply_overrides(&mut self, server_url: Option<String>, api_key: Option<String>) {
        if let Some(url) = server_url.filter(|v| !v.trim().is_empty()) {
            self.server_url = url;
        }
        if let Some(key) = api_key.filter(|v| !v.trim().is_empty()) {
            self.api_key = key;
        }
    }

    pub fn validate(&self) -> Result<()> {
        let url = self.server_url.trim();
        if url.is_empty() {
            bail!("No server URL configured (set serverUrl or {})", ENV_SERVER_URL);
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            bail!("Server URL must start with http:// or https://: {}", url);
        }
        if self.api_key.trim().is_empty() {
            bail!("No API key configured (set apiKey or {})", ENV_API_KEY);
        }
        Ok(())
    }

    /// Copy of the config that is safe to print
    pub fn masked(&self) -> Self {
        let mut masked = self.clone();
        masked.api_key = mask_key(&self.api_key);
        masked
    }

    pub fn run_settings(&self, cleanup: bool, dry_run: bool) -> RunSettings {
        RunSettings::new(self.exclusions.clone())
            .with_cleanup_daily(self.cleanup_daily && cleanup)
            .with_dry_run(dry_run)
    }
}

fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{}", "*".repeat(chars.len() - 4), tail)
}
