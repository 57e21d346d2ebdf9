use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

pub const DEFAULT_OPENWEATHER_URL: &str = "https://api.openweathermap.org";
pub const DEFAULT_ARCHIVE_URL: &str = "https://archive-api.open-meteo.com";

/// Endpoint and transport settings.
///
/// Example TOML:
/// ```toml
/// openweather_url = "https://api.openweathermap.org"
/// archive_url = "https://archive-api.open-meteo.com"
/// timeout_secs = 20
/// ```
///
/// The credential is deliberately not part of this file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    #[serde(default = "default_openweather_url")]
    pub openweather_url: String,

    #[serde(default = "default_archive_url")]
    pub archive_url: String,

    /// Request timeout. Absent means whatever the HTTP stack does, i.e. no timeout.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_openweather_url() -> String {
    DEFAULT_OPENWEATHER_URL.to_string()
}

fn default_archive_url() -> String {
    DEFAULT_ARCHIVE_URL.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            openweather_url: default_openweather_url(),
            archive_url: default_archive_url(),
            timeout_secs: None,
        }
    }
}

impl Config {
    /// Load config from the platform config dir, or defaults if there is no file.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    /// Load config from an explicit file; the file must exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        tracing::debug!(path = %path.display(), "loaded config");
        Ok(cfg)
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weatherscope", "weather-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Shared HTTP client honoring `timeout_secs`.
    pub fn http_client(&self) -> Result<Client> {
        let mut builder = Client::builder();
        if let Some(secs) = self.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        builder.build().context("Failed to build HTTP client")
    }
}
