use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

/// Connection settings for the MGM web service.
///
/// The service only answers requests that look like they come from the
/// public mgm.gov.tr site, so the referring headers are part of the config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL every relative API path is appended to.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_referer")]
    pub referer: String,

    #[serde(default = "default_origin")]
    pub origin: String,

    /// Explicit `Host` header; empty lets the HTTP client derive it.
    #[serde(default = "default_host")]
    pub host: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://servis.mgm.gov.tr/web/".to_string()
}

fn default_referer() -> String {
    "https://www.mgm.gov.tr/".to_string()
}

fn default_origin() -> String {
    "https://www.mgm.gov.tr".to_string()
}

fn default_host() -> String {
    "servis.mgm.gov.tr".to_string()
}

const fn default_timeout() -> u64 {
    30
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            referer: default_referer(),
            origin: default_origin(),
            host: default_host(),
            timeout_secs: default_timeout(),
        }
    }
}

impl ClientConfig {
    /// Config pointing at another server (a mirror or a local mock).
    ///
    /// The `Host` override is dropped so it matches the new base URL.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            host: String::new(),
            ..Self::default()
        }
    }
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// [client]
/// base_url = "https://servis.mgm.gov.tr/web/"
/// timeout_secs = 30
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub client: ClientConfig,
}

impl Config {
    /// Load config from disk, or return the defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        fs::write(&path, self.to_toml()?)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("Invalid configuration TOML")
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "mgm-weather", "mgm-weather")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
