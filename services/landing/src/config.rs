//! Configuration types for the landing service

use std::path::{Path, PathBuf};
use std::time::Duration;

use preloader::PreloaderConfig;
use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub settings: SettingsConfig,
    #[serde(default)]
    pub shell: ShellConfig,
    #[serde(default)]
    pub preloader: PreloaderConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Settings storage configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettingsConfig {
    /// JSON file holding the stored settings rows. Without it the server
    /// has no stored settings and always answers with the defaults.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Page shell configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShellConfig {
    /// Base URL of the server the shell fetches settings from
    #[serde(default = "default_settings_url")]
    pub settings_url: String,
    #[serde(default = "default_headline")]
    pub headline: String,
    #[serde(default = "default_credit")]
    pub credit: String,
    /// Give up on the settings request after this long and use the defaults
    #[serde(default = "default_fetch_timeout", with = "humantime_serde")]
    pub fetch_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            port: default_port(),
        }
    }
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            settings_url: default_settings_url(),
            headline: default_headline(),
            credit: default_credit(),
            fetch_timeout: default_fetch_timeout(),
        }
    }
}

fn default_bind() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_settings_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_headline() -> String {
    "Designed by".to_string()
}

fn default_credit() -> String {
    "Salim Sokurov".to_string()
}

fn default_fetch_timeout() -> Duration {
    Duration::from_secs(10)
}

impl Config {
    pub fn validate(&self) -> crate::Result<()> {
        self.preloader.validate()?;
        if self.shell.settings_url.trim().is_empty() {
            return Err(crate::LandingError::Config(
                "shell.settings_url must not be empty".to_string(),
            ));
        }
        if self.shell.fetch_timeout.is_zero() {
            return Err(crate::LandingError::Config(
                "shell.fetch_timeout must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Load configuration from a JSON file
pub fn load_config(path: &Path) -> crate::Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        crate::LandingError::Config(format!("Failed to read config file {:?}: {}", path, e))
    })?;
    let config: Config = serde_json::from_str(&content)?;
    config.validate()?;
    Ok(config)
}
