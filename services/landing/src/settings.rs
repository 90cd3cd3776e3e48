//! Site settings and the storage they are read from

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};

/// Site-wide settings served at `/api/settings`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteSettings {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_false")]
    pub maintenance_mode: bool,
    #[serde(
        default = "default_welcome_message",
        deserialize_with = "null_as_default_welcome"
    )]
    pub welcome_message: String,
}

fn default_welcome_message() -> String {
    "Welcome".to_string()
}

// Both columns are nullable in storage; null reads as the column default.
fn null_as_false<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

fn null_as_default_welcome<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(default_welcome_message))
}

/// The settings answered when nothing is stored
impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            id: 0,
            maintenance_mode: false,
            welcome_message: default_welcome_message(),
        }
    }
}

/// Read access to stored settings
#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait SettingsStore: Send + Sync {
    /// The stored settings row, or `None` when nothing is stored
    async fn get_settings(&self) -> crate::Result<Option<SiteSettings>>;
}

/// Settings held in memory
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    settings: Option<SiteSettings>,
}

impl MemoryStore {
    pub fn new(settings: Option<SiteSettings>) -> Self {
        Self { settings }
    }
}

#[async_trait]
impl SettingsStore for MemoryStore {
    async fn get_settings(&self) -> crate::Result<Option<SiteSettings>> {
        Ok(self.settings.clone())
    }
}

/// Settings rows stored as a JSON array in a file; the first row wins.
///
/// A missing file or an empty array means nothing is stored.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl SettingsStore for JsonFileStore {
    async fn get_settings(&self) -> crate::Result<Option<SiteSettings>> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("Settings file {:?} not found", self.path);
                return Ok(None);
            }
            Err(e) => {
                return Err(crate::LandingError::Storage(format!(
                    "Failed to read {:?}: {}",
                    self.path, e
                )))
            }
        };

        let rows: Vec<SiteSettings> = serde_json::from_str(&content).map_err(|e| {
            crate::LandingError::Storage(format!("Invalid settings file {:?}: {}", self.path, e))
        })?;
        Ok(rows.into_iter().next())
    }
}
