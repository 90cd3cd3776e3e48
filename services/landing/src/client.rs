//! Client for the settings endpoint

use std::sync::Arc;

use crate::api::SETTINGS_PATH;
use crate::io::HttpClient;
use crate::settings::SiteSettings;

/// Fetches site settings once at page load
pub struct SettingsClient {
    url: String,
    http: Arc<dyn HttpClient>,
}

impl SettingsClient {
    pub fn new(base_url: &str, http: Arc<dyn HttpClient>) -> Self {
        Self {
            url: format!("{}{}", base_url.trim_end_matches('/'), SETTINGS_PATH),
            http,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch and parse the settings. A non-2xx answer is a fetch failure.
    pub async fn fetch(&self) -> crate::Result<SiteSettings> {
        let response = self.http.get(&self.url).await?;
        if !response.is_success() {
            return Err(crate::LandingError::SettingsFetch(format!(
                "GET {} returned status {}",
                self.url, response.status
            )));
        }
        let settings: SiteSettings = serde_json::from_str(&response.body)?;
        tracing::debug!("Fetched settings: {:?}", settings);
        Ok(settings)
    }

    /// Fetch the settings, falling back to the static defaults on any failure
    pub async fn fetch_or_default(&self) -> SiteSettings {
        match self.fetch().await {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!("{}; using default settings", e);
                SiteSettings::default()
            }
        }
    }
}
