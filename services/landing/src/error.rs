//! Error types for the landing service

/// Errors that can occur in the landing service
#[derive(Debug, thiserror::Error)]
pub enum LandingError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("Failed to fetch settings: {0}")]
    SettingsFetch(String),

    #[error("Settings storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Preloader configuration error: {0}")]
    Preloader(#[from] preloader::ConfigError),
}

/// Result type alias for landing operations
pub type Result<T> = std::result::Result<T, LandingError>;
