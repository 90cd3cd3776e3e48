//! HTTP server exposing the settings endpoint

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use tokio_util::sync::CancellationToken;

use crate::api::{HEALTH_PATH, SETTINGS_PATH};
use crate::config::Config;
use crate::settings::{JsonFileStore, MemoryStore, SettingsStore, SiteSettings};

/// Server application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn SettingsStore>,
}

/// Build the axum router
pub fn build_router(store: Arc<dyn SettingsStore>) -> Router {
    Router::new()
        .route(SETTINGS_PATH, get(settings_handler))
        .route(HEALTH_PATH, get(health_handler))
        .with_state(AppState { store })
}

async fn settings_handler(State(app): State<AppState>) -> Response {
    match app.store.get_settings().await {
        Ok(Some(settings)) => Json(settings).into_response(),
        Ok(None) => {
            tracing::debug!("No stored settings, answering with defaults");
            Json(SiteSettings::default()).into_response()
        }
        Err(e) => {
            tracing::error!("Failed to load settings: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

async fn health_handler() -> impl IntoResponse {
    "OK"
}

/// Pick the settings store named by the configuration
pub fn store_from_config(config: &Config) -> Arc<dyn SettingsStore> {
    match &config.settings.path {
        Some(path) => {
            tracing::info!("Reading settings from {:?}", path);
            Arc::new(JsonFileStore::new(path))
        }
        None => {
            tracing::info!("No settings file configured, serving defaults");
            Arc::new(MemoryStore::default())
        }
    }
}

/// Serve until `cancel` fires
pub async fn run_server(config: &Config, cancel: CancellationToken) -> crate::Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.server.bind, config.server.port)
        .parse()
        .map_err(|e| {
            crate::LandingError::Config(format!(
                "Invalid bind address {}:{}: {}",
                config.server.bind, config.server.port, e
            ))
        })?;

    let router = build_router(store_from_config(config));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Landing server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router)
        .with_graceful_shutdown(async move {
            cancel.cancelled().await;
        })
        .await?;

    tracing::debug!("Landing server stopped");
    Ok(())
}
