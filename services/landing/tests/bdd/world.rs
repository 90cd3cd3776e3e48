//! BDD test world for the landing service

use std::sync::Arc;

use cucumber::World;
use landing::io::HttpResponse;
use landing::settings::{JsonFileStore, MemoryStore, SettingsStore};
use landing::shell::ShellOutcome;
use landing::Config;
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Default, World)]
pub struct LandingWorld {
    pub config: Config,
    pub settings_dir: Option<TempDir>,
    pub base_url: Option<String>,
    pub server_cancel: Option<CancellationToken>,
    pub response: Option<HttpResponse>,
    pub outcome: Option<ShellOutcome>,
    pub output: String,
}

impl LandingWorld {
    pub fn store(&self) -> Arc<dyn SettingsStore> {
        match &self.settings_dir {
            Some(dir) => Arc::new(JsonFileStore::new(dir.path().join("settings.json"))),
            None => Arc::new(MemoryStore::default()),
        }
    }

    /// Serve the world's store on an ephemeral port
    pub async fn start_server(&mut self) {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind");
        let addr = listener.local_addr().expect("no local address");
        let router = landing::server::build_router(self.store());
        let cancel = CancellationToken::new();
        let shutdown = cancel.clone();
        tokio::spawn(async move {
            axum::serve(listener, router)
                .with_graceful_shutdown(async move { shutdown.cancelled().await })
                .await
                .ok();
        });
        self.base_url = Some(format!("http://{}", addr));
        self.server_cancel = Some(cancel);
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().expect("server not started")
    }
}

impl Drop for LandingWorld {
    fn drop(&mut self) {
        if let Some(cancel) = &self.server_cancel {
            cancel.cancel();
        }
    }
}
