//! Landing - splash page shell and site settings service
//!
//! Serves the site settings over HTTP and runs the terminal page shell:
//! a timed preloader followed by the landing content.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod io;
pub mod server;
pub mod settings;
pub mod shell;

pub use config::{load_config, Config};
pub use error::{LandingError, Result};

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::client::SettingsClient;
use crate::io::ReqwestHttpClient;
use crate::shell::{ShellOutcome, TerminalRenderer};

/// Cancel `cancel` on Ctrl-C
fn cancel_on_ctrl_c(cancel: CancellationToken) {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                tracing::info!("Shutdown signal received");
                cancel.cancel();
            }
            Err(e) => tracing::error!("Failed to listen for ctrl-c: {}", e),
        }
    });
}

/// Run the settings server until Ctrl-C
pub async fn serve(config: Config) -> Result<()> {
    let cancel = CancellationToken::new();
    cancel_on_ctrl_c(cancel.clone());

    tracing::info!("Landing server starting");
    server::run_server(&config, cancel).await?;
    tracing::info!("Landing server stopped");
    Ok(())
}

/// Run the page shell on stdout until the landing content is shown or Ctrl-C
pub async fn splash(config: Config) -> Result<ShellOutcome> {
    let cancel = CancellationToken::new();
    cancel_on_ctrl_c(cancel.clone());

    let http: Arc<dyn io::HttpClient> =
        Arc::new(ReqwestHttpClient::with_timeout(config.shell.fetch_timeout)?);
    let client = SettingsClient::new(&config.shell.settings_url, http);
    let mut renderer = TerminalRenderer::new(std::io::stdout());

    shell::run_shell(&config, client, &mut renderer, cancel).await
}
