//! Landing CLI
//!
//! Command-line interface for the settings server and the terminal page shell.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use landing::{load_config, Config};
use tracing::Level;

#[derive(Parser)]
#[command(name = "landing")]
#[command(about = "Splash page shell and site settings service")]
#[command(version)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level
    #[arg(short, long, default_value = "info", global = true)]
    log_level: Level,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the settings endpoint
    Serve {
        /// Server port (overrides config file)
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Run the splash preloader, then show the landing content
    Splash {
        /// Base URL of the settings server (overrides config file)
        #[arg(long)]
        settings_url: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(
        "Parsed command line arguments: config={:?}, log_level={:?}",
        args.config,
        args.log_level
    );

    let mut config = if let Some(config_path) = &args.config {
        tracing::debug!("Loading configuration from {:?}", config_path);
        load_config(config_path)?
    } else {
        tracing::debug!("Using default configuration");
        Config::default()
    };

    match args.command {
        Command::Serve { port } => {
            if let Some(port) = port {
                config.server.port = port;
            }
            landing::serve(config).await?;
        }
        Command::Splash { settings_url } => {
            if let Some(settings_url) = settings_url {
                config.shell.settings_url = settings_url;
            }
            config.validate()?;
            let outcome = landing::splash(config).await?;
            tracing::debug!("Splash finished: {:?}", outcome);
        }
    }

    Ok(())
}
