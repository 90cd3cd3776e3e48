//! Terminal page shell: splash preloader followed by the landing content
//!
//! The settings fetch doubles as the content-ready input of the preloader.
//! Progress frames are rendered from the published snapshots, and the landing
//! content replaces them once the completion callback fires.

use std::io::Write;

use preloader::{Phase, PreloaderBuilder, PreloaderHandle, ReadySignal, Snapshot, Stage};
use tokio::sync::oneshot;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::client::SettingsClient;
use crate::config::{Config, ShellConfig};
use crate::settings::SiteSettings;

const BAR_WIDTH: usize = 30;

/// Notice shown under the landing content when the site is in maintenance
pub const MAINTENANCE_NOTICE: &str = "The site is currently undergoing maintenance.";

/// Output surface of the page shell
pub trait Renderer: Send {
    /// Render one preloader frame
    fn frame(&mut self, snapshot: &Snapshot) -> crate::Result<()>;

    /// Replace the preloader with the landing content
    fn landing(&mut self, settings: &SiteSettings, shell: &ShellConfig) -> crate::Result<()>;

    /// The splash was interrupted before completion
    fn interrupted(&mut self) -> crate::Result<()> {
        Ok(())
    }
}

/// Renders to a terminal (or any writer), refreshing the progress line in place
pub struct TerminalRenderer<W: Write + Send> {
    out: W,
    last_line: Option<String>,
}

impl<W: Write + Send> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            last_line: None,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Text of one progress frame
pub fn frame_line(snapshot: &Snapshot) -> String {
    let presentation = &snapshot.presentation;
    let filled = (presentation.fill_fraction * BAR_WIDTH as f32).round() as usize;
    let filled = filled.min(BAR_WIDTH);
    let bar = format!("{}{}", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled));

    let percent = if presentation.emphasis_scale > 1.0 {
        format!("*{:>3}%*", snapshot.progress)
    } else {
        format!(" {:>3}% ", snapshot.progress)
    };

    let label = match snapshot.phase() {
        Phase::Base => "loading",
        Phase::Transition => "almost there",
        Phase::Complete => "ready",
        Phase::Exiting => "entering",
    };

    format!("[{}]{} {}", bar, percent, label)
}

impl<W: Write + Send> Renderer for TerminalRenderer<W> {
    fn frame(&mut self, snapshot: &Snapshot) -> crate::Result<()> {
        let line = frame_line(snapshot);
        if self.last_line.as_deref() == Some(line.as_str()) {
            return Ok(());
        }
        // Pad so a shorter label fully overwrites the previous one
        write!(self.out, "\r{:<52}", line)?;
        self.out.flush()?;
        self.last_line = Some(line);
        Ok(())
    }

    fn landing(&mut self, settings: &SiteSettings, shell: &ShellConfig) -> crate::Result<()> {
        if self.last_line.take().is_some() {
            writeln!(self.out)?;
        }
        writeln!(self.out)?;
        writeln!(self.out, "{}", settings.welcome_message)?;
        writeln!(self.out)?;
        writeln!(self.out, "{}", shell.headline)?;
        writeln!(self.out, "{}", shell.credit)?;
        if settings.maintenance_mode {
            writeln!(self.out)?;
            writeln!(self.out, "{}", MAINTENANCE_NOTICE)?;
        }
        self.out.flush()?;
        Ok(())
    }

    fn interrupted(&mut self) -> crate::Result<()> {
        if self.last_line.take().is_some() {
            writeln!(self.out)?;
        }
        self.out.flush()?;
        Ok(())
    }
}

/// How a shell run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellOutcome {
    /// The preloader completed and the landing content was rendered
    Landed(SiteSettings),
    /// Cancelled during the splash; no landing content was rendered
    Interrupted,
}

/// Run the splash and then render the landing content.
///
/// Returns [`ShellOutcome::Interrupted`] if `cancel` fires before the
/// preloader completes.
pub async fn run_shell<R: Renderer>(
    config: &Config,
    client: SettingsClient,
    renderer: &mut R,
    cancel: CancellationToken,
) -> crate::Result<ShellOutcome> {
    let (settings_tx, settings_rx) = oneshot::channel();
    let (ready, ready_signal) = ReadySignal::channel();

    let (done_tx, done_rx) = oneshot::channel();
    let handle = PreloaderBuilder::new(move || {
        let _ = done_tx.send(());
    })
    .config(config.preloader.clone())
    .ready_signal(ready_signal)
    .spawn()?;

    debug!("Fetching settings from {}", client.url());
    let fetch = tokio::spawn(async move {
        let settings = client.fetch_or_default().await;
        let _ = settings_tx.send(settings);
        ready.notify();
    });

    let completed = render_splash(&handle, done_rx, renderer, &cancel).await;
    if !matches!(completed, Ok(true)) {
        handle.teardown();
        fetch.abort();
    }
    if !completed? {
        renderer.interrupted()?;
        info!("Splash interrupted");
        return Ok(ShellOutcome::Interrupted);
    }

    let settings = settings_rx.await.map_err(|_| {
        crate::LandingError::SettingsFetch("settings task ended without a result".to_string())
    })?;
    renderer.landing(&settings, &config.shell)?;
    info!("Landing content rendered");
    Ok(ShellOutcome::Landed(settings))
}

/// Render frames until the preloader completes (true) or the splash is
/// cancelled or torn down (false)
async fn render_splash<R: Renderer>(
    handle: &PreloaderHandle,
    mut done_rx: oneshot::Receiver<()>,
    renderer: &mut R,
    cancel: &CancellationToken,
) -> crate::Result<bool> {
    let mut snapshots = handle.subscribe();
    let first = *snapshots.borrow_and_update();
    renderer.frame(&first)?;

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => return Ok(false),
            changed = snapshots.changed() => {
                if changed.is_err() {
                    return Ok(false);
                }
                let snapshot = *snapshots.borrow_and_update();
                renderer.frame(&snapshot)?;
            }
            done = &mut done_rx => {
                if done.is_err() {
                    // Callback dropped without firing
                    return Ok(false);
                }
                break;
            }
        }
    }

    // Done is published once the completion callback has returned
    let last = match snapshots.wait_for(Snapshot::is_finished).await {
        Ok(snapshot) => *snapshot,
        Err(_) => return Ok(false),
    };
    renderer.frame(&last)?;
    Ok(last.stage == Stage::Done)
}
