//! Async timer driver for the preloader state machine
//!
//! One spawned task owns the periodic tick, the chained settle/exit delays
//! and the readiness wait. Every state mutation happens under one mutex, and
//! teardown takes the same mutex, so nothing scheduled before teardown can
//! change state or fire the callback after it. The `Done` snapshot is
//! published only once the completion callback has returned.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::clock::{Clock, TokioClock};
use crate::config::{ConfigError, PreloaderConfig};
use crate::machine::{Event, Preloader, Stage};
use crate::phase::{Phase, Presentation};
use crate::ready::ReadySignal;

/// Completion callback handed to the controller
pub type CompletionCallback = Box<dyn FnOnce() + Send + 'static>;

/// Point-in-time view of the preloader for rendering
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub progress: u8,
    pub ready: bool,
    pub exiting: bool,
    pub stage: Stage,
    #[serde(with = "humantime_serde")]
    pub elapsed: Duration,
    pub presentation: Presentation,
}

impl Snapshot {
    fn of(machine: &Preloader, elapsed: Duration) -> Self {
        Self {
            progress: machine.progress(),
            ready: machine.ready(),
            exiting: machine.exiting(),
            stage: machine.stage(),
            elapsed,
            presentation: machine.presentation(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.presentation.phase
    }

    /// Completed or torn down
    pub fn is_finished(&self) -> bool {
        matches!(self.stage, Stage::Done | Stage::TornDown)
    }
}

struct Shared {
    machine: Preloader,
    on_complete: Option<CompletionCallback>,
    snapshots: watch::Sender<Snapshot>,
}

impl Shared {
    fn publish(&self, elapsed: Duration) {
        self.snapshots
            .send_replace(Snapshot::of(&self.machine, elapsed));
    }
}

fn lock(shared: &Mutex<Shared>) -> MutexGuard<'_, Shared> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Builds and starts a preloader
pub struct PreloaderBuilder {
    config: PreloaderConfig,
    ready: Option<ReadySignal>,
    clock: Arc<dyn Clock>,
    on_complete: CompletionCallback,
}

impl PreloaderBuilder {
    /// Start from the completion callback; everything else has defaults.
    ///
    /// Without [`Self::ready_signal`] content becomes ready
    /// `config.ready_delay` after the clock reading taken in [`Self::spawn`].
    pub fn new<F>(on_complete: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Self {
            config: PreloaderConfig::default(),
            ready: None,
            clock: Arc::new(TokioClock),
            on_complete: Box::new(on_complete),
        }
    }

    pub fn config(mut self, config: PreloaderConfig) -> Self {
        self.config = config;
        self
    }

    pub fn ready_signal(mut self, ready: ReadySignal) -> Self {
        self.ready = Some(ready);
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Validate the configuration and spawn the driver task on the current runtime
    pub fn spawn(self) -> Result<PreloaderHandle, ConfigError> {
        self.config.validate()?;

        let start = self.clock.now();
        let ready = match self.ready {
            Some(ready) => ready,
            None => ReadySignal::at(Arc::clone(&self.clock), start + self.config.ready_delay),
        };
        let machine = Preloader::new(self.config);
        let (tx, rx) = watch::channel(Snapshot::of(&machine, Duration::ZERO));

        let shared = Arc::new(Mutex::new(Shared {
            machine,
            on_complete: Some(self.on_complete),
            snapshots: tx,
        }));
        let cancel = CancellationToken::new();

        debug!("Starting preloader");
        let task = tokio::spawn(drive(
            Arc::clone(&shared),
            self.clock,
            start,
            ready,
            cancel.clone(),
        ));

        Ok(PreloaderHandle {
            shared,
            snapshots: rx,
            cancel,
            task,
        })
    }
}

/// Caller's handle on a running preloader. Dropping it tears the preloader down.
pub struct PreloaderHandle {
    shared: Arc<Mutex<Shared>>,
    snapshots: watch::Receiver<Snapshot>,
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl PreloaderHandle {
    /// Latest published state
    pub fn snapshot(&self) -> Snapshot {
        *self.snapshots.borrow()
    }

    pub fn progress(&self) -> u8 {
        self.snapshot().progress
    }

    pub fn is_exiting(&self) -> bool {
        self.snapshot().exiting
    }

    /// Receiver that sees every published snapshot, for render loops
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.snapshots.clone()
    }

    /// Wait until the preloader finishes. Returns true if it completed,
    /// false if it was torn down.
    pub async fn completed(&self) -> bool {
        let mut rx = self.snapshots.clone();
        let done = match rx.wait_for(Snapshot::is_finished).await {
            Ok(snapshot) => snapshot.stage == Stage::Done,
            Err(_) => false,
        };
        done
    }

    /// Stop the preloader. No callback fires and no state changes after this
    /// returns. Returns false if the preloader had already finished.
    pub fn teardown(&self) -> bool {
        self.cancel.cancel();
        let torn_down = {
            let mut shared = lock(&self.shared);
            let torn_down = shared.machine.teardown();
            if torn_down {
                shared.on_complete = None;
                let elapsed = shared.snapshots.borrow().elapsed;
                shared.publish(elapsed);
            }
            torn_down
        };
        self.task.abort();
        if torn_down {
            info!("Preloader torn down before completion");
        }
        torn_down
    }
}

impl fmt::Debug for PreloaderHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PreloaderHandle")
            .field("snapshot", &self.snapshot())
            .finish_non_exhaustive()
    }
}

impl Drop for PreloaderHandle {
    fn drop(&mut self) {
        self.teardown();
    }
}

async fn drive(
    shared: Arc<Mutex<Shared>>,
    clock: Arc<dyn Clock>,
    start: Instant,
    ready: ReadySignal,
    cancel: CancellationToken,
) {
    let tick = lock(&shared).machine.config().tick_interval;
    let mut next_tick = start + tick;

    let ready = ready.wait();
    tokio::pin!(ready);
    let mut ready_pending = true;

    loop {
        let (wake_at, ticking) = {
            let shared = lock(&shared);
            if shared.machine.is_finished() {
                break;
            }
            match shared.machine.next_deadline() {
                Some(deadline) if !shared.machine.wants_ticks() => (start + deadline, false),
                _ => (next_tick, true),
            }
        };

        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!("Preloader driver cancelled");
                break;
            }
            _ = &mut ready, if ready_pending => {
                ready_pending = false;
                let elapsed = clock.now().saturating_duration_since(start);
                let mut guard = lock(&shared);
                if cancel.is_cancelled() {
                    break;
                }
                if guard.machine.mark_ready().is_some() {
                    guard.publish(elapsed);
                }
                continue;
            }
            _ = clock.sleep_until(wake_at) => {}
        }

        let now = clock.now();
        let elapsed = now.saturating_duration_since(start);

        let completed = {
            let mut shared = lock(&shared);
            if cancel.is_cancelled() || shared.machine.is_finished() {
                break;
            }
            let events = shared.machine.advance(elapsed);
            for event in &events {
                match event {
                    Event::GatePassed => debug!("Preloader settling at {:?}", elapsed),
                    Event::ExitStarted => debug!("Preloader exit transition at {:?}", elapsed),
                    _ => {}
                }
            }
            if events.contains(&Event::Completed) {
                // The Done snapshot goes out only after the callback returns
                Some(shared.on_complete.take())
            } else {
                shared.publish(elapsed);
                None
            }
        };

        if let Some(callback) = completed {
            info!("Preloader complete after {:?}", elapsed);
            if let Some(on_complete) = callback {
                on_complete();
            }
            lock(&shared).publish(elapsed);
            break;
        }

        if ticking {
            while next_tick <= now {
                next_tick += tick;
            }
        }
    }
}
