//! BDD test world for the preloader

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use cucumber::World;
use preloader::{PreloaderConfig, PreloaderHandle, ReadySignal};
use tokio::time::Instant;

#[derive(Debug, Default, World)]
pub struct PreloaderWorld {
    pub config: PreloaderConfig,
    pub never_ready: bool,
    pub handle: Option<PreloaderHandle>,
    pub started_at: Option<Instant>,
    pub calls: Arc<AtomicU32>,
    pub completed_at: Arc<Mutex<Option<Instant>>>,
}

impl PreloaderWorld {
    pub fn start(&mut self) {
        let calls = Arc::clone(&self.calls);
        let completed_at = Arc::clone(&self.completed_at);
        let mut builder = preloader::PreloaderBuilder::new(move || {
            calls.fetch_add(1, Ordering::SeqCst);
            *completed_at.lock().unwrap() = Some(Instant::now());
        })
        .config(self.config.clone());
        if self.never_ready {
            builder = builder.ready_signal(ReadySignal::never());
        }

        self.started_at = Some(Instant::now());
        self.handle = Some(builder.spawn().expect("preloader should start"));
    }

    pub fn handle(&self) -> &PreloaderHandle {
        self.handle.as_ref().expect("preloader not started")
    }

    pub fn elapsed(&self) -> Duration {
        self.started_at.expect("preloader not started").elapsed()
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn completed_after(&self) -> Option<Duration> {
        let start = self.started_at?;
        self.completed_at.lock().unwrap().map(|at| at - start)
    }
}
