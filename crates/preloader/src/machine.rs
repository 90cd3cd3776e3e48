//! The preloader state machine
//!
//! [`Preloader`] knows nothing about timers. Callers feed it elapsed time
//! (since the preloader started) and the readiness signal, and it reports
//! what happened. The async driver in [`crate::controller`] owns the
//! timers; tests can drive the machine directly with made-up times.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::PreloaderConfig;
use crate::phase::{self, Phase, Presentation};

/// Lifecycle stage of one preloader instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "stage")]
pub enum Stage {
    /// Progress below 100; the tick loop is running
    Loading,
    /// Progress at 100 but content not ready; the tick loop keeps running
    AwaitingReady,
    /// Completion gate passed; waiting for the settle delay to end
    Settling {
        #[serde(with = "humantime_serde")]
        until: Duration,
    },
    /// Exit transition running; the completion callback fires at `until`
    Exiting {
        #[serde(with = "humantime_serde")]
        until: Duration,
    },
    /// Completion reported
    Done,
    /// Torn down by the caller before completion
    TornDown,
}

/// Something the machine did in response to an input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Progress moved to a new value
    Progressed(u8),
    /// Ready signal accepted
    Ready,
    /// Progress is 100 and content is ready; tick loop should stop
    GatePassed,
    /// Exit transition started (`exiting` is now true)
    ExitStarted,
    /// Completion callback is due; emitted once
    Completed,
}

/// Progress/ready/exiting state for one preloader instance
#[derive(Debug, Clone)]
pub struct Preloader {
    config: PreloaderConfig,
    progress: u8,
    ready: bool,
    stage: Stage,
}

impl Preloader {
    pub fn new(config: PreloaderConfig) -> Self {
        Self {
            config,
            progress: 0,
            ready: false,
            stage: Stage::Loading,
        }
    }

    pub fn config(&self) -> &PreloaderConfig {
        &self.config
    }

    pub fn progress(&self) -> u8 {
        self.progress
    }

    pub fn ready(&self) -> bool {
        self.ready
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// True once the exit transition has started; stays true through `Done`
    pub fn exiting(&self) -> bool {
        matches!(self.stage, Stage::Exiting { .. } | Stage::Done)
    }

    pub fn phase(&self) -> Phase {
        phase::phase(self.progress, self.exiting(), &self.config.thresholds)
    }

    pub fn presentation(&self) -> Presentation {
        Presentation::derive(self.progress, self.exiting(), &self.config.thresholds)
    }

    /// Whether the periodic tick loop should still be running
    pub fn wants_ticks(&self) -> bool {
        matches!(self.stage, Stage::Loading | Stage::AwaitingReady)
    }

    /// Elapsed time of the next one-shot deadline, if one is pending
    pub fn next_deadline(&self) -> Option<Duration> {
        match self.stage {
            Stage::Settling { until } | Stage::Exiting { until } => Some(until),
            _ => None,
        }
    }

    /// Done or torn down; no input changes anything anymore
    pub fn is_finished(&self) -> bool {
        matches!(self.stage, Stage::Done | Stage::TornDown)
    }

    /// Accept the readiness signal. Only the first call has an effect.
    pub fn mark_ready(&mut self) -> Option<Event> {
        if self.ready || self.is_finished() {
            return None;
        }
        self.ready = true;
        debug!("Preloader content ready at progress {}", self.progress);
        Some(Event::Ready)
    }

    /// Advance the machine to `elapsed` time since start.
    ///
    /// In the ticking stages this recomputes progress and checks the
    /// completion gate; in the delayed stages it fires the pending deadline
    /// once `elapsed` reaches it.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<Event> {
        let mut events = Vec::new();
        match self.stage {
            Stage::Loading | Stage::AwaitingReady => {
                let computed = phase::progress_at(elapsed, self.config.min_duration);
                if computed > self.progress {
                    self.progress = computed;
                    events.push(Event::Progressed(computed));
                }

                if self.progress >= 100 {
                    if elapsed >= self.config.min_duration && self.ready {
                        let until = elapsed + self.config.settle_delay;
                        debug!("Preloader gate passed at {:?}, settling until {:?}", elapsed, until);
                        self.stage = Stage::Settling { until };
                        events.push(Event::GatePassed);
                    } else if self.stage == Stage::Loading {
                        debug!("Preloader at 100% waiting for content");
                        self.stage = Stage::AwaitingReady;
                    }
                }
            }
            Stage::Settling { until } if elapsed >= until => {
                let until = elapsed + self.config.exit_delay;
                debug!("Preloader exit started at {:?}, completing at {:?}", elapsed, until);
                self.stage = Stage::Exiting { until };
                events.push(Event::ExitStarted);
            }
            Stage::Exiting { until } if elapsed >= until => {
                debug!("Preloader completed at {:?}", elapsed);
                self.stage = Stage::Done;
                events.push(Event::Completed);
            }
            _ => {}
        }
        events
    }

    /// Stop the machine before completion. Returns false if it already finished.
    pub fn teardown(&mut self) -> bool {
        if self.is_finished() {
            return false;
        }
        debug!("Preloader torn down in stage {:?}", self.stage);
        self.stage = Stage::TornDown;
        true
    }
}
