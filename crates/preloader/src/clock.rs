//! Clock abstraction for the timer driver
//!
//! The controller reads time and sleeps only through [`Clock`], so tests can
//! swap in a clock whose time they control.

use async_trait::async_trait;
use tokio::time::Instant;

/// Source of time and timed waits
#[async_trait]
pub trait Clock: Send + Sync {
    /// Current instant
    fn now(&self) -> Instant;

    /// Resolve once `deadline` has been reached
    async fn sleep_until(&self, deadline: Instant);
}

/// Clock backed by the tokio timer; honors `tokio::time::pause`
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioClock;

#[async_trait]
impl Clock for TokioClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    async fn sleep_until(&self, deadline: Instant) {
        tokio::time::sleep_until(deadline).await;
    }
}
