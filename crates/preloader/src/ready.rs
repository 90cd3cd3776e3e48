//! Content readiness input
//!
//! The controller does not decide when content is ready; it is handed a
//! [`ReadySignal`] and waits on it. A signal that never resolves keeps the
//! preloader parked at 100%.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::oneshot;
use tokio::time::Instant;

use crate::clock::Clock;

type ReadyFuture = Pin<Box<dyn Future<Output = ()> + Send>>;

/// A one-shot "content is ready" input consumed by the controller
pub struct ReadySignal {
    future: ReadyFuture,
}

impl fmt::Debug for ReadySignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReadySignal").finish_non_exhaustive()
    }
}

/// Sending half of [`ReadySignal::channel`]
#[derive(Debug)]
pub struct ReadyHandle {
    tx: oneshot::Sender<()>,
}

impl ReadyHandle {
    /// Fire the signal. Dropping the handle without calling this means the
    /// content never becomes ready.
    pub fn notify(self) {
        let _ = self.tx.send(());
    }
}

impl ReadySignal {
    /// Resolve when `future` completes
    pub fn from_future<F>(future: F) -> Self
    where
        F: Future<Output = ()> + Send + 'static,
    {
        Self {
            future: Box::pin(future),
        }
    }

    /// Resolve `delay` after this call, standing in for "page resources
    /// loaded". The delay runs from construction, not from the first poll.
    pub fn after(delay: Duration) -> Self {
        let deadline = Instant::now() + delay;
        Self::from_future(async move { tokio::time::sleep_until(deadline).await })
    }

    /// Resolve once `clock` reaches `deadline`
    pub fn at(clock: Arc<dyn Clock>, deadline: Instant) -> Self {
        Self::from_future(async move { clock.sleep_until(deadline).await })
    }

    /// Already resolved
    pub fn immediate() -> Self {
        Self::from_future(std::future::ready(()))
    }

    /// Never resolves
    pub fn never() -> Self {
        Self::from_future(std::future::pending())
    }

    /// A signal fired through the returned handle
    pub fn channel() -> (ReadyHandle, Self) {
        let (tx, rx) = oneshot::channel();
        let signal = Self::from_future(async move {
            if rx.await.is_err() {
                tracing::debug!("Ready handle dropped without notifying");
                std::future::pending::<()>().await;
            }
        });
        (ReadyHandle { tx }, signal)
    }

    /// Wait for the signal
    pub async fn wait(self) {
        self.future.await;
    }
}
