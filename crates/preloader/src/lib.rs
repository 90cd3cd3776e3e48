//! Preloader - timed splash-screen state machine
//!
//! Drives a progress value from 0 to 100 over a minimum duration, holds at
//! 100 until content is ready, then runs a settle pause and an exit
//! transition before reporting completion exactly once.
//!
//! ```no_run
//! # async fn demo() -> Result<(), preloader::ConfigError> {
//! use preloader::{PreloaderBuilder, ReadySignal};
//!
//! let (ready, signal) = ReadySignal::channel();
//! let handle = PreloaderBuilder::new(|| println!("show the page"))
//!     .ready_signal(signal)
//!     .spawn()?;
//! ready.notify();
//! handle.completed().await;
//! # Ok(())
//! # }
//! ```

pub mod clock;
pub mod config;
pub mod controller;
pub mod machine;
pub mod phase;
pub mod ready;

pub use clock::{Clock, TokioClock};
pub use config::{ConfigError, PreloaderConfig, Thresholds};
pub use controller::{CompletionCallback, PreloaderBuilder, PreloaderHandle, Snapshot};
pub use machine::{Event, Preloader, Stage};
pub use phase::{Phase, Presentation};
pub use ready::{ReadyHandle, ReadySignal};
