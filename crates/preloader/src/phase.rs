//! Progress computation and the progress → presentation mapping
//!
//! Everything in this module is a pure function of `progress` (and the
//! `exiting` flag), so any rendering layer can re-derive the visuals from a
//! [`crate::Snapshot`] without holding state of its own.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::Thresholds;

/// Scale reached by the emphasis effect at 100%
pub const MAX_EMPHASIS_SCALE: f32 = 1.1;

/// Visual phase of the preloader
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Below the transition threshold
    Base,
    /// Between the transition threshold and 100
    Transition,
    /// Progress is at 100, exit not started
    Complete,
    /// The exit transition is running
    Exiting,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Base => write!(f, "base"),
            Phase::Transition => write!(f, "transition"),
            Phase::Complete => write!(f, "complete"),
            Phase::Exiting => write!(f, "exiting"),
        }
    }
}

/// Progress percentage for a given elapsed time.
///
/// Computed from absolute elapsed time so late ticks self-correct. The
/// result is rounded to the nearest integer (halves up) but held at 99 until the full
/// `min_duration` has passed, so 100 always means the minimum time is over.
pub fn progress_at(elapsed: Duration, min_duration: Duration) -> u8 {
    if elapsed >= min_duration {
        return 100;
    }
    if min_duration.is_zero() {
        return 100;
    }
    let elapsed = elapsed.as_nanos();
    let total = min_duration.as_nanos();
    let rounded = (elapsed * 100 + total / 2) / total;
    rounded.min(99) as u8
}

/// Canonical progress → phase mapping
pub fn phase(progress: u8, exiting: bool, thresholds: &Thresholds) -> Phase {
    if exiting {
        Phase::Exiting
    } else if progress >= 100 {
        Phase::Complete
    } else if progress >= thresholds.transition {
        Phase::Transition
    } else {
        Phase::Base
    }
}

/// Opacity of the end background laid over the start background
pub fn background_crossfade(progress: u8, thresholds: &Thresholds) -> f32 {
    if progress >= thresholds.transition {
        1.0
    } else {
        0.0
    }
}

/// Scale applied to the progress figure over the last stretch of loading
pub fn emphasis_scale(progress: u8, thresholds: &Thresholds) -> f32 {
    let start = thresholds.emphasis.min(100);
    if progress <= start {
        return 1.0;
    }
    if start >= 100 {
        return MAX_EMPHASIS_SCALE;
    }
    let span = f32::from(100 - start);
    let into = f32::from(progress.min(100) - start);
    1.0 + (MAX_EMPHASIS_SCALE - 1.0) * (into / span)
}

/// Fraction of the figure filled from the bottom
pub fn fill_fraction(progress: u8) -> f32 {
    f32::from(progress.min(100)) / 100.0
}

/// Opacity of the whole overlay; it fades out during the exit transition
pub fn overlay_opacity(exiting: bool) -> f32 {
    if exiting {
        0.0
    } else {
        1.0
    }
}

/// All visual parameters for one frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Presentation {
    pub phase: Phase,
    pub background_crossfade: f32,
    pub emphasis_scale: f32,
    pub fill_fraction: f32,
    pub overlay_opacity: f32,
}

impl Presentation {
    pub fn derive(progress: u8, exiting: bool, thresholds: &Thresholds) -> Self {
        Self {
            phase: phase(progress, exiting, thresholds),
            background_crossfade: background_crossfade(progress, thresholds),
            emphasis_scale: emphasis_scale(progress, thresholds),
            fill_fraction: fill_fraction(progress),
            overlay_opacity: overlay_opacity(exiting),
        }
    }
}
