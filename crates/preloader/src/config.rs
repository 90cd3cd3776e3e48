//! Timing and threshold configuration for the preloader

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Errors produced when validating a [`PreloaderConfig`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("min_duration must be greater than zero")]
    ZeroMinDuration,

    #[error("tick_interval must be greater than zero")]
    ZeroTickInterval,

    #[error("threshold {name} must be at most 100, got {value}")]
    ThresholdOutOfRange { name: &'static str, value: u8 },

    #[error("emphasis threshold ({emphasis}) must not be below transition threshold ({transition})")]
    ThresholdOrder { transition: u8, emphasis: u8 },
}

/// Main preloader configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreloaderConfig {
    /// Minimum perceived loading time; progress reaches 100 at this point
    #[serde(default = "default_min_duration", with = "humantime_serde")]
    pub min_duration: Duration,
    /// Period of the progress tick loop
    #[serde(default = "default_tick_interval", with = "humantime_serde")]
    pub tick_interval: Duration,
    /// Delay used by [`crate::ReadySignal::after`] when no real readiness input exists
    #[serde(default = "default_ready_delay", with = "humantime_serde")]
    pub ready_delay: Duration,
    /// Pause at 100% before the exit transition starts
    #[serde(default = "default_settle_delay", with = "humantime_serde")]
    pub settle_delay: Duration,
    /// Duration of the exit transition; the completion callback fires after it
    #[serde(default = "default_exit_delay", with = "humantime_serde")]
    pub exit_delay: Duration,
    #[serde(default)]
    pub thresholds: Thresholds,
}

/// Progress values at which the visual phases change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thresholds {
    /// Background cross-fade and `Transition` phase start here
    #[serde(default = "default_transition_threshold")]
    pub transition: u8,
    /// Scale emphasis ramps from here up to 100
    #[serde(default = "default_emphasis_threshold")]
    pub emphasis: u8,
}

fn default_min_duration() -> Duration {
    Duration::from_millis(3000)
}

fn default_tick_interval() -> Duration {
    Duration::from_millis(30)
}

fn default_ready_delay() -> Duration {
    Duration::from_millis(100)
}

fn default_settle_delay() -> Duration {
    Duration::from_millis(500)
}

fn default_exit_delay() -> Duration {
    Duration::from_millis(800)
}

fn default_transition_threshold() -> u8 {
    80
}

fn default_emphasis_threshold() -> u8 {
    90
}

impl Default for PreloaderConfig {
    fn default() -> Self {
        Self {
            min_duration: default_min_duration(),
            tick_interval: default_tick_interval(),
            ready_delay: default_ready_delay(),
            settle_delay: default_settle_delay(),
            exit_delay: default_exit_delay(),
            thresholds: Thresholds::default(),
        }
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            transition: default_transition_threshold(),
            emphasis: default_emphasis_threshold(),
        }
    }
}

impl PreloaderConfig {
    /// Check the configuration for values the state machine cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_duration.is_zero() {
            return Err(ConfigError::ZeroMinDuration);
        }
        if self.tick_interval.is_zero() {
            return Err(ConfigError::ZeroTickInterval);
        }
        self.thresholds.validate()
    }
}

impl Thresholds {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [("transition", self.transition), ("emphasis", self.emphasis)] {
            if value > 100 {
                return Err(ConfigError::ThresholdOutOfRange { name, value });
            }
        }
        if self.emphasis < self.transition {
            return Err(ConfigError::ThresholdOrder {
                transition: self.transition,
                emphasis: self.emphasis,
            });
        }
        Ok(())
    }
}
