//! Capture session configuration.
//!
//! All transport and timing parameters are injected through [`CaptureConfig`]
//! rather than read from ambient globals, so sessions can be constructed
//! against fake transports and clocks in tests.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default baud rate of the acquisition link.
pub const DEFAULT_BAUD_RATE: u32 = 2_000_000;

/// Default nominal capture duration.
pub const DEFAULT_DURATION: Duration = Duration::from_secs(10);

/// Default delay after opening the port, giving the remote side time to
/// come out of reset before the trigger is sent.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_secs(2);

/// Default sleep between polls while the link has nothing buffered.
pub const DEFAULT_POLL_BACKOFF: Duration = Duration::from_millis(2);

/// The hard session timeout is the nominal duration times this factor.
pub const TIMEOUT_FACTOR: f64 = 1.5;

/// Configuration for a capture session.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use safewire::CaptureConfig;
///
/// let config = CaptureConfig::new("/dev/ttyUSB0")
///     .with_duration(Duration::from_secs(5));
/// assert_eq!(config.max_capture_time(), Duration::from_millis(7500));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptureConfig {
    /// Serial port path (e.g. `/dev/ttyUSB0`, `COM7`).
    pub port: String,
    /// Baud rate of the link.
    pub baud_rate: u32,
    /// Nominal capture duration.
    pub duration: Duration,
    /// Delay between opening the port and sending the trigger.
    pub settle_delay: Duration,
    /// Sleep between polls while no bytes are available.
    pub poll_backoff: Duration,
}

impl CaptureConfig {
    /// Create a configuration for `port` with default timing parameters.
    pub fn new(port: impl Into<String>) -> Self {
        Self {
            port: port.into(),
            baud_rate: DEFAULT_BAUD_RATE,
            duration: DEFAULT_DURATION,
            settle_delay: DEFAULT_SETTLE_DELAY,
            poll_backoff: DEFAULT_POLL_BACKOFF,
        }
    }

    /// Set the baud rate.
    pub fn with_baud_rate(mut self, baud_rate: u32) -> Self {
        self.baud_rate = baud_rate;
        self
    }

    /// Set the nominal capture duration.
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Set the settle delay.
    pub fn with_settle_delay(mut self, settle_delay: Duration) -> Self {
        self.settle_delay = settle_delay;
        self
    }

    /// Set the poll backoff.
    pub fn with_poll_backoff(mut self, poll_backoff: Duration) -> Self {
        self.poll_backoff = poll_backoff;
        self
    }

    /// Hard wall-clock budget for the streaming phase.
    ///
    /// The remote side is expected to stop on its own after the nominal
    /// duration; the extra headroom covers transfer and marker latency.
    pub fn max_capture_time(&self) -> Duration {
        self.duration.mul_f64(TIMEOUT_FACTOR)
    }
}
