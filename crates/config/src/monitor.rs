#![forbid(unsafe_code)]

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Monitor {
    /// Seconds to wait between consecutive pressure samples while the
    /// stall level stays at or below the threshold. **Must be greater
    /// than zero.**
    pub poll_interval: u64,

    /// Seconds to wait after an OOM kill has been requested before
    /// sampling again. This gives the kernel time to reap the victim
    /// and lets the rolling average decay, so a single pressure spike
    /// does not produce a burst of kills.
    pub recovery_interval: u64,

    /// Stall percentage above which an OOM kill is requested. Compared
    /// against the `full avg10` PSI value with strict greater-than: a
    /// sample exactly equal to the threshold does not trigger. Must lie
    /// within 0 to 100.
    ///
    /// ## Note
    ///
    /// `full` pressure means *every* runnable task was stalled on
    /// memory, so even single-digit values indicate a system that is
    /// barely making progress.
    pub stall_threshold: f64,
}

impl Default for Monitor {
    fn default() -> Self {
        Self {
            poll_interval: 1,
            recovery_interval: 10,
            stall_threshold: 10.0,
        }
    }
}

impl Monitor {
    /// Check the documented ranges. Out-of-range values are rejected,
    /// not clamped.
    pub fn validate(&self) -> Result<(), Error> {
        if self.poll_interval == 0 {
            return Err(Error::ZeroInterval("poll_interval"));
        }
        if self.recovery_interval == 0 {
            return Err(Error::ZeroInterval("recovery_interval"));
        }
        if !self.stall_threshold.is_finite() || !(0.0..=100.0).contains(&self.stall_threshold) {
            return Err(Error::ThresholdOutOfRange(self.stall_threshold));
        }
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval)
    }

    pub fn recovery_interval(&self) -> Duration {
        Duration::from_secs(self.recovery_interval)
    }
}
