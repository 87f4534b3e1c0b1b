//! Sync engine configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Sync engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Quiet period after the last queued operation before a flush runs (in milliseconds)
    pub debounce_ms: u64,
    /// Interval between pull-merge passes of the pull loop (in seconds)
    pub pull_interval_secs: u64,
    /// Upper bound on a single flush write (in milliseconds); `None` waits forever
    pub flush_timeout_ms: Option<u64>,
    /// Capacity of the event broadcast channel
    pub event_capacity: usize,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 500,
            pull_interval_secs: 5,
            flush_timeout_ms: Some(15_000),
            event_capacity: 64,
        }
    }
}

/// Whole milliseconds, saturating at `u64::MAX`
fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

impl SyncConfig {
    /// Set the debounce quiet period
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce_ms = millis(debounce);
        self
    }

    /// Set the pull loop interval
    pub fn with_pull_interval(mut self, interval: Duration) -> Self {
        self.pull_interval_secs = interval.as_secs().max(1);
        self
    }

    /// Set or disable the flush timeout
    pub fn with_flush_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.flush_timeout_ms = timeout.map(millis);
        self
    }

    /// Debounce quiet period as a duration
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Pull loop interval as a duration
    pub fn pull_interval(&self) -> Duration {
        Duration::from_secs(self.pull_interval_secs.max(1))
    }

    /// Flush timeout as a duration
    pub fn flush_timeout(&self) -> Option<Duration> {
        self.flush_timeout_ms.map(Duration::from_millis)
    }
}
