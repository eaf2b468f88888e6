//! Minimum spacing between successive calls
//!
//! A [`Pacer`] guarantees at least `interval` between the moments its
//! callers are released. The last release time sits behind an async mutex,
//! so one pacer is a global ceiling even when shared by concurrent tasks.

use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// Pacing intervals, independent of retry backoff
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PacingPolicy {
    /// Between any two remote requests
    pub request_interval: Duration,
    /// Between successive entrant selection lookups
    pub selection_interval: Duration,
    /// Between successive events of a tournament
    pub event_interval: Duration,
}

impl Default for PacingPolicy {
    fn default() -> Self {
        Self {
            request_interval: Duration::ZERO,
            selection_interval: Duration::from_millis(300),
            event_interval: Duration::from_secs(2),
        }
    }
}

#[derive(Debug)]
pub struct Pacer {
    interval: Duration,
    last_release: Mutex<Option<Instant>>,
}

impl Pacer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_release: Mutex::new(None),
        }
    }

    /// A pacer that never waits
    pub fn unlimited() -> Self {
        Self::new(Duration::ZERO)
    }

    /// Wait until `interval` has passed since the previous release
    pub async fn pace(&self) {
        let mut last_release = self.last_release.lock().await;
        if let Some(previous) = *last_release {
            let ready_at = previous + self.interval;
            if ready_at > Instant::now() {
                tokio::time::sleep_until(ready_at).await;
            }
        }
        *last_release = Some(Instant::now());
    }
}
