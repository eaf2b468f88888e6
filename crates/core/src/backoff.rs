//! Exponential backoff schedule
//!
//! The delay after the n-th consecutive failure is `initial * 2^(n-1)`:
//! 1, 2, 4, 8, ... time units. By default there is no ceiling on either the
//! number of attempts or the delay. Both can be bounded by the caller.

use std::time::Duration;

/// Retry policy for a single remote call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackoffPolicy {
    /// Delay after the first failure
    pub initial_delay: Duration,
    /// Total attempts allowed, including the first. `None` retries forever.
    pub max_attempts: Option<u32>,
    /// Upper bound for a single delay. `None` leaves delays uncapped.
    pub max_delay: Option<Duration>,
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_secs(1),
            max_attempts: None,
            max_delay: None,
        }
    }
}

impl BackoffPolicy {
    pub fn with_max_attempts(mut self, max_attempts: Option<u32>) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn with_max_delay(mut self, max_delay: Option<Duration>) -> Self {
        self.max_delay = max_delay;
        self
    }

    /// Delay to wait after `failures` consecutive failed attempts (1-based)
    pub fn delay_for(&self, failures: u32) -> Duration {
        let exponent = failures.saturating_sub(1);
        let delay = 2u32
            .checked_pow(exponent)
            .and_then(|factor| self.initial_delay.checked_mul(factor))
            .unwrap_or(Duration::MAX);

        match self.max_delay {
            Some(ceiling) => delay.min(ceiling),
            None => delay,
        }
    }

    /// Whether another attempt may follow `attempts` failed attempts
    pub fn allows_retry(&self, attempts: u32) -> bool {
        self.max_attempts.map_or(true, |max| attempts < max)
    }

    /// The delays this policy waits through, in order
    pub fn schedule(&self) -> impl Iterator<Item = Duration> + '_ {
        (1..)
            .take_while(move |failures| self.allows_retry(*failures))
            .map(move |failures| self.delay_for(failures))
    }
}
