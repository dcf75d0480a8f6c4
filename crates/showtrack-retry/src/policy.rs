//! Retry budget and backoff schedule.

use std::time::Duration;

/// Total number of attempts, including the first one.
pub const MAX_RETRIES: u32 = 3;

/// Delay after the first failed attempt; doubles for each further failure.
pub const BASE_DELAY: Duration = Duration::from_secs(2);

/// Upper bound on any single backoff delay.
pub const MAX_DELAY: Duration = Duration::from_secs(30);

/// Attempt budget and backoff parameters for a [`crate::RetryExecutor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, not additional retries. Values below 1 behave as 1.
    pub max_attempts: u32,
    /// Delay after the first failed attempt.
    pub base_delay: Duration,
    /// Cap applied to every computed delay.
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: MAX_RETRIES,
            base_delay: BASE_DELAY,
            max_delay: MAX_DELAY,
        }
    }
}

impl RetryPolicy {
    /// Sets the total attempt budget.
    #[must_use]
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Sets the delay after the first failed attempt.
    #[must_use]
    pub fn with_base_delay(mut self, base_delay: Duration) -> Self {
        self.base_delay = base_delay;
        self
    }

    /// Sets the cap on a single delay.
    #[must_use]
    pub fn with_max_delay(mut self, max_delay: Duration) -> Self {
        self.max_delay = max_delay;
        self
    }

    /// Delay to wait after attempt `failed_attempt` (1-based) has failed:
    /// `min(2^(failed_attempt - 1) * base_delay, max_delay)`.
    ///
    /// The exponent is taken from the attempt that just failed, so the wait
    /// before attempt 2 is one `base_delay`, not two.
    #[must_use]
    pub fn backoff_delay(&self, failed_attempt: u32) -> Duration {
        let exponent = failed_attempt.saturating_sub(1);
        2u32.checked_pow(exponent)
            .and_then(|factor| self.base_delay.checked_mul(factor))
            .map_or(self.max_delay, |delay| delay.min(self.max_delay))
    }
}
