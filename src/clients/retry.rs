//! Retry policy for transport failures.
//!
//! Only failures of the round trip itself are retried: connection errors,
//! timeouts, resets and failures while reading the response body. A
//! response with an error status is a completed round trip and is returned
//! as is.

use std::time::Duration;

use crate::config::ApiConfig;

/// Bounded retry policy derived from an [`ApiConfig`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Re-attempts allowed after the first try.
    pub retries: u32,
    /// Fixed wait between attempts.
    pub delay: Duration,
    /// Cumulative time budget across attempts.
    pub deadline: Option<Duration>,
    /// Timeout of a single attempt.
    pub timeout: Option<Duration>,
}

impl RetryPolicy {
    /// Builds the policy configured for a client.
    #[must_use]
    pub const fn from_config(config: &ApiConfig) -> Self {
        Self {
            retries: config.retries(),
            delay: config.retry_delay(),
            deadline: config.retry_deadline(),
            timeout: config.timeout(),
        }
    }

    /// Returns the timeout for an attempt starting at `elapsed`.
    ///
    /// The per-attempt timeout is capped by what is left of the deadline, so
    /// a running attempt never outlives it.
    #[must_use]
    pub fn attempt_timeout(&self, elapsed: Duration) -> Option<Duration> {
        let remaining = self.deadline.map(|deadline| deadline.saturating_sub(elapsed));
        match (self.timeout, remaining) {
            (Some(timeout), Some(remaining)) => Some(timeout.min(remaining)),
            (timeout, remaining) => timeout.or(remaining),
        }
    }

    /// Returns the wait before the next attempt, or `None` when no attempt
    /// is left.
    ///
    /// `retries_done` is the number of retries already spent and `elapsed`
    /// the time since the first attempt started.
    #[must_use]
    pub fn delay_before_retry(&self, retries_done: u32, elapsed: Duration) -> Option<Duration> {
        if retries_done >= self.retries {
            return None;
        }
        if let Some(deadline) = self.deadline {
            if elapsed.saturating_add(self.delay) >= deadline {
                return None;
            }
        }
        Some(self.delay)
    }
}

/// Returns `true` if the error means the round trip did not complete.
///
/// Builder and redirect-policy errors are not transport failures and would
/// fail again identically.
#[must_use]
pub fn is_transport_failure(error: &reqwest::Error) -> bool {
    if error.is_builder() || error.is_redirect() {
        return false;
    }
    error.is_connect() || error.is_timeout() || error.is_request() || error.is_body()
}
