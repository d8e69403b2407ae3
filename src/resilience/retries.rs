//! Retry policy.
//!
//! # Responsibilities
//! - Bound the number of attempts per load
//! - Decide the delay before the next attempt
//!
//! # Design Decisions
//! - Timeouts and loader errors are both retryable
//! - Unknown names never reach the retry loop
//! - At least one attempt is always made

use std::time::Duration;

use crate::resilience::backoff::BackoffPolicy;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub backoff: BackoffPolicy,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, backoff: BackoffPolicy) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            backoff,
        }
    }

    /// Delay before the next attempt, or `None` once `attempt` was the last.
    pub fn next_delay(&self, attempt: u32) -> Option<Duration> {
        if attempt < self.max_attempts {
            Some(self.backoff.delay_after(attempt))
        } else {
            None
        }
    }
}
