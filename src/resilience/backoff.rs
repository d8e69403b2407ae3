//! Exponential backoff with optional jitter.

use std::time::Duration;

use rand::Rng;

use crate::config::BackoffConfig;

/// Delay policy between load attempts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackoffPolicy {
    pub unit: Duration,
    /// Upper bound for a single delay, `None` for no cap.
    pub max_delay: Option<Duration>,
    pub jitter_ratio: f64,
}

impl BackoffPolicy {
    /// Delay to wait after the 1-indexed `attempt` failed.
    pub fn delay_after(&self, attempt: u32) -> Duration {
        calculate_backoff(
            attempt,
            self.unit.as_millis() as u64,
            self.max_delay.map(|max| max.as_millis() as u64),
            self.jitter_ratio,
        )
    }
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self::from(&BackoffConfig::default())
    }
}

impl From<&BackoffConfig> for BackoffPolicy {
    fn from(config: &BackoffConfig) -> Self {
        Self {
            unit: Duration::from_millis(config.unit_ms),
            max_delay: config.max_delay_ms.map(Duration::from_millis),
            jitter_ratio: config.jitter_ratio,
        }
    }
}

/// Calculate `unit_ms * 2^attempt`, capped at `max_ms` if given, plus up to
/// `jitter_ratio` of the capped delay.
pub fn calculate_backoff(
    attempt: u32,
    unit_ms: u64,
    max_ms: Option<u64>,
    jitter_ratio: f64,
) -> Duration {
    if attempt == 0 {
        return Duration::from_millis(0);
    }

    let exponential_base = 2u64.saturating_pow(attempt);
    let delay_ms = unit_ms.saturating_mul(exponential_base);
    let capped_delay = max_ms.map_or(delay_ms, |max| delay_ms.min(max));

    let jitter_range = (capped_delay as f64 * jitter_ratio.clamp(0.0, 1.0)) as u64;
    let jitter = if jitter_range > 0 {
        rand::thread_rng().gen_range(0..jitter_range)
    } else {
        0
    };

    Duration::from_millis(capped_delay + jitter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_doubles_per_attempt() {
        assert_eq!(calculate_backoff(1, 1000, None, 0.0), Duration::from_secs(2));
        assert_eq!(calculate_backoff(2, 1000, None, 0.0), Duration::from_secs(4));
        assert_eq!(calculate_backoff(3, 1000, None, 0.0), Duration::from_secs(8));
    }

    #[test]
    fn test_backoff_is_capped() {
        assert_eq!(calculate_backoff(10, 100, Some(1000), 0.0), Duration::from_millis(1000));
        assert_eq!(calculate_backoff(u32::MAX, 100, Some(1000), 0.0), Duration::from_millis(1000));
    }

    #[test]
    fn test_jitter_only_adds() {
        for _ in 0..50 {
            let delay = calculate_backoff(2, 100, Some(2000), 0.1);
            assert!(delay >= Duration::from_millis(400));
            assert!(delay < Duration::from_millis(440));
        }
    }

    #[test]
    fn test_policy_from_config() {
        let policy = BackoffPolicy::default();
        assert_eq!(policy.delay_after(0), Duration::ZERO);
        assert_eq!(policy.delay_after(1), Duration::from_secs(2));
        assert_eq!(policy.delay_after(5), Duration::from_secs(32));
        assert_eq!(policy.delay_after(6), Duration::from_secs(64));
    }

    #[test]
    fn test_uncapped_delay_saturates() {
        let delay = calculate_backoff(u32::MAX, 1000, None, 0.0);
        assert_eq!(delay, Duration::from_millis(u64::MAX));
    }
}
