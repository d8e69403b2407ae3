//! Per-load options.

use std::time::Duration;

use crate::config::LoadSettings;

/// Options for a single `load` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    /// Maximum wall time per attempt.
    pub timeout: Duration,
    /// Maximum number of attempts.
    pub max_retries: u32,
}

impl LoadOptions {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self::from(&LoadSettings::default())
    }
}

impl From<&LoadSettings> for LoadOptions {
    fn from(settings: &LoadSettings) -> Self {
        Self {
            timeout: Duration::from_millis(settings.timeout_ms),
            max_retries: settings.max_retries,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = LoadOptions::default();
        assert_eq!(options.timeout, Duration::from_secs(5));
        assert_eq!(options.max_retries, 3);
    }

    #[test]
    fn test_builders() {
        let options = LoadOptions::default()
            .with_timeout(Duration::from_millis(250))
            .with_max_retries(1);
        assert_eq!(options.timeout, Duration::from_millis(250));
        assert_eq!(options.max_retries, 1);
    }
}
