//! Configuration for the state fetcher.

use std::time::Duration;

/// Default time between fetch cycles.
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 60;

/// Configuration for the state fetcher.
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    /// Wait between the end of one cycle and the start of the next.
    pub poll_interval: Duration,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
        }
    }
}

impl FetcherConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the poll interval.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = FetcherConfig::default();
        assert_eq!(config.poll_interval, Duration::from_secs(60));
    }

    #[test]
    fn test_builder_pattern() {
        let config = FetcherConfig::new().with_poll_interval(Duration::from_secs(15));
        assert_eq!(config.poll_interval, Duration::from_secs(15));
    }
}
