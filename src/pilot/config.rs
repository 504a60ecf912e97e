//! Pilot configuration and defaults.

// ============================================================================
// Imports
// ============================================================================

use std::time::Duration;

// ============================================================================
// Constants
// ============================================================================

/// Timeout substituted for "wait indefinitely" operations.
///
/// A very large finite budget rather than true unbounded blocking, so
/// every wait still terminates through the same deadline machinery.
pub const INDEFINITE_WAIT: Duration = Duration::from_secs(873 * 24 * 60 * 60);

// ============================================================================
// PilotConfig
// ============================================================================

/// Tunable timing parameters for one [`crate::Pilot`].
///
/// | Field | Default |
/// |-------|---------|
/// | `find_timeout` | 20 s |
/// | `poll_interval` | 333 ms |
/// | `navigation_retries` | 3 |
/// | `navigation_retry_delay` | 333 ms |
#[derive(Debug, Clone)]
pub struct PilotConfig {
    /// Default budget for element finds and condition waits.
    pub find_timeout: Duration,
    /// Fixed delay between successive poll attempts.
    pub poll_interval: Duration,
    /// Number of full navigation attempts before giving up.
    pub navigation_retries: u32,
    /// Delay between navigation attempts, after the blank-page reset.
    pub navigation_retry_delay: Duration,
}

impl Default for PilotConfig {
    fn default() -> Self {
        Self {
            find_timeout: Duration::from_secs(20),
            poll_interval: Duration::from_millis(333),
            navigation_retries: 3,
            navigation_retry_delay: Duration::from_millis(333),
        }
    }
}

impl PilotConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the default find/wait timeout.
    #[must_use]
    pub fn with_find_timeout(mut self, timeout: Duration) -> Self {
        self.find_timeout = timeout;
        self
    }

    /// Sets the polling interval.
    #[must_use]
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Sets the navigation retry count.
    #[must_use]
    pub fn with_navigation_retries(mut self, retries: u32) -> Self {
        self.navigation_retries = retries;
        self
    }

    /// Sets the delay between navigation attempts.
    #[must_use]
    pub fn with_navigation_retry_delay(mut self, delay: Duration) -> Self {
        self.navigation_retry_delay = delay;
        self
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PilotConfig::default();
        assert_eq!(config.find_timeout, Duration::from_secs(20));
        assert_eq!(config.poll_interval, Duration::from_millis(333));
        assert_eq!(config.navigation_retries, 3);
        assert_eq!(config.navigation_retry_delay, Duration::from_millis(333));
    }

    #[test]
    fn test_builders() {
        let config = PilotConfig::new()
            .with_find_timeout(Duration::from_secs(5))
            .with_poll_interval(Duration::from_millis(50))
            .with_navigation_retries(1)
            .with_navigation_retry_delay(Duration::from_millis(10));
        assert_eq!(config.find_timeout, Duration::from_secs(5));
        assert_eq!(config.poll_interval, Duration::from_millis(50));
        assert_eq!(config.navigation_retries, 1);
        assert_eq!(config.navigation_retry_delay, Duration::from_millis(10));
    }

    #[test]
    fn test_indefinite_wait_is_days_not_forever() {
        assert_eq!(INDEFINITE_WAIT, Duration::from_secs(75_427_200));
    }
}
