//! Retry policy for probe requests.
//!
//! Probes fall through to the next provider on failure, so the default is a
//! single attempt. Retries only help against flaky links and are opt-in.

use std::time::Duration;

use crate::error::HttpError;

/// Strategy for retrying failed probe requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryStrategy {
    /// Maximum number of attempts, including the first.
    pub max_attempts: u32,
    /// Base delay between retries.
    pub base_delay: Duration,
    /// Whether to use exponential backoff.
    pub exponential_backoff: bool,
    /// Maximum delay between retries.
    pub max_delay: Duration,
}

impl RetryStrategy {
    /// Creates a retry strategy allowing `max_attempts` total attempts.
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay: Duration::from_millis(250),
            exponential_backoff: true,
            max_delay: Duration::from_secs(2),
        }
    }

    /// Disables retries.
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            base_delay: Duration::ZERO,
            exponential_backoff: false,
            max_delay: Duration::ZERO,
        }
    }

    /// Sets the base delay.
    pub fn with_base_delay(mut self, delay: Duration) -> Self {
        self.base_delay = delay;
        self
    }

    /// Enables or disables exponential backoff.
    pub fn with_exponential_backoff(mut self, enabled: bool) -> Self {
        self.exponential_backoff = enabled;
        self
    }

    /// Calculates the delay before retry number `attempt` (1-based).
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let delay = if self.exponential_backoff {
            let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
            self.base_delay.saturating_mul(factor)
        } else {
            self.base_delay
        };

        delay.min(self.max_delay)
    }

    /// Determines if a request error should be retried.
    pub fn should_retry(&self, error: &HttpError) -> bool {
        // Only transport failures; a 404 will still be a 404 next time.
        error.is_connect() || error.is_timeout()
    }
}

impl Default for RetryStrategy {
    fn default() -> Self {
        Self::no_retry()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_single_attempt() {
        let strategy = RetryStrategy::default();
        assert_eq!(strategy.max_attempts, 1);
    }

    #[test]
    fn test_exponential_backoff() {
        let strategy = RetryStrategy::new(5);

        assert_eq!(strategy.delay_for_attempt(1), Duration::from_millis(250));
        assert_eq!(strategy.delay_for_attempt(2), Duration::from_millis(500));
        assert_eq!(strategy.delay_for_attempt(3), Duration::from_millis(1000));
    }

    #[test]
    fn test_max_delay_cap() {
        let strategy = RetryStrategy::new(10).with_base_delay(Duration::from_secs(1));

        // Should be capped at 2 seconds
        assert_eq!(strategy.delay_for_attempt(5), Duration::from_secs(2));
    }

    #[test]
    fn test_flat_delay() {
        let strategy = RetryStrategy::new(3).with_exponential_backoff(false);
        assert_eq!(strategy.delay_for_attempt(3), Duration::from_millis(250));
    }

    #[test]
    fn test_zero_attempts_clamped() {
        assert_eq!(RetryStrategy::new(0).max_attempts, 1);
    }

    #[test]
    fn test_non_transport_errors_not_retried() {
        let strategy = RetryStrategy::new(3);
        assert!(!strategy.should_retry(&HttpError::InvalidUrl("x".into())));
    }
}
