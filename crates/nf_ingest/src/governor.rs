use std::time::Duration;
use tokio::time::sleep;

/// Standard spacing between consecutive outbound API calls.
pub const MIN_DELAY: Duration = Duration::from_secs(1);

/// Spacing applied once after an explicit rate-limit signal.
pub const BACKOFF_DELAY: Duration = Duration::from_secs(5);

/// Enforces minimum spacing between outbound calls to the rate-limited API
/// source. Fixed policy: no exponential backoff, no circuit breaker.
#[derive(Debug, Clone)]
pub struct RateGovernor {
    min_delay: Duration,
    backoff_delay: Duration,
    next_delay: Duration,
}

impl Default for RateGovernor {
    fn default() -> Self {
        Self::new(MIN_DELAY, BACKOFF_DELAY)
    }
}

impl RateGovernor {
    pub fn new(min_delay: Duration, backoff_delay: Duration) -> Self {
        Self {
            min_delay,
            backoff_delay,
            next_delay: min_delay,
        }
    }

    /// Sleep ahead of the next outbound call, then reset to the standard
    /// spacing. Returns the delay that was applied.
    pub async fn pause(&mut self) -> Duration {
        let delay = self.next_delay;
        sleep(delay).await;
        self.next_delay = self.min_delay;
        delay
    }

    /// React to an explicit rate-limit signal: the next single pause uses
    /// the extended backoff instead of the standard spacing.
    pub fn throttle(&mut self) {
        self.next_delay = self.backoff_delay;
    }

    pub fn current_delay(&self) -> Duration {
        self.next_delay
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_standard_spacing() {
        let mut governor = RateGovernor::new(Duration::from_millis(1), Duration::from_millis(5));
        assert_eq!(governor.pause().await, Duration::from_millis(1));
        assert_eq!(governor.pause().await, Duration::from_millis(1));
    }

    #[tokio::test]
    async fn test_throttle_applies_to_next_pause_only() {
        let mut governor = RateGovernor::new(Duration::from_millis(1), Duration::from_millis(5));
        governor.throttle();
        assert_eq!(governor.current_delay(), Duration::from_millis(5));
        assert_eq!(governor.pause().await, Duration::from_millis(5));
        // Spacing falls back to the standard delay afterwards.
        assert_eq!(governor.pause().await, Duration::from_millis(1));
    }
}
