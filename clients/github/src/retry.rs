use derive_more::Constructor;
use std::time::Duration;

/// Explicit retry strategy for transient request failures: `max_attempts`
/// total attempts, delays starting at `initial_delay` and multiplied by
/// `multiplier` after each failed attempt.
#[derive(Clone, Copy, Debug, Constructor)]
pub struct Backoff {
    pub max_attempts: u32,
    pub initial_delay: Duration,
    pub multiplier: u32,
}

impl Default for Backoff {
    fn default() -> Self {
        Backoff::new(3, Duration::from_millis(500), 2)
    }
}

impl Backoff {
    /// Delay to sleep after the given zero-based failed attempt, or `None`
    /// once all attempts are used up.
    pub fn delay_after(&self, attempt: u32) -> Option<Duration> {
        if attempt + 1 >= self.max_attempts {
            return None;
        }
        Some(self.initial_delay * self.multiplier.pow(attempt))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schedule_doubles_until_exhausted() {
        let backoff = Backoff::new(3, Duration::from_millis(500), 2);
        assert_eq!(backoff.delay_after(0), Some(Duration::from_millis(500)));
        assert_eq!(backoff.delay_after(1), Some(Duration::from_millis(1000)));
        assert_eq!(backoff.delay_after(2), None);
    }

    #[test]
    fn single_attempt_never_retries() {
        let backoff = Backoff::new(1, Duration::from_millis(500), 2);
        assert_eq!(backoff.delay_after(0), None);
    }
}
