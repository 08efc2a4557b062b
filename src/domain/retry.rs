//! Retry Policy - how long a single course keeps trying.

use std::time::Duration;

/// Terminal failure reason once a bounded policy is exhausted.
pub const MAX_RETRIES_REACHED: &str = "max retries reached";

/// Per-session retry policy, immutable once the session starts.
///
/// The inter-attempt delay is fixed, not exponential: the registration window
/// is short and known, so predictability beats adaptivity here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Attempts allowed before a bounded policy gives up. Always >= 1.
    pub max_attempts: u32,
    /// Fixed sleep between a rejected attempt and the next one.
    pub delay: Duration,
    /// When set, a course keeps retrying past `max_attempts` until success.
    pub unbounded: bool,
}

impl RetryPolicy {
    /// Creates a bounded policy. `max_attempts` is clamped to at least 1.
    pub fn bounded(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
            unbounded: false,
        }
    }

    /// Creates a policy that retries until success.
    pub fn unbounded(delay: Duration) -> Self {
        Self {
            max_attempts: 1,
            delay,
            unbounded: true,
        }
    }

    /// Whether the attempt loop should run another attempt.
    ///
    /// `attempt` is the number of attempts already performed.
    pub fn should_continue(&self, attempt: u32, last_succeeded: bool) -> bool {
        !last_succeeded && (self.unbounded || attempt < self.max_attempts)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        // Mirrors the historical CLI defaults: 5 attempts, 5 seconds apart.
        Self::bounded(5, Duration::from_secs(5))
    }
}
