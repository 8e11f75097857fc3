use std::time::Duration;

/// How often to attempt an operation and how long to wait between attempts.
///
/// The wait after the `n`th failed attempt is `initial_delay * multiplier^(n - 1)`, capped at
/// `max_delay`.
///
/// # Examples
/// ```
/// # use std::time::Duration;
/// # use seqkit::retry::RetryPolicy;
/// let policy = RetryPolicy::default();
/// assert_eq!(policy.delay_for(1), Duration::from_millis(100));
/// assert_eq!(policy.delay_for(2), Duration::from_millis(200));
/// assert_eq!(policy.delay_for(3), Duration::from_millis(400));
/// assert_eq!(policy.delay_for(20), Duration::from_secs(10));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    /// The total number of attempts, including the first. Zero is treated as one.
    pub max_attempts: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
    /// The factor applied to the delay after each failure. Values below 1 are treated as 1.
    pub multiplier: f64,
}

impl RetryPolicy {
    /// Creates a policy that retries immediately, without waiting between attempts.
    pub const fn immediate(max_attempts: u32) -> RetryPolicy {
        RetryPolicy {
            max_attempts,
            initial_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
            multiplier: 1.0,
        }
    }

    /// Creates a policy that always waits `delay` between attempts.
    pub const fn fixed(delay: Duration, max_attempts: u32) -> RetryPolicy {
        RetryPolicy {
            max_attempts,
            initial_delay: delay,
            max_delay: delay,
            multiplier: 1.0,
        }
    }

    pub const fn with_max_attempts(self, max_attempts: u32) -> RetryPolicy {
        RetryPolicy {
            max_attempts,
            ..self
        }
    }

    /// Returns the delay to wait after the given failed attempt, counting from 1. Attempt 0 has no
    /// delay.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        if attempt == 0 {
            return Duration::ZERO;
        }

        let exponent = i32::try_from(attempt - 1).unwrap_or(i32::MAX);
        let factor = self.multiplier.max(1.0).powi(exponent);
        let nanos = self.initial_delay.as_nanos() as f64 * factor;
        let max_nanos = self.max_delay.as_nanos() as f64;

        // Also catches an infinite product.
        if nanos >= max_nanos {
            self.max_delay
        } else {
            Duration::from_nanos(nanos as u64)
        }
    }

    pub(crate) fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }
}

impl Default for RetryPolicy {
    fn default() -> RetryPolicy {
        RetryPolicy {
            max_attempts: 3,
            initial_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(10),
            multiplier: 2.0,
        }
    }
}
