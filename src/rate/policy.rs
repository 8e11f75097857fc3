use std::time::Duration;

use super::InvalidPolicy;

/// The configuration of a [`RateLimiter`](super::RateLimiter).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RateLimitPolicy {
    /// Tokens added per period.
    pub rate: u32,
    /// The period over which `rate` tokens are added. Refill is continuous, not stepped.
    pub period: Duration,
    /// The capacity of the bucket, which is also the largest single acquisition allowed.
    pub burst: u32,
}

impl RateLimitPolicy {
    /// Creates a policy allowing `rate` operations per second, with a burst of the same size.
    pub const fn per_second(rate: u32) -> RateLimitPolicy {
        RateLimitPolicy {
            rate,
            period: Duration::from_secs(1),
            burst: rate,
        }
    }

    /// Returns the same policy with a different burst capacity.
    pub const fn with_burst(self, burst: u32) -> RateLimitPolicy {
        RateLimitPolicy {
            burst,
            ..self
        }
    }

    /// Checks that the policy can admit anything at all.
    pub const fn validate(&self) -> Result<(), InvalidPolicy> {
        if self.rate == 0 {
            Err(InvalidPolicy::ZeroRate)
        } else if self.period.is_zero() {
            Err(InvalidPolicy::ZeroPeriod)
        } else if self.burst == 0 {
            Err(InvalidPolicy::ZeroBurst)
        } else {
            Ok(())
        }
    }

    pub(crate) fn tokens_per_second(&self) -> f64 {
        f64::from(self.rate) / self.period.as_secs_f64()
    }
}

impl Default for RateLimitPolicy {
    /// Ten operations per second, with a burst of ten.
    fn default() -> RateLimitPolicy {
        RateLimitPolicy::per_second(10)
    }
}
