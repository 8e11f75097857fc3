use std::fmt::{self, Debug, Formatter};
use std::thread;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

use super::{ExceedsBurst, InvalidPolicy, RateLimitPolicy};
use crate::util::trace::debug;

/// A token bucket rate limiter that can be shared between threads.
///
/// The bucket starts full. All state lives behind a single lock, which is only ever held for the
/// refill arithmetic, never while sleeping.
///
/// # Examples
/// ```
/// # use std::time::{Duration, Instant};
/// # use seqkit::rate::{RateLimiter, RateLimitPolicy};
/// let limiter = RateLimiter::new(RateLimitPolicy::per_second(2)).unwrap();
/// let now = Instant::now();
///
/// assert!(limiter.try_acquire_at(1, now));
/// assert!(limiter.try_acquire_at(1, now));
/// assert!(!limiter.try_acquire_at(1, now));
/// assert!(limiter.retry_after(1, now) <= Duration::from_millis(500));
/// ```
pub struct RateLimiter {
    policy: RateLimitPolicy,
    bucket: Mutex<Bucket>,
}

#[derive(Debug)]
struct Bucket {
    tokens: f64,
    last_refill: Instant,
}

impl RateLimiter {
    /// Creates a new RateLimiter with a full bucket, or returns why `policy` is unusable.
    pub fn new(policy: RateLimitPolicy) -> Result<RateLimiter, InvalidPolicy> {
        policy.validate()?;
        Ok(RateLimiter {
            policy,
            bucket: Mutex::new(Bucket {
                tokens: f64::from(policy.burst),
                last_refill: Instant::now(),
            }),
        })
    }

    pub const fn policy(&self) -> &RateLimitPolicy {
        &self.policy
    }

    /// Takes `n` tokens if they are available now, returning whether it did.
    pub fn try_acquire(&self, n: u32) -> bool {
        self.try_acquire_at(n, Instant::now())
    }

    /// Takes `n` tokens if they are available at `now`, returning whether it did.
    ///
    /// Times earlier than the last refill are treated as the last refill, so a limiter shared
    /// between threads with slightly different clocks never loses tokens.
    pub fn try_acquire_at(&self, n: u32, now: Instant) -> bool {
        self.take_or_wait(n, now).is_ok()
    }

    /// Returns how long it will take from `now` until `n` tokens are available, which is zero if
    /// they already are and [`Duration::MAX`] if `n` is larger than the burst capacity.
    pub fn retry_after(&self, n: u32, now: Instant) -> Duration {
        if n > self.policy.burst {
            return Duration::MAX;
        }
        let mut bucket = self.bucket.lock();
        self.refill(&mut bucket, now);
        self.wait_for(&bucket, n)
    }

    /// Returns the number of tokens available at `now`, including fractional ones.
    pub fn available_at(&self, now: Instant) -> f64 {
        let mut bucket = self.bucket.lock();
        self.refill(&mut bucket, now);
        bucket.tokens
    }

    /// Takes `n` tokens, sleeping the current thread until they are available, and returns the
    /// total time spent sleeping.
    ///
    /// Waiting threads don't queue: whichever thread finds enough tokens first takes them.
    pub fn acquire(&self, n: u32) -> Result<Duration, ExceedsBurst> {
        if n > self.policy.burst {
            return Err(ExceedsBurst {
                requested: n,
                burst: self.policy.burst,
            });
        }

        let mut waited = Duration::ZERO;
        while let Err(wait) = self.take_or_wait(n, Instant::now()) {
            debug!(requested = n, wait_ms = wait.as_millis() as u64, "rate limiter waiting for tokens");
            thread::sleep(wait);
            waited += wait;
        }
        Ok(waited)
    }

    /// Resets the bucket to full.
    pub fn reset(&self) {
        let mut bucket = self.bucket.lock();
        bucket.tokens = f64::from(self.policy.burst);
        bucket.last_refill = Instant::now();
    }

    fn take_or_wait(&self, n: u32, now: Instant) -> Result<(), Duration> {
        if n > self.policy.burst {
            return Err(Duration::MAX);
        }
        let mut bucket = self.bucket.lock();
        self.refill(&mut bucket, now);

        let cost = f64::from(n);
        if bucket.tokens >= cost {
            bucket.tokens -= cost;
            Ok(())
        } else {
            Err(self.wait_for(&bucket, n))
        }
    }

    fn refill(&self, bucket: &mut Bucket, now: Instant) {
        if now <= bucket.last_refill {
            return;
        }
        let elapsed = now.duration_since(bucket.last_refill).as_secs_f64();
        bucket.tokens = (bucket.tokens + elapsed * self.policy.tokens_per_second())
            .min(f64::from(self.policy.burst));
        bucket.last_refill = now;
    }

    fn wait_for(&self, bucket: &Bucket, n: u32) -> Duration {
        let missing = f64::from(n) - bucket.tokens;
        if missing <= 0.0 {
            return Duration::ZERO;
        }
        // Rounded up to whole microseconds so that sleeping for the result always suffices.
        let micros = (missing / self.policy.tokens_per_second() * 1_000_000.0).ceil();
        Duration::from_micros(micros as u64)
    }
}

impl Debug for RateLimiter {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let bucket = self.bucket.lock();
        f.debug_struct("RateLimiter")
            .field("policy", &self.policy)
            .field("tokens", &bucket.tokens)
            .finish()
    }
}
