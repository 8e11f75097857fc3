#![cfg(test)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use super::*;

fn limiter(rate: u32, burst: u32) -> (RateLimiter, Instant) {
    let limiter = RateLimiter::new(RateLimitPolicy::per_second(rate).with_burst(burst))
        .expect("policy should be valid");
    // Taken after construction, so every time used by a test is at or after the last refill.
    (limiter, Instant::now())
}

#[test]
fn test_invalid_policies() {
    let valid = RateLimitPolicy::per_second(5);
    assert_eq!(valid.validate(), Ok(()));

    let zero_rate = RateLimitPolicy {
        rate: 0,
        ..valid
    };
    let zero_period = RateLimitPolicy {
        period: Duration::ZERO,
        ..valid
    };
    let zero_burst = valid.with_burst(0);

    assert!(RateLimiter::new(zero_rate).is_err_and(|e| e.is_zero_rate()));
    assert!(RateLimiter::new(zero_period).is_err_and(|e| e.is_zero_period()));
    assert!(RateLimiter::new(zero_burst).is_err_and(|e| e.is_zero_burst()));
    assert_eq!(
        InvalidPolicy::ZeroBurst.to_string(),
        "rate limit policy must hold at least one token"
    );
}

#[test]
fn test_starts_full() {
    let (limiter, now) = limiter(10, 3);

    assert!(limiter.try_acquire_at(2, now));
    assert!(limiter.try_acquire_at(1, now));
    assert!(!limiter.try_acquire_at(1, now), "The burst should be spent.");
    assert!(limiter.available_at(now) < 1.0);
}

#[test]
fn test_refills_over_time() {
    let (limiter, now) = limiter(10, 5);
    assert!(limiter.try_acquire_at(5, now));
    assert!(!limiter.try_acquire_at(1, now));

    let later = now + Duration::from_millis(150);
    assert!(limiter.try_acquire_at(1, later), "150ms at 10/s should refill one token.");
    assert!(!limiter.try_acquire_at(1, later));

    let much_later = now + Duration::from_secs(60);
    let available = limiter.available_at(much_later);
    assert!((available - 5.0).abs() < f64::EPSILON, "Refill should stop at the burst capacity.");
}

#[test]
fn test_earlier_times_dont_refill() {
    let (limiter, now) = limiter(10, 2);
    assert!(limiter.try_acquire_at(2, now + Duration::from_secs(1)));
    assert!(!limiter.try_acquire_at(1, now), "Going back in time shouldn't add tokens.");
}

#[test]
fn test_retry_after() {
    let (limiter, now) = limiter(4, 4);
    assert_eq!(limiter.retry_after(4, now), Duration::ZERO);
    assert!(limiter.try_acquire_at(4, now));

    let wait = limiter.retry_after(2, now);
    assert!(wait > Duration::from_millis(450) && wait <= Duration::from_millis(500));
    assert!(limiter.try_acquire_at(2, now + wait), "Waiting for the advertised time should suffice.");

    assert_eq!(limiter.retry_after(5, now), Duration::MAX);
}

#[test]
fn test_acquire() {
    let (limiter, _) = limiter(100, 2);
    assert_eq!(limiter.acquire(2), Ok(Duration::ZERO));

    let waited = limiter.acquire(1).expect("1 token is within the burst");
    assert!(waited > Duration::ZERO, "An empty bucket should make acquire wait.");
    assert!(waited < Duration::from_secs(1));

    assert_eq!(
        limiter.acquire(3),
        Err(ExceedsBurst {
            requested: 3,
            burst: 2,
        })
    );
    assert!(!limiter.try_acquire_at(3, Instant::now() + Duration::from_secs(10)));
}

#[test]
fn test_reset() {
    let (limiter, now) = limiter(1, 3);
    assert!(limiter.try_acquire_at(3, now));
    limiter.reset();
    assert!(limiter.try_acquire(3));
}

#[test]
fn test_shared_between_threads() {
    let (limiter, now) = limiter(1, 50);
    let admitted = AtomicUsize::new(0);

    thread::scope(|scope| {
        for _ in 0..8 {
            scope.spawn(|| {
                for _ in 0..20 {
                    if limiter.try_acquire_at(1, now) {
                        admitted.fetch_add(1, Ordering::SeqCst);
                    }
                }
            });
        }
    });

    assert_eq!(admitted.load(Ordering::SeqCst), 50, "Exactly the burst should be admitted.");
}
