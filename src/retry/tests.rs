#![cfg(test)]

use std::cell::RefCell;
use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::time::Duration;

use super::*;
use crate::util::counter::CallCounter;

thread_local! {
    static SLEPT: RefCell<Vec<Duration>> = const { RefCell::new(Vec::new()) };
}

fn record_sleep(delay: Duration) {
    SLEPT.with_borrow_mut(|slept| slept.push(delay));
}

fn take_sleeps() -> Vec<Duration> {
    SLEPT.with_borrow_mut(std::mem::take)
}

fn recording(policy: RetryPolicy) -> Retrier {
    take_sleeps();
    Retrier::new(policy).with_sleeper(record_sleep)
}

#[derive(Debug, PartialEq, Eq)]
enum Failure {
    Transient,
    Fatal,
}

impl Display for Failure {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Failure::Transient => write!(f, "transient failure"),
            Failure::Fatal => write!(f, "fatal failure"),
        }
    }
}

impl Error for Failure {}

#[test]
fn test_delay_for() {
    let policy = RetryPolicy {
        max_attempts: 10,
        initial_delay: Duration::from_millis(10),
        max_delay: Duration::from_millis(50),
        multiplier: 3.0,
    };

    assert_eq!(policy.delay_for(0), Duration::ZERO);
    assert_eq!(policy.delay_for(1), Duration::from_millis(10));
    assert_eq!(policy.delay_for(2), Duration::from_millis(30));
    assert_eq!(policy.delay_for(3), Duration::from_millis(50), "Delays should be capped.");
    assert_eq!(policy.delay_for(u32::MAX), Duration::from_millis(50));

    let shrinking = RetryPolicy {
        multiplier: 0.5,
        ..policy
    };
    assert_eq!(shrinking.delay_for(4), Duration::from_millis(10), "Delays should never shrink.");

    assert_eq!(RetryPolicy::immediate(4).delay_for(3), Duration::ZERO);
    assert_eq!(RetryPolicy::fixed(Duration::from_secs(1), 4).delay_for(3), Duration::from_secs(1));
}

#[test]
fn test_succeeds_first_time() {
    let retrier = recording(RetryPolicy::default());
    let result: Result<_, RetryError<Failure>> = retrier.run(|attempt| Ok(attempt * 10));

    assert_eq!(result, Ok(10));
    assert!(take_sleeps().is_empty(), "Nothing should be waited for after a success.");
}

#[test]
fn test_succeeds_after_retries() {
    let retrier = recording(RetryPolicy::default().with_max_attempts(5));
    let mut seen = Vec::new();

    let result = retrier.run(|attempt| {
        seen.push(attempt);
        if attempt < 3 { Err(Failure::Transient) } else { Ok("done") }
    });

    assert_eq!(result, Ok("done"));
    assert_eq!(seen, [1, 2, 3], "Attempts should be numbered from 1.");
    assert_eq!(take_sleeps(), [Duration::from_millis(100), Duration::from_millis(200)]);
}

#[test]
fn test_exhausted() {
    let retrier = recording(RetryPolicy::default());
    let calls = CallCounter::new();

    let result = retrier.run(|_| -> Result<(), _> {
        calls.tick();
        Err(Failure::Transient)
    });

    assert_eq!(
        result,
        Err(RetryError::Exhausted {
            attempts: 3,
            error: Failure::Transient,
        })
    );
    assert_eq!(calls.get(), 3);
    assert_eq!(take_sleeps().len(), 2, "There should be no wait after the last attempt.");
}

#[test]
fn test_aborted() {
    let retrier = recording(RetryPolicy::default().with_max_attempts(10));

    let result = retrier.run_if(
        |error: &Failure| *error == Failure::Transient,
        |attempt| -> Result<(), _> {
            if attempt < 4 { Err(Failure::Transient) } else { Err(Failure::Fatal) }
        },
    );

    let error = result.expect_err("a fatal failure should stop retrying");
    assert!(error.is_aborted());
    assert_eq!(error.attempts(), 4);
    assert_eq!(error.error(), &Failure::Fatal);
    assert_eq!(take_sleeps().len(), 3);
}

#[test]
fn test_zero_attempts_runs_once() {
    let retrier = recording(RetryPolicy::immediate(0));
    let calls = CallCounter::new();

    let result = retrier.run(|_| -> Result<(), _> {
        calls.tick();
        Err(Failure::Transient)
    });

    assert!(result.is_err_and(|e| e.is_exhausted() && e.attempts() == 1));
    assert_eq!(calls.get(), 1);
}

#[test]
fn test_retry_error_display() {
    let exhausted = RetryError::Exhausted {
        attempts: 3,
        error: Failure::Transient,
    };
    assert_eq!(exhausted.to_string(), "gave up after 3 attempts: transient failure");
    assert_eq!(
        exhausted.source().map(ToString::to_string).as_deref(),
        Some("transient failure")
    );

    let aborted = RetryError::Aborted {
        attempt: 1,
        error: Failure::Fatal,
    };
    assert_eq!(aborted.to_string(), "attempt 1 failed and shouldn't be retried: fatal failure");
    assert_eq!(aborted.into_inner(), Failure::Fatal);
}
