use std::thread;
use std::time::Duration;

use super::{RetryError, RetryPolicy};
use crate::util::trace::warn;

/// Runs fallible operations under a [`RetryPolicy`].
///
/// # Examples
/// ```
/// # use seqkit::retry::{Retrier, RetryPolicy};
/// let retrier = Retrier::new(RetryPolicy::immediate(5));
///
/// let result = retrier.run(|attempt| if attempt < 3 { Err("not yet") } else { Ok(attempt) });
/// assert_eq!(result, Ok(3));
///
/// let result = retrier.run(|_| Err::<(), _>("never"));
/// assert_eq!(result.map_err(|e| e.attempts()), Err(5));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Retrier {
    policy: RetryPolicy,
    sleeper: fn(Duration),
}

impl Retrier {
    /// Creates a new Retrier which waits with [`thread::sleep`].
    pub fn new(policy: RetryPolicy) -> Retrier {
        Retrier {
            policy,
            sleeper: thread::sleep,
        }
    }

    /// Replaces the function used to wait between attempts, for example to record delays rather
    /// than actually sleeping.
    pub fn with_sleeper(self, sleeper: fn(Duration)) -> Retrier {
        Retrier {
            sleeper,
            ..self
        }
    }

    pub const fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Runs `op` until it succeeds or the policy runs out of attempts. `op` receives the number of
    /// the current attempt, starting at 1.
    pub fn run<T, E, F>(&self, op: F) -> Result<T, RetryError<E>>
    where
        F: FnMut(u32) -> Result<T, E>,
    {
        self.run_if(|_| true, op)
    }

    /// Runs `op` until it succeeds, the policy runs out of attempts or it fails with an error for
    /// which `should_retry` returns false.
    ///
    /// `should_retry` is consulted before the attempt count, so a refused error is reported as
    /// [`Aborted`](RetryError::Aborted) even on the last attempt.
    pub fn run_if<T, E, P, F>(&self, mut should_retry: P, mut op: F) -> Result<T, RetryError<E>>
    where
        P: FnMut(&E) -> bool,
        F: FnMut(u32) -> Result<T, E>,
    {
        let max_attempts = self.policy.attempts();
        let mut attempt = 1;
        loop {
            let error = match op(attempt) {
                Ok(value) => return Ok(value),
                Err(error) => error,
            };

            if !should_retry(&error) {
                return Err(RetryError::Aborted {
                    attempt,
                    error,
                });
            }
            if attempt >= max_attempts {
                return Err(RetryError::Exhausted {
                    attempts: attempt,
                    error,
                });
            }

            let delay = self.policy.delay_for(attempt);
            warn!(
                attempt,
                max_attempts,
                delay_ms = delay.as_millis() as u64,
                "attempt failed, retrying"
            );
            (self.sleeper)(delay);
            attempt += 1;
        }
    }
}

impl Default for Retrier {
    fn default() -> Retrier {
        Retrier::new(RetryPolicy::default())
    }
}
