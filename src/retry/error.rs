use std::error::Error;
use std::fmt::{self, Display, Formatter};

use derive_more::IsVariant;

/// The error returned when a [`Retrier`](super::Retrier) gives up, carrying the error of the last
/// attempt.
#[derive(Debug, Clone, PartialEq, Eq, IsVariant)]
pub enum RetryError<E> {
    /// Every allowed attempt failed.
    Exhausted { attempts: u32, error: E },
    /// An attempt failed with an error that shouldn't be retried.
    Aborted { attempt: u32, error: E },
}

impl<E> RetryError<E> {
    /// Returns the number of attempts that were made.
    pub const fn attempts(&self) -> u32 {
        match self {
            RetryError::Exhausted { attempts, .. } => *attempts,
            RetryError::Aborted { attempt, .. } => *attempt,
        }
    }

    /// Returns a reference to the error of the last attempt.
    pub const fn error(&self) -> &E {
        match self {
            RetryError::Exhausted { error, .. } | RetryError::Aborted { error, .. } => error,
        }
    }

    /// Returns the error of the last attempt.
    pub fn into_inner(self) -> E {
        match self {
            RetryError::Exhausted { error, .. } | RetryError::Aborted { error, .. } => error,
        }
    }
}

impl<E: Display> Display for RetryError<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            RetryError::Exhausted { attempts, error } => {
                write!(f, "gave up after {attempts} attempts: {error}")
            },
            RetryError::Aborted { attempt, error } => {
                write!(f, "attempt {attempt} failed and shouldn't be retried: {error}")
            },
        }
    }
}

impl<E: Error + 'static> Error for RetryError<E> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(self.error())
    }
}
