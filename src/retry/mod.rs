//! A module for retrying fallible operations with capped exponential backoff.
//!
//! A [`RetryPolicy`] describes how many attempts to make and how long to wait between them, and
//! a [`Retrier`] runs an operation under it. The wait is a plain [`thread::sleep`] by default,
//! which can be swapped out with [`Retrier::with_sleeper`].
//!
//! [`thread::sleep`]: std::thread::sleep

mod error;
mod policy;
mod retrier;
mod tests;

pub use error::*;
pub use policy::*;
pub use retrier::*;
