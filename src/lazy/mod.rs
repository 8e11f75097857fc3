//! A module for values that are computed on first use, either once ([`Lazy`]) or once per key
//! ([`Memoized`]).
//!
//! Both are safe to share between threads and guarantee that the initializer for a value runs at
//! most once, even when several threads ask for it at the same time.

mod error;
mod lazy;
mod memoized;
mod tests;

pub use error::*;
pub use lazy::*;
pub use memoized::*;
