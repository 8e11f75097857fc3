//! A module containing [`RateLimiter`], a thread-safe token bucket.
//!
//! The bucket holds up to [`burst`](RateLimitPolicy::burst) tokens and refills continuously at
//! [`rate`](RateLimitPolicy::rate) tokens per [`period`](RateLimitPolicy::period). Each operation
//! spends one or more tokens, either failing fast ([`try_acquire`](RateLimiter::try_acquire)) or
//! sleeping the current thread until enough have accumulated ([`acquire`](RateLimiter::acquire)).
//!
//! Every method that depends on the time has an `_at` form taking an explicit [`Instant`], so the
//! refill math can be driven deterministically.
//!
//! [`Instant`]: std::time::Instant

mod error;
mod policy;
mod rate_limiter;
mod tests;

pub use error::*;
pub use policy::*;
pub use rate_limiter::*;
