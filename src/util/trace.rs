//! Logging shims. With the `tracing` feature these are the real `tracing` macros, without it they
//! expand to nothing, so call sites never need their own `cfg`.
//!
//! The no-op macro is exported under a private name and imported by path, a textually scoped
//! `macro_rules! warn` would be ambiguous with the builtin `#[warn]` attribute.

#[cfg(feature = "tracing")]
#[allow(unused_imports)]
pub(crate) use tracing::{debug, trace, warn};

#[cfg(not(feature = "tracing"))]
#[doc(hidden)]
#[macro_export]
macro_rules! __seqkit_noop_log {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
#[allow(unused_imports)]
pub(crate) use crate::{
    __seqkit_noop_log as debug, __seqkit_noop_log as trace, __seqkit_noop_log as warn,
};

#[cfg(test)]
mod tests {
    use super::{debug, trace, warn};

    #[test]
    fn test_shims_accept_tracing_syntax() {
        trace!(len = 3_usize, "materialized sequence for sorting");
        debug!(type_name = std::any::type_name::<u8>(), "initializing lazy value");
        debug!(requested = 2_u32, wait_ms = 5_u64, "rate limiter waiting for tokens");
        warn!(attempt = 1_u32, error = %"refused", "attempt failed, retrying");
    }
}
