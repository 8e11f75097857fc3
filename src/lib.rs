//! This crate is a collection of the small utilities I keep rewriting on every project: a lazy,
//! pull-based [`Sequence`](sequence::Sequence) abstraction, lazily initialized values, a rate
//! limiter, a retry helper and a `host:port` parser.
//!
//! # Purpose
//! Most of these exist somewhere on crates.io already. Writing them myself is the point: each one
//! is small enough to understand completely, but still has enough edge cases (idempotent
//! availability checks, double-checked initialization, token refill math) to be worth getting
//! right.
//!
//! # Sequences
//! The [`sequence`] module is the biggest part of the crate. A Sequence is like an [`Iterator`],
//! except that availability and production are two separate operations:
//! [`has_next`](sequence::Sequence::has_next) can be asked any number of times without consuming
//! anything, and [`try_next`](sequence::Sequence::try_next) produces the element. Combinators wrap
//! their upstream without touching it, so nothing is pulled until a terminal operation asks for it.
//!
//! # Error Handling
//! Like the collections in my other crates, the ergonomic entry points panic on misuse (calling
//! `next` on an exhausted sequence, asking for chunks of size zero) and document this under a
//! `# Panics` heading. Each of them has a `try_` counterpart that returns a strongly typed error
//! instead. Error types are mostly ZSTs or small structs deriving [`Error`](std::error::Error)
//! through `derive_more`.
//!
//! # Features
//! Every module is behind a feature of the same name, all enabled by default. `lazy` and `rate`
//! pull in `parking_lot` for their locks. The `tracing` feature turns on structured logging of
//! materialization, cache misses, rate limiter waits and retries; without it the logging calls
//! compile to nothing.
#![warn(clippy::missing_safety_doc)]
#![warn(clippy::undocumented_unsafe_blocks)]
#![warn(clippy::missing_panics_doc)]
#![warn(clippy::unwrap_used)]
#![allow(clippy::module_inception)]

#[cfg(feature = "lazy")]
pub mod lazy;
#[cfg(feature = "net")]
pub mod net;
#[cfg(feature = "rate")]
pub mod rate;
#[cfg(feature = "retry")]
pub mod retry;
#[cfg(feature = "sequence")]
pub mod sequence;

pub(crate) mod util;
