//! A module containing [`Sequence`], its sources, combinators and terminal operations.
//!
//! A Sequence is a single-pass, pull-based source of elements with a two-step protocol: first ask
//! whether there is another element ([`has_next`](Sequence::has_next)), then take it
//! ([`try_next`](Sequence::try_next)). Combinators are lazy and each one owns the Sequence it
//! wraps, so a pipeline is just a chain of nested stages that only does work when a terminal
//! operation pulls on the outermost one.
//!
//! # Sources
//! Sequences are usually created with one of the functions in this module:
//! - [`empty`], [`once`] and [`of`] for fixed values.
//! - [`from_list`], [`from_array`] and [`from_iter`] to replay existing collections or iterators.
//! - [`generate`], [`generate_indexed`] and [`iterate`] for infinite generated Sequences.
//! - [`concat_all`] to chain a collection of Sequences together.
//!
//! Anything that implements [`IntoIterator`] can also be converted with
//! [`into_sequence`](IntoSequence::into_sequence), and any Sequence can be turned back into an
//! [`Iterator`] with [`into_iter`](Sequence::into_iter).
//!
//! # Terminal Operations
//! Terminal operations consume the Sequence. Most are plain scans, some short-circuit
//! ([`find`](Sequence::find), [`any_match`](Sequence::any_match), [`all_match`](Sequence::all_match),
//! [`first`](Sequence::first)). The general one is [`collect`](Sequence::collect), which drives a
//! [`CollectConsumer`]; the [`collect`] module contains the built-in consumers.

pub mod collect;

mod control;
mod error;
mod group;
mod interop;
mod sequence;
mod sorted;
mod source;
mod transform;

pub use collect::CollectConsumer;
pub use control::*;
pub use error::*;
pub use group::*;
pub use interop::*;
pub use sequence::*;
pub use sorted::*;
pub use source::*;
pub use transform::*;
