use derive_more::{Display, Error};

/// An error returned when the initializer of a [`Lazy`](super::Lazy) panicked, so there is no
/// value and nothing left to compute it with.
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
#[display("lazy value poisoned: its initializer panicked")]
pub struct PoisonedLazy;
