use derive_more::{Display, Error};

/// Returned by [`try_next`](super::Sequence::try_next) when a sequence has no more elements.
/// Asking an exhausted sequence for another element is a logic error on the caller's side, which
/// is why [`next`](super::Sequence::next) panics with this message instead of returning it.
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
#[display("no such element: sequence is exhausted")]
pub struct NoSuchElement;

#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
#[display("chunk size must be greater than 0")]
pub struct ZeroChunkSize;

#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
#[display("slice start {from} is greater than slice end {to}")]
pub struct InvalidSlice {
    pub from: usize,
    pub to: usize,
}
