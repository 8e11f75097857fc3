use std::iter::FusedIterator;

use super::{IterSource, Sequence, from_iter};

/// A type-erased Sequence, see [`Sequence::boxed`].
pub type BoxedSequence<'a, T> = Box<dyn Sequence<Item = T> + 'a>;

/// An [`Iterator`] over the elements of a Sequence, see [`Sequence::into_iter`].
///
/// This lets a Sequence be used with `for` loops and the standard iterator adapters. Nothing is
/// buffered: each call to `next` is a `has_next` followed by a `try_next` on the Sequence.
#[derive(Debug, Clone)]
pub struct IntoIter<S> {
    sequence: S,
}

impl<S> IntoIter<S> {
    pub(crate) const fn new(sequence: S) -> IntoIter<S> {
        IntoIter {
            sequence,
        }
    }

    /// Returns the underlying Sequence, with whatever elements haven't been iterated over yet.
    pub fn into_inner(self) -> S {
        self.sequence
    }
}

impl<S: Sequence> Iterator for IntoIter<S> {
    type Item = S::Item;

    fn next(&mut self) -> Option<Self::Item> {
        self.sequence.pull()
    }
}

// A Sequence stays exhausted once it reports that it is.
impl<S: Sequence> FusedIterator for IntoIter<S> {}

/// Conversion into a [`Sequence`], implemented for everything that implements [`IntoIterator`].
///
/// # Examples
/// ```
/// # use seqkit::sequence::{IntoSequence, Sequence};
/// let total = vec![3, 1, 2].into_sequence().sorted().reduce(String::new(), |mut acc, i| {
///     acc.push_str(&i.to_string());
///     acc
/// });
/// assert_eq!(total, "123");
/// ```
pub trait IntoSequence {
    type Item;

    type IntoSeq: Sequence<Item = Self::Item>;

    fn into_sequence(self) -> Self::IntoSeq;
}

impl<I: IntoIterator> IntoSequence for I {
    type Item = I::Item;

    type IntoSeq = IterSource<I::IntoIter>;

    fn into_sequence(self) -> Self::IntoSeq {
        from_iter(self)
    }
}
