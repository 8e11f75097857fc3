use std::collections::HashSet;
use std::fmt::{self, Debug, Formatter};
use std::hash::Hash;

use super::{NoSuchElement, Sequence};

/// A Sequence that applies a function to every element, see [`Sequence::map`].
#[must_use = "sequences do nothing unless a terminal operation drives them"]
pub struct Map<S, F> {
    upstream: S,
    f: F,
}

impl<S, F> Map<S, F> {
    pub(crate) fn new(upstream: S, f: F) -> Map<S, F> {
        Map {
            upstream,
            f,
        }
    }
}

impl<B, S: Sequence, F: FnMut(S::Item) -> B> Sequence for Map<S, F> {
    type Item = B;

    fn has_next(&mut self) -> bool {
        self.upstream.has_next()
    }

    fn try_next(&mut self) -> Result<B, NoSuchElement> {
        self.upstream.try_next().map(&mut self.f)
    }
}

impl<S: Debug, F> Debug for Map<S, F> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Map").field("upstream", &self.upstream).finish_non_exhaustive()
    }
}

/// A Sequence that only yields elements matching a predicate, see [`Sequence::filter`].
///
/// Finding out whether there is a matching element means pulling it, so the element found by
/// `has_next` is held here until `try_next` takes it.
#[must_use = "sequences do nothing unless a terminal operation drives them"]
pub struct Filter<S: Sequence, P> {
    upstream: S,
    predicate: P,
    pending: Option<S::Item>,
}

impl<S: Sequence, P> Filter<S, P> {
    pub(crate) fn new(upstream: S, predicate: P) -> Filter<S, P> {
        Filter {
            upstream,
            predicate,
            pending: None,
        }
    }
}

impl<S: Sequence, P: FnMut(&S::Item) -> bool> Sequence for Filter<S, P> {
    type Item = S::Item;

    fn has_next(&mut self) -> bool {
        if self.pending.is_some() {
            return true;
        }
        while let Some(item) = self.upstream.pull() {
            if (self.predicate)(&item) {
                self.pending = Some(item);
                return true;
            }
        }
        false
    }

    fn try_next(&mut self) -> Result<S::Item, NoSuchElement> {
        if self.has_next() {
            self.pending.take().ok_or(NoSuchElement)
        } else {
            Err(NoSuchElement)
        }
    }
}

impl<S: Sequence + Debug, P> Debug for Filter<S, P>
where
    S::Item: Debug,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Filter")
            .field("upstream", &self.upstream)
            .field("pending", &self.pending)
            .finish_non_exhaustive()
    }
}

/// A Sequence that calls a function with every element as it passes through, see
/// [`Sequence::peek`].
#[must_use = "sequences do nothing unless a terminal operation drives them"]
pub struct Peek<S, F> {
    upstream: S,
    f: F,
}

impl<S, F> Peek<S, F> {
    pub(crate) fn new(upstream: S, f: F) -> Peek<S, F> {
        Peek {
            upstream,
            f,
        }
    }
}

impl<S: Sequence, F: FnMut(&S::Item)> Sequence for Peek<S, F> {
    type Item = S::Item;

    fn has_next(&mut self) -> bool {
        self.upstream.has_next()
    }

    fn try_next(&mut self) -> Result<S::Item, NoSuchElement> {
        let item = self.upstream.try_next()?;
        (self.f)(&item);
        Ok(item)
    }
}

impl<S: Debug, F> Debug for Peek<S, F> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Peek").field("upstream", &self.upstream).finish_non_exhaustive()
    }
}

/// A Sequence that skips elements whose key has already been seen, see
/// [`Sequence::distinct_by`] and [`Sequence::distinct`].
///
/// The set of seen keys is never pruned, it grows with every distinct element for as long as the
/// Sequence lives.
#[must_use = "sequences do nothing unless a terminal operation drives them"]
pub struct DistinctBy<S: Sequence, F, K> {
    upstream: S,
    key: F,
    seen: HashSet<K>,
    pending: Option<S::Item>,
}

impl<S: Sequence, F, K> DistinctBy<S, F, K> {
    pub(crate) fn new(upstream: S, key: F) -> DistinctBy<S, F, K> {
        DistinctBy {
            upstream,
            key,
            seen: HashSet::new(),
            pending: None,
        }
    }

    /// Returns the number of distinct keys seen so far.
    pub fn seen(&self) -> usize {
        self.seen.len()
    }
}

impl<S, F, K> Sequence for DistinctBy<S, F, K>
where
    S: Sequence,
    F: FnMut(&S::Item) -> K,
    K: Hash + Eq,
{
    type Item = S::Item;

    fn has_next(&mut self) -> bool {
        if self.pending.is_some() {
            return true;
        }
        while let Some(item) = self.upstream.pull() {
            if self.seen.insert((self.key)(&item)) {
                self.pending = Some(item);
                return true;
            }
        }
        false
    }

    fn try_next(&mut self) -> Result<S::Item, NoSuchElement> {
        if self.has_next() {
            self.pending.take().ok_or(NoSuchElement)
        } else {
            Err(NoSuchElement)
        }
    }
}

impl<S: Sequence + Debug, F, K: Debug> Debug for DistinctBy<S, F, K> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("DistinctBy")
            .field("upstream", &self.upstream)
            .field("seen", &self.seen)
            .finish_non_exhaustive()
    }
}
