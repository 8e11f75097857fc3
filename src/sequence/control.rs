use std::fmt::{self, Debug, Formatter};

use super::{NoSuchElement, Sequence};

/// A Sequence over the elements at positions `from..to` of its upstream, see
/// [`Sequence::slice`], [`Sequence::take`] and [`Sequence::drop`].
///
/// The position is a running count of elements pulled from the upstream. Elements before `from`
/// are pulled and discarded rather than counted past, since the upstream can't skip on its own.
#[derive(Debug, Clone)]
#[must_use = "sequences do nothing unless a terminal operation drives them"]
pub struct Slice<S> {
    upstream: S,
    from: usize,
    // None for an open end, as with drop.
    to: Option<usize>,
    index: usize,
}

impl<S> Slice<S> {
    pub(crate) fn new(upstream: S, from: usize, to: Option<usize>) -> Slice<S> {
        Slice {
            upstream,
            from,
            to,
            index: 0,
        }
    }

    const fn before_end(&self) -> bool {
        match self.to {
            Some(to) => self.index < to,
            None => true,
        }
    }
}

impl<S: Sequence> Sequence for Slice<S> {
    type Item = S::Item;

    fn has_next(&mut self) -> bool {
        while self.index < self.from {
            if self.upstream.pull().is_none() {
                return false;
            }
            self.index += 1;
        }
        self.before_end() && self.upstream.has_next()
    }

    fn try_next(&mut self) -> Result<S::Item, NoSuchElement> {
        if !self.has_next() {
            return Err(NoSuchElement);
        }
        let item = self.upstream.try_next()?;
        self.index += 1;
        Ok(item)
    }
}

/// A Sequence that discards elements while a predicate holds, see [`Sequence::drop_while`].
#[must_use = "sequences do nothing unless a terminal operation drives them"]
pub struct DropWhile<S: Sequence, P> {
    upstream: S,
    predicate: P,
    dropping: bool,
    // The first element that failed the predicate, waiting to be yielded.
    pending: Option<S::Item>,
}

impl<S: Sequence, P> DropWhile<S, P> {
    pub(crate) fn new(upstream: S, predicate: P) -> DropWhile<S, P> {
        DropWhile {
            upstream,
            predicate,
            dropping: true,
            pending: None,
        }
    }
}

impl<S: Sequence, P: FnMut(&S::Item) -> bool> Sequence for DropWhile<S, P> {
    type Item = S::Item;

    fn has_next(&mut self) -> bool {
        if self.dropping {
            while let Some(item) = self.upstream.pull() {
                if !(self.predicate)(&item) {
                    self.pending = Some(item);
                    break;
                }
            }
            self.dropping = false;
        }
        self.pending.is_some() || self.upstream.has_next()
    }

    fn try_next(&mut self) -> Result<S::Item, NoSuchElement> {
        if !self.has_next() {
            return Err(NoSuchElement);
        }
        match self.pending.take() {
            Some(item) => Ok(item),
            None => self.upstream.try_next(),
        }
    }
}

impl<S: Sequence + Debug, P> Debug for DropWhile<S, P>
where
    S::Item: Debug,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("DropWhile")
            .field("upstream", &self.upstream)
            .field("dropping", &self.dropping)
            .field("pending", &self.pending)
            .finish_non_exhaustive()
    }
}

/// A Sequence that yields elements while a predicate holds, see [`Sequence::take_while`].
///
/// The element that ends the Sequence has to be pulled to be tested, and is discarded. The
/// predicate is never consulted again after it first fails.
#[must_use = "sequences do nothing unless a terminal operation drives them"]
pub struct TakeWhile<S: Sequence, P> {
    upstream: S,
    predicate: P,
    taking: bool,
    pending: Option<S::Item>,
}

impl<S: Sequence, P> TakeWhile<S, P> {
    pub(crate) fn new(upstream: S, predicate: P) -> TakeWhile<S, P> {
        TakeWhile {
            upstream,
            predicate,
            taking: true,
            pending: None,
        }
    }
}

impl<S: Sequence, P: FnMut(&S::Item) -> bool> Sequence for TakeWhile<S, P> {
    type Item = S::Item;

    fn has_next(&mut self) -> bool {
        if !self.taking {
            return false;
        }
        if self.pending.is_some() {
            return true;
        }
        match self.upstream.pull() {
            Some(item) if (self.predicate)(&item) => {
                self.pending = Some(item);
                true
            },
            Some(_) => {
                self.taking = false;
                false
            },
            None => false,
        }
    }

    fn try_next(&mut self) -> Result<S::Item, NoSuchElement> {
        if self.has_next() {
            self.pending.take().ok_or(NoSuchElement)
        } else {
            Err(NoSuchElement)
        }
    }
}

impl<S: Sequence + Debug, P> Debug for TakeWhile<S, P>
where
    S::Item: Debug,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("TakeWhile")
            .field("upstream", &self.upstream)
            .field("taking", &self.taking)
            .field("pending", &self.pending)
            .finish_non_exhaustive()
    }
}

const MAX_PREALLOCATED_GROUP: usize = 1024;

/// A Sequence of consecutive fixed-size groups, see [`Sequence::buffered`].
///
/// A group is only pulled together when it is asked for. The final group holds whatever was left
/// and may be shorter than the others, but is never empty.
#[derive(Debug, Clone)]
#[must_use = "sequences do nothing unless a terminal operation drives them"]
pub struct Buffered<S> {
    upstream: S,
    size: usize,
}

impl<S> Buffered<S> {
    // The size has already been checked to be non-zero by the caller.
    pub(crate) const fn new(upstream: S, size: usize) -> Buffered<S> {
        Buffered {
            upstream,
            size,
        }
    }

    /// Returns the size of every group except, possibly, the last.
    pub const fn size(&self) -> usize {
        self.size
    }
}

impl<S: Sequence> Sequence for Buffered<S> {
    type Item = Vec<S::Item>;

    fn has_next(&mut self) -> bool {
        self.upstream.has_next()
    }

    fn try_next(&mut self) -> Result<Vec<S::Item>, NoSuchElement> {
        if !self.upstream.has_next() {
            return Err(NoSuchElement);
        }
        // The size is only an upper bound, the upstream may end long before it.
        let mut group = Vec::with_capacity(self.size.min(MAX_PREALLOCATED_GROUP));
        while group.len() < self.size
            && let Some(item) = self.upstream.pull()
        {
            group.push(item);
        }
        Ok(group)
    }
}

/// A Sequence that yields the elements of a Sequence of Sequences in turn, see
/// [`Sequence::flat_map`], [`Sequence::flatten`] and [`concat_all`](super::concat_all).
#[must_use = "sequences do nothing unless a terminal operation drives them"]
pub struct FlatMap<S, F, U> {
    outer: S,
    f: F,
    current: Option<U>,
}

/// A flattening Sequence, see [`Sequence::flatten`].
pub type Flatten<S> = FlatMap<
    S,
    fn(<S as Sequence>::Item) -> <S as Sequence>::Item,
    <S as Sequence>::Item,
>;

impl<S, F, U> FlatMap<S, F, U> {
    pub(crate) fn new(outer: S, f: F) -> FlatMap<S, F, U> {
        FlatMap {
            outer,
            f,
            current: None,
        }
    }
}

impl<S, F, U> Sequence for FlatMap<S, F, U>
where
    S: Sequence,
    U: Sequence,
    F: FnMut(S::Item) -> U,
{
    type Item = U::Item;

    fn has_next(&mut self) -> bool {
        loop {
            if let Some(current) = &mut self.current
                && current.has_next()
            {
                return true;
            }
            match self.outer.pull() {
                Some(item) => self.current = Some((self.f)(item)),
                None => {
                    // Release the last inner Sequence, it has nothing left.
                    self.current = None;
                    return false;
                },
            }
        }
    }

    fn try_next(&mut self) -> Result<U::Item, NoSuchElement> {
        if !self.has_next() {
            return Err(NoSuchElement);
        }
        match &mut self.current {
            Some(current) => current.try_next(),
            None => Err(NoSuchElement),
        }
    }
}

impl<S: Debug, F, U: Debug> Debug for FlatMap<S, F, U> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlatMap")
            .field("outer", &self.outer)
            .field("current", &self.current)
            .finish_non_exhaustive()
    }
}

/// A Sequence that yields every element of one Sequence followed by every element of another,
/// see [`Sequence::concat`].
#[derive(Debug, Clone)]
#[must_use = "sequences do nothing unless a terminal operation drives them"]
pub struct Concat<A, B> {
    first: A,
    second: B,
}

impl<A, B> Concat<A, B> {
    pub(crate) const fn new(first: A, second: B) -> Concat<A, B> {
        Concat {
            first,
            second,
        }
    }
}

impl<A, B> Sequence for Concat<A, B>
where
    A: Sequence,
    B: Sequence<Item = A::Item>,
{
    type Item = A::Item;

    fn has_next(&mut self) -> bool {
        self.first.has_next() || self.second.has_next()
    }

    fn try_next(&mut self) -> Result<A::Item, NoSuchElement> {
        if self.first.has_next() {
            self.first.try_next()
        } else {
            self.second.try_next()
        }
    }
}

/// A Sequence of pairs taken from two Sequences in step, see [`Sequence::zip`].
#[derive(Debug, Clone)]
#[must_use = "sequences do nothing unless a terminal operation drives them"]
pub struct Zip<A, B> {
    left: A,
    right: B,
}

impl<A, B> Zip<A, B> {
    pub(crate) const fn new(left: A, right: B) -> Zip<A, B> {
        Zip {
            left,
            right,
        }
    }
}

impl<A: Sequence, B: Sequence> Sequence for Zip<A, B> {
    type Item = (A::Item, B::Item);

    fn has_next(&mut self) -> bool {
        self.left.has_next() && self.right.has_next()
    }

    fn try_next(&mut self) -> Result<(A::Item, B::Item), NoSuchElement> {
        if !self.has_next() {
            return Err(NoSuchElement);
        }
        Ok((self.left.try_next()?, self.right.try_next()?))
    }
}
