use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use super::collect::{self, CollectConsumer};
use super::{
    BoxedSequence, Buffered, Concat, DistinctBy, DropWhile, Filter, FlatMap, Flatten, GroupMap,
    IntoIter, InvalidSlice, Map, NoSuchElement, PartitionResult, Peek, Slice, Sorted, TakeWhile,
    ZeroChunkSize, Zip,
};
use crate::util::option::OptionExtension;
use crate::util::result::ResultExtension;
use crate::util::trace::trace;

/// A single-pass, pull-based, lazy source of elements.
///
/// Implementors only provide two operations: [`has_next`](Sequence::has_next), which reports
/// whether another element is available, and [`try_next`](Sequence::try_next), which produces it.
/// Everything else on this trait is built on those two.
///
/// # Contract
/// - `has_next` doesn't consume anything observable. Calling it repeatedly without a `try_next` in
///   between always returns the same answer, even if the implementation had to pull from its
///   upstream to find out.
/// - `try_next` returns [`Err(NoSuchElement)`](NoSuchElement) whenever `has_next` would return
///   false.
/// - Once a Sequence reports that it is exhausted, it stays exhausted.
///
/// # Laziness
/// Combinators like [`map`](Sequence::map) and [`filter`](Sequence::filter) take ownership of the
/// Sequence they are called on and wrap it, without pulling anything. Work only happens when a
/// terminal operation (e.g. [`to_list`](Sequence::to_list), [`reduce`](Sequence::reduce),
/// [`for_each`](Sequence::for_each)) drives iteration, and only as far as it needs to. The
/// exceptions are [`sorted_by`](Sequence::sorted_by) and the grouping operations, which have to see
/// every element before they can produce anything.
///
/// Since every stage owns its upstream, a Sequence can't be shared between two consumers. To drive
/// a Sequence partially and keep the rest, use it through a mutable reference, which is itself a
/// Sequence.
///
/// # Examples
/// ```
/// # use seqkit::sequence::{self, Sequence};
/// let evens = sequence::from_iter(1..=10)
///     .filter(|i| i % 2 == 0)
///     .map(|i| i * 10)
///     .to_list();
/// assert_eq!(evens, [20, 40, 60, 80, 100]);
/// ```
#[must_use = "sequences do nothing unless a terminal operation drives them"]
pub trait Sequence {
    type Item;

    /// Returns true if another element can be produced by [`try_next`](Sequence::try_next).
    fn has_next(&mut self) -> bool;

    /// Produces and consumes the next element, or returns [`NoSuchElement`] if the Sequence is
    /// exhausted.
    fn try_next(&mut self) -> Result<Self::Item, NoSuchElement>;

    /// Produces and consumes the next element.
    ///
    /// # Panics
    /// Panics if the Sequence is exhausted. Use [`try_next`](Sequence::try_next) or
    /// [`pull`](Sequence::pull) where running out is expected.
    ///
    /// # Examples
    /// ```
    /// # use seqkit::sequence::{self, Sequence};
    /// let mut seq = sequence::once(5);
    /// assert_eq!(seq.next(), 5);
    /// assert!(!seq.has_next());
    /// ```
    #[track_caller]
    fn next(&mut self) -> Self::Item {
        self.try_next().throw()
    }

    /// Produces the next element if there is one. This is the same as checking
    /// [`has_next`](Sequence::has_next) before calling [`try_next`](Sequence::try_next).
    fn pull(&mut self) -> Option<Self::Item> {
        if self.has_next() {
            self.try_next().ok()
        } else {
            None
        }
    }

    /// Creates a Sequence that applies `f` to every element as it is pulled.
    fn map<B, F>(self, f: F) -> Map<Self, F>
    where
        Self: Sized,
        F: FnMut(Self::Item) -> B,
    {
        Map::new(self, f)
    }

    /// Creates a Sequence that only yields the elements that match `predicate`.
    fn filter<P>(self, predicate: P) -> Filter<Self, P>
    where
        Self: Sized,
        P: FnMut(&Self::Item) -> bool,
    {
        Filter::new(self, predicate)
    }

    /// Creates a Sequence that calls `f` with a reference to each element before passing it on
    /// unchanged.
    fn peek<F>(self, f: F) -> Peek<Self, F>
    where
        Self: Sized,
        F: FnMut(&Self::Item),
    {
        Peek::new(self, f)
    }

    /// Creates a Sequence that skips elements equal to one that has already been yielded.
    ///
    /// Every distinct element is cloned into a set that lives as long as the Sequence.
    fn distinct(self) -> DistinctBy<Self, fn(&Self::Item) -> Self::Item, Self::Item>
    where
        Self: Sized,
        Self::Item: Hash + Eq + Clone,
    {
        let key: fn(&Self::Item) -> Self::Item = <Self::Item as Clone>::clone;
        DistinctBy::new(self, key)
    }

    /// Creates a Sequence that skips elements whose key, as computed by `key`, has already been
    /// seen.
    ///
    /// # Examples
    /// ```
    /// # use seqkit::sequence::{self, Sequence};
    /// let words = sequence::of(vec!["apple", "avocado", "banana", "blueberry", "cherry"])
    ///     .distinct_by(|word| word.chars().next())
    ///     .to_list();
    /// assert_eq!(words, ["apple", "banana", "cherry"]);
    /// ```
    fn distinct_by<K, F>(self, key: F) -> DistinctBy<Self, F, K>
    where
        Self: Sized,
        K: Hash + Eq,
        F: FnMut(&Self::Item) -> K,
    {
        DistinctBy::new(self, key)
    }

    /// Creates a Sequence over the elements at positions `from..to`. Elements before `from` are
    /// pulled and discarded on the first availability check.
    ///
    /// # Panics
    /// Panics if `from` is greater than `to`.
    #[track_caller]
    fn slice(self, from: usize, to: usize) -> Slice<Self>
    where
        Self: Sized,
    {
        self.try_slice(from, to).throw()
    }

    /// Creates a Sequence over the elements at positions `from..to`, or returns an error if the
    /// range is inverted.
    fn try_slice(self, from: usize, to: usize) -> Result<Slice<Self>, InvalidSlice>
    where
        Self: Sized,
    {
        if from > to {
            return Err(InvalidSlice { from, to });
        }
        Ok(Slice::new(self, from, Some(to)))
    }

    /// Creates a Sequence that yields at most the first `n` elements.
    fn take(self, n: usize) -> Slice<Self>
    where
        Self: Sized,
    {
        Slice::new(self, 0, Some(n))
    }

    /// Creates a Sequence that discards the first `n` elements and yields the rest.
    fn drop(self, n: usize) -> Slice<Self>
    where
        Self: Sized,
    {
        Slice::new(self, n, None)
    }

    /// Creates a Sequence that discards elements while `predicate` holds, then yields everything
    /// from the first element that fails it, including that element. The predicate isn't
    /// consulted again after that.
    fn drop_while<P>(self, predicate: P) -> DropWhile<Self, P>
    where
        Self: Sized,
        P: FnMut(&Self::Item) -> bool,
    {
        DropWhile::new(self, predicate)
    }

    /// Creates a Sequence that yields elements while `predicate` holds. The first element that
    /// fails it is consumed and discarded, and the Sequence is exhausted from then on.
    ///
    /// # Examples
    /// ```
    /// # use seqkit::sequence::{self, Sequence};
    /// let mut source = sequence::of(vec![1, 2, 3, 4, 1]);
    /// assert_eq!((&mut source).take_while(|i| *i <= 2).to_list(), [1, 2]);
    /// // 3 was consumed to find the end.
    /// assert_eq!(source.to_list(), [4, 1]);
    /// ```
    fn take_while<P>(self, predicate: P) -> TakeWhile<Self, P>
    where
        Self: Sized,
        P: FnMut(&Self::Item) -> bool,
    {
        TakeWhile::new(self, predicate)
    }

    /// Creates a Sequence of consecutive groups of `size` elements. The last group may be shorter
    /// if the upstream runs out.
    ///
    /// # Panics
    /// Panics if `size` is 0.
    ///
    /// # Examples
    /// ```
    /// # use seqkit::sequence::{self, Sequence};
    /// let groups = sequence::from_iter(1..=5).buffered(2).to_list();
    /// assert_eq!(groups, [vec![1, 2], vec![3, 4], vec![5]]);
    /// ```
    #[track_caller]
    fn buffered(self, size: usize) -> Buffered<Self>
    where
        Self: Sized,
    {
        self.try_buffered(size).throw()
    }

    /// The same as [`buffered`](Sequence::buffered), but returns an error for a size of 0.
    fn try_buffered(self, size: usize) -> Result<Buffered<Self>, ZeroChunkSize>
    where
        Self: Sized,
    {
        if size == 0 {
            return Err(ZeroChunkSize);
        }
        Ok(Buffered::new(self, size))
    }

    /// An alias of [`buffered`](Sequence::buffered).
    ///
    /// # Panics
    /// Panics if `size` is 0.
    #[track_caller]
    fn chunked(self, size: usize) -> Buffered<Self>
    where
        Self: Sized,
    {
        self.buffered(size)
    }

    /// Creates a Sequence that maps each element to a Sequence and yields the elements of each of
    /// those in turn. Empty inner Sequences are skipped over.
    fn flat_map<U, F>(self, f: F) -> FlatMap<Self, F, U>
    where
        Self: Sized,
        U: Sequence,
        F: FnMut(Self::Item) -> U,
    {
        FlatMap::new(self, f)
    }

    /// Creates a Sequence that yields the elements of each inner Sequence in turn.
    fn flatten(self) -> Flatten<Self>
    where
        Self: Sized,
        Self::Item: Sequence,
    {
        let identity: fn(Self::Item) -> Self::Item = std::convert::identity;
        FlatMap::new(self, identity)
    }

    /// Creates a Sequence that yields every element of `self` followed by every element of
    /// `other`.
    fn concat<S>(self, other: S) -> Concat<Self, S>
    where
        Self: Sized,
        S: Sequence<Item = Self::Item>,
    {
        Concat::new(self, other)
    }

    /// Creates a Sequence of pairs, taking one element from each side at a time. It is exhausted
    /// as soon as either side is, and anything left on the longer side is never pulled.
    fn zip<S>(self, other: S) -> Zip<Self, S>
    where
        Self: Sized,
        S: Sequence,
    {
        Zip::new(self, other)
    }

    /// Creates a Sequence that yields the elements of `self` in the order defined by `compare`.
    ///
    /// Nothing is pulled until the first availability check, at which point the upstream is
    /// drained, stable sorted and dropped.
    fn sorted_by<F>(self, compare: F) -> Sorted<Self, F>
    where
        Self: Sized,
        F: FnMut(&Self::Item, &Self::Item) -> Ordering,
    {
        Sorted::new(self, compare)
    }

    /// Creates a Sequence that yields the elements of `self` in their natural order.
    fn sorted(self) -> Sorted<Self, fn(&Self::Item, &Self::Item) -> Ordering>
    where
        Self: Sized,
        Self::Item: Ord,
    {
        let compare: fn(&Self::Item, &Self::Item) -> Ordering = <Self::Item as Ord>::cmp;
        Sorted::new(self, compare)
    }

    /// Sorts the remaining elements by the key that `f` extracts from them. The key is extracted
    /// again for every comparison, so it should be cheap.
    fn sorted_by_key<K, F>(
        self,
        mut f: F,
    ) -> Sorted<Self, impl FnMut(&Self::Item, &Self::Item) -> Ordering>
    where
        Self: Sized,
        K: Ord,
        F: FnMut(&Self::Item) -> K,
    {
        self.sorted_by(move |a, b| f(a).cmp(&f(b)))
    }

    /// Calls `f` with every remaining element.
    fn for_each<F>(mut self, mut f: F)
    where
        Self: Sized,
        F: FnMut(Self::Item),
    {
        while let Some(item) = self.pull() {
            f(item);
        }
    }

    /// Folds every remaining element into an accumulator, starting with `initial` and going left to
    /// right. An empty Sequence returns `initial` unchanged.
    ///
    /// # Examples
    /// ```
    /// # use seqkit::sequence::{self, Sequence};
    /// assert_eq!(sequence::from_iter(1..=4).reduce(0, |acc, i| acc + i), 10);
    /// assert_eq!(sequence::empty::<i32>().reduce(7, |acc, i| acc + i), 7);
    /// ```
    fn reduce<R, F>(mut self, initial: R, mut combine: F) -> R
    where
        Self: Sized,
        F: FnMut(R, Self::Item) -> R,
    {
        let mut acc = initial;
        while let Some(item) = self.pull() {
            acc = combine(acc, item);
        }
        acc
    }

    /// Feeds every remaining element to `consumer` and then finishes it, returning its result.
    ///
    /// This is the general terminal operation that the `to_*`, `max_by` and `min_by` methods are
    /// built on. See [`collect`](super::collect) for the built-in consumers.
    fn collect<C>(mut self, mut consumer: C) -> C::Output
    where
        Self: Sized,
        C: CollectConsumer<Self::Item>,
    {
        while let Some(item) = self.pull() {
            consumer.accept(item);
        }
        consumer.finish()
    }

    /// Collects every remaining element into a [`Vec`], in order.
    fn to_list(self) -> Vec<Self::Item>
    where
        Self: Sized,
    {
        self.collect(collect::to_list())
    }

    /// Collects every remaining element into a [`HashSet`].
    fn to_set(self) -> HashSet<Self::Item>
    where
        Self: Sized,
        Self::Item: Hash + Eq,
    {
        self.collect(collect::to_set())
    }

    /// Collects every remaining element into a [`HashMap`], using `key` and `value` to split each
    /// element. If two elements produce the same key, the later value replaces the earlier one.
    fn to_map<K, V, KF, VF>(self, key: KF, value: VF) -> HashMap<K, V>
    where
        Self: Sized,
        K: Hash + Eq,
        KF: FnMut(&Self::Item) -> K,
        VF: FnMut(Self::Item) -> V,
    {
        self.collect(collect::to_map(key, value))
    }

    /// Groups every remaining element by `key` and folds each group separately. Each group's
    /// accumulator starts as a fresh value from `init`.
    ///
    /// Groups are ordered by the first occurrence of their key, and elements within a group are
    /// folded in encounter order.
    fn group_and_reduce<K, R, KF, I, F>(
        mut self,
        mut key: KF,
        mut init: I,
        mut combine: F,
    ) -> GroupMap<K, R>
    where
        Self: Sized,
        K: Hash + Eq,
        KF: FnMut(&Self::Item) -> K,
        I: FnMut() -> R,
        F: FnMut(R, Self::Item) -> R,
    {
        let mut groups: GroupMap<K, Option<R>> = GroupMap::new();
        while let Some(item) = self.pull() {
            let slot = groups.get_or_insert_with(key(&item), || Some(init()));
            let acc = slot.take().unreachable();
            *slot = Some(combine(acc, item));
        }
        trace!(groups = groups.len(), "reduced sequence into groups");
        groups.map_values(|acc| acc.unreachable())
    }

    /// Groups every remaining element by `key`, feeding each group to its own consumer created by
    /// `factory`. Each consumer is finished once, after the Sequence is exhausted.
    fn group_and_collect<K, C, KF, CF>(mut self, mut key: KF, mut factory: CF) -> GroupMap<K, C::Output>
    where
        Self: Sized,
        K: Hash + Eq,
        KF: FnMut(&Self::Item) -> K,
        C: CollectConsumer<Self::Item>,
        CF: FnMut() -> C,
    {
        let mut groups: GroupMap<K, C> = GroupMap::new();
        while let Some(item) = self.pull() {
            groups.get_or_insert_with(key(&item), &mut factory).accept(item);
        }
        trace!(groups = groups.len(), "collected sequence into groups");
        groups.map_values(|consumer| consumer.finish())
    }

    /// Groups every remaining element into lists by `key`.
    ///
    /// # Examples
    /// ```
    /// # use seqkit::sequence::{self, Sequence};
    /// let groups = sequence::from_iter(1..=4).group_to_list(|i| i % 2);
    /// assert_eq!(groups.keys().collect::<Vec<_>>(), [&1, &0]);
    /// assert_eq!(groups[&0], [2, 4]);
    /// assert_eq!(groups[&1], [1, 3]);
    /// ```
    fn group_to_list<K, KF>(self, key: KF) -> GroupMap<K, Vec<Self::Item>>
    where
        Self: Sized,
        K: Hash + Eq,
        KF: FnMut(&Self::Item) -> K,
    {
        self.group_and_collect(key, collect::to_list)
    }

    /// Splits every remaining element into two groups by `predicate` and folds each separately,
    /// starting each accumulator from a fresh value from `init`.
    fn partition_and_reduce<R, P, I, F>(
        mut self,
        mut predicate: P,
        mut init: I,
        mut combine: F,
    ) -> PartitionResult<R>
    where
        Self: Sized,
        P: FnMut(&Self::Item) -> bool,
        I: FnMut() -> R,
        F: FnMut(R, Self::Item) -> R,
    {
        let mut matched = init();
        let mut missed = init();
        while let Some(item) = self.pull() {
            if predicate(&item) {
                matched = combine(matched, item);
            } else {
                missed = combine(missed, item);
            }
        }
        PartitionResult::new(matched, missed)
    }

    /// Splits every remaining element into two groups by `predicate`, feeding each group to its
    /// own consumer created by `factory`.
    fn partition_and_collect<C, P, CF>(mut self, mut predicate: P, mut factory: CF) -> PartitionResult<C::Output>
    where
        Self: Sized,
        P: FnMut(&Self::Item) -> bool,
        C: CollectConsumer<Self::Item>,
        CF: FnMut() -> C,
    {
        let mut matched = factory();
        let mut missed = factory();
        while let Some(item) = self.pull() {
            if predicate(&item) {
                matched.accept(item);
            } else {
                missed.accept(item);
            }
        }
        PartitionResult::new(matched.finish(), missed.finish())
    }

    /// Splits every remaining element into two lists by `predicate`.
    ///
    /// # Examples
    /// ```
    /// # use seqkit::sequence::{self, Sequence};
    /// let result = sequence::from_iter(1..=4).partition_to_list(|i| i % 2 == 0);
    /// assert_eq!(result.matched(), &[2, 4]);
    /// assert_eq!(result.missed(), &[1, 3]);
    /// ```
    fn partition_to_list<P>(self, predicate: P) -> PartitionResult<Vec<Self::Item>>
    where
        Self: Sized,
        P: FnMut(&Self::Item) -> bool,
    {
        self.partition_and_collect(predicate, collect::to_list)
    }

    /// Returns the greatest element according to `compare`. If several elements are equally
    /// greatest, the first of them is returned.
    fn max_by<F>(self, compare: F) -> Option<Self::Item>
    where
        Self: Sized,
        F: FnMut(&Self::Item, &Self::Item) -> Ordering,
    {
        self.collect(collect::max_by(compare))
    }

    /// Returns the least element according to `compare`. If several elements are equally least,
    /// the first of them is returned.
    fn min_by<F>(self, compare: F) -> Option<Self::Item>
    where
        Self: Sized,
        F: FnMut(&Self::Item, &Self::Item) -> Ordering,
    {
        self.collect(collect::min_by(compare))
    }

    /// Returns the greatest element by its natural order.
    fn max(self) -> Option<Self::Item>
    where
        Self: Sized,
        Self::Item: Ord,
    {
        self.max_by(<Self::Item as Ord>::cmp)
    }

    /// Returns the least element by its natural order.
    fn min(self) -> Option<Self::Item>
    where
        Self: Sized,
        Self::Item: Ord,
    {
        self.min_by(<Self::Item as Ord>::cmp)
    }

    /// Returns the next element, if any, without pulling anything further.
    fn first(mut self) -> Option<Self::Item>
    where
        Self: Sized,
    {
        self.pull()
    }

    /// Drains the Sequence and returns its final element.
    fn last(mut self) -> Option<Self::Item>
    where
        Self: Sized,
    {
        let mut last = None;
        while let Some(item) = self.pull() {
            last = Some(item);
        }
        last
    }

    /// Returns the element at `index` (counting from the current position), pulling and discarding
    /// everything before it.
    fn at(self, index: usize) -> Option<Self::Item>
    where
        Self: Sized,
    {
        self.drop(index).first()
    }

    /// Returns the first element that matches `predicate`, stopping as soon as it is found.
    fn find<P>(mut self, mut predicate: P) -> Option<Self::Item>
    where
        Self: Sized,
        P: FnMut(&Self::Item) -> bool,
    {
        while let Some(item) = self.pull() {
            if predicate(&item) {
                return Some(item);
            }
        }
        None
    }

    /// Drains the Sequence and returns the last element that matches `predicate`.
    fn find_last<P>(mut self, mut predicate: P) -> Option<Self::Item>
    where
        Self: Sized,
        P: FnMut(&Self::Item) -> bool,
    {
        let mut found = None;
        while let Some(item) = self.pull() {
            if predicate(&item) {
                found = Some(item);
            }
        }
        found
    }

    /// Returns true if any element matches `predicate`, stopping at the first match. An empty
    /// Sequence returns false.
    fn any_match<P>(mut self, mut predicate: P) -> bool
    where
        Self: Sized,
        P: FnMut(&Self::Item) -> bool,
    {
        while let Some(item) = self.pull() {
            if predicate(&item) {
                return true;
            }
        }
        false
    }

    /// Returns true if every element matches `predicate`, stopping at the first failure. An empty
    /// Sequence returns true.
    fn all_match<P>(mut self, mut predicate: P) -> bool
    where
        Self: Sized,
        P: FnMut(&Self::Item) -> bool,
    {
        while let Some(item) = self.pull() {
            if !predicate(&item) {
                return false;
            }
        }
        true
    }

    /// Returns true if no element matches `predicate`.
    fn none_match<P>(self, predicate: P) -> bool
    where
        Self: Sized,
        P: FnMut(&Self::Item) -> bool,
    {
        !self.any_match(predicate)
    }

    /// Drains the Sequence and returns the number of elements it produced.
    fn count(self) -> usize
    where
        Self: Sized,
    {
        self.collect(collect::counting())
    }

    /// Converts this Sequence into an [`Iterator`].
    #[allow(clippy::should_implement_trait)]
    fn into_iter(self) -> IntoIter<Self>
    where
        Self: Sized,
    {
        IntoIter::new(self)
    }

    /// Erases the type of this Sequence behind a [`Box`].
    fn boxed<'a>(self) -> BoxedSequence<'a, Self::Item>
    where
        Self: Sized + 'a,
    {
        Box::new(self)
    }
}

impl<S: Sequence + ?Sized> Sequence for &mut S {
    type Item = S::Item;

    fn has_next(&mut self) -> bool {
        (**self).has_next()
    }

    fn try_next(&mut self) -> Result<Self::Item, NoSuchElement> {
        (**self).try_next()
    }
}

impl<S: Sequence + ?Sized> Sequence for Box<S> {
    type Item = S::Item;

    fn has_next(&mut self) -> bool {
        (**self).has_next()
    }

    fn try_next(&mut self) -> Result<Self::Item, NoSuchElement> {
        (**self).try_next()
    }
}
