//! The [`CollectConsumer`] protocol and the built-in consumers used by
//! [`Sequence::collect`](super::Sequence::collect).
//!
//! A consumer is created by whoever starts the terminal operation, fed every element in order
//! through [`accept`](CollectConsumer::accept) and then asked for its result once through
//! [`finish`](CollectConsumer::finish). `finish` takes the consumer by value, so it can't be called
//! twice or accept anything afterwards.
//!
//! # Examples
//! ```
//! # use seqkit::sequence::{self, Sequence, collect};
//! let longest = sequence::of(vec!["a", "abc", "ab"])
//!     .collect(collect::max_by(|a: &&str, b: &&str| a.len().cmp(&b.len())));
//! assert_eq!(longest, Some("abc"));
//!
//! let csv = sequence::from_iter(1..=3).collect(collect::joining(", "));
//! assert_eq!(csv, "1, 2, 3");
//! ```

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::fmt::{self, Debug, Display, Formatter, Write};
use std::hash::Hash;
use std::marker::PhantomData;

use crate::util::option::OptionExtension;

/// An accumulator that can be used as the terminal step of a Sequence.
///
/// `accept` may be called any number of times, including zero. `finish` is called exactly once,
/// after the last `accept`.
pub trait CollectConsumer<T> {
    type Output;

    /// Accumulates one element.
    fn accept(&mut self, value: T);

    /// Consumes the accumulator and returns its result.
    fn finish(self) -> Self::Output;
}

/// Collects elements into a [`Vec`], in order.
pub fn to_list<T>() -> ToList<T> {
    ToList(Vec::new())
}

#[derive(Debug, Clone)]
pub struct ToList<T>(Vec<T>);

impl<T> CollectConsumer<T> for ToList<T> {
    type Output = Vec<T>;

    fn accept(&mut self, value: T) {
        self.0.push(value);
    }

    fn finish(self) -> Vec<T> {
        self.0
    }
}

/// Collects elements into a [`HashSet`].
pub fn to_set<T: Hash + Eq>() -> ToSet<T> {
    ToSet(HashSet::new())
}

#[derive(Debug, Clone)]
pub struct ToSet<T>(HashSet<T>);

impl<T: Hash + Eq> CollectConsumer<T> for ToSet<T> {
    type Output = HashSet<T>;

    fn accept(&mut self, value: T) {
        self.0.insert(value);
    }

    fn finish(self) -> HashSet<T> {
        self.0
    }
}

/// Collects elements into a [`HashMap`], splitting each one into an entry with `key` and `value`.
/// When two elements produce the same key, the later value replaces the earlier one.
pub fn to_map<T, K, V, KF, VF>(key: KF, value: VF) -> ToMap<T, K, V, KF, VF>
where
    K: Hash + Eq,
    KF: FnMut(&T) -> K,
    VF: FnMut(T) -> V,
{
    ToMap {
        map: HashMap::new(),
        key,
        value,
        _phantom: PhantomData,
    }
}

pub struct ToMap<T, K, V, KF, VF> {
    map: HashMap<K, V>,
    key: KF,
    value: VF,
    _phantom: PhantomData<fn(T)>,
}

impl<T, K, V, KF, VF> CollectConsumer<T> for ToMap<T, K, V, KF, VF>
where
    K: Hash + Eq,
    KF: FnMut(&T) -> K,
    VF: FnMut(T) -> V,
{
    type Output = HashMap<K, V>;

    fn accept(&mut self, value: T) {
        let key = (self.key)(&value);
        self.map.insert(key, (self.value)(value));
    }

    fn finish(self) -> HashMap<K, V> {
        self.map
    }
}

impl<T, K: Debug, V: Debug, KF, VF> Debug for ToMap<T, K, V, KF, VF> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToMap").field("map", &self.map).finish_non_exhaustive()
    }
}

/// Counts elements.
pub const fn counting() -> Counting {
    Counting(0)
}

#[derive(Debug, Clone, Copy)]
pub struct Counting(usize);

impl<T> CollectConsumer<T> for Counting {
    type Output = usize;

    fn accept(&mut self, _value: T) {
        self.0 += 1;
    }

    fn finish(self) -> usize {
        self.0
    }
}

/// Keeps the greatest element according to `compare`, or the first of several equally great
/// ones. Finishes with [`None`] if nothing was accepted.
pub fn max_by<T, F: FnMut(&T, &T) -> Ordering>(compare: F) -> Extreme<T, F> {
    Extreme {
        best: None,
        compare,
        keep: Ordering::Greater,
    }
}

/// Keeps the least element according to `compare`, or the first of several equally least ones.
/// Finishes with [`None`] if nothing was accepted.
pub fn min_by<T, F: FnMut(&T, &T) -> Ordering>(compare: F) -> Extreme<T, F> {
    Extreme {
        best: None,
        compare,
        keep: Ordering::Less,
    }
}

/// The consumer behind [`max_by`] and [`min_by`].
pub struct Extreme<T, F> {
    best: Option<T>,
    compare: F,
    // A new value only replaces the current best if it compares this way against it.
    keep: Ordering,
}

impl<T, F: FnMut(&T, &T) -> Ordering> CollectConsumer<T> for Extreme<T, F> {
    type Output = Option<T>;

    fn accept(&mut self, value: T) {
        let replace = match &self.best {
            Some(best) => (self.compare)(&value, best) == self.keep,
            None => true,
        };
        if replace {
            self.best = Some(value);
        }
    }

    fn finish(self) -> Option<T> {
        self.best
    }
}

impl<T: Debug, F> Debug for Extreme<T, F> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Extreme")
            .field("best", &self.best)
            .field("keep", &self.keep)
            .finish_non_exhaustive()
    }
}

/// Folds elements into an accumulator starting from `initial`, the same as
/// [`Sequence::reduce`](super::Sequence::reduce) but usable wherever a consumer is expected.
pub fn reducing<T, R, F: FnMut(R, T) -> R>(initial: R, combine: F) -> Reducing<T, R, F> {
    Reducing {
        acc: Some(initial),
        combine,
        _phantom: PhantomData,
    }
}

pub struct Reducing<T, R, F> {
    // Only vacated while combine is running.
    acc: Option<R>,
    combine: F,
    _phantom: PhantomData<fn(T)>,
}

impl<T, R, F: FnMut(R, T) -> R> CollectConsumer<T> for Reducing<T, R, F> {
    type Output = R;

    fn accept(&mut self, value: T) {
        let acc = self.acc.take().unreachable();
        self.acc = Some((self.combine)(acc, value));
    }

    fn finish(self) -> R {
        self.acc.unreachable()
    }
}

impl<T, R: Debug, F> Debug for Reducing<T, R, F> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reducing").field("acc", &self.acc).finish_non_exhaustive()
    }
}

/// Formats every element with [`Display`] and joins them with `separator`.
pub fn joining(separator: &str) -> Joining<'_> {
    Joining {
        joined: String::new(),
        separator,
        first: true,
    }
}

#[derive(Debug, Clone)]
pub struct Joining<'a> {
    joined: String,
    separator: &'a str,
    first: bool,
}

impl<T: Display> CollectConsumer<T> for Joining<'_> {
    type Output = String;

    fn accept(&mut self, value: T) {
        if !self.first {
            self.joined.push_str(self.separator);
        }
        self.first = false;
        // Writing into a String can't fail.
        let _ = write!(self.joined, "{}", value);
    }

    fn finish(self) -> String {
        self.joined
    }
}

/// Builds a consumer out of a starting state and two functions, for one-off reductions that don't
/// warrant their own type.
///
/// # Examples
/// ```
/// # use seqkit::sequence::{self, Sequence, collect};
/// let (sum, len) = sequence::from_iter([2.0, 4.0, 9.0]).collect(collect::from_fns(
///     (0.0, 0),
///     |(sum, len), value: f64| {
///         *sum += value;
///         *len += 1;
///     },
///     |state| state,
/// ));
/// assert_eq!(sum / len as f64, 5.0);
/// ```
pub fn from_fns<T, S, R, A, F>(state: S, accept: A, finish: F) -> FromFns<T, S, A, F>
where
    A: FnMut(&mut S, T),
    F: FnOnce(S) -> R,
{
    FromFns {
        state,
        accept,
        finish,
        _phantom: PhantomData,
    }
}

pub struct FromFns<T, S, A, F> {
    state: S,
    accept: A,
    finish: F,
    // T is only named by the accept function.
    _phantom: PhantomData<fn(T)>,
}

impl<T, S, R, A, F> CollectConsumer<T> for FromFns<T, S, A, F>
where
    A: FnMut(&mut S, T),
    F: FnOnce(S) -> R,
{
    type Output = R;

    fn accept(&mut self, value: T) {
        (self.accept)(&mut self.state, value);
    }

    fn finish(self) -> R {
        (self.finish)(self.state)
    }
}

impl<T, S: Debug, A, F> Debug for FromFns<T, S, A, F> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("FromFns").field("state", &self.state).finish_non_exhaustive()
    }
}
