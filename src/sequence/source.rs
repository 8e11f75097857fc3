use std::fmt::{self, Debug, Formatter};
use std::iter::Fuse;
use std::marker::PhantomData;
use std::vec;

use super::{FlatMap, IntoSequence, NoSuchElement, Sequence};

/// Creates a Sequence with no elements.
///
/// # Examples
/// ```
/// # use seqkit::sequence::{self, Sequence};
/// let mut seq = sequence::empty::<u8>();
/// assert!(!seq.has_next());
/// assert!(seq.try_next().is_err());
/// ```
pub const fn empty<T>() -> Empty<T> {
    Empty(PhantomData)
}

/// A Sequence with no elements, see [`empty`].
///
/// Empty is a ZST, so every instance is the same stateless value: it always reports that it is
/// exhausted and `try_next` always fails.
pub struct Empty<T>(PhantomData<fn() -> T>);

impl<T> Sequence for Empty<T> {
    type Item = T;

    fn has_next(&mut self) -> bool {
        false
    }

    fn try_next(&mut self) -> Result<T, NoSuchElement> {
        Err(NoSuchElement)
    }
}

impl<T> Clone for Empty<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Empty<T> {}

impl<T> Default for Empty<T> {
    fn default() -> Self {
        empty()
    }
}

impl<T> Debug for Empty<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("Empty")
    }
}

/// Creates a Sequence that yields `value` exactly once.
pub const fn once<T>(value: T) -> Once<T> {
    Once(Some(value))
}

/// A Sequence that yields a single element, see [`once`].
#[derive(Debug, Clone)]
pub struct Once<T>(Option<T>);

impl<T> Sequence for Once<T> {
    type Item = T;

    fn has_next(&mut self) -> bool {
        self.0.is_some()
    }

    fn try_next(&mut self) -> Result<T, NoSuchElement> {
        self.0.take().ok_or(NoSuchElement)
    }
}

/// Creates a Sequence that replays the elements of `list` in order.
pub fn from_list<T>(list: Vec<T>) -> ListSource<T> {
    ListSource {
        items: list.into_iter(),
    }
}

/// Creates a Sequence that replays the elements of `array` in order.
pub fn from_array<T, const N: usize>(array: [T; N]) -> ListSource<T> {
    from_list(Vec::from(array))
}

/// A Sequence backed by a list that has already been materialized, see [`from_list`].
///
/// Availability is a length check, so unlike [`IterSource`] nothing ever needs to be peeked.
#[derive(Debug, Clone)]
pub struct ListSource<T> {
    items: vec::IntoIter<T>,
}

impl<T> ListSource<T> {
    /// Returns the number of elements left in the list.
    pub fn remaining(&self) -> usize {
        self.items.len()
    }
}

impl<T> Sequence for ListSource<T> {
    type Item = T;

    fn has_next(&mut self) -> bool {
        self.items.len() > 0
    }

    fn try_next(&mut self) -> Result<T, NoSuchElement> {
        self.items.next().ok_or(NoSuchElement)
    }
}

/// Creates a Sequence from a list of values, picking the cheapest representation for it: no
/// values give an [`Empty`] source, one value gives a [`Once`] source and anything more is
/// replayed from the list.
///
/// # Examples
/// ```
/// # use seqkit::sequence::{self, Sequence};
/// assert!(sequence::of(Vec::<u8>::new()).is_empty());
/// assert!(sequence::of(vec![1]).is_once());
/// assert_eq!(sequence::of(vec![1, 2, 3]).to_list(), [1, 2, 3]);
/// ```
pub fn of<T>(values: Vec<T>) -> Source<T> {
    match values.len() {
        0 => Source::Empty(empty()),
        1 => Source::Once(Once(values.into_iter().next())),
        _ => Source::List(from_list(values)),
    }
}

/// A source over a fixed set of values, see [`of`].
#[derive(Debug, Clone, derive_more::IsVariant)]
pub enum Source<T> {
    Empty(Empty<T>),
    Once(Once<T>),
    List(ListSource<T>),
}

impl<T> Sequence for Source<T> {
    type Item = T;

    fn has_next(&mut self) -> bool {
        match self {
            Source::Empty(seq) => seq.has_next(),
            Source::Once(seq) => seq.has_next(),
            Source::List(seq) => seq.has_next(),
        }
    }

    fn try_next(&mut self) -> Result<T, NoSuchElement> {
        match self {
            Source::Empty(seq) => seq.try_next(),
            Source::Once(seq) => seq.try_next(),
            Source::List(seq) => seq.try_next(),
        }
    }
}

/// Creates a Sequence that replays the elements of an [`IntoIterator`], such as an iterator, a
/// collection or a range.
///
/// # Examples
/// ```
/// # use seqkit::sequence::{self, Sequence};
/// let mut seq = sequence::from_iter("abc".chars());
/// assert!(seq.has_next());
/// assert!(seq.has_next());
/// assert_eq!(seq.to_list(), ['a', 'b', 'c']);
/// ```
pub fn from_iter<I: IntoIterator>(iter: I) -> IterSource<I::IntoIter> {
    IterSource {
        iter: iter.into_iter().fuse(),
        peeked: None,
    }
}

/// A Sequence over an [`Iterator`], see [`from_iter`].
///
/// Iterators can only tell if there is another element by producing it, so `has_next` stores the
/// element it pulled until `try_next` hands it out.
#[derive(Debug, Clone)]
pub struct IterSource<I: Iterator> {
    pub(crate) iter: Fuse<I>,
    pub(crate) peeked: Option<I::Item>,
}

impl<I: Iterator> Sequence for IterSource<I> {
    type Item = I::Item;

    fn has_next(&mut self) -> bool {
        if self.peeked.is_none() {
            self.peeked = self.iter.next();
        }
        self.peeked.is_some()
    }

    fn try_next(&mut self) -> Result<I::Item, NoSuchElement> {
        match self.peeked.take() {
            Some(item) => Ok(item),
            None => self.iter.next().ok_or(NoSuchElement),
        }
    }
}

/// Creates an infinite Sequence that calls `supplier` for every element.
pub fn generate<T, F: FnMut() -> T>(supplier: F) -> Generate<F> {
    Generate {
        supplier,
    }
}

/// An infinite Sequence of supplied values, see [`generate`].
#[derive(Clone)]
pub struct Generate<F> {
    supplier: F,
}

impl<T, F: FnMut() -> T> Sequence for Generate<F> {
    type Item = T;

    fn has_next(&mut self) -> bool {
        true
    }

    fn try_next(&mut self) -> Result<T, NoSuchElement> {
        Ok((self.supplier)())
    }
}

impl<F> Debug for Generate<F> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Generate").finish_non_exhaustive()
    }
}

/// Creates an infinite Sequence that calls `f` with the index of each element, starting at 0.
///
/// # Examples
/// ```
/// # use seqkit::sequence::{self, Sequence};
/// let squares = sequence::generate_indexed(|i| i * i).take(4).to_list();
/// assert_eq!(squares, [0, 1, 4, 9]);
/// ```
pub fn generate_indexed<T, F: FnMut(usize) -> T>(f: F) -> GenerateIndexed<F> {
    GenerateIndexed {
        f,
        index: 0,
    }
}

/// An infinite Sequence computed from each element's index, see [`generate_indexed`].
#[derive(Clone)]
pub struct GenerateIndexed<F> {
    f: F,
    index: usize,
}

impl<T, F: FnMut(usize) -> T> Sequence for GenerateIndexed<F> {
    type Item = T;

    fn has_next(&mut self) -> bool {
        true
    }

    fn try_next(&mut self) -> Result<T, NoSuchElement> {
        let value = (self.f)(self.index);
        self.index += 1;
        Ok(value)
    }
}

impl<F> Debug for GenerateIndexed<F> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenerateIndexed")
            .field("index", &self.index)
            .finish_non_exhaustive()
    }
}

/// Creates an infinite Sequence that starts with the value returned by `seed`, and computes every
/// following element by applying `f` to the one before it.
///
/// `seed` isn't called until the first element is pulled.
///
/// # Examples
/// ```
/// # use seqkit::sequence::{self, Sequence};
/// let powers = sequence::iterate(|| 1, |prev| prev * 2).take(5).to_list();
/// assert_eq!(powers, [1, 2, 4, 8, 16]);
/// ```
pub fn iterate<T, S, F>(seed: S, f: F) -> Iterate<T, S, F>
where
    T: Clone,
    S: FnOnce() -> T,
    F: FnMut(&T) -> T,
{
    Iterate {
        state: IterateState::Seed(Some(seed)),
        f,
    }
}

/// An infinite Sequence where each element is computed from the previous one, see [`iterate`].
pub struct Iterate<T, S, F> {
    state: IterateState<T, S>,
    f: F,
}

enum IterateState<T, S> {
    // The seed is only ever called once, the Option is vacated when it is.
    Seed(Option<S>),
    Running(T),
}

impl<T, S, F> Sequence for Iterate<T, S, F>
where
    T: Clone,
    S: FnOnce() -> T,
    F: FnMut(&T) -> T,
{
    type Item = T;

    // Only a seed that panicked leaves the slot vacated.
    fn has_next(&mut self) -> bool {
        !matches!(self.state, IterateState::Seed(None))
    }

    fn try_next(&mut self) -> Result<T, NoSuchElement> {
        let value = match &mut self.state {
            IterateState::Seed(seed) => {
                let seed = seed.take().ok_or(NoSuchElement)?;
                seed()
            },
            IterateState::Running(prev) => (self.f)(prev),
        };
        self.state = IterateState::Running(value.clone());
        Ok(value)
    }
}

impl<T: Debug, S, F> Debug for Iterate<T, S, F> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct("Iterate");
        if let IterateState::Running(prev) = &self.state {
            debug.field("prev", prev);
        }
        debug.finish_non_exhaustive()
    }
}

/// Creates a Sequence that yields the elements of each Sequence in `sequences` in turn, skipping
/// over any that are empty.
///
/// # Examples
/// ```
/// # use seqkit::sequence::{self, Sequence};
/// let all = sequence::concat_all([
///     sequence::of(vec![1, 2]),
///     sequence::of(vec![]),
///     sequence::of(vec![3]),
/// ]);
/// assert_eq!(all.to_list(), [1, 2, 3]);
/// ```
pub fn concat_all<I>(sequences: I) -> ConcatAll<I::IntoIter>
where
    I: IntoIterator,
    I::Item: Sequence,
{
    sequences.into_sequence().flatten()
}

/// A Sequence over a collection of Sequences, see [`concat_all`].
pub type ConcatAll<I> = FlatMap<
    IterSource<I>,
    fn(<I as Iterator>::Item) -> <I as Iterator>::Item,
    <I as Iterator>::Item,
>;
