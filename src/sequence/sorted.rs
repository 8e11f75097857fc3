use std::cmp::Ordering;
use std::fmt::{self, Debug, Formatter};

use derive_more::IsVariant;

use super::{ListSource, NoSuchElement, Sequence, from_list};
use crate::util::trace::trace;

/// A Sequence that yields the elements of its upstream in sorted order, see
/// [`Sequence::sorted_by`].
///
/// Sorting needs every element, so this is the one stage that materializes its upstream. It stays
/// [`Pending`](SortState::Pending) until the first availability check, then drains the upstream
/// into a list, sorts it (stably), drops the upstream and replays the list from then on.
#[must_use = "sequences do nothing unless a terminal operation drives them"]
pub struct Sorted<S: Sequence, F> {
    state: SortState<S, S::Item>,
    compare: F,
}

/// The two states of a [`Sorted`] Sequence.
#[derive(Debug, IsVariant)]
pub enum SortState<S, T> {
    /// Nothing has been pulled yet.
    Pending(S),
    /// The upstream has been drained, sorted and released.
    Sorted(ListSource<T>),
}

impl<S: Sequence, F> Sorted<S, F> {
    pub(crate) fn new(upstream: S, compare: F) -> Sorted<S, F> {
        Sorted {
            state: SortState::Pending(upstream),
            compare,
        }
    }

    /// Returns the current state, mostly useful for checking whether the upstream has been
    /// materialized yet.
    pub const fn state(&self) -> &SortState<S, S::Item> {
        &self.state
    }
}

impl<S, F> Sorted<S, F>
where
    S: Sequence,
    F: FnMut(&S::Item, &S::Item) -> Ordering,
{
    fn materialize(&mut self) {
        let SortState::Pending(upstream) = &mut self.state else {
            return;
        };

        let mut items = Vec::new();
        while let Some(item) = upstream.pull() {
            items.push(item);
        }
        items.sort_by(&mut self.compare);
        trace!(len = items.len(), "materialized sequence for sorting");

        // Replacing the state drops the upstream.
        self.state = SortState::Sorted(from_list(items));
    }
}

impl<S, F> Sequence for Sorted<S, F>
where
    S: Sequence,
    F: FnMut(&S::Item, &S::Item) -> Ordering,
{
    type Item = S::Item;

    fn has_next(&mut self) -> bool {
        self.materialize();
        match &mut self.state {
            SortState::Sorted(sorted) => sorted.has_next(),
            SortState::Pending(_) => false,
        }
    }

    fn try_next(&mut self) -> Result<S::Item, NoSuchElement> {
        self.materialize();
        match &mut self.state {
            SortState::Sorted(sorted) => sorted.try_next(),
            SortState::Pending(_) => Err(NoSuchElement),
        }
    }
}

impl<S: Sequence + Debug, F> Debug for Sorted<S, F>
where
    S::Item: Debug,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sorted").field("state", &self.state).finish_non_exhaustive()
    }
}
