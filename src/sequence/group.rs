use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt::{self, Debug, Formatter};
use std::hash::{BuildHasher, Hash, RandomState};
use std::ops::Index;
use std::slice;
use std::vec;

/// The result of grouping a Sequence: an immutable map from each key to the value reduced or
/// collected for it.
///
/// Unlike a [`HashMap`], iteration follows the order in which each key was first encountered.
/// Entries live in a list in that order, with a separate index of hash to entry positions for
/// lookup, so keys never need to be cloned.
///
/// A GroupMap can only be created by grouping a Sequence, see
/// [`Sequence::group_and_reduce`](super::Sequence::group_and_reduce),
/// [`Sequence::group_and_collect`](super::Sequence::group_and_collect) and
/// [`Sequence::group_to_list`](super::Sequence::group_to_list).
///
/// # Time Complexity
/// For this analysis of time complexity, variables are defined as follows:
/// - `n`: The number of groups in the GroupMap.
///
/// | Method | Complexity |
/// |-|-|
/// | `len` | `O(1)` |
/// | `get` | `O(1)`* |
/// | `contains_key` | `O(1)`* |
/// | `iter` | `O(n)` |
///
/// \* In the event of a hash collision, every key sharing the hash has to be compared.
pub struct GroupMap<K, V, B = RandomState> {
    pub(crate) entries: Vec<(K, V)>,
    pub(crate) index: HashMap<u64, Vec<usize>>,
    pub(crate) hasher: B,
}

impl<K: Hash + Eq, V> GroupMap<K, V> {
    pub(crate) fn new() -> GroupMap<K, V> {
        GroupMap::with_hasher(RandomState::new())
    }
}

impl<K: Hash + Eq, V, B: BuildHasher> GroupMap<K, V, B> {
    pub(crate) fn with_hasher(hasher: B) -> GroupMap<K, V, B> {
        GroupMap {
            entries: Vec::new(),
            index: HashMap::new(),
            hasher,
        }
    }

    /// Returns the number of groups.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no groups, which is only the case when the grouped Sequence was
    /// empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns a reference to the value for `key`, or None if no element produced that key.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let position = self.position(self.hasher.hash_one(key), key)?;
        Some(&self.entries[position].1)
    }

    /// Returns the entry for `key` as a key-value pair, or None if no element produced that key.
    pub fn get_entry<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let position = self.position(self.hasher.hash_one(key), key)?;
        let (key, value) = &self.entries[position];
        Some((key, value))
    }

    /// Returns true if some element produced `key`.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get(key).is_some()
    }

    /// Returns an iterator over all keys, in order of first occurrence.
    pub fn keys(&self) -> GroupKeys<'_, K, V> {
        GroupKeys(self.entries.iter())
    }

    /// Returns an iterator over all values, in order of their key's first occurrence.
    pub fn values(&self) -> GroupValues<'_, K, V> {
        GroupValues(self.entries.iter())
    }

    /// Returns an iterator over all entries, in order of first occurrence.
    pub fn iter(&self) -> GroupIter<'_, K, V> {
        GroupIter(self.entries.iter())
    }

    /// Converts the GroupMap into a [`HashMap`], giving up the ordering of its keys.
    pub fn into_hash_map(self) -> HashMap<K, V> {
        self.entries.into_iter().collect()
    }

    /// Returns the value for `key`, inserting the result of `default` first if the key hasn't
    /// been seen yet.
    pub(crate) fn get_or_insert_with<F: FnOnce() -> V>(&mut self, key: K, default: F) -> &mut V {
        let hash = self.hasher.hash_one(&key);
        let position = match self.position(hash, &key) {
            Some(position) => position,
            None => {
                let position = self.entries.len();
                self.entries.push((key, default()));
                self.index.entry(hash).or_default().push(position);
                position
            },
        };
        &mut self.entries[position].1
    }

    /// Applies `f` to every value, keeping keys, their order and the index as they are.
    pub(crate) fn map_values<W, F: FnMut(V) -> W>(self, mut f: F) -> GroupMap<K, W, B> {
        GroupMap {
            entries: self.entries.into_iter().map(|(key, value)| (key, f(value))).collect(),
            index: self.index,
            hasher: self.hasher,
        }
    }

    fn position<Q>(&self, hash: u64, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        self.index.get(&hash)?
            .iter()
            .copied()
            .find(|position| self.entries[*position].0.borrow() == key)
    }
}

impl<K, V, B, Q> Index<&Q> for GroupMap<K, V, B>
where
    K: Hash + Eq + Borrow<Q>,
    Q: Hash + Eq + ?Sized,
    B: BuildHasher,
{
    type Output = V;

    /// # Panics
    /// Panics if no element produced `key`.
    fn index(&self, key: &Q) -> &V {
        match self.get(key) {
            Some(value) => value,
            None => panic!("no group for the provided key"),
        }
    }
}

impl<K, V, B> PartialEq for GroupMap<K, V, B>
where
    K: Hash + Eq,
    V: PartialEq,
    B: BuildHasher,
{
    /// Two GroupMaps are equal if they contain the same keys with equal values, regardless of the
    /// order the keys were encountered in.
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self.iter().all(|(key, value)| other.get(key) == Some(value))
    }
}

impl<K, V, B> Eq for GroupMap<K, V, B>
where
    K: Hash + Eq,
    V: Eq,
    B: BuildHasher,
{}

impl<K: Debug, V: Debug, B> Debug for GroupMap<K, V, B> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.entries.iter().map(|(key, value)| (key, value)))
            .finish()
    }
}

impl<K, V, B> IntoIterator for GroupMap<K, V, B> {
    type Item = (K, V);

    type IntoIter = vec::IntoIter<(K, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a, K, V, B> IntoIterator for &'a GroupMap<K, V, B> {
    type Item = (&'a K, &'a V);

    type IntoIter = GroupIter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        GroupIter(self.entries.iter())
    }
}

pub struct GroupIter<'a, K, V>(slice::Iter<'a, (K, V)>);

impl<'a, K, V> Iterator for GroupIter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(key, value)| (key, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<K, V> ExactSizeIterator for GroupIter<'_, K, V> {}

pub struct GroupKeys<'a, K, V>(slice::Iter<'a, (K, V)>);

impl<'a, K, V> Iterator for GroupKeys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<K, V> ExactSizeIterator for GroupKeys<'_, K, V> {}

pub struct GroupValues<'a, K, V>(slice::Iter<'a, (K, V)>);

impl<'a, K, V> Iterator for GroupValues<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<K, V> ExactSizeIterator for GroupValues<'_, K, V> {}

/// The result of partitioning a Sequence with a predicate: the value reduced or collected from
/// the elements that matched it, and the one from the elements that missed it.
///
/// See [`Sequence::partition_and_reduce`](super::Sequence::partition_and_reduce),
/// [`Sequence::partition_and_collect`](super::Sequence::partition_and_collect) and
/// [`Sequence::partition_to_list`](super::Sequence::partition_to_list).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PartitionResult<R> {
    matched: R,
    missed: R,
}

impl<R> PartitionResult<R> {
    pub(crate) const fn new(matched: R, missed: R) -> PartitionResult<R> {
        PartitionResult {
            matched,
            missed,
        }
    }

    /// Returns the result for the elements that matched the predicate.
    pub const fn matched(&self) -> &R {
        &self.matched
    }

    /// Returns the result for the elements that didn't match the predicate.
    pub const fn missed(&self) -> &R {
        &self.missed
    }

    /// Splits the result into `(matched, missed)`.
    pub fn into_parts(self) -> (R, R) {
        (self.matched, self.missed)
    }
}
