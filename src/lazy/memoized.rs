use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt::{self, Debug, Formatter};
use std::hash::Hash;

use parking_lot::RwLock;

use crate::util::trace::debug;

/// A function that remembers its results, computing `f` at most once for each distinct key until
/// that key is [invalidated](Memoized::invalidate).
///
/// Lookups of cached keys only take a read lock. A miss takes the write lock, checks again and
/// computes the value while holding it, so two threads missing on the same key never both run `f`.
/// Values are cloned out of the cache, so `V` is usually cheap to clone (or an [`Arc`](std::sync::Arc)).
///
/// # Examples
/// ```
/// # use seqkit::lazy::Memoized;
/// let lengths = Memoized::new(|word: &String| word.chars().count());
///
/// assert_eq!(lengths.get(&"héllo".to_string()), 5);
/// assert_eq!(lengths.get(&"héllo".to_string()), 5);
/// assert_eq!(lengths.len(), 1);
/// ```
///
/// # Time Complexity
/// | Method | Complexity |
/// |-|-|
/// | `get` (cached) | `O(1)` |
/// | `get` (miss) | `O(f)` |
/// | `invalidate` | `O(1)` |
/// | `clear` | `O(n)` |
pub struct Memoized<K, V, F> {
    cache: RwLock<HashMap<K, V>>,
    f: F,
}

impl<K, V, F> Memoized<K, V, F>
where
    K: Hash + Eq + Clone,
    V: Clone,
    F: Fn(&K) -> V,
{
    /// Creates a new Memoized wrapping `f`, with nothing cached.
    pub fn new(f: F) -> Memoized<K, V, F> {
        Memoized {
            cache: RwLock::new(HashMap::new()),
            f,
        }
    }

    /// Returns the result of `f` for `key`, computing it only if it isn't cached yet.
    pub fn get(&self, key: &K) -> V {
        if let Some(value) = self.cache.read().get(key) {
            return value.clone();
        }

        let mut cache = self.cache.write();
        if let Some(value) = cache.get(key) {
            return value.clone();
        }

        debug!(cached = cache.len(), "memoized cache miss");
        let value = (self.f)(key);
        cache.insert(key.clone(), value.clone());
        value
    }

    /// Returns the cached result for `key` without computing anything.
    pub fn get_if_cached<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.cache.read().get(key).cloned()
    }

    /// Removes the cached result for `key`, so the next [`get`](Memoized::get) computes it again.
    /// Returns the removed value, if there was one.
    pub fn invalidate<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.cache.write().remove(key)
    }

    /// Removes every cached result.
    pub fn clear(&self) {
        self.cache.write().clear();
    }

    /// Returns the number of cached results.
    pub fn len(&self) -> usize {
        self.cache.read().len()
    }

    /// Returns true if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.cache.read().is_empty()
    }
}

impl<K: Debug, V: Debug, F> Debug for Memoized<K, V, F> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Memoized")
            .field("cache", &*self.cache.read())
            .finish_non_exhaustive()
    }
}
