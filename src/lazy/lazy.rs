use std::fmt::{self, Debug, Formatter};
use std::ops::Deref;
use std::sync::OnceLock;

use parking_lot::Mutex;

use super::PoisonedLazy;
use crate::util::result::ResultExtension;
use crate::util::trace::debug;

/// A value that is computed by `F` the first time it is accessed.
///
/// Lazy uses double-checked locking: once the value exists, access is a single atomic load. Before
/// that, the first thread to access it takes a lock, checks again and runs the initializer while
/// every other thread waits on the same lock. The initializer runs at most once.
///
/// Because [`new`](Lazy::new) is const, Lazy can be used for statics:
/// ```
/// # use seqkit::lazy::Lazy;
/// static PRIMES: Lazy<Vec<u32>> = Lazy::new(|| {
///     (2..50).filter(|n| (2..*n).all(|d| n % d != 0)).collect()
/// });
///
/// assert!(!PRIMES.is_initialized());
/// assert_eq!(PRIMES[..4], [2, 3, 5, 7]);
/// assert!(PRIMES.is_initialized());
/// ```
///
/// # Poisoning
/// If the initializer panics it has been consumed and there is no value, so the Lazy is poisoned:
/// every later [`get`](Lazy::get) panics and [`try_get`](Lazy::try_get) returns [`PoisonedLazy`].
///
/// # Deadlocks
/// The lock is held while the initializer runs, so an initializer that accesses its own Lazy will
/// deadlock.
pub struct Lazy<T, F = fn() -> T> {
    value: OnceLock<T>,
    init: Mutex<Option<F>>,
}

impl<T, F> Lazy<T, F> {
    /// Creates a new Lazy that will be initialized with `init`.
    pub const fn new(init: F) -> Lazy<T, F> {
        Lazy {
            value: OnceLock::new(),
            init: parking_lot::const_mutex(Some(init)),
        }
    }

    /// Returns a reference to the value if it has already been computed, without computing it.
    pub fn get_if_initialized(&self) -> Option<&T> {
        self.value.get()
    }

    /// Returns true if the value has been computed.
    pub fn is_initialized(&self) -> bool {
        self.value.get().is_some()
    }

    /// Consumes the Lazy, returning the value if it was ever computed.
    pub fn into_inner(self) -> Option<T> {
        self.value.into_inner()
    }
}

impl<T, F: FnOnce() -> T> Lazy<T, F> {
    /// Returns a reference to the value, computing it first if this is the first access.
    ///
    /// # Panics
    /// Panics if the initializer panics, or if it panicked during an earlier access.
    #[track_caller]
    pub fn get(&self) -> &T {
        self.try_get().throw()
    }

    /// Returns a reference to the value, computing it first if this is the first access, or
    /// [`PoisonedLazy`] if an earlier initialization panicked.
    ///
    /// # Panics
    /// Panics if the initializer panics during this call.
    pub fn try_get(&self) -> Result<&T, PoisonedLazy> {
        if let Some(value) = self.value.get() {
            return Ok(value);
        }

        let mut slot = self.init.lock();
        // Another thread may have finished initializing while this one waited for the lock.
        if let Some(value) = self.value.get() {
            return Ok(value);
        }

        // Taken before running, so a panicking initializer leaves None behind.
        let init = slot.take().ok_or(PoisonedLazy)?;
        debug!(type_name = std::any::type_name::<T>(), "initializing lazy value");
        Ok(self.value.get_or_init(init))
    }
}

impl<T, F: FnOnce() -> T> Deref for Lazy<T, F> {
    type Target = T;

    fn deref(&self) -> &T {
        self.get()
    }
}

impl<T: Default> Default for Lazy<T> {
    fn default() -> Lazy<T> {
        Lazy::new(T::default)
    }
}

impl<T: Debug, F> Debug for Lazy<T, F> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_tuple("Lazy");
        match self.value.get() {
            Some(value) => debug.field(value),
            None => debug.field(&format_args!("<uninit>")),
        };
        debug.finish()
    }
}
