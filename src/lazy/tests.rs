#![cfg(test)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Barrier;
use std::thread;

use super::*;
use crate::util::counter::CallCounter;
use crate::util::panic::{assert_panics, assert_panics_with};

#[test]
fn test_lazy_initializes_once() {
    let calls = CallCounter::new();
    let lazy = Lazy::new(|| {
        calls.tick();
        vec![1, 2, 3]
    });

    assert_eq!(calls.get(), 0, "Creating a Lazy shouldn't run its initializer.");
    assert!(!lazy.is_initialized());
    assert_eq!(lazy.get_if_initialized(), None);

    assert_eq!(lazy.len(), 3);
    assert_eq!(*lazy.get(), [1, 2, 3]);
    assert_eq!(lazy.try_get(), Ok(&vec![1, 2, 3]));
    assert_eq!(calls.get(), 1);
    assert!(lazy.is_initialized());
    assert_eq!(lazy.get_if_initialized(), Some(&vec![1, 2, 3]));
}

#[test]
fn test_lazy_into_inner() {
    let untouched: Lazy<i32> = Lazy::new(|| 5);
    assert_eq!(untouched.into_inner(), None);

    let touched = Lazy::new(|| 5);
    assert_eq!(*touched, 5);
    assert_eq!(touched.into_inner(), Some(5));
}

#[test]
fn test_lazy_poisoned() {
    let lazy = Lazy::new(|| -> u8 { panic!("initializer failed") });

    assert_panics_with!({ *lazy.get() }, "initializer failed");
    assert!(!lazy.is_initialized());
    assert_eq!(lazy.try_get(), Err(PoisonedLazy));
    assert_panics_with!({ *lazy }, "lazy value poisoned");
}

#[test]
fn test_lazy_debug() {
    let lazy: Lazy<&str> = Lazy::new(|| "ready");
    assert_eq!(format!("{:?}", lazy), "Lazy(<uninit>)");
    lazy.get();
    assert_eq!(format!("{:?}", lazy), "Lazy(\"ready\")");

    let default: Lazy<Vec<u8>> = Lazy::default();
    assert!(default.is_empty());
}

#[test]
fn test_lazy_static() {
    static INITS: AtomicUsize = AtomicUsize::new(0);
    static SHARED: Lazy<String> = Lazy::new(|| {
        INITS.fetch_add(1, Ordering::SeqCst);
        "shared".to_string()
    });

    let barrier = Barrier::new(8);
    thread::scope(|scope| {
        for _ in 0..8 {
            scope.spawn(|| {
                barrier.wait();
                assert_eq!(SHARED.as_str(), "shared");
            });
        }
    });

    assert_eq!(INITS.load(Ordering::SeqCst), 1, "Racing threads should share one initialization.");
}

#[test]
fn test_memoized_caches_per_key() {
    let calls = CallCounter::new();
    let squares = Memoized::new(|n: &u64| {
        calls.tick();
        n * n
    });

    assert!(squares.is_empty());
    assert_eq!(squares.get(&4), 16);
    assert_eq!(squares.get(&4), 16);
    assert_eq!(squares.get(&5), 25);
    assert_eq!(calls.get(), 2, "Each key should only be computed once.");
    assert_eq!(squares.len(), 2);
    assert_eq!(squares.get_if_cached(&5), Some(25));
    assert_eq!(squares.get_if_cached(&6), None);
}

#[test]
fn test_memoized_invalidate_and_clear() {
    let calls = CallCounter::new();
    let names = Memoized::new(|id: &String| {
        calls.tick();
        id.to_uppercase()
    });

    names.get(&"a".to_string());
    names.get(&"b".to_string());
    assert_eq!(names.invalidate("a"), Some("A".to_string()));
    assert_eq!(names.invalidate("a"), None);
    assert_eq!(names.len(), 1);

    names.get(&"a".to_string());
    assert_eq!(calls.get(), 3, "An invalidated key should be computed again.");

    names.clear();
    assert!(names.is_empty());
    names.get(&"b".to_string());
    assert_eq!(calls.get(), 4);
}

#[test]
fn test_memoized_threads() {
    let calls = AtomicUsize::new(0);
    let memo = Memoized::new(|n: &usize| {
        calls.fetch_add(1, Ordering::SeqCst);
        n * 2
    });
    let barrier = Barrier::new(4);

    thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                barrier.wait();
                for n in 0..16 {
                    assert_eq!(memo.get(&n), n * 2);
                }
            });
        }
    });

    assert_eq!(calls.load(Ordering::SeqCst), 16, "Each key should be computed by one thread.");
}

#[test]
fn test_memoized_propagates_panics() {
    let memo = Memoized::new(|n: &i32| if *n < 0 { panic!("negative") } else { *n });
    assert_panics!({ memo.get(&-1) });
    assert_eq!(memo.get(&1), 1, "A panic during computation shouldn't break the cache.");
    assert_eq!(memo.len(), 1);
}
