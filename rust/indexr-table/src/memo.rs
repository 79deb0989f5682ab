//! Single-slot memoization.
//!
//! A [`Memo`] remembers the last input it saw and the output computed for it.
//! Whether an input "changed" is decided by [`MemoKey::memo_eq`]: shared
//! structures (collections, views, `Arc`s) compare by reference, plain values
//! by value.

use std::sync::{
    Arc, Mutex, PoisonError,
    atomic::{AtomicU64, Ordering},
};

use indexr_collections::{Collection, Record, Value};
use indexr_index::IndexedView;

/// Equality used to decide whether a memoized computation must re-run.
pub trait MemoKey: Clone {
    fn memo_eq(&self, other: &Self) -> bool;
}

impl MemoKey for Collection {
    fn memo_eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl MemoKey for IndexedView {
    fn memo_eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl MemoKey for Record {
    fn memo_eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl<T: ?Sized> MemoKey for Arc<T> {
    fn memo_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(self, other)
    }
}

macro_rules! impl_memo_key_by_value {
    ($($T:ty),* $(,)?) => {
        $(
            impl MemoKey for $T {
                fn memo_eq(&self, other: &Self) -> bool {
                    self == other
                }
            }
        )*
    };
}

impl_memo_key_by_value!(
    (),
    bool,
    char,
    i32,
    i64,
    u32,
    u64,
    usize,
    String,
    &'static str,
    Value,
);

impl<T: MemoKey> MemoKey for Option<T> {
    fn memo_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Some(a), Some(b)) => a.memo_eq(b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl<A: MemoKey, B: MemoKey> MemoKey for (A, B) {
    fn memo_eq(&self, other: &Self) -> bool {
        self.0.memo_eq(&other.0) && self.1.memo_eq(&other.1)
    }
}

impl<A: MemoKey, B: MemoKey, C: MemoKey> MemoKey for (A, B, C) {
    fn memo_eq(&self, other: &Self) -> bool {
        self.0.memo_eq(&other.0) && self.1.memo_eq(&other.1) && self.2.memo_eq(&other.2)
    }
}

/// Hit and miss counts of a [`Memo`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MemoStats {
    pub hits: u64,
    pub misses: u64,
}

/// A capacity-one cache from input to output.
pub struct Memo<I, O> {
    slot: Mutex<Option<(I, O)>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<I: MemoKey, O: Clone> Memo<I, O> {
    pub fn new() -> Memo<I, O> {
        Memo {
            slot: Mutex::new(None),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Returns the cached output when `input` equals the cached input,
    /// otherwise computes, caches and returns a new output.
    pub fn get_or_compute<F>(&self, input: I, compute: F) -> O
    where
        F: FnOnce(&I) -> O,
    {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some((last_input, last_output)) = slot.as_ref() {
            if last_input.memo_eq(&input) {
                self.hits.fetch_add(1, Ordering::Relaxed);
                log::trace!("memo hit");
                return last_output.clone();
            }
        }
        self.misses.fetch_add(1, Ordering::Relaxed);
        let output = compute(&input);
        *slot = Some((input, output.clone()));
        output
    }

    /// Drops the cached entry.
    pub fn clear(&self) {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }

    pub fn stats(&self) -> MemoStats {
        MemoStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}

impl<I: MemoKey, O: Clone> Default for Memo<I, O> {
    fn default() -> Self {
        Memo::new()
    }
}
