//! Composable selectors over external state.
//!
//! A selector is a shared function from a state value to a derived value.
//! [`memoize`] wraps an input selector and a result function so that the result
//! function runs only when the input selector's output changes;
//! [`combine`] joins two selectors into one producing a tuple, which is how
//! derivations with several inputs are built.

use std::sync::Arc;

use crate::memo::{Memo, MemoKey};

/// A shared derivation from state `S` to `T`.
pub type Selector<S, T> = Arc<dyn Fn(&S) -> T + Send + Sync>;

/// Wraps a function as a [`Selector`].
pub fn selector<S, T, F>(f: F) -> Selector<S, T>
where
    F: Fn(&S) -> T + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Builds a selector that re-runs `result` only when the output of `input`
/// changes (per [`MemoKey`]) since the previous call.
///
/// Each returned selector owns its own cache slot.
///
/// ```
/// use std::sync::{Arc, atomic::{AtomicUsize, Ordering}};
/// use indexr_table::selector::{memoize, selector};
///
/// let runs = Arc::new(AtomicUsize::new(0));
/// let counter = runs.clone();
/// let doubled = memoize(selector(|state: &(u64, u64)| state.0), move |n: &u64| {
///     counter.fetch_add(1, Ordering::Relaxed);
///     n * 2
/// });
/// assert_eq!(doubled(&(4, 1)), 8);
/// assert_eq!(doubled(&(4, 2)), 8);
/// assert_eq!(runs.load(Ordering::Relaxed), 1);
/// ```
pub fn memoize<S, I, O, F>(input: Selector<S, I>, result: F) -> Selector<S, O>
where
    S: 'static,
    I: MemoKey + Send + 'static,
    O: Clone + Send + 'static,
    F: Fn(&I) -> O + Send + Sync + 'static,
{
    let memo = Memo::<I, O>::new();
    Arc::new(move |state: &S| memo.get_or_compute(input(state), &result))
}

/// Joins two selectors into one that yields both outputs.
pub fn combine<S, A, B>(a: Selector<S, A>, b: Selector<S, B>) -> Selector<S, (A, B)>
where
    S: 'static,
    A: 'static,
    B: 'static,
{
    Arc::new(move |state: &S| (a(state), b(state)))
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    struct State {
        items: Arc<Vec<u32>>,
        threshold: u32,
    }

    #[test]
    fn test_memoize_combined_inputs() {
        let runs = Arc::new(AtomicUsize::new(0));
        let counter = runs.clone();
        let items = selector(|s: &State| s.items.clone());
        let threshold = selector(|s: &State| s.threshold);
        let above = memoize(combine(items, threshold), move |(items, threshold)| {
            counter.fetch_add(1, Ordering::Relaxed);
            items.iter().filter(|&&i| i > *threshold).count()
        });

        let shared = Arc::new(vec![1, 5, 9]);
        let state = State {
            items: shared.clone(),
            threshold: 4,
        };
        assert_eq!(above(&state), 2);
        assert_eq!(above(&state), 2);
        assert_eq!(runs.load(Ordering::Relaxed), 1);

        let raised = State {
            items: shared,
            threshold: 6,
        };
        assert_eq!(above(&raised), 1);
        assert_eq!(runs.load(Ordering::Relaxed), 2);

        let copied = State {
            items: Arc::new(vec![1, 5, 9]),
            threshold: 6,
        };
        assert_eq!(above(&copied), 1);
        assert_eq!(runs.load(Ordering::Relaxed), 3);
    }

    #[test]
    fn test_memoized_selectors_do_not_share_caches() {
        let input = selector(|n: &u64| *n);
        let first = memoize(input.clone(), |n: &u64| n + 1);
        let second = memoize(input, |n: &u64| n + 2);
        assert_eq!(first(&1), 2);
        assert_eq!(second(&1), 3);
        assert_eq!(first(&1), 2);
    }
}
