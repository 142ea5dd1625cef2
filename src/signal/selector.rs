use crate::runtime::{ReactiveRuntime, WatchGuard};
use std::sync::{Arc, PoisonError, RwLock};

struct SelectorInner<T> {
    compute: Box<dyn Fn() -> T + Send + Sync>,
    cached: RwLock<Option<T>>,
    id: usize,
    runtime: Arc<ReactiveRuntime>,
    _registration: WatchGuard,
}

/// A memoized value derived from one or more slices.
///
/// The computation runs lazily on [`get`](Selector::get) and is cached
/// until one of the slices (or selectors) it read changes. Selectors are
/// themselves sources: an effect that reads a selector re-runs when the
/// selector is invalidated.
pub struct Selector<T> {
    inner: Arc<SelectorInner<T>>,
}

impl<T> Clone for Selector<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Clone + 'static> Selector<T> {
    /// Create a new selector on `runtime` with the given computation.
    pub fn new<F>(runtime: &Arc<ReactiveRuntime>, compute: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        let id = runtime.next_id();
        runtime.register_selector(id);

        Self {
            inner: Arc::new(SelectorInner {
                compute: Box::new(compute),
                cached: RwLock::new(None),
                id,
                runtime: Arc::clone(runtime),
                _registration: runtime.guard(id),
            }),
        }
    }

    /// Get the current value, recomputing if necessary.
    pub fn get(&self) -> T {
        let inner = &*self.inner;
        inner.runtime.track_read(inner.id);

        if !inner.runtime.is_dirty(inner.id) {
            let cached = inner.cached.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(value) = cached.as_ref() {
                return value.clone();
            }
        }

        // Recompute within observer context to re-collect dependencies
        inner.runtime.reset_sources(inner.id);
        let value = inner.runtime.with_observer(inner.id, || (inner.compute)());
        *inner.cached.write().unwrap_or_else(PoisonError::into_inner) = Some(value.clone());
        inner.runtime.mark_clean(inner.id);
        value
    }

    /// Get the selector's unique ID.
    pub fn id(&self) -> usize {
        self.inner.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::Slice;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn selector_basic() {
        let runtime = ReactiveRuntime::new();
        let count = Slice::new(&runtime, 5);
        let doubled = Selector::new(&runtime, {
            let count = count.clone();
            move || count.get() * 2
        });

        assert_eq!(doubled.get(), 10);

        count.set(10);
        assert_eq!(doubled.get(), 20);
    }

    #[test]
    fn selector_caches_until_its_slice_changes() {
        let runtime = ReactiveRuntime::new();
        let watched = Slice::new(&runtime, 1);
        let unrelated = Slice::new(&runtime, 100);
        let computations = Arc::new(AtomicUsize::new(0));

        let selector = Selector::new(&runtime, {
            let watched = watched.clone();
            let computations = computations.clone();
            move || {
                computations.fetch_add(1, Ordering::SeqCst);
                watched.get() + 1
            }
        });

        assert_eq!(selector.get(), 2);
        assert_eq!(selector.get(), 2);
        unrelated.set(200);
        assert_eq!(selector.get(), 2);
        assert_eq!(computations.load(Ordering::SeqCst), 1);

        watched.set(2);
        assert_eq!(selector.get(), 3);
        assert_eq!(computations.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn chained_selectors() {
        let runtime = ReactiveRuntime::new();
        let input = Slice::new(&runtime, 1);
        let doubled = Selector::new(&runtime, {
            let input = input.clone();
            move || input.get() * 2
        });
        let quadrupled = Selector::new(&runtime, {
            let doubled = doubled.clone();
            move || doubled.get() * 2
        });

        assert_eq!(quadrupled.get(), 4);

        input.set(5);
        assert_eq!(quadrupled.get(), 20);
    }

    #[test]
    fn dropping_last_clone_unregisters() {
        let runtime = ReactiveRuntime::new();
        let input = Slice::new(&runtime, 1);
        let selector = Selector::new(&runtime, {
            let input = input.clone();
            move || input.get()
        });
        selector.get();
        assert_eq!(runtime.dependent_count(input.id()), 1);

        drop(selector);
        assert_eq!(runtime.dependent_count(input.id()), 0);
    }
}
