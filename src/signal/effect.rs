use crate::runtime::{Callback, ReactiveRuntime, WatchGuard};
use std::sync::Arc;

/// A side effect that runs when its dependencies change.
///
/// Effects are the consumers of a store: the effect runs once on creation,
/// records every slice or selector it reads, and re-runs whenever one of
/// those changes. Dependencies are collected again on each run, so a
/// branch that stops reading a slice also stops reacting to it.
///
/// Dropping the effect disposes it.
///
/// # Examples
///
/// ```
/// use appstate::AppStore;
/// use std::sync::{Arc, atomic::{AtomicUsize, Ordering}};
///
/// let store = AppStore::new();
/// let renders = Arc::new(AtomicUsize::new(0));
///
/// let _theme_view = store.effect({
///     let store = store.clone();
///     let renders = renders.clone();
///     move || {
///         let _ = store.theme();
///         renders.fetch_add(1, Ordering::SeqCst);
///     }
/// });
///
/// store.increment();
/// assert_eq!(renders.load(Ordering::SeqCst), 1);
///
/// store.toggle_theme();
/// assert_eq!(renders.load(Ordering::SeqCst), 2);
/// ```
pub struct Effect {
    run: Callback,
    id: usize,
    runtime: Arc<ReactiveRuntime>,
    _registration: WatchGuard,
}

impl Effect {
    /// Create an effect on `runtime` and run it immediately.
    pub fn new<F>(runtime: &Arc<ReactiveRuntime>, effect: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        let id = runtime.next_id();
        let run: Callback = Arc::new(effect);

        runtime.register_effect(id, Arc::clone(&run));
        let registration = runtime.guard(id);
        runtime.run_effect(id, &run);

        Self {
            run,
            id,
            runtime: Arc::clone(runtime),
            _registration: registration,
        }
    }

    /// Manually trigger the effect, re-collecting its dependencies.
    pub fn run(&self) {
        self.runtime.run_effect(self.id, &self.run);
    }

    /// Get the effect's unique ID.
    pub fn id(&self) -> usize {
        self.id
    }
}

impl std::fmt::Debug for Effect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Effect").field("id", &self.id).finish()
    }
}
