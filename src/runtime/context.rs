use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

pub(crate) type Callback = Arc<dyn Fn() + Send + Sync>;

/// What to do with an observer when one of its sources changes.
#[derive(Clone)]
enum Observer {
    /// Re-run the callback and re-collect its sources.
    Effect(Callback),
    /// Re-run the callback; sources are fixed at subscription time.
    Subscriber(Callback),
    /// Mark the cached value dirty and forward to its own dependents.
    Selector,
}

/// Dependency graph between sources (slices, selectors) and observers.
struct ReactiveGraph {
    current_observer: Option<usize>,
    // Map from source ID to set of observer IDs that depend on it
    dependents: HashMap<usize, HashSet<usize>>,
    // Map from observer ID to set of source IDs it depends on
    sources: HashMap<usize, HashSet<usize>>,
    observers: HashMap<usize, Observer>,
    selector_dirty: HashMap<usize, bool>,
}

impl ReactiveGraph {
    fn new() -> Self {
        Self {
            current_observer: None,
            dependents: HashMap::new(),
            sources: HashMap::new(),
            observers: HashMap::new(),
            selector_dirty: HashMap::new(),
        }
    }

    fn link(&mut self, source_id: usize, observer_id: usize) {
        self.dependents
            .entry(source_id)
            .or_default()
            .insert(observer_id);
        self.sources
            .entry(observer_id)
            .or_default()
            .insert(source_id);
    }

    fn unlink_sources(&mut self, observer_id: usize) {
        if let Some(old_sources) = self.sources.remove(&observer_id) {
            for source_id in old_sources {
                if let Some(deps) = self.dependents.get_mut(&source_id) {
                    deps.remove(&observer_id);
                    if deps.is_empty() {
                        self.dependents.remove(&source_id);
                    }
                }
            }
        }
    }

    /// Unregister an observer and hand back its callback.
    ///
    /// The callback may own the last handle to another primitive whose drop
    /// locks the graph, so callers drop it only after releasing the lock.
    #[must_use]
    fn remove_observer(&mut self, observer_id: usize) -> Option<Observer> {
        self.selector_dirty.remove(&observer_id);
        self.unlink_sources(observer_id);
        self.observers.remove(&observer_id)
    }

    /// Empty the graph and hand back every registered callback, for the same
    /// reason as [`remove_observer`](Self::remove_observer).
    #[must_use]
    fn clear(&mut self) -> HashMap<usize, Observer> {
        self.current_observer = None;
        self.dependents.clear();
        self.sources.clear();
        self.selector_dirty.clear();
        std::mem::take(&mut self.observers)
    }
}

/// Restores the previous current observer when dropped, so a panicking
/// consumer never stays installed.
struct ObserverScope<'a> {
    graph: &'a Mutex<ReactiveGraph>,
    prev: Option<usize>,
}

impl<'a> ObserverScope<'a> {
    fn enter(graph: &'a Mutex<ReactiveGraph>, observer: Option<usize>) -> Self {
        let prev = std::mem::replace(&mut lock(graph).current_observer, observer);
        Self { graph, prev }
    }
}

impl Drop for ObserverScope<'_> {
    fn drop(&mut self) {
        lock(self.graph).current_observer = self.prev;
    }
}

fn lock(graph: &Mutex<ReactiveGraph>) -> MutexGuard<'_, ReactiveGraph> {
    graph.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Reactive runtime owned by one state container.
///
/// The runtime hands out identifiers for sources and observers, records
/// which observer read which source, and fans a change out to exactly the
/// observers that read the changed source. There is no process-wide
/// runtime: every [`AppStore`](crate::AppStore) builds its own and passes it
/// to the primitives it creates.
///
/// The graph lock is released before any callback runs, so callbacks are
/// free to read sources or trigger further changes.
///
/// # Examples
///
/// ```
/// use appstate::runtime::ReactiveRuntime;
/// use appstate::Slice;
///
/// let runtime = ReactiveRuntime::new();
/// let count = Slice::new(&runtime, 0);
/// assert_eq!(count.get(), 0);
/// ```
pub struct ReactiveRuntime {
    next_id: AtomicUsize,
    graph: Arc<Mutex<ReactiveGraph>>,
}

impl ReactiveRuntime {
    /// Create a new isolated runtime with an empty dependency graph.
    pub fn new() -> Arc<Self> {
        Arc::new(ReactiveRuntime {
            next_id: AtomicUsize::new(0),
            graph: Arc::new(Mutex::new(ReactiveGraph::new())),
        })
    }

    /// Generate the next unique ID for a reactive primitive.
    pub fn next_id(&self) -> usize {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }

    /// Remove every observer and dependency edge from this runtime.
    ///
    /// Outstanding [`WatchGuard`]s become inert. IDs keep counting up so a
    /// stale guard can never remove a newer observer.
    pub fn clear(&self) {
        let observers = lock(&self.graph).clear();
        tracing::trace!(observers = observers.len(), "reactive graph cleared");
        drop(observers);
    }

    /// Record a read of `source_id` by the observer currently running, if any.
    pub fn track_read(&self, source_id: usize) {
        let mut graph = lock(&self.graph);
        if let Some(observer_id) = graph.current_observer {
            if observer_id != source_id {
                graph.link(source_id, observer_id);
            }
        }
    }

    /// Notify every observer that depends on `source_id`.
    ///
    /// Observers run in registration order.
    pub fn notify(&self, source_id: usize) {
        let mut dependents = {
            let graph = lock(&self.graph);
            match graph.dependents.get(&source_id) {
                Some(deps) => deps.iter().copied().collect::<Vec<_>>(),
                None => return,
            }
        };
        dependents.sort_unstable();
        tracing::trace!(source_id, observers = dependents.len(), "notifying observers");

        for observer_id in dependents {
            self.propagate(observer_id);
        }
    }

    fn propagate(&self, observer_id: usize) {
        // Observer may have been dropped by an earlier callback in this fan-out.
        let observer = match lock(&self.graph).observers.get(&observer_id) {
            Some(observer) => observer.clone(),
            None => return,
        };

        match observer {
            Observer::Selector => {
                let newly_dirty = {
                    let mut graph = lock(&self.graph);
                    let dirty = graph.selector_dirty.entry(observer_id).or_insert(true);
                    !std::mem::replace(dirty, true)
                };
                if newly_dirty {
                    self.notify(observer_id);
                }
            }
            Observer::Effect(effect) => self.run_effect(observer_id, &effect),
            Observer::Subscriber(callback) => self.untracked(|| callback()),
        }
    }

    /// Register an effect observer. It is not run here.
    pub(crate) fn register_effect(&self, observer_id: usize, effect: Callback) {
        lock(&self.graph)
            .observers
            .insert(observer_id, Observer::Effect(effect));
    }

    /// Run an effect, replacing its previous sources with the ones it reads now.
    pub(crate) fn run_effect(&self, observer_id: usize, effect: &Callback) {
        lock(&self.graph).unlink_sources(observer_id);
        self.with_observer(observer_id, || effect());
    }

    /// Register a callback that runs after every change of `source_id`.
    pub(crate) fn subscribe(&self, source_id: usize, observer_id: usize, callback: Callback) {
        let mut graph = lock(&self.graph);
        graph
            .observers
            .insert(observer_id, Observer::Subscriber(callback));
        graph.link(source_id, observer_id);
    }

    /// Register a selector and mark it as dirty initially.
    pub(crate) fn register_selector(&self, selector_id: usize) {
        let mut graph = lock(&self.graph);
        graph.observers.insert(selector_id, Observer::Selector);
        graph.selector_dirty.insert(selector_id, true);
    }

    /// Check if a selector needs recomputation.
    pub(crate) fn is_dirty(&self, selector_id: usize) -> bool {
        lock(&self.graph)
            .selector_dirty
            .get(&selector_id)
            .copied()
            .unwrap_or(true)
    }

    /// Drop a selector's old sources before it recomputes.
    pub(crate) fn reset_sources(&self, observer_id: usize) {
        lock(&self.graph).unlink_sources(observer_id);
    }

    /// Mark a selector as clean after recomputation.
    pub(crate) fn mark_clean(&self, selector_id: usize) {
        let mut graph = lock(&self.graph);
        if graph.observers.contains_key(&selector_id) {
            graph.selector_dirty.insert(selector_id, false);
        }
    }

    /// Run a function with a specific observer as the current context.
    pub fn with_observer<F, R>(&self, observer_id: usize, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        let _scope = ObserverScope::enter(&self.graph, Some(observer_id));
        f()
    }

    /// Run a function without tracking any of its reads.
    pub fn untracked<F, R>(&self, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        let _scope = ObserverScope::enter(&self.graph, None);
        f()
    }

    /// Number of observers currently depending on `source_id`.
    pub fn dependent_count(&self, source_id: usize) -> usize {
        lock(&self.graph)
            .dependents
            .get(&source_id)
            .map_or(0, HashSet::len)
    }

    /// Number of live observers of any kind.
    pub fn observer_count(&self) -> usize {
        lock(&self.graph).observers.len()
    }

    /// Guard that removes `observer_id` from this runtime when dropped.
    pub(crate) fn guard(&self, observer_id: usize) -> WatchGuard {
        WatchGuard {
            observer_id,
            graph: Arc::downgrade(&self.graph),
        }
    }
}

/// RAII guard for a subscription, effect or selector registration.
///
/// Dropping the guard unregisters the observer; no further callbacks fire.
#[must_use = "dropping a WatchGuard immediately unsubscribes"]
pub struct WatchGuard {
    observer_id: usize,
    graph: Weak<Mutex<ReactiveGraph>>,
}

impl WatchGuard {
    /// The observer this guard keeps alive.
    pub fn observer_id(&self) -> usize {
        self.observer_id
    }
}

impl std::fmt::Debug for WatchGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatchGuard")
            .field("observer_id", &self.observer_id)
            .finish()
    }
}

impl Drop for WatchGuard {
    fn drop(&mut self) {
        if let Some(graph) = self.graph.upgrade() {
            let removed = lock(&graph).remove_observer(self.observer_id);
            tracing::trace!(observer_id = self.observer_id, "observer removed");
            drop(removed);
        }
    }
}
