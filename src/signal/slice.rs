use crate::runtime::{ReactiveRuntime, WatchGuard};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// A reactive cell holding one independently replaceable piece of state.
///
/// Reads through [`get`](Slice::get) or [`with`](Slice::with) register the
/// running observer as a dependent of this slice. Replacing the value
/// notifies exactly those dependents, and only when the new value differs
/// from the old one.
pub struct Slice<T> {
    value: Arc<RwLock<T>>,
    id: usize,
    runtime: Arc<ReactiveRuntime>,
}

impl<T> Clone for Slice<T> {
    fn clone(&self) -> Self {
        Self {
            value: Arc::clone(&self.value),
            id: self.id,
            runtime: Arc::clone(&self.runtime),
        }
    }
}

fn read<T>(value: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    value.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(value: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    value.write().unwrap_or_else(PoisonError::into_inner)
}

impl<T: Clone + PartialEq + Send + Sync + 'static> Slice<T> {
    /// Create a new slice on `runtime` with the given initial value.
    pub fn new(runtime: &Arc<ReactiveRuntime>, initial: T) -> Self {
        Self {
            value: Arc::new(RwLock::new(initial)),
            id: runtime.next_id(),
            runtime: Arc::clone(runtime),
        }
    }

    /// Get the current value, tracking the read.
    pub fn get(&self) -> T {
        self.runtime.track_read(self.id);
        read(&self.value).clone()
    }

    /// Get the current value without registering a dependency.
    pub fn get_untracked(&self) -> T {
        read(&self.value).clone()
    }

    /// Read the value with a function without cloning.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        self.runtime.track_read(self.id);
        f(&read(&self.value))
    }

    /// Replace the value. Returns whether it changed.
    pub fn set(&self, new_value: T) -> bool {
        self.replace_with(move |_| new_value)
    }

    /// Replace the value with one derived from the previous value.
    ///
    /// Dependents are notified after the write lock is released, and only
    /// if the replacement differs from the previous value. Returns whether
    /// it changed.
    pub fn replace_with(&self, f: impl FnOnce(&T) -> T) -> bool {
        let changed = {
            let mut value = write(&self.value);
            let next = f(&value);
            if next == *value {
                false
            } else {
                *value = next;
                true
            }
        };

        if changed {
            self.runtime.notify(self.id);
        }
        changed
    }

    /// Get the slice's unique ID.
    pub fn id(&self) -> usize {
        self.id
    }

    /// A handle that can read and subscribe but not write.
    pub fn read_only(&self) -> ReadSlice<T> {
        ReadSlice {
            inner: self.clone(),
        }
    }

    /// Call `callback` with the new value after every change.
    pub fn subscribe<F>(&self, callback: F) -> WatchGuard
    where
        F: Fn(T) + Send + Sync + 'static,
    {
        let observer_id = self.runtime.next_id();
        let value = Arc::clone(&self.value);

        self.runtime.subscribe(
            self.id,
            observer_id,
            Arc::new(move || {
                let current = read(&value).clone();
                callback(current)
            }),
        );

        self.runtime.guard(observer_id)
    }

    /// Watch this slice: like [`subscribe`](Slice::subscribe), but the
    /// callback also runs once immediately with the current value.
    pub fn watch<F>(&self, callback: F) -> WatchGuard
    where
        F: Fn(T) + Send + Sync + 'static,
    {
        let callback = Arc::new(callback);
        let guard = self.subscribe({
            let callback = Arc::clone(&callback);
            move |value| callback(value)
        });
        callback(self.get_untracked());
        guard
    }
}

/// Read-only view of a [`Slice`].
///
/// This is what consumers of a store are handed: they can read, select
/// and subscribe, while replacement stays with the store's actions.
pub struct ReadSlice<T> {
    inner: Slice<T>,
}

impl<T> Clone for ReadSlice<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: Clone + PartialEq + Send + Sync + 'static> ReadSlice<T> {
    /// Get the current value, tracking the read.
    pub fn get(&self) -> T {
        self.inner.get()
    }

    /// Get the current value without registering a dependency.
    pub fn get_untracked(&self) -> T {
        self.inner.get_untracked()
    }

    /// Read the value with a function without cloning.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        self.inner.with(f)
    }

    /// Get the slice's unique ID.
    pub fn id(&self) -> usize {
        self.inner.id()
    }

    /// See [`Slice::subscribe`].
    pub fn subscribe<F>(&self, callback: F) -> WatchGuard
    where
        F: Fn(T) + Send + Sync + 'static,
    {
        self.inner.subscribe(callback)
    }

    /// See [`Slice::watch`].
    pub fn watch<F>(&self, callback: F) -> WatchGuard
    where
        F: Fn(T) + Send + Sync + 'static,
    {
        self.inner.watch(callback)
    }
}
