use crate::error::{Result, StateError};
use crate::store::AppStore;
use std::cell::RefCell;

// Thread-local stack of provided stores; the innermost one wins.
thread_local! {
    static PROVIDER_STACK: RefCell<Vec<AppStore>> = RefCell::new(vec![]);
}

/// Installs a store as the current one for a region of code.
///
/// Inside [`provide`](AppProvider::provide) the `use_*` hooks resolve to
/// the provided store; outside of any provider they fail with
/// [`StateError::Uninitialized`]. Providers nest, and the innermost one
/// shadows the others until it returns.
///
/// # Examples
///
/// ```
/// use appstate::{use_counter, AppProvider, AppStore};
///
/// let store = AppStore::new();
/// AppProvider::provide(store.clone(), || {
///     let counter = use_counter().unwrap();
///     counter.increment();
/// });
/// assert_eq!(store.counter().count, 1);
///
/// assert!(use_counter().is_err());
/// ```
pub struct AppProvider;

impl AppProvider {
    /// Run `f` with `store` as the current store.
    ///
    /// The store is removed again when `f` returns, including by panic.
    pub fn provide<F, R>(store: AppStore, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        PROVIDER_STACK.with(|stack| stack.borrow_mut().push(store));
        tracing::trace!(depth = Self::depth(), "store provided");

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(f));

        PROVIDER_STACK.with(|stack| {
            stack.borrow_mut().pop();
        });

        match result {
            Ok(r) => r,
            Err(e) => std::panic::resume_unwind(e),
        }
    }

    /// Run `f` with a fresh default store, dropped when `f` returns.
    pub fn scope<F, R>(f: F) -> R
    where
        F: FnOnce() -> R,
    {
        Self::provide(AppStore::new(), f)
    }

    /// Whether a store is provided on this thread.
    pub fn is_active() -> bool {
        Self::depth() > 0
    }

    fn depth() -> usize {
        PROVIDER_STACK.with(|stack| stack.borrow().len())
    }
}

/// The innermost provided store, or an error naming `hook`.
pub(crate) fn current(hook: &'static str) -> Result<AppStore> {
    PROVIDER_STACK
        .with(|stack| stack.borrow().last().cloned())
        .ok_or_else(|| {
            tracing::debug!(hook, "store accessed outside of a provider");
            StateError::Uninitialized { hook }
        })
}

/// The provided store.
pub fn use_app() -> Result<AppStore> {
    current("use_app")
}
