use super::action::Action;
use super::model::{AppSnapshot, Counter, Notifications, SliceId, Theme, User};
use crate::config::StoreConfig;
use crate::runtime::{ReactiveRuntime, WatchGuard};
use crate::signal::{Effect, ReadSlice, Selector, Slice};
use std::sync::Arc;

/// The application state container.
///
/// Holds four independent slices (user, theme, counter, notifications) and
/// exposes the only operations allowed to change them. Every action
/// replaces one slice with a new value derived from the previous one and
/// notifies only the consumers that read that slice.
///
/// Cloning an `AppStore` yields another handle onto the same state. Build
/// one store per application or session and hand it to consumers
/// explicitly, or install it with [`AppProvider`](crate::AppProvider).
///
/// # Examples
///
/// ```
/// use appstate::AppStore;
///
/// let store = AppStore::new();
/// store.set_step(5);
/// store.increment();
/// store.increment();
/// assert_eq!(store.counter().count, 10);
///
/// store.set_step(1);
/// store.decrement();
/// assert_eq!(store.counter().count, 9);
/// ```
#[derive(Clone)]
pub struct AppStore {
    runtime: Arc<ReactiveRuntime>,
    user: Slice<User>,
    theme: Slice<Theme>,
    counter: Slice<Counter>,
    notifications: Slice<Notifications>,
}

impl Default for AppStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for AppStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppStore")
            .field("state", &self.snapshot())
            .finish()
    }
}

impl AppStore {
    /// Create a store with the default state: logged out, light theme,
    /// count 0 with step 1, no notifications.
    pub fn new() -> Self {
        Self::with_config(&StoreConfig::default())
    }

    /// Create a store whose theme and counter start from `config`.
    pub fn with_config(config: &StoreConfig) -> Self {
        let runtime = ReactiveRuntime::new();
        Self {
            user: Slice::new(&runtime, User::logged_out()),
            theme: Slice::new(&runtime, config.theme()),
            counter: Slice::new(&runtime, config.counter()),
            notifications: Slice::new(&runtime, Notifications::new()),
            runtime,
        }
    }

    /// Apply one action.
    ///
    /// This is the single mutation path; the named action methods below
    /// all go through it.
    pub fn dispatch(&self, action: Action) {
        let slice = action.slice();
        let _span = tracing::debug_span!("dispatch", action = action.name(), %slice).entered();

        let changed = match action {
            Action::Login { name, email } => self.user.set(User::logged_in(name, email)),
            Action::Logout => self.user.set(User::logged_out()),
            Action::UpdateName(name) => self.user.replace_with(|user| user.with_name(name)),

            Action::ToggleTheme => self.theme.replace_with(Theme::toggled),
            Action::SetPrimaryColor(color) => self
                .theme
                .replace_with(|theme| theme.with_primary_color(color)),

            Action::Increment => self.counter.replace_with(|c| c.incremented()),
            Action::Decrement => self.counter.replace_with(|c| c.decremented()),
            Action::Reset => self.counter.replace_with(|c| c.with_count(0)),
            Action::SetCount(count) => self.counter.replace_with(|c| c.with_count(count)),
            Action::SetStep(step) => self.counter.replace_with(|c| c.with_step(step)),

            Action::AddNotification(message) => self
                .notifications
                .replace_with(|list| list.with_appended(message)),
            Action::RemoveNotification(index) => {
                self.notifications.replace_with(|list| list.without(index))
            }
            Action::ClearNotifications => self.notifications.set(Notifications::new()),
        };

        tracing::debug!(changed, "action applied");
    }

    // User actions

    pub fn login(&self, name: impl Into<String>, email: impl Into<String>) {
        self.dispatch(Action::Login {
            name: name.into(),
            email: email.into(),
        });
    }

    pub fn logout(&self) {
        self.dispatch(Action::Logout);
    }

    /// Replace the name. Applies even when nobody is logged in.
    pub fn update_name(&self, name: impl Into<String>) {
        self.dispatch(Action::UpdateName(name.into()));
    }

    // Theme actions

    pub fn toggle_theme(&self) {
        self.dispatch(Action::ToggleTheme);
    }

    pub fn set_primary_color(&self, color: impl Into<String>) {
        self.dispatch(Action::SetPrimaryColor(color.into()));
    }

    // Counter actions

    pub fn increment(&self) {
        self.dispatch(Action::Increment);
    }

    pub fn decrement(&self) {
        self.dispatch(Action::Decrement);
    }

    pub fn reset(&self) {
        self.dispatch(Action::Reset);
    }

    pub fn set_count(&self, count: i64) {
        self.dispatch(Action::SetCount(count));
    }

    pub fn set_step(&self, step: i64) {
        self.dispatch(Action::SetStep(step));
    }

    // Notification actions

    pub fn add_notification(&self, message: impl Into<String>) {
        self.dispatch(Action::AddNotification(message.into()));
    }

    /// Remove the message at `index`; out of range is a no-op.
    pub fn remove_notification(&self, index: usize) {
        self.dispatch(Action::RemoveNotification(index));
    }

    pub fn clear_notifications(&self) {
        self.dispatch(Action::ClearNotifications);
    }

    // Reads

    /// Current user; the running consumer now depends on the user slice.
    pub fn user(&self) -> User {
        self.user.get()
    }

    /// Current theme; the running consumer now depends on the theme slice.
    pub fn theme(&self) -> Theme {
        self.theme.get()
    }

    /// Current counter; the running consumer now depends on the counter slice.
    pub fn counter(&self) -> Counter {
        self.counter.get()
    }

    /// Current notifications; the running consumer now depends on that slice.
    pub fn notifications(&self) -> Notifications {
        self.notifications.get()
    }

    pub fn user_slice(&self) -> ReadSlice<User> {
        self.user.read_only()
    }

    pub fn theme_slice(&self) -> ReadSlice<Theme> {
        self.theme.read_only()
    }

    pub fn counter_slice(&self) -> ReadSlice<Counter> {
        self.counter.read_only()
    }

    pub fn notifications_slice(&self) -> ReadSlice<Notifications> {
        self.notifications.read_only()
    }

    /// Copy of the whole state. Does not register any dependency.
    pub fn snapshot(&self) -> AppSnapshot {
        AppSnapshot {
            user: self.user.get_untracked(),
            theme: self.theme.get_untracked(),
            counter: self.counter.get_untracked(),
            notifications: self.notifications.get_untracked(),
        }
    }

    // Consumers

    /// Run `callback` after every change of one slice.
    ///
    /// Changes to other slices never reach it.
    pub fn subscribe<F>(&self, slice: SliceId, callback: F) -> WatchGuard
    where
        F: Fn() + Send + Sync + 'static,
    {
        tracing::trace!(%slice, "subscribing");
        match slice {
            SliceId::User => self.user.subscribe(move |_| callback()),
            SliceId::Theme => self.theme.subscribe(move |_| callback()),
            SliceId::Counter => self.counter.subscribe(move |_| callback()),
            SliceId::Notifications => self.notifications.subscribe(move |_| callback()),
        }
    }

    /// Derived value over this store, recomputed only when a slice it read
    /// has changed.
    pub fn selector<T, F>(&self, compute: F) -> Selector<T>
    where
        T: Clone + 'static,
        F: Fn() -> T + Send + Sync + 'static,
    {
        Selector::new(&self.runtime, compute)
    }

    /// Consumer bound to this store. See [`Effect`].
    pub fn effect<F>(&self, effect: F) -> Effect
    where
        F: Fn() + Send + Sync + 'static,
    {
        Effect::new(&self.runtime, effect)
    }

    /// The runtime backing this store.
    pub fn runtime(&self) -> &Arc<ReactiveRuntime> {
        &self.runtime
    }

    /// Number of consumers currently depending on `slice`.
    pub fn subscriber_count(&self, slice: SliceId) -> usize {
        let id = match slice {
            SliceId::User => self.user.id(),
            SliceId::Theme => self.theme.id(),
            SliceId::Counter => self.counter.id(),
            SliceId::Notifications => self.notifications.id(),
        };
        self.runtime.dependent_count(id)
    }
}
