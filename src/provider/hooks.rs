//! Per-slice hooks over the provided store.
//!
//! Each hook reads its slice once (tracked, so an enclosing effect
//! re-runs when that slice changes) and carries the slice's actions.

use super::context::current;
use crate::error::Result;
use crate::store::{AppStore, Counter, Notifications, Theme, User};

/// The user slice as read by [`use_user`], with the session actions.
#[derive(Debug)]
pub struct UserHook {
    pub user: User,
    store: AppStore,
}

impl UserHook {
    pub fn login(&self, name: impl Into<String>, email: impl Into<String>) {
        self.store.login(name, email);
    }

    pub fn logout(&self) {
        self.store.logout();
    }

    pub fn update_name(&self, name: impl Into<String>) {
        self.store.update_name(name);
    }
}

/// The theme slice as read by [`use_theme`], with the theme actions.
#[derive(Debug)]
pub struct ThemeHook {
    pub theme: Theme,
    store: AppStore,
}

impl ThemeHook {
    pub fn toggle_theme(&self) {
        self.store.toggle_theme();
    }

    pub fn set_primary_color(&self, color: impl Into<String>) {
        self.store.set_primary_color(color);
    }
}

/// Count and step as read by [`use_counter`], with the counter actions.
///
/// The fields are a copy taken when the hook ran; they do not follow later
/// actions.
#[derive(Debug)]
pub struct CounterHook {
    pub count: i64,
    pub step: i64,
    store: AppStore,
}

impl CounterHook {
    pub fn increment(&self) {
        self.store.increment();
    }

    pub fn decrement(&self) {
        self.store.decrement();
    }

    pub fn reset(&self) {
        self.store.reset();
    }

    pub fn set_count(&self, count: i64) {
        self.store.set_count(count);
    }

    pub fn set_step(&self, step: i64) {
        self.store.set_step(step);
    }
}

/// The notification list as read by [`use_notifications`], with the list
/// actions.
#[derive(Debug)]
pub struct NotificationsHook {
    pub notifications: Notifications,
    store: AppStore,
}

impl NotificationsHook {
    pub fn add_notification(&self, message: impl Into<String>) {
        self.store.add_notification(message);
    }

    pub fn remove_notification(&self, index: usize) {
        self.store.remove_notification(index);
    }

    pub fn clear_notifications(&self) {
        self.store.clear_notifications();
    }
}

/// Read the user slice of the provided store.
///
/// Fails with [`StateError::Uninitialized`](crate::StateError::Uninitialized)
/// outside of an [`AppProvider`](crate::AppProvider).
pub fn use_user() -> Result<UserHook> {
    let store = current("use_user")?;
    Ok(UserHook {
        user: store.user(),
        store,
    })
}

/// Read the theme slice of the provided store.
///
/// Fails with [`StateError::Uninitialized`](crate::StateError::Uninitialized)
/// outside of an [`AppProvider`](crate::AppProvider).
pub fn use_theme() -> Result<ThemeHook> {
    let store = current("use_theme")?;
    Ok(ThemeHook {
        theme: store.theme(),
        store,
    })
}

/// Read the counter slice of the provided store.
///
/// Fails with [`StateError::Uninitialized`](crate::StateError::Uninitialized)
/// outside of an [`AppProvider`](crate::AppProvider).
pub fn use_counter() -> Result<CounterHook> {
    let store = current("use_counter")?;
    let Counter { count, step } = store.counter();
    Ok(CounterHook { count, step, store })
}

/// Read the notification list of the provided store.
///
/// Fails with [`StateError::Uninitialized`](crate::StateError::Uninitialized)
/// outside of an [`AppProvider`](crate::AppProvider).
pub fn use_notifications() -> Result<NotificationsHook> {
    let store = current("use_notifications")?;
    Ok(NotificationsHook {
        notifications: store.notifications(),
        store,
    })
}
