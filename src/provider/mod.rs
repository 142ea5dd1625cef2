//! Context-style access to a store.
//!
//! An [`AppProvider`] makes a store reachable from code that was not handed
//! it directly. The hooks here look the store up and fail with
//! [`StateError::Uninitialized`](crate::StateError::Uninitialized) when no
//! provider is active. Code that already holds an [`AppStore`](crate::AppStore)
//! does not need any of this.

mod context;
mod hooks;

pub use context::{use_app, AppProvider};
pub use hooks::{
    use_counter, use_notifications, use_theme, use_user, CounterHook, NotificationsHook,
    ThemeHook, UserHook,
};
