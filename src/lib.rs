//! # Appstate
//!
//! Application state container with per-slice reactive subscriptions.
//!
//! An [`AppStore`] holds four independent slices of UI state:
//! - the user session ([`User`])
//! - the theme ([`Theme`])
//! - a step-configurable counter ([`Counter`])
//! - a list of notifications ([`Notifications`])
//!
//! Each slice is replaced whole by one of a closed set of [`Action`]s, and
//! only the consumers that read a slice are re-run when it changes.
//!
//! ## Reactive primitives
//!
//! The store is built from fine-grained primitives that can also be used on
//! their own:
//! - `Slice<T>` - Reactive cell notifying its readers when replaced
//! - `Selector<T>` - Cached value derived from slices
//! - `Effect` - Consumer that re-runs when what it read changes
//!
//! ## Access
//!
//! Pass the store (it is cheap to clone) to whatever needs it, or install it
//! with [`AppProvider`] and reach it through the `use_*` hooks.

pub mod config;
pub mod error;
pub mod provider;
pub mod runtime;
pub mod signal;
pub mod store;

// Re-export main types for convenience
pub use config::StoreConfig;
pub use error::{Result, StateError};
pub use provider::{
    use_app, use_counter, use_notifications, use_theme, use_user, AppProvider,
};
pub use runtime::WatchGuard;
pub use signal::{Effect, ReadSlice, Selector, Slice};
pub use store::{
    Action, AppSnapshot, AppStore, Counter, Notifications, SliceId, Theme, ThemeMode, User,
};

