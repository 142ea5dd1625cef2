//! The application state container.
//!
//! [`AppStore`] owns the user, theme, counter and notification slices and
//! the [`Action`]s that replace them.

mod action;
mod model;
mod store;

pub use action::Action;
pub use model::{
    AppSnapshot, Counter, Notifications, SliceId, Theme, ThemeMode, User, DEFAULT_PRIMARY_COLOR,
};
pub use store::AppStore;
