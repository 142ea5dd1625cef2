//! The closed set of state mutations.

use super::model::SliceId;

/// One mutation of the application state.
///
/// Every action replaces exactly one slice, named by [`Action::slice`].
/// Actions never fail: inputs are taken as given and out-of-range indices
/// leave the state unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Start a session, overwriting any existing one.
    Login { name: String, email: String },
    /// Reset the user to the logged-out default.
    Logout,
    /// Replace the user's name; email and login state are kept.
    UpdateName(String),

    /// Flip between light and dark.
    ToggleTheme,
    SetPrimaryColor(String),

    /// Add the current step to the count.
    Increment,
    /// Subtract the current step from the count.
    Decrement,
    /// Set the count to zero; the step is kept.
    Reset,
    SetCount(i64),
    SetStep(i64),

    /// Append a message.
    AddNotification(String),
    /// Remove the message at an index.
    RemoveNotification(usize),
    ClearNotifications,
}

impl Action {
    /// The slice this action replaces.
    pub fn slice(&self) -> SliceId {
        match self {
            Action::Login { .. } | Action::Logout | Action::UpdateName(_) => SliceId::User,
            Action::ToggleTheme | Action::SetPrimaryColor(_) => SliceId::Theme,
            Action::Increment
            | Action::Decrement
            | Action::Reset
            | Action::SetCount(_)
            | Action::SetStep(_) => SliceId::Counter,
            Action::AddNotification(_)
            | Action::RemoveNotification(_)
            | Action::ClearNotifications => SliceId::Notifications,
        }
    }

    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Action::Login { .. } => "login",
            Action::Logout => "logout",
            Action::UpdateName(_) => "update_name",
            Action::ToggleTheme => "toggle_theme",
            Action::SetPrimaryColor(_) => "set_primary_color",
            Action::Increment => "increment",
            Action::Decrement => "decrement",
            Action::Reset => "reset",
            Action::SetCount(_) => "set_count",
            Action::SetStep(_) => "set_step",
            Action::AddNotification(_) => "add_notification",
            Action::RemoveNotification(_) => "remove_notification",
            Action::ClearNotifications => "clear_notifications",
        }
    }
}
