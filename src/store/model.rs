//! Typed records for the four state slices.
//!
//! Every transition here is a pure function from the previous record to
//! its replacement; nothing is mutated in place.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Primary colour every new store starts with.
pub const DEFAULT_PRIMARY_COLOR: &str = "#3b82f6";

/// Identifies one slice of the application state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SliceId {
    User,
    Theme,
    Counter,
    Notifications,
}

impl SliceId {
    /// All slices, in declaration order.
    pub const ALL: [SliceId; 4] = [
        SliceId::User,
        SliceId::Theme,
        SliceId::Counter,
        SliceId::Notifications,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SliceId::User => "user",
            SliceId::Theme => "theme",
            SliceId::Counter => "counter",
            SliceId::Notifications => "notifications",
        }
    }
}

impl fmt::Display for SliceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The user session.
///
/// A logged-out user has empty `name` and `email`, except that
/// [`with_name`](User::with_name) is allowed to set a name regardless.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    pub email: String,
    pub is_logged_in: bool,
}

impl User {
    /// A logged-in session for `name` and `email`.
    pub fn logged_in(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            is_logged_in: true,
        }
    }

    /// The logged-out session.
    pub fn logged_out() -> Self {
        Self::default()
    }

    /// Same session with a different name.
    pub fn with_name(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == ThemeMode::Dark
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThemeMode::Light => f.write_str("light"),
            ThemeMode::Dark => f.write_str("dark"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    pub mode: ThemeMode,
    /// Any text; colour syntax is not checked.
    pub primary_color: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            mode: ThemeMode::Light,
            primary_color: DEFAULT_PRIMARY_COLOR.to_string(),
        }
    }
}

impl Theme {
    /// Same colour, opposite mode.
    pub fn toggled(&self) -> Self {
        Self {
            mode: self.mode.toggled(),
            primary_color: self.primary_color.clone(),
        }
    }

    pub fn with_primary_color(&self, color: impl Into<String>) -> Self {
        Self {
            mode: self.mode,
            primary_color: color.into(),
        }
    }
}

/// A counter that moves by `step`.
///
/// Arithmetic wraps on overflow; neither `count` nor `step` is bounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counter {
    pub count: i64,
    pub step: i64,
}

impl Default for Counter {
    fn default() -> Self {
        Self { count: 0, step: 1 }
    }
}

impl Counter {
    pub fn incremented(self) -> Self {
        Self {
            count: self.count.wrapping_add(self.step),
            ..self
        }
    }

    pub fn decremented(self) -> Self {
        Self {
            count: self.count.wrapping_sub(self.step),
            ..self
        }
    }

    pub fn with_count(self, count: i64) -> Self {
        Self { count, ..self }
    }

    pub fn with_step(self, step: i64) -> Self {
        Self { step, ..self }
    }
}

/// Notification messages in insertion order. Duplicates are allowed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Notifications(Vec<String>);

impl Notifications {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_appended(&self, message: impl Into<String>) -> Self {
        let mut messages = self.0.clone();
        messages.push(message.into());
        Self(messages)
    }

    /// Copy without the message at `index`; an out-of-range index yields
    /// an identical copy.
    pub fn without(&self, index: usize) -> Self {
        Self(
            self.0
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != index)
                .map(|(_, message)| message.clone())
                .collect(),
        )
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

impl<S: Into<String>> FromIterator<S> for Notifications {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Untracked copy of the whole application state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppSnapshot {
    pub user: User,
    pub theme: Theme,
    pub counter: Counter,
    pub notifications: Notifications,
}
