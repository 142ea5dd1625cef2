//! Initial values for a new store.

use crate::error::Result;
use crate::store::{Counter, Theme, ThemeMode, DEFAULT_PRIMARY_COLOR};
use serde::{Deserialize, Serialize};

/// Starting values for the theme and counter slices.
///
/// Omitted fields fall back to the built-in defaults, so an empty
/// document yields exactly the state of [`AppStore::new`](crate::AppStore::new).
/// The user and notification slices always start empty.
///
/// ```
/// use appstate::{StoreConfig, ThemeMode};
///
/// let config = StoreConfig::from_toml_str(r#"
///     theme_mode = "dark"
///     step = 5
/// "#).unwrap();
///
/// assert_eq!(config.theme_mode, ThemeMode::Dark);
/// assert_eq!(config.primary_color, "#3b82f6");
/// assert_eq!(config.step, 5);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    pub theme_mode: ThemeMode,
    pub primary_color: String,
    pub count: i64,
    pub step: i64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            theme_mode: ThemeMode::Light,
            primary_color: DEFAULT_PRIMARY_COLOR.to_string(),
            count: 0,
            step: 1,
        }
    }
}

impl StoreConfig {
    /// Parse a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub(crate) fn theme(&self) -> Theme {
        Theme {
            mode: self.theme_mode,
            primary_color: self.primary_color.clone(),
        }
    }

    pub(crate) fn counter(&self) -> Counter {
        Counter {
            count: self.count,
            step: self.step,
        }
    }
}
