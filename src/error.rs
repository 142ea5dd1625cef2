//! Error types for the state container.
//!
//! Actions themselves never fail. Errors only come from reaching for a
//! provided store where none was provided, and from reading configuration.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StateError {
    /// A provider hook ran outside of any [`AppProvider`](crate::AppProvider).
    ///
    /// Fail fast: this is a wiring mistake in the caller, not a condition
    /// to retry.
    #[error("{hook} must be used within an AppProvider")]
    Uninitialized { hook: &'static str },

    /// Configuration text could not be parsed.
    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),
}

/// A specialized `Result` type for state container operations.
pub type Result<T> = std::result::Result<T, StateError>;
