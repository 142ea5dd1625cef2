//! Fine-grained reactive primitives.
//!
//! This module provides the building blocks the store is made of:
//! - Slices: Independently replaceable reactive state cells
//! - Selectors: Cached values derived from slices
//! - Effects: Consumers that re-run when what they read changes

mod effect;
mod selector;
mod slice;

pub use effect::Effect;
pub use selector::Selector;
pub use slice::{ReadSlice, Slice};
