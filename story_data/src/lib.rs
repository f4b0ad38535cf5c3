//! Shared block model for Story Script timelines.

pub mod defs;
pub mod validate;

pub use defs::*;
pub use validate::{ValidationError, validate_blocks};
