//! Foundation module - Shared domain primitives.
//!
//! Contains the error vocabulary and serde helpers used across the
//! dialogue, action and form modules.

mod errors;
mod serde_helpers;

pub use errors::{ErrorCode, ValidationError};
pub use serde_helpers::null_as_default;
