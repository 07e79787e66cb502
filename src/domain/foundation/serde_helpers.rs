//! Serde helpers for orchestrator payloads.

use serde::{Deserialize, Deserializer};

/// Deserializes a field that may be present as JSON `null`, falling back to
/// the type's default.
///
/// The orchestrator sends `null` for empty collections and objects as often as
/// it omits them, so `#[serde(default)]` alone is not enough.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
