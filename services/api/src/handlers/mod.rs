pub mod auth;
pub mod comment;
pub mod review;
pub mod taxonomy;
pub mod title;
pub mod user;

use serde::{Deserialize, Deserializer};

/// Distinguish an absent field (`None`) from an explicit `null` (`Some(None)`).
///
/// Use with `#[serde(default, deserialize_with = "double_option")]`.
pub(crate) fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
