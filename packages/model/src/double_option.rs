//! Serde support for patch properties typed `Option<Option<T>>`.
//!
//! A missing key stays `None` through `#[serde(default)]`, while an explicit
//! `null` becomes `Some(None)` so that a patch can clear a value. Plain serde
//! would read both as `None`.
//!
//! ```rust,ignore
//! #[serde(
//!     default,
//!     deserialize_with = "formsmith_model::double_option::deserialize",
//!     skip_serializing_if = "Option::is_none"
//! )]
//! pub placeholder: Option<Option<String>>,
//! ```

use serde::{Deserialize, Deserializer};

pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
