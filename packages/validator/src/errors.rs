//! Validation failures

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a single answer was rejected.
///
/// The `Display` text is what the filler shows next to the field.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "limit", rename_all = "camelCase")]
pub enum ValidationError {
    #[error("This field is required")]
    Required,

    #[error("Minimum length is {0}")]
    MinLength(usize),

    #[error("Maximum length is {0}")]
    MaxLength(usize),

    #[error("Invalid format")]
    Pattern,

    #[error("Invalid email format")]
    Email,

    #[error("Invalid phone format")]
    Phone,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(ValidationError::Required.to_string(), "This field is required");
        assert_eq!(ValidationError::MinLength(2).to_string(), "Minimum length is 2");
        assert_eq!(ValidationError::Phone.to_string(), "Invalid phone format");
    }
}
