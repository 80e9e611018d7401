//! Author Name Value Object
//!
//! Public display name of a comment author. Free text from anonymous
//! visitors, so markup is stripped on construction.

use kernel::error::app_error::{AppError, AppResult};
use platform::sanitize::sanitize_text;
use std::fmt;

/// Maximum length for an author name (in characters)
pub const AUTHOR_NAME_MAX_LENGTH: usize = 64;

/// Sanitized author display name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorName(String);

impl AuthorName {
    /// Sanitize and validate a raw author name
    ///
    /// Markup is stripped, surrounding whitespace trimmed, and the result
    /// truncated to 64 characters. An empty result is a validation error.
    pub fn new(raw: &str) -> AppResult<Self> {
        let sanitized = sanitize_text(raw, AUTHOR_NAME_MAX_LENGTH);

        if sanitized.is_empty() {
            return Err(AppError::bad_request("Author name cannot be empty"));
        }

        Ok(Self(sanitized))
    }

    /// Create from database value (assumed already sanitized)
    pub fn from_db(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AuthorName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_name() {
        assert_eq!(AuthorName::new("  visitor  ").unwrap().as_str(), "visitor");
    }

    #[test]
    fn test_markup_stripped() {
        assert_eq!(
            AuthorName::new("<b>visitor</b>").unwrap().as_str(),
            "visitor"
        );
    }

    #[test]
    fn test_empty_after_sanitization_rejected() {
        assert!(AuthorName::new("").is_err());
        assert!(AuthorName::new("   ").is_err());
        assert!(AuthorName::new("<script>alert(1)</script>").is_err());
    }

    #[test]
    fn test_truncated_to_max() {
        let name = AuthorName::new(&"x".repeat(100)).unwrap();
        assert_eq!(name.as_str().chars().count(), AUTHOR_NAME_MAX_LENGTH);
    }
}
