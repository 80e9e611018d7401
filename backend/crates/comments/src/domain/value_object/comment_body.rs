//! Comment Body Value Object
//!
//! The comment text itself: plain text only, markup stripped at the door.

use kernel::error::app_error::{AppError, AppResult};
use platform::sanitize::sanitize_text;
use std::fmt;

/// Maximum length for a comment body (in characters)
pub const COMMENT_BODY_MAX_LENGTH: usize = 2000;

/// Sanitized comment body text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentBody(String);

impl CommentBody {
    /// Sanitize and validate raw body text
    ///
    /// Markup is stripped, surrounding whitespace trimmed, and the result
    /// truncated to 2000 characters. An empty result is a validation error.
    pub fn new(raw: &str) -> AppResult<Self> {
        let sanitized = sanitize_text(raw, COMMENT_BODY_MAX_LENGTH);

        if sanitized.is_empty() {
            return Err(AppError::bad_request("Comment body cannot be empty"));
        }

        Ok(Self(sanitized))
    }

    /// Create from database value (assumed already sanitized)
    pub fn from_db(body: impl Into<String>) -> Self {
        Self(body.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CommentBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_element_removed_entirely() {
        let body = CommentBody::new("  <script>alert(1)</script> hello  ").unwrap();
        assert_eq!(body.as_str(), "hello");
    }

    #[test]
    fn test_markup_stripped_text_kept() {
        let body = CommentBody::new("some <b>bold</b> opinion").unwrap();
        assert_eq!(body.as_str(), "some bold opinion");
    }

    #[test]
    fn test_empty_after_sanitization_rejected() {
        assert!(CommentBody::new("").is_err());
        assert!(CommentBody::new("   \n\t  ").is_err());
        assert!(CommentBody::new("<style>p{}</style>").is_err());
    }

    #[test]
    fn test_truncated_to_exactly_max() {
        let body = CommentBody::new(&"y".repeat(3000)).unwrap();
        assert_eq!(body.as_str().chars().count(), COMMENT_BODY_MAX_LENGTH);
    }
}
