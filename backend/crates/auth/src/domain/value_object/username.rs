//! Username Value Object
//!
//! The unique login identifier of a credential. Matching is byte-exact and
//! case-sensitive: `Alice` and `alice` are different credentials, so there is
//! no canonical form.

use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length for a username (in characters)
pub const USERNAME_MAX_LENGTH: usize = 64;

/// Username value object
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Username(String);

impl Username {
    /// Create a new username with validation
    ///
    /// Surrounding whitespace is removed; the remainder must be non-empty, at
    /// most 64 characters, and free of whitespace and control characters.
    pub fn new(raw: impl Into<String>) -> AppResult<Self> {
        let username = raw.into().trim().to_string();

        if username.is_empty() {
            return Err(AppError::bad_request("Username cannot be empty"));
        }

        if username.chars().count() > USERNAME_MAX_LENGTH {
            return Err(AppError::bad_request(format!(
                "Username must be at most {} characters",
                USERNAME_MAX_LENGTH
            )));
        }

        if username.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(AppError::bad_request(
                "Username cannot contain whitespace or control characters",
            ));
        }

        Ok(Self(username))
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(username: impl Into<String>) -> Self {
        Self(username.into())
    }

    /// Get the username as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_valid() {
        assert!(Username::new("alice").is_ok());
        assert!(Username::new("alice.b-2").is_ok());
        assert!(Username::new("  alice  ").is_ok()); // trimmed
    }

    #[test]
    fn test_username_case_sensitive() {
        let lower = Username::new("alice").unwrap();
        let upper = Username::new("Alice").unwrap();
        assert_ne!(lower, upper);
        assert_eq!(upper.as_str(), "Alice");
    }

    #[test]
    fn test_username_invalid() {
        assert!(Username::new("").is_err());
        assert!(Username::new("   ").is_err());
        assert!(Username::new("a".repeat(USERNAME_MAX_LENGTH + 1)).is_err());
        assert!(Username::new("has space").is_err());
        assert!(Username::new("has\tcontrol").is_err());
    }
}
