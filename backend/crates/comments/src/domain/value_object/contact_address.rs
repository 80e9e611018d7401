//! Contact Address Value Object
//!
//! The comment author's email-shaped contact address. Only moderators ever
//! see it; no mail is sent, so validation is a minimal `local@domain.tld`
//! shape check. Format validation runs on the full input before the storage
//! truncation to 255 characters.

use kernel::error::app_error::{AppError, AppResult};
use std::fmt;

/// Maximum stored length (in characters)
pub const CONTACT_ADDRESS_MAX_LENGTH: usize = 255;

/// Minimal validated contact address
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactAddress(String);

impl ContactAddress {
    /// Validate and truncate a raw contact address
    pub fn new(raw: &str) -> AppResult<Self> {
        let address = raw.trim();

        if address.is_empty() {
            return Err(AppError::bad_request("Contact address cannot be empty"));
        }

        if !Self::is_valid_format(address) {
            return Err(AppError::bad_request("Invalid contact address format"));
        }

        Ok(Self(
            address.chars().take(CONTACT_ADDRESS_MAX_LENGTH).collect(),
        ))
    }

    /// Minimal `local@domain.tld` shape check
    fn is_valid_format(address: &str) -> bool {
        // Must contain exactly one @
        let parts: Vec<&str> = address.split('@').collect();
        if parts.len() != 2 {
            return false;
        }

        let local = parts[0];
        let domain = parts[1];

        if local.is_empty() {
            return false;
        }

        // Domain needs at least one dot, not at either end
        if domain.is_empty() || !domain.contains('.') {
            return false;
        }
        if domain.starts_with('.') || domain.ends_with('.') {
            return false;
        }

        true
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContactAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
