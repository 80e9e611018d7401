//! Password Hashing and Verification
//!
//! bcrypt-based password handling with:
//! - Salted, cost-parameterized digests (salt and cost embedded in the digest)
//! - Zeroization of sensitive data
//! - Constant-time comparison (inside bcrypt)
//!
//! ## Input limit
//! bcrypt only consumes the first 72 bytes of its input. Both `hash` and
//! `verify` apply the same explicit 72-byte truncation, so the two sides can
//! never diverge. This is documented behavior, not a defect: plaintexts that
//! share their first 72 bytes verify against each other's digests.

use std::fmt;

use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, ZeroizeOnDrop};

// ============================================================================
// Constants
// ============================================================================

/// Minimum password length in codepoints
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Maximum password length in codepoints
pub const MAX_PASSWORD_LENGTH: usize = 128;

/// bcrypt input limit in bytes; everything beyond is ignored by the algorithm
pub const BCRYPT_INPUT_LIMIT: usize = 72;

// ============================================================================
// Error Types
// ============================================================================

/// Password policy violation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    /// Password is too short
    #[error("Password must be at least {min} characters (got {actual})")]
    TooShort { min: usize, actual: usize },

    /// Password is too long
    #[error("Password must be at most {max} characters (got {actual})")]
    TooLong { max: usize, actual: usize },

    /// Password contains only whitespace
    #[error("Password cannot be empty or contain only whitespace")]
    EmptyOrWhitespace,

    /// Password contains invalid characters (control characters)
    #[error("Password contains invalid control characters")]
    InvalidCharacter,
}

/// Password hashing errors
#[derive(Debug, Error)]
pub enum PasswordHashError {
    /// Hashing operation failed
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password with automatic memory zeroization
///
/// ## Security
/// - Implements `Zeroize` and `ZeroizeOnDrop`
/// - Does not implement `Clone` to prevent accidental copies
/// - Debug output is redacted
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct Password(String);

impl Password {
    /// Create a new password with policy validation
    ///
    /// Used wherever a password is being *set* (change-password, seeding):
    /// - Unicode NFKC normalization
    /// - Not empty/whitespace only
    /// - 8..=128 codepoints
    /// - No control characters
    pub fn new(raw: String) -> Result<Self, PasswordPolicyError> {
        let normalized: String = raw.nfkc().collect();

        if normalized.trim().is_empty() {
            return Err(PasswordPolicyError::EmptyOrWhitespace);
        }

        // Count Unicode code points, not bytes
        let char_count = normalized.chars().count();

        if char_count < MIN_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooShort {
                min: MIN_PASSWORD_LENGTH,
                actual: char_count,
            });
        }

        if char_count > MAX_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooLong {
                max: MAX_PASSWORD_LENGTH,
                actual: char_count,
            });
        }

        // Control characters (except space, tab, newline) are rejected
        for ch in normalized.chars() {
            if ch.is_control() && ch != ' ' && ch != '\t' && ch != '\n' {
                return Err(PasswordPolicyError::InvalidCharacter);
            }
        }

        Ok(Self(normalized))
    }

    /// Create a password for verification only, bypassing the policy
    ///
    /// Login must be able to compare whatever secret the client sent against
    /// the stored digest, including credentials created before the current
    /// policy. Normalization and the 72-byte truncation still apply so that
    /// verification matches hashing exactly.
    pub fn for_verification(raw: String) -> Self {
        Self(raw.nfkc().collect())
    }

    /// First 72 bytes of the normalized plaintext, as consumed by bcrypt
    fn truncated(&self) -> &[u8] {
        let bytes = self.0.as_bytes();
        &bytes[..bytes.len().min(BCRYPT_INPUT_LIMIT)]
    }

    /// Hash the password with the default bcrypt cost
    pub fn hash(&self) -> Result<PasswordDigest, PasswordHashError> {
        self.hash_with_cost(bcrypt::DEFAULT_COST)
    }

    /// Hash the password with an explicit bcrypt cost (4..=31)
    ///
    /// Lower costs are only appropriate for throwaway digests, e.g. tests.
    pub fn hash_with_cost(&self, cost: u32) -> Result<PasswordDigest, PasswordHashError> {
        let hash = bcrypt::hash(self.truncated(), cost)
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?;
        Ok(PasswordDigest(hash))
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Password").field(&"[REDACTED]").finish()
    }
}

// ============================================================================
// Password Digest (Safe to store)
// ============================================================================

/// Stored password digest in bcrypt's `$2b$...` format
///
/// The digest string embeds algorithm version, cost and salt, so two digests
/// of the same plaintext are never equal.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordDigest(String);

impl PasswordDigest {
    /// Wrap a digest loaded from storage
    ///
    /// The value is opaque here; a malformed digest simply fails every
    /// verification instead of being rejected at construction.
    pub fn new(digest: impl Into<String>) -> Self {
        Self(digest.into())
    }

    /// Get the digest string for storage
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Verify a password against this digest
    ///
    /// Applies the same 72-byte truncation as [`Password::hash`]. A malformed
    /// stored digest yields `false`, never an error.
    pub fn verify(&self, password: &Password) -> bool {
        bcrypt::verify(password.truncated(), &self.0).unwrap_or(false)
    }
}

impl fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordDigest")
            .field("digest", &"[DIGEST]")
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
