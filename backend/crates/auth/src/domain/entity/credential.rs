//! Credential Entity
//!
//! A stored login credential: unique username plus password digest. The core
//! never mutates a credential except to replace the digest after a verified
//! password change.

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use platform::password::PasswordDigest;

use crate::domain::value_object::username::Username;

/// Stored credential
#[derive(Debug, Clone)]
pub struct Credential {
    /// Database-assigned id
    pub user_id: UserId,
    /// Unique, case-sensitive login identifier
    pub username: Username,
    /// bcrypt digest (salt and cost embedded)
    pub password_digest: PasswordDigest,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl Credential {
    /// Replace the password digest after a verified password change
    pub fn replace_digest(&mut self, digest: PasswordDigest) {
        self.password_digest = digest;
        self.updated_at = Utc::now();
    }
}
