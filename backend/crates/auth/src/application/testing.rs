//! In-memory repository fake shared by the use-case tests

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use kernel::id::UserId;
use platform::password::{Password, PasswordDigest};

use crate::domain::entity::credential::Credential;
use crate::domain::repository::CredentialRepository;
use crate::domain::value_object::username::Username;
use crate::error::AuthResult;

/// bcrypt's minimum cost; keeps the test suite fast
pub const TEST_COST: u32 = 4;

#[derive(Clone, Default)]
pub struct MemoryCredentialRepo {
    credentials: Arc<Mutex<HashMap<String, Credential>>>,
}

impl MemoryCredentialRepo {
    /// Repo pre-seeded with one credential
    pub fn with_user(username: &str, password: &str) -> Self {
        let repo = Self::default();
        let digest = Password::for_verification(password.to_string())
            .hash_with_cost(TEST_COST)
            .expect("test digest");
        repo.store(username, digest);
        repo
    }

    pub fn store(&self, username: &str, digest: PasswordDigest) {
        let mut credentials = self.credentials.lock().unwrap();
        let now = Utc::now();
        let user_id = UserId::from_i64(credentials.len() as i64 + 1);
        credentials.insert(
            username.to_string(),
            Credential {
                user_id,
                username: Username::from_db(username),
                password_digest: digest,
                created_at: now,
                updated_at: now,
            },
        );
    }

    pub fn digest_of(&self, username: &str) -> Option<PasswordDigest> {
        self.credentials
            .lock()
            .unwrap()
            .get(username)
            .map(|c| c.password_digest.clone())
    }
}

impl CredentialRepository for MemoryCredentialRepo {
    async fn create(&self, username: &Username, digest: &PasswordDigest) -> AuthResult<()> {
        self.store(username.as_str(), digest.clone());
        Ok(())
    }

    async fn find_by_username(&self, username: &Username) -> AuthResult<Option<Credential>> {
        Ok(self
            .credentials
            .lock()
            .unwrap()
            .get(username.as_str())
            .cloned())
    }

    async fn replace_password_digest(
        &self,
        username: &Username,
        digest: &PasswordDigest,
    ) -> AuthResult<()> {
        if let Some(credential) = self
            .credentials
            .lock()
            .unwrap()
            .get_mut(username.as_str())
        {
            credential.replace_digest(digest.clone());
        }
        Ok(())
    }
}
