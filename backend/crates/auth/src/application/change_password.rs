//! Change Password Use Case
//!
//! Replaces a credential's digest after verifying the current secret. The
//! new password goes through the construction policy; the old one is only
//! compared, so pre-policy credentials can still be rotated.

use std::sync::Arc;

use platform::password::Password;

use crate::domain::repository::CredentialRepository;
use crate::domain::value_object::username::Username;
use crate::error::{AuthError, AuthResult};

/// Change password input
pub struct ChangePasswordInput {
    pub old_password: String,
    pub new_password: String,
}

/// Change password use case
pub struct ChangePasswordUseCase<R>
where
    R: CredentialRepository,
{
    repo: Arc<R>,
}

impl<R> ChangePasswordUseCase<R>
where
    R: CredentialRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// `subject` is the authenticated username from the access token
    pub async fn execute(&self, subject: &Username, input: ChangePasswordInput) -> AuthResult<()> {
        let credential = self
            .repo
            .find_by_username(subject)
            .await?
            .ok_or(AuthError::UnknownSubject)?;

        let old = Password::for_verification(input.old_password);
        if !credential.password_digest.verify(&old) {
            return Err(AuthError::WrongOldPassword);
        }

        let new = Password::new(input.new_password)?;
        let digest = new
            .hash()
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        self.repo
            .replace_password_digest(&credential.username, &digest)
            .await?;

        tracing::info!(username = %credential.username, "Password changed");

        Ok(())
    }
}
