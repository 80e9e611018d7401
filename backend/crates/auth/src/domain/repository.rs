//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use crate::domain::entity::credential::Credential;
use crate::domain::value_object::username::Username;
use crate::error::AuthResult;
use platform::password::PasswordDigest;

/// Credential repository trait
#[trait_variant::make(CredentialRepository: Send)]
pub trait LocalCredentialRepository {
    /// Create a new credential
    async fn create(&self, username: &Username, digest: &PasswordDigest) -> AuthResult<()>;

    /// Find a credential by its exact username
    async fn find_by_username(&self, username: &Username) -> AuthResult<Option<Credential>>;

    /// Replace the stored password digest
    async fn replace_password_digest(
        &self,
        username: &Username,
        digest: &PasswordDigest,
    ) -> AuthResult<()>;
}
