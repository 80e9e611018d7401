//! Current User Use Case
//!
//! Resolves a bearer token to an existing credential. Used by the auth
//! middleware and the `/me` endpoint: token validity is stateless, but the
//! subject must still name a credential that exists right now.

use std::sync::Arc;

use platform::token::{TokenError, TokenIssuer};

use crate::domain::repository::CredentialRepository;
use crate::domain::value_object::username::Username;
use crate::error::{AuthError, AuthResult};

/// Authenticated caller, inserted into request extensions by the middleware
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub username: Username,
}

/// Current user use case
pub struct CurrentUserUseCase<R>
where
    R: CredentialRepository,
{
    repo: Arc<R>,
    issuer: Arc<TokenIssuer>,
}

impl<R> CurrentUserUseCase<R>
where
    R: CredentialRepository,
{
    pub fn new(repo: Arc<R>, issuer: Arc<TokenIssuer>) -> Self {
        Self { repo, issuer }
    }

    pub async fn execute(&self, token: &str) -> AuthResult<CurrentUser> {
        let subject = self.issuer.verify(token)?;

        // A subject that no longer parses as a username cannot exist
        let username = Username::new(subject.as_str())
            .map_err(|_| AuthError::TokenInvalid(TokenError::MissingSubject))?;

        let credential = self
            .repo
            .find_by_username(&username)
            .await?
            .ok_or(AuthError::UnknownSubject)?;

        Ok(CurrentUser {
            username: credential.username,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::MemoryCredentialRepo;
    use std::time::Duration;

    fn issuer() -> Arc<TokenIssuer> {
        Arc::new(TokenIssuer::new(b"test-secret", Duration::from_secs(7200)))
    }

    #[tokio::test]
    async fn test_valid_token_resolves_user() {
        let repo = MemoryCredentialRepo::with_user("alice", "some password 12");
        let use_case = CurrentUserUseCase::new(Arc::new(repo), issuer());

        let token = issuer().issue("alice").unwrap();
        let user = use_case.execute(&token).await.unwrap();
        assert_eq!(user.username.as_str(), "alice");
    }

    #[tokio::test]
    async fn test_token_for_deleted_credential_rejected() {
        let repo = MemoryCredentialRepo::default();
        let use_case = CurrentUserUseCase::new(Arc::new(repo), issuer());

        let token = issuer().issue("ghost").unwrap();
        let err = use_case.execute(&token).await.unwrap_err();
        assert!(matches!(err, AuthError::UnknownSubject));
    }

    #[tokio::test]
    async fn test_garbage_token_rejected() {
        let repo = MemoryCredentialRepo::with_user("alice", "some password 12");
        let use_case = CurrentUserUseCase::new(Arc::new(repo), issuer());

        let err = use_case.execute("garbage").await.unwrap_err();
        assert!(matches!(
            err,
            AuthError::TokenInvalid(TokenError::Malformed)
        ));
    }

    #[tokio::test]
    async fn test_token_signed_with_other_secret_rejected() {
        let repo = MemoryCredentialRepo::with_user("alice", "some password 12");
        let use_case = CurrentUserUseCase::new(Arc::new(repo), issuer());

        let other = TokenIssuer::new(b"other-secret", Duration::from_secs(7200));
        let token = other.issue("alice").unwrap();
        let err = use_case.execute(&token).await.unwrap_err();
        assert!(matches!(
            err,
            AuthError::TokenInvalid(TokenError::InvalidSignature)
        ));
    }
}
