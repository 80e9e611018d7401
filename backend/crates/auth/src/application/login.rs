//! Login Use Case
//!
//! Verifies a credential and issues a stateless access token.
//!
//! Call order contract with the limiter: `check` runs before any password
//! work (blocked sources never reach bcrypt), `record_failure` runs on every
//! verification failure (unknown username included, so the throttling budget
//! never reveals credential existence), `clear` runs only on success.

use std::sync::Arc;

use platform::password::Password;
use platform::rate_limit::{Decision, SlidingWindowLimiter};
use platform::token::TokenIssuer;

use crate::domain::repository::CredentialRepository;
use crate::domain::value_object::username::Username;
use crate::error::{AuthError, AuthResult};

/// Login input
pub struct LoginInput {
    pub username: String,
    pub password: String,
}

/// Login output
#[derive(Debug)]
pub struct LoginOutput {
    /// Bearer token carrying the username as subject
    pub access_token: String,
}

/// Login use case
pub struct LoginUseCase<R>
where
    R: CredentialRepository,
{
    repo: Arc<R>,
    limiter: Arc<SlidingWindowLimiter>,
    issuer: Arc<TokenIssuer>,
}

impl<R> LoginUseCase<R>
where
    R: CredentialRepository,
{
    pub fn new(
        repo: Arc<R>,
        limiter: Arc<SlidingWindowLimiter>,
        issuer: Arc<TokenIssuer>,
    ) -> Self {
        Self {
            repo,
            limiter,
            issuer,
        }
    }

    pub async fn execute(&self, input: LoginInput, source: &str) -> AuthResult<LoginOutput> {
        // Fail fast: blocked sources spend no cycles on verification
        if let Decision::Blocked { retry_after } = self.limiter.check(source) {
            return Err(AuthError::RateLimited { retry_after });
        }

        // A malformed username can't match any credential; treat it exactly
        // like an unknown one
        let Ok(username) = Username::new(input.username.as_str()) else {
            return Err(self.fail(source));
        };

        let Some(credential) = self.repo.find_by_username(&username).await? else {
            return Err(self.fail(source));
        };

        let password = Password::for_verification(input.password);
        if !credential.password_digest.verify(&password) {
            return Err(self.fail(source));
        }

        self.limiter.clear(source);

        let access_token = self
            .issuer
            .issue(credential.username.as_str())
            .map_err(|e| AuthError::Internal(format!("Token signing failed: {e}")))?;

        tracing::info!(username = %credential.username, "User logged in");

        Ok(LoginOutput { access_token })
    }

    /// Count the failure and return the uniform rejection
    fn fail(&self, source: &str) -> AuthError {
        self.limiter.record_failure(source);
        AuthError::InvalidCredentials
    }
}
