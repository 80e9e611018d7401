//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::password::PasswordPolicyError;
use platform::token::TokenError;
use std::time::Duration;
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Wrong password or unknown username; the response never says which
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// Login attempts from this source exceeded the sliding window
    #[error("Too many login attempts, try again later")]
    RateLimited { retry_after: Duration },

    /// Bearer token missing from the request
    #[error("Not authenticated")]
    MissingToken,

    /// Bearer token failed verification
    #[error("Invalid token: {0}")]
    TokenInvalid(#[from] TokenError),

    /// Token subject does not name an existing credential
    #[error("Unknown token subject")]
    UnknownSubject,

    /// change-password with a wrong current password
    #[error("Old password is incorrect")]
    WrongOldPassword,

    /// New password rejected by policy
    #[error("Password validation failed: {0}")]
    PasswordPolicy(#[from] PasswordPolicyError),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::InvalidCredentials
            | AuthError::MissingToken
            | AuthError::TokenInvalid(_)
            | AuthError::UnknownSubject => StatusCode::UNAUTHORIZED,
            AuthError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            AuthError::WrongOldPassword | AuthError::PasswordPolicy(_) => StatusCode::BAD_REQUEST,
            AuthError::Database(e) => {
                if is_unique_violation(e) {
                    StatusCode::CONFLICT
                } else {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            }
            AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::InvalidCredentials
            | AuthError::MissingToken
            | AuthError::TokenInvalid(_)
            | AuthError::UnknownSubject => ErrorKind::Unauthorized,
            AuthError::RateLimited { .. } => ErrorKind::TooManyRequests,
            AuthError::WrongOldPassword | AuthError::PasswordPolicy(_) => ErrorKind::BadRequest,
            AuthError::Database(e) => {
                if is_unique_violation(e) {
                    ErrorKind::Conflict
                } else {
                    ErrorKind::InternalServerError
                }
            }
            AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        let message = match self {
            // Storage details stay out of client responses
            AuthError::Database(e) if is_unique_violation(e) => "Username already exists".into(),
            AuthError::Database(_) | AuthError::Internal(_) => "Internal server error".to_string(),
            other => other.to_string(),
        };

        let err = AppError::new(self.kind(), message);
        match self {
            AuthError::RateLimited { retry_after } => err.with_retry_after(*retry_after),
            _ => err,
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::RateLimited { retry_after } => {
                tracing::warn!(retry_after_secs = retry_after.as_secs(), "Login rate limited");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

/// Unique-constraint violation (duplicate username)
fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23505")
    )
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        AuthError::Internal(err.to_string())
    }
}
