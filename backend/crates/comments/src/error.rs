//! Comment Error Types
//!
//! This module provides comment-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use std::time::Duration;
use thiserror::Error;

/// Comment-specific result type alias
pub type CommentResult<T> = Result<T, CommentError>;

/// Comment-specific error variants
#[derive(Debug, Error)]
pub enum CommentError {
    /// Malformed or missing input; always client-correctable
    #[error("{0}")]
    Validation(String),

    /// The named post/page does not exist (or the post is unpublished)
    #[error("{0}")]
    TargetNotFound(String),

    /// Comment id does not exist
    #[error("Comment not found")]
    CommentNotFound,

    /// Submissions from this source exceeded the sliding window
    #[error("Too many comment submissions, try again later")]
    RateLimited { retry_after: Duration },

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CommentError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            CommentError::Validation(_) => StatusCode::BAD_REQUEST,
            CommentError::TargetNotFound(_) | CommentError::CommentNotFound => {
                StatusCode::NOT_FOUND
            }
            CommentError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            CommentError::Database(_) | CommentError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            CommentError::Validation(_) => ErrorKind::BadRequest,
            CommentError::TargetNotFound(_) | CommentError::CommentNotFound => ErrorKind::NotFound,
            CommentError::RateLimited { .. } => ErrorKind::TooManyRequests,
            CommentError::Database(_) | CommentError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        let message = match self {
            // Storage details stay out of client responses
            CommentError::Database(_) | CommentError::Internal(_) => {
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        let err = AppError::new(self.kind(), message);
        match self {
            CommentError::RateLimited { retry_after } => err.with_retry_after(*retry_after),
            _ => err,
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            CommentError::Database(e) => {
                tracing::error!(error = %e, "Comment database error");
            }
            CommentError::Internal(msg) => {
                tracing::error!(message = %msg, "Comment internal error");
            }
            CommentError::RateLimited { retry_after } => {
                tracing::warn!(
                    retry_after_secs = retry_after.as_secs(),
                    "Comment submission rate limited"
                );
            }
            _ => {
                tracing::debug!(error = %self, "Comment error");
            }
        }
    }
}

impl IntoResponse for CommentError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for CommentError {
    fn from(err: AppError) -> Self {
        // Value-object constructors produce 400-class errors; anything else
        // that reaches here is a server-side failure
        if err.kind() == ErrorKind::BadRequest {
            CommentError::Validation(err.message().to_string())
        } else {
            CommentError::Internal(err.to_string())
        }
    }
}
