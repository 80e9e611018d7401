//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod list_comments;
pub mod moderate;
pub mod submit_comment;

#[cfg(test)]
pub mod testing;

// Re-exports
pub use config::CommentConfig;
pub use list_comments::{ListApprovedCommentsUseCase, ListCommentsUseCase};
pub use moderate::{DeleteCommentUseCase, SetCommentStateUseCase};
pub use submit_comment::{SubmitCommentInput, SubmitCommentUseCase};
