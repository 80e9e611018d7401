//! Comment Entity
//!
//! A visitor comment attached to exactly one post or page. Created in
//! `pending` state by the public submission pipeline; after creation it is
//! only ever touched by moderation (state change or deletion).

use chrono::{DateTime, Utc};
use kernel::id::CommentId;

use crate::domain::value_object::{
    author_name::AuthorName, comment_body::CommentBody, comment_state::CommentState,
    contact_address::ContactAddress, target::CommentTarget,
};

/// Stored comment
#[derive(Debug, Clone)]
pub struct Comment {
    /// Database-assigned id
    pub comment_id: CommentId,
    /// The post or page this comment is attached to
    pub target: CommentTarget,
    /// Optional parent comment (threaded reply); always on the same target
    pub parent_id: Option<CommentId>,
    /// Public display name
    pub author_name: AuthorName,
    /// Contact address; moderator view only
    pub contact_address: ContactAddress,
    /// Sanitized body text
    pub body: CommentBody,
    /// Lifecycle state
    pub state: CommentState,
    /// Submitter network origin; moderator view only
    pub source_address: Option<String>,
    /// Submitter client signature (User-Agent), opaque audit field
    pub client_signature: Option<String>,
    /// Submission timestamp
    pub created_at: DateTime<Utc>,
    /// Last moderation timestamp
    pub updated_at: DateTime<Utc>,
}

/// A comment about to be inserted
///
/// Carries no id and no state: the id is database-assigned and the initial
/// state is always `pending`.
#[derive(Debug, Clone)]
pub struct NewComment {
    pub target: CommentTarget,
    pub parent_id: Option<CommentId>,
    pub author_name: AuthorName,
    pub contact_address: ContactAddress,
    pub body: CommentBody,
    pub source_address: Option<String>,
    pub client_signature: Option<String>,
}
