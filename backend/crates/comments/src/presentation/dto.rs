//! API DTOs (Data Transfer Objects)
//!
//! Field names are snake_case on the wire, mirroring the public API
//! contract. The public view exposes display fields only; the moderator view
//! adds contact address, source address and client signature.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entity::comment::Comment;

// ============================================================================
// Public submission
// ============================================================================

/// Comment submission request
#[derive(Debug, Clone, Deserialize)]
pub struct CommentCreateRequest {
    pub author_name: String,
    pub author_email: String,
    pub content: String,
    #[serde(default)]
    pub post_id: Option<i64>,
    #[serde(default)]
    pub page_slug: Option<String>,
    #[serde(default)]
    pub parent_id: Option<i64>,
}

/// Public view of a comment
#[derive(Debug, Clone, Serialize)]
pub struct CommentPublicResponse {
    pub id: i64,
    pub post_id: Option<i64>,
    pub page_slug: Option<String>,
    pub parent_id: Option<i64>,
    pub author_name: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl From<Comment> for CommentPublicResponse {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.comment_id.value(),
            post_id: comment.target.post_id().map(|id| id.value()),
            page_slug: comment.target.page_slug().map(str::to_string),
            parent_id: comment.parent_id.map(|id| id.value()),
            author_name: comment.author_name.as_str().to_string(),
            content: comment.body.as_str().to_string(),
            created_at: comment.created_at,
        }
    }
}

// ============================================================================
// Public listing
// ============================================================================

/// Public listing query
#[derive(Debug, Clone, Deserialize)]
pub struct PublicListQuery {
    pub post_id: Option<i64>,
    pub page_slug: Option<String>,
    pub page: Option<u32>,
    pub size: Option<u32>,
}

/// Public listing response
#[derive(Debug, Clone, Serialize)]
pub struct CommentListResponse {
    pub items: Vec<CommentPublicResponse>,
    pub total: u64,
    pub page: u32,
    pub size: u32,
}

// ============================================================================
// Moderation
// ============================================================================

/// Moderator listing query
#[derive(Debug, Clone, Deserialize)]
pub struct ModerationListQuery {
    pub status: Option<String>,
    pub post_id: Option<i64>,
    pub page_slug: Option<String>,
    pub page: Option<u32>,
    pub size: Option<u32>,
}

/// Moderator view of a comment
#[derive(Debug, Clone, Serialize)]
pub struct CommentModeratorResponse {
    pub id: i64,
    pub post_id: Option<i64>,
    pub page_slug: Option<String>,
    pub parent_id: Option<i64>,
    pub author_name: String,
    pub author_email: String,
    pub content: String,
    pub status: String,
    pub ip: Option<String>,
    pub user_agent: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Comment> for CommentModeratorResponse {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.comment_id.value(),
            post_id: comment.target.post_id().map(|id| id.value()),
            page_slug: comment.target.page_slug().map(str::to_string),
            parent_id: comment.parent_id.map(|id| id.value()),
            author_name: comment.author_name.as_str().to_string(),
            author_email: comment.contact_address.as_str().to_string(),
            content: comment.body.as_str().to_string(),
            status: comment.state.as_str().to_string(),
            ip: comment.source_address,
            user_agent: comment.client_signature,
            created_at: comment.created_at,
        }
    }
}

/// Moderation state update request
#[derive(Debug, Clone, Deserialize)]
pub struct CommentStatusUpdateRequest {
    pub status: String,
}

/// Plain acknowledgement body
#[derive(Debug, Clone, Serialize)]
pub struct OkResponse {
    pub ok: bool,
}

impl OkResponse {
    pub fn ok() -> Self {
        Self { ok: true }
    }
}
