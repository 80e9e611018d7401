//! Repository Traits
//!
//! Interfaces for data persistence. Comment rows are owned by this crate;
//! posts and pages belong to the content half of the platform and are only
//! ever read here, which is why [`TargetRepository`] exposes lookup-only
//! projections.

use kernel::id::{CommentId, PostId};

use crate::domain::entity::comment::{Comment, NewComment};
use crate::domain::value_object::{comment_state::CommentState, target::CommentTarget};
use crate::error::CommentResult;

// ============================================================================
// Listing parameters
// ============================================================================

/// Listing filter for comments
#[derive(Debug, Clone, Default)]
pub struct CommentFilter {
    /// Restrict to one post or page
    pub target: Option<CommentTarget>,
    /// Restrict to one lifecycle state
    pub state: Option<CommentState>,
}

/// Sort order for listings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Public thread view
    OldestFirst,
    /// Moderation queue view
    NewestFirst,
}

/// 1-indexed page request with a bounded size
#[derive(Debug, Clone, Copy)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
}

impl PageRequest {
    /// Clamp raw query values into a valid page request
    pub fn clamped(
        page: Option<u32>,
        size: Option<u32>,
        default_size: u32,
        max_size: u32,
    ) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            size: size.unwrap_or(default_size).clamp(1, max_size),
        }
    }

    /// Row offset for this page
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.size)
    }
}

/// One page of comments plus the unpaginated total
#[derive(Debug, Clone)]
pub struct CommentPage {
    pub items: Vec<Comment>,
    pub total: u64,
}

// ============================================================================
// Repository traits
// ============================================================================

/// Comment repository trait
#[trait_variant::make(CommentRepository: Send)]
pub trait LocalCommentRepository {
    /// Insert a new comment in `pending` state, returning the stored row
    async fn insert(&self, comment: &NewComment) -> CommentResult<Comment>;

    /// Find a comment by id
    async fn find_by_id(&self, id: CommentId) -> CommentResult<Option<Comment>>;

    /// Set a comment's state; returns false when the id does not exist
    async fn update_state(&self, id: CommentId, state: CommentState) -> CommentResult<bool>;

    /// Delete a comment; returns false when the id does not exist.
    /// Cascade behavior for child replies is the storage schema's decision.
    async fn delete(&self, id: CommentId) -> CommentResult<bool>;

    /// List comments matching `filter`, ordered and paginated
    async fn list(
        &self,
        filter: &CommentFilter,
        order: SortOrder,
        page: &PageRequest,
    ) -> CommentResult<CommentPage>;
}

/// Read-only projection of a blog post
#[derive(Debug, Clone)]
pub struct PostRef {
    pub id: PostId,
    pub published: bool,
}

/// Read-only projection of a static page
#[derive(Debug, Clone)]
pub struct PageRef {
    pub slug: String,
}

/// Comment-target lookup trait (posts and pages are owned elsewhere)
#[trait_variant::make(TargetRepository: Send)]
pub trait LocalTargetRepository {
    /// Find a post by id, with its publication flag
    async fn find_post(&self, id: PostId) -> CommentResult<Option<PostRef>>;

    /// Find a page by slug
    async fn find_page(&self, slug: &str) -> CommentResult<Option<PageRef>>;
}
