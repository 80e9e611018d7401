//! Comment Listing Use Cases
//!
//! Two views over the same repository listing: the public thread view
//! (approved comments only, oldest first) and the moderation queue (any
//! state, newest first).

use std::sync::Arc;

use crate::domain::repository::{
    CommentFilter, CommentPage, CommentRepository, PageRequest, SortOrder,
};
use crate::domain::value_object::{comment_state::CommentState, target::CommentTarget};
use crate::error::CommentResult;

/// Public listing: approved comments of one target, oldest first
pub struct ListApprovedCommentsUseCase<C>
where
    C: CommentRepository,
{
    comments: Arc<C>,
}

impl<C> ListApprovedCommentsUseCase<C>
where
    C: CommentRepository,
{
    pub fn new(comments: Arc<C>) -> Self {
        Self { comments }
    }

    pub async fn execute(
        &self,
        target: CommentTarget,
        page: PageRequest,
    ) -> CommentResult<CommentPage> {
        let filter = CommentFilter {
            target: Some(target),
            state: Some(CommentState::Approved),
        };

        self.comments
            .list(&filter, SortOrder::OldestFirst, &page)
            .await
    }
}

/// Moderator listing: optional target and state filters, newest first
pub struct ListCommentsUseCase<C>
where
    C: CommentRepository,
{
    comments: Arc<C>,
}

impl<C> ListCommentsUseCase<C>
where
    C: CommentRepository,
{
    pub fn new(comments: Arc<C>) -> Self {
        Self { comments }
    }

    pub async fn execute(
        &self,
        filter: CommentFilter,
        page: PageRequest,
    ) -> CommentResult<CommentPage> {
        self.comments
            .list(&filter, SortOrder::NewestFirst, &page)
            .await
    }
}
