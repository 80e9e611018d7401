//! Moderation Use Cases
//!
//! State changes and deletion, reachable only through authenticated
//! moderator routes. The target-state vocabulary is restricted to
//! `approved`/`rejected`; re-applying the current state is an idempotent
//! no-op. Deletion is unconditional and irreversible.

use std::sync::Arc;

use kernel::id::CommentId;

use crate::domain::repository::CommentRepository;
use crate::domain::value_object::comment_state::CommentState;
use crate::error::{CommentError, CommentResult};

/// Set comment state use case
pub struct SetCommentStateUseCase<C>
where
    C: CommentRepository,
{
    comments: Arc<C>,
}

impl<C> SetCommentStateUseCase<C>
where
    C: CommentRepository,
{
    pub fn new(comments: Arc<C>) -> Self {
        Self { comments }
    }

    /// `target_state` is the raw wire value; only `approved`/`rejected` pass
    pub async fn execute(&self, id: CommentId, target_state: &str) -> CommentResult<()> {
        let state = CommentState::parse_moderation_target(target_state)?;

        if !self.comments.update_state(id, state).await? {
            return Err(CommentError::CommentNotFound);
        }

        tracing::info!(comment_id = %id, state = %state, "Comment state updated");

        Ok(())
    }
}

/// Delete comment use case
pub struct DeleteCommentUseCase<C>
where
    C: CommentRepository,
{
    comments: Arc<C>,
}

impl<C> DeleteCommentUseCase<C>
where
    C: CommentRepository,
{
    pub fn new(comments: Arc<C>) -> Self {
        Self { comments }
    }

    pub async fn execute(&self, id: CommentId) -> CommentResult<()> {
        if !self.comments.delete(id).await? {
            return Err(CommentError::CommentNotFound);
        }

        tracing::info!(comment_id = %id, "Comment deleted");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::submit_comment::{SubmitCommentInput, SubmitCommentUseCase};
    use crate::application::testing::MemoryCommentStore;
    use platform::rate_limit::{RateLimitPolicy, SlidingWindowLimiter};

    async fn seeded_comment(store: &Arc<MemoryCommentStore>) -> CommentId {
        let submit = SubmitCommentUseCase::new(
            store.clone(),
            store.clone(),
            Arc::new(SlidingWindowLimiter::new(RateLimitPolicy::new(100, 60))),
        );
        let input = SubmitCommentInput {
            author_name: "visitor".to_string(),
            contact_address: "guest@example.com".to_string(),
            body: "nice article".to_string(),
            post_id: Some(1),
            page_slug: None,
            parent_id: None,
        };
        submit
            .execute(input, "203.0.113.7", None)
            .await
            .unwrap()
            .comment_id
    }

    #[tokio::test]
    async fn test_approve_pending_comment() {
        let store = Arc::new(MemoryCommentStore::default().with_post(1, true));
        let id = seeded_comment(&store).await;
        let use_case = SetCommentStateUseCase::new(store.clone());

        use_case.execute(id, "approved").await.unwrap();

        let comment = store.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(comment.state, CommentState::Approved);
    }

    #[tokio::test]
    async fn test_pending_is_not_a_valid_target() {
        let store = Arc::new(MemoryCommentStore::default().with_post(1, true));
        let id = seeded_comment(&store).await;
        let use_case = SetCommentStateUseCase::new(store.clone());

        use_case.execute(id, "approved").await.unwrap();

        // Un-moderating back to pending is rejected
        let err = use_case.execute(id, "pending").await.unwrap_err();
        assert!(matches!(err, CommentError::Validation(_)));

        let comment = store.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(comment.state, CommentState::Approved);
    }

    #[tokio::test]
    async fn test_reject_is_idempotent() {
        let store = Arc::new(MemoryCommentStore::default().with_post(1, true));
        let id = seeded_comment(&store).await;
        let use_case = SetCommentStateUseCase::new(store.clone());

        use_case.execute(id, "rejected").await.unwrap();
        use_case.execute(id, "rejected").await.unwrap();

        let comment = store.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(comment.state, CommentState::Rejected);
    }

    #[tokio::test]
    async fn test_unknown_state_rejected() {
        let store = Arc::new(MemoryCommentStore::default().with_post(1, true));
        let id = seeded_comment(&store).await;
        let use_case = SetCommentStateUseCase::new(store.clone());

        let err = use_case.execute(id, "published").await.unwrap_err();
        assert!(matches!(err, CommentError::Validation(_)));
    }

    #[tokio::test]
    async fn test_missing_comment_not_found() {
        let store = Arc::new(MemoryCommentStore::default());
        let use_case = SetCommentStateUseCase::new(store.clone());

        let err = use_case
            .execute(CommentId::from_i64(42), "approved")
            .await
            .unwrap_err();
        assert!(matches!(err, CommentError::CommentNotFound));
    }

    #[tokio::test]
    async fn test_delete_comment() {
        let store = Arc::new(MemoryCommentStore::default().with_post(1, true));
        let id = seeded_comment(&store).await;
        let use_case = DeleteCommentUseCase::new(store.clone());

        use_case.execute(id).await.unwrap();
        assert!(store.find_by_id(id).await.unwrap().is_none());

        // Deleting again reports not found
        let err = use_case.execute(id).await.unwrap_err();
        assert!(matches!(err, CommentError::CommentNotFound));
    }
}
