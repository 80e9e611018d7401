//! Submit Comment Use Case
//!
//! The public submission pipeline: throttle → resolve target → validate
//! parent → sanitize → persist as `pending`.
//!
//! The limiter runs first and counts the attempt atomically, so abusive
//! traffic is cut off before any storage lookups; a blocked attempt is not
//! counted against the window.

use std::sync::Arc;

use platform::rate_limit::{Decision, SlidingWindowLimiter};

use kernel::id::CommentId;

use crate::domain::entity::comment::{Comment, NewComment};
use crate::domain::repository::{CommentRepository, TargetRepository};
use crate::domain::value_object::{
    author_name::AuthorName, comment_body::CommentBody, contact_address::ContactAddress,
    target::CommentTarget,
};
use crate::error::{CommentError, CommentResult};

/// Submit comment input
pub struct SubmitCommentInput {
    pub author_name: String,
    pub contact_address: String,
    pub body: String,
    /// Exactly one of `post_id` / `page_slug` must be set
    pub post_id: Option<i64>,
    pub page_slug: Option<String>,
    /// Optional threaded-reply parent; must share the comment's target
    pub parent_id: Option<i64>,
}

/// Submit comment use case
pub struct SubmitCommentUseCase<C, T>
where
    C: CommentRepository,
    T: TargetRepository,
{
    comments: Arc<C>,
    targets: Arc<T>,
    limiter: Arc<SlidingWindowLimiter>,
}

impl<C, T> SubmitCommentUseCase<C, T>
where
    C: CommentRepository,
    T: TargetRepository,
{
    pub fn new(comments: Arc<C>, targets: Arc<T>, limiter: Arc<SlidingWindowLimiter>) -> Self {
        Self {
            comments,
            targets,
            limiter,
        }
    }

    pub async fn execute(
        &self,
        input: SubmitCommentInput,
        source: &str,
        client_signature: Option<String>,
    ) -> CommentResult<Comment> {
        // Throttle at the door; the attempt itself is the counted event
        if let Decision::Blocked { retry_after } = self.limiter.check_and_record(source) {
            return Err(CommentError::RateLimited { retry_after });
        }

        // Exactly one of post/page, then existence and publication
        let target = CommentTarget::from_parts(input.post_id, input.page_slug)?;
        self.resolve_target(&target).await?;

        let parent_id = self.validate_parent(input.parent_id, &target).await?;

        let author_name = AuthorName::new(&input.author_name)?;
        let contact_address = ContactAddress::new(&input.contact_address)?;
        let body = CommentBody::new(&input.body)?;

        let new_comment = NewComment {
            target,
            parent_id,
            author_name,
            contact_address,
            body,
            source_address: Some(source.to_string()),
            client_signature,
        };

        let comment = self.comments.insert(&new_comment).await?;

        tracing::info!(
            comment_id = %comment.comment_id,
            target = %comment.target,
            "Comment submitted"
        );

        Ok(comment)
    }

    /// Post targets must exist and be published; page targets must exist
    async fn resolve_target(&self, target: &CommentTarget) -> CommentResult<()> {
        match target {
            CommentTarget::Post(id) => {
                let published = self
                    .targets
                    .find_post(*id)
                    .await?
                    .is_some_and(|post| post.published);
                if !published {
                    return Err(CommentError::TargetNotFound(
                        "Post not found or not published".to_string(),
                    ));
                }
            }
            CommentTarget::Page(slug) => {
                if self.targets.find_page(slug).await?.is_none() {
                    return Err(CommentError::TargetNotFound("Page not found".to_string()));
                }
            }
        }
        Ok(())
    }

    /// A reply's parent must exist and be attached to the same target
    async fn validate_parent(
        &self,
        parent_id: Option<i64>,
        target: &CommentTarget,
    ) -> CommentResult<Option<CommentId>> {
        let Some(raw) = parent_id else {
            return Ok(None);
        };

        let id = CommentId::from_i64(raw);
        let parent = self
            .comments
            .find_by_id(id)
            .await?
            .ok_or_else(|| CommentError::Validation("Parent comment does not exist".to_string()))?;

        if parent.target != *target {
            return Err(CommentError::Validation(
                "Parent comment belongs to a different post or page".to_string(),
            ));
        }

        Ok(Some(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::MemoryCommentStore;
    use crate::domain::value_object::comment_state::CommentState;
    use platform::rate_limit::RateLimitPolicy;

    const SOURCE: &str = "203.0.113.7";

    fn use_case(
        store: MemoryCommentStore,
    ) -> SubmitCommentUseCase<MemoryCommentStore, MemoryCommentStore> {
        let store = Arc::new(store);
        SubmitCommentUseCase::new(
            store.clone(),
            store,
            Arc::new(SlidingWindowLimiter::new(RateLimitPolicy::new(5, 60))),
        )
    }

    fn post_input() -> SubmitCommentInput {
        SubmitCommentInput {
            author_name: "visitor".to_string(),
            contact_address: "guest@example.com".to_string(),
            body: "nice article".to_string(),
            post_id: Some(1),
            page_slug: None,
            parent_id: None,
        }
    }

    #[tokio::test]
    async fn test_submission_starts_pending() {
        let store = MemoryCommentStore::default().with_post(1, true);
        let use_case = use_case(store);

        let comment = use_case.execute(post_input(), SOURCE, None).await.unwrap();
        assert_eq!(comment.state, CommentState::Pending);
        assert_eq!(comment.author_name.as_str(), "visitor");
        assert_eq!(comment.source_address.as_deref(), Some(SOURCE));
    }

    #[tokio::test]
    async fn test_body_sanitized_before_storage() {
        let store = MemoryCommentStore::default().with_post(1, true);
        let use_case = use_case(store);

        let mut input = post_input();
        input.body = "  <script>alert(1)</script> hello  ".to_string();
        let comment = use_case.execute(input, SOURCE, None).await.unwrap();
        assert_eq!(comment.body.as_str(), "hello");
    }

    #[tokio::test]
    async fn test_unpublished_post_rejected() {
        let store = MemoryCommentStore::default().with_post(1, false);
        let use_case = use_case(store);

        let err = use_case.execute(post_input(), SOURCE, None).await.unwrap_err();
        assert!(matches!(err, CommentError::TargetNotFound(_)));
    }

    #[tokio::test]
    async fn test_missing_post_rejected() {
        let store = MemoryCommentStore::default();
        let use_case = use_case(store);

        let err = use_case.execute(post_input(), SOURCE, None).await.unwrap_err();
        assert!(matches!(err, CommentError::TargetNotFound(_)));
    }

    #[tokio::test]
    async fn test_page_target_resolved() {
        let store = MemoryCommentStore::default().with_page("about");
        let use_case = use_case(store);

        let mut input = post_input();
        input.post_id = None;
        input.page_slug = Some("about".to_string());
        let comment = use_case.execute(input, SOURCE, None).await.unwrap();
        assert_eq!(comment.target.page_slug(), Some("about"));

        let mut input = post_input();
        input.post_id = None;
        input.page_slug = Some("missing".to_string());
        let err = use_case.execute(input, SOURCE, None).await.unwrap_err();
        assert!(matches!(err, CommentError::TargetNotFound(_)));
    }

    #[tokio::test]
    async fn test_both_and_neither_target_rejected() {
        let store = MemoryCommentStore::default().with_post(1, true).with_page("about");
        let use_case = use_case(store);

        let mut input = post_input();
        input.page_slug = Some("about".to_string());
        let err = use_case.execute(input, SOURCE, None).await.unwrap_err();
        assert!(matches!(err, CommentError::Validation(_)));

        let mut input = post_input();
        input.post_id = None;
        let err = use_case.execute(input, SOURCE, None).await.unwrap_err();
        assert!(matches!(err, CommentError::Validation(_)));
    }

    #[tokio::test]
    async fn test_reply_parent_must_share_target() {
        let store = MemoryCommentStore::default()
            .with_post(1, true)
            .with_post(2, true);
        let use_case = use_case(store);

        let parent = use_case.execute(post_input(), SOURCE, None).await.unwrap();

        // Reply on the same post: accepted
        let mut reply = post_input();
        reply.parent_id = Some(parent.comment_id.value());
        let stored = use_case.execute(reply, SOURCE, None).await.unwrap();
        assert_eq!(stored.parent_id, Some(parent.comment_id));

        // Reply naming the parent from another post: rejected
        let mut cross = post_input();
        cross.post_id = Some(2);
        cross.parent_id = Some(parent.comment_id.value());
        let err = use_case.execute(cross, SOURCE, None).await.unwrap_err();
        assert!(matches!(err, CommentError::Validation(_)));
    }

    #[tokio::test]
    async fn test_missing_parent_rejected() {
        let store = MemoryCommentStore::default().with_post(1, true);
        let use_case = use_case(store);

        let mut input = post_input();
        input.parent_id = Some(999);
        let err = use_case.execute(input, SOURCE, None).await.unwrap_err();
        assert!(matches!(err, CommentError::Validation(_)));
    }

    #[tokio::test]
    async fn test_sixth_submission_in_window_blocked() {
        let store = MemoryCommentStore::default().with_post(1, true);
        let use_case = use_case(store);

        for _ in 0..5 {
            use_case.execute(post_input(), SOURCE, None).await.unwrap();
        }
        let err = use_case.execute(post_input(), SOURCE, None).await.unwrap_err();
        assert!(matches!(err, CommentError::RateLimited { .. }));

        // Another source is unaffected
        assert!(use_case
            .execute(post_input(), "198.51.100.9", None)
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_empty_author_after_sanitization_rejected() {
        let store = MemoryCommentStore::default().with_post(1, true);
        let use_case = use_case(store);

        let mut input = post_input();
        input.author_name = "<b></b>".to_string();
        let err = use_case.execute(input, SOURCE, None).await.unwrap_err();
        assert!(matches!(err, CommentError::Validation(_)));
    }

    #[tokio::test]
    async fn test_invalid_contact_address_rejected() {
        let store = MemoryCommentStore::default().with_post(1, true);
        let use_case = use_case(store);

        let mut input = post_input();
        input.contact_address = "not-an-address".to_string();
        let err = use_case.execute(input, SOURCE, None).await.unwrap_err();
        assert!(matches!(err, CommentError::Validation(_)));
    }
}
