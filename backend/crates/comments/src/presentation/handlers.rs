//! HTTP Handlers

use axum::Json;
use axum::extract::{ConnectInfo, Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use std::net::SocketAddr;
use std::sync::Arc;

use kernel::id::CommentId;
use platform::client::{extract_user_agent, source_address};
use platform::rate_limit::SlidingWindowLimiter;

use crate::application::config::{
    MODERATION_DEFAULT_PAGE_SIZE, MODERATION_MAX_PAGE_SIZE, PUBLIC_DEFAULT_PAGE_SIZE,
    PUBLIC_MAX_PAGE_SIZE,
};
use crate::application::{
    DeleteCommentUseCase, ListApprovedCommentsUseCase, ListCommentsUseCase,
    SetCommentStateUseCase, SubmitCommentInput, SubmitCommentUseCase,
};
use crate::domain::repository::{
    CommentFilter, CommentRepository, PageRequest, TargetRepository,
};
use crate::domain::value_object::{comment_state::CommentState, target::CommentTarget};
use crate::error::{CommentError, CommentResult};
use crate::presentation::dto::{
    CommentCreateRequest, CommentListResponse, CommentModeratorResponse, CommentPublicResponse,
    CommentStatusUpdateRequest, ModerationListQuery, OkResponse, PublicListQuery,
};

/// Shared state for comment handlers
#[derive(Clone)]
pub struct CommentAppState<R>
where
    R: CommentRepository + TargetRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub limiter: Arc<SlidingWindowLimiter>,
}

// ============================================================================
// Public: submit
// ============================================================================

/// POST /api/comments
pub async fn submit_comment<R>(
    State(state): State<CommentAppState<R>>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Json(req): Json<CommentCreateRequest>,
) -> CommentResult<(StatusCode, Json<CommentPublicResponse>)>
where
    R: CommentRepository + TargetRepository + Clone + Send + Sync + 'static,
{
    let source = source_address(&headers, Some(addr.ip()));
    let client_signature = extract_user_agent(&headers);

    let use_case = SubmitCommentUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.limiter.clone(),
    );

    let input = SubmitCommentInput {
        author_name: req.author_name,
        contact_address: req.author_email,
        body: req.content,
        post_id: req.post_id,
        page_slug: req.page_slug,
        parent_id: req.parent_id,
    };

    let comment = use_case.execute(input, &source, client_signature).await?;

    Ok((StatusCode::CREATED, Json(comment.into())))
}

// ============================================================================
// Public: list approved
// ============================================================================

/// GET /api/comments
pub async fn list_comments<R>(
    State(state): State<CommentAppState<R>>,
    Query(query): Query<PublicListQuery>,
) -> CommentResult<Json<CommentListResponse>>
where
    R: CommentRepository + TargetRepository + Clone + Send + Sync + 'static,
{
    let target = CommentTarget::from_parts(query.post_id, query.page_slug)?;
    let page = PageRequest::clamped(
        query.page,
        query.size,
        PUBLIC_DEFAULT_PAGE_SIZE,
        PUBLIC_MAX_PAGE_SIZE,
    );

    let use_case = ListApprovedCommentsUseCase::new(state.repo.clone());
    let result = use_case.execute(target, page).await?;

    Ok(Json(CommentListResponse {
        items: result.items.into_iter().map(Into::into).collect(),
        total: result.total,
        page: page.page,
        size: page.size,
    }))
}

// ============================================================================
// Moderation: list
// ============================================================================

/// GET /api/admin/comments
pub async fn moderation_list_comments<R>(
    State(state): State<CommentAppState<R>>,
    Query(query): Query<ModerationListQuery>,
) -> CommentResult<Json<Vec<CommentModeratorResponse>>>
where
    R: CommentRepository + TargetRepository + Clone + Send + Sync + 'static,
{
    // Both filters are optional here; a target filter still has to name
    // exactly one of post/page
    let has_target = query.post_id.is_some() || query.page_slug.is_some();
    let target = if has_target {
        Some(CommentTarget::from_parts(query.post_id, query.page_slug)?)
    } else {
        None
    };

    let state_filter = query
        .status
        .map(|s| {
            CommentState::parse(&s).ok_or_else(|| {
                CommentError::Validation(
                    "status must be pending, approved or rejected".to_string(),
                )
            })
        })
        .transpose()?;

    let page = PageRequest::clamped(
        query.page,
        query.size,
        MODERATION_DEFAULT_PAGE_SIZE,
        MODERATION_MAX_PAGE_SIZE,
    );

    let use_case = ListCommentsUseCase::new(state.repo.clone());
    let result = use_case
        .execute(
            CommentFilter {
                target,
                state: state_filter,
            },
            page,
        )
        .await?;

    Ok(Json(result.items.into_iter().map(Into::into).collect()))
}

// ============================================================================
// Moderation: state change
// ============================================================================

/// PUT /api/admin/comments/{id}/status
pub async fn set_comment_state<R>(
    State(state): State<CommentAppState<R>>,
    Path(id): Path<i64>,
    Json(req): Json<CommentStatusUpdateRequest>,
) -> CommentResult<Json<OkResponse>>
where
    R: CommentRepository + TargetRepository + Clone + Send + Sync + 'static,
{
    let use_case = SetCommentStateUseCase::new(state.repo.clone());
    use_case
        .execute(CommentId::from_i64(id), &req.status)
        .await?;

    Ok(Json(OkResponse::ok()))
}

// ============================================================================
// Moderation: delete
// ============================================================================

/// DELETE /api/admin/comments/{id}
pub async fn delete_comment<R>(
    State(state): State<CommentAppState<R>>,
    Path(id): Path<i64>,
) -> CommentResult<StatusCode>
where
    R: CommentRepository + TargetRepository + Clone + Send + Sync + 'static,
{
    let use_case = DeleteCommentUseCase::new(state.repo.clone());
    use_case.execute(CommentId::from_i64(id)).await?;

    Ok(StatusCode::NO_CONTENT)
}
