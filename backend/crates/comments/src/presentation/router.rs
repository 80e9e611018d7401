//! Comment Routers
//!
//! Two routers over the same state: the public surface (submission + approved
//! listing) and the moderation surface. The moderation router carries no
//! authentication itself — the application wires it behind
//! `auth::middleware::require_auth` when composing the app.

use axum::{
    Router,
    routing::{delete, get, put},
};
use std::sync::Arc;

use platform::rate_limit::SlidingWindowLimiter;

use crate::application::config::CommentConfig;
use crate::domain::repository::{CommentRepository, TargetRepository};
use crate::infra::postgres::PgCommentRepository;
use crate::presentation::handlers::{self, CommentAppState};

/// Create the public comment router with PostgreSQL repository
pub fn public_comment_router(repo: PgCommentRepository, config: CommentConfig) -> Router {
    public_comment_router_generic(app_state(repo, config))
}

/// Create the moderation comment router with PostgreSQL repository
pub fn moderation_comment_router(repo: PgCommentRepository, config: CommentConfig) -> Router {
    moderation_comment_router_generic(app_state(repo, config))
}

/// Build shared state; the submission limiter is created here, once
pub fn app_state<R>(repo: R, config: CommentConfig) -> CommentAppState<R>
where
    R: CommentRepository + TargetRepository + Clone + Send + Sync + 'static,
{
    CommentAppState {
        repo: Arc::new(repo),
        limiter: Arc::new(SlidingWindowLimiter::new(config.submission_limit.clone())),
    }
}

/// Public surface: POST / GET on the collection root
pub fn public_comment_router_generic<R>(state: CommentAppState<R>) -> Router
where
    R: CommentRepository + TargetRepository + Clone + Send + Sync + 'static,
{
    Router::new()
        .route(
            "/",
            get(handlers::list_comments::<R>).post(handlers::submit_comment::<R>),
        )
        .with_state(state)
}

/// Moderation surface: listing, state change, deletion
pub fn moderation_comment_router_generic<R>(state: CommentAppState<R>) -> Router
where
    R: CommentRepository + TargetRepository + Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(handlers::moderation_list_comments::<R>))
        .route("/{id}/status", put(handlers::set_comment_state::<R>))
        .route("/{id}", delete(handlers::delete_comment::<R>))
        .with_state(state)
}
