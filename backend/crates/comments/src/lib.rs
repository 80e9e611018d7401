//! Comments Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Business logic, entities, repository traits
//! - `application/` - Use cases and application services
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, routers
//!
//! ## Features
//! - Public comment submission on published posts and static pages
//! - Public listing of approved comments
//! - Moderation: filtered listing, approve/reject, delete
//!
//! ## Abuse Model
//! - Per-source sliding-window throttle on submission, checked (and counted)
//!   before any storage work
//! - All free-text fields sanitized to plain text at the boundary
//! - A comment targets exactly one post or page, enforced by the type;
//!   replies must share their parent's target
//! - Comments are born `pending` and become visible only through moderation

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::CommentConfig;
pub use error::{CommentError, CommentResult};
pub use infra::postgres::PgCommentRepository;
pub use presentation::router::{moderation_comment_router, public_comment_router};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::comment::*;
    pub use crate::domain::value_object::author_name::*;
    pub use crate::domain::value_object::comment_body::*;
    pub use crate::domain::value_object::comment_state::*;
    pub use crate::domain::value_object::contact_address::*;
    pub use crate::domain::value_object::target::*;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod store {
    pub use crate::infra::postgres::PgCommentRepository as CommentStore;
}

pub mod router {
    pub use crate::presentation::router::*;
}
