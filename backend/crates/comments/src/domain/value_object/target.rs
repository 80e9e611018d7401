//! Comment Target Value Object
//!
//! A comment attaches to exactly one of a blog post or a static page. The
//! sum type makes "both" and "neither" unrepresentable; the only runtime
//! check left is at the request boundary, where the two optional fields of
//! the wire format are folded into this type.

use kernel::error::app_error::{AppError, AppResult};
use kernel::id::PostId;
use std::fmt;

/// Maximum length for a page slug (in characters)
pub const PAGE_SLUG_MAX_LENGTH: usize = 64;

/// The entity a comment is attached to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommentTarget {
    /// A blog post, referenced by id; must be published to accept comments
    Post(PostId),
    /// A static page, referenced by slug
    Page(String),
}

impl CommentTarget {
    /// Fold the wire format's two optional fields into a target
    ///
    /// Naming both or neither is a validation error.
    pub fn from_parts(post_id: Option<i64>, page_slug: Option<String>) -> AppResult<Self> {
        match (post_id, page_slug) {
            (Some(_), Some(_)) => Err(AppError::bad_request(
                "Comment must target either a post or a page, not both",
            )),
            (None, None) => Err(AppError::bad_request(
                "Comment must target a post or a page",
            )),
            (Some(id), None) => {
                if id < 1 {
                    return Err(AppError::bad_request("post_id must be a positive integer"));
                }
                Ok(CommentTarget::Post(PostId::from_i64(id)))
            }
            (None, Some(slug)) => {
                let slug = slug.trim();
                if slug.is_empty() {
                    return Err(AppError::bad_request("page_slug cannot be empty"));
                }
                if slug.chars().count() > PAGE_SLUG_MAX_LENGTH {
                    return Err(AppError::bad_request(format!(
                        "page_slug must be at most {} characters",
                        PAGE_SLUG_MAX_LENGTH
                    )));
                }
                Ok(CommentTarget::Page(slug.to_string()))
            }
        }
    }

    /// Post id, when targeting a post
    pub fn post_id(&self) -> Option<PostId> {
        match self {
            CommentTarget::Post(id) => Some(*id),
            CommentTarget::Page(_) => None,
        }
    }

    /// Page slug, when targeting a page
    pub fn page_slug(&self) -> Option<&str> {
        match self {
            CommentTarget::Post(_) => None,
            CommentTarget::Page(slug) => Some(slug),
        }
    }
}

impl fmt::Display for CommentTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommentTarget::Post(id) => write!(f, "post:{}", id),
            CommentTarget::Page(slug) => write!(f, "page:{}", slug),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_target() {
        let target = CommentTarget::from_parts(Some(7), None).unwrap();
        assert_eq!(target.post_id(), Some(PostId::from_i64(7)));
        assert_eq!(target.page_slug(), None);
    }

    #[test]
    fn test_page_target() {
        let target = CommentTarget::from_parts(None, Some("about".to_string())).unwrap();
        assert_eq!(target.page_slug(), Some("about"));
        assert_eq!(target.post_id(), None);
    }

    #[test]
    fn test_both_rejected() {
        let result = CommentTarget::from_parts(Some(7), Some("about".to_string()));
        assert!(result.is_err());
    }

    #[test]
    fn test_neither_rejected() {
        let result = CommentTarget::from_parts(None, None);
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_post_id_rejected() {
        assert!(CommentTarget::from_parts(Some(0), None).is_err());
        assert!(CommentTarget::from_parts(Some(-3), None).is_err());
    }

    #[test]
    fn test_slug_trimmed_and_bounded() {
        let target = CommentTarget::from_parts(None, Some("  about  ".to_string())).unwrap();
        assert_eq!(target.page_slug(), Some("about"));

        assert!(CommentTarget::from_parts(None, Some("   ".to_string())).is_err());
        assert!(
            CommentTarget::from_parts(None, Some("s".repeat(PAGE_SLUG_MAX_LENGTH + 1))).is_err()
        );
    }
}
